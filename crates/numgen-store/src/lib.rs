//! Numgen Store — local persistence for the generator history.

pub mod json_file_store;
