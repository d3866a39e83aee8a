//! Route modules.

use numgen_generator::domain::warnings::Warning;
use serde::Serialize;

pub mod generator;
pub mod health;
pub mod history;

/// A non-fatal notice for the front-end to display.
#[derive(Debug, Clone, Serialize)]
pub struct NoticeView {
    /// Machine-readable code.
    pub code: &'static str,
    /// Message to show the user.
    pub message: String,
}

impl From<Warning> for NoticeView {
    fn from(warning: Warning) -> Self {
        Self {
            code: warning.code(),
            message: warning.to_string(),
        }
    }
}

pub(crate) fn notices(warning: Option<Warning>) -> Vec<NoticeView> {
    warning.into_iter().map(NoticeView::from).collect()
}
