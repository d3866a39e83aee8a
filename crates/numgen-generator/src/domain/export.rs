//! CSV export of the history.

use numgen_core::clock::Clock;

use super::history::History;

const HEADERS: [&str; 3] = ["Number", "Range", "Timestamp"];

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn row<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields.into_iter().map(quote).collect::<Vec<_>>().join(",")
}

/// Renders the history as CSV, newest first: a header row then one quoted
/// row per entry, separated by `\n`.
#[must_use]
pub fn to_csv(history: &History) -> String {
    let mut lines = Vec::with_capacity(history.len() + 1);
    lines.push(row(HEADERS));
    for entry in history.iter() {
        let number = entry.number().to_string();
        let label = entry.range_label();
        lines.push(row([number.as_str(), label.as_str(), entry.timestamp()]));
    }
    lines.join("\n")
}

/// Download name for an export made now, e.g. `random_numbers_2026-01-15.csv`.
#[must_use]
pub fn export_file_name(clock: &dyn Clock) -> String {
    format!("random_numbers_{}.csv", clock.date())
}
