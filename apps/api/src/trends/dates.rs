use chrono::NaiveDate;

/// Default format for "Month Day, Year" release dates ("Jan 01, 2024").
pub const DEFAULT_RELEASE_DATE_FORMAT: &str = "%b %d, %Y";

/// Normalizes a release date. `None` means the row must be dropped.
///
/// A format using the abbreviated month (`%b`) is retried with the full
/// month name (`%B`), so "September 5, 2019" parses under the default.
pub fn parse_release_date(text: Option<&str>, format: &str) -> Option<NaiveDate> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, format).ok().or_else(|| {
        format
            .contains("%b")
            .then(|| format.replace("%b", "%B"))
            .and_then(|full| NaiveDate::parse_from_str(text, &full).ok())
    })
}
