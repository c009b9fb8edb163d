use chrono::NaiveDate;

use crate::error::AppError;

/// Default token format, e.g. "25aug16"
pub(crate) const TOKEN_FORMAT: &str = "%d%b%y";

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    // Try YYYYMMDD
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Ok(d);
    }
    // Try YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    Err(AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// Render a date the way the image host names its files: lowercase, so
/// "%d%b%y" gives "25aug16" rather than "25Aug16".
pub(crate) fn date_token(date: NaiveDate, format: &str) -> String {
    date.format(format).to_string().to_lowercase()
}

/// One token per day from `since` to `until`, both inclusive.
/// An inverted range yields nothing.
pub(crate) fn date_tokens(since: NaiveDate, until: NaiveDate, format: &str) -> Vec<String> {
    since
        .iter_days()
        .take_while(|d| *d <= until)
        .map(|d| date_token(d, format))
        .collect()
}
