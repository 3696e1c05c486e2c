//! Date and year extraction from free-text queries
//!
//! Recognizes bare 4-digit years ("phish 1999") and slash-separated dates
//! ("6/30" or "6/30/2024"), and reports the residual text with the date
//! removed so the remainder can be interpreted as an artist name.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// 4-digit year bounded by word boundaries, 1900-2099
static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("valid year pattern"));

/// Slash-separated month/day with optional 2- or 4-digit year
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?\b").expect("valid date pattern")
});

/// Two-digit years at or above this pivot are 19xx, below are 20xx
const TWO_DIGIT_YEAR_PIVOT: u32 = 70;

/// Date signal extracted from a query term.
///
/// `has_date` is true only when a full or partial slash date was found;
/// `year` is also populated by a bare 4-digit year with no slash date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInfo {
    pub has_date: bool,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    /// Query text with the matched date removed and whitespace collapsed
    pub search_without_date: String,
}

/// Find a 4-digit year (1900-2099) in a term.
///
/// # Examples
///
/// ```
/// use gigposter_search::dates::find_year;
///
/// assert_eq!(find_year("pearl jam 1994"), Some(1994));
/// assert_eq!(find_year("phish 2024 tour"), Some(2024));
/// assert_eq!(find_year("pearl jam"), None);
/// assert_eq!(find_year("track 10000"), None);
/// ```
pub fn find_year(term: &str) -> Option<i32> {
    YEAR_RE.find(term).and_then(|m| m.as_str().parse().ok())
}

/// Extract date information from a term.
///
/// Slash dates are validated as calendar dates (month/day ranges, leap
/// days); an impossible pattern like "13/45" is not treated as a date.
pub fn extract_date_info(term: &str) -> DateInfo {
    if let Some(caps) = DATE_RE.captures(term) {
        let month: Option<u32> = caps[1].parse().ok();
        let day: Option<u32> = caps[2].parse().ok();
        let year = caps.get(3).and_then(|m| normalize_year(m.as_str()));

        if let (Some(month), Some(day)) = (month, day) {
            if is_valid_month_day(month, day, year) {
                if let Some(whole) = caps.get(0) {
                    return DateInfo {
                        has_date: true,
                        year,
                        month: Some(month),
                        day: Some(day),
                        search_without_date: remove_span(term, whole.start(), whole.end()),
                    };
                }
            }
        }
    }

    if let Some(m) = YEAR_RE.find(term) {
        return DateInfo {
            has_date: false,
            year: m.as_str().parse().ok(),
            month: None,
            day: None,
            search_without_date: remove_span(term, m.start(), m.end()),
        };
    }

    DateInfo {
        has_date: false,
        year: None,
        month: None,
        day: None,
        search_without_date: term.to_string(),
    }
}

/// Remove the first 4-digit year from a term, returning the year and the
/// collapsed residual text. `None` when the term carries no year.
pub fn split_year(term: &str) -> Option<(i32, String)> {
    let m = YEAR_RE.find(term)?;
    let year = m.as_str().parse().ok()?;
    Some((year, remove_span(term, m.start(), m.end())))
}

/// Expand a 2-digit year around the pivot; pass 4-digit years through.
fn normalize_year(digits: &str) -> Option<i32> {
    let value: u32 = digits.parse().ok()?;
    if digits.len() == 4 {
        return Some(value as i32);
    }
    if value >= TWO_DIGIT_YEAR_PIVOT {
        Some(1900 + value as i32)
    } else {
        Some(2000 + value as i32)
    }
}

/// Check month/day against the calendar; a year-less partial date is
/// validated against a leap year so 2/29 is accepted.
fn is_valid_month_day(month: u32, day: u32, year: Option<i32>) -> bool {
    NaiveDate::from_ymd_opt(year.unwrap_or(2000), month, day).is_some()
}

fn remove_span(term: &str, start: usize, end: usize) -> String {
    let mut residual = String::with_capacity(term.len());
    residual.push_str(&term[..start]);
    residual.push(' ');
    residual.push_str(&term[end..]);
    residual.split_whitespace().collect::<Vec<_>>().join(" ")
}
