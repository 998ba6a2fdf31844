//! Resolves the concrete `[from, to]` date range a query runs over.

use log::debug;
use time::{macros::format_description, Date, Duration};

use super::Error;
use crate::db::ClimateData;

/// Length of the trailing window served by the temperature observation
/// listing. Fixed, not calendar aware.
pub const TRAILING_WINDOW_DAYS: i64 = 366;

/// Inclusive range of ISO `YYYY-MM-DD` dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    pub from: String,
    pub to: String,
}

impl DateWindow {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// `[year]` also takes a leading sign, which would sort before every stored
/// date, so anything not starting with a digit is rejected up front.
pub fn parse_date(value: &str) -> Result<Date, Error> {
    if !value.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(Error::MalformedDate(value.to_owned()));
    }

    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::MalformedDate(value.to_owned()))
}

fn format_date(date: Date) -> String {
    // `[year]-[month]-[day]` always formats for the years `parse_date` accepts
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Window for a start date and an optional end date.
///
/// With an end date the window is `[start, end]` as given; a backwards range
/// is not rejected and simply matches nothing. Without one the window ends at
/// the latest recorded date, and `None` is returned when the dataset holds no
/// measurements at all.
pub async fn resolve(
    store: &dyn ClimateData,
    start: &str,
    end: Option<&str>,
) -> Result<Option<DateWindow>, Error> {
    parse_date(start)?;

    if let Some(end) = end {
        parse_date(end)?;
        return Ok(Some(DateWindow::new(start, end)));
    }

    let Some(latest) = store.latest_date().await? else {
        debug!("no measurements recorded, nothing to resolve {} against", start);
        return Ok(None);
    };
    debug!("open ended window from {} resolved to {}", start, latest);

    Ok(Some(DateWindow::new(start, latest)))
}

/// The trailing-year window ending at `latest`.
///
/// The cutoff `latest - 366 days` is exclusive, so for `2017-08-23` the window
/// is `[2016-08-23, 2017-08-23]`. `latest` comes from the store, so a value
/// that is not a usable date is reported as `InvalidStoredDate`.
pub fn trailing_year(latest: &str) -> Result<DateWindow, Error> {
    let invalid = || Error::InvalidStoredDate(latest.to_owned());
    let latest_date = parse_date(latest).map_err(|_| invalid())?;
    let from = latest_date
        .checked_sub(Duration::days(TRAILING_WINDOW_DAYS))
        .and_then(Date::next_day)
        .ok_or_else(invalid)?;

    Ok(DateWindow::new(format_date(from), latest))
}
