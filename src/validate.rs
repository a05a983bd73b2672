//! Per-tool request validation
//!
//! Numeric horizons are clamped rather than rejected; coordinate and
//! date problems are rejected. The asymmetry is the established contract
//! of the tool interface.

use crate::error::AgricastError;
use crate::Result;
use chrono::{Duration, NaiveDate, Utc};

/// Maximum forecast horizon supported by the backend
pub const FORECAST_MAX_DAYS: u32 = 16;

/// Maximum agricultural outlook horizon
pub const AGRICULTURAL_MAX_DAYS: u32 = 7;

/// Days behind "today" at which the historical archive ends
pub const HISTORICAL_LAG_DAYS: i64 = 5;

/// Clamp a requested day count into [1, max]
#[must_use]
pub fn clamp_days(days: u32, max: u32) -> u32 {
    days.clamp(1, max)
}

/// Validate a historical date range against today's date
pub fn validate_date_range(start_date: &str, end_date: &str) -> Result<(NaiveDate, NaiveDate)> {
    validate_date_range_at(start_date, end_date, Utc::now().date_naive())
}

/// Validate a historical date range against an explicit "today".
///
/// Both dates must parse as YYYY-MM-DD, the range must be ordered, and
/// the end must not reach past the archive cutoff (today minus
/// [`HISTORICAL_LAG_DAYS`], cutoff itself allowed).
pub fn validate_date_range_at(
    start_date: &str,
    end_date: &str,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate)> {
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;

    if end < start {
        return Err(AgricastError::DateOrder { start, end });
    }

    let cutoff = today - Duration::days(HISTORICAL_LAG_DAYS);
    if end > cutoff {
        return Err(AgricastError::HistoricalRange { end, cutoff });
    }

    Ok((start, end))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AgricastError::InvalidDateFormat {
            value: value.to_string(),
        }
    })
}
