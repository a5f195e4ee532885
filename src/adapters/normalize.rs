//! Shared record hygiene for every input adapter.
//!
//! - blank or unparseable gdp cells become `None`, never zero
//! - rows on the reserved `global` aggregate continent are dropped
//! - a record must name its country

use crate::domain::Record;
use crate::utils::error::{EtlError, Result};

pub const COUNTRY_COLUMN: &str = "Country Name";
pub const CONTINENT_COLUMN: &str = "Continent";
pub const AGGREGATE_CONTINENT: &str = "global";

/// Year columns are headers made only of ASCII digits, e.g. `1999`.
pub fn parse_year_column(header: &str) -> Option<i64> {
    let trimmed = header.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

pub fn is_aggregate_continent(continent: &str) -> bool {
    continent.trim().eq_ignore_ascii_case(AGGREGATE_CONTINENT)
}

pub fn parse_gdp(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => accept_gdp(value),
        Err(_) => {
            tracing::debug!("Unparseable gdp cell '{}' treated as missing", trimmed);
            None
        }
    }
}

/// Negative or non-finite values are not a gdp.
pub fn accept_gdp(value: f64) -> Option<f64> {
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        tracing::warn!("Ignoring out-of-range gdp value {}", value);
        None
    }
}

/// Builds a record, or `None` when the row belongs to the aggregate continent.
pub fn normalize_record(
    country: &str,
    continent: &str,
    year: i64,
    gdp: Option<f64>,
) -> Result<Option<Record>> {
    if is_aggregate_continent(continent) {
        return Ok(None);
    }
    let country = country.trim();
    if country.is_empty() {
        return Err(EtlError::data_integrity(format!(
            "record for year {} has no country name",
            year
        )));
    }
    Ok(Some(Record::new(country, continent.trim(), year, gdp)))
}
