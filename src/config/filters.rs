use crate::utils::error::{EtlError, Result};
use crate::utils::validation::validate_min;
use serde_json::Value;
use std::collections::HashMap;

pub const DEFAULT_YEAR_START: i64 = 0;
pub const DEFAULT_YEAR_END: i64 = 9999;
pub const DEFAULT_DECLINE_YEARS: i64 = 5;

/// The flat `[filters]` mapping as it comes out of the configuration file.
pub type FilterMap = HashMap<String, Value>;

/// Filter settings after defaults and type checks, resolved once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFilters {
    /// Empty means every continent passes.
    pub continents: Vec<String>,
    pub year_start: i64,
    pub year_end: i64,
    /// Year used by the top/bottom rankings.
    pub year: i64,
    pub decline_years: i64,
}

impl Default for ResolvedFilters {
    fn default() -> Self {
        Self {
            continents: Vec::new(),
            year_start: DEFAULT_YEAR_START,
            year_end: DEFAULT_YEAR_END,
            year: DEFAULT_YEAR_END,
            decline_years: DEFAULT_DECLINE_YEARS,
        }
    }
}

impl ResolvedFilters {
    pub fn resolve(filters: &FilterMap) -> Result<Self> {
        let continents = match filters.get("continent") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(raw)) => parse_continents(raw),
            Some(other) => {
                return Err(EtlError::InvalidConfigValueError {
                    field: "continent".to_string(),
                    value: other.to_string(),
                    reason: "Expected a '&'-separated string of continent names".to_string(),
                })
            }
        };

        let year_start = read_int(filters, "year_start")?.unwrap_or(DEFAULT_YEAR_START);
        let year_end = read_int(filters, "year_end")?.unwrap_or(DEFAULT_YEAR_END);
        // year = 0 沿用 year_end
        let year = match read_int(filters, "year")? {
            Some(0) | None => year_end,
            Some(year) => year,
        };
        let decline_years = read_int(filters, "decline_years")?.unwrap_or(DEFAULT_DECLINE_YEARS);
        validate_min("decline_years", decline_years, 1)?;
        // 觀察窗起點必須落在 i64 範圍內
        if year_end.checked_sub(decline_years - 1).is_none() {
            return Err(EtlError::InvalidConfigValueError {
                field: "decline_years".to_string(),
                value: decline_years.to_string(),
                reason: format!("Window reaches before the earliest representable year (year_end = {})", year_end),
            });
        }

        if year_start > year_end {
            tracing::warn!(
                "year_start ({}) is after year_end ({}); windowed reports will be empty",
                year_start,
                year_end
            );
        }

        Ok(Self {
            continents,
            year_start,
            year_end,
            year,
            decline_years,
        })
    }
}

pub fn parse_continents(raw: &str) -> Vec<String> {
    raw.split('&')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_int(filters: &FilterMap, key: &str) -> Result<Option<i64>> {
    let invalid = |value: &Value| EtlError::InvalidConfigValueError {
        field: key.to_string(),
        value: value.to_string(),
        reason: "Expected a whole number".to_string(),
    };

    match filters.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Number(number)) => {
            if let Some(int) = number.as_i64() {
                return Ok(Some(int));
            }
            match number.as_f64() {
                // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
                Some(float)
                    if float.is_finite()
                        && float.fract() == 0.0
                        && float >= i64::MIN as f64
                        && float < i64::MAX as f64 =>
                {
                    Ok(Some(float as i64))
                }
                _ => Err(invalid(value)),
            }
        }
        Some(value @ Value::String(text)) => text
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| invalid(value)),
        Some(value) => Err(invalid(value)),
    }
}
