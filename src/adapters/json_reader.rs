use crate::adapters::normalize::{accept_gdp, normalize_record, parse_gdp};
use crate::domain::{Record, RecordSource};
use crate::utils::error::{EtlError, Result};
use serde_json::{Map, Value};
use std::io::{BufReader, Read};
use std::path::PathBuf;

/// Reads an array of `{country, continent, year, gdp}` objects.
#[derive(Debug, Clone)]
pub struct JsonReader {
    file_path: PathBuf,
}

impl JsonReader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn read_records<R: Read>(source: R) -> Result<Vec<Record>> {
        let rows: Vec<Map<String, Value>> = serde_json::from_reader(BufReader::new(source))?;

        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let country = text_field(row, "country");
            let continent = text_field(row, "continent");
            let year = year_field(row).ok_or_else(|| {
                EtlError::data_integrity(format!("row {} has no usable 'year'", index))
            })?;
            let gdp = match row.get("gdp") {
                None | Some(Value::Null) => None,
                Some(Value::Number(number)) => number.as_f64().and_then(accept_gdp),
                Some(Value::String(text)) => parse_gdp(text),
                Some(other) => {
                    tracing::debug!("Row {} has non-numeric gdp {}", index, other);
                    None
                }
            };

            if let Some(record) = normalize_record(&country, &continent, year, gdp)? {
                records.push(record);
            }
        }
        Ok(records)
    }
}

fn text_field(row: &Map<String, Value>, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

fn year_field(row: &Map<String, Value>) -> Option<i64> {
    match row.get("year")? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

impl RecordSource for JsonReader {
    fn load(&self) -> Result<Vec<Record>> {
        tracing::info!("📥 Reading JSON from {}", self.file_path.display());
        let file = std::fs::File::open(&self.file_path)?;
        let records = Self::read_records(file)?;
        tracing::info!("Loaded {} records", records.len());
        Ok(records)
    }
}
