use crate::adapters::normalize::{
    normalize_record, parse_gdp, parse_year_column, CONTINENT_COLUMN, COUNTRY_COLUMN,
};
use crate::domain::{Record, RecordSource};
use crate::utils::error::{EtlError, Result};
use std::io::Read;
use std::path::PathBuf;

/// Reads a wide table (`Country Name`, `Continent`, one column per year).
#[derive(Debug, Clone)]
pub struct CsvReader {
    file_path: PathBuf,
}

impl CsvReader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// 將寬表轉成每個 (國家, 年份) 一筆紀錄
    pub fn read_wide<R: Read>(source: R) -> Result<Vec<Record>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let country_idx = position(COUNTRY_COLUMN).ok_or_else(|| {
            EtlError::data_integrity(format!("missing '{}' column", COUNTRY_COLUMN))
        })?;
        let continent_idx = position(CONTINENT_COLUMN);
        if continent_idx.is_none() {
            tracing::warn!("No '{}' column; continents will be empty", CONTINENT_COLUMN);
        }

        let year_columns: Vec<(usize, i64)> = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, header)| parse_year_column(header).map(|year| (idx, year)))
            .collect();
        tracing::debug!("Found {} year columns", year_columns.len());

        let mut records = Vec::new();
        let mut skipped_rows = 0usize;
        for row in reader.records() {
            let row = row?;
            let country = row.get(country_idx).unwrap_or("");
            let continent = continent_idx.and_then(|idx| row.get(idx)).unwrap_or("");

            for &(idx, year) in &year_columns {
                let gdp = row.get(idx).and_then(parse_gdp);
                match normalize_record(country, continent, year, gdp)? {
                    Some(record) => records.push(record),
                    None => {
                        skipped_rows += 1;
                        break;
                    }
                }
            }
        }

        if skipped_rows > 0 {
            tracing::info!("Dropped {} aggregate rows", skipped_rows);
        }
        Ok(records)
    }
}

impl RecordSource for CsvReader {
    fn load(&self) -> Result<Vec<Record>> {
        tracing::info!("📥 Reading CSV from {}", self.file_path.display());
        let file = std::fs::File::open(&self.file_path)?;
        let records = Self::read_wide(file)?;
        tracing::info!("Loaded {} records", records.len());
        Ok(records)
    }
}
