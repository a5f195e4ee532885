use serde::{Deserialize, Serialize};
use std::fmt;

/// One normalized (country, year) GDP observation.
///
/// `gdp` is `None` when the source cell was blank or unparseable; it is never
/// collapsed to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub country: String,
    pub continent: String,
    pub year: i64,
    pub gdp: Option<f64>,
}

impl Record {
    pub fn new(
        country: impl Into<String>,
        continent: impl Into<String>,
        year: i64,
        gdp: Option<f64>,
    ) -> Self {
        Self {
            country: country.into(),
            continent: continent.into(),
            year,
            gdp,
        }
    }
}

/// The closed set of reports, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportName {
    Top10,
    Bottom10,
    GdpGrowthRate,
    AvgGdpContinent,
    GlobalGdpTrend,
    FastestGrowing,
    ConsistentDecline,
    ContinentContribution,
}

impl ReportName {
    pub const ALL: [ReportName; 8] = [
        ReportName::Top10,
        ReportName::Bottom10,
        ReportName::GdpGrowthRate,
        ReportName::AvgGdpContinent,
        ReportName::GlobalGdpTrend,
        ReportName::FastestGrowing,
        ReportName::ConsistentDecline,
        ReportName::ContinentContribution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportName::Top10 => "top10",
            ReportName::Bottom10 => "bottom10",
            ReportName::GdpGrowthRate => "gdp_growth_rate",
            ReportName::AvgGdpContinent => "avg_gdp_continent",
            ReportName::GlobalGdpTrend => "global_gdp_trend",
            ReportName::FastestGrowing => "fastest_growing",
            ReportName::ConsistentDecline => "consistent_decline",
            ReportName::ContinentContribution => "continent_contribution",
        }
    }
}

impl fmt::Display for ReportName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub label: String,
    pub value: f64,
}

impl ReportEntry {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ReportResult {
    /// Ordered (label, value) pairs: rankings, growth, averages, trend, contribution.
    Entries(Vec<ReportEntry>),
    /// A single pair; `None` when there was nothing to compare.
    Single(Option<ReportEntry>),
    /// Ordered labels (declining countries).
    Labels(Vec<String>),
}

impl ReportResult {
    pub fn is_empty(&self) -> bool {
        match self {
            ReportResult::Entries(entries) => entries.is_empty(),
            ReportResult::Single(entry) => entry.is_none(),
            ReportResult::Labels(labels) => labels.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReportResult::Entries(entries) => entries.len(),
            ReportResult::Single(entry) => usize::from(entry.is_some()),
            ReportResult::Labels(labels) => labels.len(),
        }
    }
}
