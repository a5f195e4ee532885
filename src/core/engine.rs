use crate::config::filters::{FilterMap, ResolvedFilters};
use crate::core::reports;
use crate::domain::{PipelineService, Record, ReportName, ReportResult, ReportSink};
use crate::utils::error::Result;

/// Computes the eight reports for a record batch and pushes each to the sink.
///
/// The engine knows nothing about where records come from or how results are
/// rendered; it only holds the sink and the raw filter settings.
pub struct TransformationEngine<S: ReportSink> {
    sink: S,
    filters: FilterMap,
}

impl<S: ReportSink> TransformationEngine<S> {
    pub fn new(sink: S, filters: FilterMap) -> Self {
        Self { sink, filters }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Computes every report, in emission order, without touching a sink.
pub fn compute_reports(records: &[Record], filters: &ResolvedFilters) -> Vec<(ReportName, ReportResult)> {
    ReportName::ALL
        .iter()
        .map(|&name| (name, compute_report(name, records, filters)))
        .collect()
}

pub fn compute_report(name: ReportName, records: &[Record], filters: &ResolvedFilters) -> ReportResult {
    let ResolvedFilters {
        continents,
        year_start,
        year_end,
        year,
        decline_years,
    } = filters;

    match name {
        ReportName::Top10 => ReportResult::Entries(reports::top10(records, continents, *year)),
        ReportName::Bottom10 => {
            ReportResult::Entries(reports::bottom10(records, continents, *year))
        }
        ReportName::GdpGrowthRate => ReportResult::Entries(reports::gdp_growth_rate(
            records,
            continents,
            *year_start,
            *year_end,
        )),
        ReportName::AvgGdpContinent => ReportResult::Entries(
            reports::avg_gdp_by_continent(records, *year_start, *year_end),
        ),
        ReportName::GlobalGdpTrend => {
            ReportResult::Entries(reports::global_gdp_trend(records, *year_start, *year_end))
        }
        ReportName::FastestGrowing => ReportResult::Single(
            reports::fastest_growing_continent(records, *year_start, *year_end),
        ),
        ReportName::ConsistentDecline => ReportResult::Labels(reports::consistent_decline(
            records,
            continents,
            *year_end,
            *decline_years,
        )),
        ReportName::ContinentContribution => ReportResult::Entries(
            reports::continent_contribution(records, *year_start, *year_end),
        ),
    }
}

impl<S: ReportSink> PipelineService for TransformationEngine<S> {
    fn execute(&mut self, records: &[Record]) -> Result<()> {
        // 配置只解析一次；格式錯誤時不輸出任何報表
        let filters = ResolvedFilters::resolve(&self.filters)?;
        tracing::info!(
            "Running analytics over {} records (years {}..={}, ranking year {}, continents: {})",
            records.len(),
            filters.year_start,
            filters.year_end,
            filters.year,
            if filters.continents.is_empty() {
                "all".to_string()
            } else {
                filters.continents.join(" & ")
            }
        );

        for name in ReportName::ALL {
            let result = compute_report(name, records, &filters);
            tracing::debug!("📊 {} -> {} entries", name, result.len());
            self.sink.write(name, &result)?;
        }

        tracing::info!("✅ Emitted {} reports", ReportName::ALL.len());
        Ok(())
    }
}
