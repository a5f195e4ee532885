//! The eight analytic reports as pure functions over a record batch.

use crate::core::filters::{
    gdp_by_country, group_totals, growth_rate, in_window, passes_continent, round2,
};
use crate::domain::{Record, ReportEntry};
use std::collections::{BTreeSet, HashMap, HashSet};

pub const RANK_LIMIT: usize = 10;

/// Highest gdp countries at `year`. Ties keep input order.
pub fn top10(records: &[Record], continents: &[String], year: i64) -> Vec<ReportEntry> {
    let mut ranked = gdp_by_country(records, continents, year);
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    into_entries(ranked.into_iter().take(RANK_LIMIT))
}

/// Lowest gdp countries at `year`. Ties keep input order.
pub fn bottom10(records: &[Record], continents: &[String], year: i64) -> Vec<ReportEntry> {
    let mut ranked = gdp_by_country(records, continents, year);
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    into_entries(ranked.into_iter().take(RANK_LIMIT))
}

/// Growth between the window's end years for countries present at both ends.
pub fn gdp_growth_rate(
    records: &[Record],
    continents: &[String],
    year_start: i64,
    year_end: i64,
) -> Vec<ReportEntry> {
    let windowed: Vec<&Record> = records
        .iter()
        .filter(|r| passes_continent(continents, r) && in_window(r, year_start, year_end))
        .collect();

    let start = gdp_by_country(windowed.iter().copied(), &[], year_start);
    let end: HashMap<String, f64> = gdp_by_country(windowed.iter().copied(), &[], year_end)
        .into_iter()
        .collect();

    let mut growth: Vec<(String, f64)> = start
        .into_iter()
        .filter_map(|(country, start_gdp)| {
            let end_gdp = *end.get(&country)?;
            Some((country, growth_rate(start_gdp, end_gdp)))
        })
        .collect();
    growth.sort_by(|a, b| b.1.total_cmp(&a.1));
    into_entries(growth)
}

/// Mean in-window gdp per continent, all continents, sorted by name.
pub fn avg_gdp_by_continent(records: &[Record], year_start: i64, year_end: i64) -> Vec<ReportEntry> {
    let groups = group_totals(
        records.iter().filter(|r| in_window(r, year_start, year_end)),
        |r| r.continent.as_str(),
    );
    groups
        .into_iter()
        .map(|(continent, total)| ReportEntry::new(continent, round2(total.mean())))
        .collect()
}

/// Total in-window gdp per year, ascending by year.
pub fn global_gdp_trend(records: &[Record], year_start: i64, year_end: i64) -> Vec<ReportEntry> {
    let groups = group_totals(
        records.iter().filter(|r| in_window(r, year_start, year_end)),
        |r| r.year,
    );
    groups
        .into_iter()
        .map(|(year, total)| ReportEntry::new(year.to_string(), round2(total.sum)))
        .collect()
}

/// The continent whose total gdp grew most from `year_start` to `year_end`.
///
/// Continents are enumerated from every record with a gdp, in name order; the
/// first one reaching the maximum wins.
pub fn fastest_growing_continent(
    records: &[Record],
    year_start: i64,
    year_end: i64,
) -> Option<ReportEntry> {
    let mut continents: BTreeSet<&str> = BTreeSet::new();
    let mut start_totals: HashMap<&str, f64> = HashMap::new();
    let mut end_totals: HashMap<&str, f64> = HashMap::new();

    for record in records {
        let Some(gdp) = record.gdp else { continue };
        let continent = record.continent.as_str();
        continents.insert(continent);
        if record.year == year_start {
            *start_totals.entry(continent).or_default() += gdp;
        }
        if record.year == year_end {
            *end_totals.entry(continent).or_default() += gdp;
        }
    }

    let mut best: Option<ReportEntry> = None;
    for continent in continents {
        let start = start_totals.get(continent).copied().unwrap_or(0.0);
        let end = end_totals.get(continent).copied().unwrap_or(0.0);
        let growth = growth_rate(start, end);
        if best.as_ref().map_or(true, |current| growth > current.value) {
            best = Some(ReportEntry::new(continent, growth));
        }
    }
    best
}

/// Countries whose gdp strictly fell every year over the last `decline_years`
/// years ending at `year_end`.
///
/// A country missing a gdp in any year of the run is not declining. Fewer than
/// two years cannot show a decline.
pub fn consistent_decline(
    records: &[Record],
    continents: &[String],
    year_end: i64,
    decline_years: i64,
) -> Vec<String> {
    if decline_years < 2 {
        return Vec::new();
    }
    let Some(first_year) = year_end.checked_sub(decline_years - 1) else {
        return Vec::new();
    };

    let mut lookup: HashMap<(&str, i64), f64> = HashMap::new();
    let mut countries: BTreeSet<&str> = BTreeSet::new();
    let mut years: HashSet<i64> = HashSet::new();
    for record in records {
        let Some(gdp) = record.gdp else { continue };
        lookup.insert((record.country.as_str(), record.year), gdp);
        years.insert(record.year);
        if passes_continent(continents, record) {
            countries.insert(record.country.as_str());
        }
    }
    // 資料年份不足以填滿整個窗口
    if (years.len() as u64) < decline_years as u64 {
        return Vec::new();
    }

    countries
        .into_iter()
        .filter(|country| {
            let mut previous: Option<f64> = None;
            for year in first_year..=year_end {
                let Some(gdp) = lookup.get(&(*country, year)).copied() else {
                    return false;
                };
                if previous.is_some_and(|last| last <= gdp) {
                    return false;
                }
                previous = Some(gdp);
            }
            true
        })
        .map(str::to_string)
        .collect()
}

/// Each continent's share of total in-window gdp, in percent, sorted by name.
pub fn continent_contribution(
    records: &[Record],
    year_start: i64,
    year_end: i64,
) -> Vec<ReportEntry> {
    let in_range: Vec<&Record> = records
        .iter()
        .filter(|r| in_window(r, year_start, year_end))
        .collect();
    let global_total: f64 = in_range.iter().filter_map(|r| r.gdp).sum();
    let groups = group_totals(in_range.iter().copied(), |r| r.continent.as_str());

    groups
        .into_iter()
        .map(|(continent, total)| {
            let share = if global_total == 0.0 {
                0.0
            } else {
                round2(total.sum / global_total * 100.0)
            };
            ReportEntry::new(continent, share)
        })
        .collect()
}

fn into_entries(pairs: impl IntoIterator<Item = (String, f64)>) -> Vec<ReportEntry> {
    pairs
        .into_iter()
        .map(|(label, value)| ReportEntry::new(label, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(country: &str, continent: &str, year: i64, gdp: f64) -> Record {
        Record::new(country, continent, year, Some(gdp))
    }

    fn labels(entries: &[ReportEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.label.as_str()).collect()
    }

    fn ranking_fixture() -> Vec<Record> {
        (0..12)
            .map(|i| rec(&format!("C{i:02}"), if i % 2 == 0 { "X" } else { "Y" }, 2000, (i * 10) as f64))
            .chain(std::iter::once(Record::new("Missing", "X", 2000, None)))
            .collect()
    }

    #[test]
    fn test_top10_sorted_descending_and_truncated() {
        let result = top10(&ranking_fixture(), &[], 2000);
        assert_eq!(result.len(), 10);
        assert_eq!(result[0], ReportEntry::new("C11", 110.0));
        assert_eq!(result[9], ReportEntry::new("C02", 20.0));
        assert!(!labels(&result).contains(&"Missing"));
    }

    #[test]
    fn test_bottom10_sorted_ascending() {
        let result = bottom10(&ranking_fixture(), &[], 2000);
        assert_eq!(result.len(), 10);
        assert_eq!(result[0], ReportEntry::new("C00", 0.0));
        assert_eq!(result[9], ReportEntry::new("C09", 90.0));
    }

    #[test]
    fn test_rankings_respect_continent_filter() {
        let result = top10(&ranking_fixture(), &["X".to_string()], 2000);
        assert_eq!(labels(&result), vec!["C10", "C08", "C06", "C04", "C02", "C00"]);
    }

    #[test]
    fn test_ranking_ties_keep_input_order() {
        let records = vec![rec("B", "X", 2000, 5.0), rec("A", "X", 2000, 5.0), rec("C", "X", 2000, 7.0)];
        assert_eq!(labels(&top10(&records, &[], 2000)), vec!["C", "B", "A"]);
        assert_eq!(labels(&bottom10(&records, &[], 2000)), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_top_and_bottom_are_reverse_permutations_for_small_sets() {
        let records = vec![rec("A", "X", 2000, 3.0), rec("B", "X", 2000, 1.0), rec("C", "X", 2000, 2.0)];
        let top = top10(&records, &[], 2000);
        let mut bottom = bottom10(&records, &[], 2000);
        bottom.reverse();
        assert_eq!(top, bottom);
    }

    #[test]
    fn test_gdp_growth_rate_basic() {
        let records = vec![rec("A", "X", 2000, 100.0), rec("A", "X", 2005, 150.0)];
        let result = gdp_growth_rate(&records, &[], 2000, 2005);
        assert_eq!(result, vec![ReportEntry::new("A", 50.0)]);
    }

    #[test]
    fn test_gdp_growth_rate_intersects_and_sorts() {
        let records = vec![
            rec("A", "X", 2000, 100.0),
            rec("A", "X", 2005, 110.0),
            rec("B", "X", 2000, 0.0),
            rec("B", "X", 2005, 40.0),
            rec("C", "Y", 2000, 10.0),
            rec("C", "Y", 2005, 30.0),
            rec("D", "X", 2005, 99.0),
            Record::new("E", "X", 2000, Some(10.0)),
            Record::new("E", "X", 2005, None),
        ];
        let result = gdp_growth_rate(&records, &[], 2000, 2005);
        assert_eq!(
            result,
            vec![
                ReportEntry::new("C", 200.0),
                ReportEntry::new("A", 10.0),
                ReportEntry::new("B", 0.0),
            ]
        );

        let only_x = gdp_growth_rate(&records, &["X".to_string()], 2000, 2005);
        assert_eq!(labels(&only_x), vec!["A", "B"]);
    }

    #[test]
    fn test_avg_gdp_by_continent_ignores_continent_filter_and_window() {
        let records = vec![
            rec("A", "Europe", 2000, 10.0),
            rec("B", "Europe", 2001, 20.0),
            rec("C", "Asia", 2000, 1.0),
            rec("D", "Asia", 1990, 1000.0),
            Record::new("E", "Asia", 2000, None),
        ];
        let result = avg_gdp_by_continent(&records, 2000, 2001);
        assert_eq!(
            result,
            vec![ReportEntry::new("Asia", 1.0), ReportEntry::new("Europe", 15.0)]
        );
    }

    #[test]
    fn test_global_gdp_trend_sums_per_year() {
        let records = vec![
            rec("A", "X", 2001, 1.001),
            rec("B", "Y", 2001, 2.0),
            rec("A", "X", 2000, 5.0),
            rec("A", "X", 2003, 7.0),
        ];
        let result = global_gdp_trend(&records, 2000, 2002);
        assert_eq!(
            result,
            vec![ReportEntry::new("2000", 5.0), ReportEntry::new("2001", 3.0)]
        );
    }

    #[test]
    fn test_fastest_growing_continent() {
        let records = vec![
            rec("A", "Asia", 2000, 100.0),
            rec("A", "Asia", 2010, 300.0),
            rec("B", "Europe", 2000, 100.0),
            rec("B", "Europe", 2010, 120.0),
            rec("C", "Africa", 1990, 5.0),
        ];
        let result = fastest_growing_continent(&records, 2000, 2010);
        assert_eq!(result, Some(ReportEntry::new("Asia", 200.0)));
    }

    #[test]
    fn test_fastest_growing_tie_goes_to_first_name() {
        let records = vec![
            rec("B", "Europe", 2000, 10.0),
            rec("B", "Europe", 2010, 20.0),
            rec("A", "Asia", 2000, 50.0),
            rec("A", "Asia", 2010, 100.0),
        ];
        let result = fastest_growing_continent(&records, 2000, 2010);
        assert_eq!(result, Some(ReportEntry::new("Asia", 100.0)));
    }

    #[test]
    fn test_fastest_growing_zero_start_and_empty() {
        let records = vec![rec("A", "Asia", 2010, 300.0)];
        assert_eq!(
            fastest_growing_continent(&records, 2000, 2010),
            Some(ReportEntry::new("Asia", 0.0))
        );
        assert_eq!(fastest_growing_continent(&[], 2000, 2010), None);
    }

    #[test]
    fn test_consistent_decline() {
        let records = vec![
            rec("Falling", "X", 2001, 30.0),
            rec("Falling", "X", 2002, 20.0),
            rec("Falling", "X", 2003, 10.0),
            rec("Flat", "X", 2001, 30.0),
            rec("Flat", "X", 2002, 30.0),
            rec("Flat", "X", 2003, 10.0),
            rec("Gap", "X", 2001, 30.0),
            Record::new("Gap", "X", 2002, None),
            rec("Gap", "X", 2003, 10.0),
            rec("Alpha", "Y", 2001, 3.0),
            rec("Alpha", "Y", 2002, 2.0),
            rec("Alpha", "Y", 2003, 1.0),
        ];
        assert_eq!(consistent_decline(&records, &[], 2003, 3), vec!["Alpha", "Falling"]);
        assert_eq!(consistent_decline(&records, &["X".to_string()], 2003, 3), vec!["Falling"]);
        // 2000 沒有資料
        assert!(consistent_decline(&records, &[], 2003, 4).is_empty());
    }

    #[test]
    fn test_consistent_decline_extreme_windows() {
        let records = vec![rec("Falling", "X", 2001, 30.0), rec("Falling", "X", 2002, 20.0)];
        assert!(consistent_decline(&records, &[], 2002, 4_000_000_000).is_empty());
        assert!(consistent_decline(&records, &[], i64::MIN, 5).is_empty());
        assert!(consistent_decline(&records, &[], i64::MAX, i64::MAX).is_empty());
        assert_eq!(consistent_decline(&records, &[], 2002, 2), vec!["Falling"]);
    }

    #[test]
    fn test_consistent_decline_single_year_is_empty() {
        let records = vec![rec("A", "X", 2000, 1.0)];
        assert!(consistent_decline(&records, &[], 2000, 1).is_empty());
    }

    #[test]
    fn test_continent_contribution() {
        let records = vec![
            rec("A", "X", 2000, 100.0),
            rec("B", "X", 2001, 200.0),
            rec("C", "Y", 2000, 700.0),
            rec("D", "Z", 1999, 1000.0),
        ];
        let result = continent_contribution(&records, 2000, 2001);
        assert_eq!(
            result,
            vec![ReportEntry::new("X", 30.0), ReportEntry::new("Y", 70.0)]
        );
    }

    #[test]
    fn test_continent_contribution_zero_total() {
        let records = vec![rec("A", "X", 2000, 0.0), rec("B", "Y", 2000, 0.0)];
        let result = continent_contribution(&records, 2000, 2000);
        assert_eq!(result, vec![ReportEntry::new("X", 0.0), ReportEntry::new("Y", 0.0)]);
    }
}
