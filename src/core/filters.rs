use crate::domain::Record;
use std::collections::{BTreeMap, HashMap};

/// A record passes when no continents are selected or its continent is one of them.
pub fn passes_continent(continents: &[String], record: &Record) -> bool {
    continents.is_empty() || continents.iter().any(|name| *name == record.continent)
}

/// Inclusive `[year_start, year_end]` window; records without a gdp never pass.
pub fn in_window(record: &Record, year_start: i64, year_end: i64) -> bool {
    record.gdp.is_some() && year_start <= record.year && record.year <= year_end
}

/// Country -> gdp for one year, continent-filtered.
///
/// Countries keep the position of their first appearance; a later duplicate
/// for the same year overwrites the value.
pub fn gdp_by_country<'a, I>(records: I, continents: &[String], year: i64) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut ordered: Vec<(String, f64)> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for record in records {
        if record.year != year || !passes_continent(continents, record) {
            continue;
        }
        let Some(gdp) = record.gdp else { continue };

        match positions.get(record.country.as_str()) {
            Some(&position) => ordered[position].1 = gdp,
            None => {
                positions.insert(record.country.as_str(), ordered.len());
                ordered.push((record.country.clone(), gdp));
            }
        }
    }

    ordered
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupTotal {
    pub sum: f64,
    pub count: usize,
}

impl GroupTotal {
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Sums gdp per key, sorted by key. Records without gdp are skipped.
pub fn group_totals<'a, I, K, F>(records: I, key: F) -> BTreeMap<K, GroupTotal>
where
    I: IntoIterator<Item = &'a Record>,
    K: Ord,
    F: Fn(&'a Record) -> K,
{
    let mut groups: BTreeMap<K, GroupTotal> = BTreeMap::new();
    for record in records {
        let Some(gdp) = record.gdp else { continue };
        let total = groups.entry(key(record)).or_default();
        total.sum += gdp;
        total.count += 1;
    }
    groups
}

/// Two-decimal rounding; exact halves go to the even neighbour (`0.125` -> `0.12`).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Percentage change from `start` to `end`; a zero start yields `0.0`.
pub fn growth_rate(start: f64, end: f64) -> f64 {
    if start == 0.0 {
        0.0
    } else {
        round2((end - start) / start * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_ties_go_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(12.344), 12.34);
        assert_eq!(round2(12.346), 12.35);
    }

    #[test]
    fn test_passes_continent() {
        let record = Record::new("Chad", "Africa", 2000, Some(1.0));
        assert!(passes_continent(&[], &record));
        assert!(passes_continent(&["Asia".to_string(), "Africa".to_string()], &record));
        assert!(!passes_continent(&["Asia".to_string()], &record));
    }

    #[test]
    fn test_in_window_is_inclusive_and_needs_gdp() {
        assert!(in_window(&Record::new("A", "X", 2000, Some(1.0)), 2000, 2005));
        assert!(in_window(&Record::new("A", "X", 2005, Some(1.0)), 2000, 2005));
        assert!(!in_window(&Record::new("A", "X", 2006, Some(1.0)), 2000, 2005));
        assert!(!in_window(&Record::new("A", "X", 2001, None), 2000, 2005));
    }

    #[test]
    fn test_gdp_by_country_last_write_wins_first_position_kept() {
        let records = vec![
            Record::new("A", "X", 2000, Some(1.0)),
            Record::new("B", "X", 2000, Some(2.0)),
            Record::new("A", "X", 2000, Some(3.0)),
            Record::new("C", "X", 2000, None),
            Record::new("D", "X", 2001, Some(9.0)),
        ];
        let map = gdp_by_country(&records, &[], 2000);
        assert_eq!(map, vec![("A".to_string(), 3.0), ("B".to_string(), 2.0)]);
    }

    #[test]
    fn test_group_totals() {
        let records = vec![
            Record::new("A", "X", 2000, Some(1.0)),
            Record::new("B", "Y", 2000, Some(2.0)),
            Record::new("C", "X", 2000, Some(3.0)),
            Record::new("D", "X", 2000, None),
        ];
        let groups = group_totals(&records, |r| r.continent.as_str());
        assert_eq!(groups["X"], GroupTotal { sum: 4.0, count: 2 });
        assert_eq!(groups["Y"].mean(), 2.0);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["X", "Y"]);
    }

    #[test]
    fn test_growth_rate_zero_start() {
        assert_eq!(growth_rate(0.0, 100.0), 0.0);
        assert_eq!(growth_rate(100.0, 150.0), 50.0);
        assert_eq!(growth_rate(3.0, 4.0), 33.33);
    }
}
