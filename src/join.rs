use std::collections::{HashMap, HashSet};

use crate::region::{MetricRecord, RawRegion, Region, RegionName};

/// Region name → metric value, consumed by [`join`].
#[derive(Debug, Clone, Default)]
pub struct MetricTable {
    values: HashMap<RegionName, f64>,
}

impl MetricTable {
    /// Build the table in feed order; a repeated name keeps the last value seen.
    pub fn from_records(records: impl IntoIterator<Item = MetricRecord>) -> Self {
        let mut values = HashMap::new();
        for record in records {
            values.insert(record.name, record.value);
        }
        Self { values }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<f64> { self.values.get(name).copied() }

    #[inline]
    pub fn len(&self) -> usize { self.values.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

impl FromIterator<MetricRecord> for MetricTable {
    fn from_iter<I: IntoIterator<Item = MetricRecord>>(iter: I) -> Self { Self::from_records(iter) }
}

/// Left outer join of geometries onto metrics by region name, driven by the geometry side.
/// Output order follows `geometries`; metric names with no geometry are dropped.
pub fn join(geometries: Vec<RawRegion>, table: MetricTable) -> Vec<Region> {
    let mut used: HashSet<&str> = HashSet::with_capacity(table.len());

    let regions = geometries.into_iter()
        .map(|raw| {
            let metric = table.values.get_key_value(raw.name.as_str())
                .map(|(name, &value)| {
                    used.insert(name.as_str());
                    value
                });
            Region { name: raw.name, geometry: raw.geometry, metric }
        })
        .collect::<Vec<_>>();

    let matched = regions.iter().filter(|r| r.is_matched()).count();
    let unmatched = table.values.keys()
        .filter(|name| !used.contains(name.as_str()))
        .collect::<Vec<_>>();

    log::info!("[join] {} regions: {} matched, {} defaulted to 0, {} metric rows without geometry",
        regions.len(), matched, regions.len() - matched, unmatched.len());
    if !unmatched.is_empty() {
        log::debug!("[join] metric names without geometry: {:?}", unmatched);
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str) -> RawRegion {
        RawRegion { name: name.into(), geometry: None }
    }

    #[test]
    fn missing_and_excluded_metrics_default_to_zero() {
        // B's value was excluded by the metric source, so it never reaches the table.
        let table = MetricTable::from_records([MetricRecord::new("A", 42.0)]);
        let regions = join(vec![raw("A"), raw("B"), raw("C")], table);

        assert_eq!(regions.len(), 3);
        assert_eq!(regions[0].metric, Some(42.0));
        assert_eq!(regions[1].metric, None);
        assert_eq!(regions[1].value(), 0.0);
        assert_eq!(regions[2].value(), 0.0);
    }

    #[test]
    fn duplicate_metric_names_keep_last_value() {
        let table = MetricTable::from_records([
            MetricRecord::new("A", 1.0),
            MetricRecord::new("A", 7.5),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("A"), Some(7.5));

        let regions = join(vec![raw("A")], table);
        assert_eq!(regions[0].value(), 7.5);
    }

    #[test]
    fn metric_rows_without_geometry_are_dropped() {
        let table: MetricTable = [MetricRecord::new("A", 1.0), MetricRecord::new("Z", 99.0)].into_iter().collect();
        let regions = join(vec![raw("A")], table);
        assert_eq!(regions.len(), 1);
        assert!(regions.iter().all(|r| r.name != "Z"));
    }

    #[test]
    fn output_follows_geometry_order() {
        let table = MetricTable::from_records([MetricRecord::new("C", 3.0), MetricRecord::new("A", 1.0)]);
        let names = join(vec![raw("C"), raw("B"), raw("A")], table)
            .into_iter()
            .map(|r| r.name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["C", "B", "A"]);
    }

    #[test]
    fn repeated_geometry_names_share_the_metric() {
        let table = MetricTable::from_records([MetricRecord::new("A", 5.0)]);
        let regions = join(vec![raw("A"), raw("A")], table);
        assert!(regions.iter().all(|r| r.metric == Some(5.0)));
    }

    #[test]
    fn join_matches_names_exactly() {
        let table = MetricTable::from_records([MetricRecord::new("a", 5.0)]);
        let regions = join(vec![raw("A")], table);
        assert_eq!(regions[0].metric, None);
    }
}
