use std::{borrow::Borrow, fmt, sync::Arc};

use geo::MultiPolygon;
use serde::Serialize;

/// Region identity: the name shared by the geometry feed and the metric feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RegionName(pub Arc<str>);

impl RegionName {
    pub fn new(name: impl AsRef<str>) -> Self { Self(Arc::from(name.as_ref())) }

    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl Borrow<str> for RegionName {
    fn borrow(&self) -> &str { &self.0 }
}

impl From<&str> for RegionName {
    fn from(name: &str) -> Self { Self::new(name) }
}

impl PartialEq<str> for RegionName {
    fn eq(&self, other: &str) -> bool { &*self.0 == other }
}

impl PartialEq<&str> for RegionName {
    fn eq(&self, other: &&str) -> bool { &*self.0 == *other }
}

/// One feature of the geometry feed, before the join.
/// `geometry` is `None` when the feature had no usable polygon.
#[derive(Debug, Clone)]
pub struct RawRegion {
    pub name: RegionName,
    pub geometry: Option<MultiPolygon<f64>>,
}

/// One valid row of the metric feed.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub name: RegionName,
    pub value: f64,
}

impl MetricRecord {
    pub fn new(name: impl AsRef<str>, value: f64) -> Self {
        Self { name: RegionName::new(name), value }
    }
}

/// A joined region: geometry plus the metric value matched by name.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: RegionName,
    pub geometry: Option<MultiPolygon<f64>>,
    /// `None` when the metric feed had no valid record for this name.
    pub metric: Option<f64>,
}

impl Region {
    /// Metric value used for classification and display; unmatched regions count as 0.
    #[inline]
    pub fn value(&self) -> f64 { self.metric.unwrap_or(0.0) }

    #[inline]
    pub fn is_matched(&self) -> bool { self.metric.is_some() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_region_defaults_to_zero() {
        let region = Region { name: "C".into(), geometry: None, metric: None };
        assert_eq!(region.value(), 0.0);
        assert!(!region.is_matched());
    }

    #[test]
    fn matched_region_reports_metric() {
        let region = Region { name: "A".into(), geometry: None, metric: Some(42.0) };
        assert_eq!(region.value(), 42.0);
        assert!(region.is_matched());
    }

    #[test]
    fn region_name_compares_with_str() {
        let name = RegionName::new("Hà Nội");
        assert_eq!(name, "Hà Nội");
        assert_eq!(name.to_string(), "Hà Nội");
        assert_eq!(name, RegionName::from("Hà Nội"));
    }
}
