//! Geometry and metric sources: the two asynchronous inputs of a choropleth.

mod feed;
mod geometry;
mod metric;

use std::future::Future;

use anyhow::Result;

use crate::region::{MetricRecord, RawRegion};

pub use feed::*;
pub use geometry::*;
pub use metric::*;

/// Supplies named region boundaries. One attempt per call, no retry.
pub trait GeometrySource {
    fn load(&self) -> impl Future<Output = Result<Vec<RawRegion>>>;
}

/// Supplies `(name, value)` records; rows without a numeric value are left out.
/// One attempt per call, no retry.
pub trait MetricSource {
    fn load(&self) -> impl Future<Output = Result<Vec<MetricRecord>>>;
}
