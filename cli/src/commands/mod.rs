pub mod join;
pub mod render;

use anyhow::Result;
use choropleth::{ChoroplethConfig, DelimitedMetricSource, Feed, GeoJsonSource};

use crate::cli::Inputs;

/// Config file (or defaults) plus the two sources it configures.
pub(crate) fn open_inputs(inputs: &Inputs) -> Result<(ChoroplethConfig, GeoJsonSource, DelimitedMetricSource)> {
    let config = match &inputs.config {
        Some(path) => ChoroplethConfig::from_path(path)?,
        None => ChoroplethConfig::default(),
    };

    let geometry = config.geometry_source(Feed::parse(&inputs.geometry));
    let metrics = config.metric_source(Feed::parse(&inputs.metrics))?;
    Ok((config, geometry, metrics))
}
