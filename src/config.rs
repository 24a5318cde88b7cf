use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    proj::ProjectionParams,
    render::{InteractionOptions, RenderOptions, RenderStyle},
    scale::{ColorScale, Rgb, DEFAULT_THRESHOLDS, GREENS_7},
    source::{DelimitedMetricSource, Feed, GeoJsonSource, DEFAULT_NAME_PROPERTY},
    viewport::Margins,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScaleConfig {
    pub thresholds: Vec<f64>,
    /// Hex colors, light → dark; one more than `thresholds`.
    pub colors: Vec<Rgb>,
}

impl Default for ColorScaleConfig {
    fn default() -> Self {
        Self { thresholds: DEFAULT_THRESHOLDS.to_vec(), colors: GREENS_7.to_vec() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Feature property holding the region name.
    pub name_property: String,
}

impl Default for GeometryConfig {
    fn default() -> Self { Self { name_property: DEFAULT_NAME_PROPERTY.to_string() } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub delimiter: char,
    /// Header of the region-name column; first column when unset.
    pub name_column: Option<String>,
    /// Header of the value column; second column when unset.
    pub value_column: Option<String>,
}

impl Default for MetricsConfig {
    fn default() -> Self { Self { delimiter: '\t', name_column: None, value_column: None } }
}

/// Everything a host can configure about one map, read from JSON.
/// Missing fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChoroplethConfig {
    pub title: String,
    pub footer: String,
    pub margins: Margins,
    pub projection: ProjectionParams,
    pub color_scale: ColorScaleConfig,
    pub geometry: GeometryConfig,
    pub metrics: MetricsConfig,
    pub style: RenderStyle,
    pub interaction: InteractionOptions,
}

impl ChoroplethConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .context("[config] Failed to parse choropleth config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("[config] Invalid config in {}", path.display()))
    }

    /// Check the parts that serde cannot.
    pub fn validate(&self) -> Result<()> {
        self.color_scale()?;
        self.metrics_delimiter()?;
        ensure!(self.projection.scale.is_finite() && self.projection.scale > 0.0,
            "[config] projection.scale must be positive, got {}", self.projection.scale);
        ensure!((0.0..=1.0).contains(&self.style.dim_opacity),
            "[config] style.dim_opacity must be within [0, 1], got {}", self.style.dim_opacity);
        Ok(())
    }

    pub fn color_scale(&self) -> Result<ColorScale> {
        ColorScale::new(self.color_scale.thresholds.clone(), self.color_scale.colors.clone())
            .context("[config] invalid color_scale")
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            title: self.title.clone(),
            footer: self.footer.clone(),
            style: self.style.clone(),
            interaction: self.interaction,
        }
    }

    pub fn geometry_source(&self, feed: Feed) -> GeoJsonSource {
        GeoJsonSource::new(feed).with_name_property(self.geometry.name_property.clone())
    }

    pub fn metric_source(&self, feed: Feed) -> Result<DelimitedMetricSource> {
        Ok(DelimitedMetricSource::new(feed)
            .with_delimiter(self.metrics_delimiter()?)
            .with_columns(self.metrics.name_column.clone(), self.metrics.value_column.clone()))
    }

    fn metrics_delimiter(&self) -> Result<u8> {
        let delimiter = self.metrics.delimiter;
        ensure!(delimiter.is_ascii() && delimiter != '\n' && delimiter != '\r' && delimiter != '"',
            "[config] metrics.delimiter must be a single ASCII separator, got {delimiter:?}");
        Ok(delimiter as u8)
    }
}
