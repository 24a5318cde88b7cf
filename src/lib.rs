#![doc = "Choropleth maps: join region geometry with region metrics, project, classify and render with hover interaction"]
mod choropleth;
mod config;
mod error;
mod io;
mod join;
mod proj;
mod region;
mod render;
mod scale;
mod source;
mod viewport;

#[doc(inline)]
pub use choropleth::{load_regions, Choropleth};

#[doc(inline)]
pub use config::{ChoroplethConfig, ColorScaleConfig, GeometryConfig, MetricsConfig};

#[doc(inline)]
pub use error::{BoxError, LoadError, RenderError};

#[doc(inline)]
pub use join::{join, MetricTable};

#[doc(inline)]
pub use proj::{ProjectionParams, Projector};

#[doc(inline)]
pub use region::{MetricRecord, RawRegion, Region, RegionName};

#[doc(inline)]
pub use render::{
    ChoroplethRenderer, Hover, InteractionOptions, InteractionState, PointerEvent, RenderOptions,
    RenderReport, RenderStyle, Repaint, Scene, Shape, SkippedRegion, Stroke, Surface, TextLabel, Tooltip,
    tooltip_content,
};

#[doc(inline)]
pub use scale::{ColorScale, Rgb, DEFAULT_THRESHOLDS, GREENS_7};

#[doc(inline)]
pub use source::{DelimitedMetricSource, Feed, GeoJsonSource, GeometrySource, MetricSource, DEFAULT_NAME_PROPERTY};

#[doc(inline)]
pub use viewport::{Margins, ViewportSpec};
