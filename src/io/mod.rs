//! IO module for format-specific reading and writing operations.
//!
//! # Format Modules
//!
//! - `geojson` - GeoJSON FeatureCollections of region boundaries
//! - `csv` - Delimited text (TSV/CSV) of region metrics
//! - `svg` - SVG export of a rendered choropleth

pub(crate) mod csv;
pub(crate) mod geojson;
pub(crate) mod svg;
