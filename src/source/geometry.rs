use anyhow::{Context, Result};

use crate::{io::geojson::read_regions_from_geojson_bytes, region::RawRegion};

use super::{Feed, GeometrySource};

pub const DEFAULT_NAME_PROPERTY: &str = "name";

/// Region boundaries from a GeoJSON FeatureCollection.
#[derive(Debug, Clone)]
pub struct GeoJsonSource {
    feed: Feed,
    name_property: String,
}

impl GeoJsonSource {
    pub fn new(feed: Feed) -> Self {
        Self { feed, name_property: DEFAULT_NAME_PROPERTY.to_string() }
    }

    /// Feature property holding the region name.
    pub fn with_name_property(mut self, name_property: impl Into<String>) -> Self {
        self.name_property = name_property.into();
        self
    }

    #[inline]
    pub fn feed(&self) -> &Feed { &self.feed }
}

impl GeometrySource for GeoJsonSource {
    async fn load(&self) -> Result<Vec<RawRegion>> {
        let bytes = self.feed.read().await?;
        let regions = read_regions_from_geojson_bytes(&bytes, &self.name_property)
            .with_context(|| format!("[source::geometry] Failed to load {}", self.feed))?;

        log::info!("[source::geometry] {} regions from {}", regions.len(), self.feed);
        Ok(regions)
    }
}
