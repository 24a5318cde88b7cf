use anyhow::Result;

use crate::{
    config::ChoroplethConfig,
    error::{LoadError, RenderError},
    join::{join, MetricTable},
    proj::{ProjectionParams, Projector},
    region::Region,
    render::{ChoroplethRenderer, RenderReport, Surface},
    scale::ColorScale,
    source::{GeometrySource, MetricSource},
    viewport::{Margins, ViewportSpec},
};

/// Load both feeds concurrently and join them once both have completed.
/// If either fails, the whole load fails; there is no geometry-only or metric-only result.
pub async fn load_regions<G, M>(geometry: &G, metrics: &M) -> Result<Vec<Region>, LoadError>
where
    G: GeometrySource,
    M: MetricSource,
{
    let (raw, records) = futures::try_join!(
        async { geometry.load().await.map_err(LoadError::geometry) },
        async { metrics.load().await.map_err(LoadError::metrics) },
    )?;

    Ok(join(raw, MetricTable::from_records(records)))
}

/// A choropleth bound to one surface: configuration, renderer and interaction state.
pub struct Choropleth {
    renderer: ChoroplethRenderer,
    margins: Margins,
    projection: ProjectionParams,
    color_scale: ColorScale,
}

impl Choropleth {
    pub fn new(surface: Surface, config: &ChoroplethConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            renderer: ChoroplethRenderer::new(surface, config.render_options()),
            margins: config.margins,
            projection: config.projection,
            color_scale: config.color_scale()?,
        })
    }

    #[inline]
    pub fn renderer(&self) -> &ChoroplethRenderer { &self.renderer }

    /// Pointer events and export go through the renderer.
    #[inline]
    pub fn renderer_mut(&mut self) -> &mut ChoroplethRenderer { &mut self.renderer }

    /// Viewport for the container's current size.
    pub fn viewport(&self) -> ViewportSpec {
        let (width, height) = self.renderer.surface().size();
        ViewportSpec::new(width, height, self.margins)
    }

    /// Clear the surface, load both feeds, then draw. On failure the surface stays empty.
    ///
    /// Holding `&mut self` across the load keeps a second reload of the same map from
    /// overlapping this one.
    pub async fn load_and_render<G, M>(&mut self, geometry: &G, metrics: &M) -> Result<RenderReport, RenderError>
    where
        G: GeometrySource,
        M: MetricSource,
    {
        self.renderer.clear();
        let regions = load_regions(geometry, metrics).await?;
        self.render(&regions)
    }

    /// Redraw already-joined regions, e.g. after a resize.
    pub fn render(&mut self, regions: &[Region]) -> Result<RenderReport, RenderError> {
        let viewport = self.viewport();
        let projector = Projector::new(&self.projection, &viewport)
            .map_err(|e| RenderError::Projection(e.into()))?;

        Ok(self.renderer.render(regions, &viewport, &projector, &self.color_scale))
    }
}
