use std::path::Path;

use anyhow::{anyhow, Result};
use geo::{BoundingRect, Contains, MultiPolygon, Point};
use rstar::{primitives::{GeomWithData, Rectangle}, RTree};
use serde::{Deserialize, Serialize};

use crate::{
    io::svg::{multipolygon_to_path, write_choropleth, SvgStringWriter, SvgWriter},
    proj::Projector,
    region::{Region, RegionName},
    scale::ColorScale,
    viewport::ViewportSpec,
};

use super::{
    interaction::{Hover, InteractionOptions, InteractionState, PointerEvent, Repaint},
    surface::{Scene, Shape, Stroke, Surface, TextLabel},
};

/// Bounding box of a drawn shape, tagged with its index in `Scene::shapes`.
type ShapeBox = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Static styling applied to shapes; the opacity/outline are the only styles that
/// change with interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// CSS class of every region shape.
    pub region_class: String,
    pub default_stroke: Stroke,
    pub highlight_stroke: Stroke,
    /// Opacity of the regions that are not hovered while one is.
    pub dim_opacity: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            region_class: "region".into(),
            default_stroke: Stroke::new("grey", 0.1),
            highlight_stroke: Stroke::new("navy", 1.0),
            dim_opacity: 0.5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    pub title: String,
    pub footer: String,
    pub style: RenderStyle,
    pub interaction: InteractionOptions,
}

/// A region left out of the drawing, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRegion {
    pub region: RegionName,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderReport {
    pub drawn: usize,
    pub skipped: Vec<SkippedRegion>,
}

/// Draws joined regions into a [`Surface`] and owns their interaction state.
///
/// Every render clears the surface and the interaction state, then redraws from
/// scratch. Pointer events go through [`ChoroplethRenderer::handle`].
pub struct ChoroplethRenderer {
    surface: Surface,
    options: RenderOptions,
    state: InteractionState,
    index: RTree<ShapeBox>,
}

impl ChoroplethRenderer {
    pub fn new(surface: Surface, options: RenderOptions) -> Self {
        Self { surface, options, state: InteractionState::default(), index: RTree::new() }
    }

    #[inline]
    pub fn surface(&self) -> &Surface { &self.surface }

    #[inline]
    pub fn options(&self) -> &RenderOptions { &self.options }

    #[inline]
    pub fn state(&self) -> &InteractionState { &self.state }

    #[inline]
    pub fn scene(&self) -> Option<&Scene> { self.surface.scene() }

    /// Record a new container size; the drawing is unchanged until the next render.
    pub fn resize(&mut self, width: f64, height: f64) { self.surface.resize(width, height) }

    /// Remove the drawing and reset interaction.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.state = InteractionState::default();
        self.index = RTree::new();
    }

    /// Clear the surface and draw one shape per region.
    ///
    /// Regions without geometry, or with vertices the projector rejects, are skipped
    /// and reported; the rest are still drawn.
    pub fn render(&mut self, regions: &[Region], viewport: &ViewportSpec, projector: &Projector, color_scale: &ColorScale) -> RenderReport {
        self.clear();

        let mut report = RenderReport::default();
        let mut shapes = Vec::with_capacity(regions.len());
        let mut boxes = Vec::with_capacity(regions.len());

        for region in regions {
            let screen = match project_region(region, projector) {
                Ok(screen) => screen,
                Err(e) => {
                    log::warn!("[render] skipping region {}: {e:#}", region.name);
                    report.skipped.push(SkippedRegion { region: region.name.clone(), reason: format!("{e:#}") });
                    continue;
                }
            };

            // project_region guarantees a non-empty shape
            if let Some(rect) = screen.bounding_rect() {
                boxes.push(GeomWithData::new(
                    Rectangle::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
                    shapes.len(),
                ));
            }

            shapes.push(Shape {
                region: region.name.clone(),
                class: self.options.style.region_class.clone(),
                path: multipolygon_to_path(&screen),
                fill: color_scale.classify(region.value()),
                value: region.value(),
                opacity: 1.0,
                stroke: self.options.style.default_stroke.clone(),
                screen,
            });
        }

        let center_x = viewport.inner_width() / 2.0;
        let scene = Scene {
            viewport: *viewport,
            shapes,
            title: TextLabel {
                class: "title".into(),
                text: self.options.title.clone(),
                x: center_x,
                y: viewport.margins.top * 4.0,
            },
            footer: TextLabel {
                class: "footer".into(),
                text: self.options.footer.clone(),
                x: center_x,
                y: viewport.inner_height() + 5.0,
            },
        };

        report.drawn = scene.shapes.len();
        log::info!("[render] #{}: drew {} regions, skipped {}", self.surface.id(), report.drawn, report.skipped.len());

        self.index = RTree::bulk_load(boxes);
        self.surface.draw(scene);
        report
    }

    /// Run one pointer event through the state machine and restyle shapes if the
    /// highlight changed. Events before the first render are ignored.
    pub fn handle(&mut self, event: PointerEvent) -> Repaint {
        let Some(scene) = self.surface.scene() else { return Repaint::None };

        let repaint = self.state.transition(
            &event,
            |region| scene.shape(region.as_str()).map(|shape| shape.value),
            &self.options.interaction,
        );
        log::debug!("[render] {event:?} -> {:?} ({repaint:?})", self.state.hover());

        if repaint == Repaint::Highlight { self.restyle() }
        repaint
    }

    pub fn pointer_enter(&mut self, region: &str, x: f64, y: f64) -> Repaint {
        self.handle(PointerEvent::Enter { region: RegionName::new(region), x, y })
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Repaint {
        self.handle(PointerEvent::Move { x, y })
    }

    pub fn pointer_leave(&mut self) -> Repaint {
        self.handle(PointerEvent::Leave)
    }

    /// Drive the state machine from a raw pointer position: entering a different
    /// region's shape is an enter, anything else is a move.
    pub fn pointer_at(&mut self, x: f64, y: f64) -> Repaint {
        let event = match self.hit_test(x, y) {
            Some(region) if self.state.hovered() != Some(region) => {
                PointerEvent::Enter { region: region.clone(), x, y }
            }
            _ => PointerEvent::Move { x, y },
        };
        self.handle(event)
    }

    /// Topmost region whose outline contains the container-relative point.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&RegionName> {
        let scene = self.surface.scene()?;
        let (x, y) = scene.viewport.to_inner(x, y);
        let point = Point::new(x, y);

        self.index.locate_all_at_point(&[x, y])
            .map(|entry| entry.data)
            .filter(|&idx| scene.shapes[idx].screen.contains(&point))
            .max()
            .map(|idx| &scene.shapes[idx].region)
    }

    /// Serialize the current drawing and tooltip as an SVG document.
    pub fn to_svg_string(&self) -> Result<String> {
        let mut writer = SvgStringWriter::new();
        write_choropleth(&mut writer, &self.surface, self.state.tooltip())?;
        writer.into_string()
    }

    pub fn write_svg(&self, path: &Path) -> Result<()> {
        let mut writer = SvgWriter::new(path)?;
        write_choropleth(&mut writer, &self.surface, self.state.tooltip())?;
        writer.finish()
    }

    /// Scene plus interaction state as JSON, for hosts that draw themselves.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::json!({
            "id": self.surface.id(),
            "scene": serde_json::to_value(self.surface.scene())?,
            "state": serde_json::to_value(&self.state)?,
        }))
    }

    /// Recompute opacity and outline of every shape from the hover state.
    fn restyle(&mut self) {
        let Some(scene) = self.surface.scene_mut() else { return };
        let style = &self.options.style;

        for shape in &mut scene.shapes {
            let (opacity, stroke) = match self.state.hover() {
                Hover::Hovering(region) if *region == shape.region => (1.0, &style.highlight_stroke),
                Hover::Hovering(_) => (style.dim_opacity, &style.default_stroke),
                Hover::Idle => (1.0, &style.default_stroke),
            };
            shape.opacity = opacity;
            shape.stroke = stroke.clone();
        }
    }
}

/// Project a region's geometry, failing when it has none or any vertex is rejected.
fn project_region(region: &Region, projector: &Projector) -> Result<MultiPolygon<f64>> {
    let geometry = region.geometry.as_ref()
        .ok_or_else(|| anyhow!("no geometry"))?;
    if geometry.0.is_empty() { return Err(anyhow!("empty geometry")) }
    projector.project_shape(geometry)
}
