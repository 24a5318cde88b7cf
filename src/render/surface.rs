use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

use crate::{region::RegionName, scale::Rgb, viewport::ViewportSpec};

/// Outline color (any CSS color) and width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self { color: color.into(), width }
    }
}

/// One drawn region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub region: RegionName,
    pub class: String,
    /// SVG path data in drawing coordinates.
    pub path: String,
    pub fill: Rgb,
    pub value: f64,
    pub opacity: f64,
    pub stroke: Stroke,
    /// Projected outline, used for hit testing.
    #[serde(skip)]
    pub(crate) screen: MultiPolygon<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLabel {
    pub class: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Everything drawn for one render call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub viewport: ViewportSpec,
    pub shapes: Vec<Shape>,
    pub title: TextLabel,
    pub footer: TextLabel,
}

impl Scene {
    pub fn shape(&self, region: &str) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.region == region)
    }
}

/// The drawable container handed to the renderer: a stable id, its current size, and
/// whatever was drawn into it last.
#[derive(Debug, Clone)]
pub struct Surface {
    id: String,
    width: f64,
    height: f64,
    scene: Option<Scene>,
}

impl Surface {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self { id: id.into(), width, height, scene: None }
    }

    #[inline]
    pub fn id(&self) -> &str { &self.id }

    #[inline]
    pub fn size(&self) -> (f64, f64) { (self.width, self.height) }

    /// Record a new container size; takes effect on the next render.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    #[inline]
    pub fn scene(&self) -> Option<&Scene> { self.scene.as_ref() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.scene.is_none() }

    /// Remove everything drawn so far.
    pub fn clear(&mut self) { self.scene = None }

    pub(crate) fn draw(&mut self, scene: Scene) { self.scene = Some(scene) }

    pub(crate) fn scene_mut(&mut self) -> Option<&mut Scene> { self.scene.as_mut() }
}
