use serde::{Deserialize, Serialize};

/// Space reserved around the map inside the container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self { Self { top: 10.0, right: 60.0, bottom: 40.0, left: 60.0 } }
}

/// Container size and margins, captured once when a render starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportSpec {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl ViewportSpec {
    pub fn new(width: f64, height: f64, margins: Margins) -> Self {
        Self { width, height, margins }
    }

    /// Drawable width inside the margins (never negative).
    #[inline]
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margins.left - self.margins.right).max(0.0)
    }

    /// Drawable height inside the margins (never negative).
    #[inline]
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margins.top - self.margins.bottom).max(0.0)
    }

    /// Projection translate: horizontally centered, a quarter down to leave room for the title.
    #[inline]
    pub fn map_anchor(&self) -> (f64, f64) {
        (self.inner_width() / 2.0, self.inner_height() / 4.0)
    }

    /// Convert a container-relative point to the margin-translated drawing space.
    #[inline]
    pub fn to_inner(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.margins.left, y - self.margins.top)
    }
}
