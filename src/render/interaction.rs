//! Hover/tooltip state machine.
//!
//! Two states, `Idle` and `Hovering(region)`, driven by three pointer events. The
//! transition function only touches [`InteractionState`]; the renderer derives shape
//! styles from the resulting state.

use serde::{Deserialize, Serialize};

use crate::region::RegionName;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "region")]
pub enum Hover {
    #[default]
    Idle,
    Hovering(RegionName),
}

/// Tooltip overlay contents, in container coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Tooltip {
    pub visible: bool,
    pub content: String,
    pub x: f64,
    pub y: f64,
}

/// Pointer input, with positions relative to the container.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered the shape of `region`.
    Enter { region: RegionName, x: f64, y: f64 },
    /// Pointer moved without entering another shape.
    Move { x: f64, y: f64 },
    /// Pointer left the whole map container.
    Leave,
}

/// What a handled event changed, so hosts only redraw what they must.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Repaint {
    None,
    /// Only the tooltip moved or changed.
    Tooltip,
    /// The highlighted region changed; every shape style must be refreshed.
    Highlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionOptions {
    /// Tooltip offset `[dx, dy]` from the pointer.
    pub tooltip_offset: [f64; 2],
    /// Hide the tooltip when the pointer leaves the container. Off by default: the
    /// tooltip keeps its last content until the next enter rewrites it.
    pub hide_tooltip_on_leave: bool,
}

impl Default for InteractionOptions {
    fn default() -> Self { Self { tooltip_offset: [10.0, 10.0], hide_tooltip_on_leave: false } }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InteractionState {
    hover: Hover,
    tooltip: Tooltip,
}

impl InteractionState {
    #[inline]
    pub fn hover(&self) -> &Hover { &self.hover }

    #[inline]
    pub fn tooltip(&self) -> &Tooltip { &self.tooltip }

    #[inline]
    pub fn hovered(&self) -> Option<&RegionName> {
        match &self.hover {
            Hover::Idle => None,
            Hover::Hovering(region) => Some(region),
        }
    }

    /// Apply one event. `value_of` resolves a region's displayed value; an enter on a
    /// region it does not know is ignored.
    pub fn transition(
        &mut self,
        event: &PointerEvent,
        value_of: impl Fn(&RegionName) -> Option<f64>,
        options: &InteractionOptions,
    ) -> Repaint {
        let [dx, dy] = options.tooltip_offset;

        match event {
            PointerEvent::Enter { region, x, y } => {
                let Some(value) = value_of(region) else {
                    log::debug!("[interaction] ignoring enter on unknown region {region}");
                    return Repaint::None;
                };

                let same = self.hovered() == Some(region);
                self.hover = Hover::Hovering(region.clone());
                self.tooltip = Tooltip { visible: true, content: tooltip_content(region, value), x: x + dx, y: y + dy };

                if same { Repaint::Tooltip } else { Repaint::Highlight }
            }
            PointerEvent::Move { x, y } => {
                if self.hovered().is_none() { return Repaint::None }

                let (x, y) = (x + dx, y + dy);
                if (self.tooltip.x, self.tooltip.y) == (x, y) { return Repaint::None }
                self.tooltip.x = x;
                self.tooltip.y = y;
                Repaint::Tooltip
            }
            PointerEvent::Leave => {
                let hide = options.hide_tooltip_on_leave && self.tooltip.visible;
                if hide { self.tooltip.visible = false }

                match std::mem::take(&mut self.hover) {
                    Hover::Hovering(_) => Repaint::Highlight,
                    Hover::Idle if hide => Repaint::Tooltip,
                    Hover::Idle => Repaint::None,
                }
            }
        }
    }
}

/// `"<name>: <value>"`
pub fn tooltip_content(region: &RegionName, value: f64) -> String {
    format!("{region}: {value}")
}
