//! Fixed spherical Mercator projection from lon/lat degrees to screen pixels.

use anyhow::{anyhow, ensure, Context, Result};
use geo::{Coord, MapCoords, MultiPolygon};
use proj4rs::{proj::Proj as Proj4, transform::transform};
use serde::{Deserialize, Serialize};

use crate::viewport::ViewportSpec;

/// Geographic lon/lat on a unit sphere.
const SOURCE_PROJ4: &str = "+proj=longlat +a=1 +b=1 +no_defs +type=crs";

/// Mercator on the same unit sphere, so projected units are radians.
const TARGET_PROJ4: &str = "+proj=merc +a=1 +b=1 +lon_0=0 +no_defs +type=crs";

/// Where the map is centered and how far it is zoomed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionParams {
    /// `[lon, lat]` in degrees; maps to the viewport anchor.
    pub center: [f64; 2],
    /// Pixels per radian.
    pub scale: f64,
}

impl Default for ProjectionParams {
    fn default() -> Self { Self { center: [108.0, 21.0], scale: 3500.0 } }
}

/// Pure lon/lat → screen transform, fixed at construction.
pub struct Projector {
    from: Proj4,
    to: Proj4,
    scale: f64,
    origin: (f64, f64),
    translate: (f64, f64),
}

impl Projector {
    /// Anchor the center at the viewport's map anchor (see [`ViewportSpec::map_anchor`]).
    pub fn new(params: &ProjectionParams, viewport: &ViewportSpec) -> Result<Self> {
        Self::with_translate(params, viewport.map_anchor())
    }

    pub fn with_translate(params: &ProjectionParams, translate: (f64, f64)) -> Result<Self> {
        ensure!(params.scale.is_finite() && params.scale > 0.0,
            "[proj] scale must be a positive number, got {}", params.scale);
        ensure!(translate.0.is_finite() && translate.1.is_finite(),
            "[proj] translate must be finite, got {:?}", translate);

        let from = Proj4::from_proj_string(SOURCE_PROJ4)
            .with_context(|| format!("[proj] failed to build source PROJ.4: {SOURCE_PROJ4}"))?;
        let to = Proj4::from_proj_string(TARGET_PROJ4)
            .with_context(|| format!("[proj] failed to build target PROJ.4: {TARGET_PROJ4}"))?;

        let mut projector = Self { from, to, scale: params.scale, origin: (0.0, 0.0), translate };
        let [lon, lat] = params.center;
        projector.origin = projector.mercator(lon, lat)
            .with_context(|| format!("[proj] center {:?} cannot be projected", params.center))?;

        Ok(projector)
    }

    #[inline]
    pub fn scale(&self) -> f64 { self.scale }

    #[inline]
    pub fn translate(&self) -> (f64, f64) { self.translate }

    /// Project a lon/lat coordinate (degrees) to screen space (y down).
    pub fn project(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
        let (mx, my) = self.mercator(coord.x, coord.y)?;
        Ok(Coord {
            x: self.translate.0 + self.scale * (mx - self.origin.0),
            y: self.translate.1 - self.scale * (my - self.origin.1),
        })
    }

    /// Project every vertex of a shape; fails if any vertex cannot be projected.
    pub fn project_shape(&self, shape: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
        shape.try_map_coords(|coord| self.project(coord))
    }

    /// Unit-sphere Mercator of a lon/lat pair in degrees.
    fn mercator(&self, lon: f64, lat: f64) -> Result<(f64, f64)> {
        ensure!(lon.is_finite() && lat.is_finite(), "[proj] non-finite coordinate ({lon}, {lat})");
        ensure!(lat.abs() < 90.0, "[proj] latitude {lat} is outside the Mercator domain");

        let mut point = (lon.to_radians(), lat.to_radians(), 0.0);
        transform(&self.from, &self.to, &mut point)
            .map_err(|e| anyhow!("[proj] cannot project ({lon}, {lat}): {e:?}"))?;

        ensure!(point.0.is_finite() && point.1.is_finite(), "[proj] ({lon}, {lat}) projects to infinity");
        Ok((point.0, point.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::Margins;

    fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-6 }

    fn projector() -> Projector {
        Projector::with_translate(&ProjectionParams::default(), (400.0, 100.0)).unwrap()
    }

    #[test]
    fn center_maps_to_translate() {
        let p = projector().project(Coord { x: 108.0, y: 21.0 }).unwrap();
        assert!(close(p.x, 400.0) && close(p.y, 100.0), "{p:?}");
    }

    #[test]
    fn center_maps_to_viewport_midpoint() {
        let viewport = ViewportSpec::new(960.0, 600.0, Margins::default());
        let projector = Projector::new(&ProjectionParams::default(), &viewport).unwrap();
        let p = projector.project(Coord { x: 108.0, y: 21.0 }).unwrap();
        assert!(close(p.x, viewport.inner_width() / 2.0));
    }

    #[test]
    fn longitude_is_linear_at_scale() {
        let p = projector().project(Coord { x: 109.0, y: 21.0 }).unwrap();
        assert!(close(p.x - 400.0, 3500.0 * 1f64.to_radians()), "{p:?}");
        assert!(close(p.y, 100.0));
    }

    #[test]
    fn north_is_up() {
        let projector = projector();
        let north = projector.project(Coord { x: 108.0, y: 22.0 }).unwrap();
        let south = projector.project(Coord { x: 108.0, y: 20.0 }).unwrap();
        assert!(north.y < 100.0 && south.y > 100.0);
    }

    #[test]
    fn scale_is_uniform_near_center() {
        // Mercator is conformal: a tiny step east and north cover the same screen distance.
        let projector = projector();
        let eps = 1e-4;
        let lat: f64 = 21.0;
        let east = projector.project(Coord { x: 108.0 + eps / lat.to_radians().cos(), y: lat }).unwrap();
        let north = projector.project(Coord { x: 108.0, y: lat + eps }).unwrap();
        let dx = east.x - 400.0;
        let dy = 100.0 - north.y;
        assert!((dx / dy - 1.0).abs() < 1e-3, "dx={dx} dy={dy}");
    }

    #[test]
    fn poles_cannot_be_projected() {
        assert!(projector().project(Coord { x: 0.0, y: 90.0 }).is_err());
        assert!(projector().project(Coord { x: f64::NAN, y: 0.0 }).is_err());
    }

    #[test]
    fn rejects_bad_parameters() {
        let params = ProjectionParams { scale: 0.0, ..Default::default() };
        assert!(Projector::with_translate(&params, (0.0, 0.0)).is_err());
        let params = ProjectionParams { center: [0.0, 90.0], ..Default::default() };
        assert!(Projector::with_translate(&params, (0.0, 0.0)).is_err());
    }
}
