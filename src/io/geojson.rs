//! GeoJSON reading for region boundaries.

use anyhow::{anyhow, bail, ensure, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

use crate::region::{RawRegion, RegionName};

/// Read a FeatureCollection into one [`RawRegion`] per named feature, in feed order.
///
/// Features with unusable geometry are kept with `geometry: None` so the renderer can
/// report them; features without a name are dropped.
pub(crate) fn read_regions_from_geojson_bytes(bytes: &[u8], name_property: &str) -> Result<Vec<RawRegion>> {
    let value: Value = serde_json::from_slice(bytes)
        .context("[io::geojson] Failed to parse GeoJSON")?;

    ensure!(value["type"].as_str() == Some("FeatureCollection"),
        "[io::geojson] Expected a FeatureCollection, got type {}", value["type"]);
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[io::geojson] FeatureCollection has no features array"))?;

    let mut regions = Vec::with_capacity(features.len());
    let mut unnamed = 0;

    for (idx, feature) in features.iter().enumerate() {
        let Some(name) = feature_name(feature, name_property) else {
            unnamed += 1;
            continue;
        };

        let geometry = match parse_geometry(&feature["geometry"]) {
            Ok(geometry) => Some(geometry),
            Err(e) => {
                log::warn!("[io::geojson] feature {idx} ({name}) has no usable geometry: {e:#}");
                None
            }
        };

        regions.push(RawRegion { name, geometry });
    }

    if unnamed > 0 {
        log::warn!("[io::geojson] dropped {unnamed} features without a {name_property:?} property");
    }

    Ok(regions)
}

/// Look up the name property; exact key first, then a case-insensitive match.
fn feature_name(feature: &Value, name_property: &str) -> Option<RegionName> {
    let properties = feature["properties"].as_object()?;
    let value = properties.get(name_property)
        .or_else(|| properties.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name_property))
            .map(|(_, value)| value))?;

    match value {
        Value::String(s) => Some(RegionName::new(s)),
        Value::Number(n) => Some(RegionName::new(n.to_string())),
        _ => None,
    }
}

/// Parse a Polygon or MultiPolygon geometry object into a MultiPolygon.
fn parse_geometry(geometry: &Value) -> Result<MultiPolygon<f64>> {
    let kind = match geometry {
        Value::Null => bail!("geometry is null"),
        _ => geometry["type"].as_str().ok_or_else(|| anyhow!("geometry has no type"))?,
    };
    let coords = geometry["coordinates"].as_array()
        .ok_or_else(|| anyhow!("{kind} has no coordinates array"))?;

    let shape = match kind {
        "Polygon" => MultiPolygon(vec![parse_polygon_coords(coords)?]),
        "MultiPolygon" => MultiPolygon(coords.iter()
            .map(|polygon| {
                let rings = polygon.as_array().ok_or_else(|| anyhow!("MultiPolygon member is not an array"))?;
                parse_polygon_coords(rings)
            })
            .collect::<Result<Vec<_>>>()?),
        other => bail!("unsupported geometry type {other:?}"),
    };

    ensure!(!shape.0.is_empty(), "{kind} has no polygons");
    Ok(shape)
}

/// Parse GeoJSON polygon coordinates: `[exterior, hole, hole, ...]`.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter()
        .map(|ring| {
            let coords = ring.as_array().ok_or_else(|| anyhow!("ring is not an array"))?;
            parse_ring_coords(coords)
        });

    let exterior = rings.next()
        .ok_or_else(|| anyhow!("polygon has no exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring: `[[x, y], [x, y], ...]`, closing it if needed.
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = coords.iter()
        .map(|pair| {
            let x = pair[0].as_f64().ok_or_else(|| anyhow!("invalid coordinate {pair}: x must be a number"))?;
            let y = pair[1].as_f64().ok_or_else(|| anyhow!("invalid coordinate {pair}: y must be a number"))?;
            Ok(Coord { x, y })
        })
        .collect::<Result<Vec<_>>>()?;

    ensure!(points.len() >= 3, "ring has {} positions; at least 3 are required", points.len());

    // Ensure ring is closed (first point == last point)
    if points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}
