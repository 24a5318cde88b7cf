use geo::{CoordsIter, LineString, MultiPolygon};

/// Build a compact SVG path string for a projected MultiPolygon (exteriors + holes).
pub(crate) fn multipolygon_to_path(shape: &MultiPolygon<f64>) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        ring_to_path(polygon.exterior(), &mut out);
        for interior in polygon.interiors() {
            ring_to_path(interior, &mut out);
        }
    }

    out.trim_start().to_string()
}

/// Append a ring as an SVG subpath: "M x,y L x,y ... Z"
fn ring_to_path(ring: &LineString<f64>, out: &mut String) {
    let mut coords = ring.coords_iter();
    if let Some(first) = coords.next() {
        out.push_str(&format!(" M{:.3},{:.3}", first.x, first.y));
        for coord in coords {
            out.push_str(&format!(" L{:.3},{:.3}", coord.x, coord.y));
        }
        out.push('Z');
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon};

    use super::*;

    #[test]
    fn path_covers_exterior_and_holes() {
        let square = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 0.0)],
            interiors: [[(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0), (x: 1.0, y: 1.0)]]
        );
        let path = multipolygon_to_path(&MultiPolygon(vec![square]));
        assert_eq!(path,
            "M0.000,0.000 L4.000,0.000 L4.000,4.000 L0.000,0.000Z \
             M1.000,1.000 L2.000,1.000 L2.000,2.000 L1.000,1.000Z");
    }

    #[test]
    fn empty_shape_has_empty_path() {
        assert_eq!(multipolygon_to_path(&MultiPolygon::<f64>(vec![])), "");
    }
}
