use std::path::Path;

use anyhow::{bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use shapefile::{dbase::FieldValue, Shape};
use tracing::{info, warn};

use crate::types::RegionId;

/// Reads region boundaries from a `.shp` file, keyed by the string
/// attribute `name_field`. Non-polygon shapes are skipped with a warning.
///
/// The returned geometry is raw: rings may be wound either way and shapes
/// may be invalid. Feed it to [`normalize`](crate::normalize) before
/// rendering.
pub fn read_region_boundaries(
    path: &Path,
    name_field: &str,
) -> Result<Vec<(RegionId, MultiPolygon<f64>)>> {
    let mut reader = shapefile::Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {}", path.display()))?;

    let mut regions = Vec::with_capacity(reader.shape_count()?);
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result.context("Error reading shape+record")?;

        let name = match record.get(name_field) {
            Some(FieldValue::Character(Some(name))) => name.clone(),
            Some(value) => bail!("Field '{name_field}' is not a string: {value:?}"),
            None => bail!("Shapefile record has no field '{name_field}'"),
        };

        match shape {
            Shape::Polygon(polygon) => {
                regions.push((RegionId::from(name), group_rings(&polygon)));
            }
            _ => {
                warn!(region = %name, "skipping non-polygon shape");
            }
        }
    }

    info!(regions = regions.len(), "region boundaries loaded");
    Ok(regions)
}

/// Group a shapefile polygon's flat ring list into a geo::MultiPolygon.
///
/// Shapefiles store rings as [exterior, its holes..., next exterior, ...]
/// with exteriors wound clockwise and holes counter-clockwise, so winding
/// decides which is which.
fn group_rings(polygon: &shapefile::Polygon) -> MultiPolygon<f64> {
    let mut parts: Vec<Polygon<f64>> = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes: Vec<LineString<f64>> = Vec::new();

    for ring in polygon.rings() {
        let line = closed_line(ring.points());
        if ring_signed_area(&line) < 0.0 {
            // Clockwise: an exterior. Flush the previous exterior with the
            // holes collected since.
            if let Some(previous) = exterior.take() {
                parts.push(Polygon::new(previous, std::mem::take(&mut holes)));
            }
            exterior = Some(line);
        } else {
            holes.push(line);
        }
    }
    if let Some(previous) = exterior {
        parts.push(Polygon::new(previous, holes));
    }

    MultiPolygon::new(parts)
}

/// Convert shapefile points to a LineString, closing the ring if the file
/// left it open.
fn closed_line(points: &[shapefile::Point]) -> LineString<f64> {
    let mut coords: Vec<Coord<f64>> = points
        .iter()
        .map(|point| Coord { x: point.x, y: point.y })
        .collect();
    if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
        if first != last {
            coords.push(first);
        }
    }
    LineString(coords)
}

/// Signed area of a closed ring (negative for clockwise).
fn ring_signed_area(ring: &LineString<f64>) -> f64 {
    ring.0
        .windows(2)
        .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
        .sum::<f64>()
        / 2.0
}

#[cfg(test)]
mod tests {
    use shapefile::{Point, PolygonRing};

    use super::group_rings;

    #[test]
    fn winding_splits_exteriors_from_holes() {
        // Outer ring clockwise (shapefile convention), hole counter-clockwise.
        let outer = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 4.0),
            Point::new(4.0, 4.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 0.0),
        ];
        let hole = vec![
            Point::new(1.0, 1.0),
            Point::new(3.0, 1.0),
            Point::new(3.0, 3.0),
            Point::new(1.0, 3.0),
            Point::new(1.0, 1.0),
        ];
        let shape = shapefile::Polygon::with_rings(vec![
            PolygonRing::Outer(outer),
            PolygonRing::Inner(hole),
        ]);

        let grouped = group_rings(&shape);
        assert_eq!(grouped.0.len(), 1);
        assert_eq!(grouped.0[0].interiors().len(), 1);
    }

    #[test]
    fn two_exteriors_become_two_parts() {
        let first = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
        ];
        let second = vec![
            Point::new(5.0, 5.0),
            Point::new(5.0, 6.0),
            Point::new(6.0, 6.0),
            Point::new(6.0, 5.0),
            Point::new(5.0, 5.0),
        ];
        let shape = shapefile::Polygon::with_rings(vec![
            PolygonRing::Outer(first),
            PolygonRing::Outer(second),
        ]);

        let grouped = group_rings(&shape);
        assert_eq!(grouped.0.len(), 2);
        assert!(grouped.0.iter().all(|part| part.interiors().is_empty()));
    }
}
