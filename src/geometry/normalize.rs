use ahash::AHashMap;
use geo::orient::{Direction, Orient};
use geo::{BooleanOps, MultiPolygon, Polygon, Validation};
use tracing::{debug, warn};

use super::store::{ExteriorRing, NormalizedRegions};
use crate::{error::Error, types::RegionId};

/// Normalize raw region boundaries into renderable exterior-ring coordinates.
///
/// Multi-part shapes are exploded into single-part polygons that keep their
/// owning region. Invalid parts are repaired with a zero-distance dissolve;
/// parts that stay invalid or come back empty are discarded. Surviving
/// polygons are re-wound counter-clockwise and flattened to closed exterior
/// rings. A region that loses every part is excluded from the store and
/// recorded in [`NormalizedRegions::dropped`] instead of failing the batch.
///
/// Emission order is deterministic: regions appear in first-appearance order
/// and polygons in input order.
pub fn normalize<I>(raw: I) -> NormalizedRegions
where
    I: IntoIterator<Item = (RegionId, MultiPolygon<f64>)>,
{
    let mut names: Vec<RegionId> = Vec::new();
    let mut index: AHashMap<RegionId, usize> = AHashMap::new();
    let mut parts: Vec<Vec<ExteriorRing>> = Vec::new();

    for (region, shape) in raw {
        let slot = match index.get(region.as_str()) {
            Some(&slot) => slot,
            None => {
                index.insert(region.clone(), names.len());
                names.push(region.clone());
                parts.push(Vec::new());
                names.len() - 1
            }
        };

        // Explode: one entry per single-part polygon. Repair may split an
        // invalid part into several valid ones; all of them stay with the
        // owning region.
        for polygon in shape.0 {
            for repaired in repair(polygon, &region) {
                let oriented = repaired.orient(Direction::Default);
                parts[slot].push(exterior_ring(&oriented));
            }
        }
    }

    let mut dropped = Vec::new();
    let mut kept_names = Vec::with_capacity(names.len());
    let mut kept_parts = Vec::with_capacity(parts.len());
    for (region, polygons) in names.into_iter().zip(parts) {
        if polygons.is_empty() {
            warn!(region = %region, "dropping region with unrepairable geometry");
            dropped.push(Error::GeometryInvalid { region });
        } else {
            kept_names.push(region);
            kept_parts.push(polygons);
        }
    }

    NormalizedRegions::from_parts(kept_names, kept_parts, dropped)
}

/// Repair an invalid polygon by dissolving it against nothing, which
/// re-derives the boundary of the same covered area and resolves
/// self-intersections. Returns zero or more valid single-part polygons.
fn repair(polygon: Polygon<f64>, region: &RegionId) -> Vec<Polygon<f64>> {
    if polygon.is_valid() {
        return vec![polygon];
    }

    debug!(region = %region, "dissolving invalid polygon part");
    let dissolved = MultiPolygon::new(vec![polygon]).union(&MultiPolygon::<f64>::new(Vec::new()));
    let repaired: Vec<Polygon<f64>> = dissolved
        .0
        .into_iter()
        .filter(|part| part.is_valid())
        .collect();

    if repaired.is_empty() {
        warn!(region = %region, "discarding polygon part that is empty after repair");
    }
    repaired
}

/// Flatten a polygon to its closed exterior ring. Interior holes are not
/// carried into the renderable output.
fn exterior_ring(polygon: &Polygon<f64>) -> ExteriorRing {
    let mut coords: ExteriorRing = polygon.exterior().coords().map(|c| [c.x, c.y]).collect();
    if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
        if first != last {
            coords.push(first);
        }
    }
    coords
}
