use std::sync::{Arc, RwLock};

use ahash::AHashMap;
use geo::{Centroid, Coord, LineString, MultiPolygon, Point, Polygon, Rect};
use rstar::{RTree, AABB};

use super::BoundingBox;
use crate::{error::Error, types::RegionId};

/// A closed exterior ring: ordered `[x, y]` pairs, first == last,
/// counter-clockwise.
pub type ExteriorRing = Vec<[f64; 2]>;

/// Immutable store of normalized region geometry.
///
/// Built once by [`normalize`](super::normalize) and read-only afterwards,
/// so it can be shared across threads behind an `Arc` without locking.
/// Regions whose geometry was unrepairable are absent from the store but
/// listed in [`dropped`](Self::dropped), keeping "excluded" distinguishable
/// from "never requested".
#[derive(Debug)]
pub struct NormalizedRegions {
    names: Vec<RegionId>,
    index: AHashMap<RegionId, usize>,
    polygons: Vec<Vec<ExteriorRing>>, // parallel to names
    bboxes: Vec<Rect<f64>>,           // parallel to names
    rtree: RTree<BoundingBox>,
    dropped: Vec<Error>,
}

impl NormalizedRegions {
    /// Assemble the store from per-region polygon lists. Regions arrive in
    /// emission order with at least one polygon each.
    pub(super) fn from_parts(
        names: Vec<RegionId>,
        polygons: Vec<Vec<ExteriorRing>>,
        dropped: Vec<Error>,
    ) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        let bboxes: Vec<Rect<f64>> = polygons.iter().map(|region| region_bbox(region)).collect();
        let rtree = RTree::bulk_load(
            bboxes
                .iter()
                .enumerate()
                .map(|(i, bbox)| BoundingBox::new(i, *bbox))
                .collect(),
        );

        Self { names, index, polygons, bboxes, rtree, dropped }
    }

    /// Get the number of regions in the store.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the store holds no regions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Look up a region's polygons, each a closed counter-clockwise
    /// exterior ring.
    pub fn get(&self, region: &str) -> Option<&[ExteriorRing]> {
        self.index
            .get(region)
            .map(|&idx| self.polygons[idx].as_slice())
    }

    #[inline]
    pub fn contains(&self, region: &str) -> bool {
        self.index.contains_key(region)
    }

    /// Region names in emission order.
    #[inline]
    pub fn names(&self) -> &[RegionId] {
        &self.names
    }

    /// Region names sorted alphabetically, the order a region picker
    /// presents them in.
    pub fn sorted_names(&self) -> Vec<RegionId> {
        let mut names = self.names.clone();
        names.sort();
        names
    }

    /// Iterate regions with their polygons, in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, &[ExteriorRing])> {
        self.names
            .iter()
            .zip(self.polygons.iter().map(|polygons| polygons.as_slice()))
    }

    /// Regions excluded from the store because their geometry was
    /// unrepairable.
    #[inline]
    pub fn dropped(&self) -> &[Error] {
        &self.dropped
    }

    /// Whether a region was requested but excluded for invalid geometry.
    pub fn was_dropped(&self, region: &str) -> bool {
        self.dropped.iter().any(
            |error| matches!(error, Error::GeometryInvalid { region: r } if r.as_str() == region),
        )
    }

    /// Compute a region's centroid, e.g. to center a map view on it.
    pub fn centroid(&self, region: &str) -> Option<Point<f64>> {
        let polygons = self.get(region)?;
        let shape = MultiPolygon::new(
            polygons
                .iter()
                .map(|ring| {
                    Polygon::new(
                        LineString::from(
                            ring.iter().map(|&[x, y]| (x, y)).collect::<Vec<_>>(),
                        ),
                        vec![],
                    )
                })
                .collect(),
        );
        shape.centroid()
    }

    /// Compute the bounding rectangle of all regions.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.bboxes.iter().copied().reduce(|a, b| {
            Rect::new(
                Coord {
                    x: a.min().x.min(b.min().x),
                    y: a.min().y.min(b.min().y),
                },
                Coord {
                    x: a.max().x.max(b.max().x),
                    y: a.max().y.max(b.max().y),
                },
            )
        })
    }

    /// Query the R-tree for regions whose bounding boxes intersect the
    /// given envelope. Indices are returned in ascending order.
    pub(super) fn query_indices(&self, envelope: &AABB<[f64; 2]>) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .rtree
            .locate_in_envelope_intersecting(envelope)
            .map(|bbox| bbox.index())
            .collect();
        indices.sort_unstable();
        indices
    }

    #[inline]
    pub(super) fn name_at(&self, idx: usize) -> &RegionId {
        &self.names[idx]
    }

    #[inline]
    pub(super) fn polygons_at(&self, idx: usize) -> &[ExteriorRing] {
        &self.polygons[idx]
    }
}

/// Bounding rectangle over every coordinate of a region's rings.
fn region_bbox(polygons: &[ExteriorRing]) -> Rect<f64> {
    let mut min = Coord { x: f64::INFINITY, y: f64::INFINITY };
    let mut max = Coord { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY };
    for ring in polygons {
        for &[x, y] in ring {
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
        }
    }
    Rect::new(min, max)
}

/// Shared handle to the process-wide normalized geometry.
///
/// The store is computed once per dataset version; readers clone the `Arc`
/// and never hold the lock across use. A dataset refresh swaps the whole
/// reference, so in-flight readers keep a coherent view of the old store.
#[derive(Debug)]
pub struct GeometryCache {
    inner: RwLock<Arc<NormalizedRegions>>,
}

impl GeometryCache {
    pub fn new(regions: NormalizedRegions) -> Self {
        Self { inner: RwLock::new(Arc::new(regions)) }
    }

    /// Get the current store.
    pub fn get(&self) -> Arc<NormalizedRegions> {
        self.inner
            .read()
            .expect("geometry cache lock poisoned")
            .clone()
    }

    /// Atomically replace the store, returning the previous one.
    pub fn swap(&self, regions: NormalizedRegions) -> Arc<NormalizedRegions> {
        let mut guard = self.inner.write().expect("geometry cache lock poisoned");
        std::mem::replace(&mut *guard, Arc::new(regions))
    }
}
