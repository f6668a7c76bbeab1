mod geojson;
mod normalize;
mod store;

pub use normalize::normalize;
pub use store::{ExteriorRing, GeometryCache, NormalizedRegions};

use geo::Rect;
use rstar::{RTreeObject, AABB};

#[derive(Debug, Clone)]
pub(crate) struct BoundingBox {
    idx: usize, // Index of the corresponding region in the store
    bbox: Rect<f64>,
}

impl BoundingBox {
    pub(crate) fn new(idx: usize, bbox: Rect<f64>) -> Self {
        Self { idx, bbox }
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.idx
    }
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}
