use rstar::AABB;
use serde_json::{json, Value};

use super::store::NormalizedRegions;

impl NormalizedRegions {
    /// Export all regions as a GeoJSON FeatureCollection.
    ///
    /// Each feature carries the region's polygons as a MultiPolygon (one
    /// exterior ring per polygon, counter-clockwise) and the region name as
    /// a property, which is what the map layer keys its tooltip and
    /// highlight off.
    pub fn to_geojson(&self) -> Value {
        self.to_geojson_with_bounds(None)
    }

    /// Export regions as a GeoJSON FeatureCollection, optionally filtered
    /// by a `[min_lon, min_lat, max_lon, max_lat]` viewport. Only regions
    /// whose bounding boxes intersect the viewport are included.
    pub fn to_geojson_with_bounds(&self, bounds: Option<[f64; 4]>) -> Value {
        let indices: Vec<usize> = match bounds {
            Some([min_lon, min_lat, max_lon, max_lat]) => {
                let envelope = AABB::from_corners([min_lon, min_lat], [max_lon, max_lat]);
                self.query_indices(&envelope)
            }
            None => (0..self.len()).collect(),
        };

        let features: Vec<Value> = indices
            .into_iter()
            .map(|idx| {
                let name = self.name_at(idx);
                // MultiPolygon nesting: [polygon][ring][point]; every
                // polygon here has exactly one (exterior) ring.
                let coordinates: Vec<Vec<&[[f64; 2]]>> = self
                    .polygons_at(idx)
                    .iter()
                    .map(|ring| vec![ring.as_slice()])
                    .collect();
                json!({
                    "type": "Feature",
                    "id": name.as_str(),
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": coordinates,
                    },
                    "properties": {
                        "name": name.as_str(),
                    },
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}
