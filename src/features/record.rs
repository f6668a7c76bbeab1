use polars::prelude::*;
use serde::Serialize;

use crate::types::OceanProximity;

/// The fixed-order input vector consumed by the trained price model.
///
/// Field order matters: the predictor aligns positionally with the feature
/// order it was trained on, which is the order below and in
/// [`FeatureRecord::COLUMNS`]. Built fresh per prediction request and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: u32,
    pub total_rooms: f64,
    pub total_bedrooms: f64,
    pub population: f64,
    pub households: f64,
    /// Rescaled to tens of thousands of dollars, the unit the model was
    /// trained on.
    pub median_income: f64,
    pub ocean_proximity: OceanProximity,
    pub median_income_cat: u32,
    pub rooms_per_household: f64,
    pub bedrooms_per_rooms: f64,
    pub population_per_household: f64,
}

impl FeatureRecord {
    /// Column names in trained feature order.
    pub const COLUMNS: [&'static str; 13] = [
        "longitude",
        "latitude",
        "housing_median_age",
        "total_rooms",
        "total_bedrooms",
        "population",
        "households",
        "median_income",
        "ocean_proximity",
        "median_income_cat",
        "rooms_per_household",
        "bedrooms_per_rooms",
        "population_per_household",
    ];

    /// Materialize the record as a single-row DataFrame with columns in
    /// trained feature order, ready to hand to the predictor.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        df!(
            "longitude" => [self.longitude],
            "latitude" => [self.latitude],
            "housing_median_age" => [self.housing_median_age as i64],
            "total_rooms" => [self.total_rooms],
            "total_bedrooms" => [self.total_bedrooms],
            "population" => [self.population],
            "households" => [self.households],
            "median_income" => [self.median_income],
            "ocean_proximity" => [self.ocean_proximity.as_str()],
            "median_income_cat" => [self.median_income_cat as i64],
            "rooms_per_household" => [self.rooms_per_household],
            "bedrooms_per_rooms" => [self.bedrooms_per_rooms],
            "population_per_household" => [self.population_per_household],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::FeatureRecord;
    use crate::types::OceanProximity;

    fn record() -> FeatureRecord {
        FeatureRecord {
            longitude: -122.33,
            latitude: 37.88,
            housing_median_age: 10,
            total_rooms: 800.0,
            total_bedrooms: 100.0,
            population: 300.0,
            households: 100.0,
            median_income: 4.5,
            ocean_proximity: OceanProximity::Inland,
            median_income_cat: 3,
            rooms_per_household: 7.0,
            bedrooms_per_rooms: 0.2,
            population_per_household: 2.0,
        }
    }

    #[test]
    fn dataframe_columns_follow_trained_order() {
        let df = record().to_dataframe().unwrap();
        assert_eq!(df.height(), 1);
        let names: Vec<&str> = df.get_column_names_str();
        assert_eq!(names, FeatureRecord::COLUMNS.to_vec());
    }

    #[test]
    fn proximity_serializes_as_dataset_label() {
        let df = record().to_dataframe().unwrap();
        let label = df.column("ocean_proximity").unwrap().str().unwrap().get(0);
        assert_eq!(label, Some("INLAND"));
    }
}
