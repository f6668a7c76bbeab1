// Integration tests for the feature-row build path: region lookup, user
// input validation, income rescaling/bucketing, and the predictor seam.

use polars::prelude::*;
use pricemap::{
    estimate, Error, FeatureRecord, OceanProximity, Predictor, RegionId, RegionStats, RegionTable,
    UserInputs,
};

fn alpha_row() -> RegionStats {
    RegionStats {
        name: RegionId::from("Alpha"),
        longitude: -122.33,
        latitude: 37.88,
        total_rooms: 800.0,
        total_bedrooms: 100.0,
        population: 300.0,
        households: 100.0,
        ocean_proximity: OceanProximity::Inland,
        rooms_per_household: 7.0,
        bedrooms_per_rooms: 0.2,
        population_per_household: 2.0,
    }
}

fn table() -> RegionTable {
    RegionTable::new(vec![alpha_row()])
}

#[test]
fn build_assembles_full_record_for_alpha() {
    let inputs = UserInputs { housing_median_age: 10, median_income: 45.0 };
    let record = FeatureRecord::build("Alpha", &table(), &inputs).unwrap();

    let expected = FeatureRecord {
        longitude: -122.33,
        latitude: 37.88,
        housing_median_age: 10,
        total_rooms: 800.0,
        total_bedrooms: 100.0,
        population: 300.0,
        households: 100.0,
        median_income: 4.5,
        ocean_proximity: OceanProximity::Inland,
        // 4.5 falls in [4.5, 6).
        median_income_cat: 3,
        rooms_per_household: 7.0,
        bedrooms_per_rooms: 0.2,
        population_per_household: 2.0,
    };
    assert_eq!(record, expected);
}

#[test]
fn missing_region_fails_with_region_not_found() {
    let inputs = UserInputs::default();
    let result = FeatureRecord::build("Omega", &table(), &inputs);
    assert_eq!(
        result,
        Err(Error::RegionNotFound { region: "Omega".to_string() })
    );
}

#[test]
fn duplicate_region_fails_with_ambiguous_region() {
    let duplicated = RegionTable::new(vec![alpha_row(), alpha_row()]);
    let result = FeatureRecord::build("Alpha", &duplicated, &UserInputs::default());
    assert_eq!(
        result,
        Err(Error::AmbiguousRegion { region: "Alpha".to_string(), count: 2 })
    );
}

#[test]
fn non_finite_income_rejected_before_bucketing() {
    for income in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let inputs = UserInputs { housing_median_age: 10, median_income: income };
        let result = FeatureRecord::build("Alpha", &table(), &inputs);
        assert!(matches!(
            result,
            Err(Error::InvalidInput { field: "median_income", .. })
        ));
    }
}

#[test]
fn age_outside_declared_range_rejected() {
    for age in [0, 51] {
        let inputs = UserInputs { housing_median_age: age, median_income: 45.0 };
        let result = FeatureRecord::build("Alpha", &table(), &inputs);
        assert!(matches!(
            result,
            Err(Error::InvalidInput { field: "housing_median_age", .. })
        ));
    }
    for age in [1, 50] {
        let inputs = UserInputs { housing_median_age: age, median_income: 45.0 };
        assert!(FeatureRecord::build("Alpha", &table(), &inputs).is_ok());
    }
}

#[test]
fn income_rescaling_round_trips() {
    let entered = 45.0;
    let inputs = UserInputs { housing_median_age: 10, median_income: entered };
    let record = FeatureRecord::build("Alpha", &table(), &inputs).unwrap();
    assert!((record.median_income * 10.0 - entered).abs() < 1e-9);
}

struct FixedPrice(f64);

impl Predictor for FixedPrice {
    fn predict(&self, record: &FeatureRecord) -> anyhow::Result<f64> {
        assert_eq!(record.median_income_cat, 3);
        Ok(self.0)
    }
}

#[test]
fn estimate_chains_build_and_predict() {
    let price = estimate("Alpha", &table(), &UserInputs::default(), &FixedPrice(182_500.0));
    assert_eq!(price.unwrap(), 182_500.0);
}

#[test]
fn estimate_propagates_build_failure_without_predicting() {
    struct Unreachable;
    impl Predictor for Unreachable {
        fn predict(&self, _: &FeatureRecord) -> anyhow::Result<f64> {
            panic!("predictor must not see a failed build");
        }
    }

    let result = estimate("Omega", &table(), &UserInputs::default(), &Unreachable);
    assert!(result.is_err());
}

#[test]
fn table_ingests_from_dataframe() {
    let df = df!(
        "name" => ["Alpha", "Beta"],
        "longitude" => [-122.33, -120.0],
        "latitude" => [37.88, 36.5],
        "total_rooms" => [800.0, 1200.0],
        "total_bedrooms" => [100.0, 250.0],
        "population" => [300.0, 900.0],
        "households" => [100.0, 350.0],
        "ocean_proximity" => ["INLAND", "NEAR OCEAN"],
        "rooms_per_household" => [7.0, 3.4],
        "bedrooms_per_rooms" => [0.2, 0.21],
        "population_per_household" => [2.0, 2.6],
    )
    .unwrap();

    let table = RegionTable::from_dataframe(&df).unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.validate().is_ok());

    let beta = table.lookup("Beta").unwrap();
    assert_eq!(beta.ocean_proximity, OceanProximity::NearOcean);
    assert_eq!(beta.total_rooms, 1200.0);

    let names: Vec<String> = table.sorted_names().iter().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
}

#[test]
fn table_rejects_unknown_proximity_label() {
    let df = df!(
        "name" => ["Alpha"],
        "longitude" => [-122.33],
        "latitude" => [37.88],
        "total_rooms" => [800.0],
        "total_bedrooms" => [100.0],
        "population" => [300.0],
        "households" => [100.0],
        "ocean_proximity" => ["OFFSHORE"],
        "rooms_per_household" => [7.0],
        "bedrooms_per_rooms" => [0.2],
        "population_per_household" => [2.0],
    )
    .unwrap();

    assert!(RegionTable::from_dataframe(&df).is_err());
}
