use tracing::debug;

use super::{bucket::income_category, record::FeatureRecord};
use crate::{error::Error, table::RegionTable};

/// Youngest property age the form accepts.
pub const MIN_HOUSING_AGE: u32 = 1;
/// Oldest property age the form accepts.
pub const MAX_HOUSING_AGE: u32 = 50;

/// The user-editable scalars of a prediction request. Everything else in
/// the feature row is derived from the selected region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserInputs {
    /// Property age in years, valid range 1 to 50.
    pub housing_median_age: u32,
    /// Median income as entered, in thousands of current dollars.
    pub median_income: f64,
}

impl UserInputs {
    fn validate(&self) -> Result<(), Error> {
        if self.housing_median_age < MIN_HOUSING_AGE || self.housing_median_age > MAX_HOUSING_AGE {
            return Err(Error::InvalidInput {
                field: "housing_median_age",
                reason: format!(
                    "must be between {MIN_HOUSING_AGE} and {MAX_HOUSING_AGE}, got {}",
                    self.housing_median_age
                ),
            });
        }
        if !self.median_income.is_finite() {
            return Err(Error::InvalidInput {
                field: "median_income",
                reason: format!("must be finite, got {}", self.median_income),
            });
        }
        Ok(())
    }
}

impl Default for UserInputs {
    /// The form's initial widget values.
    fn default() -> Self {
        Self { housing_median_age: 10, median_income: 45.0 }
    }
}

impl FeatureRecord {
    /// Assemble the full feature row for one region: fixed statistics come
    /// from the region table, the user scalars are validated and the income
    /// category is re-derived from the rescaled income.
    ///
    /// Fails without producing a partial record: the region must resolve to
    /// exactly one table row and both user scalars must be in range.
    pub fn build(
        region: &str,
        table: &RegionTable,
        inputs: &UserInputs,
    ) -> Result<FeatureRecord, Error> {
        let stats = table.lookup(region)?;
        inputs.validate()?;

        // Entered in thousands of dollars; the model was trained on tens
        // of thousands.
        let median_income = inputs.median_income / 10.0;

        Ok(FeatureRecord {
            longitude: stats.longitude,
            latitude: stats.latitude,
            housing_median_age: inputs.housing_median_age,
            total_rooms: stats.total_rooms,
            total_bedrooms: stats.total_bedrooms,
            population: stats.population,
            households: stats.households,
            median_income,
            ocean_proximity: stats.ocean_proximity,
            median_income_cat: income_category(median_income),
            rooms_per_household: stats.rooms_per_household,
            bedrooms_per_rooms: stats.bedrooms_per_rooms,
            population_per_household: stats.population_per_household,
        })
    }
}

/// Trained regression model, opaque to this crate. Implementations wrap
/// whatever inference runtime serves the model and return a single price
/// estimate.
pub trait Predictor {
    fn predict(&self, record: &FeatureRecord) -> anyhow::Result<f64>;
}

/// Build the feature row for `region` and run the predictor on it. This is
/// the submit path of the form: one synchronous build-and-predict cycle.
pub fn estimate(
    region: &str,
    table: &RegionTable,
    inputs: &UserInputs,
    model: &dyn Predictor,
) -> anyhow::Result<f64> {
    let record = FeatureRecord::build(region, table, inputs)?;
    debug!(region, "feature row assembled");
    model.predict(&record)
}
