mod bucket;
mod builder;
mod record;

pub use bucket::{income_category, INCOME_BREAKPOINTS};
pub use builder::{estimate, Predictor, UserInputs, MAX_HOUSING_AGE, MIN_HOUSING_AGE};
pub use record::FeatureRecord;
