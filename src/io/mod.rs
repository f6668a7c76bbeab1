mod boundaries;
mod data;

pub use boundaries::read_region_boundaries;
pub use data::{read_from_csv, read_from_parquet, write_to_parquet};
