use ahash::AHashMap;
use anyhow::{anyhow, Context, Result};
use polars::prelude::*;
use smallvec::SmallVec;
use tracing::info;

use crate::{error::Error, types::{OceanProximity, RegionId}};

/// Fixed per-region statistics. Loaded once from the cleaned dataset and
/// never user-editable.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStats {
    pub name: RegionId,
    pub longitude: f64,
    pub latitude: f64,
    pub total_rooms: f64,
    pub total_bedrooms: f64,
    pub population: f64,
    pub households: f64,
    pub ocean_proximity: OceanProximity,
    pub rooms_per_household: f64,
    pub bedrooms_per_rooms: f64,
    pub population_per_household: f64,
}

/// Immutable region statistics table with a name index.
///
/// The index keeps every row for a name, so a duplicate name (a
/// data-integrity violation in the source dataset) surfaces as
/// [`Error::AmbiguousRegion`] at lookup instead of silently shadowing a row.
#[derive(Debug)]
pub struct RegionTable {
    index: AHashMap<RegionId, SmallVec<[u32; 1]>>,
    rows: Vec<RegionStats>,
}

impl RegionTable {
    pub fn new(rows: Vec<RegionStats>) -> Self {
        let mut index: AHashMap<RegionId, SmallVec<[u32; 1]>> = AHashMap::new();
        for (i, row) in rows.iter().enumerate() {
            index.entry(row.name.clone()).or_default().push(i as u32);
        }
        Self { index, rows }
    }

    /// Ingest the cleaned region dataset from a DataFrame. Numeric columns
    /// are cast to f64; an unknown proximity label or a null cell is an
    /// ingestion error.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let names = df.column("name")?.str()?.clone();
        let longitude = numeric_column(df, "longitude")?;
        let latitude = numeric_column(df, "latitude")?;
        let total_rooms = numeric_column(df, "total_rooms")?;
        let total_bedrooms = numeric_column(df, "total_bedrooms")?;
        let population = numeric_column(df, "population")?;
        let households = numeric_column(df, "households")?;
        let proximity = df.column("ocean_proximity")?.str()?.clone();
        let rooms_per_household = numeric_column(df, "rooms_per_household")?;
        let bedrooms_per_rooms = numeric_column(df, "bedrooms_per_rooms")?;
        let population_per_household = numeric_column(df, "population_per_household")?;

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let name = names
                .get(i)
                .ok_or_else(|| anyhow!("row {i}: null region name"))?;
            let label = proximity
                .get(i)
                .ok_or_else(|| anyhow!("row {i}: null ocean_proximity"))?;
            let ocean_proximity = OceanProximity::parse(label)
                .ok_or_else(|| anyhow!("row {i}: unknown ocean_proximity '{label}'"))?;

            rows.push(RegionStats {
                name: RegionId::from(name),
                longitude: cell(&longitude, i, "longitude")?,
                latitude: cell(&latitude, i, "latitude")?,
                total_rooms: cell(&total_rooms, i, "total_rooms")?,
                total_bedrooms: cell(&total_bedrooms, i, "total_bedrooms")?,
                population: cell(&population, i, "population")?,
                households: cell(&households, i, "households")?,
                ocean_proximity,
                rooms_per_household: cell(&rooms_per_household, i, "rooms_per_household")?,
                bedrooms_per_rooms: cell(&bedrooms_per_rooms, i, "bedrooms_per_rooms")?,
                population_per_household: cell(
                    &population_per_household,
                    i,
                    "population_per_household",
                )?,
            });
        }

        info!(rows = rows.len(), "region table loaded");
        Ok(Self::new(rows))
    }

    /// Get the number of rows in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up the unique row for a region name.
    pub fn lookup(&self, region: &str) -> Result<&RegionStats, Error> {
        let rows = self.index.get(region).ok_or_else(|| Error::RegionNotFound {
            region: region.to_string(),
        })?;
        match rows.as_slice() {
            [row] => Ok(&self.rows[*row as usize]),
            rows => Err(Error::AmbiguousRegion {
                region: region.to_string(),
                count: rows.len(),
            }),
        }
    }

    /// Region names sorted alphabetically, one entry per distinct name.
    pub fn sorted_names(&self) -> Vec<RegionId> {
        let mut names: Vec<RegionId> = self.index.keys().cloned().collect();
        names.sort();
        names
    }

    /// Report the first duplicate name, so loaders can flag bad datasets
    /// eagerly instead of waiting for a lookup to hit one.
    pub fn validate(&self) -> Result<(), Error> {
        let mut names: Vec<&RegionId> = self
            .index
            .iter()
            .filter(|(_, rows)| rows.len() > 1)
            .map(|(name, _)| name)
            .collect();
        names.sort();
        match names.first() {
            None => Ok(()),
            Some(name) => Err(Error::AmbiguousRegion {
                region: name.to_string(),
                count: self.index[name.as_str()].len(),
            }),
        }
    }

    /// Iterate rows in table order.
    pub fn iter(&self) -> impl Iterator<Item = &RegionStats> {
        self.rows.iter()
    }
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    Ok(df
        .column(name)
        .with_context(|| format!("region table is missing column '{name}'"))?
        .cast(&DataType::Float64)
        .with_context(|| format!("column '{name}' is not numeric"))?
        .f64()?
        .clone())
}

fn cell(column: &Float64Chunked, row: usize, name: &str) -> Result<f64> {
    column
        .get(row)
        .ok_or_else(|| anyhow!("row {row}: null {name}"))
}
