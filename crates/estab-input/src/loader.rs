//! CSV loaders for reference data.
//!
//! Every loader has a `Path` variant and a generic `Read` variant (pass a
//! `std::io::Cursor` in tests).  Rows are validated as they are read, so a
//! bad file fails before any simulation work starts.
//!
//! # Formats
//!
//! ```csv
//! # species.csv
//! name,max_drought,gdd_min,gdd_max,min_january_temp
//! acer_rubrum,0.23,1260,6076,-18
//!
//! # regions.csv
//! name,active
//! ridge,true
//!
//! # climate.csv  (twelve monthly means, January first)
//! region,year,begin_growing,end_growing,growing_degree_days,temp_jan,…,temp_dec
//! ridge,2000,120,280,1800,-4.5,…,-2.0
//!
//! # sites.csv  (one row per site, in SiteId order)
//! region,active,dry_days,slope_angle,living_biomass
//! ridge,true,12,8.5,0
//!
//! # sufficient_light.csv
//! shade_class,p0,p1,p2,p3,p4,p5
//! 1,1.0,0.5,0.25,0.0,0.0,0.0
//!
//! # wetness.csv
//! moisture_class,p1,p2,p3
//! 2,0.5,1.0,0.5
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use estab_core::Year;

use crate::region::{AnnualClimate, ClimateTable, Region, RegionTable};
use crate::site::{SiteState, SiteStore};
use crate::species::{SpeciesParams, SpeciesTable};
use crate::tolerance::{SufficientLight, SufficientLightTable, WetnessTable, WetnessTolerance};
use crate::{InputError, InputResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SpeciesRecord {
    name:             String,
    max_drought:      f64,
    gdd_min:          f64,
    gdd_max:          f64,
    min_january_temp: i32,
}

#[derive(Deserialize)]
struct RegionRecord {
    name:   String,
    active: bool,
}

#[derive(Deserialize)]
struct ClimateRecord {
    region:              String,
    year:                u32,
    begin_growing:       i32,
    end_growing:         i32,
    growing_degree_days: f64,
    temp_jan: f64,
    temp_feb: f64,
    temp_mar: f64,
    temp_apr: f64,
    temp_may: f64,
    temp_jun: f64,
    temp_jul: f64,
    temp_aug: f64,
    temp_sep: f64,
    temp_oct: f64,
    temp_nov: f64,
    temp_dec: f64,
}

#[derive(Deserialize)]
struct SiteRecord {
    region:         String,
    active:         bool,
    dry_days:       f64,
    slope_angle:    f64,
    living_biomass: f64,
}

#[derive(Deserialize)]
struct LightRecord {
    shade_class: u8,
    p0: f64,
    p1: f64,
    p2: f64,
    p3: f64,
    p4: f64,
    p5: f64,
}

#[derive(Deserialize)]
struct WetnessRecord {
    moisture_class: u8,
    p1: f64,
    p2: f64,
    p3: f64,
}

/// Deserialize every row of `reader` as `T`.
fn read_records<T: DeserializeOwned, R: Read>(reader: R) -> InputResult<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader
        .deserialize::<T>()
        .map(|r| r.map_err(|e| InputError::Parse(e.to_string())))
        .collect()
}

// ── Species ───────────────────────────────────────────────────────────────────

pub fn load_species_csv(path: &Path) -> InputResult<SpeciesTable> {
    load_species_reader(File::open(path)?)
}

pub fn load_species_reader<R: Read>(reader: R) -> InputResult<SpeciesTable> {
    let mut table = SpeciesTable::new();
    for r in read_records::<SpeciesRecord, _>(reader)? {
        table.insert(SpeciesParams {
            name:             r.name,
            max_drought:      r.max_drought,
            gdd_min:          r.gdd_min,
            gdd_max:          r.gdd_max,
            min_january_temp: r.min_january_temp,
        })?;
    }
    Ok(table)
}

// ── Regions and climate ───────────────────────────────────────────────────────

pub fn load_regions_csv(path: &Path) -> InputResult<RegionTable> {
    load_regions_reader(File::open(path)?)
}

pub fn load_regions_reader<R: Read>(reader: R) -> InputResult<RegionTable> {
    let mut table = RegionTable::new();
    for r in read_records::<RegionRecord, _>(reader)? {
        table.insert(Region { name: r.name, active: r.active })?;
    }
    Ok(table)
}

/// Load annual climate.  Region names must already be registered in
/// `regions`.
pub fn load_climate_csv(path: &Path, regions: &RegionTable) -> InputResult<ClimateTable> {
    load_climate_reader(File::open(path)?, regions)
}

pub fn load_climate_reader<R: Read>(reader: R, regions: &RegionTable) -> InputResult<ClimateTable> {
    let mut table = ClimateTable::new();
    for r in read_records::<ClimateRecord, _>(reader)? {
        table.insert(AnnualClimate {
            region:              regions.require(&r.region)?,
            year:                Year(r.year),
            begin_growing:       r.begin_growing,
            end_growing:         r.end_growing,
            growing_degree_days: r.growing_degree_days,
            monthly_temp:        [
                r.temp_jan, r.temp_feb, r.temp_mar, r.temp_apr,
                r.temp_may, r.temp_jun, r.temp_jul, r.temp_aug,
                r.temp_sep, r.temp_oct, r.temp_nov, r.temp_dec,
            ],
        });
    }
    Ok(table)
}

// ── Sites ─────────────────────────────────────────────────────────────────────

/// Load sites in file order; row `n` becomes `SiteId(n)`.
pub fn load_sites_csv(path: &Path, regions: &RegionTable) -> InputResult<SiteStore> {
    load_sites_reader(File::open(path)?, regions)
}

pub fn load_sites_reader<R: Read>(reader: R, regions: &RegionTable) -> InputResult<SiteStore> {
    let records = read_records::<SiteRecord, _>(reader)?;
    let mut store = SiteStore::with_capacity(records.len());
    for r in records {
        let state = SiteState {
            region:         regions.require(&r.region)?,
            dry_days:       r.dry_days,
            slope_angle:    r.slope_angle,
            living_biomass: r.living_biomass,
        };
        store.push(state, r.active)?;
    }
    Ok(store)
}

// ── Tolerance tables ──────────────────────────────────────────────────────────

pub fn load_sufficient_light_csv(path: &Path) -> InputResult<SufficientLightTable> {
    load_sufficient_light_reader(File::open(path)?)
}

pub fn load_sufficient_light_reader<R: Read>(reader: R) -> InputResult<SufficientLightTable> {
    let rows = read_records::<LightRecord, _>(reader)?
        .into_iter()
        .map(|r| SufficientLight::new(r.shade_class, [r.p0, r.p1, r.p2, r.p3, r.p4, r.p5]))
        .collect::<InputResult<Vec<_>>>()?;
    SufficientLightTable::from_rows(rows)
}

pub fn load_wetness_csv(path: &Path) -> InputResult<WetnessTable> {
    load_wetness_reader(File::open(path)?)
}

pub fn load_wetness_reader<R: Read>(reader: R) -> InputResult<WetnessTable> {
    let rows = read_records::<WetnessRecord, _>(reader)?
        .into_iter()
        .map(|r| WetnessTolerance::new(r.moisture_class, [r.p1, r.p2, r.p3]))
        .collect::<InputResult<Vec<_>>>()?;
    WetnessTable::from_rows(rows)
}
