//! Unit tests for estab-input.

use estab_core::{RegionId, SpeciesId};

use crate::{Region, RegionTable, SiteState, SpeciesParams, SpeciesTable};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn species(name: &str, gdd_min: f64, gdd_max: f64) -> SpeciesParams {
    SpeciesParams {
        name:             name.into(),
        max_drought:      0.5,
        gdd_min,
        gdd_max,
        min_january_temp: -10,
    }
}

fn two_regions() -> RegionTable {
    let mut t = RegionTable::new();
    t.insert(Region { name: "ridge".into(), active: true }).unwrap();
    t.insert(Region { name: "lake".into(), active: false }).unwrap();
    t
}

fn flat_site(region: RegionId) -> SiteState {
    SiteState { region, dry_days: 10.0, slope_angle: 0.0, living_biomass: 0.0 }
}

// ── SpeciesTable ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod species_table {
    use super::*;
    use crate::InputError;

    #[test]
    fn ids_are_dense_and_named() {
        let mut t = SpeciesTable::new();
        let a = t.insert(species("abies", 500.0, 2500.0)).unwrap();
        let b = t.insert(species("betula", 300.0, 2000.0)).unwrap();
        assert_eq!(a, SpeciesId(0));
        assert_eq!(b, SpeciesId(1));
        assert_eq!(t.id_of("betula"), Some(b));
        assert_eq!(t.get(a).unwrap().name, "abies");
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn degenerate_gdd_bounds_rejected_at_load() {
        let mut t = SpeciesTable::new();
        let err = t.insert(species("flat", 1000.0, 1000.0)).unwrap_err();
        assert!(matches!(err, InputError::InvalidSpecies { .. }));
        assert!(t.is_empty());
    }

    #[test]
    fn inverted_gdd_bounds_rejected() {
        assert!(species("upside_down", 2500.0, 500.0).validate().is_err());
    }

    #[test]
    fn non_positive_drought_tolerance_rejected() {
        let mut s = species("wet", 500.0, 2500.0);
        s.max_drought = 0.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut t = SpeciesTable::new();
        t.insert(species("abies", 500.0, 2500.0)).unwrap();
        let err = t.insert(species("abies", 400.0, 2400.0)).unwrap_err();
        assert!(matches!(err, InputError::DuplicateName { kind: "species", .. }));
    }
}

// ── Regions and climate ───────────────────────────────────────────────────────

#[cfg(test)]
mod regions {
    use estab_core::Year;

    use super::*;
    use crate::{AnnualClimate, ClimateTable, InputError};

    #[test]
    fn lookup_by_name() {
        let t = two_regions();
        assert_eq!(t.id_of("lake"), Some(RegionId(1)));
        assert!(!t.get(RegionId(1)).unwrap().active);
        assert!(matches!(t.require("swamp"), Err(InputError::UnknownRegion(_))));
    }

    #[test]
    fn climate_keyed_by_region_and_year() {
        let mut t = ClimateTable::new();
        let mut monthly_temp = [10.0; 12];
        monthly_temp[0] = -3.0;
        t.insert(AnnualClimate {
            region:              RegionId(0),
            year:                Year(2001),
            begin_growing:       100,
            end_growing:         250,
            growing_degree_days: 1500.0,
            monthly_temp,
        });
        let c = t.get(RegionId(0), Year(2001)).unwrap();
        assert_eq!(c.january_temp(), -3.0);
        assert!(t.get(RegionId(0), Year(2002)).is_none());
        assert!(t.get(RegionId(1), Year(2001)).is_none());
    }
}

// ── SiteStore ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod site_store {
    use estab_core::SiteId;

    use super::*;
    use crate::{Cohort, InputError, SiteStore, living_biomass};

    #[test]
    fn push_and_read_back() {
        let mut store = SiteStore::new();
        let s0 = store.push(flat_site(RegionId(0)), true).unwrap();
        let s1 = store.push(flat_site(RegionId(1)), false).unwrap();
        assert_eq!(s0, SiteId(0));
        assert_eq!(s1, SiteId(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.state(s1).region, RegionId(1));
        let active: Vec<SiteId> = store.active_sites().collect();
        assert_eq!(active, vec![s0]);
    }

    #[test]
    fn negative_dry_days_rejected() {
        let mut store = SiteStore::new();
        let mut s = flat_site(RegionId(0));
        s.dry_days = -1.0;
        assert!(matches!(store.push(s, true), Err(InputError::InvalidSite { row: 0, .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn slope_outside_range_rejected() {
        let mut store = SiteStore::new();
        let mut s = flat_site(RegionId(0));
        s.slope_angle = 95.0;
        assert!(store.push(s, true).is_err());
    }

    #[test]
    fn range_error_names_first_bad_field() {
        assert_eq!(flat_site(RegionId(0)).range_error(), None);
        let nan = SiteState { living_biomass: f64::NAN, ..flat_site(RegionId(0)) };
        assert!(nan.range_error().unwrap().contains("living_biomass"));
        let both = SiteState { dry_days: -2.0, slope_angle: 120.0, ..flat_site(RegionId(0)) };
        assert!(both.range_error().unwrap().starts_with("dry_days"));
    }

    #[test]
    fn update_overwrites_yearly_state() {
        let mut store = SiteStore::new();
        let s = store.push(flat_site(RegionId(0)), true).unwrap();
        store.update(s, 30.0, 12.0, 450.0).unwrap();
        let st = store.state(s);
        assert_eq!(st.dry_days, 30.0);
        assert_eq!(st.slope_angle, 12.0);
        assert_eq!(st.living_biomass, 450.0);
        assert!(store.update(s, 30.0, 12.0, -1.0).is_err());
        assert!(store.update(SiteId(9), 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn living_biomass_sums_wood_and_leaf() {
        let cohorts = [
            Cohort { species: SpeciesId(0), age: 10, wood_biomass: 120.0, leaf_biomass: 30.0 },
            Cohort { species: SpeciesId(1), age: 3,  wood_biomass: 5.5,   leaf_biomass: 4.5 },
        ];
        approx::assert_relative_eq!(living_biomass(&cohorts), 160.0);
        assert_eq!(living_biomass(&[]), 0.0);
    }
}

// ── Tolerance tables ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tolerance {
    use crate::{SufficientLight, SufficientLightTable, WetnessTable, WetnessTolerance};

    #[test]
    fn shade_class_bounds() {
        assert!(SufficientLight::new(0, [0.0; 6]).is_err());
        assert!(SufficientLight::new(6, [0.0; 6]).is_err());
        assert!(SufficientLight::new(5, [0.0; 6]).is_ok());
    }

    #[test]
    fn light_probability_out_of_range_rejected() {
        assert!(SufficientLight::new(2, [1.0, 0.5, 1.2, 0.0, 0.0, 0.0]).is_err());
        assert!(SufficientLight::new(2, [1.0, -0.1, 0.0, 0.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn light_table_lookup() {
        let rows = [
            SufficientLight::new(1, [1.0, 0.5, 0.25, 0.0, 0.0, 0.0]).unwrap(),
            SufficientLight::new(3, [0.5, 1.0, 1.0, 0.5, 0.25, 0.0]).unwrap(),
        ];
        let t = SufficientLightTable::from_rows(rows).unwrap();
        assert_eq!(t.probability(1, 1), Some(0.5));
        assert_eq!(t.probability(3, 4), Some(0.25));
        assert_eq!(t.probability(3, 6), None);
        assert!(t.get(2).is_none());
        assert!(t.get(0).is_none());
    }

    #[test]
    fn duplicate_shade_class_rejected() {
        let row = SufficientLight::new(1, [1.0; 6]).unwrap();
        assert!(SufficientLightTable::from_rows([row, row]).is_err());
    }

    #[test]
    fn wetness_classes() {
        assert!(WetnessTolerance::new(4, [0.0; 3]).is_err());
        let w = WetnessTolerance::new(2, [0.5, 1.0, 0.5]).unwrap();
        assert_eq!(w.probability(2), Some(1.0));
        assert_eq!(w.probability(0), None);
        let t = WetnessTable::from_rows([w]).unwrap();
        assert_eq!(t.get(2).unwrap().moisture_class(), 2);
        assert!(t.get(3).is_none());
    }
}

// ── Loaders ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use estab_core::Year;

    use super::*;
    use crate::{
        InputError, load_climate_reader, load_regions_reader, load_sites_reader,
        load_species_reader, load_sufficient_light_reader, load_wetness_reader,
    };

    const SPECIES_CSV: &[u8] = b"\
name,max_drought,gdd_min,gdd_max,min_january_temp\n\
abies,0.5,500,2500,-18\n\
quercus,0.3,1200,5000,-6\n\
";

    const CLIMATE_CSV: &[u8] = b"\
region,year,begin_growing,end_growing,growing_degree_days,temp_jan,temp_feb,temp_mar,temp_apr,temp_may,temp_jun,temp_jul,temp_aug,temp_sep,temp_oct,temp_nov,temp_dec\n\
ridge,2000,120,269,1800,-4.5,-3,1,6,12,17,20,19,14,8,2,-2\n\
";

    #[test]
    fn loads_species() {
        let t = load_species_reader(Cursor::new(SPECIES_CSV)).unwrap();
        assert_eq!(t.len(), 2);
        let q = t.get(t.id_of("quercus").unwrap()).unwrap();
        assert_eq!(q.min_january_temp, -6);
        assert_eq!(q.gdd_max, 5000.0);
    }

    #[test]
    fn degenerate_species_row_fails_load() {
        let bad = b"\
name,max_drought,gdd_min,gdd_max,min_january_temp\n\
flat,0.5,900,900,-10\n\
";
        let err = load_species_reader(Cursor::new(bad.as_slice())).unwrap_err();
        assert!(matches!(err, InputError::InvalidSpecies { .. }));
    }

    #[test]
    fn malformed_number_is_parse_error() {
        let bad = b"\
name,max_drought,gdd_min,gdd_max,min_january_temp\n\
abies,lots,500,2500,-18\n\
";
        let err = load_species_reader(Cursor::new(bad.as_slice())).unwrap_err();
        assert!(matches!(err, InputError::Parse(_)));
    }

    #[test]
    fn loads_regions_and_climate() {
        let regions = load_regions_reader(Cursor::new(b"name,active\nridge,true\nlake,false\n".as_slice())).unwrap();
        assert_eq!(regions.len(), 2);
        let climate = load_climate_reader(Cursor::new(CLIMATE_CSV), &regions).unwrap();
        let c = climate.get(RegionId(0), Year(2000)).unwrap();
        assert_eq!(c.begin_growing, 120);
        assert_eq!(c.end_growing, 269);
        assert_eq!(c.monthly_temp[0], -4.5);
        assert_eq!(c.monthly_temp[11], -2.0);
    }

    #[test]
    fn climate_for_unknown_region_fails() {
        let regions = RegionTable::new();
        let err = load_climate_reader(Cursor::new(CLIMATE_CSV), &regions).unwrap_err();
        assert!(matches!(err, InputError::UnknownRegion(ref n) if n == "ridge"));
    }

    #[test]
    fn loads_sites_in_row_order() {
        let regions = two_regions();
        let csv = b"\
region,active,dry_days,slope_angle,living_biomass\n\
ridge,true,12,8.5,0\n\
lake,false,0,0,2500\n\
";
        let store = load_sites_reader(Cursor::new(csv.as_slice()), &regions).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.slope_angle[0], 8.5);
        assert_eq!(store.region[1], RegionId(1));
        assert!(!store.active[1]);
    }

    #[test]
    fn invalid_site_row_reports_row_number() {
        let regions = two_regions();
        let csv = b"\
region,active,dry_days,slope_angle,living_biomass\n\
ridge,true,12,8.5,0\n\
ridge,true,-3,0,0\n\
";
        let err = load_sites_reader(Cursor::new(csv.as_slice()), &regions).unwrap_err();
        assert!(matches!(err, InputError::InvalidSite { row: 1, .. }));
    }

    #[test]
    fn loads_tolerance_tables() {
        let light = b"shade_class,p0,p1,p2,p3,p4,p5\n1,1.0,0.5,0.25,0,0,0\n5,0,0,0.5,1,1,1\n";
        let t = load_sufficient_light_reader(Cursor::new(light.as_slice())).unwrap();
        assert_eq!(t.probability(5, 5), Some(1.0));

        let wet = b"moisture_class,p1,p2,p3\n1,1,0.5,0\n";
        let w = load_wetness_reader(Cursor::new(wet.as_slice())).unwrap();
        assert_eq!(w.get(1).unwrap().probability(3), Some(0.0));

        let bad_wet = b"moisture_class,p1,p2,p3\n1,1,1.5,0\n";
        assert!(load_wetness_reader(Cursor::new(bad_wet.as_slice())).is_err());
    }
}
