//! ridge — small end-to-end run of the estab seedling-establishment engine.
//!
//! Four tree species across a synthetic landscape of a dry ridge, a
//! sheltered valley, and a lakeshore that is simulated but not reported.
//! Writes `establishment_log.csv` and `year_summaries.csv` to
//! `output/ridge/`.
//!
//! ```text
//! cargo run -p ridge                      # built-in scenario
//! cargo run -p ridge -- scenario.json     # custom scenario
//! RUST_LOG=estab=debug cargo run -p ridge # per-year engine logs
//! ```

mod landscape;

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use estab_core::{EstablishParams, SimConfig, SimRng, Year};
use estab_input::{load_regions_reader, load_species_reader};
use estab_model::{EstablishmentModel, EstablishmentRecord};
use estab_output::{CsvWriter, EstablishmentLogObserver, OutputWriter};
use estab_sim::{SimBuilder, SimObserver};

use landscape::{Landscape, build_climate, build_sites};

// ── Reference data ────────────────────────────────────────────────────────────

const SPECIES_CSV: &str = "\
name,max_drought,gdd_min,gdd_max,min_january_temp\n\
abies_balsamea,0.165,560,2386,-30\n\
acer_rubrum,0.23,1260,6076,-18\n\
pinus_strobus,0.31,1100,3165,-25\n\
quercus_rubra,0.34,1100,4571,-17\n\
";

const REGIONS_CSV: &str = "\
name,active\n\
ridge,true\n\
valley,true\n\
lakeshore,false\n\
";

const DEFAULT_SCENARIO: &str = r#"{
    "sim": {
        "start_year":  1990,
        "total_years": 20,
        "seed":        42,
        "num_threads": null
    },
    "params": {
        "establish_threshold_agb":    3000.0,
        "base_prob_establish_adjust": 0.9,
        "establish_threshold_angle":  -45.0
    },
    "site_count":       400,
    "disturbance_rate": 0.02
}"#;

#[derive(Deserialize)]
struct Scenario {
    sim:              SimConfig,
    params:           EstablishParams,
    site_count:       usize,
    disturbance_rate: f64,
}

// ── Observer wrapper to print yearly progress ────────────────────────────────

struct ProgressObserver<W: OutputWriter> {
    inner:    EstablishmentLogObserver<W>,
    log_rows: usize,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: EstablishmentLogObserver<W>) -> Self {
        Self { inner, log_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_report(&mut self, year: Year, records: &[EstablishmentRecord]) {
        self.log_rows += records.len();
        let attempts: u64 = records.iter().map(|r| r.attempts).sum();
        let weighted: f64 = records
            .iter()
            .map(|r| r.avg_prob_establish * r.attempts as f64)
            .sum();
        if attempts > 0 {
            println!(
                "{year}  {:>3} rows  mean P(establish) = {:.4}",
                records.len(),
                weighted / attempts as f64
            );
        }
        self.inner.on_report(year, records);
    }

    fn on_year_end(&mut self, year: Year, evaluated: usize) {
        self.inner.on_year_end(year, evaluated);
    }

    fn on_sim_end(&mut self, final_year: Year) {
        self.inner.on_sim_end(final_year);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "estab=info,ridge=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 1. Scenario.
    let scenario: Scenario = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading scenario {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing scenario {path}"))?
        }
        None => serde_json::from_str(DEFAULT_SCENARIO).context("parsing built-in scenario")?,
    };
    let config = scenario.sim;

    println!("=== ridge: seedling establishment ===");
    println!(
        "Sites: {}  |  Years: {}..{}  |  Seed: {}",
        scenario.site_count,
        config.start_year,
        config.end_year(),
        config.seed
    );
    println!();

    // 2. Reference data.
    let species = load_species_reader(Cursor::new(SPECIES_CSV))?;
    let regions = load_regions_reader(Cursor::new(REGIONS_CSV))?;
    println!("Loaded {} species, {} regions", species.len(), regions.len());

    // 3. Synthetic landscape.
    let mut rng = SimRng::new(config.seed);
    let climate = build_climate(&regions, &config, &mut rng.child(1))?;
    let (sites, cohorts) = build_sites(&regions, &species, scenario.site_count, &mut rng.child(2))?;
    let source = Landscape::new(climate, &regions, cohorts, scenario.disturbance_rate, rng.child(3))?;

    // 4. Model and sim.
    let model = EstablishmentModel::new(species, regions, scenario.params)?;
    let mut sim = SimBuilder::new(config.clone(), model, source)
        .sites(sites)
        .build()?;

    // 5. Output.
    let out_dir = Path::new("output/ridge");
    std::fs::create_dir_all(out_dir)?;
    let writer = CsvWriter::new(out_dir)?;
    let mut obs = ProgressObserver::new(EstablishmentLogObserver::new(writer));

    // 6. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  establishment_log.csv : {} rows", obs.log_rows);
    println!("  year_summaries.csv    : {} rows", config.total_years);
    println!();

    // 7. Final-year probabilities by species and region.
    let model = &sim.model;
    println!("{:<16} {:<12} {:>6} {:>10}", "Species", "Region", "Sites", "Mean P");
    println!("{}", "-".repeat(47));
    for (sid, sp) in model.species().iter() {
        for (rid, region) in model.regions().iter() {
            let probs: Vec<f64> = sim
                .sites
                .active_sites()
                .filter(|s| sim.sites.region[s.index()] == rid)
                .filter_map(|s| sim.probability(s, sid))
                .collect();
            if probs.is_empty() {
                continue;
            }
            let mean = probs.iter().sum::<f64>() / probs.len() as f64;
            println!(
                "{:<16} {:<12} {:>6} {:>10.4}",
                sp.name,
                region.name,
                probs.len(),
                mean
            );
        }
    }

    Ok(())
}
