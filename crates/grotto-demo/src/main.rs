//! Demo binary that generates a grid of regions and reports cave-floor
//! statistics.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Run with `cargo run -p grotto-demo -- --seed 42 --grid 8`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use glam::IVec3;
use grotto_config::{CliArgs, Config};
use grotto_facet::Pipeline;
use grotto_region::Region3;
use grotto_worldgen::{
    AsyncRegionGenerator, CaveFloorProvider, CaveGenerator, CaveParams, CaveProvider, FloorParams,
};
use tracing::info;

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(|| PathBuf::from("."));
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}; falling back to defaults");
            Config::default()
        }
    };
    config.apply_cli_overrides(&args);

    grotto_log::init_logging(Some(&config));
    info!(
        seed = config.world.seed,
        grid = args.grid,
        region_size = config.world.region_size,
        "starting grotto demo"
    );

    let pipeline = build_pipeline(&config);
    let generator = AsyncRegionGenerator::with_defaults(Arc::new(pipeline));

    // Regions span the full cave band plus a margin of guaranteed-solid rock,
    // so in-band cavities always find a floor somewhere in the grid column.
    let size = config.world.region_size as i32;
    let min_y = config.caves.floor_y - 16;
    let height = config.caves.ceiling_y + 16 - min_y;

    let mut pending: Vec<Region3> = Vec::new();
    for gx in 0..args.grid as i32 {
        for gz in 0..args.grid as i32 {
            pending.push(Region3::from_min_size(
                IVec3::new(gx * size, min_y, gz * size),
                IVec3::new(size, height, size),
            ));
        }
    }
    let total = pending.len();

    let mut completed = Vec::with_capacity(total);
    while completed.len() < total {
        while let Some(region) = pending.pop() {
            if let Err(rejected) = generator.submit(region) {
                // Queue full; keep it for the next round.
                pending.push(rejected);
                break;
            }
        }
        completed.extend(generator.drain_results());
        if completed.len() < total {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
    }

    report(&completed);
}

fn build_pipeline(config: &Config) -> Pipeline {
    let carver = CaveGenerator::new(CaveParams {
        seed: config.world.seed,
        threshold: config.caves.threshold,
        octaves: config.caves.octaves,
        frequency: config.caves.frequency,
        lacunarity: config.caves.lacunarity,
        persistence: config.caves.persistence,
        floor_y: config.caves.floor_y,
        ceiling_y: config.caves.ceiling_y,
        edge_taper: config.caves.edge_taper,
    });
    Pipeline::new(vec![
        Box::new(CaveProvider::new(carver)),
        Box::new(CaveFloorProvider::new(FloorParams {
            density: config.floor.density,
        })),
    ])
    .expect("cave followed by cave_floor satisfies every requirement")
}

fn report(completed: &[grotto_worldgen::GeneratedRegion]) {
    let mut total_columns = 0usize;
    let mut floored = 0usize;
    let mut lowest: Option<i32> = None;
    let mut highest: Option<i32> = None;
    let mut total_us = 0u64;

    for generated in completed {
        let floor = generated
            .facets
            .cave_floor()
            .expect("pipeline produces a floor facet");
        total_columns += generated.region.column_count() as usize;
        floored += floor.floor_count();
        for (x, z) in generated.region.columns() {
            if let Some(y) = floor.floor_world(x, z) {
                lowest = Some(lowest.map_or(y, |v| v.min(y)));
                highest = Some(highest.map_or(y, |v| v.max(y)));
            }
        }
        total_us += generated.generation_time_us;
    }

    info!(
        regions = completed.len(),
        columns = total_columns,
        floored,
        deferred = total_columns - floored,
        "generation complete"
    );
    if let (Some(lowest), Some(highest)) = (lowest, highest) {
        info!(lowest, highest, "cave floor height range");
    }
    info!(worker_time_ms = total_us / 1000, "aggregate generation time");
}
