//! Headless swarm driver
//!
//! Runs the shape-forming swarm against a scripted pointer and logs what a
//! renderer would see. `RUST_LOG=debug` adds the simulation's own summaries.

mod config;
mod pointer;

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use config::SceneConfig;
use pointer::PointerScript;
use swarm_simulation::{ornaments, ParameterStore, Swarm};

/// Number of recent ticks averaged for the timing report
const TIMING_WINDOW: usize = 120;

#[derive(Parser, Debug)]
#[command(about = "Run the particle swarm without a window")]
struct Args {
    /// Scene config (YAML); built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of frames to simulate
    #[arg(short, long)]
    frames: Option<usize>,

    /// Override the particle count
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Override the random seed
    #[arg(short, long)]
    seed: Option<u64>,
}

fn load_scene(args: &Args) -> Result<SceneConfig> {
    let mut scene = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    if let Some(frames) = args.frames {
        scene.driver.frames = frames;
    }
    if let Some(count) = args.count {
        scene.swarm.count = count;
    }
    if let Some(seed) = args.seed {
        scene.swarm.seed = Some(seed);
    }

    Ok(scene)
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let scene = load_scene(&args)?;

    log::info!("Starting swarm simulation...");

    let mut swarm = Swarm::with_config(scene.swarm.to_swarm_config()?)?;
    let store = ParameterStore::new(scene.parameters);
    let pointer = PointerScript::from_driver(&scene.driver);

    let decorations = ornaments(scene.swarm.ornaments, swarm.seed());
    log::info!("✓ Placed {} ornaments", decorations.len());

    let dt = 1.0 / scene.driver.frame_rate.max(1.0);
    let mut panel = scene.driver.panel.clone();
    panel.sort_by_key(|change| change.frame);
    let mut panel = panel.into_iter().peekable();

    let mut tick_times: VecDeque<f32> = VecDeque::with_capacity(TIMING_WINDOW);

    for frame in 0..scene.driver.frames {
        while let Some(change) = panel.next_if(|c| c.frame <= frame) {
            let params = store.modify(|p| change.apply(p));
            log::info!(
                "frame {}: panel set force={:.2} return={:.3} size={:.3}",
                frame,
                params.explosion_force,
                params.return_speed,
                params.particle_size
            );
        }

        let started = Instant::now();
        let output = swarm.tick_with_store(dt, pointer.sample(frame), &store);
        let instances = output.instances();
        let elapsed_ms = started.elapsed().as_secs_f32() * 1000.0;

        if tick_times.len() == TIMING_WINDOW {
            tick_times.pop_front();
        }
        tick_times.push_back(elapsed_ms);

        let report_every = scene.driver.report_every.max(1);
        if (frame + 1) % report_every == 0 {
            let avg_ms = tick_times.iter().sum::<f32>() / tick_times.len() as f32;
            log::info!(
                "frame {:>5}: {:>5} repelled, mean target distance {:.3}, root {:.3} rad, \
                 {} instances, {:.3} ms/tick",
                frame + 1,
                swarm.repelled_count(),
                swarm.mean_target_distance(),
                swarm.root_rotation(),
                instances.len(),
                avg_ms
            );
        }
    }

    log::info!("✓ Finished {} ticks (seed {})", swarm.tick_count(), swarm.seed());

    Ok(())
}
