use springsim::{bench_advance_frame, build_scenario, ScenarioConfig, SimulationController};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, long, default_value = "default.yaml")]
    file_name: String,
    /// Frames to simulate when running without a window
    #[arg(long, default_value_t = 1000)]
    frames: u64,
    /// Run without opening the viewer
    #[arg(long, default_value_t = false)]
    headless: bool,
    /// Time `advance_frame` on growing lattices and exit
    #[arg(long, default_value_t = false)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn log_energy(sim: &SimulationController) {
    let e = sim.energy();
    info!(
        "frame {:6} t = {:.3}s particles = {} | origin {:.3} current {:.3} lost {:.3} damp {:.3} total {:.3} error {:.3}",
        sim.frame(),
        sim.elapsed(),
        sim.particle_count(),
        e.origin,
        e.current,
        e.lost,
        e.damp,
        e.total,
        e.error
    );
}

fn run_headless(mut sim: SimulationController, frames: u64) {
    if sim.is_paused() {
        warn!("scenario starts paused and nothing can unpause it headless");
        log_energy(&sim);
        return;
    }

    info!("running {} frames headless", frames);
    for _ in 0..frames {
        sim.advance_frame();
        if sim.frame() % 100 == 0 {
            log_energy(&sim);
        }
    }
    log_energy(&sim);
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_advance_frame();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let sim = build_scenario(scenario_cfg)?;

    #[cfg(feature = "viewer")]
    if !args.headless {
        springsim::run_2d(sim);
        return Ok(());
    }

    #[cfg(not(feature = "viewer"))]
    if !args.headless {
        info!("built without the `viewer` feature, running headless");
    }

    run_headless(sim, args.frames);
    Ok(())
}
