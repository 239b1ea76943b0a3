//! Build fully-initialized simulations from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime
//! `SimulationController`, inserting the configured particles in order so
//! springs and origin energy are set up exactly as interactive clicks would.

use log::info;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::controller::SimulationController;
use crate::simulation::error::SimError;
use crate::simulation::params::SimulationParameters;

/// Create the controller and insert every configured particle.
/// Fails with `CapacityExceeded` if the scenario lists more particles than slots.
pub fn build_scenario(cfg: ScenarioConfig) -> Result<SimulationController, SimError> {
    let parameters: SimulationParameters = cfg.parameters.into();
    let mut sim = SimulationController::new(parameters);

    for pc in &cfg.particles {
        sim.add_particle(pc.x[0], pc.x[1])?;
    }

    info!(
        "scenario built: {} particles, {} springs, capacity {}",
        sim.particle_count(),
        sim.springs().len(),
        sim.capacity()
    );
    Ok(sim)
}
