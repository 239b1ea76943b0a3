//! Simulation runtime bundle and per-frame orchestration
//!
//! `SimulationController` owns the particle store, spring network, parameters,
//! energy ledger and stepper. It is the single entry point for the input and
//! rendering collaborators:
//! - insertion, reset, pause and parameter scaling from input,
//! - `advance_frame` once per rendered frame,
//! - read accessors for particles, springs and the energy snapshot

use log::{debug, trace, warn};

use super::energy::{accumulate_damp_energy, recompute_current_energy, EnergyLedger, EnergySnapshot};
use super::error::SimError;
use super::integrator::PhysicsStepper;
use super::params::SimulationParameters;
use super::springs::{SpringNetwork, SpringView};
use super::states::{Particle, ParticleId, ParticleStore};

/// The nine particles the interactive demo starts with
pub const DEFAULT_SCENE: [(f32, f32); 9] = [
    (0.3, 0.3),
    (0.3, 0.4),
    (0.4, 0.4),
    (0.4, 0.3),
    (0.5, 0.3),
    (0.3, 0.2),
    (0.4, 0.2),
    (0.5, 0.2),
    (0.5, 0.4),
];

#[cfg_attr(feature = "viewer", derive(bevy::prelude::Resource))]
pub struct SimulationController {
    store: ParticleStore,
    springs: SpringNetwork,
    params: SimulationParameters,
    ledger: EnergyLedger,
    stepper: PhysicsStepper,
    frame: u64,
}

impl SimulationController {
    pub fn new(params: SimulationParameters) -> Self {
        Self {
            store: ParticleStore::with_capacity(params.max_particles),
            springs: SpringNetwork::new(params.max_particles, params.connection_radius),
            params,
            ledger: EnergyLedger::default(),
            stepper: PhysicsStepper::default(),
            frame: 0,
        }
    }

    /// Controller pre-populated with [`DEFAULT_SCENE`]
    pub fn with_default_scene(params: SimulationParameters) -> Result<Self, SimError> {
        let mut sim = Self::new(params);
        for (x, y) in DEFAULT_SCENE {
            sim.add_particle(x, y)?;
        }
        Ok(sim)
    }

    /// Insert a particle at rest, link it to its neighbours and credit its
    /// potential energy. At capacity nothing changes and the error is returned.
    pub fn add_particle(&mut self, x: f32, y: f32) -> Result<ParticleId, SimError> {
        let id = match self.store.add_particle(x, y) {
            Ok(id) => id,
            Err(e) => {
                warn!("rejected particle at ({x:.3}, {y:.3}): {e}");
                return Err(e);
            }
        };
        let linked = self.springs.on_particle_inserted(id, &self.store);
        self.ledger.record_insertion(&self.params, y);

        debug!("particle {id} added at ({x:.3}, {y:.3}) with {linked} springs");
        Ok(id)
    }

    /// Remove every particle and spring. The energy ledger is kept as is.
    pub fn reset(&mut self) {
        self.store.reset();
        self.springs.clear();
        debug!("simulation cleared, energy ledger kept");
    }

    pub fn toggle_pause(&mut self) {
        self.params.paused = !self.params.paused;
        debug!("paused = {}", self.params.paused);
    }

    pub fn adjust_stiffness(&mut self, factor: f32) {
        self.params.spring_stiffness *= factor;
        debug!("spring stiffness = {:.1}", self.params.spring_stiffness);
    }

    pub fn adjust_damping(&mut self, factor: f32) {
        self.params.damping *= factor;
        debug!("damping = {:.2}", self.params.damping);
    }

    /// Advance one rendered frame: `substeps` physics steps, each followed by
    /// damping bookkeeping, then a fresh current-energy total.
    /// Does nothing while paused.
    pub fn advance_frame(&mut self) {
        if self.params.paused {
            return;
        }

        let Self {
            store,
            springs,
            params,
            ledger,
            stepper,
            ..
        } = &mut *self;

        for _ in 0..params.substeps {
            stepper.step(store, springs, params, ledger);
            accumulate_damp_energy(ledger, store, springs, params, params.time_step);
        }
        recompute_current_energy(ledger, store, springs, params);

        self.frame += 1;
        trace!("frame {} energy {:?}", self.frame, self.ledger.snapshot());
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.active_particles()
    }

    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub fn particle_mass(&self) -> f32 {
        self.params.particle_mass()
    }

    pub fn spring_network(&self) -> &SpringNetwork {
        &self.springs
    }

    pub fn has_spring(&self, i: ParticleId, j: ParticleId) -> bool {
        self.springs.has_spring(i, j)
    }

    /// Active springs with their current elongation and colour state
    pub fn springs(&self) -> Vec<SpringView> {
        self.springs.springs(&self.store)
    }

    pub fn ledger(&self) -> &EnergyLedger {
        &self.ledger
    }

    pub fn energy(&self) -> EnergySnapshot {
        self.ledger.snapshot()
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn is_paused(&self) -> bool {
        self.params.paused
    }

    /// Number of frames advanced while not paused
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated time, `frame * substeps * time_step`
    pub fn elapsed(&self) -> f64 {
        self.frame as f64 * f64::from(self.params.substeps) * f64::from(self.params.time_step)
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut ParticleStore {
        &mut self.store
    }
}

impl Default for SimulationController {
    fn default() -> Self {
        Self::new(SimulationParameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::Vec2;

    #[test]
    fn advance_frame_charges_ground_impact() {
        let mut sim = SimulationController::default();
        sim.add_particle(0.6, 0.02).unwrap();
        sim.store_mut().active_particles_mut()[0].v = Vec2::new(0.0, -1.5);
        let lost_before = sim.ledger().lost;

        sim.advance_frame();

        let p = sim.particles()[0];
        assert_eq!(p.x.y, sim.params().ground_height);
        assert_eq!(p.v.y, 0.0);
        assert_eq!(sim.ledger().lost - lost_before, 0.5 * sim.particle_mass() * 1.5 * 1.5);
    }

    #[test]
    fn substeps_run_per_frame() {
        let params = SimulationParameters {
            substeps: 10,
            ..Default::default()
        };
        let mut one_frame = SimulationController::new(params.clone());
        let mut ten_frames = SimulationController::new(SimulationParameters {
            substeps: 1,
            ..params
        });
        one_frame.add_particle(0.5, 0.9).unwrap();
        ten_frames.add_particle(0.5, 0.9).unwrap();

        one_frame.advance_frame();
        for _ in 0..10 {
            ten_frames.advance_frame();
        }

        assert_eq!(one_frame.particles(), ten_frames.particles());
        assert_eq!(one_frame.frame(), 1);
        assert!((one_frame.elapsed() - ten_frames.elapsed()).abs() < 1e-9);
    }
}
