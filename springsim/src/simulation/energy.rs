//! Mechanical energy bookkeeping
//!
//! The ledger reconciles the energy put in at insertion time against what is
//! currently in the system plus what damping and ground impacts took out:
//!
//!   origin ≈ current + lost + damp
//!
//! `current` is recomputed from scratch every frame. The other three only grow.

use super::forces::{DashpotDamping, Force};
use super::params::SimulationParameters;
use super::springs::SpringNetwork;
use super::states::{ParticleStore, Vec2};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyLedger {
    pub origin: f32, // potential energy of every particle at its drop height
    pub current: f32, // potential + kinetic + spring, recomputed each frame
    pub lost: f32, // vertical kinetic energy absorbed by the ground
    pub damp: f32, // work done by damping forces
}

/// Values shown in the overlay, including the derived total and error
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergySnapshot {
    pub origin: f32,
    pub current: f32,
    pub lost: f32,
    pub damp: f32,
    pub total: f32, // current + lost + damp
    pub error: f32, // origin - total
}

impl EnergyLedger {
    pub fn snapshot(&self) -> EnergySnapshot {
        let total = self.current + self.lost + self.damp;
        EnergySnapshot {
            origin: self.origin,
            current: self.current,
            lost: self.lost,
            damp: self.damp,
            total,
            error: self.origin - total,
        }
    }

    /// Gravitational potential of a particle at height `y`, zero at `y = 0`
    pub fn potential(params: &SimulationParameters, y: f32) -> f32 {
        -params.particle_mass() * params.gravity.y * y
    }

    /// Credit a newly inserted particle resting at height `y`
    pub fn record_insertion(&mut self, params: &SimulationParameters, y: f32) {
        self.origin += Self::potential(params, y);
    }
}

/// Recompute `ledger.current` from particle heights, speeds and spring deformation.
/// Each spring is counted once.
pub fn recompute_current_energy(
    ledger: &mut EnergyLedger,
    store: &ParticleStore,
    springs: &SpringNetwork,
    params: &SimulationParameters,
) {
    let mass = params.particle_mass();
    let particles = store.active_particles();

    ledger.current = 0.0;
    for p in particles {
        ledger.current += EnergyLedger::potential(params, p.x.y);
        ledger.current += 0.5 * mass * p.v.norm_squared();
    }
    for (i, j, rest) in springs.pairs(particles.len()) {
        let elongation = (particles[i].x - particles[j].x).norm() - rest;
        ledger.current += 0.5 * params.spring_stiffness * elongation * elongation;
    }
}

/// Add this step's damping work to `ledger.damp`.
///
/// Uses the magnitude of `F_damp · v` per particle, evaluated on the
/// post-step state, so it only approximates the work the stepper applied.
pub fn accumulate_damp_energy(
    ledger: &mut EnergyLedger,
    store: &ParticleStore,
    springs: &SpringNetwork,
    params: &SimulationParameters,
    dt: f32,
) {
    let particles = store.active_particles();
    let mut damping_forces = vec![Vec2::zeros(); particles.len()];
    DashpotDamping.force(particles, springs, params, &mut damping_forces);

    for (p, f) in particles.iter().zip(damping_forces.iter()) {
        ledger.damp += (f.dot(&p.v) * dt).abs();
    }
}
