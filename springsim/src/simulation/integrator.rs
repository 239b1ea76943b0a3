//! Fixed-step time integrator for the mass-spring system
//!
//! One step is: settle ground penetration, accumulate forces, semi-implicit
//! Euler update, resolve ground collisions. Loops run in ascending index
//! order so identical inputs reproduce identical floating-point results.

use super::energy::EnergyLedger;
use super::forces::ForceSet;
use super::params::SimulationParameters;
use super::springs::SpringNetwork;
use super::states::{ParticleStore, Vec2};

/// Advances a `ParticleStore` by one `time_step` using a `ForceSet`.
/// Keeps its force buffer between steps.
pub struct PhysicsStepper {
    forces: ForceSet,
    buffer: Vec<Vec2>,
}

impl PhysicsStepper {
    pub fn new(forces: ForceSet) -> Self {
        Self {
            forces,
            buffer: Vec::new(),
        }
    }

    /// Advance all active particles by `params.time_step`.
    /// Ground impacts are charged to `ledger.lost`.
    pub fn step(
        &mut self,
        store: &mut ParticleStore,
        springs: &SpringNetwork,
        params: &SimulationParameters,
        ledger: &mut EnergyLedger,
    ) {
        let n = store.len();
        if n == 0 { // no particles, return
            return;
        }

        // A particle that starts the step under the ground lands first,
        // so the impact is charged with the velocity it arrived with
        collide_with_ground(store, params, ledger);

        self.buffer.resize(n, Vec2::zeros());
        self.forces
            .accumulate_forces(store.active_particles(), springs, params, &mut self.buffer);

        let dt = params.time_step;
        let inv_mass = params.particle_mass().recip();

        // Kick: v_n+1 = v_n + dt * F_n / m
        for (p, f) in store.active_particles_mut().iter_mut().zip(self.buffer.iter()) {
            p.v += dt * inv_mass * *f;
        }

        // Drift: x_n+1 = x_n + dt * v_n+1, resting particles cannot move downwards
        for p in store.active_particles_mut() {
            if p.x.y <= params.ground_height {
                p.v.y = 0.0;
            }
            p.x += dt * p.v;
        }

        collide_with_ground(store, params, ledger);
    }
}

impl Default for PhysicsStepper {
    fn default() -> Self {
        Self::new(ForceSet::standard())
    }
}

/// Clamp particles below the ground plane back onto it.
/// A downward vertical velocity is absorbed completely and its kinetic
/// energy added to `ledger.lost`. Horizontal velocity is untouched.
pub fn collide_with_ground(
    store: &mut ParticleStore,
    params: &SimulationParameters,
    ledger: &mut EnergyLedger,
) {
    let mass = params.particle_mass();
    for p in store.active_particles_mut() {
        if p.x.y < params.ground_height {
            p.x.y = params.ground_height;
            if p.v.y < 0.0 {
                ledger.lost += 0.5 * mass * p.v.y * p.v.y;
                p.v.y = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(x: f32, y: f32) -> (ParticleStore, SpringNetwork, SimulationParameters) {
        let params = SimulationParameters::default();
        let mut store = ParticleStore::with_capacity(params.max_particles);
        store.add_particle(x, y).unwrap();
        let springs = SpringNetwork::new(params.max_particles, params.connection_radius);
        (store, springs, params)
    }

    #[test]
    fn free_particle_follows_semi_implicit_euler() {
        let (mut store, springs, params) = single(0.5, 0.8);
        let mut ledger = EnergyLedger::default();
        let mut stepper = PhysicsStepper::default();

        stepper.step(&mut store, &springs, &params, &mut ledger);

        let p = store.active_particles()[0];
        let dt = params.time_step;
        assert!((p.v.y - (-9.8 * dt)).abs() < 1e-7);
        assert!((p.x.y - (0.8 - 9.8 * dt * dt)).abs() < 1e-6);
        assert_eq!(p.x.x, 0.5);
    }

    #[test]
    fn resting_particle_stays_on_ground() {
        let ground = SimulationParameters::default().ground_height;
        let (mut store, springs, params) = single(0.5, ground);
        let mut ledger = EnergyLedger::default();
        let mut stepper = PhysicsStepper::default();

        for _ in 0..100 {
            stepper.step(&mut store, &springs, &params, &mut ledger);
        }

        let p = store.active_particles()[0];
        assert_eq!(p.x.y, params.ground_height);
        assert_eq!(p.v.y, 0.0);
        assert_eq!(ledger.lost, 0.0);
    }

    #[test]
    fn penetrating_particle_loses_its_vertical_energy() {
        let (mut store, springs, params) = single(0.5, 0.01);
        store.active_particles_mut()[0].v = Vec2::new(0.7, -2.0);
        let mut ledger = EnergyLedger::default();
        let mut stepper = PhysicsStepper::default();

        stepper.step(&mut store, &springs, &params, &mut ledger);

        let p = store.active_particles()[0];
        assert_eq!(p.x.y, params.ground_height);
        assert_eq!(p.v.y, 0.0);
        assert_eq!(p.v.x, 0.7);
        assert_eq!(ledger.lost, 0.5 * params.particle_mass() * 2.0 * 2.0);
    }

    #[test]
    fn collision_ignores_upward_velocity() {
        let (mut store, _springs, params) = single(0.5, 0.0);
        store.active_particles_mut()[0].v = Vec2::new(0.0, 1.0);
        let mut ledger = EnergyLedger::default();

        collide_with_ground(&mut store, &params, &mut ledger);

        let p = store.active_particles()[0];
        assert_eq!(p.x.y, params.ground_height);
        assert_eq!(p.v.y, 1.0);
        assert_eq!(ledger.lost, 0.0);
    }
}
