//! Force contributors for the mass-spring engine
//!
//! Defines the `Force` trait and the three terms the stepper uses:
//! constant gravity, Hooke springs and axial (dashpot) damping

use super::params::SimulationParameters;
use super::springs::SpringNetwork;
use super::states::{Particle, Vec2};

/// Collection of force terms (gravity, springs, damping, ...)
/// Each term implements [`Force`] and their contributions are summed
/// into a single force vector per particle
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Gravity, springs and damping, in that order
    pub fn standard() -> Self {
        Self::new().with(Gravity).with(SpringForce).with(DashpotDamping)
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total forces for all `particles`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_forces(
        &self,
        particles: &[Particle],
        springs: &SpringNetwork,
        params: &SimulationParameters,
        out: &mut [Vec2],
    ) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = Vec2::zeros();
        }
        for term in &self.terms {
            term.force(particles, springs, params, out);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Trait for force sources operating on the active particles
/// Implementations add their contribution into `out[i]` for each particle
pub trait Force {
    fn force(
        &self,
        particles: &[Particle],
        springs: &SpringNetwork,
        params: &SimulationParameters,
        out: &mut [Vec2],
    );
}

/// Unit vector along `d`, or zero when the endpoints coincide
pub fn spring_axis(d: Vec2) -> Vec2 {
    d.try_normalize(0.0).unwrap_or_else(Vec2::zeros)
}

/// Uniform gravity, `m * g` on every particle
pub struct Gravity;

impl Force for Gravity {
    fn force(
        &self,
        particles: &[Particle],
        _springs: &SpringNetwork,
        params: &SimulationParameters,
        out: &mut [Vec2],
    ) {
        let weight = params.gravity * params.particle_mass();
        for f in out.iter_mut().take(particles.len()) {
            *f += weight;
        }
    }
}

/// Linear springs pulling each pair back towards its rest length
pub struct SpringForce;

impl Force for SpringForce {
    fn force(
        &self,
        particles: &[Particle],
        springs: &SpringNetwork,
        params: &SimulationParameters,
        out: &mut [Vec2],
    ) {
        let n = particles.len();
        for i in 0..n {
            for j in 0..n {
                if i == j || !springs.has_spring(i, j) {
                    continue;
                }
                // x_ij points from j to i, so a stretched spring pushes i back along -x_ij
                let x_ij = particles[i].x - particles[j].x;
                let elongation = x_ij.norm() - springs.rest_length(i, j);
                out[i] += -params.spring_stiffness * elongation * spring_axis(x_ij);
            }
        }
    }
}

/// Dashpot damping: opposes only the relative velocity along the spring axis
pub struct DashpotDamping;

impl Force for DashpotDamping {
    fn force(
        &self,
        particles: &[Particle],
        springs: &SpringNetwork,
        params: &SimulationParameters,
        out: &mut [Vec2],
    ) {
        let n = particles.len();
        for i in 0..n {
            for j in 0..n {
                if i == j || !springs.has_spring(i, j) {
                    continue;
                }
                let d = spring_axis(particles[i].x - particles[j].x);
                let v_ij = particles[i].v - particles[j].v;
                out[i] += -params.damping * d * v_ij.dot(&d);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::ParticleStore;

    fn linked_pair(a: (f32, f32), b: (f32, f32)) -> (ParticleStore, SpringNetwork) {
        let mut store = ParticleStore::with_capacity(2);
        let mut net = SpringNetwork::new(2, 0.142);
        for (x, y) in [a, b] {
            let id = store.add_particle(x, y).unwrap();
            net.on_particle_inserted(id, &store);
        }
        (store, net)
    }

    #[test]
    fn coincident_particles_give_zero_axis() {
        assert_eq!(spring_axis(Vec2::zeros()), Vec2::zeros());

        let (mut store, net) = linked_pair((0.3, 0.3), (0.3, 0.4));
        let p0 = store.active_particles()[0];
        store.active_particles_mut()[1].x = p0.x;
        store.active_particles_mut()[1].v = Vec2::new(0.0, 1.0);

        let params = SimulationParameters::default();
        let mut out = vec![Vec2::zeros(); 2];
        SpringForce.force(store.active_particles(), &net, &params, &mut out);
        DashpotDamping.force(store.active_particles(), &net, &params, &mut out);
        assert_eq!(out, vec![Vec2::zeros(); 2]);
    }

    #[test]
    fn damping_ignores_tangential_motion() {
        let (mut store, net) = linked_pair((0.3, 0.3), (0.3, 0.4));
        // spring axis is vertical, give particle 0 a purely horizontal velocity
        store.active_particles_mut()[0].v = Vec2::new(2.0, 0.0);

        let mut out = vec![Vec2::zeros(); 2];
        DashpotDamping.force(store.active_particles(), &net, &SimulationParameters::default(), &mut out);
        assert!(out[0].norm() < 1e-6);
        assert!(out[1].norm() < 1e-6);
    }

    #[test]
    fn damping_opposes_axial_separation() {
        let (mut store, net) = linked_pair((0.3, 0.3), (0.3, 0.4));
        store.active_particles_mut()[0].v = Vec2::new(0.0, -1.0);

        let params = SimulationParameters::default();
        let mut out = vec![Vec2::zeros(); 2];
        DashpotDamping.force(store.active_particles(), &net, &params, &mut out);

        // particle 0 moves away from 1, so it is pulled up and 1 is pulled down
        assert!((out[0].y - params.damping).abs() < 1e-3);
        assert!((out[1].y + params.damping).abs() < 1e-3);
    }

    #[test]
    fn stretched_spring_pulls_endpoints_together() {
        let (mut store, net) = linked_pair((0.3, 0.3), (0.3, 0.4));
        store.active_particles_mut()[1].x.y = 0.45;

        let mut params = SimulationParameters::default();
        params.spring_stiffness = 100.0;
        let mut out = vec![Vec2::zeros(); 2];
        SpringForce.force(store.active_particles(), &net, &params, &mut out);

        assert!(out[0].y > 0.0);
        assert!(out[1].y < 0.0);
        assert!((out[0] + out[1]).norm() < 1e-4, "spring forces are not equal and opposite");
        assert!((out[0].y - 5.0).abs() < 1e-3);
    }
}
