//! Numerical and physical parameters for the simulation
//!
//! `SimulationParameters` holds runtime settings:
//! - store capacity and total mass (uniform per-particle mass),
//! - spring stiffness, damping and the connection radius,
//! - gravity and the ground plane,
//! - fixed step size, substeps per frame and the pause flag

use super::states::Vec2;

/// Maximum distance at which a newly inserted particle links to existing ones
pub const CONNECTION_RADIUS: f32 = 0.142;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParameters {
    pub max_particles: usize, // store capacity
    pub total_mass: f32, // shared evenly by all slots
    pub connection_radius: f32, // spring link threshold at insertion
    pub spring_stiffness: f32, // Hooke constant
    pub damping: f32, // dashpot coefficient along the spring axis
    pub gravity: Vec2, // constant acceleration
    pub ground_height: f32, // y of the ground plane
    pub time_step: f32, // fixed dt
    pub substeps: u32, // steps per frame
    pub paused: bool,
}

impl SimulationParameters {
    /// Uniform particle mass, `total_mass / max_particles`
    pub fn particle_mass(&self) -> f32 {
        self.total_mass / self.max_particles as f32
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            max_particles: 9,
            total_mass: 9.0,
            connection_radius: CONNECTION_RADIUS,
            spring_stiffness: 1000.0,
            damping: 20.0,
            gravity: Vec2::new(0.0, -9.8),
            ground_height: 0.05,
            time_step: 1e-3,
            substeps: 1,
            paused: false,
        }
    }
}
