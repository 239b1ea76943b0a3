//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`ParticleConfig`]   – drop position of each initial particle
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every parameter may be omitted, missing fields take the values of the
//! interactive demo.
//!
//! # YAML format
//! An example scenario matching these types:
//!
//! ```yaml
//! parameters:
//!   max_particles: 9        # store capacity
//!   total_mass: 9.0         # split evenly over all slots
//!   connection_radius: 0.142
//!   spring_stiffness: 1000.0
//!   damping: 20.0
//!   gravity: [0.0, -9.8]
//!   ground_height: 0.05
//!   time_step: 1.0e-3
//!   substeps: 1             # physics steps per frame
//!   paused: false
//!
//! particles:
//!   - x: [0.3, 0.3]
//!   - x: [0.3, 0.4]
//! ```
//!
//! [`crate::simulation::scenario`] maps this into a `SimulationController`.

use serde::Deserialize;

use crate::simulation::params::SimulationParameters;
use crate::simulation::states::Vec2;

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub max_particles: usize,   // capacity of the particle store
    pub total_mass: f32,        // mass shared by all slots
    pub connection_radius: f32, // springs form below this distance at insertion
    pub spring_stiffness: f32,  // Hooke constant
    pub damping: f32,           // axial damping coefficient
    pub gravity: [f32; 2],      // constant acceleration
    pub ground_height: f32,     // y of the ground plane
    pub time_step: f32,         // fixed step size
    pub substeps: u32,          // physics steps per rendered frame
    pub paused: bool,           // start paused
}

impl Default for ParametersConfig {
    fn default() -> Self {
        SimulationParameters::default().into()
    }
}

impl From<SimulationParameters> for ParametersConfig {
    fn from(p: SimulationParameters) -> Self {
        Self {
            max_particles: p.max_particles,
            total_mass: p.total_mass,
            connection_radius: p.connection_radius,
            spring_stiffness: p.spring_stiffness,
            damping: p.damping,
            gravity: [p.gravity.x, p.gravity.y],
            ground_height: p.ground_height,
            time_step: p.time_step,
            substeps: p.substeps,
            paused: p.paused,
        }
    }
}

impl From<ParametersConfig> for SimulationParameters {
    fn from(c: ParametersConfig) -> Self {
        Self {
            max_particles: c.max_particles,
            total_mass: c.total_mass,
            connection_radius: c.connection_radius,
            spring_stiffness: c.spring_stiffness,
            damping: c.damping,
            gravity: Vec2::new(c.gravity[0], c.gravity[1]),
            ground_height: c.ground_height,
            time_step: c.time_step,
            substeps: c.substeps,
            paused: c.paused,
        }
    }
}

/// Configuration for a single particle's drop position
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ParticleConfig {
    pub x: [f32; 2], // initial position, the particle starts at rest
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    #[serde(default)]
    pub particles: Vec<ParticleConfig>, // Particles inserted in order when the scenario is built
}
