pub mod simulation;
pub mod configuration;
pub mod benchmark;
#[cfg(feature = "viewer")]
pub mod visualization;

pub use simulation::states::{Particle, ParticleId, ParticleStore, Vec2};
pub use simulation::params::{SimulationParameters, CONNECTION_RADIUS};
pub use simulation::error::SimError;
pub use simulation::springs::{SpringNetwork, SpringState, SpringView, ELONGATION_EPS};
pub use simulation::forces::{DashpotDamping, Force, ForceSet, Gravity, SpringForce};
pub use simulation::integrator::{collide_with_ground, PhysicsStepper};
pub use simulation::energy::{accumulate_damp_energy, recompute_current_energy, EnergyLedger, EnergySnapshot};
pub use simulation::controller::{SimulationController, DEFAULT_SCENE};
pub use simulation::scenario::build_scenario;

pub use configuration::config::{ParametersConfig, ParticleConfig, ScenarioConfig};

#[cfg(feature = "viewer")]
pub use visualization::springsim_vis2d::run_2d;

pub use benchmark::benchmark::bench_advance_frame;
