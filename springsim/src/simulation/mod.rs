pub mod states;
pub mod params;
pub mod error;
pub mod springs;
pub mod forces;
pub mod integrator;
pub mod energy;
pub mod controller;
pub mod scenario;
