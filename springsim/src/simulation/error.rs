//! Error types for the simulation core.

use std::fmt;

/// Errors surfaced by the simulation to its callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// Insertion attempted while every particle slot is in use.
    CapacityExceeded { capacity: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::CapacityExceeded { capacity } => {
                write!(f, "particle capacity exceeded: all {} slots are in use", capacity)
            }
        }
    }
}

impl std::error::Error for SimError {}
