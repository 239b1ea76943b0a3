//! Core state types for the mass-spring simulation.
//!
//! Defines the particle record and the fixed-capacity `ParticleStore`:
//! - `Particle` holds position and velocity as `Vec2` (2d)
//! - `ParticleStore` is contiguous storage plus a live count
//!
//! Indices handed out by the store are stable for the lifetime of a run,
//! the spring matrix relies on that.

use nalgebra::Vector2;

use super::error::SimError;

pub type Vec2 = Vector2<f32>;

/// Index of a particle inside its store, `0..count`
pub type ParticleId = usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: Vec2, // position
    pub v: Vec2, // velocity
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            x: Vec2::zeros(),
            v: Vec2::zeros(),
        }
    }
}

/// Fixed-capacity arena of particles.
///
/// Slots `[0, count)` are active. Slots past `count` keep whatever a previous
/// run left there and are never read until an insertion overwrites them.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    slots: Vec<Particle>,
    count: usize,
}

impl ParticleStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::default(); capacity],
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Append a particle at rest at `(x, y)` and return its index.
    /// Fails without touching the store when every slot is taken.
    pub fn add_particle(&mut self, x: f32, y: f32) -> Result<ParticleId, SimError> {
        if self.is_full() {
            return Err(SimError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }

        let id = self.count;
        self.slots[id] = Particle {
            x: Vec2::new(x, y),
            v: Vec2::zeros(),
        };
        self.count += 1;
        Ok(id)
    }

    /// Drop every particle. Stale slot contents are left in place.
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Read-only view of the active particles
    pub fn active_particles(&self) -> &[Particle] {
        &self.slots[..self.count]
    }

    pub(crate) fn active_particles_mut(&mut self) -> &mut [Particle] {
        &mut self.slots[..self.count]
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.active_particles().get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_appends_in_order() {
        let mut store = ParticleStore::with_capacity(3);
        assert_eq!(store.add_particle(0.1, 0.2).unwrap(), 0);
        assert_eq!(store.add_particle(0.3, 0.4).unwrap(), 1);

        assert_eq!(store.len(), 2);
        assert_eq!(store.active_particles()[1].x, Vec2::new(0.3, 0.4));
        assert_eq!(store.active_particles()[1].v, Vec2::zeros());
    }

    #[test]
    fn full_store_rejects_insertion() {
        let mut store = ParticleStore::with_capacity(1);
        store.add_particle(0.5, 0.5).unwrap();

        let err = store.add_particle(0.6, 0.6).unwrap_err();
        assert_eq!(err, SimError::CapacityExceeded { capacity: 1 });
        assert_eq!(store.len(), 1);
        assert_eq!(store.active_particles()[0].x, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn reset_reuses_slots_from_zero() {
        let mut store = ParticleStore::with_capacity(2);
        store.add_particle(0.1, 0.1).unwrap();
        store.add_particle(0.2, 0.2).unwrap();
        store.reset();

        assert!(store.is_empty());
        assert!(store.get(0).is_none());
        assert_eq!(store.add_particle(0.9, 0.9).unwrap(), 0);
    }
}
