//! Spring topology between particles
//!
//! `SpringNetwork` is a symmetric rest-length matrix indexed by particle id.
//! A zero entry means "no spring". Links are only created when a particle is
//! inserted; after that the matrix changes only through `clear`.

use super::states::{ParticleId, ParticleStore};

/// Elongations within `±ELONGATION_EPS` count as neither stretched nor compressed
pub const ELONGATION_EPS: f32 = 1e-5;

/// Direction a spring is currently deformed in, used for colour coding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpringState {
    Elongating,
    Compressing,
    Neutral,
}

impl SpringState {
    pub fn classify(elongation: f32) -> Self {
        if elongation > ELONGATION_EPS {
            SpringState::Elongating
        } else if elongation < -ELONGATION_EPS {
            SpringState::Compressing
        } else {
            SpringState::Neutral
        }
    }
}

/// One active spring as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringView {
    pub i: ParticleId,
    pub j: ParticleId,
    pub rest_length: f32,
    pub length: f32, // current distance between the endpoints
    pub elongation: f32, // length - rest_length
    pub state: SpringState,
}

#[derive(Debug, Clone)]
pub struct SpringNetwork {
    capacity: usize,
    rest_length: Vec<f32>, // row-major capacity x capacity
    connection_radius: f32,
}

impl SpringNetwork {
    pub fn new(capacity: usize, connection_radius: f32) -> Self {
        Self {
            capacity,
            rest_length: vec![0.0; capacity * capacity],
            connection_radius,
        }
    }

    pub fn connection_radius(&self) -> f32 {
        self.connection_radius
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Natural length of the spring between `i` and `j`, 0 when unlinked
    /// or when either index is out of range
    pub fn rest_length(&self, i: ParticleId, j: ParticleId) -> f32 {
        if i >= self.capacity || j >= self.capacity {
            return 0.0;
        }
        self.rest_length[i * self.capacity + j]
    }

    pub fn has_spring(&self, i: ParticleId, j: ParticleId) -> bool {
        self.rest_length(i, j) != 0.0
    }

    fn set_rest_length(&mut self, i: ParticleId, j: ParticleId, length: f32) {
        self.rest_length[i * self.capacity + j] = length;
        self.rest_length[j * self.capacity + i] = length;
    }

    /// Link `new_id` to every earlier particle closer than the connection radius.
    /// The rest length is the distance at insertion time. Returns the number of links made.
    pub fn on_particle_inserted(&mut self, new_id: ParticleId, store: &ParticleStore) -> usize {
        let particles = store.active_particles();
        let Some(new_particle) = particles.get(new_id) else {
            return 0;
        };

        let mut linked = 0;
        for (i, other) in particles[..new_id].iter().enumerate() {
            let dist = (new_particle.x - other.x).norm();
            if dist < self.connection_radius {
                self.set_rest_length(i, new_id, dist);
                linked += 1;
            }
        }
        linked
    }

    pub fn clear(&mut self) {
        self.rest_length.fill(0.0);
    }

    /// Springs among the first `n` particles, each unordered pair once with `i < j`
    pub fn pairs(&self, n: usize) -> impl Iterator<Item = (ParticleId, ParticleId, f32)> + '_ {
        let n = n.min(self.capacity);
        (0..n).flat_map(move |i| {
            ((i + 1)..n).filter_map(move |j| {
                let rest = self.rest_length(i, j);
                (rest != 0.0).then_some((i, j, rest))
            })
        })
    }

    /// Springs of the active particles with their current deformation
    pub fn springs(&self, store: &ParticleStore) -> Vec<SpringView> {
        let particles = store.active_particles();
        self.pairs(particles.len())
            .map(|(i, j, rest_length)| {
                let length = (particles[i].x - particles[j].x).norm();
                let elongation = length - rest_length;
                SpringView {
                    i,
                    j,
                    rest_length,
                    length,
                    elongation,
                    state: SpringState::classify(elongation),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_symmetric_threshold() {
        assert_eq!(SpringState::classify(1e-3), SpringState::Elongating);
        assert_eq!(SpringState::classify(-1e-3), SpringState::Compressing);
        assert_eq!(SpringState::classify(5e-6), SpringState::Neutral);
        assert_eq!(SpringState::classify(-5e-6), SpringState::Neutral);
    }

    #[test]
    fn pairs_lists_each_spring_once() {
        let mut store = ParticleStore::with_capacity(4);
        let mut net = SpringNetwork::new(4, 0.142);
        for (x, y) in [(0.3, 0.3), (0.3, 0.4), (0.4, 0.4)] {
            let id = store.add_particle(x, y).unwrap();
            net.on_particle_inserted(id, &store);
        }

        let pairs: Vec<_> = net.pairs(store.len()).map(|(i, j, _)| (i, j)).collect();
        // (0,2) is sqrt(0.02) ~ 0.1414 apart, just inside the radius
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn out_of_range_indices_have_no_spring() {
        let net = SpringNetwork::new(2, 0.142);
        assert!(!net.has_spring(0, 5));
        assert_eq!(net.rest_length(7, 1), 0.0);
    }
}
