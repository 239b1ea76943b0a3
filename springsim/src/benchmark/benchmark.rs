use std::time::Instant;

use log::info;

use crate::simulation::controller::SimulationController;
use crate::simulation::params::SimulationParameters;

/// Spacing of the benchmark lattice, diagonals stay inside the connection radius
const GRID_SPACING: f32 = 0.1;

/// Helper to build a square lattice of `n` particles with spring links to
/// their eight neighbours
pub fn make_grid(n: usize) -> SimulationController {
    let params = SimulationParameters {
        max_particles: n,
        total_mass: n as f32, // unit particle mass at every size
        ..Default::default()
    };
    let mut sim = SimulationController::new(params);

    let side = (n as f64).sqrt().ceil() as usize;
    for i in 0..n {
        let x = 0.05 + (i % side) as f32 * GRID_SPACING;
        let y = 0.5 + (i / side) as f32 * GRID_SPACING;
        // the lattice has exactly n points, so this never fails
        if sim.add_particle(x, y).is_err() {
            break;
        }
    }
    sim
}

/// Time `advance_frame` on lattices of increasing size and log the mean frame time
pub fn bench_advance_frame() {
    let ns = [9, 64, 256, 1024];
    let frames = 200; // frames per size (tune as needed)

    for n in ns {
        let mut sim = make_grid(n);

        // Warm up
        sim.advance_frame();

        let t0 = Instant::now();
        for _ in 0..frames {
            sim.advance_frame();
        }
        let per_frame = t0.elapsed().as_secs_f64() / frames as f64;

        info!(
            "N = {:5}, springs = {:6}, frame = {:10.6} ms, energy error = {:.4}",
            n,
            sim.springs().len(),
            per_frame * 1000.0,
            sim.energy().error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_links_neighbours() {
        let sim = make_grid(9);
        assert_eq!(sim.particle_count(), 9);
        // 3x3 lattice: 12 edges + 8 diagonals
        assert_eq!(sim.springs().len(), 20);
    }
}
