//! Noise-weighted breadth-first region growth.
//!
//! Starting from the center cell of the N×N grid, neighbors are admitted
//! into the region when a noise sample scaled by a decaying amplitude
//! clears a fixed threshold. The amplitude decays on every evaluation, not
//! only on admission, so the region's growth probability shrinks with
//! visitation order rather than Euclidean distance, and branches that
//! wander far from the center die out naturally.

use std::collections::{HashSet, VecDeque};

use glam::Vec2;
use rand::Rng;

use crate::sampling::NoiseField;

/// Admission threshold a scaled noise sample must exceed
const ADMISSION_THRESHOLD: f32 = 0.1;

/// Starting amplitude for the noise weighting
const INITIAL_AMPLITUDE: f32 = 10.0;

/// Amplitude multiplier applied after every neighbor evaluation
const AMPLITUDE_DECAY: f32 = 0.6;

const NEIGHBORS_4: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Select the grid cells belonging to the biome region.
///
/// The returned set of flattened cell indices (`row * grid_dim + col`)
/// always contains the center cell and is connected under 4-neighbor
/// adjacency. Cells within one ring of the grid border are never admitted,
/// so downstream boundary filtering starts from a shape that cannot touch
/// the sampling grid's edge.
///
/// The RNG is consumed once per run for a noise decorrelation offset;
/// everything else is deterministic given that offset.
pub fn select_region(grid_dim: usize, noise: &NoiseField, rng: &mut impl Rng) -> HashSet<usize> {
    let n = grid_dim as isize;
    let center = (grid_dim / 2) * grid_dim + grid_dim / 2;

    let mut selected = HashSet::new();
    let mut visited = HashSet::new();
    selected.insert(center);
    visited.insert(center);

    let offset = Vec2::new(
        rng.random_range(3..20) as f32,
        rng.random_range(3..20) as f32,
    );

    let mut amplitude = INITIAL_AMPLITUDE;
    let mut queue = VecDeque::new();
    queue.push_back(center);

    while let Some(current) = queue.pop_front() {
        let cx = (current % grid_dim) as isize;
        let cy = (current / grid_dim) as isize;

        for (dx, dy) in NEIGHBORS_4 {
            let nx = cx + dx;
            let ny = cy + dy;
            // border ring stays unselectable
            if nx <= 1 || ny <= 1 || nx >= n - 1 || ny >= n - 1 {
                continue;
            }

            let next = (ny * n + nx) as usize;
            if !visited.insert(next) {
                continue;
            }

            let sample = noise.sample(
                offset.x + nx as f32 / grid_dim as f32,
                offset.y + ny as f32 / grid_dim as f32,
            ) * amplitude;
            amplitude *= AMPLITUDE_DECAY;

            if sample > ADMISSION_THRESHOLD {
                selected.insert(next);
                queue.push_back(next);
            }
        }
    }

    selected
}
