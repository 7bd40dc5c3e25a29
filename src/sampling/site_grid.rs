//! Jittered-grid site sampling

use glam::Vec2;
use rand::Rng;

use crate::core::{Error, Result};

/// N×N grid of Voronoi sites over a W×H canvas, one site per cell.
///
/// Cells tile the canvas without gaps or overlap; remainder pixels at the
/// far edge are absorbed into the last row/column. Sites are stored
/// row-major, so the flattened site index coincides with the grid-cell
/// index `row * dim + col` used by region selection.
#[derive(Clone, Debug)]
pub struct SiteGrid {
    dim: usize,
    cell_width: u32,
    cell_height: u32,
    points: Vec<Vec2>,
}

impl SiteGrid {
    /// Draw one random site per grid cell.
    ///
    /// The grid dimension is `ceil(sqrt(target_sites))`. Each site is an
    /// integer-coordinate point uniform within its cell, exclusive of the
    /// cell's max edge so neighboring cells never alias.
    pub fn sample(width: u32, height: u32, target_sites: u32, rng: &mut impl Rng) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "canvas dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if target_sites < 1 {
            return Err(Error::InvalidConfiguration(
                "target site count must be at least 1".to_string(),
            ));
        }

        let dim = (target_sites as f32).sqrt().ceil() as usize;
        let cell_width = width.div_ceil(dim as u32);
        let cell_height = height.div_ceil(dim as u32);

        let mut points = Vec::with_capacity(dim * dim);
        for row in 0..dim {
            for col in 0..dim {
                let col_min = cell_width * col as u32;
                let col_max = cell_width * (col as u32 + 1) - 1;
                let row_min = cell_height * row as u32;
                let row_max = cell_height * (row as u32 + 1) - 1;

                let x = range_or_min(rng, col_min, col_max);
                let y = range_or_min(rng, row_min, row_max);
                points.push(Vec2::new(x as f32, y as f32));
            }
        }

        Ok(Self {
            dim,
            cell_width,
            cell_height,
            points,
        })
    }

    /// Grid dimension N (the grid is N×N)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Cell size in pixels as (width, height)
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Site position for a grid cell
    pub fn get(&self, row: usize, col: usize) -> Vec2 {
        self.points[row * self.dim + col]
    }

    /// All sites in row-major order
    pub fn sites(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Uniform draw in [min, max), tolerating the degenerate single-pixel cell
fn range_or_min(rng: &mut impl Rng, min: u32, max: u32) -> u32 {
    if max <= min {
        min
    } else {
        rng.random_range(min..max)
    }
}
