//! Brute-force approximate Voronoi rasterization.
//!
//! Instead of exact bisector geometry, every pixel searches its own grid
//! cell and the 8 neighboring cells for the nearest site, with each
//! neighbor distance perturbed by signed noise so the cell boundaries come
//! out wavy. A pixel whose best and second-best distances nearly tie is
//! painted as border. Cheap, independent of the mesh path, and good
//! enough for previews.

use glam::Vec2;
use image::{Rgb, RgbImage};
use rand::Rng;

use crate::generation::PatchParams;
use crate::sampling::{NoiseField, SiteGrid};

const BORDER_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const SITE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const GRID_EDGE_COLOR: Rgb<u8> = Rgb([128, 128, 128]);

/// Search offsets around a pixel's own cell, diagonals included
const NEIGHBORS_8: [(isize, isize); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Render the approximate Voronoi preview of a site grid.
///
/// Cells on the grid border get a fixed neutral color; every site and its
/// 8 surrounding pixels are overdrawn as a debug marker. The RNG supplies
/// the per-sample noise jitter, so a seeded RNG reproduces the image
/// exactly.
pub fn raster_preview(
    grid: &SiteGrid,
    params: &PatchParams,
    noise: &NoiseField,
    rng: &mut impl Rng,
) -> RgbImage {
    let dim = grid.dim();
    let (cell_w, cell_h) = grid.cell_size();
    let (width, height) = (params.width, params.height);

    let cell_colors = cell_palette(dim);
    let mut image = RgbImage::new(width, height);

    for x in 0..width {
        for y in 0..height {
            let col = (x / cell_w) as usize;
            let row = (y / cell_h) as usize;
            let current = Vec2::new(x as f32, y as f32);

            let mut closest = grid.get(row, col).distance(current);
            let mut color = cell_colors[row * dim + col];
            let mut distances = Vec::with_capacity(9);
            distances.push(closest);

            for (dx, dy) in NEIGHBORS_8 {
                let nc = col as isize + dx;
                let nr = row as isize + dy;
                if nr < 0 || nr >= dim as isize || nc < 0 || nc >= dim as isize {
                    continue;
                }
                let (nr, nc) = (nr as usize, nc as usize);

                let jitter_x = rng.random_range(1.0f32..10.0);
                let jitter_y = rng.random_range(1.0f32..10.0);
                let mut distance = grid.get(nr, nc).distance(current);
                distance += noise.sample_signed(
                    jitter_x + x as f32 / width as f32 * params.scale,
                    jitter_y + y as f32 / height as f32 * params.scale,
                );

                distances.push(distance);
                if distance < closest {
                    closest = distance;
                    color = cell_colors[nr * dim + nc];
                }
            }

            // Near-tie with the runner-up means we sit on a cell boundary.
            for d in distances {
                let delta = (d - closest).abs();
                if delta > 0.0 && delta < params.border_delta {
                    color = BORDER_COLOR;
                    break;
                }
            }

            image.put_pixel(x, y, color);
        }
    }

    mark_sites(&mut image, grid);
    image
}

/// One hue per cell, neutral gray for the grid border ring
fn cell_palette(dim: usize) -> Vec<Rgb<u8>> {
    let mut colors = Vec::with_capacity(dim * dim);
    for row in 0..dim {
        for col in 0..dim {
            let index = row * dim + col;
            let hue = (index as f32 / (dim * dim) as f32 + 0.1).fract();
            let color = if row == 0 || col == 0 || row == dim - 1 || col == dim - 1 {
                GRID_EDGE_COLOR
            } else {
                hsv_to_rgb(hue, 1.0, 0.7)
            };
            colors.push(color);
        }
    }
    colors
}

/// Overdraw each site plus its 8 surrounding pixels as a debug marker
fn mark_sites(image: &mut RgbImage, grid: &SiteGrid) {
    let (width, height) = image.dimensions();
    for site in grid.sites() {
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                let px = site.x as isize + dx;
                let py = site.y as isize + dy;
                if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                    image.put_pixel(px as u32, py as u32, SITE_COLOR);
                }
            }
        }
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb<u8> {
    let h = h.rem_euclid(1.0) * 6.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match i as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb([(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8])
}
