//! Deterministic 2D coherent-noise evaluation

use glam::Vec2;
use noise::{NoiseFn, Perlin};

/// Seeded 2D Perlin evaluator.
///
/// Pure function of (x, y) after construction: no interior mutability, no
/// RNG dependency, so repeated sampling at the same coordinate always
/// returns the same value.
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    /// Create a noise field with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Sample noise at (x, y), normalized to [0, 1]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let v = self.perlin.get([x as f64, y as f64]) as f32;

        // Perlin output is in [-1, 1]; clamp guards tiny overshoot at the range ends
        ((v + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Sample signed noise at (x, y), in [-1, 1]
    pub fn sample_signed(&self, x: f32, y: f32) -> f32 {
        2.0 * self.sample(x, y) - 1.0
    }
}

/// Noise parameters for boundary-edge resampling.
///
/// Sample coordinates are normalized against the canvas before scaling, so
/// the same `scale` produces comparable waviness on any canvas size.
pub struct EdgeNoise<'a> {
    pub field: &'a NoiseField,
    /// Frequency of the displacement noise.
    pub scale: f32,
    /// Maximum displacement in canvas units; 0 disables resampling.
    pub magnitude: f32,
    /// Decorrelation offset applied to the sample coordinate.
    pub offset: Vec2,
    /// Canvas dimensions (width, height).
    pub canvas: Vec2,
}

impl EdgeNoise<'_> {
    /// Signed displacement distance for a point, in [-magnitude, +magnitude]
    pub fn displacement(&self, p: Vec2) -> f32 {
        let n = self.field.sample_signed(
            p.x / self.canvas.x * self.scale + self.offset.x,
            p.y / self.canvas.y * self.scale + self.offset.y,
        );
        self.magnitude * n
    }
}
