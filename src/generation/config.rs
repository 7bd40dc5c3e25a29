//! Patch generation configuration.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Parameters controlling patch generation
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchParams {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Approximate number of Voronoi sites; the actual count is the next
    /// square number (the sampling grid is ceil(sqrt(n)) per side).
    pub target_sites: u32,
    /// Noise sample scale for the raster paths.
    pub scale: f32,
    /// Frequency of the silhouette displacement noise.
    pub noise_scale: f32,
    /// Maximum silhouette displacement in canvas units; 0 keeps the exact
    /// Voronoi outline.
    pub noise_magnitude: f32,
    /// Subdivision count per silhouette edge.
    pub segments: u32,
    /// Displacement-noise decorrelation offset, x component.
    pub offset_x: f32,
    /// Displacement-noise decorrelation offset, y component.
    pub offset_y: f32,
    /// Near-tie epsilon for raster border detection.
    pub border_delta: f32,
    /// Seed for the noise fields.
    pub seed: u32,
}

impl Default for PatchParams {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            target_sites: 100,
            scale: 1.0,
            noise_scale: 20.0,
            noise_magnitude: 20.0,
            segments: 3,
            offset_x: 5.0,
            offset_y: 5.0,
            border_delta: 0.1,
            seed: 12345,
        }
    }
}

impl PatchParams {
    /// Reject configurations no stage can work with.
    ///
    /// Runs before any sampling so a bad config never consumes the RNG.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "canvas dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.target_sites < 1 {
            return Err(Error::InvalidConfiguration(
                "target site count must be at least 1".to_string(),
            ));
        }
        if self.segments < 1 {
            return Err(Error::InvalidConfiguration(
                "segment count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Sampling grid dimension N (the grid is N×N)
    pub fn grid_dim(&self) -> usize {
        (self.target_sites as f32).sqrt().ceil() as usize
    }
}
