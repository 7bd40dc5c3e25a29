//! Raster preview paths (approximate Voronoi and raw noise)

pub mod preview;
pub use preview::raster_preview;

pub mod noise_preview;
pub use noise_preview::noise_preview;
