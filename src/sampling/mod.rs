//! Site sampling and coherent noise

pub mod noise_field;
pub use noise_field::{EdgeNoise, NoiseField};

pub mod site_grid;
pub use site_grid::SiteGrid;
