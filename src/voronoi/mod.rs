//! Planar Voronoi diagram construction

pub mod diagram;
pub use diagram::{Edge, EdgeKind, VoronoiDiagram};

pub mod builder;
pub use builder::build_voronoi;
