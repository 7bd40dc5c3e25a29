//! Triangle mesh assembly from filtered Voronoi cells

pub mod assembler;
pub use assembler::{PatchMesh, assemble_mesh};

pub mod delaunay;
pub use delaunay::delaunay_mesh;

pub mod sink;
pub use sink::{MeshSink, ObjWriter};
