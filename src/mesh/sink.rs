//! Mesh output sinks.
//!
//! A sink replaces a target's geometry wholesale; nothing is appended or
//! merged. The OBJ writer is the file-based implementation used by the
//! CLI; hosts embedding the crate provide their own sink.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use glam::Vec3;

use crate::core::Result;

use super::assembler::PatchMesh;

/// Consumer of finished mesh geometry
pub trait MeshSink {
    /// Replace the target's geometry with the given buffers.
    ///
    /// `triangles` holds three vertex indices per face; `normals` has one
    /// entry per vertex.
    fn replace_geometry(
        &mut self,
        vertices: &[Vec3],
        triangles: &[u32],
        normals: &[Vec3],
    ) -> Result<()>;
}

/// Writes meshes as Wavefront OBJ files
pub struct ObjWriter {
    path: PathBuf,
}

impl ObjWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a whole patch mesh in one call
    pub fn write(&mut self, mesh: &PatchMesh) -> Result<()> {
        let normals = mesh.normals();
        self.replace_geometry(&mesh.vertices, &mesh.triangles, &normals)
    }
}

impl MeshSink for ObjWriter {
    fn replace_geometry(
        &mut self,
        vertices: &[Vec3],
        triangles: &[u32],
        normals: &[Vec3],
    ) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut out = BufWriter::new(file);

        writeln!(out, "o patch")?;
        for v in vertices {
            writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for n in normals {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        // OBJ indices are 1-based
        for t in triangles.chunks_exact(3) {
            writeln!(
                out,
                "f {}//{} {}//{} {}//{}",
                t[0] + 1,
                t[0] + 1,
                t[1] + 1,
                t[1] + 1,
                t[2] + 1,
                t[2] + 1
            )?;
        }
        out.flush()?;

        log::info!(
            "wrote {} ({} vertices, {} triangles)",
            self.path.display(),
            vertices.len(),
            triangles.len() / 3
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mesh() -> PatchMesh {
        PatchMesh {
            vertices: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
            ],
            triangles: vec![0, 1, 2, 1, 3, 2],
        }
    }

    #[test]
    fn test_obj_line_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.obj");
        ObjWriter::new(&path).write(&sample_mesh()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 2);
    }

    #[test]
    fn test_obj_indices_one_based() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.obj");
        ObjWriter::new(&path).write(&sample_mesh()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("f 1//1 2//2 3//3"));
        assert!(!text.contains(" 0//"));
    }

    #[test]
    fn test_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.obj");
        std::fs::write(&path, "stale data").unwrap();

        ObjWriter::new(&path).write(&sample_mesh()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale data"));
        assert!(text.starts_with("o patch"));
    }
}
