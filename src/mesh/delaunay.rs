//! Alternate mesh path: plain Delaunay triangulation of the working
//! vertices, without the per-cell fan or boundary resampling. Produces a
//! convex patch useful for debugging the filtered vertex set.

use glam::{Vec2, Vec3};
use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::core::{Error, Result};

use super::assembler::PatchMesh;

/// Triangulate a point set into a flat mesh on the y = 0 plane.
///
/// Points keep their input order as mesh vertices; the triangle-index
/// list is reversed to match the fan assembler's winding.
pub fn delaunay_mesh(points: &[Vec2]) -> Result<PatchMesh> {
    if points.len() < 3 {
        return Err(Error::EmptyRegion);
    }

    // Coincident points (cocircular cells share a circumcenter) merge in
    // the triangulation; map merged vertices back to their first input
    // occurrence instead of failing the whole run.
    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    let mut input_index: Vec<usize> = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        let handle = triangulation
            .insert(Point2::new(p.x as f64, p.y as f64))
            .map_err(|e| Error::Voronoi(format!("point {} rejected: {:?}", i, e)))?;
        if handle.index() == input_index.len() {
            input_index.push(i);
        }
    }

    let mut mesh = PatchMesh {
        vertices: points.iter().map(|p| Vec3::new(p.x, 0.0, p.y)).collect(),
        triangles: Vec::new(),
    };
    for face in triangulation.inner_faces() {
        for vertex in face.vertices() {
            mesh.triangles.push(input_index[vertex.fix().index()] as u32);
        }
    }
    mesh.triangles.reverse();

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_two_triangles() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let mesh = delaunay_mesh(&points).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.triangles.iter().all(|&i| i < 4));
    }

    #[test]
    fn test_vertices_keep_input_order() {
        let points = vec![
            Vec2::new(5.0, 1.0),
            Vec2::new(9.0, 8.0),
            Vec2::new(1.0, 7.0),
        ];
        let mesh = delaunay_mesh(&points).unwrap();
        for (i, p) in points.iter().enumerate() {
            assert_eq!(mesh.vertices[i], Vec3::new(p.x, 0.0, p.y));
        }
    }

    #[test]
    fn test_too_few_points() {
        assert!(matches!(
            delaunay_mesh(&[Vec2::ZERO, Vec2::ONE]),
            Err(Error::EmptyRegion)
        ));
    }

    #[test]
    fn test_collinear_points_no_triangles() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(10.0, 0.0),
        ];
        let mesh = delaunay_mesh(&points).unwrap();
        assert!(mesh.is_empty());
    }
}
