//! Centroid-fan mesh assembly with noise-resampled boundary edges.
//!
//! Each surviving cell becomes a triangle fan around its site. Edges
//! shared with another surviving cell are kept geometrically exact so
//! adjacent fans tile without a seam; edges on the region silhouette are
//! subdivided and their interior points displaced outward by signed
//! noise, breaking up the polygonal Voronoi outline.

use std::collections::HashMap;

use glam::{Vec2, Vec3};

use crate::core::{Error, Result};
use crate::region::FilteredRegion;
use crate::sampling::EdgeNoise;
use crate::voronoi::VoronoiDiagram;

/// A flat triangle mesh on the y = 0 plane.
///
/// Vertices are emitted per triangle corner (no sharing); `triangles`
/// holds three indices per face. All normals point up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatchMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<u32>,
}

impl PatchMesh {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Uniform up normals, one per vertex
    pub fn normals(&self) -> Vec<Vec3> {
        vec![Vec3::Y; self.vertices.len()]
    }
}

/// Build the patch mesh from the filtered region.
///
/// Sites are processed in the map's insertion order. The finished
/// triangle-index list is reversed once at the end to flip the winding
/// toward the desired facing.
///
/// Deterministic: same region, diagram, and noise parameters always
/// produce identical vertex and index arrays.
pub fn assemble_mesh(
    region: &FilteredRegion,
    diagram: &VoronoiDiagram,
    segments: u32,
    noise: &EdgeNoise,
) -> Result<PatchMesh> {
    if segments < 1 {
        return Err(Error::InvalidConfiguration(
            "segment count must be at least 1".to_string(),
        ));
    }
    if region.site_edges.is_empty() {
        return Err(Error::EmptyRegion);
    }

    // How many surviving cells reference each geometric edge: 1 means the
    // edge lies on the region silhouette, 2 means it is interior.
    let mut shared_count: HashMap<(usize, usize), u32> = HashMap::new();
    for site in region.site_edges.sites() {
        for edge in region.site_edges.edges(site) {
            *shared_count.entry(edge.key()).or_insert(0) += 1;
        }
    }

    let mut mesh = PatchMesh::default();

    for site in region.site_edges.sites() {
        let edges: Vec<_> = region
            .site_edges
            .edges(site)
            .iter()
            .filter(|e| {
                let degenerate = diagram.vertices[e.v0] == diagram.vertices[e.v1];
                if degenerate {
                    log::debug!("skipping zero-length edge of site {}", site);
                }
                !degenerate
            })
            .collect();
        if edges.is_empty() {
            log::debug!("skipping site {} with no usable edges", site);
            continue;
        }

        let centroid = diagram.sites[site];
        let centroid_index = push_vertex(&mut mesh, centroid);

        for edge in edges {
            let v0 = diagram.vertices[edge.v0];
            let v1 = diagram.vertices[edge.v1];

            if shared_count[&edge.key()] > 1 {
                // Interior wall: use the diagram vertices verbatim.
                mesh.triangles.push(centroid_index);
                let i0 = push_vertex(&mut mesh, v0);
                mesh.triangles.push(i0);
                let i1 = push_vertex(&mut mesh, v1);
                mesh.triangles.push(i1);
            } else {
                resample_boundary_edge(&mut mesh, centroid, centroid_index, v0, v1, segments, noise);
            }
        }
    }

    mesh.triangles.reverse();
    Ok(mesh)
}

/// Fan-triangulate one silhouette edge in `segments` pieces.
///
/// Interior subdivision points are displaced away from the centroid by
/// signed noise; both original endpoints stay exact so neighboring fans
/// still meet at the true diagram vertex.
fn resample_boundary_edge(
    mesh: &mut PatchMesh,
    centroid: Vec2,
    centroid_index: u32,
    v0: Vec2,
    v1: Vec2,
    segments: u32,
    noise: &EdgeNoise,
) {
    let mut prev = v0;
    for i in 0..segments {
        let t = (i + 1) as f32 / segments as f32;
        let mut next = v0.lerp(v1, t);
        if i < segments - 1 {
            let direction = (next - centroid).normalize_or_zero();
            next += direction * noise.displacement(next);
        }

        mesh.triangles.push(centroid_index);
        let ip = push_vertex(mesh, prev);
        mesh.triangles.push(ip);
        let inx = push_vertex(mesh, next);
        mesh.triangles.push(inx);

        prev = next;
    }
}

fn push_vertex(mesh: &mut PatchMesh, p: Vec2) -> u32 {
    mesh.vertices.push(Vec3::new(p.x, 0.0, p.y));
    (mesh.vertices.len() - 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{FilteredRegion, SiteEdgeMap};
    use crate::sampling::NoiseField;
    use crate::voronoi::{Edge, EdgeKind};

    fn edge(v0: usize, v1: usize, site: usize) -> Edge {
        Edge { v0, v1, site, kind: EdgeKind::Segment }
    }

    fn edge_noise(field: &NoiseField, magnitude: f32) -> EdgeNoise<'_> {
        EdgeNoise {
            field,
            scale: 20.0,
            magnitude,
            offset: Vec2::new(5.0, 5.0),
            canvas: Vec2::new(100.0, 100.0),
        }
    }

    /// One triangular cell: three silhouette edges around site 0.
    fn single_cell() -> (FilteredRegion, VoronoiDiagram) {
        let diagram = VoronoiDiagram {
            vertices: vec![
                Vec2::new(30.0, 20.0),
                Vec2::new(70.0, 20.0),
                Vec2::new(50.0, 60.0),
            ],
            edges: vec![edge(0, 1, 0), edge(1, 2, 0), edge(2, 0, 0)],
            sites: vec![Vec2::new(50.0, 32.0)],
        };
        let mut map = SiteEdgeMap::default();
        for e in &diagram.edges {
            map.push(*e);
        }
        let region = FilteredRegion {
            site_edges: map,
            working_vertices: diagram.vertices.clone(),
        };
        (region, diagram)
    }

    /// Two square cells sharing the wall between vertices 1 and 2.
    fn two_cells() -> (FilteredRegion, VoronoiDiagram) {
        let diagram = VoronoiDiagram {
            vertices: vec![
                Vec2::new(10.0, 10.0), // 0
                Vec2::new(50.0, 10.0), // 1
                Vec2::new(50.0, 50.0), // 2
                Vec2::new(10.0, 50.0), // 3
                Vec2::new(90.0, 10.0), // 4
                Vec2::new(90.0, 50.0), // 5
            ],
            edges: vec![
                edge(0, 1, 0),
                edge(1, 2, 0),
                edge(2, 3, 0),
                edge(3, 0, 0),
                edge(1, 4, 1),
                edge(4, 5, 1),
                edge(5, 2, 1),
                edge(2, 1, 1), // shared wall, reversed orientation
            ],
            sites: vec![Vec2::new(30.0, 30.0), Vec2::new(70.0, 30.0)],
        };
        let mut map = SiteEdgeMap::default();
        for e in &diagram.edges {
            map.push(*e);
        }
        let region = FilteredRegion {
            site_edges: map,
            working_vertices: diagram.vertices.clone(),
        };
        (region, diagram)
    }

    #[test]
    fn test_all_boundary_triangle_count() {
        let (region, diagram) = single_cell();
        let field = NoiseField::new(1);
        let mesh = assemble_mesh(&region, &diagram, 3, &edge_noise(&field, 10.0)).unwrap();
        // 3 edges, all silhouette, 3 segments each
        assert_eq!(mesh.triangle_count(), 9);
        assert_eq!(mesh.vertices.len(), 1 + 9 * 2);
    }

    #[test]
    fn test_single_segment_no_subdivision() {
        let (region, diagram) = single_cell();
        let field = NoiseField::new(1);
        let mesh = assemble_mesh(&region, &diagram, 1, &edge_noise(&field, 10.0)).unwrap();
        assert_eq!(mesh.triangle_count(), 3);
    }

    #[test]
    fn test_shared_wall_single_exact_triangle() {
        let (region, diagram) = two_cells();
        let field = NoiseField::new(1);
        let mesh = assemble_mesh(&region, &diagram, 3, &edge_noise(&field, 10.0)).unwrap();
        // Each cell: 3 silhouette edges at 3 triangles + 1 shared at 1.
        assert_eq!(mesh.triangle_count(), 2 * (3 * 3 + 1));

        // The shared wall's endpoints must appear unperturbed.
        let wall = [Vec3::new(50.0, 0.0, 10.0), Vec3::new(50.0, 0.0, 50.0)];
        for w in wall {
            assert!(mesh.vertices.contains(&w));
        }
    }

    #[test]
    fn test_zero_magnitude_is_pure_lerp() {
        let (region, diagram) = single_cell();
        let field = NoiseField::new(1);
        let mesh = assemble_mesh(&region, &diagram, 4, &edge_noise(&field, 0.0)).unwrap();

        // Every vertex must lie on an original edge or be the centroid:
        // with zero magnitude the subdivision points are exact lerps.
        let expected = Vec3::new(40.0, 0.0, 20.0); // lerp(v0, v1, 0.25) on edge 0-1
        assert!(mesh.vertices.contains(&expected));
        let expected = Vec3::new(60.0, 0.0, 20.0); // lerp(v0, v1, 0.75)
        assert!(mesh.vertices.contains(&expected));
    }

    #[test]
    fn test_endpoints_never_perturbed() {
        let (region, diagram) = single_cell();
        let field = NoiseField::new(9);
        let mesh = assemble_mesh(&region, &diagram, 3, &edge_noise(&field, 25.0)).unwrap();
        for v in &diagram.vertices {
            assert!(
                mesh.vertices.contains(&Vec3::new(v.x, 0.0, v.y)),
                "diagram vertex {:?} missing from mesh",
                v
            );
        }
    }

    #[test]
    fn test_idempotent() {
        let (region, diagram) = two_cells();
        let field = NoiseField::new(4);
        let noise = edge_noise(&field, 15.0);
        let a = assemble_mesh(&region, &diagram, 3, &noise).unwrap();
        let b = assemble_mesh(&region, &diagram, 3, &noise).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_region_signalled() {
        let diagram = VoronoiDiagram::default();
        let region = FilteredRegion::default();
        let field = NoiseField::new(1);
        assert!(matches!(
            assemble_mesh(&region, &diagram, 3, &edge_noise(&field, 10.0)),
            Err(Error::EmptyRegion)
        ));
    }

    #[test]
    fn test_zero_segments_rejected() {
        let (region, diagram) = single_cell();
        let field = NoiseField::new(1);
        assert!(matches!(
            assemble_mesh(&region, &diagram, 0, &edge_noise(&field, 10.0)),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_degenerate_edge_skipped() {
        let diagram = VoronoiDiagram {
            vertices: vec![
                Vec2::new(30.0, 20.0),
                Vec2::new(70.0, 20.0),
                Vec2::new(50.0, 60.0),
                Vec2::new(30.0, 20.0), // duplicate position of vertex 0
            ],
            edges: vec![edge(0, 1, 0), edge(1, 2, 0), edge(2, 0, 0), edge(0, 3, 0)],
            sites: vec![Vec2::new(50.0, 32.0)],
        };
        let mut map = SiteEdgeMap::default();
        for e in &diagram.edges {
            map.push(*e);
        }
        let region = FilteredRegion {
            site_edges: map,
            working_vertices: diagram.vertices.clone(),
        };
        let field = NoiseField::new(1);
        let mesh = assemble_mesh(&region, &diagram, 1, &edge_noise(&field, 0.0)).unwrap();
        // The zero-length edge contributes nothing.
        assert_eq!(mesh.triangle_count(), 3);
    }

    #[test]
    fn test_normals_all_up() {
        let (region, diagram) = single_cell();
        let field = NoiseField::new(1);
        let mesh = assemble_mesh(&region, &diagram, 2, &edge_noise(&field, 5.0)).unwrap();
        let normals = mesh.normals();
        assert_eq!(normals.len(), mesh.vertices.len());
        assert!(normals.iter().all(|n| *n == Vec3::Y));
    }

    #[test]
    fn test_vertices_on_ground_plane() {
        let (region, diagram) = two_cells();
        let field = NoiseField::new(2);
        let mesh = assemble_mesh(&region, &diagram, 3, &edge_noise(&field, 20.0)).unwrap();
        assert!(mesh.vertices.iter().all(|v| v.y == 0.0));
    }
}
