//! Voronoi construction as the dual of a Delaunay triangulation.
//!
//! The triangulation itself is delegated to `spade`; this module only owns
//! the dual bookkeeping: circumcenters become Voronoi vertices, each
//! Delaunay edge becomes one geometric Voronoi edge recorded once per
//! adjacent site, and hull edges become rays with synthesized far
//! endpoints so every edge's vertex indices stay valid.

use std::collections::HashMap;

use glam::Vec2;
use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::core::{Error, Result};

use super::diagram::{Edge, EdgeKind, VoronoiDiagram};

/// Build the planar Voronoi diagram of a site set.
///
/// Sites keep their input order: the i-th diagram site is the i-th input
/// point. Duplicate or non-finite site positions are rejected.
pub fn build_voronoi(sites: &[Vec2]) -> Result<VoronoiDiagram> {
    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    for (i, p) in sites.iter().enumerate() {
        triangulation
            .insert(Point2::new(p.x as f64, p.y as f64))
            .map_err(|e| Error::Voronoi(format!("site {} rejected: {:?}", i, e)))?;
    }
    if triangulation.num_vertices() != sites.len() {
        return Err(Error::Voronoi(
            "duplicate site positions collapse the diagram".to_string(),
        ));
    }

    // Unbounded edges are clipped far beyond the site bounding box; the
    // exact length never matters because cells owning them are rejected
    // before any geometric use.
    let far_len = far_length(sites);

    // One Voronoi vertex per inner face: its circumcenter.
    let mut vertices: Vec<Vec2> = Vec::new();
    let mut face_vertex: HashMap<usize, usize> = HashMap::new();
    for face in triangulation.inner_faces() {
        let [a, b, c] = face.vertices();
        face_vertex.insert(face.fix().index(), vertices.len());
        vertices.push(circumcenter(a.position(), b.position(), c.position()));
    }

    let mut edges: Vec<Edge> = Vec::new();
    for edge in triangulation.undirected_edges() {
        let [ha, hb] = edge.vertices();
        let site_a = ha.fix().index();
        let site_b = hb.fix().index();
        let a = to_vec2(ha.position());
        let b = to_vec2(hb.position());

        let directed = edge.as_directed();
        let left = directed.face().as_inner();
        let right = directed.rev().face().as_inner();

        let (v0, v1, kind) = match (left, right) {
            (Some(l), Some(r)) => (
                face_vertex[&l.fix().index()],
                face_vertex[&r.fix().index()],
                EdgeKind::Segment,
            ),
            (Some(f), None) | (None, Some(f)) => {
                let inner = face_vertex[&f.fix().index()];
                let third = f
                    .vertices()
                    .iter()
                    .map(|v| to_vec2(v.position()))
                    .find(|p| *p != a && *p != b);
                vertices.push(ray_endpoint(a, b, third, far_len));
                (inner, vertices.len() - 1, EdgeKind::Ray)
            }
            (None, None) => {
                // Fully collinear input: the bisector is an infinite line.
                let mid = (a + b) * 0.5;
                let dir = perpendicular(b - a);
                vertices.push(mid + dir * far_len);
                vertices.push(mid - dir * far_len);
                (vertices.len() - 2, vertices.len() - 1, EdgeKind::Line)
            }
        };

        edges.push(Edge { v0, v1, site: site_a, kind });
        edges.push(Edge { v0, v1, site: site_b, kind });
    }

    Ok(VoronoiDiagram {
        vertices,
        edges,
        sites: sites.to_vec(),
    })
}

/// Far endpoint of a hull edge's dual ray: from the midpoint of the
/// Delaunay edge, along the outward perpendicular (away from the inner
/// face's remaining vertex). The midpoint lies on the bisector, so the
/// synthesized point stays on the ray's supporting line.
fn ray_endpoint(a: Vec2, b: Vec2, third: Option<Vec2>, far_len: f32) -> Vec2 {
    let mid = (a + b) * 0.5;
    let mut dir = perpendicular(b - a);
    if let Some(t) = third {
        if dir.dot(t - mid) > 0.0 {
            dir = -dir;
        }
    }
    mid + dir * far_len
}

fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x).normalize_or_zero()
}

fn to_vec2(p: Point2<f64>) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}

/// Clip distance for unbounded edges: a few bounding-box diagonals
fn far_length(sites: &[Vec2]) -> f32 {
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for p in sites {
        min = min.min(*p);
        max = max.max(*p);
    }
    if sites.is_empty() {
        return 1.0;
    }
    4.0 * (max - min).length() + 1.0
}

/// Circumcenter of a triangle; falls back to the centroid for degenerate
/// (near-collinear) faces, which only arise from pathological input.
fn circumcenter(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Vec2 {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-12 {
        return Vec2::new(
            ((a.x + b.x + c.x) / 3.0) as f32,
            ((a.y + b.y + c.y) / 3.0) as f32,
        );
    }
    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    Vec2::new(ux as f32, uy as f32)
}
