//! Patch generation pipeline.
//!
//! The pipeline orchestrates:
//! 1. Jittered-grid site sampling (SiteGrid)
//! 2. Voronoi diagram construction (build_voronoi)
//! 3. Noise-weighted region growth over the cell grid (select_region)
//! 4. Boundary filtering against the canvas (filter_to_bounds)
//! 5. Fan-mesh assembly with noisy silhouette edges (assemble_mesh)
//!
//! The raster preview path shares only the site grid and noise with the
//! mesh path and can run independently.

pub mod config;
pub use config::PatchParams;

use glam::Vec2;
use image::{GrayImage, RgbImage};
use rand::Rng;

use crate::core::Result;
use crate::mesh::{PatchMesh, assemble_mesh, delaunay_mesh};
use crate::raster;
use crate::region::{filter_to_bounds, select_region};
use crate::sampling::{EdgeNoise, NoiseField, SiteGrid};
use crate::voronoi::build_voronoi;

/// Orchestrates the full sampling → diagram → selection → filter → mesh
/// pipeline, plus the independent raster paths.
///
/// Noise fields are derived from the configured seed once at construction;
/// per-run variation comes only from the RNG passed to each call, so a
/// seeded RNG reproduces a run exactly.
pub struct PatchGenerator {
    params: PatchParams,
    edge_noise: NoiseField,
    region_noise: NoiseField,
    raster_noise: NoiseField,
}

impl PatchGenerator {
    /// Create a generator, failing fast on an invalid configuration
    pub fn new(params: PatchParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            edge_noise: NoiseField::new(params.seed),
            region_noise: NoiseField::new(params.seed.wrapping_add(1000)),
            raster_noise: NoiseField::new(params.seed.wrapping_add(2000)),
            params,
        })
    }

    pub fn params(&self) -> &PatchParams {
        &self.params
    }

    /// Run the whole mesh pipeline once.
    ///
    /// Returns `Error::EmptyRegion` when selection and filtering leave no
    /// usable cell; callers may treat that as a skip rather than a failure.
    pub fn generate_mesh(&self, rng: &mut impl Rng) -> Result<PatchMesh> {
        let grid = SiteGrid::sample(
            self.params.width,
            self.params.height,
            self.params.target_sites,
            rng,
        )?;
        let diagram = build_voronoi(grid.sites())?;
        let selected = select_region(grid.dim(), &self.region_noise, rng);
        log::info!(
            "region growth selected {} of {} cells",
            selected.len(),
            grid.len()
        );

        let region = filter_to_bounds(&diagram, selected, self.params.width, self.params.height);
        let mesh = assemble_mesh(&region, &diagram, self.params.segments, &self.edge_params())?;
        log::info!(
            "assembled patch mesh: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Alternate mesh path: Delaunay triangulation of the filtered
    /// working vertices, without fans or silhouette noise.
    pub fn generate_delaunay_mesh(&self, rng: &mut impl Rng) -> Result<PatchMesh> {
        let grid = SiteGrid::sample(
            self.params.width,
            self.params.height,
            self.params.target_sites,
            rng,
        )?;
        let diagram = build_voronoi(grid.sites())?;
        let selected = select_region(grid.dim(), &self.region_noise, rng);
        let region = filter_to_bounds(&diagram, selected, self.params.width, self.params.height);
        delaunay_mesh(&region.working_vertices)
    }

    /// Render the approximate Voronoi raster preview
    pub fn raster_preview(&self, rng: &mut impl Rng) -> Result<RgbImage> {
        let grid = SiteGrid::sample(
            self.params.width,
            self.params.height,
            self.params.target_sites,
            rng,
        )?;
        Ok(raster::raster_preview(
            &grid,
            &self.params,
            &self.raster_noise,
            rng,
        ))
    }

    /// Render the raw noise field as a grayscale image
    pub fn noise_preview(&self) -> GrayImage {
        raster::noise_preview(
            self.params.width,
            self.params.height,
            self.params.scale,
            &self.raster_noise,
        )
    }

    fn edge_params(&self) -> EdgeNoise<'_> {
        EdgeNoise {
            field: &self.edge_noise,
            scale: self.params.noise_scale,
            magnitude: self.params.noise_magnitude,
            offset: Vec2::new(self.params.offset_x, self.params.offset_y),
            canvas: Vec2::new(self.params.width as f32, self.params.height as f32),
        }
    }
}
