//! Patch generator binary — runs the pipeline and writes results to disk.
//!
//! Usage: cargo run --release --bin generate_patch -- [OPTIONS]
//!
//! Options:
//!   --width <PX>       Canvas width in pixels (default: 256)
//!   --height <PX>      Canvas height in pixels (default: 256)
//!   --points <N>       Approximate site count (default: 100)
//!   --seed <SEED>      Random seed (default: 12345)
//!   --segments <N>     Subdivisions per silhouette edge (default: 3)
//!   --magnitude <M>    Silhouette noise magnitude (default: 20.0)
//!   --mode <MODE>      mesh | delaunay | raster | noise | all (default: mesh)
//!   --config <FILE>    Load PatchParams from a JSON file (flags override seed)
//!   --out <DIR>        Output directory (default: "output/patch")
//!
//! Output structure:
//!   <out>/
//!     manifest.json     # Run parameters + produced artifacts
//!     patch.obj         # Fan mesh (mesh/all modes)
//!     delaunay.obj      # Delaunay mesh (delaunay/all modes)
//!     preview.png       # Approximate Voronoi raster (raster/all modes)
//!     noise.png         # Raw noise field (noise/all modes)

use std::path::PathBuf;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

use terrapatch::core::Error;
use terrapatch::generation::{PatchGenerator, PatchParams};
use terrapatch::mesh::ObjWriter;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

    let args: Vec<String> = std::env::args().collect();

    let mut params = match parse_str_arg(&args, "--config") {
        Some(path) => match load_config(&path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => PatchParams::default(),
    };

    if let Some(v) = parse_u32_arg(&args, "--width") {
        params.width = v;
    }
    if let Some(v) = parse_u32_arg(&args, "--height") {
        params.height = v;
    }
    if let Some(v) = parse_u32_arg(&args, "--points") {
        params.target_sites = v;
    }
    if let Some(v) = parse_u32_arg(&args, "--seed") {
        params.seed = v;
    }
    if let Some(v) = parse_u32_arg(&args, "--segments") {
        params.segments = v;
    }
    if let Some(v) = parse_f32_arg(&args, "--magnitude") {
        params.noise_magnitude = v;
    }
    let mode = parse_str_arg(&args, "--mode").unwrap_or_else(|| "mesh".to_string());
    if !matches!(mode.as_str(), "mesh" | "delaunay" | "raster" | "noise" | "all") {
        eprintln!("unknown mode '{}'; expected mesh, delaunay, raster, noise, or all", mode);
        std::process::exit(1);
    }
    let out_dir = PathBuf::from(
        parse_str_arg(&args, "--out").unwrap_or_else(|| "output/patch".to_string()),
    );

    println!("=== Terrapatch Generator ===");
    println!("Canvas:   {}x{}", params.width, params.height);
    println!("Sites:    ~{} ({}x{} grid)", params.target_sites, params.grid_dim(), params.grid_dim());
    println!("Seed:     {}", params.seed);
    println!("Segments: {}, magnitude: {}", params.segments, params.noise_magnitude);
    println!("Mode:     {}", mode);
    println!("Output:   {}", out_dir.display());
    println!();

    let generator = match PatchGenerator::new(params.clone()) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        eprintln!("failed to create {}: {}", out_dir.display(), e);
        std::process::exit(1);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(params.seed as u64);
    let start = Instant::now();
    let mut artifacts: Vec<String> = Vec::new();

    if mode == "mesh" || mode == "all" {
        match generator.generate_mesh(&mut rng) {
            Ok(mesh) => {
                let path = out_dir.join("patch.obj");
                if let Err(e) = ObjWriter::new(&path).write(&mesh) {
                    eprintln!("failed to write {}: {}", path.display(), e);
                    std::process::exit(1);
                }
                println!(
                    "Mesh:     {} vertices, {} triangles -> {}",
                    mesh.vertices.len(),
                    mesh.triangle_count(),
                    path.display()
                );
                artifacts.push("patch.obj".to_string());
            }
            Err(Error::EmptyRegion) => {
                log::warn!("region growth left no usable cells; skipping mesh output");
                println!("Mesh:     skipped (empty region)");
            }
            Err(e) => {
                eprintln!("mesh generation failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    if mode == "delaunay" || mode == "all" {
        match generator.generate_delaunay_mesh(&mut rng) {
            Ok(mesh) => {
                let path = out_dir.join("delaunay.obj");
                if let Err(e) = ObjWriter::new(&path).write(&mesh) {
                    eprintln!("failed to write {}: {}", path.display(), e);
                    std::process::exit(1);
                }
                println!(
                    "Delaunay: {} vertices, {} triangles -> {}",
                    mesh.vertices.len(),
                    mesh.triangle_count(),
                    path.display()
                );
                artifacts.push("delaunay.obj".to_string());
            }
            Err(Error::EmptyRegion) => {
                log::warn!("too few working vertices; skipping delaunay output");
                println!("Delaunay: skipped (empty region)");
            }
            Err(e) => {
                eprintln!("delaunay generation failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    if mode == "raster" || mode == "all" {
        match generator.raster_preview(&mut rng) {
            Ok(image) => {
                let path = out_dir.join("preview.png");
                if let Err(e) = image.save(&path) {
                    eprintln!("failed to write {}: {}", path.display(), e);
                    std::process::exit(1);
                }
                println!("Raster:   {}x{} -> {}", image.width(), image.height(), path.display());
                artifacts.push("preview.png".to_string());
            }
            Err(e) => {
                eprintln!("raster generation failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    if mode == "noise" || mode == "all" {
        let image = generator.noise_preview();
        let path = out_dir.join("noise.png");
        if let Err(e) = image.save(&path) {
            eprintln!("failed to write {}: {}", path.display(), e);
            std::process::exit(1);
        }
        println!("Noise:    {}x{} -> {}", image.width(), image.height(), path.display());
        artifacts.push("noise.png".to_string());
    }

    let manifest = json!({
        "mode": mode,
        "params": params,
        "artifacts": artifacts,
        "elapsed_ms": start.elapsed().as_millis() as u64,
    });
    let manifest_path = out_dir.join("manifest.json");
    if let Err(e) = std::fs::write(
        &manifest_path,
        serde_json::to_string_pretty(&manifest).expect("manifest serialization cannot fail"),
    ) {
        eprintln!("failed to write {}: {}", manifest_path.display(), e);
        std::process::exit(1);
    }

    println!();
    println!("=== Generation Complete ===");
    println!("Elapsed:  {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);
    println!("Manifest: {}", manifest_path.display());
}

fn load_config(path: &str) -> Result<PatchParams, Error> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| Error::InvalidConfiguration(format!("bad config file: {}", e)))
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.clone())
}
