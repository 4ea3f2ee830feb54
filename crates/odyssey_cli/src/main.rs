//! Import placed objects from a BYML-XML scenario dump.
//!
//! Run with: cargo run --bin odyssey_import -- assets/sample_scenario.xml --mesh-dir assets/obj

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use odyssey_core::byml::{decode, walk_all};
use odyssey_core::mesh_path::resolve_mesh_path_with_extension;
use odyssey_core::{import_scene, ImportConfig, ImportReport};

/// Import placed objects from a BYML-XML scenario dump.
#[derive(Parser, Debug)]
#[command(name = "odyssey_import", version, about)]
struct Args {
    /// Scenario XML file
    xml: PathBuf,

    /// Directory containing the mesh files
    #[arg(long, env = "ODYSSEY_MESH_DIR")]
    mesh_dir: Option<PathBuf>,

    /// JSON config file (mesh_dir, mesh_extension)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mesh file extension
    #[arg(long)]
    extension: Option<String>,

    /// Resolve objects and mesh paths without loading any meshes
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    /// Config file settings, overridden by flags and the environment.
    fn import_config(&self) -> Result<ImportConfig> {
        let mut config = match &self.config {
            Some(path) => ImportConfig::from_json_file(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => ImportConfig::default(),
        };

        if let Some(mesh_dir) = &self.mesh_dir {
            config = config.with_mesh_dir(mesh_dir);
        }
        if let Some(extension) = &self.extension {
            config = config.with_mesh_extension(extension);
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let config = args.import_config()?;

    if args.dry_run {
        return dry_run(&args, &config);
    }

    let report = import_scene(&args.xml, &config)
        .with_context(|| format!("Failed to import {}", args.xml.display()))?;
    print_report(&report);

    Ok(())
}

/// Print every resolved object and the mesh it would use.
fn dry_run(args: &Args, config: &ImportConfig) -> Result<()> {
    let mesh_dir = config.validate()?;

    let bytes = std::fs::read(&args.xml)
        .with_context(|| format!("Failed to read {}", args.xml.display()))?;
    let document = decode(&bytes).context("Failed to decode scenario")?;
    let outcome = walk_all(&document)?;

    for object in &outcome.objects {
        println!(
            "[{}] {} model={} unit_config={}",
            object.list_name, object.id, object.model_name, object.unit_config_name
        );
        println!(
            "    translate=({:.3}, {:.3}, {:.3}) scale=({:.3}, {:.3}, {:.3}) rotate=({:.3}, {:.3}, {:.3})",
            object.translate.x,
            object.translate.y,
            object.translate.z,
            object.scale.x,
            object.scale.y,
            object.scale.z,
            object.rotate_degrees.x,
            object.rotate_degrees.y,
            object.rotate_degrees.z
        );

        match resolve_mesh_path_with_extension(
            mesh_dir,
            &object.unit_config_name,
            &object.model_name,
            config.extension(),
        ) {
            Ok(path) => println!("    mesh: {}", path.display()),
            Err(e) => println!("    mesh: {}", e),
        }
    }

    for skipped in &outcome.skipped {
        println!("Skipped {}", skipped);
    }

    println!(
        "\n{} objects resolved, {} skipped",
        outcome.objects.len(),
        outcome.skipped.len()
    );

    Ok(())
}

fn print_report(report: &ImportReport) {
    let scene = &report.scene;

    println!("\n=== Scene: {} ===", scene.name);
    println!("Prototypes: {}", scene.prototype_count());
    println!("Instances: {}", scene.instance_count());
    println!("Total triangles: {}", scene.total_triangle_count());

    println!("\n--- Prototypes ---");
    for proto in &scene.prototypes {
        println!(
            "  [{}] {} - {} vertices, {} triangles ({})",
            proto.id,
            proto.name,
            proto.mesh.vertex_count(),
            proto.mesh.triangle_count(),
            proto.source.display()
        );
    }

    println!("\n--- Instances ---");
    for instance in &scene.instances {
        let t = &instance.transform.translation;
        println!(
            "  [{}] {} ({}) proto {} at ({:.2}, {:.2}, {:.2})",
            instance.list_name, instance.object_id, instance.name, instance.prototype_id, t.x, t.y, t.z
        );
    }

    if !report.skipped.is_empty() {
        println!("\n--- Skipped ---");
        for skip in &report.skipped {
            println!("  {}", skip);
        }
    }

    println!("\n{}", report);
}
