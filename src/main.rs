//! lockrain - Matrix-style binary rain around a rotating padlock

use anyhow::Result;
use clap::Parser;
use lockrain::config::{self, LockrainConfig};
use lockrain::scene::Scene;
use lockrain::viz::{FrameRecorder, Palette, PendingAssets, SceneView};
use lockrain::{assets, viz};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config: config_path } => {
            let cfg = if config_path.exists() {
                println!("Loading configuration from {:?}...", config_path);
                config::load_config(&config_path)?
            } else {
                println!("No {:?} found, using defaults.", config_path);
                LockrainConfig::default()
            };

            // asset loads run on the runtime while the TUI owns the thread
            let rt = tokio::runtime::Runtime::new()?;
            let _guard = rt.enter();

            let pending = PendingAssets::spawn(&cfg.assets);
            let mut scene = Scene::new(cfg);

            viz::run(&mut scene, pending)?;

            for failure in scene.asset_failures() {
                eprintln!("warning: {}", failure);
            }
        }

        Commands::Record {
            config: config_path,
            output,
            frames,
            width,
            height,
        } => {
            let cfg = if config_path.exists() {
                println!("Loading configuration from {:?}...", config_path);
                config::load_config(&config_path)?
            } else {
                println!("No {:?} found, using defaults.", config_path);
                LockrainConfig::default()
            };

            println!("Recording {} frames at {}x{} to {:?}...", frames, width, height, output);

            // resolve both assets up front; a recording has no splice point
            let rt = tokio::runtime::Runtime::new()?;
            let (face, lock) = rt.block_on(async {
                tokio::join!(
                    assets::load_typeface(&cfg.assets.typeface),
                    assets::load_model(&cfg.assets.model),
                )
            });

            let palette = Palette::from_config(&cfg.render)?;
            let mut scene = Scene::new(cfg);
            match face {
                Ok(face) => scene.install_typeface(face),
                Err(e) => scene.typeface_unavailable(e.to_string()),
            }
            match lock {
                Ok(model) => scene.install_lock(model),
                Err(e) => scene.lock_unavailable(e.to_string()),
            }
            for failure in scene.asset_failures() {
                eprintln!("warning: {}", failure);
            }

            let mut recorder = FrameRecorder::new(&output, width, height)?;
            let area = Rect::new(0, 0, width, height);

            for i in 0..frames {
                let mut buf = Buffer::empty(area);
                SceneView::new(&scene, palette).render(area, &mut buf);
                recorder.write_frame(&buf)?;
                scene.step();

                // Progress update every 30 frames
                if i % 30 == 0 {
                    print!("\r  Progress: {} / {} frames", i, frames);
                    use std::io::Write;
                    std::io::stdout().flush()?;
                }
            }

            recorder.finalize()?;
            println!("\nRecorded to {:?}", output);
        }

        Commands::Assets { config: config_path } => {
            let cfg = if config_path.exists() {
                config::load_config(&config_path)?
            } else {
                LockrainConfig::default()
            };

            println!("Resolving assets...\n");
            let rt = tokio::runtime::Runtime::new()?;

            println!("typeface: {}", cfg.assets.typeface);
            match rt.block_on(assets::load_typeface(&cfg.assets.typeface)) {
                Ok(face) => {
                    println!("  Name: {}", face.name());
                    println!("  Glyphs: {}", face.glyph_count());
                    println!("  Line height: {} rows", face.line_height());
                }
                Err(e) => println!("  Error: {}", e),
            }
            println!();

            println!("model: {}", cfg.assets.model);
            match rt.block_on(assets::load_model(&cfg.assets.model)) {
                Ok(model) => {
                    println!("  Vertices: {}", model.vertex_count());
                    println!("  Edges: {}", model.edge_count());
                }
                Err(e) => println!("  Error: {}", e),
            }
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Cylinder radius: {}", cfg.scene.cylinder_radius);
                    println!(
                        "  Glyphs: {} lines x {} per line",
                        cfg.scene.number_of_lines, cfg.scene.numbers_per_line
                    );
                    println!(
                        "  Vertical range: {} to {}",
                        cfg.scene.min_y, cfg.scene.max_y
                    );
                    println!("  Camera: {} deg fov at distance {}", cfg.camera.fov_degrees, cfg.camera.distance);
                    println!(
                        "  Zoom range: {} to {}",
                        cfg.camera.min_distance, cfg.camera.max_distance
                    );
                    println!("  FPS: {}", cfg.render.fps);
                    println!("  Typeface: {}", cfg.assets.typeface);
                    println!("  Model: {}", cfg.assets.model);
                }
                Err(e) => {
                    println!("Configuration is invalid: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let example_config = include_str!("../lockrain.example.yaml");

            let path = "lockrain.yaml";
            if std::path::Path::new(path).exists() {
                println!("lockrain.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, example_config)?;
                println!("Created lockrain.yaml with example configuration.");
            }
        }
    }

    Ok(())
}
