//! Configuration schema definitions

use anyhow::{bail, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Main configuration for lockrain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockrainConfig {
    /// Glyph cylinder geometry and bounds
    #[serde(default)]
    pub scene: SceneConfig,

    /// Camera and orbit-control settings
    #[serde(default)]
    pub camera: CameraConfig,

    /// Terminal rendering settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Asset locations
    #[serde(default)]
    pub assets: AssetsConfig,
}

impl LockrainConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.scene.cylinder_radius <= 0.0 {
            bail!("cylinder_radius must be positive");
        }
        if self.scene.number_of_lines == 0 {
            bail!("number_of_lines must be at least 1");
        }
        if self.scene.numbers_per_line == 0 {
            bail!("numbers_per_line must be at least 1");
        }
        if self.scene.min_y >= self.scene.max_y {
            bail!("min_y must be below max_y");
        }

        if !(1.0..180.0).contains(&self.camera.fov_degrees) {
            bail!("fov_degrees must be between 1 and 180");
        }
        if self.camera.min_distance <= 0.0 {
            bail!("min_distance must be positive");
        }
        if self.camera.min_distance > self.camera.max_distance {
            bail!("min_distance must not exceed max_distance");
        }
        if self.camera.distance < self.camera.min_distance
            || self.camera.distance > self.camera.max_distance
        {
            bail!("camera distance must lie within [min_distance, max_distance]");
        }
        if self.camera.damping <= 0.0 || self.camera.damping > 1.0 {
            bail!("damping must be in (0.0, 1.0]");
        }

        if self.render.fps < 1 || self.render.fps > 120 {
            bail!("fps must be between 1 and 120");
        }
        for (name, value) in [
            ("glyph_color", &self.render.glyph_color),
            ("lock_color", &self.render.lock_color),
            ("background", &self.render.background),
        ] {
            if value.parse::<Color>().is_err() {
                bail!("{} is not a recognized color: '{}'", name, value);
            }
        }

        if self.assets.typeface.is_empty() {
            bail!("assets.typeface must not be empty");
        }
        if self.assets.model.is_empty() {
            bail!("assets.model must not be empty");
        }

        Ok(())
    }
}

/// Glyph cylinder geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Radius of the cylinder the rain falls along (default: 75)
    #[serde(default = "default_cylinder_radius")]
    pub cylinder_radius: f64,

    /// Glyphs per vertical line (default: 40)
    #[serde(default = "default_numbers_per_line")]
    pub numbers_per_line: usize,

    /// Number of vertical lines around the cylinder (default: 100)
    #[serde(default = "default_number_of_lines")]
    pub number_of_lines: usize,

    /// Bottom of the vertical travel window (default: -120)
    #[serde(default = "default_min_y")]
    pub min_y: f64,

    /// Top of the vertical travel window (default: 120)
    #[serde(default = "default_max_y")]
    pub max_y: f64,

    /// RNG seed for column speeds and digits (None = seed from the clock)
    pub seed: Option<u64>,
}

fn default_cylinder_radius() -> f64 { 75.0 }
fn default_numbers_per_line() -> usize { 40 }
fn default_number_of_lines() -> usize { 100 }
fn default_min_y() -> f64 { -120.0 }
fn default_max_y() -> f64 { 120.0 }

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            cylinder_radius: default_cylinder_radius(),
            numbers_per_line: default_numbers_per_line(),
            number_of_lines: default_number_of_lines(),
            min_y: default_min_y(),
            max_y: default_max_y(),
            seed: None,
        }
    }
}

/// Camera and orbit-control settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees (default: 75)
    #[serde(default = "default_fov")]
    pub fov_degrees: f64,

    /// Initial distance from the scene center (default: 70)
    #[serde(default = "default_distance")]
    pub distance: f64,

    /// Closest allowed zoom (default: 35)
    #[serde(default = "default_min_distance")]
    pub min_distance: f64,

    /// Farthest allowed zoom (default: 70)
    #[serde(default = "default_max_distance")]
    pub max_distance: f64,

    /// Orbit damping factor in (0, 1] (default: 0.1)
    #[serde(default = "default_damping")]
    pub damping: f64,
}

fn default_fov() -> f64 { 75.0 }
fn default_distance() -> f64 { 70.0 }
fn default_min_distance() -> f64 { 35.0 }
fn default_max_distance() -> f64 { 70.0 }
fn default_damping() -> f64 { 0.1 }

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: default_fov(),
            distance: default_distance(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
            damping: default_damping(),
        }
    }
}

/// Terminal rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Animation ticks per second (default: 30)
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Color of the falling digits (default: green)
    #[serde(default = "default_glyph_color")]
    pub glyph_color: String,

    /// Color of the padlock wireframe (default: white)
    #[serde(default = "default_lock_color")]
    pub lock_color: String,

    /// Background color (default: #181818)
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_fps() -> u32 { 30 }
fn default_glyph_color() -> String { "green".to_string() }
fn default_lock_color() -> String { "white".to_string() }
fn default_background() -> String { "#181818".to_string() }

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            glyph_color: default_glyph_color(),
            lock_color: default_lock_color(),
            background: default_background(),
        }
    }
}

/// Asset locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Digit typeface: a local path or an http(s) URL (default: assets/typeface.json)
    #[serde(default = "default_typeface")]
    pub typeface: String,

    /// Padlock wireframe model path (default: assets/padlock.obj)
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_typeface() -> String { "assets/typeface.json".to_string() }
fn default_model() -> String { "assets/padlock.obj".to_string() }

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            typeface: default_typeface(),
            model: default_model(),
        }
    }
}
