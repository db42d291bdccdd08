//! The falling binary-code field
//!
//! A fixed set of '0'/'1' glyphs arranged in vertical columns around a
//! cylinder. Each column falls at its own speed; glyphs that drop below the
//! bottom bound teleport back to the top. Everything is created once and
//! mutated in place each frame.

mod rng;

pub use rng::Xorshift64;

use crate::config::SceneConfig;
use crate::math::Vec3;
use std::f64::consts::TAU;

/// Slowest per-frame fall speed a column can draw
pub const SPEED_MIN: f64 = 0.4;
/// Fastest per-frame fall speed a column can draw
pub const SPEED_MAX: f64 = 0.6;

/// One renderable binary digit
#[derive(Debug, Clone)]
pub struct Glyph {
    /// '0' or '1'
    pub digit: char,
    /// World position; x and z are fixed for the glyph's lifetime
    pub position: Vec3,
    /// Rotation around Y facing the cylinder axis, fixed at creation
    pub yaw: f64,
}

impl Glyph {
    /// Unit normal of the glyph plane (the direction the digit faces)
    pub fn facing(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }
}

/// A vertical line of glyphs at one angle around the cylinder
#[derive(Debug, Clone)]
pub struct Column {
    /// Angular slot in radians
    pub angle: f64,
    /// Fall speed shared by every glyph in this column
    pub speed: f64,
    /// The column's glyphs, top to bottom at creation
    pub glyphs: Vec<Glyph>,
}

/// The whole field: all columns plus the vertical travel window
#[derive(Debug, Clone)]
pub struct GlyphField {
    columns: Vec<Column>,
    min_y: f64,
    max_y: f64,
}

impl GlyphField {
    /// A field with no glyphs; used until (or in case no) typeface arrives
    pub fn empty(min_y: f64, max_y: f64) -> Self {
        Self {
            columns: Vec::new(),
            min_y,
            max_y,
        }
    }

    /// Build the full field described by the scene config.
    ///
    /// Column `i` of `n` sits at angle `2π·i/n`; every column draws one
    /// speed from [SPEED_MIN, SPEED_MAX]; glyph `j` within a column starts
    /// at `max_y - j·(max_y - min_y)/numbers_per_line`, so the column is
    /// pre-spread over the window instead of spawning from a point.
    pub fn generate(config: &SceneConfig, rng: &mut Xorshift64) -> Self {
        let lines = config.number_of_lines;
        let per_line = config.numbers_per_line;
        let span = config.max_y - config.min_y;

        let mut columns = Vec::with_capacity(lines);
        for line in 0..lines {
            let angle = line as f64 / lines as f64 * TAU;
            let speed = rng.range(SPEED_MIN, SPEED_MAX);

            let x = config.cylinder_radius * angle.cos();
            let z = config.cylinder_radius * angle.sin();

            let mut glyphs = Vec::with_capacity(per_line);
            for slot in 0..per_line {
                let y = config.max_y - slot as f64 * (span / per_line as f64);
                let digit = if rng.coin() { '0' } else { '1' };

                // Face the cylinder axis at the glyph's own height, so the
                // look target shares its Y and the orientation is pure yaw.
                let position = Vec3::new(x, y, z);
                let toward_axis = Vec3::new(0.0, y, 0.0) - position;
                let yaw = toward_axis.x.atan2(toward_axis.z);

                glyphs.push(Glyph {
                    digit,
                    position,
                    yaw,
                });
            }

            columns.push(Column {
                angle,
                speed,
                glyphs,
            });
        }

        Self {
            columns,
            min_y: config.min_y,
            max_y: config.max_y,
        }
    }

    /// Advance every glyph one frame: fall by the column speed, teleport to
    /// the top bound after passing strictly below the bottom bound.
    pub fn step(&mut self) {
        for column in &mut self.columns {
            for glyph in &mut column.glyphs {
                glyph.position.y -= column.speed;
                if glyph.position.y < self.min_y {
                    glyph.position.y = self.max_y;
                }
            }
        }
    }

    /// All columns
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Flat view over every glyph, for rendering
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.columns.iter().flat_map(|column| column.glyphs.iter())
    }

    /// Total number of glyphs
    pub fn glyph_count(&self) -> usize {
        self.columns.iter().map(|column| column.glyphs.len()).sum()
    }

    /// True when no glyphs were generated
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The vertical travel window (min_y, max_y)
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_y, self.max_y)
    }
}
