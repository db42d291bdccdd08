//! Scene canvas widget for ratatui
//!
//! Projects the 3D scene into terminal cells. The glyph cylinder and the
//! padlock wireframe share a per-frame depth buffer so nearer geometry wins
//! the cell; depth and glyph orientation pick the brightness tier. Glyphs
//! that project tall enough are rasterized from the typeface, distant ones
//! collapse to a single digit character.

use anyhow::{Context, Result};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Widget},
};

use crate::config::RenderConfig;
use crate::math::Vec3;
use crate::scene::{Camera, Scene, ViewTransform, LOCK_OFFSET_Y};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 0.5;

/// World-space height of one digit
const GLYPH_WORLD_SIZE: f64 = 3.0;

/// Projected glyphs at least this many rows tall draw from the typeface raster
const RASTER_THRESHOLD: f64 = 2.0;

/// Cap on rasterized glyph height, in rows
const MAX_RASTER_ROWS: usize = 10;

/// Colors resolved from the render configuration
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub glyph: Color,
    pub lock: Color,
    pub background: Color,
}

impl Palette {
    pub fn from_config(render: &RenderConfig) -> Result<Self> {
        Ok(Palette {
            glyph: parse_color(&render.glyph_color)?,
            lock: parse_color(&render.lock_color)?,
            background: parse_color(&render.background)?,
        })
    }
}

fn parse_color(value: &str) -> Result<Color> {
    value
        .parse()
        .with_context(|| format!("not a recognized color: '{}'", value))
}

/// A widget that draws one frame of the scene
pub struct SceneView<'a> {
    scene: &'a Scene,
    palette: Palette,
    block: Option<Block<'a>>,
}

impl<'a> SceneView<'a> {
    pub fn new(scene: &'a Scene, palette: Palette) -> Self {
        Self {
            scene,
            palette,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Render the scene in the given area
    fn render_scene(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        buf.set_style(area, Style::default().bg(self.palette.background));

        let camera = *self.scene.camera();
        let eye = self.scene.controls().eye();
        let view = camera.view_from(eye, Vec3::ZERO);

        // brightness spans the depth range of the glyph cylinder
        let radius = self.scene.config().scene.cylinder_radius;
        let dist = self.scene.controls().distance();
        let proj = Projection {
            camera,
            view,
            aspect: area.width as f64 * CELL_ASPECT / area.height as f64,
            cols: area.width as f64,
            rows: area.height as f64,
            near_z: (dist - radius).abs().max(camera.near()),
            far_z: dist + radius,
        };

        let mut depth = DepthBuffer::new(area.width, area.height);
        self.render_lock(&proj, area, buf, &mut depth);
        self.render_rain(&proj, area, buf, &mut depth);
    }

    fn render_rain(&self, proj: &Projection, area: Rect, buf: &mut Buffer, depth: &mut DepthBuffer) {
        let face = self.scene.typeface();
        let eye = proj.view.eye();

        for glyph in self.scene.field().glyphs() {
            let Some((cx, cy, z)) = proj.to_cells(glyph.position) else {
                continue;
            };

            // glyphs lose brightness with depth and with turning away
            let toward_eye = (eye - glyph.position).normalized();
            let facing = toward_eye.dot(glyph.facing()).clamp(0.0, 1.0);
            let lum = proj.luminance(z) * (0.4 + 0.6 * facing);
            let style = glyph_style(self.palette.glyph, lum);

            let rows_f = GLYPH_WORLD_SIZE * proj.camera.focal() / z * proj.rows * 0.5;
            let raster = face.and_then(|f| f.raster(glyph.digit));

            match raster {
                Some(raster) if rows_f >= RASTER_THRESHOLD => {
                    let rows = (rows_f.round() as usize).min(MAX_RASTER_ROWS);
                    let cols = ((rows as f64 * raster.width() as f64 / raster.height() as f64)
                        / CELL_ASPECT)
                        .round()
                        .max(1.0) as usize;
                    let x0 = (cx - cols as f64 / 2.0).floor() as i32;
                    let y0 = (cy - rows as f64 / 2.0).floor() as i32;

                    for rr in 0..rows {
                        let src_row = rr * raster.height() / rows;
                        for cc in 0..cols {
                            let src_col = cc * raster.width() / cols;
                            if raster.is_set(src_row, src_col) {
                                put_cell(
                                    area,
                                    buf,
                                    depth,
                                    x0 + cc as i32,
                                    y0 + rr as i32,
                                    z,
                                    '█',
                                    style,
                                );
                            }
                        }
                    }
                }
                _ => {
                    put_cell(
                        area,
                        buf,
                        depth,
                        cx.floor() as i32,
                        cy.floor() as i32,
                        z,
                        glyph.digit,
                        style,
                    );
                }
            }
        }
    }

    fn render_lock(&self, proj: &Projection, area: Rect, buf: &mut Buffer, depth: &mut DepthBuffer) {
        let Some(model) = self.scene.lock() else {
            return;
        };
        let rotation = self.scene.lock_rotation();
        let offset = Vec3::new(0.0, LOCK_OFFSET_Y, 0.0);
        let vertices = model.vertices();
        let style = Style::default().fg(self.palette.lock);

        for &(a, b) in model.edges() {
            let wa = (vertices[a] + offset).rotate_y(rotation);
            let wb = (vertices[b] + offset).rotate_y(rotation);

            let (Some((ax, ay, az)), Some((bx, by, bz))) =
                (proj.to_cells(wa), proj.to_cells(wb))
            else {
                continue;
            };

            // walk the longer cell axis so the line has no gaps
            let steps = (bx - ax).abs().max((by - ay).abs()).ceil().clamp(1.0, 2048.0) as usize;
            for i in 0..=steps {
                let t = i as f64 / steps as f64;
                let x = ax + (bx - ax) * t;
                let y = ay + (by - ay) * t;
                let z = az + (bz - az) * t;
                put_cell(
                    area,
                    buf,
                    depth,
                    x.floor() as i32,
                    y.floor() as i32,
                    z,
                    block_char(proj.luminance(z)),
                    style,
                );
            }
        }
    }
}

impl Widget for SceneView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        self.render_scene(inner_area, buf);
    }
}

/// Everything needed to carry a world point into cell coordinates
struct Projection {
    camera: Camera,
    view: ViewTransform,
    aspect: f64,
    cols: f64,
    rows: f64,
    near_z: f64,
    far_z: f64,
}

impl Projection {
    /// Fractional cell coordinates plus view depth, `None` when clipped
    fn to_cells(&self, p: Vec3) -> Option<(f64, f64, f64)> {
        let v = self.view.to_view(p);
        let (nx, ny) = self.camera.project(v, self.aspect)?;
        let cx = (nx + 1.0) * 0.5 * self.cols;
        let cy = (1.0 - ny) * 0.5 * self.rows;
        Some((cx, cy, v.z))
    }

    /// 1 at the nearest rain depth, 0 at the farthest
    fn luminance(&self, depth: f64) -> f64 {
        if self.far_z <= self.near_z {
            return 1.0;
        }
        (1.0 - (depth - self.near_z) / (self.far_z - self.near_z)).clamp(0.0, 1.0)
    }
}

/// Per-frame depth buffer; the smallest depth wins the cell
struct DepthBuffer {
    width: usize,
    depths: Vec<f64>,
}

impl DepthBuffer {
    fn new(width: u16, height: u16) -> Self {
        DepthBuffer {
            width: width as usize,
            depths: vec![f64::INFINITY; width as usize * height as usize],
        }
    }

    /// True when `depth` is nearer than what the cell holds; records it
    fn test_and_set(&mut self, x: usize, y: usize, depth: f64) -> bool {
        let idx = y * self.width + x;
        if depth < self.depths[idx] {
            self.depths[idx] = depth;
            true
        } else {
            false
        }
    }
}

fn put_cell(
    area: Rect,
    buf: &mut Buffer,
    depth: &mut DepthBuffer,
    cx: i32,
    cy: i32,
    z: f64,
    symbol: char,
    style: Style,
) {
    if cx < 0 || cy < 0 || cx >= area.width as i32 || cy >= area.height as i32 {
        return;
    }
    if !depth.test_and_set(cx as usize, cy as usize, z) {
        return;
    }
    let cell = &mut buf[(area.x + cx as u16, area.y + cy as u16)];
    cell.set_char(symbol);
    cell.set_style(style);
}

/// Map luminance to a terminal-safe brightness tier
fn glyph_style(color: Color, lum: f64) -> Style {
    if lum > 0.66 {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else if lum > 0.40 {
        Style::default().fg(color)
    } else if lum > 0.20 {
        Style::default().fg(color).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Block shade for the wireframe, nearest to farthest
fn block_char(lum: f64) -> char {
    if lum > 0.75 {
        '█'
    } else if lum > 0.5 {
        '▓'
    } else if lum > 0.25 {
        '▒'
    } else {
        '░'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{parse_typeface, LockModel};
    use crate::config::LockrainConfig;

    fn test_scene() -> Scene {
        let mut config = LockrainConfig::default();
        config.scene.number_of_lines = 8;
        config.scene.numbers_per_line = 4;
        config.scene.seed = Some(3);

        let mut scene = Scene::new(config);
        scene.install_typeface(
            parse_typeface(
                r####"{"name": "t", "glyphs": {
                    "0": ["###", "#.#", "#.#", "#.#", "###"],
                    "1": [".#.", "##.", ".#.", ".#.", "###"]
                }}"####,
            )
            .unwrap(),
        );
        scene
    }

    fn default_palette() -> Palette {
        Palette::from_config(&RenderConfig::default()).unwrap()
    }

    #[test]
    fn test_palette_from_default_config() {
        let palette = default_palette();

        assert_eq!(palette.glyph, Color::Green);
        assert_eq!(palette.lock, Color::White);
        assert_eq!(palette.background, Color::Rgb(0x18, 0x18, 0x18));
    }

    #[test]
    fn test_palette_rejects_unknown_color() {
        let mut render = RenderConfig::default();
        render.glyph_color = "chartreuse-ish".to_string();

        assert!(Palette::from_config(&render).is_err());
    }

    #[test]
    fn test_depth_buffer_nearer_wins() {
        let mut depth = DepthBuffer::new(4, 4);

        assert!(depth.test_and_set(1, 1, 50.0));
        assert!(depth.test_and_set(1, 1, 10.0));
        assert!(!depth.test_and_set(1, 1, 30.0));
        assert!(depth.test_and_set(2, 1, 30.0));
    }

    #[test]
    fn test_render_draws_glyphs_over_background() {
        let scene = test_scene();
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);

        SceneView::new(&scene, default_palette()).render(area, &mut buf);

        let mut inked = 0;
        for y in 0..20 {
            for x in 0..40 {
                let cell = &buf[(x, y)];
                assert_eq!(cell.bg, Color::Rgb(0x18, 0x18, 0x18));
                if cell.symbol() != " " {
                    inked += 1;
                    let ch = cell.symbol().chars().next().unwrap();
                    assert!(matches!(ch, '0' | '1' | '█'));
                }
            }
        }
        assert!(inked > 0);
    }

    #[test]
    fn test_render_without_assets_is_blank() {
        let scene = Scene::new(LockrainConfig::default());
        let area = Rect::new(0, 0, 30, 12);
        let mut buf = Buffer::empty(area);

        SceneView::new(&scene, default_palette()).render(area, &mut buf);

        for y in 0..12 {
            for x in 0..30 {
                assert_eq!(buf[(x, y)].symbol(), " ");
            }
        }
    }

    #[test]
    fn test_render_lock_wireframe() {
        let mut config = LockrainConfig::default();
        config.scene.seed = Some(1);
        let mut scene = Scene::new(config);
        // a simple quad in front of the camera once offset and spun
        scene.install_lock(
            LockModel::parse_obj(
                "v -10 10 0\nv 10 10 0\nv 10 30 0\nv -10 30 0\nf 1 2 3 4\n",
            )
            .unwrap(),
        );

        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        SceneView::new(&scene, default_palette()).render(area, &mut buf);

        let mut shaded = 0;
        for y in 0..24 {
            for x in 0..60 {
                let ch = buf[(x, y)].symbol();
                if ch == "█" || ch == "▓" || ch == "▒" || ch == "░" {
                    shaded += 1;
                }
            }
        }
        assert!(shaded > 0);
    }

    #[test]
    fn test_render_with_block() {
        let scene = test_scene();
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);

        SceneView::new(&scene, default_palette())
            .block(Block::bordered().title(" lockrain "))
            .render(area, &mut buf);
        // Should not panic
    }

    #[test]
    fn test_zero_area_render() {
        let scene = test_scene();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        SceneView::new(&scene, default_palette()).render(area, &mut buf);
        // Should not panic
    }

    #[test]
    fn test_glyph_style_tiers() {
        let bright = glyph_style(Color::Green, 0.9);
        assert!(bright.add_modifier.contains(Modifier::BOLD));

        let mid = glyph_style(Color::Green, 0.5);
        assert_eq!(mid.fg, Some(Color::Green));
        assert!(!mid.add_modifier.contains(Modifier::BOLD));

        let dim = glyph_style(Color::Green, 0.3);
        assert!(dim.add_modifier.contains(Modifier::DIM));

        let faint = glyph_style(Color::Green, 0.05);
        assert_eq!(faint.fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_block_char_tiers() {
        assert_eq!(block_char(1.0), '█');
        assert_eq!(block_char(0.6), '▓');
        assert_eq!(block_char(0.3), '▒');
        assert_eq!(block_char(0.0), '░');
    }
}
