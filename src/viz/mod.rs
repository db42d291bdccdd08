//! Terminal visualization
//!
//! Provides the live TUI:
//! - 3D scene canvas (glyph rain plus the rotating padlock)
//! - Status bar with asset state and camera readout
//! - Keyboard orbit, zoom, pause and quit
//!
//! The loop runs at a fixed tick rate taken from the render configuration.
//! Asset loads finish in the background; each tick polls their channels and
//! splices results into the scene without stalling the animation.

mod canvas;
mod recorder;

pub use canvas::{Palette, SceneView};
pub use recorder::FrameRecorder;

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::oneshot;

use crate::assets::{AssetError, DigitFace, LockModel};
use crate::scene::{AssetStatus, Scene};

/// Azimuthal impulse per arrow key press, radians per frame
const ROTATE_IMPULSE: f64 = 0.02;

/// Dolly distance per zoom key press
const ZOOM_STEP: f64 = 2.0;

/// In-flight asset loads, polled once per tick
pub struct PendingAssets {
    pub typeface: Option<oneshot::Receiver<Result<DigitFace, AssetError>>>,
    pub model: Option<oneshot::Receiver<Result<LockModel, AssetError>>>,
}

impl PendingAssets {
    /// Kick off both loads. Must be called with a tokio runtime entered.
    pub fn spawn(assets: &crate::config::AssetsConfig) -> Self {
        Self {
            typeface: Some(crate::assets::spawn_typeface_load(assets.typeface.clone())),
            model: Some(crate::assets::spawn_model_load(assets.model.clone())),
        }
    }

    /// No loads in flight; the scene stays as constructed
    pub fn none() -> Self {
        Self {
            typeface: None,
            model: None,
        }
    }

    /// Splice any finished loads into the scene
    pub fn poll(&mut self, scene: &mut Scene) {
        use tokio::sync::oneshot::error::TryRecvError;

        if let Some(mut rx) = self.typeface.take() {
            match rx.try_recv() {
                Ok(Ok(face)) => scene.install_typeface(face),
                Ok(Err(err)) => scene.typeface_unavailable(err.to_string()),
                Err(TryRecvError::Empty) => self.typeface = Some(rx),
                Err(TryRecvError::Closed) => {
                    scene.typeface_unavailable("load task dropped".to_string())
                }
            }
        }

        if let Some(mut rx) = self.model.take() {
            match rx.try_recv() {
                Ok(Ok(model)) => scene.install_lock(model),
                Ok(Err(err)) => scene.lock_unavailable(err.to_string()),
                Err(TryRecvError::Empty) => self.model = Some(rx),
                Err(TryRecvError::Closed) => {
                    scene.lock_unavailable("load task dropped".to_string())
                }
            }
        }
    }
}

/// Undoes terminal setup on drop, covering error exits from the loop
struct TerminalRestore;

impl Drop for TerminalRestore {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the live TUI until the user quits
pub fn run(scene: &mut Scene, mut pending: PendingAssets) -> Result<()> {
    let palette = Palette::from_config(&scene.config().render)?;
    let tick = Duration::from_secs_f64(1.0 / scene.config().render.fps as f64);

    // Setup terminal; the guard restores it on every exit path
    enable_raw_mode()?;
    let _restore = TerminalRestore;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut paused = false;
    let mut last_tick = Instant::now();

    // Main loop
    loop {
        pending.poll(scene);

        // Draw UI
        terminal.draw(|f| draw_ui(f, scene, palette, paused))?;

        // Handle input until the next tick is due
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => break,
                    (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Char(' '), _) => paused = !paused,
                    (KeyCode::Left, _) => scene.controls_mut().rotate(ROTATE_IMPULSE),
                    (KeyCode::Right, _) => scene.controls_mut().rotate(-ROTATE_IMPULSE),
                    (KeyCode::Up, _) => scene.controls_mut().zoom(ZOOM_STEP),
                    (KeyCode::Down, _) => scene.controls_mut().zoom(-ZOOM_STEP),
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick {
            if !paused {
                scene.step();
            }
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn draw_ui(f: &mut Frame, scene: &Scene, palette: Palette, paused: bool) {
    let area = f.area();

    // Layout: scene canvas on top, status at bottom
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Canvas
            Constraint::Length(3), // Status
        ])
        .split(area);

    let view = SceneView::new(scene, palette)
        .block(Block::default().borders(Borders::ALL).title(" lockrain "));
    f.render_widget(view, chunks[0]);

    draw_status(f, chunks[1], scene, paused);
}

fn draw_status(f: &mut Frame, area: Rect, scene: &Scene, paused: bool) {
    let status = if paused { "PAUSED" } else { "RUNNING" };
    let status_color = if paused { Color::Yellow } else { Color::Green };

    let text = Line::from(vec![
        Span::raw("  Status: "),
        Span::styled(status, Style::default().fg(status_color)),
        Span::raw("  |  typeface: "),
        asset_span(scene.typeface_status()),
        Span::raw("  lock: "),
        asset_span(scene.lock_status()),
        Span::raw(format!(
            "  |  dist {:.0}  az {:.2}",
            scene.controls().distance(),
            scene.controls().azimuth()
        )),
        Span::raw("  |  \u{2190}/\u{2192} orbit  \u{2191}/\u{2193} zoom  Space: pause  q: quit"),
    ]);

    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));

    f.render_widget(paragraph, area);
}

fn asset_span(status: AssetStatus) -> Span<'static> {
    match status {
        AssetStatus::Loading => Span::styled("loading", Style::default().fg(Color::Yellow)),
        AssetStatus::Ready => Span::styled("ready", Style::default().fg(Color::Green)),
        AssetStatus::Failed => Span::styled("failed", Style::default().fg(Color::Red)),
    }
}
