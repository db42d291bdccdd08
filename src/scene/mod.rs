//! Scene state and the per-frame step
//!
//! Owns everything the frame loop mutates: the glyph field, the padlock
//! model and its container rotation, the camera, and the orbit controls.
//! Assets arrive in the background after startup; the scene animates from
//! the first frame and renders whatever it has.

mod camera;
mod controls;

pub use camera::{Camera, ViewTransform};
pub use controls::OrbitControls;

use std::f64::consts::TAU;

use crate::assets::{DigitFace, LockModel};
use crate::config::LockrainConfig;
use crate::field::{GlyphField, Xorshift64};

/// Y rotation added to the lock container every frame, in radians
pub const LOCK_SPIN: f64 = 0.01;

/// Vertical offset that centers the padlock inside its spinning container
pub const LOCK_OFFSET_Y: f64 = -18.0;

/// Where an asset stands, from the scene's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Loading,
    Ready,
    Failed,
}

/// Everything the animation loop reads and advances
pub struct Scene {
    config: LockrainConfig,
    field: GlyphField,
    typeface: Option<DigitFace>,
    lock: Option<LockModel>,
    lock_rotation: f64,
    camera: Camera,
    controls: OrbitControls,
    rng: Xorshift64,
    frame: u64,
    typeface_failed: bool,
    lock_failed: bool,
    failures: Vec<String>,
}

impl Scene {
    /// Build a scene with no assets yet: an empty field, the camera on its
    /// starting ring position, the lock slot vacant
    pub fn new(config: LockrainConfig) -> Self {
        let rng = match config.scene.seed {
            Some(seed) => Xorshift64::new(seed),
            None => Xorshift64::from_clock(),
        };
        let camera = Camera::new(config.camera.fov_degrees);
        let controls = OrbitControls::new(&config.camera);
        let field = GlyphField::empty(config.scene.min_y, config.scene.max_y);

        Scene {
            config,
            field,
            typeface: None,
            lock: None,
            lock_rotation: 0.0,
            camera,
            controls,
            rng,
            frame: 0,
            typeface_failed: false,
            lock_failed: false,
            failures: Vec::new(),
        }
    }

    /// The typeface arrived: populate the cylinder
    pub fn install_typeface(&mut self, face: DigitFace) {
        self.field = GlyphField::generate(&self.config.scene, &mut self.rng);
        self.typeface = Some(face);
        self.typeface_failed = false;
    }

    /// The typeface could not be loaded. The field stays empty; the rest of
    /// the scene keeps animating.
    pub fn typeface_unavailable(&mut self, reason: String) {
        self.typeface_failed = true;
        self.failures.push(format!("typeface unavailable: {}", reason));
    }

    /// The padlock model arrived
    pub fn install_lock(&mut self, model: LockModel) {
        self.lock = Some(model);
        self.lock_failed = false;
    }

    /// The padlock model could not be loaded
    pub fn lock_unavailable(&mut self, reason: String) {
        self.lock_failed = true;
        self.failures
            .push(format!("padlock model unavailable: {}", reason));
    }

    /// Advance the scene by one frame: coast the orbit, spin the lock
    /// container, move every glyph down its line
    pub fn step(&mut self) {
        self.controls.update();
        self.lock_rotation = (self.lock_rotation + LOCK_SPIN).rem_euclid(TAU);
        self.field.step();
        self.frame += 1;
    }

    pub fn config(&self) -> &LockrainConfig {
        &self.config
    }

    pub fn field(&self) -> &GlyphField {
        &self.field
    }

    pub fn typeface(&self) -> Option<&DigitFace> {
        self.typeface.as_ref()
    }

    pub fn lock(&self) -> Option<&LockModel> {
        self.lock.as_ref()
    }

    /// Current Y rotation of the lock container, always in [0, tau)
    pub fn lock_rotation(&self) -> f64 {
        self.lock_rotation
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn typeface_status(&self) -> AssetStatus {
        if self.typeface.is_some() {
            AssetStatus::Ready
        } else if self.typeface_failed {
            AssetStatus::Failed
        } else {
            AssetStatus::Loading
        }
    }

    pub fn lock_status(&self) -> AssetStatus {
        if self.lock.is_some() {
            AssetStatus::Ready
        } else if self.lock_failed {
            AssetStatus::Failed
        } else {
            AssetStatus::Loading
        }
    }

    /// Load failures collected so far, in arrival order
    pub fn asset_failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::parse_typeface;

    fn small_config() -> LockrainConfig {
        let mut config = LockrainConfig::default();
        config.scene.number_of_lines = 4;
        config.scene.numbers_per_line = 3;
        config.scene.seed = Some(7);
        config
    }

    fn face() -> DigitFace {
        parse_typeface(
            r####"{"name": "t", "glyphs": {"0": ["##", "##"], "1": [".#", ".#"]}}"####,
        )
        .unwrap()
    }

    fn lock() -> LockModel {
        LockModel::parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\nl 1 2 3\n").unwrap()
    }

    #[test]
    fn test_new_scene_is_empty_and_loading() {
        let scene = Scene::new(small_config());

        assert!(scene.field().is_empty());
        assert_eq!(scene.frame(), 0);
        assert_eq!(scene.lock_rotation(), 0.0);
        assert_eq!(scene.typeface_status(), AssetStatus::Loading);
        assert_eq!(scene.lock_status(), AssetStatus::Loading);
    }

    #[test]
    fn test_typeface_arrival_populates_field() {
        let mut scene = Scene::new(small_config());
        scene.install_typeface(face());

        assert_eq!(scene.field().glyph_count(), 4 * 3);
        assert_eq!(scene.typeface_status(), AssetStatus::Ready);
    }

    #[test]
    fn test_animation_runs_without_typeface() {
        let mut scene = Scene::new(small_config());
        scene.typeface_unavailable("connection refused".to_string());
        scene.install_lock(lock());

        for _ in 0..10 {
            scene.step();
        }

        assert!(scene.field().is_empty());
        assert_eq!(scene.frame(), 10);
        assert!((scene.lock_rotation() - 10.0 * LOCK_SPIN).abs() < 1e-12);
        assert_eq!(scene.typeface_status(), AssetStatus::Failed);
        assert_eq!(scene.lock_status(), AssetStatus::Ready);
    }

    #[test]
    fn test_step_advances_field_and_spin() {
        let mut scene = Scene::new(small_config());
        scene.install_typeface(face());

        let y_before = scene.field().glyphs().next().unwrap().position.y;
        scene.step();
        let y_after = scene.field().glyphs().next().unwrap().position.y;

        assert!(y_after < y_before);
        assert!((scene.lock_rotation() - LOCK_SPIN).abs() < 1e-12);
        assert_eq!(scene.frame(), 1);
    }

    #[test]
    fn test_lock_rotation_stays_bounded() {
        let mut scene = Scene::new(small_config());
        for _ in 0..100_000 {
            scene.step();
        }

        assert!(scene.lock_rotation() >= 0.0);
        assert!(scene.lock_rotation() < TAU);
    }

    #[test]
    fn test_step_coasts_the_orbit() {
        let mut scene = Scene::new(small_config());
        scene.controls_mut().rotate(0.05);
        scene.step();

        assert!(scene.controls().azimuth() > 0.0);
    }

    #[test]
    fn test_seeded_scenes_agree() {
        let mut a = Scene::new(small_config());
        let mut b = Scene::new(small_config());
        a.install_typeface(face());
        b.install_typeface(face());

        let digits_a: Vec<char> = a.field().glyphs().map(|g| g.digit).collect();
        let digits_b: Vec<char> = b.field().glyphs().map(|g| g.digit).collect();
        assert_eq!(digits_a, digits_b);
    }

    #[test]
    fn test_failures_are_recorded_once_each() {
        let mut scene = Scene::new(small_config());
        scene.typeface_unavailable("404".to_string());
        scene.lock_unavailable("no such file".to_string());

        assert_eq!(scene.asset_failures().len(), 2);
        assert!(scene.asset_failures()[0].contains("404"));
        assert!(scene.asset_failures()[1].contains("no such file"));
    }
}
