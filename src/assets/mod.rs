//! Asset loading
//!
//! Two independent resources feed the scene: a digit typeface (JSON rasters,
//! local path or http(s) URL) and a padlock wireframe model (OBJ subset,
//! local path). Loads run as background tasks; results come back over
//! oneshot channels that the render loop polls once per tick. A failed load
//! is reported once and its contribution is omitted for good; there is no
//! retry.

mod font;
mod model;

pub use font::{load_typeface, parse_typeface, DigitFace, GlyphRaster};
pub use model::{load_model, LockModel};

use thiserror::Error;
use tokio::sync::oneshot;

/// Errors produced while resolving an asset
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        source: reqwest::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid typeface JSON: {0}")]
    TypefaceJson(#[from] serde_json::Error),

    #[error("invalid typeface: {0}")]
    InvalidTypeface(String),

    #[error("invalid model: {0}")]
    InvalidModel(String),
}

/// Outcome of one asset load
pub type LoadResult<T> = Result<T, AssetError>;

/// Kick off the typeface load in the background.
///
/// Must be called with a tokio runtime entered. The receiver yields exactly
/// one result; if the task is dropped the receiver reports closure.
pub fn spawn_typeface_load(source: String) -> oneshot::Receiver<LoadResult<DigitFace>> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = tx.send(font::load_typeface(&source).await);
    });
    rx
}

/// Kick off the model load in the background
pub fn spawn_model_load(path: String) -> oneshot::Receiver<LoadResult<LockModel>> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = tx.send(model::load_model(&path).await);
    });
    rx
}
