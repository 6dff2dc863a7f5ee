//! Engine error types.

use thiserror::Error;

/// Errors surfaced by the engine.
///
/// Every kind is fatal to the frame loop; nothing here is retried.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("startup failed: {0}")]
    Startup(String),

    #[error("no active scene")]
    NoActiveScene,

    #[error("invalid target frame rate: {0} (must be a positive, finite number)")]
    InvalidFrameRate(f64),

    #[error("scene `{scene}` failed during setup")]
    SceneSetup {
        scene: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("scene `{scene}` failed during a frame")]
    SceneFrame {
        scene: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("unknown scene: {0}")]
    UnknownScene(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("preference `{key}`: {reason}")]
    Preference { key: String, reason: String },

    #[error("preferences I/O error: {0}")]
    PreferencesIo(#[from] std::io::Error),

    #[error("preferences format error: {0}")]
    PreferencesFormat(#[from] serde_json::Error),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
