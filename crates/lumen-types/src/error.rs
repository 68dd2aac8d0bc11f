//! Error types for the Lumen redraw engine.

use std::io;

/// Errors produced while redrawing a document.
///
/// Any error aborts the redraw pass at the point it occurs. The surface may
/// hold a partially painted frame; nothing is rolled back.
#[derive(Debug, thiserror::Error)]
pub enum RedrawError {
    #[error("plotter error: {0}")]
    Plotter(String),

    #[error("content error: {0}")]
    Content(String),

    #[error("font metrics error: {0}")]
    FontMetrics(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, RedrawError>;
