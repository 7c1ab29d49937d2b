//! Error types shared across the crate.
//!
//! Three severities exist at runtime:
//! - fatal-init ([`InitError`]): a required asset failed to load, startup aborts;
//! - degraded-warning ([`crate::renderer::text::FontWarning`]): the font loaded
//!   but cannot draw, startup continues with invisible text;
//! - soft-miss: a missing glyph or an exhausted bullet pool, handled locally
//!   with no error value at all.

use std::path::PathBuf;

/// Failure to read an asset from disk.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// Image could not be opened or decoded.
    #[error("failed to load image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Font description file could not be opened.
    #[error("font description {path:?} could not be opened: {source}")]
    FontNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal startup failure: the scene cannot run without this asset.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("{asset} texture failed to load")]
    Texture {
        asset: &'static str,
        #[source]
        source: AssetError,
    },

    #[error("font data failed to load")]
    Font(#[source] AssetError),
}

/// Configuration file errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// GPU setup failures.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("could not create window surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// Top-level error returned by [`crate::engine::run`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error(transparent)]
    Os(#[from] winit::error::OsError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Init(#[from] InitError),
}
