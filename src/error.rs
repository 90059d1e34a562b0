//! Error taxonomy of the backend contract.
//!
//! Native library errors are wrapped as boxed sources so the underlying
//! windowing or rendering crate never leaks across the contract.

use thiserror::Error;

use crate::assets::LoadError;

/// Boxed source error from an underlying library.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// The environment could not provide a window or rendering context.
#[derive(Debug, Error)]
pub enum InitError {
    /// No display server could be reached.
    #[error("connecting to the display server")]
    Display(#[source] BoxedError),
    /// The window itself could not be created.
    #[error("creating the window")]
    Window(#[source] BoxedError),
    /// The presentation surface on the window could not be created.
    #[error("creating the render surface")]
    Surface(#[source] BoxedError),
}

/// A draw call could not be applied to the current frame.
#[derive(Debug, Error)]
pub enum DrawError {
    /// Draw call issued while no frame was begun.
    #[error("draw call outside an active frame")]
    FrameNotStarted,
    /// `begin_frame` called twice without presenting in between.
    #[error("a frame is already in progress")]
    FrameInProgress,
    /// Operation on a backend that has already been shut down.
    #[error("the backend has been shut down")]
    ShutDown,
    /// A referenced sprite or font could not be loaded.
    #[error("loading asset '{id}' for a draw call")]
    Asset {
        /// Identifier of the asset the draw call referenced.
        id: String,
        /// Why loading failed.
        #[source]
        source: LoadError,
    },
}

/// The completed frame could not be published to the display.
#[derive(Debug, Error)]
pub enum PresentError {
    /// Present called while no frame was begun.
    #[error("present without an active frame")]
    FrameNotStarted,
    /// Operation on a backend that has already been shut down.
    #[error("the backend has been shut down")]
    ShutDown,
    /// The display subsystem rejected the frame.
    #[error("presenting the frame to the display")]
    Display(#[source] BoxedError),
}

/// Configuration could not be parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML source is not a valid configuration.
    #[error("parsing configuration")]
    Parse(#[from] toml::de::Error),
}

/// A frame snapshot could not be written to disk.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The target file could not be created or written.
    #[error("writing capture file")]
    Io(#[from] std::io::Error),
    /// The pixel data could not be encoded as PNG.
    #[error("encoding capture as PNG")]
    Encode(#[from] png::EncodingError),
}
