//! Loading sprite, font and sound assets from disk.
//!
//! Assets are referenced by a dotted identifier, `"sprites.player"` maps to
//! `<asset dir>/sprites/player.<extension>`. Adapters load assets lazily on
//! first reference and cache them until shutdown.

pub mod font;
pub mod sprite;

use std::path::{PathBuf, MAIN_SEPARATOR_STR};

use thiserror::Error;

use crate::error::BoxedError;

/// Where assets are retrieved from.
#[derive(Debug, Clone)]
pub struct AssetSource {
    /// Path to the directory of all assets.
    asset_dir: PathBuf,
}

impl AssetSource {
    /// Create a source reading from a directory on disk.
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
        }
    }

    /// Read the raw bytes of an asset.
    ///
    /// # Errors
    ///
    /// - When no file exists for the identifier and extension.
    /// - When the file exists but could not be read.
    pub fn raw(&self, id: &str, extension: &str) -> Result<Vec<u8>, LoadError> {
        log::debug!("Loading asset '{id}' with extension '{extension}'");

        // Convert the ID back to a file path
        let file_path = self
            .asset_dir
            .join(format!("{}.{extension}", id.replace('.', MAIN_SEPARATOR_STR)));

        std::fs::read(file_path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::Missing { id: id.to_owned() }
            } else {
                LoadError::Io {
                    id: id.to_owned(),
                    source,
                }
            }
        })
    }
}

/// An asset could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No file exists for the identifier.
    #[error("asset '{id}' not found")]
    Missing {
        /// Identifier of the asset.
        id: String,
    },
    /// The file exists but reading it failed.
    #[error("reading asset '{id}'")]
    Io {
        /// Identifier of the asset.
        id: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// The file bytes could not be decoded.
    #[error("decoding asset '{id}'")]
    Decode {
        /// Identifier of the asset.
        id: String,
        /// Underlying decoder error.
        #[source]
        source: BoxedError,
    },
    /// The file decoded but its content does not fit the asset type.
    #[error("asset '{id}' is malformed: {reason}")]
    Malformed {
        /// Identifier of the asset.
        id: String,
        /// What is wrong with it.
        reason: String,
    },
}
