//! Error taxonomy for asset resolution
//!
//! None of these errors escape the middleware: each one is either a
//! fallthrough to the next handler or a terminal HTTP status.

use hyper::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    /// Metadata lookup failed, usually because the file does not exist
    #[error("asset not found at {}: {source}", path.display())]
    Missing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The location climbs above the base directory
    #[error("asset location escapes the base directory: {location}")]
    OutsideBase { location: String },

    #[error("asset path is a directory: {}", path.display())]
    IsDirectory { path: PathBuf },

    #[error("failed to open asset {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AssetError {
    /// Status to answer with, or `None` when the request should fall through
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Missing { .. } | Self::OutsideBase { .. } => None,
            Self::IsDirectory { .. } => Some(StatusCode::NOT_FOUND),
            Self::Open { .. } => Some(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
