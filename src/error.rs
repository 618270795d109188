//! Error types for the asset generator

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating store assets
#[derive(Error, Debug)]
pub enum Error {
    /// The brand icon every other artifact is derived from is absent
    #[error("Missing source icon: {}. Add your brand icon before generating.", path.display())]
    MissingSourceIcon { path: PathBuf },

    /// Filesystem failure on a specific path
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Decoding or encoding an image failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The iconset manifest could not be parsed
    #[error("Malformed icon manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A manifest entry carried an unreadable size or scale
    #[error("Invalid icon size: {0}")]
    InvalidIconSize(String),

    /// A shot refers to a screen key with no configured source file
    #[error("No source screen configured for key '{0}'")]
    UnknownScreen(String),

    /// A color literal could not be parsed
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Drawing failed (degenerate geometry, allocation failure)
    #[error("Rendering failed: {0}")]
    Render(String),
}

impl Error {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_icon_message_names_the_path() {
        let err = Error::MissingSourceIcon {
            path: PathBuf::from("assets/branding/app_icon_source.png"),
        };
        let msg = err.to_string();
        assert!(msg.contains("assets/branding/app_icon_source.png"));
        assert!(msg.starts_with("Missing source icon"));
    }
}
