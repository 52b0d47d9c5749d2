use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid composite parameters: {0}")]
    InvalidParams(String),

    #[error("Invalid dimensions: {what} is {width}x{height}")]
    InvalidDimensions {
        what: &'static str,
        width: u32,
        height: u32,
    },
}

impl AssetError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssetError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = AssetError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_path() {
        let err = AssetError::io(
            "public/sounds/ui/click.mp3",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("public/sounds/ui/click.mp3"), "{msg}");
        assert!(msg.contains("denied"), "{msg}");
    }

    #[test]
    fn dimensions_message() {
        let err = AssetError::InvalidDimensions {
            what: "product",
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "Invalid dimensions: product is 0x10");
    }
}
