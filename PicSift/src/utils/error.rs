///! Error types for PicSift
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PicSiftError {
    #[error("Image processing error: {0}")]
    Image(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("Decode probe timed out after {0} ms")]
    Timeout(u128),
}

impl PicSiftError {
    /// Whether the error came from reading blob content rather than decoding it
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, PicSiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PicSiftError = io.into();
        assert!(err.is_io());
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_timeout_message() {
        let err = PicSiftError::Timeout(250);
        assert!(!err.is_io());
        assert_eq!(err.to_string(), "Decode probe timed out after 250 ms");
    }
}
