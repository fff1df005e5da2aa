//! Muxer error types.

use thiserror::Error;

/// Errors that can occur during MP4 muxing.
#[derive(Error, Debug)]
pub enum MuxError {
    /// I/O error on the output sink (write or seek).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Caller broke the muxer contract (malformed parameter-set buffer,
    /// finalize before any sample, double finalize).
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// A box grew past the 32-bit size field.
    #[error("Box size {0} exceeds 32-bit limit")]
    BoxTooLarge(u64),
}

/// Convenience Result type for mux operations.
pub type MuxResult<T> = Result<T, MuxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let mux_err = MuxError::from(io_err);
        assert!(mux_err.to_string().contains("IO error"));
        assert!(mux_err.to_string().contains("file not found"));
    }

    #[test]
    fn display_precondition() {
        let err = MuxError::Precondition("finalize called twice".into());
        assert_eq!(err.to_string(), "Precondition violated: finalize called twice");
    }

    #[test]
    fn display_box_too_large() {
        let err = MuxError::BoxTooLarge(5_000_000_000);
        assert!(err.to_string().contains("5000000000"));
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let mux_err: MuxError = io_err.into();
        assert!(matches!(mux_err, MuxError::Io(_)));
    }
}
