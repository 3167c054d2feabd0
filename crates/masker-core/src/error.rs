use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Interrupted")]
    Interrupted,
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 1,
            // Never fatal on its own; surfaces only if a caller gives up on a record
            Error::MalformedRecord { .. } => 1,
            Error::Io(_) => 2,
            Error::UnsupportedFileType(_) => 3,
            Error::Interrupted => 130,
        }
    }

    /// Whether the pipeline may skip the offending record and continue
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::MalformedRecord { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::config("bad").exit_code(), 1);
        assert_eq!(
            Error::Io(std::io::Error::other("disk full")).exit_code(),
            2
        );
        assert_eq!(Error::UnsupportedFileType("x.bin".into()).exit_code(), 3);
        assert_eq!(Error::Interrupted.exit_code(), 130);
    }

    #[test]
    fn test_only_malformed_is_recoverable() {
        assert!(Error::malformed(3, "short row").is_recoverable());
        assert!(!Error::config("bad").is_recoverable());
        assert!(!Error::Interrupted.is_recoverable());
    }
}
