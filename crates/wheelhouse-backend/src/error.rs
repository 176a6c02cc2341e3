//! Error types for the Wheelhouse backends

use std::fmt;

#[derive(Debug)]
pub enum BackendError {
    PackageNotFound { filename: String },
    Config(String),
}

impl BackendError {
    pub fn not_found(filename: impl Into<String>) -> Self {
        BackendError::PackageNotFound {
            filename: filename.into(),
        }
    }

    /// True if the error is a missing-package lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::PackageNotFound { .. })
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::PackageNotFound { filename } => {
                write!(f, "Package not found: {}", filename)
            }
            BackendError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

pub type Result<T> = std::result::Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_not_found_display() {
        let err = BackendError::not_found("mypkg-1.1.tar.gz");
        assert_eq!(format!("{}", err), "Package not found: mypkg-1.1.tar.gz");
    }

    #[test]
    fn test_config_error_display() {
        let err = BackendError::Config("bad value for allow_overwrite".to_string());
        assert_eq!(
            format!("{}", err),
            "Configuration error: bad value for allow_overwrite"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(BackendError::not_found("a-1.0.tar.gz").is_not_found());
        assert!(!BackendError::Config("oops".to_string()).is_not_found());
    }

    #[test]
    fn test_error_is_debug() {
        let err = BackendError::not_found("a-1.0.tar.gz");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("PackageNotFound"));
    }
}
