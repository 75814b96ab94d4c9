// BuildSleuth - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// The parser itself never errors; everything here belongs to the I/O and
// presentation layers surrounding it.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all BuildSleuth operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum BuildSleuthError {
    /// The editor log could not be located.
    Locate(LocateError),

    /// Export of the record table failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for BuildSleuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locate(e) => write!(f, "Editor log error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for BuildSleuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Locate(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Locate errors
// ---------------------------------------------------------------------------

/// Errors related to finding the Unity editor log on disk.
#[derive(Debug)]
pub enum LocateError {
    /// The host OS has no known editor log location.
    UnsupportedPlatform { os: &'static str },

    /// The user's home / local-data directory could not be determined.
    NoHomeDirectory,

    /// The resolved log path does not exist.
    LogNotFound { path: PathBuf },
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedPlatform { os } => {
                write!(f, "No known Unity Editor.log location on '{os}'")
            }
            Self::NoHomeDirectory => {
                write!(f, "Could not determine the user's home directory")
            }
            Self::LogNotFound { path } => write!(
                f,
                "Editor log '{}' does not exist. Run a player build in Unity first, \
                 or pass the log path explicitly.",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LocateError {}

impl From<LocateError> for BuildSleuthError {
    fn from(e: LocateError) -> Self {
        Self::Locate(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for BuildSleuthError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Problems found while loading `config.toml`.
///
/// Never fatal: the loader turns each one into a startup warning and falls
/// back to defaults.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for BuildSleuth results.
pub type Result<T> = std::result::Result<T, BuildSleuthError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_error_display_includes_path_and_operation() {
        let err = BuildSleuthError::Io {
            path: PathBuf::from("Editor.log"),
            operation: "copy",
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let text = err.to_string();
        assert!(text.contains("copy"));
        assert!(text.contains("Editor.log"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_locate_error_converts_into_top_level() {
        let err: BuildSleuthError = LocateError::NoHomeDirectory.into();
        assert!(matches!(err, BuildSleuthError::Locate(_)));
        assert!(err.to_string().starts_with("Editor log error"));
    }
}
