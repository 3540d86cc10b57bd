use std::io;
use std::path::PathBuf;

/// Exit status for a run that failed before touching anything.
pub const EXIT_CONFIGURATION: u8 = 2;
/// Exit status for a roster that could not be read as expected.
pub const EXIT_MALFORMED_INPUT: u8 = 3;
/// Exit status for a directory creation or move that failed mid-run.
pub const EXIT_FILESYSTEM: u8 = 4;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Configuration(String),

    #[error("malformed roster {source_name}: {message}")]
    MalformedInput { source_name: String, message: String },

    #[error("failed to {action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A move would replace a file that is already in the student folder.
    #[error("refusing to overwrite existing file: {}", .path.display())]
    DestinationExists { path: PathBuf },
}

impl Error {
    pub fn filesystem(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn malformed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::MalformedInput {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Configuration(_) => EXIT_CONFIGURATION,
            Error::MalformedInput { .. } => EXIT_MALFORMED_INPUT,
            Error::Filesystem { .. } | Error::DestinationExists { .. } => EXIT_FILESYSTEM,
        }
    }
}
