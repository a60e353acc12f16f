use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnisomapError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Output paths have not been initialized, run `init_paths --user <USER NAME>` first")]
    UninitializedUser,

    #[error("No per-user configuration directory is available on this system")]
    MissingConfigDir,

    #[error("Invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    #[error("Cannot derive a calendar year from detector configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid glob pattern: {0}")]
    InvalidGlobPattern(#[from] glob::PatternError),

    #[error("Unreadable entry while scanning directory: {0}")]
    UnreadableDirEntry(#[from] glob::GlobError),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("{file}: expected {expected} map channels, found {found}")]
    ChannelCountMismatch {
        file: String,
        expected: usize,
        found: usize,
    },

    #[error("{file}: channel {channel} holds {found} pixels, expected {expected}")]
    PixelCountMismatch {
        file: String,
        channel: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unsupported channel count {0}: at most {1} named columns are defined")]
    UnsupportedChannelCount(usize, usize),
}
