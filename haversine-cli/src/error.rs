//! Errors surfaced by the command line tools.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("the answers argument must be a path to a .f64 file, got {}", .0.display())]
    NotF64(PathBuf),

    #[error("the file {} does not exist", .0.display())]
    Missing(PathBuf),

    #[error("the number of pairs ({pairs}) does not match the number of answers ({answers})")]
    CountMismatch { pairs: usize, answers: usize },

    #[error("{}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8: {source}", .path.display())]
    NotUtf8 {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("could not open file {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] haversine_core::Error),
}
