//! Error type shared by the library and the CLI

use std::path::PathBuf;

/// Errors that abort a relocation run.
#[derive(Debug, thiserror::Error)]
pub enum TypemoveError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: file is not valid UTF-8", .path.display())]
    Decode { path: PathBuf },

    #[error("walk failed: {0}")]
    Walk(#[from] ignore::Error),

    #[error("{}: invalid relocation map: {source}", .path.display())]
    MapFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("type `{0}` is mapped to more than one source module")]
    DuplicateType(String),

    #[error("type `{type_name}` already lives in destination `{module}`")]
    SelfRelocation { type_name: String, module: String },
}

pub type Result<T> = std::result::Result<T, TypemoveError>;

impl TypemoveError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
