use crate::index::IndexId;
use thiserror::Error;

/// Errors raised while indexing terms or generating index pages
#[derive(Error, Debug)]
pub enum Error {
    #[error("Index file configuration '{title}' has no 'file'")]
    MissingIndexFile { title: String },

    #[error("Index file '{file}' refers to unknown glossary '{glossary}'")]
    UnknownGlossary { file: String, glossary: String },

    #[error("Indexes have not been built yet")]
    IndexNotBuilt,

    #[error("Unknown index: {0}")]
    UnknownIndex(IndexId),

    #[error("Index registered twice: {0}")]
    DuplicateIndex(IndexId),

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for glossdex operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Configuration errors are reported before any output is produced
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::MissingIndexFile { .. } | Error::UnknownGlossary { .. }
        )
    }
}
