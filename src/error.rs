//! Error types for loading and querying content

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Errors raised while loading or looking up content records
///
/// Everything except `NotFound` is a load-time failure: the whole load
/// aborts and no partial collection is returned. `NotFound` is the ordinary
/// caller-facing miss for lookups by slug.
#[derive(Error, Debug)]
pub enum ShelfError {
    /// A front-matter field failed required/typed/enum validation
    #[error("Schema validation failed in {file}: field `{field}`: {message}")]
    Schema {
        file: String,
        field: String,
        message: String,
    },

    /// The front-matter block itself could not be parsed
    #[error("Invalid front-matter in {file}: {message}")]
    Frontmatter { file: String, message: String },

    /// Two records of the same type derived the same slug
    #[error("Duplicate {doc_type} slug `{slug}` derived from both {first} and {second}")]
    DuplicateSlug {
        doc_type: String,
        slug: String,
        first: String,
        second: String,
    },

    /// A lookup by slug matched no record
    #[error("No {doc_type} found with slug `{slug}`")]
    NotFound { doc_type: String, slug: String },

    /// The configured content root is missing
    #[error("Content root {0:?} does not exist")]
    SourceRoot(PathBuf),

    /// A source file could not be read
    #[error("Cannot read {file}: {source}")]
    Read {
        file: String,
        source: std::io::Error,
    },

    /// A type declared an invalid source glob
    #[error("Invalid pattern `{pattern}` for type {doc_type}: {message}")]
    Pattern {
        doc_type: String,
        pattern: String,
        message: String,
    },

    /// shelf.yml could not be read or parsed
    #[error("Config error in {path:?}: {message}")]
    Config { path: PathBuf, message: String },

    /// The injected renderer rejected a body
    #[error("Render failed for {file}: {message}")]
    Render { file: String, message: String },

    /// The filesystem watcher could not be set up
    #[error("Watch error: {0}")]
    Watch(String),

    /// Underlying filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShelfError {
    /// Schema violation for a named field of a source file
    pub fn schema(
        file: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Schema {
            file: file.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Unparseable front-matter block
    pub fn frontmatter(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Lookup miss for the given type and slug
    pub fn not_found(doc_type: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::NotFound {
            doc_type: doc_type.into(),
            slug: slug.into(),
        }
    }
}
