//! mdshelf: typed, queryable content collections for markdown blogs
//!
//! This crate loads front-matter documents from a content tree, validates
//! them against per-type schemas, and exposes the result as an immutable,
//! queryable collection.

pub mod collection;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod schema;
pub mod watch;

use std::path::{Path, PathBuf};

pub use collection::{sort_by_date_descending, Collection, Query};
pub use content::{MarkdownRenderer, Record, Renderer};
pub use error::{Result, ShelfError};
pub use schema::{Category, DocType};

/// A content shelf: configuration, content root and declared types
#[derive(Clone)]
pub struct Shelf {
    /// Shelf configuration
    pub config: config::ShelfConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content root directory
    pub content_dir: PathBuf,
    /// Declared content types
    types: Vec<DocType>,
}

impl Shelf {
    /// Create a new shelf instance from a directory
    ///
    /// Reads `shelf.yml` when present and starts with the built-in post
    /// and project types.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config::ShelfConfig::load_or_default(base_dir.join(config::CONFIG_FILE))?;
        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            types: vec![DocType::post(), DocType::project()],
        })
    }

    /// Replace the built-in types with a custom set
    pub fn with_types(mut self, types: Vec<DocType>) -> Self {
        self.types = types;
        self
    }

    /// The declared content types
    pub fn types(&self) -> &[DocType] {
        &self.types
    }

    /// Load the whole content tree with the bundled markdown renderer
    pub fn load(&self) -> Result<Collection> {
        let renderer = MarkdownRenderer::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        );
        self.load_with(&renderer)
    }

    /// Load the whole content tree through a caller-supplied renderer
    pub fn load_with(&self, renderer: &dyn Renderer) -> Result<Collection> {
        content::ContentLoader::new(
            &self.content_dir,
            &self.types,
            renderer,
            self.config.words_per_minute,
        )
        .load()
    }
}
