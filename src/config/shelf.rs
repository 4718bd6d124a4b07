//! Shelf configuration (shelf.yml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Result, ShelfError};

/// Main shelf configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    /// Directory holding the content tree, relative to the shelf root
    pub content_dir: String,

    /// Words-per-minute pace for the reading time estimate
    pub words_per_minute: usize,

    /// Category written into scaffolded front-matter
    pub default_category: String,

    /// File name pattern for scaffolded documents, `:title` is the slug
    pub new_post_name: String,

    /// Include drafts in CLI listings without passing --drafts each time
    pub preview_drafts: bool,

    #[serde(default)]
    pub highlight: HighlightConfig,

    /// Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            content_dir: "content".to_string(),
            words_per_minute: 200,
            default_category: "tech".to_string(),
            new_post_name: ":title.mdx".to_string(),
            preview_drafts: false,
            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl ShelfConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ShelfError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: ShelfConfig =
            serde_yaml::from_str(&content).map_err(|e| ShelfError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(config)
    }

    /// Load configuration when the file exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("no config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}
