//! Content module - parsing, validation, rendering and loading of documents

pub mod frontmatter;
pub mod loader;
mod markdown;
mod record;

pub use loader::ContentLoader;
pub use markdown::{MarkdownRenderer, RenderError, Renderer};
pub use record::{Body, Record};
