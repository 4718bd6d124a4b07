//! Configuration module

mod shelf;

pub use shelf::HighlightConfig;
pub use shelf::ShelfConfig;

/// Name of the config file looked up at the shelf root
pub const CONFIG_FILE: &str = "shelf.yml";
