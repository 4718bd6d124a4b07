//! Small shared helpers for derived record fields

mod reading_time;
mod url;

pub use reading_time::{count_words, reading_time};
pub use url::{is_url_safe_slug, join_url};
