//! Validated content records

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

use crate::error::{Result, ShelfError};
use crate::helpers::{is_url_safe_slug, join_url, reading_time};
use crate::schema::{Category, DocType, FieldValue};

/// Raw and rendered forms of a document body
#[derive(Debug, Clone, Serialize)]
pub struct Body {
    /// Markdown source below the front-matter
    pub raw: String,

    /// Rendered HTML
    pub rendered: String,
}

/// A single validated document
///
/// Records only exist on the far side of schema validation, so every field
/// here already honors its type's field table. The computed fields (slug,
/// url, reading_time) are derived during assembly and are never authored.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// Name of the type this record validated against
    pub doc_type: String,

    /// Document title
    pub title: String,

    /// Short summary used in listings
    pub description: String,

    /// Publication date
    pub date: DateTime<Utc>,

    /// Last updated date
    pub updated: Option<DateTime<Utc>>,

    /// Primary category
    pub category: Category,

    /// Free-form tags, empty when unset
    pub tags: Vec<String>,

    /// Cover image path
    pub cover: Option<String>,

    /// Whether the record is highlighted in listings
    pub featured: bool,

    /// Whether the record is a draft, hidden from default queries
    pub draft: bool,

    /// Type-specific fields beyond the shared core
    pub extra: IndexMap<String, FieldValue>,

    /// Document body
    pub body: Body,

    /// URL-safe identifier derived from the file stem
    pub slug: String,

    /// Site-relative URL, the type's prefix joined with the slug
    pub url: String,

    /// Estimated reading time, e.g. "4 min read"
    pub reading_time: String,

    /// Source file path relative to the content root
    pub source: String,
}

impl Record {
    /// Assemble a record from validated front-matter values and a body
    ///
    /// `values` must come from [`DocType::validate`]; the core fields are
    /// lifted into typed struct fields and whatever remains becomes the
    /// type-specific `extra` map. Derives slug, url and reading time.
    pub(crate) fn assemble(
        doc_type: &DocType,
        source: &str,
        mut values: IndexMap<String, FieldValue>,
        body: Body,
        words_per_minute: usize,
    ) -> Result<Self> {
        let slug = derive_slug(source)?;
        let url = join_url(&doc_type.url_prefix, &slug);
        let reading_time = reading_time(&body.raw, words_per_minute);

        let title = take_str(&mut values, "title")
            .ok_or_else(|| ShelfError::schema(source, "title", "required field is missing"))?;
        let description = take_str(&mut values, "description")
            .ok_or_else(|| ShelfError::schema(source, "description", "required field is missing"))?;
        let date = take_date(&mut values, "date")
            .ok_or_else(|| ShelfError::schema(source, "date", "required field is missing"))?;
        let updated = take_date(&mut values, "updated");
        let category = take_str(&mut values, "category")
            .ok_or_else(|| ShelfError::schema(source, "category", "required field is missing"))?
            .parse::<Category>()
            .map_err(|message| ShelfError::schema(source, "category", message))?;
        let tags = match values.shift_remove("tags") {
            Some(FieldValue::List(items)) => items,
            _ => Vec::new(),
        };
        let cover = take_str(&mut values, "cover");
        let featured = take_bool(&mut values, "featured");
        let draft = take_bool(&mut values, "draft");

        Ok(Self {
            doc_type: doc_type.name.clone(),
            title,
            description,
            date,
            updated,
            category,
            tags,
            cover,
            featured,
            draft,
            extra: values,
            body,
            slug,
            url,
            reading_time,
            source: source.to_string(),
        })
    }

    /// Whether this record carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Derive the slug from a source path: the file name without its extension
fn derive_slug(source: &str) -> Result<String> {
    let stem = Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ShelfError::schema(source, "slug", "cannot derive a slug from this path"))?;

    if !is_url_safe_slug(stem) {
        return Err(ShelfError::schema(
            source,
            "slug",
            format!("derived slug `{}` is not URL-safe", stem),
        ));
    }

    Ok(stem.to_string())
}

fn take_str(values: &mut IndexMap<String, FieldValue>, field: &str) -> Option<String> {
    match values.shift_remove(field) {
        Some(FieldValue::Str(s)) => Some(s),
        _ => None,
    }
}

fn take_date(values: &mut IndexMap<String, FieldValue>, field: &str) -> Option<DateTime<Utc>> {
    match values.shift_remove(field) {
        Some(FieldValue::Date(d)) => Some(d),
        _ => None,
    }
}

fn take_bool(values: &mut IndexMap<String, FieldValue>, field: &str) -> bool {
    matches!(values.shift_remove(field), Some(FieldValue::Bool(true)))
}
