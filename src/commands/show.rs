//! Show a single record by slug

use anyhow::Result;

use crate::error::ShelfError;
use crate::Shelf;

/// Print one record's metadata and its related records
pub fn run(shelf: &Shelf, doc_type: &str, slug: &str, drafts: bool, json: bool) -> Result<()> {
    let collection = shelf.load()?;

    let mut query = collection.query(doc_type);
    if drafts || shelf.config.preview_drafts {
        query = query.include_drafts();
    }
    let record = query
        .find_by_slug(slug)
        .ok_or_else(|| ShelfError::not_found(doc_type, slug))?;

    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!("Title:        {}", record.title);
    println!("Type:         {}", record.doc_type);
    println!("Date:         {}", record.date.format("%Y-%m-%d"));
    if let Some(updated) = &record.updated {
        println!("Updated:      {}", updated.format("%Y-%m-%d"));
    }
    println!("Category:     {}", record.category);
    if !record.tags.is_empty() {
        println!("Tags:         {}", record.tags.join(", "));
    }
    println!("URL:          {}", record.url);
    println!("Reading time: {}", record.reading_time);
    println!("Source:       {}", record.source);
    if record.draft {
        println!("Draft:        yes");
    }
    for (name, value) in &record.extra {
        println!("{:<13} {}", format!("{}:", name), serde_json::to_string(value)?);
    }
    println!();
    println!("{}", record.description);

    let related = collection.related_to(record, 3);
    if !related.is_empty() {
        println!();
        println!("Related:");
        for r in related {
            println!("  {} - {} [{}]", r.date.format("%Y-%m-%d"), r.title, r.url);
        }
    }

    Ok(())
}
