//! List shelf content

use anyhow::Result;

use crate::collection::Collection;
use crate::schema::Category;
use crate::Shelf;

/// List records of one type, or the tag/category rollups
pub fn run(
    shelf: &Shelf,
    content_type: &str,
    drafts: bool,
    category: Option<&str>,
    featured: bool,
    json: bool,
) -> Result<()> {
    let collection = shelf.load()?;

    match content_type {
        "tag" | "tags" => {
            let tags = collection.tag_counts("post");
            println!("Tags ({}):", tags.len());
            for (tag, count) in &tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let categories = collection.category_counts("post");
            println!("Categories ({}):", categories.len());
            for (cat, count) in &categories {
                println!("  {} ({})", cat, count);
            }
        }
        other => {
            let type_name = resolve_type(&collection, other)?;

            let mut query = collection.query(&type_name);
            if drafts || shelf.config.preview_drafts {
                query = query.include_drafts();
            }
            if let Some(raw) = category {
                let wanted: Category = raw.parse().map_err(anyhow::Error::msg)?;
                query = query.category(wanted);
            }
            if featured {
                query = query.featured();
            }

            let records = query.newest_first();
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }

            println!("{} ({}):", heading(&type_name), records.len());
            for record in records {
                let marker = if record.draft { " (draft)" } else { "" };
                println!(
                    "  {} - {}{} [{}]",
                    record.date.format("%Y-%m-%d"),
                    record.title,
                    marker,
                    record.source
                );
            }
        }
    }

    Ok(())
}

/// Resolve a declared type name, accepting a trailing-s plural
fn resolve_type(collection: &Collection, name: &str) -> Result<String> {
    let declared: Vec<&str> = collection.type_names().collect();
    if declared.contains(&name) {
        return Ok(name.to_string());
    }
    let singular = name.trim_end_matches('s');
    if declared.contains(&singular) {
        return Ok(singular.to_string());
    }
    anyhow::bail!(
        "Unknown type: {}. Available: {}, tag, category",
        name,
        declared.join(", ")
    );
}

/// "post" -> "Posts"
fn heading(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{}s", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
