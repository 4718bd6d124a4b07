//! Create a new document

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::schema::{DocType, FieldType, CORE_FIELDS};
use crate::Shelf;

/// Create a new document of the given type, scaffolded to pass validation
pub fn create_document(shelf: &Shelf, type_name: &str, title: &str) -> Result<PathBuf> {
    let Some(doc_type) = shelf.types().iter().find(|t| t.name == type_name) else {
        let known: Vec<&str> = shelf.types().iter().map(|t| t.name.as_str()).collect();
        anyhow::bail!("Unknown type: {} (declared types: {})", type_name, known.join(", "));
    };

    let now = chrono::Local::now();
    let slug = slug::slugify(title);

    // Generate filename from the configured pattern
    let filename = shelf
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string());

    let target_dir = shelf.content_dir.join(scaffold_dir(doc_type));
    fs::create_dir_all(&target_dir)?;
    let file_path = target_dir.join(&filename);

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, scaffold(doc_type, title, &shelf.config.default_category, &now))?;

    println!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Directory new documents of this type land in: the literal prefix of the
/// type's glob pattern, or the type name when the pattern has none
fn scaffold_dir(doc_type: &DocType) -> String {
    let prefix = doc_type
        .pattern
        .split(['*', '?', '['])
        .next()
        .unwrap_or("")
        .trim_matches('/');
    if prefix.is_empty() {
        doc_type.name.clone()
    } else {
        prefix.to_string()
    }
}

/// Front-matter scaffold that satisfies the type's schema, marked draft
fn scaffold(
    doc_type: &DocType,
    title: &str,
    category: &str,
    now: &chrono::DateTime<chrono::Local>,
) -> String {
    let mut content = String::from("---\n");
    content.push_str(&format!("title: \"{}\"\n", title.replace('"', "\\\"")));
    content.push_str(&format!("description: \"{}\"\n", title.replace('"', "\\\"")));
    content.push_str(&format!("date: {}\n", now.format("%Y-%m-%d %H:%M:%S")));
    content.push_str(&format!("category: {}\n", category));
    content.push_str("tags: []\n");
    content.push_str("draft: true\n");

    // Required type-specific fields get placeholders so the scaffold validates
    for (name, spec) in &doc_type.fields {
        if CORE_FIELDS.contains(&name.as_str()) || !spec.required || spec.default.is_some() {
            continue;
        }
        match &spec.field_type {
            FieldType::String => {
                content.push_str(&format!("{}: \"{}\"\n", name, title.replace('"', "\\\"")));
            }
            FieldType::StringList => content.push_str(&format!("{}: []\n", name)),
            FieldType::Date => content.push_str(&format!("{}: {}\n", name, now.format("%Y-%m-%d"))),
            FieldType::Bool => content.push_str(&format!("{}: false\n", name)),
            FieldType::Enum { options } => {
                if let Some(first) = options.first() {
                    content.push_str(&format!("{}: {}\n", name, first));
                }
            }
        }
    }

    content.push_str("---\n\n");
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::init_shelf;
    use tempfile::TempDir;

    fn shelf_in(tmp: &TempDir) -> Shelf {
        init_shelf(tmp.path()).unwrap();
        Shelf::new(tmp.path()).unwrap()
    }

    #[test]
    fn test_new_post_lands_in_posts_dir() {
        let tmp = TempDir::new().unwrap();
        let shelf = shelf_in(&tmp);

        let path = create_document(&shelf, "post", "My New Post").unwrap();
        assert_eq!(path, tmp.path().join("content/posts/my-new-post.mdx"));
        assert!(path.exists());
    }

    #[test]
    fn test_new_document_validates_as_draft() {
        let tmp = TempDir::new().unwrap();
        let shelf = shelf_in(&tmp);

        create_document(&shelf, "post", "Draft Me").unwrap();
        create_document(&shelf, "project", "Side Project").unwrap();

        let collection = shelf.load().unwrap();
        assert_eq!(collection.query("post").count(), 1);

        let draft = collection
            .query("post")
            .include_drafts()
            .find_by_slug("draft-me")
            .cloned()
            .unwrap();
        assert!(draft.draft);
        assert_eq!(draft.title, "Draft Me");

        let project = collection
            .query("project")
            .include_drafts()
            .find_by_slug("side-project")
            .cloned()
            .unwrap();
        assert!(project.extra.contains_key("tech_stack"));
    }

    #[test]
    fn test_new_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let shelf = shelf_in(&tmp);

        create_document(&shelf, "post", "Twice").unwrap();
        let err = create_document(&shelf, "post", "Twice").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_new_rejects_unknown_type() {
        let tmp = TempDir::new().unwrap();
        let shelf = shelf_in(&tmp);

        let err = create_document(&shelf, "page", "Nope").unwrap_err();
        assert!(err.to_string().contains("Unknown type"));
    }

    #[test]
    fn test_scaffold_dir_from_pattern_prefix() {
        assert_eq!(scaffold_dir(&DocType::post()), "posts");
        assert_eq!(scaffold_dir(&DocType::new("note", "**", "/notes/")), "note");
        assert_eq!(
            scaffold_dir(&DocType::new("guide", "docs/guides/**/*.md", "/guides/")),
            "docs/guides"
        );
    }
}
