//! Content loader - walks the source tree and builds a validated collection

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{frontmatter, Body, Record, Renderer};
use crate::collection::Collection;
use crate::error::{Result, ShelfError};
use crate::schema::DocType;

/// Loads every document under the content root into a [`Collection`]
///
/// Loading is all-or-nothing: the first schema violation, duplicate slug or
/// unreadable file aborts the whole load, so a collection that exists is
/// fully valid. Files are visited in path order, which makes both the
/// surfaced error and tie order among equal dates deterministic.
pub struct ContentLoader<'a> {
    root: &'a Path,
    types: &'a [DocType],
    renderer: &'a dyn Renderer,
    words_per_minute: usize,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(
        root: &'a Path,
        types: &'a [DocType],
        renderer: &'a dyn Renderer,
        words_per_minute: usize,
    ) -> Self {
        Self {
            root,
            types,
            renderer,
            words_per_minute,
        }
    }

    /// Load all documents matching the declared type patterns
    pub fn load(&self) -> Result<Collection> {
        if !self.root.exists() {
            return Err(ShelfError::SourceRoot(self.root.to_path_buf()));
        }

        let patterns = self.compile_patterns()?;
        let sources = self.collect_sources();

        let mut records = Vec::new();
        let mut seen: HashMap<(String, String), String> = HashMap::new();

        for (path, source) in &sources {
            let Some(doc_type) = self.match_type(&patterns, source) else {
                tracing::debug!("{} matches no declared type, skipping", source);
                continue;
            };

            let record = self.load_record(doc_type, path, source)?;

            let key = (doc_type.name.clone(), record.slug.clone());
            if let Some(first) = seen.get(&key) {
                return Err(ShelfError::DuplicateSlug {
                    doc_type: doc_type.name.clone(),
                    slug: record.slug,
                    first: first.clone(),
                    second: source.clone(),
                });
            }
            seen.insert(key, source.clone());

            tracing::debug!("loaded {} {}", doc_type.name, source);
            records.push(record);
        }

        tracing::info!(
            "loaded {} records from {:?}",
            records.len(),
            self.root
        );

        let type_names = self.types.iter().map(|t| t.name.clone()).collect();
        Ok(Collection::from_records(type_names, records))
    }

    /// Compile each type's source glob up front
    fn compile_patterns(&self) -> Result<Vec<glob::Pattern>> {
        self.types
            .iter()
            .map(|t| {
                glob::Pattern::new(&t.pattern).map_err(|e| ShelfError::Pattern {
                    doc_type: t.name.clone(),
                    pattern: t.pattern.clone(),
                    message: e.to_string(),
                })
            })
            .collect()
    }

    /// Walk the root and gather markdown files in sorted path order
    fn collect_sources(&self) -> Vec<(PathBuf, String)> {
        let mut sources: Vec<(PathBuf, String)> = Vec::new();

        for entry in WalkDir::new(self.root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                let relative = path.strip_prefix(self.root).unwrap_or(path);
                let source = relative.to_string_lossy().to_string();
                sources.push((path.to_path_buf(), source));
            }
        }

        sources.sort_by(|a, b| a.1.cmp(&b.1));
        sources
    }

    /// First declared type whose pattern matches the relative path wins
    fn match_type(&self, patterns: &[glob::Pattern], source: &str) -> Option<&DocType> {
        patterns
            .iter()
            .position(|p| p.matches_path(Path::new(source)))
            .map(|i| &self.types[i])
    }

    /// Load a single document through the full pipeline
    fn load_record(&self, doc_type: &DocType, path: &Path, source: &str) -> Result<Record> {
        let content = fs::read_to_string(path).map_err(|e| ShelfError::Read {
            file: source.to_string(),
            source: e,
        })?;

        let (matter, raw_body) = frontmatter::parse(source, &content)?;
        let values = doc_type.validate(source, &matter)?;

        let rendered = self
            .renderer
            .render(raw_body)
            .map_err(|e| ShelfError::Render {
                file: source.to_string(),
                message: e.to_string(),
            })?;

        let body = Body {
            raw: raw_body.to_string(),
            rendered,
        };

        Record::assemble(doc_type, source, values, body, self.words_per_minute)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "mdx" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::content::RenderError;

    fn write_doc(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn passthrough(content: &str) -> std::result::Result<String, RenderError> {
        Ok(content.to_string())
    }

    fn load(root: &Path) -> Result<Collection> {
        let types = [DocType::post(), DocType::project()];
        ContentLoader::new(root, &types, &passthrough, 200).load()
    }

    fn post(title: &str, date: &str) -> String {
        format!(
            "---\ntitle: {}\ndescription: About {}\ndate: {}\ncategory: tech\n---\nBody of {}.\n",
            title, title, date, title
        )
    }

    #[test]
    fn test_load_partitions_by_type() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "posts/alpha.mdx", &post("Alpha", "2024-01-01"));
        write_doc(dir.path(), "posts/beta.md", &post("Beta", "2024-02-01"));
        write_doc(
            dir.path(),
            "projects/gamma.mdx",
            "---\ntitle: Gamma\ndescription: D\ndate: 2024-03-01\ncategory: work\ntech_stack: [rust]\n---\nBody.\n",
        );

        let collection = load(dir.path()).unwrap();
        assert_eq!(collection.query("post").count(), 2);
        assert_eq!(collection.query("project").count(), 1);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, ShelfError::SourceRoot(_)));
    }

    #[test]
    fn test_empty_tree_loads_empty_collection() {
        let dir = TempDir::new().unwrap();
        let collection = load(dir.path()).unwrap();
        assert_eq!(collection.len(), 0);
        assert_eq!(collection.query("post").count(), 0);
    }

    #[test]
    fn test_one_invalid_document_fails_the_whole_load() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "posts/good.md", &post("Good", "2024-01-01"));
        write_doc(
            dir.path(),
            "posts/zbad.md",
            "---\ntitle: Bad\ndate: 2024-01-02\ncategory: tech\n---\nNo description.\n",
        );

        let err = load(dir.path()).unwrap_err();
        match err {
            ShelfError::Schema { file, field, .. } => {
                assert_eq!(file, "posts/zbad.md");
                assert_eq!(field, "description");
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_slugs_across_directories() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "posts/2023/hello.md", &post("Old", "2023-05-01"));
        write_doc(dir.path(), "posts/2024/hello.md", &post("New", "2024-05-01"));

        let err = load(dir.path()).unwrap_err();
        match err {
            ShelfError::DuplicateSlug {
                doc_type,
                slug,
                first,
                second,
            } => {
                assert_eq!(doc_type, "post");
                assert_eq!(slug, "hello");
                assert_eq!(first, "posts/2023/hello.md");
                assert_eq!(second, "posts/2024/hello.md");
            }
            other => panic!("expected duplicate slug error, got {other:?}"),
        }
    }

    #[test]
    fn test_same_slug_across_types_is_fine() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "posts/mirror.md", &post("Mirror", "2024-01-01"));
        write_doc(
            dir.path(),
            "projects/mirror.md",
            "---\ntitle: Mirror\ndescription: D\ndate: 2024-01-01\ncategory: work\ntech_stack: [rust]\n---\nBody.\n",
        );

        let collection = load(dir.path()).unwrap();
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_drafts_are_loaded() {
        let dir = TempDir::new().unwrap();
        write_doc(
            dir.path(),
            "posts/wip.md",
            "---\ntitle: WIP\ndescription: D\ndate: 2024-01-01\ncategory: tech\ndraft: true\n---\nBody.\n",
        );

        let collection = load(dir.path()).unwrap();
        // Present in the collection even though default queries hide it
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.query("post").count(), 0);
        assert_eq!(collection.query("post").include_drafts().count(), 1);
    }

    #[test]
    fn test_unmatched_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "posts/in.md", &post("In", "2024-01-01"));
        write_doc(dir.path(), "notes/out.md", "not even front-matter");
        write_doc(dir.path(), "posts/raw.txt", "not markdown");

        let collection = load(dir.path()).unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_renderer_failure_aborts_the_load() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "posts/a.md", &post("A", "2024-01-01"));

        let types = [DocType::post()];
        let failing = |_: &str| Err::<String, _>(RenderError("engine offline".to_string()));
        let err = ContentLoader::new(dir.path(), &types, &failing, 200)
            .load()
            .unwrap_err();
        match err {
            ShelfError::Render { file, message } => {
                assert_eq!(file, "posts/a.md");
                assert!(message.contains("engine offline"));
            }
            other => panic!("expected render error, got {other:?}"),
        }
    }

    #[test]
    fn test_toml_and_json_front_matter_load_like_yaml() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "posts/yaml.md", &post("Same", "2024-04-01"));
        write_doc(
            dir.path(),
            "posts/toml.md",
            "+++\ntitle = \"Same\"\ndescription = \"About Same\"\ndate = 2024-04-01\ncategory = \"tech\"\n+++\nBody of Same.\n",
        );
        write_doc(
            dir.path(),
            "posts/json.md",
            "{\"title\": \"Same\", \"description\": \"About Same\", \"date\": \"2024-04-01\", \"category\": \"tech\"}\nBody of Same.\n",
        );

        let collection = load(dir.path()).unwrap();
        let yaml = collection.query("post").find_by_slug("yaml").unwrap();
        let toml = collection.query("post").find_by_slug("toml").unwrap();
        let json = collection.query("post").find_by_slug("json").unwrap();

        for record in [toml, json] {
            assert_eq!(record.title, yaml.title);
            assert_eq!(record.description, yaml.description);
            assert_eq!(record.date, yaml.date);
            assert_eq!(record.category, yaml.category);
        }
    }

    #[test]
    fn test_reload_derives_identical_computed_fields() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "posts/alpha.mdx", &post("Alpha", "2024-01-01"));
        write_doc(dir.path(), "posts/2024/beta.md", &post("Beta", "2024-02-01"));

        let first = load(dir.path()).unwrap();
        let second = load(dir.path()).unwrap();

        let derived = |c: &Collection| -> Vec<(String, String, String)> {
            c.records()
                .map(|r| (r.slug.clone(), r.url.clone(), r.reading_time.clone()))
                .collect()
        };
        assert_eq!(derived(&first), derived(&second));
    }

    #[test]
    fn test_default_tech_query_end_to_end() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "posts/march.md", &post("March", "2024-03-01"));
        write_doc(
            dir.path(),
            "posts/feb.md",
            "---\ntitle: Feb\ndescription: D\ndate: 2024-02-01\ncategory: life\n---\nBody.\n",
        );
        write_doc(
            dir.path(),
            "posts/jan.md",
            "---\ntitle: Jan\ndescription: D\ndate: 2024-01-01\ncategory: tech\ndraft: true\n---\nBody.\n",
        );

        let collection = load(dir.path()).unwrap();
        let tech = collection
            .posts()
            .category(crate::schema::Category::Tech)
            .newest_first();
        let titles: Vec<&str> = tech.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["March"]);
    }
}
