//! Front-matter parsing
//!
//! Documents open with a fenced metadata block: YAML between `---` lines,
//! TOML between `+++` lines, or JSON either fenced by `;;;` or written as a
//! bare object. All three converge on a [`serde_yaml::Mapping`] so schema
//! validation sees one shape. A document without a recognizable block gets
//! an empty mapping; the schema layer then reports the absent required
//! fields by name instead of a generic parse failure.

use serde_yaml::{Mapping, Value};

use crate::error::{Result, ShelfError};

/// Parse the front-matter block from raw document content
///
/// Returns the parsed mapping and the remaining body. `file` names the
/// source in error messages.
pub fn parse<'a>(file: &str, content: &'a str) -> Result<(Mapping, &'a str)> {
    let content = content.trim_start();

    if content.starts_with("---") {
        return parse_yaml(file, content);
    }

    if content.starts_with("+++") {
        return parse_toml(file, content);
    }

    if content.starts_with(";;;") || content.starts_with('{') {
        return parse_json(file, content);
    }

    Ok((Mapping::new(), content))
}

fn parse_yaml<'a>(file: &str, content: &'a str) -> Result<(Mapping, &'a str)> {
    // Find the closing --- (searching from the opening fence keeps an
    // empty block, `---` immediately followed by `---`, well-formed)
    let rest = &content[3..]; // Skip opening ---

    let Some(end_pos) = rest.find("\n---") else {
        return Err(ShelfError::frontmatter(file, "unclosed `---` front-matter"));
    };

    let yaml_content = &rest[..end_pos];
    let remaining = &rest[end_pos + 4..]; // Skip \n---
    let remaining = remaining.trim_start_matches(['\n', '\r']);

    if yaml_content.trim().is_empty() {
        return Ok((Mapping::new(), remaining));
    }

    let value: Value = serde_yaml::from_str(yaml_content)
        .map_err(|e| ShelfError::frontmatter(file, format!("invalid YAML: {}", e)))?;

    into_mapping(file, value).map(|m| (m, remaining))
}

fn parse_toml<'a>(file: &str, content: &'a str) -> Result<(Mapping, &'a str)> {
    let rest = &content[3..];

    let Some(end_pos) = rest.find("\n+++") else {
        return Err(ShelfError::frontmatter(file, "unclosed `+++` front-matter"));
    };

    let toml_content = &rest[..end_pos];
    let remaining = &rest[end_pos + 4..];
    let remaining = remaining.trim_start_matches(['\n', '\r']);

    let table: toml::Value = toml::from_str(toml_content)
        .map_err(|e| ShelfError::frontmatter(file, format!("invalid TOML: {}", e)))?;

    into_mapping(file, toml_to_yaml(table)).map(|m| (m, remaining))
}

fn parse_json<'a>(file: &str, content: &'a str) -> Result<(Mapping, &'a str)> {
    // JSON front-matter ends with ;;;
    if let Some(rest) = content.strip_prefix(";;;") {
        let Some(end_pos) = rest.find(";;;") else {
            return Err(ShelfError::frontmatter(file, "unclosed `;;;` front-matter"));
        };
        let json_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 3..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        return json_to_mapping(file, json_content).map(|m| (m, remaining));
    }

    // Bare JSON object at the start: find the matching closing brace
    let mut depth = 0;
    let mut end_pos = 0;
    for (i, c) in content.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    end_pos = i + 1;
                    break;
                }
            }
            _ => {}
        }
    }

    if end_pos == 0 {
        return Err(ShelfError::frontmatter(file, "unclosed JSON front-matter"));
    }

    let json_content = &content[..end_pos];
    let remaining = &content[end_pos..];
    let remaining = remaining.trim_start_matches(['\n', '\r']);

    json_to_mapping(file, json_content).map(|m| (m, remaining))
}

fn json_to_mapping(file: &str, json_content: &str) -> Result<Mapping> {
    let value: serde_json::Value = serde_json::from_str(json_content)
        .map_err(|e| ShelfError::frontmatter(file, format!("invalid JSON: {}", e)))?;
    let value = serde_yaml::to_value(&value)
        .map_err(|e| ShelfError::frontmatter(file, e.to_string()))?;
    into_mapping(file, value)
}

fn into_mapping(file: &str, value: Value) -> Result<Mapping> {
    match value {
        Value::Mapping(m) => Ok(m),
        _ => Err(ShelfError::frontmatter(
            file,
            "front-matter must be a key/value mapping",
        )),
    }
}

/// Convert a TOML value into its YAML counterpart
///
/// TOML datetimes become plain strings so the schema layer parses all
/// dates through one code path.
fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(serde_yaml::Number::from(f)),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(d) => Value::String(d.to_string()),
        toml::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(toml_to_yaml).collect())
        }
        toml::Value::Table(table) => {
            let mut mapping = Mapping::new();
            for (k, v) in table {
                mapping.insert(Value::String(k), toml_to_yaml(v));
            }
            Value::Mapping(mapping)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
tags:
  - rust
  - content
---

This is the content.
"#;

        let (matter, remaining) = parse("posts/hello.mdx", content).unwrap();
        assert_eq!(
            matter.get("title").and_then(Value::as_str),
            Some("Hello World")
        );
        assert_eq!(
            matter.get("tags").and_then(Value::as_sequence).map(|s| s.len()),
            Some(2)
        );
        assert!(remaining.starts_with("This is the content."));
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let content = r#"+++
title = "TOML Post"
date = 2024-02-10
tags = ["rust"]
+++

Body text.
"#;

        let (matter, remaining) = parse("posts/toml.md", content).unwrap();
        assert_eq!(
            matter.get("title").and_then(Value::as_str),
            Some("TOML Post")
        );
        // Datetimes come through as strings for uniform parsing
        assert_eq!(
            matter.get("date").and_then(Value::as_str),
            Some("2024-02-10")
        );
        assert!(remaining.starts_with("Body text."));
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test Post", "tags": ["a", "b"]}

This is content.
"#;

        let (matter, remaining) = parse("posts/json.md", content).unwrap();
        assert_eq!(
            matter.get("title").and_then(Value::as_str),
            Some("Test Post")
        );
        assert!(remaining.starts_with("This is content."));
    }

    #[test]
    fn test_parse_fenced_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Fenced\"}\n;;;\nBody.";
        let (matter, remaining) = parse("posts/fenced.md", content).unwrap();
        assert_eq!(matter.get("title").and_then(Value::as_str), Some("Fenced"));
        assert!(remaining.starts_with("Body."));
    }

    #[test]
    fn test_missing_block_yields_empty_mapping() {
        let (matter, remaining) = parse("posts/bare.md", "Just prose, no metadata.").unwrap();
        assert!(matter.is_empty());
        assert_eq!(remaining, "Just prose, no metadata.");
    }

    #[test]
    fn test_unclosed_frontmatter_is_an_error() {
        let err = parse("posts/open.md", "---\ntitle: Oops\nBody without fence").unwrap_err();
        assert!(matches!(err, ShelfError::Frontmatter { .. }));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let content = "---\ntitle: [unterminated\n---\nBody";
        let err = parse("posts/bad.md", content).unwrap_err();
        match err {
            ShelfError::Frontmatter { message, .. } => assert!(message.contains("invalid YAML")),
            other => panic!("expected front-matter error, got {other:?}"),
        }
    }

    #[test]
    fn test_list_frontmatter_is_an_error() {
        let content = "---\n- just\n- a\n- list\n---\nBody";
        let err = parse("posts/list.md", content).unwrap_err();
        match err {
            ShelfError::Frontmatter { message, .. } => {
                assert!(message.contains("key/value mapping"))
            }
            other => panic!("expected front-matter error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_frontmatter_yields_empty_mapping() {
        let (matter, remaining) = parse("posts/empty.md", "---\n---\nBody").unwrap();
        assert!(matter.is_empty());
        assert_eq!(remaining, "Body");
    }
}
