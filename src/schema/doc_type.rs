//! Per-type content schemas

use indexmap::IndexMap;

use super::{Category, FieldSpec, FieldValue};
use crate::error::{Result, ShelfError};

/// Field names that are derived at load time and never authored
pub const COMPUTED_FIELDS: [&str; 3] = ["slug", "url", "reading_time"];

/// Field names shared by every content type, in declaration order
pub const CORE_FIELDS: [&str; 9] = [
    "title",
    "description",
    "date",
    "updated",
    "category",
    "tags",
    "cover",
    "featured",
    "draft",
];

/// Declaration of a content type: where its files live, where its records
/// are addressed, and what their front-matter must look like
///
/// Every type carries the shared core field table (title, description,
/// date, updated, category, tags, cover, featured, draft); type-specific
/// fields are appended with [`DocType::with_field`].
#[derive(Debug, Clone)]
pub struct DocType {
    /// Type name, used to partition the collection ("post", "project")
    pub name: String,
    /// Glob pattern matching source paths relative to the content root
    pub pattern: String,
    /// Prefix joined with the derived slug to form the record url
    pub url_prefix: String,
    /// Field table in declaration order
    pub fields: IndexMap<String, FieldSpec>,
}

impl DocType {
    /// Declare a new type seeded with the shared core fields
    pub fn new(name: &str, pattern: &str, url_prefix: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            url_prefix: url_prefix.to_string(),
            fields: Self::core_fields(),
        }
    }

    /// Append a type-specific field
    pub fn with_field(mut self, name: &str, spec: FieldSpec) -> Self {
        self.fields.insert(name.to_string(), spec);
        self
    }

    /// The built-in blog post type
    pub fn post() -> Self {
        Self::new("post", "posts/**", "/blog/")
    }

    /// The built-in project type: core shape plus the project-only fields
    pub fn project() -> Self {
        Self::new("project", "projects/**", "/projects/")
            .with_field("tech_stack", FieldSpec::string_list().required())
            .with_field("demo_url", FieldSpec::string())
            .with_field("github_url", FieldSpec::string())
    }

    /// The shared core field table
    ///
    /// The required/defaulted split is deliberate and mirrored from the
    /// authored content: title, description, date and category hard-fail
    /// when absent; featured and draft default to false; the rest are
    /// plainly optional.
    fn core_fields() -> IndexMap<String, FieldSpec> {
        let mut fields = IndexMap::new();
        fields.insert("title".to_string(), FieldSpec::string().required());
        fields.insert("description".to_string(), FieldSpec::string().required());
        fields.insert("date".to_string(), FieldSpec::date().required());
        fields.insert("updated".to_string(), FieldSpec::date());
        fields.insert(
            "category".to_string(),
            FieldSpec::enumeration(Category::names()).required(),
        );
        fields.insert("tags".to_string(), FieldSpec::string_list());
        fields.insert("cover".to_string(), FieldSpec::string());
        fields.insert("featured".to_string(), FieldSpec::bool_default(false));
        fields.insert("draft".to_string(), FieldSpec::bool_default(false));
        fields
    }

    /// Validate a parsed front-matter mapping against this schema
    ///
    /// Walks the field table in declaration order and produces the full set
    /// of validated values, or the first violation as a load-fatal error
    /// naming the offending file and field. Unknown keys are logged and
    /// ignored; a `null` value counts as absent.
    pub fn validate(
        &self,
        file: &str,
        matter: &serde_yaml::Mapping,
    ) -> Result<IndexMap<String, FieldValue>> {
        let mut values = IndexMap::new();

        for (name, spec) in &self.fields {
            let raw = matter
                .get(name.as_str())
                .filter(|v| !v.is_null());

            match raw {
                Some(value) => {
                    let coerced = spec
                        .coerce(value)
                        .map_err(|message| ShelfError::schema(file, name, message))?;
                    if spec.required {
                        if let FieldValue::Str(s) = &coerced {
                            if s.trim().is_empty() {
                                return Err(ShelfError::schema(
                                    file,
                                    name,
                                    "required field must not be empty",
                                ));
                            }
                        }
                    }
                    values.insert(name.clone(), coerced);
                }
                None => {
                    if spec.required {
                        return Err(ShelfError::schema(file, name, "required field is missing"));
                    }
                    if let Some(default) = &spec.default {
                        values.insert(name.clone(), default.clone());
                    }
                }
            }
        }

        for key in matter.keys() {
            if let Some(key) = key.as_str() {
                if !self.fields.contains_key(key) {
                    if COMPUTED_FIELDS.contains(&key) {
                        tracing::warn!(
                            "{}: `{}` is a computed field and is derived at load time; the authored value is ignored",
                            file,
                            key
                        );
                    } else {
                        tracing::warn!("{}: unknown front-matter field `{}` ignored", file, key);
                    }
                }
            }
        }

        Ok(values)
    }
}
