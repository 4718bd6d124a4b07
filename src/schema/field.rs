//! Field declarations and value coercion for content schemas

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

/// The front-matter value kinds a schema can declare
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Free-form string
    String,
    /// Date or datetime, authored as an ISO-8601-ish string
    Date,
    /// String restricted to a closed option set
    Enum { options: Vec<String> },
    /// Ordered list of strings (a bare string is accepted as a one-item list)
    StringList,
    /// Boolean
    Bool,
}

/// Declaration of a single front-matter field
///
/// The required/defaulted split is data, not convention: a required field
/// with no value fails the load, a defaulted field silently takes its
/// default, and a plain optional field is simply absent.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field_type: FieldType,
    pub required: bool,
    pub default: Option<FieldValue>,
}

/// A validated front-matter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Date(DateTime<Utc>),
    Bool(bool),
    List(Vec<String>),
}

impl FieldSpec {
    /// Optional string field
    pub fn string() -> Self {
        Self {
            field_type: FieldType::String,
            required: false,
            default: None,
        }
    }

    /// Optional date field
    pub fn date() -> Self {
        Self {
            field_type: FieldType::Date,
            required: false,
            default: None,
        }
    }

    /// Enum field over the given option list
    pub fn enumeration<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_type: FieldType::Enum {
                options: options.into_iter().map(Into::into).collect(),
            },
            required: false,
            default: None,
        }
    }

    /// Optional list-of-strings field
    pub fn string_list() -> Self {
        Self {
            field_type: FieldType::StringList,
            required: false,
            default: None,
        }
    }

    /// Boolean field that falls back to the given default when absent
    pub fn bool_default(value: bool) -> Self {
        Self {
            field_type: FieldType::Bool,
            required: false,
            default: Some(FieldValue::Bool(value)),
        }
    }

    /// Mark the field required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Coerce an untyped front-matter value into this field's type
    ///
    /// Returns a plain message on failure; the caller attaches file and
    /// field names.
    pub(crate) fn coerce(&self, value: &serde_yaml::Value) -> Result<FieldValue, String> {
        match &self.field_type {
            FieldType::String => value
                .as_str()
                .map(|s| FieldValue::Str(s.to_string()))
                .ok_or_else(|| format!("expected a string, got {}", value_kind(value))),

            FieldType::Date => {
                let text = value
                    .as_str()
                    .ok_or_else(|| format!("expected a date string, got {}", value_kind(value)))?;
                parse_date(text)
                    .map(FieldValue::Date)
                    .ok_or_else(|| format!("`{}` is not a recognizable date", text))
            }

            FieldType::Enum { options } => {
                let text = value
                    .as_str()
                    .ok_or_else(|| format!("expected a string, got {}", value_kind(value)))?;
                if options.iter().any(|o| o == text) {
                    Ok(FieldValue::Str(text.to_string()))
                } else {
                    Err(format!("`{}` is not one of {}", text, options.join(", ")))
                }
            }

            FieldType::StringList => match value {
                serde_yaml::Value::String(s) => Ok(FieldValue::List(vec![s.clone()])),
                serde_yaml::Value::Sequence(seq) => {
                    let mut items = Vec::with_capacity(seq.len());
                    for item in seq {
                        let text = item.as_str().ok_or_else(|| {
                            format!("expected a list of strings, found {}", value_kind(item))
                        })?;
                        items.push(text.to_string());
                    }
                    Ok(FieldValue::List(items))
                }
                other => Err(format!(
                    "expected a list of strings, got {}",
                    value_kind(other)
                )),
            },

            FieldType::Bool => value
                .as_bool()
                .map(FieldValue::Bool)
                .ok_or_else(|| format!("expected a boolean, got {}", value_kind(value))),
        }
    }
}

/// Human-readable kind of a YAML value, for error messages
fn value_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a list",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

/// Parse a date string in the formats authors actually write
///
/// Date-only values become midnight UTC; offsets are normalized to UTC so
/// that ordering across records is total.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
        }
    }

    // RFC 3339 / ISO 8601 with explicit offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    None
}
