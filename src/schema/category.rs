//! The closed category set shared by the built-in content types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category a record belongs to
///
/// The set is closed: front-matter values outside it fail validation at
/// load time rather than falling back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tech,
    Life,
    Work,
}

impl Category {
    /// All categories, in declaration order
    pub const ALL: [Category; 3] = [Category::Tech, Category::Life, Category::Work];

    /// The front-matter spelling of this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tech => "tech",
            Category::Life => "life",
            Category::Work => "work",
        }
    }

    /// Option list fed into the schema's enum field, so the two cannot drift
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|c| c.as_str().to_string()).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tech" => Ok(Category::Tech),
            "life" => Ok(Category::Life),
            "work" => Ok(Category::Work),
            other => Err(format!("`{}` is not one of tech, life, work", other)),
        }
    }
}
