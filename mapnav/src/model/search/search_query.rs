use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// user-entered destination text, trimmed and guaranteed non-empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct SearchQuery(String);

impl SearchQuery {
    /// trims the input, returning None when nothing is left.
    pub fn parse(text: &str) -> Option<SearchQuery> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(SearchQuery(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SearchQuery {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SearchQuery::parse(&value).ok_or_else(|| String::from("search query must not be blank"))
    }
}

impl From<SearchQuery> for String {
    fn from(value: SearchQuery) -> Self {
        value.0
    }
}

impl Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
