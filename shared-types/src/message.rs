use serde::{Deserialize, Serialize};

/// A single message header as delivered by the mail provider.
///
/// Names keep the provider's casing. A message may carry several headers with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Identifier of a search hit, before its content has been fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRef {
    pub id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
}

impl MessageRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            thread_id: None,
        }
    }
}

/// Fetched message content the extraction pipeline works on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageRecord {
    pub headers: Vec<Header>,
    pub snippet: String,
}

impl MessageRecord {
    pub fn new(headers: Vec<Header>, snippet: impl Into<String>) -> Self {
        Self {
            headers,
            snippet: snippet.into(),
        }
    }
}
