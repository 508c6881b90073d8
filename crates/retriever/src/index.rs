use serde::{Deserialize, Serialize};

/// One entry in the general document index. The `path` is relative to the
/// retriever's base path; the body is loaded lazily on first retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagDocument {
    pub id: String,
    pub title: String,
    pub path: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Hints for when the document is worth injecting, matched as
    /// substrings of the query.
    #[serde(default)]
    pub use_when: Vec<String>,
}

/// A citable data source described in the general index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataFileEntry {
    pub citation_key: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub use_for: Vec<String>,
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentIndex {
    #[serde(default)]
    pub documents: Vec<RagDocument>,
    #[serde(default)]
    pub data_files: Vec<DataFileEntry>,
}

/// A current-intelligence document: dated, jurisdiction-tagged, and
/// excluded from retrieval once expired.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentIntelDocument {
    pub id: String,
    pub title: String,
    pub path: String,
    /// "upcoming" entries get a boost on forward-looking queries.
    #[serde(rename = "type", default)]
    pub doc_type: Option<String>,
    #[serde(rename = "published", default)]
    pub published_unix_ms: Option<u64>,
    #[serde(rename = "expires", default)]
    pub expires_unix_ms: Option<u64>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub relevance: Vec<String>,
    #[serde(default)]
    pub jurisdictions: Vec<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntelIndex {
    #[serde(default)]
    pub documents: Vec<CurrentIntelDocument>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub citation_keys: Vec<String>,
}
