use crate::error::{Result, RetrieverError};
use crate::index::{CurrentIntelDocument, DocumentIndex, IntelIndex, RagDocument};
use crate::scoring::{data_file_matches, rank_and_truncate, score_document, score_intel};
use crate::time::unix_now_ms;
use log::{debug, warn};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::OnceCell;

pub const DOCUMENT_INDEX_FILE: &str = "document-index.json";
pub const INTEL_INDEX_FILE: &str = "intel-index.json";

const DEFAULT_MAX_DOCS: usize = 3;
const CONTENT_CACHE_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct RetrievalOptions {
    pub max_docs: usize,
    pub jurisdiction: Option<String>,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            max_docs: DEFAULT_MAX_DOCS,
            jurisdiction: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedDocument {
    pub document: RagDocument,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedIntel {
    pub document: CurrentIntelDocument,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievalResult {
    pub documents: Vec<RetrievedDocument>,
    pub citations: Vec<String>,
    pub current_intel: Vec<RetrievedIntel>,
    /// Assembled grounding context: document bodies plus the intelligence
    /// and data-source sections.
    pub context: String,
}

impl RetrievalResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.citations.is_empty() && self.current_intel.is_empty()
    }
}

struct Indices {
    documents: DocumentIndex,
    intel: IntelIndex,
}

/// Lazily-initialized retriever over the on-disk JSON indices.
///
/// Construct one at application start with the content base path and
/// share it; the indices load on first use and an unreadable index is
/// logged and treated as empty so retrieval stays available.
pub struct DocumentRetriever {
    base_path: PathBuf,
    indices: OnceCell<Indices>,
    content_cache: Mutex<LruCache<String, String>>,
}

impl DocumentRetriever {
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            indices: OnceCell::new(),
            content_cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(CONTENT_CACHE_CAPACITY).expect("nonzero cache capacity"),
            )),
        }
    }

    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Load both indices. Idempotent; every finder calls this on first
    /// use, so calling it eagerly is optional.
    pub async fn initialize(&self) {
        self.indices().await;
    }

    async fn indices(&self) -> &Indices {
        self.indices
            .get_or_init(|| async {
                Indices {
                    documents: load_index(&self.base_path.join(DOCUMENT_INDEX_FILE)).await,
                    intel: load_index(&self.base_path.join(INTEL_INDEX_FILE)).await,
                }
            })
            .await
    }

    /// Rank the general documents against a query. Zero-score documents
    /// are excluded, ties keep index order, and an empty query matches
    /// nothing.
    pub async fn find_relevant_documents(&self, query: &str, max_docs: usize) -> Vec<RagDocument> {
        let query_lc = query.trim().to_lowercase();
        if query_lc.is_empty() {
            return Vec::new();
        }
        let scored: Vec<(RagDocument, u32)> = self
            .indices()
            .await
            .documents
            .documents
            .iter()
            .map(|doc| (doc.clone(), score_document(&query_lc, doc)))
            .filter(|(_, score)| *score > 0)
            .collect();
        rank_and_truncate(scored, max_docs)
    }

    /// Citation keys of the data files matching a query. Uncapped.
    pub async fn find_relevant_citations(&self, query: &str) -> Vec<String> {
        let query_lc = query.trim().to_lowercase();
        if query_lc.is_empty() {
            return Vec::new();
        }
        self.indices()
            .await
            .documents
            .data_files
            .iter()
            .filter(|entry| data_file_matches(&query_lc, entry))
            .map(|entry| entry.citation_key.clone())
            .collect()
    }

    /// Rank current-intelligence documents, excluding anything expired.
    pub async fn find_relevant_current_intel(
        &self,
        query: &str,
        jurisdiction: Option<&str>,
        max_docs: usize,
    ) -> Vec<CurrentIntelDocument> {
        self.find_relevant_current_intel_at(query, jurisdiction, max_docs, unix_now_ms())
            .await
    }

    async fn find_relevant_current_intel_at(
        &self,
        query: &str,
        jurisdiction: Option<&str>,
        max_docs: usize,
        now_ms: u64,
    ) -> Vec<CurrentIntelDocument> {
        let query_lc = query.trim().to_lowercase();
        if query_lc.is_empty() {
            return Vec::new();
        }
        let scored: Vec<(CurrentIntelDocument, u32)> = self
            .indices()
            .await
            .intel
            .documents
            .iter()
            .filter(|doc| doc.expires_unix_ms.map_or(true, |expires| expires >= now_ms))
            .map(|doc| (doc.clone(), score_intel(&query_lc, jurisdiction, now_ms, doc)))
            .filter(|(_, score)| *score > 0)
            .collect();
        rank_and_truncate(scored, max_docs)
    }

    /// Body text of a general document, cached by id. An unreadable file
    /// yields a user-safe placeholder, never an error.
    pub async fn load_document_content(&self, doc: &RagDocument) -> String {
        self.load_body(&doc.id, &doc.path, &doc.title, false).await
    }

    /// Body text of an intel document with its YAML front matter removed.
    pub async fn load_intel_content(&self, intel: &CurrentIntelDocument) -> String {
        self.load_body(&intel.id, &intel.path, &intel.title, true).await
    }

    async fn load_body(&self, id: &str, path: &str, title: &str, strip_front: bool) -> String {
        if let Some(cached) = self
            .content_cache
            .lock()
            .expect("content cache lock")
            .get(id)
        {
            return cached.clone();
        }
        let full_path = self.base_path.join(path);
        match tokio::fs::read_to_string(&full_path).await {
            Ok(raw) => {
                let body = if strip_front {
                    strip_front_matter(&raw).to_string()
                } else {
                    raw
                };
                self.content_cache
                    .lock()
                    .expect("content cache lock")
                    .put(id.to_string(), body.clone());
                body
            }
            Err(err) => {
                warn!("document body unreadable at {}: {err}", full_path.display());
                format!("[Content for \"{title}\" could not be loaded]")
            }
        }
    }

    /// Run all three finders, load the top document bodies, and assemble
    /// the combined grounding context.
    pub async fn retrieve(&self, query: &str, options: &RetrievalOptions) -> RetrievalResult {
        let documents = self.find_relevant_documents(query, options.max_docs).await;
        let citations = self.find_relevant_citations(query).await;
        let intel = self
            .find_relevant_current_intel(query, options.jurisdiction.as_deref(), options.max_docs)
            .await;

        let mut retrieved_docs = Vec::with_capacity(documents.len());
        for document in documents {
            let content = self.load_document_content(&document).await;
            retrieved_docs.push(RetrievedDocument { document, content });
        }
        let mut retrieved_intel = Vec::with_capacity(intel.len());
        for document in intel {
            let content = self.load_intel_content(&document).await;
            retrieved_intel.push(RetrievedIntel { document, content });
        }

        let context = self
            .assemble_context(&retrieved_docs, &retrieved_intel, &citations)
            .await;
        RetrievalResult {
            documents: retrieved_docs,
            citations,
            current_intel: retrieved_intel,
            context,
        }
    }

    async fn assemble_context(
        &self,
        documents: &[RetrievedDocument],
        intel: &[RetrievedIntel],
        citations: &[String],
    ) -> String {
        let mut sections = Vec::new();
        for retrieved in documents {
            sections.push(format!(
                "## {}\n{}",
                retrieved.document.title, retrieved.content
            ));
        }
        if !intel.is_empty() {
            let mut section = String::from("## Current Intelligence\n");
            for retrieved in intel {
                section.push_str(&format!(
                    "### {}\n{}\n",
                    retrieved.document.title, retrieved.content
                ));
            }
            sections.push(section.trim_end().to_string());
        }
        if !citations.is_empty() {
            let indices = self.indices().await;
            let mut section = String::from("## Available Data Sources\n");
            for key in citations {
                let description = indices
                    .documents
                    .data_files
                    .iter()
                    .find(|entry| &entry.citation_key == key)
                    .map(|entry| entry.description.as_str())
                    .unwrap_or("");
                section.push_str(&format!("- [{key}] {description}\n"));
            }
            sections.push(section.trim_end().to_string());
        }
        sections.join("\n\n")
    }

    /// Render a retrieval result as prompt-ready text. Empty results
    /// render as the empty string so callers can skip appending.
    #[must_use]
    pub fn format_for_system_prompt(&self, result: &RetrievalResult) -> String {
        if result.is_empty() {
            return String::new();
        }
        let mut out = String::new();
        if !result.documents.is_empty() {
            out.push_str("# Reference Documentation\n");
            for retrieved in &result.documents {
                out.push_str(&format!(
                    "## {}\n{}\n",
                    retrieved.document.title, retrieved.content
                ));
            }
        }
        if !result.citations.is_empty() {
            out.push_str("# Citation Instructions\n");
            out.push_str(
                "When you rely on one of the data sources below, cite it inline as [cite:key].\n",
            );
            out.push_str("# Data Sources\n");
            for key in &result.citations {
                out.push_str(&format!("- {key}\n"));
            }
        }
        if !result.current_intel.is_empty() {
            out.push_str("# Current Intelligence\n");
            for retrieved in &result.current_intel {
                out.push_str(&format!(
                    "## {}\n{}\n",
                    retrieved.document.title, retrieved.content
                ));
            }
        }
        out.trim_end().to_string()
    }
}

/// Read and parse one index file; any failure is logged and substituted
/// with the empty index so retrieval keeps working.
async fn load_index<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match read_index(path).await {
        Ok(index) => index,
        Err(RetrieverError::IoError(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!("index at {} not found, starting empty", path.display());
            T::default()
        }
        Err(err) => {
            warn!("index at {} unusable, starting empty: {err}", path.display());
            T::default()
        }
    }
}

async fn read_index<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Strip a leading `---` YAML front-matter block.
fn strip_front_matter(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("---") else {
        return text;
    };
    let Some(close) = rest.find("\n---") else {
        return text;
    };
    let after = &rest[close + 4..];
    match after.find('\n') {
        Some(newline) => &after[newline + 1..],
        None => "",
    }
}
