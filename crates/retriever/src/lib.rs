//! Retrieval-augmented context for the assistant prompt.
//!
//! The retriever loads two JSON indices from disk (general reference
//! documents and short-lived "current intelligence"), scores free-text
//! queries against them, and assembles the grounding context the chat
//! route prepends to the LLM system prompt. Every failure mode degrades:
//! an unreadable index behaves as empty, an unreadable document body
//! becomes a placeholder string.

mod error;
mod index;
mod retriever;
mod scoring;
mod time;

pub use error::{Result, RetrieverError};
pub use index::{
    CurrentIntelDocument, DataFileEntry, DocumentIndex, IntelIndex, RagDocument,
};
pub use retriever::{
    DocumentRetriever, RetrievalOptions, RetrievalResult, RetrievedDocument, RetrievedIntel,
    DOCUMENT_INDEX_FILE, INTEL_INDEX_FILE,
};
