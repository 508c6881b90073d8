use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::Path;
use warroom_retriever::{DocumentRetriever, RetrievalOptions};

// Far-future expiry for intel that should stay live in tests.
const YEAR_2100_MS: u64 = 4_102_444_800_000;

fn write_fixture(base: &Path) {
    let document_index = json!({
        "documents": [
            {
                "id": "donor-analysis",
                "title": "Donor Analysis Guide",
                "path": "docs/donor-analysis.md",
                "category": "fundraising",
                "description": "How to read donor rollups",
                "keywords": ["donor", "zip", "fundraising"],
                "use_when": ["donor questions"]
            },
            {
                "id": "turf-cutting",
                "title": "Turf Cutting Guide",
                "path": "docs/turf-cutting.md",
                "category": "field",
                "keywords": ["canvass", "turf"],
                "use_when": ["canvassing questions"]
            },
            {
                "id": "missing-body",
                "title": "Ghost Document",
                "path": "docs/nope.md",
                "keywords": ["ghost"]
            }
        ],
        "data_files": [
            {
                "citation_key": "fec-2024",
                "description": "Itemized donor contributions",
                "use_for": ["donor totals"],
                "path": "data/fec.csv"
            },
            {
                "citation_key": "turnout-history",
                "description": "Precinct turnout history",
                "use_for": ["turnout trends"],
                "path": "data/turnout.csv"
            }
        ]
    });
    let intel_index = json!({
        "documents": [
            {
                "id": "race-brief",
                "title": "County Commission Race Brief",
                "path": "intel/race-brief.md",
                "type": "upcoming",
                "published": 1_700_000_000_000u64,
                "expires": YEAR_2100_MS,
                "keywords": ["commission", "race"],
                "relevance": ["elections"],
                "jurisdictions": ["Ingham County"],
                "priority": "high"
            },
            {
                "id": "stale-brief",
                "title": "Expired Primary Brief",
                "path": "intel/stale.md",
                "published": 1_500_000_000_000u64,
                "expires": 1_500_000_000_000u64,
                "keywords": ["commission", "race", "elections"]
            }
        ],
        "sources": ["county clerk filings"],
        "citation_keys": ["race-brief"]
    });

    fs::create_dir_all(base.join("docs")).unwrap();
    fs::create_dir_all(base.join("intel")).unwrap();
    fs::write(
        base.join("document-index.json"),
        serde_json::to_vec_pretty(&document_index).unwrap(),
    )
    .unwrap();
    fs::write(
        base.join("intel-index.json"),
        serde_json::to_vec_pretty(&intel_index).unwrap(),
    )
    .unwrap();
    fs::write(
        base.join("docs/donor-analysis.md"),
        "Donor rollups explained.",
    )
    .unwrap();
    fs::write(base.join("docs/turf-cutting.md"), "Cut turfs small.").unwrap();
    fs::write(
        base.join("intel/race-brief.md"),
        "---\ntitle: County Commission Race Brief\npriority: high\n---\nTwo open seats this cycle.",
    )
    .unwrap();
}

#[tokio::test]
async fn finders_rank_and_filter() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let retriever = DocumentRetriever::new(dir.path());

    let docs = retriever
        .find_relevant_documents("donor totals by zip", 3)
        .await;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "donor-analysis");

    let citations = retriever.find_relevant_citations("donor totals by zip").await;
    assert_eq!(citations, vec!["fec-2024".to_string()]);

    assert!(retriever.find_relevant_documents("", 3).await.is_empty());
}

#[tokio::test]
async fn expired_intel_is_never_returned() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let retriever = DocumentRetriever::new(dir.path());

    // Both briefs match the query keywords; only the live one comes back.
    let intel = retriever
        .find_relevant_current_intel("commission race this cycle", None, 5)
        .await;
    assert_eq!(intel.len(), 1);
    assert_eq!(intel[0].id, "race-brief");
}

#[tokio::test]
async fn jurisdiction_match_boosts_intel() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let retriever = DocumentRetriever::new(dir.path());

    let intel = retriever
        .find_relevant_current_intel("commission race", Some("ingham county"), 3)
        .await;
    assert_eq!(intel.len(), 1);
    assert_eq!(intel[0].jurisdictions, vec!["Ingham County".to_string()]);
}

#[tokio::test]
async fn intel_content_strips_front_matter() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let retriever = DocumentRetriever::new(dir.path());

    let intel = retriever
        .find_relevant_current_intel("commission race", None, 1)
        .await;
    let content = retriever.load_intel_content(&intel[0]).await;
    assert_eq!(content, "Two open seats this cycle.");
}

#[tokio::test]
async fn unreadable_body_becomes_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let retriever = DocumentRetriever::new(dir.path());

    let docs = retriever.find_relevant_documents("ghost", 1).await;
    assert_eq!(docs[0].id, "missing-body");
    let content = retriever.load_document_content(&docs[0]).await;
    assert_eq!(content, "[Content for \"Ghost Document\" could not be loaded]");
}

#[tokio::test]
async fn body_reads_are_cached() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let retriever = DocumentRetriever::new(dir.path());

    let docs = retriever.find_relevant_documents("donor", 1).await;
    let first = retriever.load_document_content(&docs[0]).await;
    // The cache serves the old body even after the file changes on disk.
    fs::write(dir.path().join("docs/donor-analysis.md"), "rewritten").unwrap();
    let second = retriever.load_document_content(&docs[0]).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn retrieve_assembles_context_and_prompt() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let retriever = DocumentRetriever::new(dir.path());

    let result = retriever
        .retrieve(
            "donor totals for the commission race",
            &RetrievalOptions::default(),
        )
        .await;
    assert!(!result.is_empty());
    assert!(result.context.contains("Donor Analysis Guide"));
    assert!(result.context.contains("## Current Intelligence"));
    assert!(result.context.contains("[fec-2024]"));

    let prompt = retriever.format_for_system_prompt(&result);
    assert!(prompt.contains("# Reference Documentation"));
    assert!(prompt.contains("# Citation Instructions"));
    assert!(prompt.contains("# Current Intelligence"));
}

#[tokio::test]
async fn missing_indices_degrade_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let retriever = DocumentRetriever::new(dir.path());
    retriever.initialize().await;

    let result = retriever
        .retrieve("anything at all", &RetrievalOptions::default())
        .await;
    assert!(result.is_empty());
    assert_eq!(retriever.format_for_system_prompt(&result), "");
}

#[tokio::test]
async fn corrupt_index_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("document-index.json"), "{not json").unwrap();
    let retriever = DocumentRetriever::new(dir.path());
    assert!(retriever.find_relevant_documents("donor", 3).await.is_empty());
}
