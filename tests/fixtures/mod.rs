//! Shared corpora for integration tests.

#![allow(dead_code)]

use glossdex::{ingest, link_terms, Corpus, IndexingConfig, IndexingSession};

/// One glossary with "cache" and "cache line", and a guide using both
/// under sections at lines 2 and 11.
pub const CACHE_CORPUS: &str = r#"{
    "glossaries": [{
        "file": "glossary.md",
        "title": "Glossary",
        "terms": [
            { "term": "cache", "description": "A small fast memory." },
            { "term": "cache line", "description": ["A block of cache.", "Fixed size."] }
        ]
    }],
    "documents": [{
        "file": "guide.md",
        "nodes": [
            { "type": "heading", "depth": 1, "text": "Guide", "line": 1 },
            { "type": "heading", "depth": 2, "text": "Second", "line": 2 },
            { "type": "text", "value": "the cache line is full", "line": 3 },
            { "type": "heading", "depth": 2, "text": "Eleventh", "line": 11 },
            { "type": "text", "value": "a cache line and a cache", "line": 12 }
        ]
    }]
}"#;

/// The term "X" defined in two glossaries
pub const TWO_GLOSSARIES_CORPUS: &str = r#"{
    "glossaries": [
        { "file": "b/glossary.md", "title": "Glossary B",
          "terms": [{ "term": "X", "description": "The letter." }] },
        { "file": "a/glossary.md", "title": "Glossary A",
          "terms": [{ "term": "X", "description": "The letter." }, { "term": "Y" }] }
    ],
    "documents": [{
        "file": "notes.md",
        "nodes": [
            { "type": "heading", "depth": 1, "text": "Notes", "line": 1 },
            { "type": "text", "value": "X marks the spot.", "line": 3 }
        ]
    }]
}"#;

pub fn config(group_by_heading_depth: u8) -> IndexingConfig {
    IndexingConfig {
        group_by_heading_depth,
        ..Default::default()
    }
}

/// Ingest, link and index a corpus
pub fn indexed_session(corpus: &str, config: IndexingConfig) -> IndexingSession {
    let corpus: Corpus = serde_json::from_str(corpus).expect("valid corpus");
    let mut session = IndexingSession::new(config).expect("session");
    ingest(&mut session, corpus).expect("ingest");
    link_terms(&mut session);
    session.build_indexes();
    session
}
