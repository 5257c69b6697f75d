//! Indexes over term definitions and term occurrences.

use crate::index::engine::{Index, IndexId, IndexSpec};
use crate::model::{DocNode, TermStore};
use std::fmt;

/// Occurrences keyed by the literal matched phrase
pub const OCCURRENCES_BY_PHRASE: IndexId = IndexId("termOccurrencesByPhrase");
/// Definitions keyed by glossary heading id (expected unique)
pub const TERMS_BY_ID: IndexId = IndexId("termsById");
/// Definitions keyed by the 8 character hash of their value (a bucket)
pub const TERMS_BY_HASH8: IndexId = IndexId("termsByHash8");
/// All definitions under [`ALL_TERMS_KEY`]
pub const TERMS: IndexId = IndexId("terms");

pub const ALL_TERMS_KEY: &str = "0";

/// The index specs every session registers
pub fn term_index_specs() -> Vec<IndexSpec<DocNode, TermStore>> {
    vec![
        IndexSpec {
            id: OCCURRENCES_BY_PHRASE,
            title: "Book Index",
            filter: |node, _| node.as_term_occurrence().is_some(),
            key: |node, _| node.as_term_occurrence().map(|o| o.value.clone()),
        },
        IndexSpec {
            id: TERMS_BY_ID,
            title: "Glossary Terms",
            filter: |node, _| node.as_term_definition().is_some(),
            key: |node, store| {
                let id = node.as_term_definition()?;
                let heading_id = &store.term(id).heading_id;
                (!heading_id.is_empty()).then(|| heading_id.clone())
            },
        },
        IndexSpec {
            id: TERMS_BY_HASH8,
            title: "Glossary Terms",
            filter: |node, _| node.as_term_definition().is_some(),
            key: |node, store| {
                node.as_term_definition()
                    .map(|id| store.term(id).value_hash8().to_string())
            },
        },
        IndexSpec {
            id: TERMS,
            title: "Terms",
            filter: |node, _| node.as_term_definition().is_some(),
            key: |_, _| Some(ALL_TERMS_KEY.to_string()),
        },
    ]
}

/// Integrity problems found while indexing. They never abort a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexWarning {
    /// Several definitions share a heading id, so id lookups are ambiguous
    DuplicateHeadingId {
        heading_id: String,
        files: Vec<String>,
    },
}

impl fmt::Display for IndexWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexWarning::DuplicateHeadingId { heading_id, files } => write!(
                f,
                "heading id '{}' is used by {} term definitions ({})",
                heading_id,
                files.len(),
                files.join(", ")
            ),
        }
    }
}

/// Report every heading id of [`TERMS_BY_ID`] with more than one definition.
/// All definitions stay in the index.
pub fn check_heading_ids(terms_by_id: &Index) -> Vec<IndexWarning> {
    terms_by_id
        .iter()
        .filter(|(_, entries)| entries.len() > 1)
        .map(|(heading_id, entries)| IndexWarning::DuplicateHeadingId {
            heading_id: heading_id.clone(),
            files: entries.iter().map(|e| e.file.clone()).collect(),
        })
        .collect()
}
