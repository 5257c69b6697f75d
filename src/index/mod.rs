pub mod book;
pub mod engine;
pub mod terms;

pub use book::build_index_tree;
pub use engine::{group, group_sorted, Entry, Index, IndexId, IndexRegistry, IndexSpec, Indexes};
pub use terms::{
    IndexWarning, ALL_TERMS_KEY, OCCURRENCES_BY_PHRASE, TERMS, TERMS_BY_HASH8, TERMS_BY_ID,
};
