//! # glossdex - Glossary Term Linking and Book Indexes
//!
//! glossdex finds glossary terms in markdown documents, records where they
//! occur, and generates book index pages linking every term phrase to its
//! definitions and to the document sections using it.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`model`] - Glossaries, term definitions, occurrences and document nodes
//! - [`scan`] - Finding term phrases in document text
//! - [`index`] - Generic index engine, term indexes and book index pages
//! - [`session`] - State of one indexing run
//! - [`markdown`] - Output tree and markdown serializer
//! - [`report`] - JSON report and terminal summary
//! - [`ingest`] - Loading a parsed corpus
//! - [`config`] - Project configuration
//!
//! ## Quick Start
//!
//! ```ignore
//! use glossdex::{build_index_tree, ingest, link_terms, Corpus, IndexFileConfig, IndexingSession};
//! use glossdex::markdown::to_markdown;
//!
//! let mut session = IndexingSession::new(Default::default())?;
//! ingest(&mut session, Corpus::load("corpus.json".as_ref())?)?;
//! link_terms(&mut session);
//! session.build_indexes();
//!
//! let page = build_index_tree(&session, &IndexFileConfig::new("book-index.md"))?;
//! println!("{}", to_markdown(&page));
//! ```
//!
//! ## Ordering
//!
//! Term phrases are scanned longest first, so "cache line" wins over
//! "cache" in the same text. Index pages sort phrases with a deterministic
//! collator and document links by file and zero-padded line number, which
//! makes generated output stable across runs.

pub mod config;
pub mod error;
pub mod index;
pub mod ingest;
pub mod markdown;
pub mod model;
pub mod report;
pub mod scan;
pub mod session;
pub mod utils;

pub use config::{Config, IndexFileConfig, IndexingConfig};
pub use error::{Error, Result};
pub use index::build_index_tree;
pub use ingest::{ingest, Corpus};
pub use scan::link_terms;
pub use session::IndexingSession;
