//! Data model: glossaries, term definitions, term occurrences and the
//! document nodes they are embedded in.

pub mod glossary;
pub mod node;
pub mod store;
pub mod term_definition;
pub mod term_occurrence;

pub use glossary::{Glossary, GlossaryId};
pub use node::{DocNode, Document, Heading, IndexNode, NodeKind, NodeRef, Position};
pub use store::TermStore;
pub use term_definition::{HashPolicy, TermAttributes, TermDefinition, TermDefinitionData, TermId};
pub use term_occurrence::TermOccurrence;
