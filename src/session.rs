//! State of one indexing run.
//!
//! A session owns the glossaries, term definitions, documents, registered
//! index specs and built indexes. Nothing is global, so independent
//! sessions can run side by side.

use crate::config::IndexingConfig;
use crate::error::{Error, Result};
use crate::index::engine::{Index, IndexId, IndexRegistry, IndexSpec, Indexes};
use crate::index::terms::{self, IndexWarning};
use crate::model::{
    DocNode, Document, Glossary, GlossaryId, Heading, NodeKind, NodeRef, TermDefinitionData,
    TermId, TermStore,
};
use tracing::{debug, warn};

pub struct IndexingSession {
    config: IndexingConfig,
    store: TermStore,
    documents: Vec<Document>,
    registry: IndexRegistry<DocNode, TermStore>,
    indexes: Option<Indexes>,
    warnings: Vec<IndexWarning>,
}

impl IndexingSession {
    /// Create a session with the term indexes registered
    pub fn new(config: IndexingConfig) -> Result<Self> {
        Ok(Self {
            config,
            store: TermStore::new(),
            documents: Vec::new(),
            registry: IndexRegistry::from_specs(terms::term_index_specs())?,
            indexes: None,
            warnings: Vec::new(),
        })
    }

    pub fn config(&self) -> &IndexingConfig {
        &self.config
    }

    pub fn store(&self) -> &TermStore {
        &self.store
    }

    pub fn add_glossary(&mut self, glossary: Glossary) -> GlossaryId {
        self.store.add_glossary(glossary)
    }

    /// Declare a term. The session's hash policy applies.
    pub fn add_term(&mut self, data: TermDefinitionData) -> Result<TermId> {
        self.indexes = None;
        self.store.add_term(TermDefinitionData {
            hash_policy: self.config.hash_policy(),
            ..data
        })
    }

    pub fn add_document(&mut self, document: Document) -> usize {
        self.indexes = None;
        self.documents.push(document);
        self.documents.len() - 1
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Mutable access for rewriting documents, e.g. linking terms.
    /// Built indexes are discarded.
    pub(crate) fn parts_mut(&mut self) -> (&mut TermStore, &mut Vec<Document>) {
        self.indexes = None;
        (&mut self.store, &mut self.documents)
    }

    /// Declare an additional index. Built indexes are discarded.
    pub fn register_index(&mut self, spec: IndexSpec<DocNode, TermStore>) -> Result<()> {
        self.indexes = None;
        self.registry.register(spec)
    }

    pub fn node(&self, node: NodeRef) -> &DocNode {
        &self.documents[node.document].nodes[node.node]
    }

    pub fn heading(&self, node: NodeRef) -> Option<&Heading> {
        self.node(node).as_heading()
    }

    /// Plain text of a node
    pub fn node_text(&self, node: NodeRef) -> String {
        match &self.node(node).kind {
            NodeKind::Heading(h) => h.text.clone(),
            NodeKind::Text(text) => text.clone(),
            NodeKind::TermOccurrence(o) => o.value.clone(),
            NodeKind::TermDefinition(id) => self.store.term(*id).value().to_string(),
        }
    }

    /// Build all registered indexes from the current documents
    pub fn build_indexes(&mut self) -> &Indexes {
        let indexes = self.registry.build(
            &self.documents,
            &self.store,
            self.config.group_by_heading_depth,
        );
        debug!(
            documents = self.documents.len(),
            terms = self.store.term_count(),
            "built indexes"
        );

        self.warnings = match indexes.get(terms::TERMS_BY_ID) {
            Ok(by_id) => terms::check_heading_ids(by_id),
            Err(_) => Vec::new(),
        };
        for warning in &self.warnings {
            warn!("{}", warning);
        }

        self.indexes.insert(indexes)
    }

    /// A built index. Fails before [`build_indexes`](Self::build_indexes).
    pub fn index(&self, id: IndexId) -> Result<&Index> {
        self.indexes.as_ref().ok_or(Error::IndexNotBuilt)?.get(id)
    }

    /// Warnings of the last build
    pub fn warnings(&self) -> &[IndexWarning] {
        &self.warnings
    }
}
