//! Loading an already parsed corpus into a session.
//!
//! The corpus is JSON: glossaries with their terms, and documents as flat,
//! document-order lists of headings and text blocks.
//!
//! ```json
//! {
//!   "glossaries": [{
//!     "file": "glossary.md",
//!     "title": "Glossary",
//!     "terms": [{ "term": "cache", "description": "A small fast memory.", "aliases": ["caches"] }]
//!   }],
//!   "documents": [{
//!     "file": "intro.md",
//!     "nodes": [
//!       { "type": "heading", "depth": 1, "text": "Intro", "line": 1 },
//!       { "type": "text", "value": "Every cache ...", "line": 3 }
//!     ]
//!   }]
//! }
//! ```

use crate::error::Result;
use crate::model::{DocNode, Document, Glossary, Position, TermAttributes, TermDefinitionData};
use crate::session::IndexingSession;
use crate::utils::slugify;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corpus {
    #[serde(default)]
    pub glossaries: Vec<GlossarySource>,
    #[serde(default)]
    pub documents: Vec<DocumentSource>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossarySource {
    pub file: String,
    #[serde(default = "default_glossary_title")]
    pub title: String,
    #[serde(default)]
    pub term_hint: String,
    #[serde(default)]
    pub terms: Vec<TermSource>,
}

fn default_glossary_title() -> String {
    "Glossary".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermSource {
    pub term: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Overrides the configured default
    #[serde(default)]
    pub ignore_case: Option<bool>,
    /// Description fragments; a plain string is accepted as one fragment
    #[serde(default, deserialize_with = "one_or_many")]
    pub description: Vec<String>,
    /// Heading attributes, e.g. `{ "aliases": "caches, cached" }`
    #[serde(default)]
    pub attributes: Option<AttributesSource>,
    #[serde(default)]
    pub heading_id: Option<String>,
    #[serde(default = "default_term_depth")]
    pub depth: u8,
    #[serde(default)]
    pub line: Option<u32>,
}

fn default_term_depth() -> u8 {
    2
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttributesSource {
    #[serde(default)]
    pub aliases: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSource {
    pub file: String,
    #[serde(default)]
    pub nodes: Vec<NodeSource>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeSource {
    Heading {
        depth: u8,
        text: String,
        #[serde(default)]
        id: Option<String>,
        line: u32,
    },
    Text {
        value: String,
        line: u32,
        #[serde(default = "default_column")]
        column: u32,
    },
}

fn default_column() -> u32 {
    1
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

impl Corpus {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus {}", path.display()))?;
        let corpus = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse corpus {}", path.display()))?;
        Ok(corpus)
    }
}

/// Add the corpus' glossaries and documents to a session.
///
/// Each glossary also becomes a document: its title heading, then per term
/// the term heading, the definition node and the description text.
pub fn ingest(session: &mut IndexingSession, corpus: Corpus) -> Result<()> {
    for source in corpus.glossaries {
        ingest_glossary(session, source)?;
    }
    for source in corpus.documents {
        let nodes = source
            .nodes
            .into_iter()
            .map(|node| match node {
                NodeSource::Heading {
                    depth,
                    text,
                    id,
                    line,
                } => {
                    let id = id.unwrap_or_else(|| slugify(&text));
                    DocNode::heading(depth, text, id, line)
                }
                NodeSource::Text {
                    value,
                    line,
                    column,
                } => DocNode::text(value, Position::new(line, column)),
            })
            .collect();
        session.add_document(Document::new(source.file, nodes));
    }
    Ok(())
}

fn ingest_glossary(session: &mut IndexingSession, source: GlossarySource) -> Result<()> {
    let glossary = Glossary::new(&source.file, &source.title).with_term_hint(&source.term_hint);
    let file = glossary.file.clone();
    let glossary_id = session.add_glossary(glossary);
    let default_ignore_case = session.config().ignore_case;

    let mut nodes = vec![DocNode::heading(1, &source.title, slugify(&source.title), 1)];
    let mut next_line = 3;
    let term_count = source.terms.len();

    for term in source.terms {
        let line = term.line.unwrap_or(next_line);
        next_line = line + 4;
        let heading_id = term.heading_id.unwrap_or_else(|| slugify(&term.term));

        let id = session.add_term(TermDefinitionData {
            value: term.term.clone(),
            aliases: term.aliases,
            ignore_case: term.ignore_case.unwrap_or(default_ignore_case),
            hint: source.term_hint.clone(),
            heading_id: heading_id.clone(),
            heading_id_plain: term.term.clone(),
            heading_depth: term.depth,
            anchor: heading_id.clone(),
            glossary: glossary_id,
            ..Default::default()
        })?;

        let (store, _) = session.parts_mut();
        let definition = store.term_mut(id);
        if let Some(attributes) = term.attributes {
            definition.apply_attributes(TermAttributes {
                aliases: attributes.aliases,
                uri: attributes.uri,
            })?;
        }
        for fragment in &term.description {
            definition.append_description(fragment);
        }
        let description = definition.long_description().to_string();

        nodes.push(DocNode::heading(term.depth, &term.term, heading_id, line));
        nodes.push(DocNode::term_definition(id, Position::new(line, 1)));
        if !description.is_empty() {
            nodes.push(DocNode::text(description, Position::new(line + 2, 1)));
        }
    }

    debug!(file = %file, terms = term_count, "ingested glossary");
    session.add_document(Document::new(file, nodes));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexingConfig;
    use crate::model::NodeKind;

    const CORPUS: &str = r#"{
        "glossaries": [{
            "file": "./glossary.md",
            "title": "Glossary",
            "termHint": "↴",
            "terms": [
                { "term": "cache", "description": ["A small", "fast memory .", "More text."],
                  "attributes": { "aliases": "caches, cached,", "uri": "urn:cache" } },
                { "term": "Node", "ignoreCase": true, "description": "A vertex." }
            ]
        }],
        "documents": [{
            "file": "docs/intro.md",
            "nodes": [
                { "type": "heading", "depth": 1, "text": "Intro", "line": 1 },
                { "type": "text", "value": "A cache holds data.", "line": 3 }
            ]
        }]
    }"#;

    #[test]
    fn test_ingest_corpus() {
        let corpus: Corpus = serde_json::from_str(CORPUS).unwrap();
        let mut session = IndexingSession::new(IndexingConfig::default()).unwrap();
        ingest(&mut session, corpus).unwrap();

        let store = session.store();
        assert_eq!(store.term_count(), 2);

        let (_, cache) = store.terms().next().unwrap();
        assert_eq!(cache.value(), "cache");
        assert_eq!(cache.aliases(), &["caches".to_string(), "cached".to_string()]);
        assert_eq!(cache.uri, "urn:cache");
        assert_eq!(cache.hint, "↴");
        assert_eq!(cache.heading_id, "cache");
        assert_eq!(cache.anchor, "cache");
        assert_eq!(cache.long_description(), "A small fast memory. More text.");
        assert_eq!(cache.short_description(), "A small fast memory.");
        assert_eq!(store.glossary_of(cache).file, "glossary.md");

        let (_, node) = store.terms().nth(1).unwrap();
        assert!(node.ignore_case());
        assert_eq!(node.short_description(), "A vertex.");

        let docs = session.documents();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].file, "glossary.md");
        assert!(matches!(&docs[0].nodes[0].kind, NodeKind::Heading(h) if h.text == "Glossary" && h.depth == 1));
        assert!(docs[0].nodes.iter().any(|n| n.as_term_definition().is_some()));
        assert_eq!(docs[1].file, "docs/intro.md");
        assert!(matches!(&docs[1].nodes[0].kind, NodeKind::Heading(h) if h.id == "intro"));
    }

    #[test]
    fn test_default_ignore_case_from_config() {
        let corpus: Corpus = serde_json::from_str(
            r#"{ "glossaries": [{ "file": "g.md", "terms": [{ "term": "Tree" }] }] }"#,
        )
        .unwrap();
        let mut session = IndexingSession::new(IndexingConfig {
            ignore_case: true,
            ..Default::default()
        })
        .unwrap();
        ingest(&mut session, corpus).unwrap();
        let (_, tree) = session.store().terms().next().unwrap();
        assert!(tree.ignore_case());
        assert_eq!(session.store().glossary_of(tree).title, "Glossary");
    }
}
