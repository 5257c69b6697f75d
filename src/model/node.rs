use crate::model::term_definition::TermId;
use crate::model::term_occurrence::TermOccurrence;
use serde::{Deserialize, Serialize};

/// Line and column of a node in its source file (1-based)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A section heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub depth: u8,
    pub text: String,
    /// Anchor id (slug) of the heading
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Heading(Heading),
    Text(String),
    TermDefinition(TermId),
    TermOccurrence(TermOccurrence),
}

/// A node of a parsed document, flattened in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocNode {
    pub kind: NodeKind,
    pub position: Position,
}

impl DocNode {
    pub fn heading(depth: u8, text: impl Into<String>, id: impl Into<String>, line: u32) -> Self {
        Self {
            kind: NodeKind::Heading(Heading {
                depth,
                text: text.into(),
                id: id.into(),
            }),
            position: Position::new(line, 1),
        }
    }

    pub fn text(value: impl Into<String>, position: Position) -> Self {
        Self {
            kind: NodeKind::Text(value.into()),
            position,
        }
    }

    pub fn term_definition(id: TermId, position: Position) -> Self {
        Self {
            kind: NodeKind::TermDefinition(id),
            position,
        }
    }

    pub fn term_occurrence(occurrence: TermOccurrence, position: Position) -> Self {
        Self {
            kind: NodeKind::TermOccurrence(occurrence),
            position,
        }
    }

    pub fn as_heading(&self) -> Option<&Heading> {
        match &self.kind {
            NodeKind::Heading(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_term_definition(&self) -> Option<TermId> {
        match self.kind {
            NodeKind::TermDefinition(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_term_occurrence(&self) -> Option<&TermOccurrence> {
        match &self.kind {
            NodeKind::TermOccurrence(o) => Some(o),
            _ => None,
        }
    }
}

/// Shape the indexing engine needs from a node
pub trait IndexNode {
    /// Heading depth when the node is a heading
    fn heading_depth(&self) -> Option<u8>;
    /// Source line of the node
    fn line(&self) -> u32;
}

impl IndexNode for DocNode {
    fn heading_depth(&self) -> Option<u8> {
        self.as_heading().map(|h| h.depth)
    }

    fn line(&self) -> u32 {
        self.position.line
    }
}

/// A parsed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<N = DocNode> {
    /// Project-relative path
    pub file: String,
    pub nodes: Vec<N>,
}

impl<N> Document<N> {
    pub fn new(file: impl Into<String>, nodes: Vec<N>) -> Self {
        Self {
            file: crate::utils::paths::normalize(&file.into()),
            nodes,
        }
    }
}

/// Address of a node inside a session's document list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub document: usize,
    pub node: usize,
}
