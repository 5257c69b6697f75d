use crate::model::term_definition::TermId;

/// A located match of one or more term definitions' search patterns.
///
/// The file is given by the document holding the occurrence node and the
/// position by the node itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermOccurrence {
    /// The matched text as written in the document
    pub value: String,
    /// Every definition matching `value`, e.g. the same phrase defined in
    /// several glossaries. Never empty.
    pub term_definitions: Vec<TermId>,
}

impl TermOccurrence {
    pub fn new(value: impl Into<String>, term_definitions: Vec<TermId>) -> Self {
        Self {
            value: value.into(),
            term_definitions,
        }
    }
}
