use serde::{Deserialize, Serialize};

/// Index of a glossary in the session's glossary table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GlossaryId(pub u32);

/// A glossary file and its display metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Glossary {
    /// Project-relative path of the glossary file
    pub file: String,
    /// Display title, also the text of the glossary's top-level heading
    #[serde(default = "default_title")]
    pub title: String,
    /// Marker rendered next to linked terms (e.g. an arrow or emoji)
    #[serde(default)]
    pub term_hint: String,
}

fn default_title() -> String {
    "Glossary".to_string()
}

impl Glossary {
    pub fn new(file: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            file: crate::utils::paths::normalize(&file.into()),
            title: title.into(),
            term_hint: String::new(),
        }
    }

    pub fn with_term_hint(mut self, hint: impl Into<String>) -> Self {
        self.term_hint = hint.into();
        self
    }
}
