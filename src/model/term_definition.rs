use crate::error::Result;
use crate::model::glossary::GlossaryId;
use crate::utils::hash8;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

static SPACE_BEFORE_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\.").expect("valid regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}\b").expect("valid regex"));
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.?!])(?:\s|$)").expect("valid regex"));

/// Index of a term definition in the session's term table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(pub u32);

/// Whether renaming a term moves it to the bucket of its new hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashPolicy {
    /// `set_term` recomputes `value_hash8`
    #[default]
    Rehash,
    /// `value_hash8` keeps the hash of the value the term was created with
    FixedAtConstruction,
}

/// Input for [`TermDefinition::new`]. Unset strings stay empty.
#[derive(Debug, Clone, Default)]
pub struct TermDefinitionData {
    pub value: String,
    pub uri: String,
    pub hint: String,
    pub long_description: String,
    pub heading_id: String,
    pub heading_id_plain: String,
    pub heading_depth: u8,
    pub anchor: String,
    pub glossary: GlossaryId,
    pub aliases: Vec<String>,
    pub ignore_case: bool,
    pub hash_policy: HashPolicy,
}

/// Attributes attached to a glossary heading, e.g. `{aliases: "a, b,"}`
#[derive(Debug, Clone, Default)]
pub struct TermAttributes {
    /// Comma separated alternative phrases
    pub aliases: Option<String>,
    pub uri: Option<String>,
}

/// A term declared by a glossary heading.
///
/// `value`, `aliases` and `ignore_case` are only changed through methods
/// which recompile [`search_pattern`](Self::search_pattern) before the new
/// values are committed.
#[derive(Debug, Clone)]
pub struct TermDefinition {
    value: String,
    value_hash8: String,
    aliases: Vec<String>,
    ignore_case: bool,
    search_pattern: Regex,
    long_description: String,
    short_description: String,
    occurrence_count: usize,
    hash_policy: HashPolicy,

    pub uri: String,
    pub hint: String,
    pub heading_id: String,
    pub heading_id_plain: String,
    pub heading_depth: u8,
    pub anchor: String,
    pub glossary: GlossaryId,
}

impl TermDefinition {
    pub fn new(data: TermDefinitionData) -> Result<Self> {
        let search_pattern = build_search_pattern(&data.value, &data.aliases, data.ignore_case)?;
        let short_description = first_sentence(&data.long_description);

        Ok(Self {
            value_hash8: hash8(&data.value),
            value: data.value,
            aliases: data.aliases,
            ignore_case: data.ignore_case,
            search_pattern,
            long_description: data.long_description,
            short_description,
            occurrence_count: 0,
            hash_policy: data.hash_policy,
            uri: data.uri,
            hint: data.hint,
            heading_id: data.heading_id,
            heading_id_plain: data.heading_id_plain,
            heading_depth: data.heading_depth,
            anchor: data.anchor,
            glossary: data.glossary,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn value_hash8(&self) -> &str {
        &self.value_hash8
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn search_pattern(&self) -> &Regex {
        &self.search_pattern
    }

    pub fn occurrence_count(&self) -> usize {
        self.occurrence_count
    }

    /// The full description text
    pub fn long_description(&self) -> &str {
        &self.long_description
    }

    /// The first sentence of the description
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    /// The value and all aliases
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.value.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Character length of the longest phrase
    pub fn longest_phrase_len(&self) -> usize {
        self.phrases().map(|p| p.chars().count()).max().unwrap_or(0)
    }

    pub fn set_term(&mut self, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        self.search_pattern = build_search_pattern(&value, &self.aliases, self.ignore_case)?;
        if self.hash_policy == HashPolicy::Rehash {
            self.value_hash8 = hash8(&value);
        }
        self.value = value;
        Ok(())
    }

    /// Replace the aliases. An empty list keeps the current aliases.
    pub fn set_aliases(&mut self, aliases: Vec<String>) -> Result<()> {
        if aliases.is_empty() {
            return Ok(());
        }
        self.search_pattern = build_search_pattern(&self.value, &aliases, self.ignore_case)?;
        self.aliases = aliases;
        Ok(())
    }

    pub fn set_ignore_case(&mut self, ignore_case: bool) -> Result<()> {
        self.search_pattern = build_search_pattern(&self.value, &self.aliases, ignore_case)?;
        self.ignore_case = ignore_case;
        Ok(())
    }

    pub fn apply_attributes(&mut self, attrs: TermAttributes) -> Result<()> {
        if let Some(aliases) = attrs.aliases.filter(|a| !a.is_empty()) {
            let aliases = strip_trailing_comma(&aliases)
                .split(", ")
                .map(str::to_string)
                .collect();
            self.set_aliases(aliases)?;
        }
        if let Some(uri) = attrs.uri.filter(|u| !u.is_empty()) {
            self.uri = uri;
        }
        Ok(())
    }

    pub fn record_occurrence(&mut self) {
        self.occurrence_count += 1;
    }

    /// Append a text fragment to the long description.
    ///
    /// Descriptions containing inline markup arrive in several fragments.
    /// Spacing is normalized and the short description is derived again.
    pub fn append_description(&mut self, fragment: &str) {
        let separator = if !self.long_description.is_empty() && !fragment.is_empty() {
            " "
        } else {
            ""
        };
        let joined = format!("{}{}{}", self.long_description, separator, fragment);
        let joined = SPACE_BEFORE_PERIOD.replace(&joined, ".");
        let joined = WHITESPACE_RUN.replace_all(&joined, " ");

        self.long_description = joined.trim().to_string();
        self.short_description = first_sentence(&self.long_description);
    }
}

/// Compile the pattern matching the value or any alias.
///
/// Phrases are tried longest first. Otherwise a phrase that is a substring
/// of a longer one wins the alternation and splits the longer match.
fn build_search_pattern(value: &str, aliases: &[String], ignore_case: bool) -> Result<Regex> {
    let mut phrases: Vec<String> = aliases
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(value))
        .filter(|p| !p.is_empty())
        .map(regex::escape)
        .collect();
    phrases.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));

    let pattern = format!("(?:{})", phrases.join("|"));
    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(ignore_case)
        .build()?;
    Ok(regex)
}

fn first_sentence(text: &str) -> String {
    match SENTENCE_END.captures(text) {
        Some(caps) => {
            let start = caps.get(0).map(|m| m.start()).unwrap_or(text.len());
            format!("{}{}", text[..start].trim(), &caps[1])
        }
        None => text.trim().to_string(),
    }
}

fn strip_trailing_comma(aliases: &str) -> &str {
    let trimmed = aliases
        .strip_suffix(|c: char| c.is_whitespace())
        .unwrap_or(aliases);
    trimmed.strip_suffix(',').unwrap_or(aliases)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(value: &str, aliases: &[&str], ignore_case: bool) -> TermDefinition {
        TermDefinition::new(TermDefinitionData {
            value: value.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            ignore_case,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let t = term("cache", &[], false);
        assert_eq!(t.value(), "cache");
        assert!(t.aliases().is_empty());
        assert_eq!(t.uri, "");
        assert_eq!(t.long_description(), "");
        assert_eq!(t.short_description(), "");
        assert_eq!(t.occurrence_count(), 0);
        assert_eq!(t.value_hash8(), hash8("cache"));
    }

    #[test]
    fn test_pattern_matches_value_and_aliases() {
        let t = term("C++ (language)", &["cpp", "c.plus.plus"], false);
        let re = t.search_pattern();
        assert!(re.is_match("I like C++ (language)"));
        assert!(re.is_match("cpp"));
        assert!(re.is_match("c.plus.plus"));
        assert!(!re.is_match("cXplusXplus"));
    }

    #[test]
    fn test_longest_alias_first() {
        let t = term("cache", &["cache line", "cache line size"], false);
        let m = t.search_pattern().find("the cache line size is 64").unwrap();
        assert_eq!(m.as_str(), "cache line size");

        let m = t.search_pattern().find("the cache line is full").unwrap();
        assert_eq!(m.as_str(), "cache line");
    }

    #[test]
    fn test_ignore_case() {
        let t = term("Node", &[], true);
        assert!(t.search_pattern().is_match("node"));
        assert!(t.search_pattern().is_match("NODE"));

        let t = term("Node", &[], false);
        assert!(t.search_pattern().is_match("Node"));
        assert!(!t.search_pattern().is_match("node"));
        assert!(!t.search_pattern().is_match("NODE"));
    }

    #[test]
    fn test_set_ignore_case_recompiles() {
        let mut t = term("Node", &[], false);
        t.set_ignore_case(true).unwrap();
        assert!(t.search_pattern().is_match("NODE"));
    }

    #[test]
    fn test_set_term_recompiles_and_rehashes() {
        let mut t = term("cache", &[], false);
        t.set_term("buffer").unwrap();
        assert!(t.search_pattern().is_match("buffer"));
        assert!(!t.search_pattern().is_match("cache"));
        assert_eq!(t.value_hash8(), hash8("buffer"));
    }

    #[test]
    fn test_set_term_keeps_hash_when_fixed() {
        let mut t = TermDefinition::new(TermDefinitionData {
            value: "cache".to_string(),
            hash_policy: HashPolicy::FixedAtConstruction,
            ..Default::default()
        })
        .unwrap();
        t.set_term("buffer").unwrap();
        assert_eq!(t.value(), "buffer");
        assert_eq!(t.value_hash8(), hash8("cache"));
    }

    #[test]
    fn test_empty_aliases_is_noop() {
        let mut t = term("cache", &["cached"], false);
        t.set_aliases(Vec::new()).unwrap();
        assert_eq!(t.aliases(), &["cached".to_string()]);
        assert!(t.search_pattern().is_match("cached"));
    }

    #[test]
    fn test_apply_attributes() {
        let mut t = term("cache", &[], false);
        t.apply_attributes(TermAttributes {
            aliases: Some("caches, cached,".to_string()),
            uri: Some("http://example.org/cache".to_string()),
        })
        .unwrap();
        assert_eq!(t.aliases(), &["caches".to_string(), "cached".to_string()]);
        assert_eq!(t.uri, "http://example.org/cache");
        assert!(t.search_pattern().is_match("cached"));

        t.apply_attributes(TermAttributes {
            aliases: Some("stash, ".to_string()),
            uri: None,
        })
        .unwrap();
        assert_eq!(t.aliases(), &["stash".to_string()]);
        assert_eq!(t.uri, "http://example.org/cache");
    }

    #[test]
    fn test_record_occurrence() {
        let mut t = term("cache", &[], false);
        t.record_occurrence();
        t.record_occurrence();
        assert_eq!(t.occurrence_count(), 2);
    }

    #[test]
    fn test_append_description() {
        let mut t = term("cache", &[], false);
        t.append_description("A small and fast");
        t.append_description("memory .");
        t.append_description("It holds  copies of data.");
        assert_eq!(
            t.long_description(),
            "A small and fast memory. It holds copies of data."
        );
        assert_eq!(t.short_description(), "A small and fast memory.");
    }

    #[test]
    fn test_short_description_question() {
        let mut t = term("cache", &[], false);
        t.append_description("What is a cache? Something fast.");
        assert_eq!(t.short_description(), "What is a cache?");
    }

    #[test]
    fn test_short_description_without_terminator() {
        let mut t = term("cache", &[], false);
        t.append_description("version 1.2 of the cache");
        assert_eq!(t.short_description(), "version 1.2 of the cache");
    }

    #[test]
    fn test_short_description_is_stable() {
        let mut t = term("cache", &[], false);
        t.append_description("First. Second.");
        let first = t.short_description().to_string();
        t.append_description("");
        assert_eq!(t.short_description(), first);
        assert_eq!(t.long_description(), "First. Second.");
    }
}
