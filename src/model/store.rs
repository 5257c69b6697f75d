use crate::error::Result;
use crate::model::glossary::{Glossary, GlossaryId};
use crate::model::term_definition::{TermDefinition, TermDefinitionData, TermId};
use crate::utils::{collator, paths};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// Glossaries and the term definitions they declare.
///
/// Definitions refer to their glossary by [`GlossaryId`]; the store owns
/// both tables and outlives every id it hands out.
#[derive(Debug, Default)]
pub struct TermStore {
    glossaries: Vec<Glossary>,
    glossaries_by_file: FxHashMap<String, GlossaryId>,
    terms: Vec<TermDefinition>,
}

impl TermStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a glossary. Registering the same file twice returns the
    /// existing id.
    pub fn add_glossary(&mut self, glossary: Glossary) -> GlossaryId {
        let file = paths::normalize(&glossary.file);
        if let Some(&id) = self.glossaries_by_file.get(&file) {
            return id;
        }
        let id = GlossaryId(self.glossaries.len() as u32);
        self.glossaries.push(Glossary { file: file.clone(), ..glossary });
        self.glossaries_by_file.insert(file, id);
        id
    }

    pub fn glossary(&self, id: GlossaryId) -> &Glossary {
        &self.glossaries[id.0 as usize]
    }

    pub fn glossary_by_file(&self, file: &str) -> Option<GlossaryId> {
        self.glossaries_by_file.get(&paths::normalize(file)).copied()
    }

    pub fn glossaries(&self) -> impl Iterator<Item = (GlossaryId, &Glossary)> {
        self.glossaries
            .iter()
            .enumerate()
            .map(|(i, g)| (GlossaryId(i as u32), g))
    }

    pub fn add_term(&mut self, data: TermDefinitionData) -> Result<TermId> {
        let term = TermDefinition::new(data)?;
        let id = TermId(self.terms.len() as u32);
        self.terms.push(term);
        Ok(id)
    }

    pub fn term(&self, id: TermId) -> &TermDefinition {
        &self.terms[id.0 as usize]
    }

    pub fn term_mut(&mut self, id: TermId) -> &mut TermDefinition {
        &mut self.terms[id.0 as usize]
    }

    pub fn terms(&self) -> impl Iterator<Item = (TermId, &TermDefinition)> {
        self.terms
            .iter()
            .enumerate()
            .map(|(i, t)| (TermId(i as u32), t))
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// The glossary declaring a term
    pub fn glossary_of(&self, term: &TermDefinition) -> &Glossary {
        self.glossary(term.glossary)
    }

    /// Presentation order of definitions: by value, then by glossary file
    pub fn compare_definitions(&self, a: &TermDefinition, b: &TermDefinition) -> Ordering {
        collator::compare(a.value(), b.value()).then_with(|| {
            collator::compare(&self.glossary_of(a).file, &self.glossary_of(b).file)
        })
    }

    pub fn compare(&self, a: TermId, b: TermId) -> Ordering {
        self.compare_definitions(self.term(a), self.term(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_terms(entries: &[(&str, &str)]) -> (TermStore, Vec<TermId>) {
        let mut store = TermStore::new();
        let ids = entries
            .iter()
            .map(|(value, file)| {
                let glossary = store.add_glossary(Glossary::new(*file, "Glossary"));
                store
                    .add_term(TermDefinitionData {
                        value: value.to_string(),
                        glossary,
                        ..Default::default()
                    })
                    .unwrap()
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn test_add_glossary_dedupes_by_file() {
        let mut store = TermStore::new();
        let a = store.add_glossary(Glossary::new("./glossary.md", "A"));
        let b = store.add_glossary(Glossary::new("glossary.md", "B"));
        assert_eq!(a, b);
        assert_eq!(store.glossary(a).title, "A");
        assert_eq!(store.glossary_by_file("glossary.md"), Some(a));
    }

    #[test]
    fn test_compare_by_value_then_file() {
        let (store, ids) = store_with_terms(&[("X", "b.md"), ("X", "a.md"), ("W", "c.md")]);
        assert_eq!(store.compare(ids[1], ids[0]), Ordering::Less);
        assert_eq!(store.compare(ids[2], ids[1]), Ordering::Less);
        assert_eq!(store.compare(ids[0], ids[0]), Ordering::Equal);
    }

    #[test]
    fn test_compare_is_total_order() {
        let (store, ids) = store_with_terms(&[
            ("beta", "g2.md"),
            ("Alpha", "g1.md"),
            ("beta", "g1.md"),
            ("alpha", "g3.md"),
            ("gamma", "g1.md"),
        ]);

        for &a in &ids {
            for &b in &ids {
                // antisymmetric
                assert_eq!(store.compare(a, b), store.compare(b, a).reverse());
                for &c in &ids {
                    if store.compare(a, b) == Ordering::Less
                        && store.compare(b, c) == Ordering::Less
                    {
                        assert_eq!(store.compare(a, c), Ordering::Less);
                    }
                }
            }
        }

        let mut sorted = ids.clone();
        sorted.sort_by(|a, b| store.compare(*a, *b));
        let values: Vec<_> = sorted
            .iter()
            .map(|id| (store.term(*id).value(), store.glossary_of(store.term(*id)).file.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("alpha", "g3.md"),
                ("Alpha", "g1.md"),
                ("beta", "g1.md"),
                ("beta", "g2.md"),
                ("gamma", "g1.md"),
            ]
        );
    }
}
