//! Linking terms: split text nodes into text and term occurrence nodes.

use crate::model::{DocNode, NodeKind, Position, TermId, TermOccurrence, TermStore};
use crate::session::IndexingSession;
use crate::utils::collator;
use regex::{Regex, RegexBuilder};
use std::cmp::Reverse;
use tracing::{debug, warn};

/// A piece of a text node
#[derive(Debug, Clone, PartialEq, Eq)]
enum Span {
    /// Not yet matched, byte offset into the original text
    Pending { offset: usize, text: String },
    Term {
        offset: usize,
        value: String,
        terms: Vec<TermId>,
    },
}

/// One phrase of a definition, compiled on its own
struct Candidate {
    term: TermId,
    pattern: Regex,
}

/// Replace matches of term phrases in all text nodes of all documents with
/// term occurrence nodes. Returns the number of occurrences.
///
/// Each matched definition's occurrence count is incremented once per
/// occurrence. Headings are not scanned.
pub fn link_terms(session: &mut IndexingSession) -> usize {
    let (store, documents) = session.parts_mut();
    let candidates = scan_order(store);
    let mut total = 0;

    for document in documents.iter_mut() {
        let mut nodes = Vec::with_capacity(document.nodes.len());
        let mut found = 0;

        for node in document.nodes.drain(..) {
            let position = node.position;
            let text = match node.kind {
                NodeKind::Text(text) => text,
                kind => {
                    nodes.push(DocNode { kind, position });
                    continue;
                }
            };

            for span in split_text(store, &candidates, &text) {
                match span {
                    Span::Pending { offset, text: rest } => {
                        nodes.push(DocNode::text(rest, shift(position, &text, offset)));
                    }
                    Span::Term {
                        offset,
                        value,
                        terms,
                    } => {
                        for &id in &terms {
                            store.term_mut(id).record_occurrence();
                        }
                        found += 1;
                        nodes.push(DocNode::term_occurrence(
                            TermOccurrence::new(value, terms),
                            shift(position, &text, offset),
                        ));
                    }
                }
            }
        }

        if found > 0 {
            debug!(file = %document.file, occurrences = found, "linked terms");
        }
        total += found;
        document.nodes = nodes;
    }

    total
}

/// Every phrase of every definition, longest first, so a longer phrase
/// claims the text before any shorter phrase it contains, whichever
/// definition either belongs to.
fn scan_order(store: &TermStore) -> Vec<Candidate> {
    let mut phrases: Vec<(usize, TermId, &str)> = store
        .terms()
        .flat_map(|(id, term)| {
            term.phrases()
                .filter(|p| !p.is_empty())
                .map(move |p| (p.chars().count(), id, p))
        })
        .collect();
    phrases.sort_by(|a, b| {
        Reverse(a.0)
            .cmp(&Reverse(b.0))
            .then_with(|| collator::compare(store.term(a.1).value(), store.term(b.1).value()))
            .then_with(|| a.1.cmp(&b.1))
    });

    phrases
        .into_iter()
        .filter_map(|(_, id, phrase)| {
            let built = RegexBuilder::new(&regex::escape(phrase))
                .case_insensitive(store.term(id).ignore_case())
                .build();
            match built {
                Ok(pattern) => Some(Candidate { term: id, pattern }),
                Err(e) => {
                    warn!(phrase, error = %e, "skipping unmatchable phrase");
                    None
                }
            }
        })
        .collect()
}

fn split_text(store: &TermStore, candidates: &[Candidate], text: &str) -> Vec<Span> {
    let mut spans = vec![Span::Pending {
        offset: 0,
        text: text.to_string(),
    }];

    for candidate in candidates {
        let mut next = Vec::with_capacity(spans.len());

        for span in spans {
            let (offset, pending) = match span {
                Span::Pending { offset, text } => (offset, text),
                matched => {
                    next.push(matched);
                    continue;
                }
            };

            let mut last = 0;
            for m in candidate.pattern.find_iter(&pending) {
                if m.is_empty() {
                    continue;
                }
                if m.start() > last {
                    next.push(Span::Pending {
                        offset: offset + last,
                        text: pending[last..m.start()].to_string(),
                    });
                }
                next.push(Span::Term {
                    offset: offset + m.start(),
                    value: m.as_str().to_string(),
                    terms: matching_definitions(store, candidate.term, m.as_str()),
                });
                last = m.end();
            }
            if last < pending.len() {
                next.push(Span::Pending {
                    offset: offset + last,
                    text: pending[last..].to_string(),
                });
            }
        }
        spans = next;
    }

    spans
}

/// The definition that matched, followed by every other definition whose
/// pattern matches the whole phrase.
fn matching_definitions(store: &TermStore, found: TermId, phrase: &str) -> Vec<TermId> {
    let mut ids = vec![found];
    ids.extend(store.terms().filter_map(|(id, term)| {
        let whole = term
            .search_pattern()
            .find(phrase)
            .is_some_and(|m| m.start() == 0 && m.end() == phrase.len());
        (id != found && whole).then_some(id)
    }));
    ids
}

fn shift(position: Position, text: &str, offset: usize) -> Position {
    Position::new(
        position.line,
        position.column + text[..offset].chars().count() as u32,
    )
}
