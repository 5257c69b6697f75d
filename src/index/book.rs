//! Book index and glossary term list pages.
//!
//! A page lists every term phrase found in the documents, in collation
//! order. Each phrase gets links to the glossaries defining it and to the
//! document sections using it:
//!
//! ```text
//! # Book Index
//!
//! ## cache
//!
//! [Glossary](./glossary.md#cache "A small fast memory.") ○ [**Intro**](./intro.md#intro)<sub>↳ [2](./intro.md#lines "Lines")</sub>
//! ```

use crate::config::IndexFileConfig;
use crate::error::{Error, Result};
use crate::index::engine::{group_sorted, Entry};
use crate::index::terms::{ALL_TERMS_KEY, OCCURRENCES_BY_PHRASE, TERMS};
use crate::markdown::{heading, html, link, paragraph, root, span, strong, text, Node};
use crate::model::{IndexNode, NodeRef};
use crate::session::IndexingSession;
use crate::utils::{collator, pad_position, paths::file_link_url};
use indexmap::IndexMap;

const LINK_SEPARATOR: &str = " \u{25cb} ";

/// Build the page configured by `conf`.
///
/// Fails on a configuration without output file or with an unknown
/// glossary, and when indexes have not been built.
pub fn build_index_tree(session: &IndexingSession, conf: &IndexFileConfig) -> Result<Node> {
    let from_file = conf.validate()?;
    let occurrences = session.index(OCCURRENCES_BY_PHRASE)?;

    let mut phrases: Vec<(&str, &[Entry])> = match conf.glossary.as_deref() {
        Some(glossary_file) => {
            let glossary = session
                .store()
                .glossary_by_file(glossary_file)
                .ok_or_else(|| Error::UnknownGlossary {
                    file: from_file.to_string(),
                    glossary: glossary_file.to_string(),
                })?;

            let definitions = session.index(TERMS)?;
            let mut selected: IndexMap<&str, &[Entry]> = IndexMap::new();
            for entry in definitions.get(ALL_TERMS_KEY).map(Vec::as_slice).unwrap_or_default() {
                let Some(id) = session.node(entry.node).as_term_definition() else {
                    continue;
                };
                let term = session.store().term(id);
                if term.glossary != glossary {
                    continue;
                }
                for phrase in term.phrases() {
                    if let Some((key, entries)) = occurrences.get_key_value(phrase) {
                        selected.insert(key.as_str(), entries.as_slice());
                    }
                }
            }
            selected.into_iter().collect()
        }
        None => occurrences
            .iter()
            .map(|(key, entries)| (key.as_str(), entries.as_slice()))
            .collect(),
    };
    phrases.sort_by(|a, b| collator::compare(a.0, b.0));

    let mut children = vec![heading(1, vec![text(&conf.title)])];
    for (_, entries) in phrases {
        children.extend(phrase_block(session, entries, conf, from_file));
    }
    Ok(root(children))
}

fn phrase_block(
    session: &IndexingSession,
    entries: &[Entry],
    conf: &IndexFileConfig,
    from_file: &str,
) -> Vec<Node> {
    let Some(first) = entries.first() else {
        return Vec::new();
    };

    let mut links = glossary_links(session, first, from_file);
    links.extend(document_links(session, entries, conf, from_file));

    vec![
        heading(2, vec![text(session.node_text(first.node))]),
        paragraph(separated(links)),
    ]
}

fn separated(links: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(links.len() * 2);
    for (i, node) in links.into_iter().enumerate() {
        if i > 0 {
            out.push(text(LINK_SEPARATOR));
        }
        out.push(node);
    }
    out
}

/// One link per definition of the phrase, pointing to the definition in
/// its glossary.
fn glossary_links(session: &IndexingSession, first: &Entry, from_file: &str) -> Vec<Node> {
    let Some(occurrence) = session.node(first.node).as_term_occurrence() else {
        return Vec::new();
    };
    let store = session.store();

    let mut ids = occurrence.term_definitions.clone();
    ids.sort_by(|a, b| store.compare(*a, *b).then(a.cmp(b)));
    ids.dedup();

    ids.into_iter()
        .map(|id| {
            let term = store.term(id);
            let glossary = store.glossary_of(term);
            let url = file_link_url(from_file, &glossary.file, Some(term.anchor.as_str()));
            link(url, Some(term.short_description()), vec![text(&glossary.title)])
        })
        .collect()
}

/// One link per group heading the phrase occurs under.
fn document_links(
    session: &IndexingSession,
    entries: &[Entry],
    conf: &IndexFileConfig,
    from_file: &str,
) -> Vec<Node> {
    let store = session.store();
    let group_depth = session.config().group_by_heading_depth;

    group_sorted(entries, |e| position_key(session, &e.file, e.group_heading))
        .into_iter()
        .filter_map(|group| {
            // All entries of a group share the group heading, and only the
            // heading can be linked, so the first entry stands for the group.
            let first = group[0];
            let target_heading = first.group_heading.and_then(|r| session.heading(r));
            let target_url = file_link_url(
                from_file,
                &first.file,
                target_heading.map(|h| h.id.as_str()),
            );

            let label = match target_heading {
                Some(h) => h.text.clone(),
                None => target_url.clone(),
            };

            // glossary pages defining the phrase are already linked by
            // glossary_links()
            let in_glossary = session
                .node(first.node)
                .as_term_occurrence()
                .is_some_and(|o| {
                    o.term_definitions
                        .iter()
                        .any(|&id| store.glossary_of(store.term(id)).title == label)
                });
            if in_glossary {
                return None;
            }

            let mut label_node = text(label);
            if target_heading.is_some_and(|h| h.depth == 1) && group_depth > 1 {
                // highlight links to pages among links to page sections
                label_node = strong(vec![label_node]);
            }

            let page_link = link(target_url, None, vec![label_node]);
            let deep = deep_links(session, from_file, &group, group_depth);
            if conf.hide_deep_links || deep.is_empty() {
                Some(page_link)
            } else {
                let mut children = vec![page_link, html("<sub>↳ ")];
                children.extend(deep);
                children.push(html("</sub>"));
                Some(span(children))
            }
        })
        .collect()
}

/// Numbered links to the headings deeper than the grouping depth. The page
/// link counts as the first, so numbering starts at 2.
fn deep_links(
    session: &IndexingSession,
    from_file: &str,
    group: &[&Entry],
    group_depth: u8,
) -> Vec<Node> {
    let mut number = 1;
    group_sorted(group, |e| position_key(session, &e.file, e.heading))
        .into_iter()
        .filter_map(|entries| {
            let first = entries[0];
            let section = session.heading(first.heading?)?;
            if section.depth <= group_depth {
                return None;
            }
            let url = file_link_url(from_file, &first.file, Some(section.id.as_str()));
            let separator = if number > 1 { ", " } else { "" };
            number += 1;
            Some(span(vec![
                text(separator),
                link(url, Some(section.text.as_str()), vec![text(number.to_string())]),
            ]))
        })
        .collect()
}

/// `file#line` of a heading, line zero-padded so that keys sort by line
fn position_key(session: &IndexingSession, file: &str, heading: Option<NodeRef>) -> String {
    let line = heading.map(|r| session.node(r).line()).unwrap_or(0);
    format!("{}#{}", file, pad_position(line))
}
