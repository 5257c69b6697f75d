//! Plain records of definitions and occurrences, and a terminal summary.

use crate::model::{NodeKind, TermDefinition, TermStore};
use crate::session::IndexingSession;
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// A term definition with its glossary flattened into it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermDefinitionRecord {
    pub value: String,
    pub value_hash8: String,
    pub aliases: Vec<String>,
    pub ignore_case: bool,
    pub uri: String,
    pub hint: String,
    pub long_description: String,
    pub short_description: String,
    pub heading_id: String,
    pub heading_id_plain: String,
    pub heading_depth: u8,
    pub anchor: String,
    pub file: String,
    pub title: String,
    pub term_hint: String,
    pub regex: String,
    pub occurrence_count: usize,
}

impl TermDefinitionRecord {
    pub fn new(store: &TermStore, term: &TermDefinition) -> Self {
        let glossary = store.glossary_of(term);
        Self {
            value: term.value().to_string(),
            value_hash8: term.value_hash8().to_string(),
            aliases: term.aliases().to_vec(),
            ignore_case: term.ignore_case(),
            uri: term.uri.clone(),
            hint: term.hint.clone(),
            long_description: term.long_description().to_string(),
            short_description: term.short_description().to_string(),
            heading_id: term.heading_id.clone(),
            heading_id_plain: term.heading_id_plain.clone(),
            heading_depth: term.heading_depth,
            anchor: term.anchor.clone(),
            file: glossary.file.clone(),
            title: glossary.title.clone(),
            term_hint: glossary.term_hint.clone(),
            regex: term.search_pattern().as_str().to_string(),
            occurrence_count: term.occurrence_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermOccurrenceRecord {
    pub value: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
    /// Heading ids of the matched definitions
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub terms: Vec<TermDefinitionRecord>,
    pub occurrences: Vec<TermOccurrenceRecord>,
    /// Terms never found in any document
    pub unused_terms: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn build_report(session: &IndexingSession) -> Report {
    let store = session.store();

    let mut ids: Vec<_> = store.terms().map(|(id, _)| id).collect();
    ids.sort_by(|a, b| store.compare(*a, *b));

    let terms: Vec<TermDefinitionRecord> = ids
        .iter()
        .map(|id| TermDefinitionRecord::new(store, store.term(*id)))
        .collect();

    let unused_terms = terms
        .iter()
        .filter(|t| t.occurrence_count == 0)
        .map(|t| t.value.clone())
        .collect();

    let occurrences = session
        .documents()
        .iter()
        .flat_map(|doc| {
            doc.nodes.iter().filter_map(move |node| match &node.kind {
                NodeKind::TermOccurrence(o) => Some(TermOccurrenceRecord {
                    value: o.value.clone(),
                    file: doc.file.clone(),
                    line: node.position.line,
                    column: node.position.column,
                    terms: o
                        .term_definitions
                        .iter()
                        .map(|id| store.term(*id).heading_id.clone())
                        .collect(),
                }),
                _ => None,
            })
        })
        .collect();

    Report {
        terms,
        occurrences,
        unused_terms,
        warnings: session.warnings().iter().map(ToString::to_string).collect(),
    }
}

/// Write the report as pretty JSON
pub fn write_report<W: Write>(report: &Report, writer: W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Print terms per glossary with their occurrence counts
pub fn print_term_summary(session: &IndexingSession, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_term_summary(&mut stdout, session)
}

fn write_term_summary<W: WriteColor>(out: &mut W, session: &IndexingSession) -> io::Result<()> {
    let store = session.store();

    for (glossary_id, glossary) in store.glossaries() {
        let mut terms: Vec<_> = store
            .terms()
            .filter(|(_, t)| t.glossary == glossary_id)
            .map(|(id, _)| id)
            .collect();
        if terms.is_empty() {
            continue;
        }
        terms.sort_by(|a, b| store.compare(*a, *b));

        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        write!(out, "{}", glossary.file)?;
        out.reset()?;
        writeln!(out, " ({})", glossary.title)?;

        for id in terms {
            let term = store.term(id);
            write!(out, "  {}", term.value())?;
            if term.occurrence_count() == 0 {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                writeln!(out, " unused")?;
            } else {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                writeln!(out, " {}", term.occurrence_count())?;
            }
            out.reset()?;
        }
    }

    for warning in session.warnings() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        write!(out, "warning")?;
        out.reset()?;
        writeln!(out, ": {}", warning)?;
    }

    Ok(())
}
