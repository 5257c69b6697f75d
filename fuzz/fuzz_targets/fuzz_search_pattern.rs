#![no_main]

use arbitrary::Arbitrary;
use glossdex::model::{TermDefinition, TermDefinitionData};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    value: String,
    aliases: Vec<String>,
    ignore_case: bool,
}

fuzz_target!(|input: Input| {
    // Escaped phrases must always compile, and the pattern must find the
    // value and every alias in itself
    let Ok(term) = TermDefinition::new(TermDefinitionData {
        value: input.value,
        aliases: input.aliases,
        ignore_case: input.ignore_case,
        ..Default::default()
    }) else {
        return;
    };
    for phrase in term.phrases() {
        if !phrase.is_empty() {
            assert!(term.search_pattern().is_match(phrase));
        }
    }
});
