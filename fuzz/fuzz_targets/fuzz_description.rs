#![no_main]

use glossdex::model::{TermDefinition, TermDefinitionData};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|fragments: Vec<String>| {
    // Appending arbitrary fragments should not panic
    let Ok(mut term) = TermDefinition::new(TermDefinitionData::default()) else {
        return;
    };
    for fragment in &fragments {
        term.append_description(fragment);
    }
    let _ = term.short_description();
});
