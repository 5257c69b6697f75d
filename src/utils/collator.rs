//! Deterministic, locale-independent string collation.
//!
//! Generated index pages must come out identical on every machine, so the
//! ordering here does not consult the host locale. Strings are compared in
//! three passes:
//!
//! 1. case-folded characters (`"apple" < "Banana" < "cherry"`)
//! 2. case, lowercase first (`"node" < "Node"`)
//! 3. raw code points, so distinct strings never compare equal
//!
//! Diacritics are not folded: accented letters sort by code point after
//! the unaccented alphabet, so `"éclair"` comes after `"zebra"` rather
//! than next to `"eclair"`.

use std::cmp::Ordering;

/// Compare two strings in collation order.
pub fn compare(a: &str, b: &str) -> Ordering {
    compare_folded(a, b)
        .then_with(|| compare_case(a, b))
        .then_with(|| a.cmp(b))
}

fn compare_folded(a: &str, b: &str) -> Ordering {
    let a = a.chars().flat_map(char::to_lowercase);
    let b = b.chars().flat_map(char::to_lowercase);
    a.cmp(b)
}

fn compare_case(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
