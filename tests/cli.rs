//! Integration tests running the glossdex binary.

mod fixtures;

use std::fs;
use std::process::Command;

fn glossdex() -> Command {
    Command::new(env!("CARGO_BIN_EXE_glossdex"))
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("corpus.json"), fixtures::CACHE_CORPUS).unwrap();
    fs::write(
        dir.path().join("glossdex.json"),
        r#"{
            "outDir": "out",
            "indexing": { "groupByHeadingDepth": 1 },
            "generateFiles": { "indexFiles": [
                { "file": "book-index.md" },
                { "file": "terms/glossary-terms.md", "title": "Terms", "hideDeepLinks": true, "glossary": "glossary.md" }
            ] }
        }"#,
    )
    .unwrap();
    dir
}

#[test]
fn test_build_writes_index_files() {
    let dir = project();
    let output = glossdex()
        .arg("build")
        .arg("corpus.json")
        .current_dir(dir.path())
        .output()
        .expect("Failed to run glossdex");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let book = fs::read_to_string(dir.path().join("out/book-index.md")).unwrap();
    assert!(book.starts_with("# Book Index\n\n## cache\n\n"));

    let terms = fs::read_to_string(dir.path().join("out/terms/glossary-terms.md")).unwrap();
    assert!(terms.starts_with("# Terms\n\n"));
    assert!(terms.contains("[Glossary](../glossary.md#cache-line \"A block of cache.\")"));
    assert!(!terms.contains("<sub>"));
}

#[test]
fn test_report_json() {
    let dir = project();
    let output = glossdex()
        .arg("report")
        .current_dir(dir.path())
        .output()
        .expect("Failed to run glossdex");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["terms"][0]["value"], "cache");
    assert_eq!(report["terms"][1]["regex"], "(?:cache line)");
    assert_eq!(report["occurrences"].as_array().unwrap().len(), 4);
}

#[test]
fn test_terms_summary() {
    let dir = project();
    let output = glossdex()
        .args(["terms", "--no-color"])
        .current_dir(dir.path())
        .output()
        .expect("Failed to run glossdex");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "glossary.md (Glossary)\n  cache 2\n  cache line 2\n"
    );
}

#[test]
fn test_config_error_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("glossdex.json"),
        r#"{ "generateFiles": { "indexFiles": [ { "title": "No file" } ] } }"#,
    )
    .unwrap();
    // no corpus.json: the config is rejected before it is read
    let output = glossdex()
        .arg("build")
        .current_dir(dir.path())
        .output()
        .expect("Failed to run glossdex");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No file"));
}
