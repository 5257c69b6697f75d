use crate::error::{Error, Result};
use crate::model::HashPolicy;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Project configuration, read from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory the corpus' file paths are relative to
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Directory generated files are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    #[serde(default)]
    pub indexing: IndexingConfig,

    #[serde(default)]
    pub generate_files: GenerateFilesConfig,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("./out")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            out_dir: default_out_dir(),
            indexing: IndexingConfig::default(),
            generate_files: GenerateFilesConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a file, or return the default if the file is missing
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check every generated file configuration
    pub fn validate(&self) -> Result<()> {
        for index_file in &self.generate_files.index_files {
            index_file.validate()?;
        }
        Ok(())
    }
}

/// How terms are matched and occurrences grouped
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexingConfig {
    /// Heading depth at which document links are consolidated; occurrences
    /// below deeper headings become deep links
    #[serde(default = "default_group_by_heading_depth")]
    pub group_by_heading_depth: u8,

    /// Default case folding for terms that don't set it themselves
    #[serde(default)]
    pub ignore_case: bool,

    /// Keep a renamed term under the hash of its original value
    #[serde(default)]
    pub keep_hash_on_rename: bool,
}

fn default_group_by_heading_depth() -> u8 {
    6
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            group_by_heading_depth: default_group_by_heading_depth(),
            ignore_case: false,
            keep_hash_on_rename: false,
        }
    }
}

impl IndexingConfig {
    pub fn hash_policy(&self) -> HashPolicy {
        if self.keep_hash_on_rename {
            HashPolicy::FixedAtConstruction
        } else {
            HashPolicy::Rehash
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFilesConfig {
    #[serde(default)]
    pub index_files: Vec<IndexFileConfig>,
}

/// A generated book index or glossary term list page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexFileConfig {
    /// Output file, relative to the base directory
    #[serde(default)]
    pub file: Option<String>,

    #[serde(default = "default_index_title")]
    pub title: String,

    /// Omit links to sections below the grouping depth
    #[serde(default)]
    pub hide_deep_links: bool,

    /// Restrict the page to the terms of this glossary file
    #[serde(default)]
    pub glossary: Option<String>,
}

fn default_index_title() -> String {
    "Book Index".to_string()
}

impl Default for IndexFileConfig {
    fn default() -> Self {
        Self {
            file: None,
            title: default_index_title(),
            hide_deep_links: false,
            glossary: None,
        }
    }
}

impl IndexFileConfig {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            ..Default::default()
        }
    }

    /// The output file; a configuration without one is rejected
    pub fn validate(&self) -> Result<&str> {
        self.file
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| Error::MissingIndexFile {
                title: self.title.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.base_dir, PathBuf::from("."));
        assert_eq!(config.indexing.group_by_heading_depth, 6);
        assert!(!config.indexing.ignore_case);
        assert_eq!(config.indexing.hash_policy(), HashPolicy::Rehash);
        assert!(config.generate_files.index_files.is_empty());
    }

    #[test]
    fn test_index_file_defaults() {
        let config: Config = serde_json::from_str(
            r#"{
                "indexing": { "groupByHeadingDepth": 2, "keepHashOnRename": true },
                "generateFiles": { "indexFiles": [ { "file": "book-index.md" } ] }
            }"#,
        )
        .unwrap();
        assert_eq!(config.indexing.group_by_heading_depth, 2);
        assert_eq!(
            config.indexing.hash_policy(),
            HashPolicy::FixedAtConstruction
        );
        let index_file = &config.generate_files.index_files[0];
        assert_eq!(index_file.title, "Book Index");
        assert!(!index_file.hide_deep_links);
        assert_eq!(index_file.validate().unwrap(), "book-index.md");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let config: Config = serde_json::from_str(
            r#"{ "generateFiles": { "indexFiles": [ { "title": "Terms" } ] } }"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
        assert!(matches!(err, Error::MissingIndexFile { ref title } if title == "Terms"));
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let config = Config::load(Path::new("/nonexistent/glossdex.json")).unwrap();
        assert_eq!(config.indexing.group_by_heading_depth, 6);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glossdex.json");
        fs::write(&path, r#"{ "outDir": "site", "indexing": { "ignoreCase": true } }"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("site"));
        assert!(config.indexing.ignore_case);
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glossdex.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
