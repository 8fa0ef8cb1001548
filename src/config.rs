//! Run configuration.
//!
//! Settings come from an optional YAML file, are overridden by
//! `COMMIT_GRAMMAR_*` environment variables and finally by CLI flags.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Records accepted per author when nothing else is configured.
pub const DEFAULT_AUTHOR_QUOTA: u32 = 10;

/// Longest first line, in characters, kept when collecting records.
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 300;

/// Environment variable overriding [`Settings::author_quota`].
pub const QUOTA_ENV: &str = "COMMIT_GRAMMAR_QUOTA";
/// Environment variable overriding [`Settings::data_dir`].
pub const DATA_DIR_ENV: &str = "COMMIT_GRAMMAR_DATA_DIR";
/// Environment variable overriding [`Settings::outputs_dir`].
pub const OUTPUTS_DIR_ENV: &str = "COMMIT_GRAMMAR_OUTPUTS_DIR";

/// Paths and limits for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of records analysed per author.
    pub author_quota: u32,
    /// Root of the reference data tree.
    pub data_dir: PathBuf,
    /// Directory receiving one JSON document per analysis.
    pub outputs_dir: PathBuf,
    /// Record file; defaults to `processed/commits.txt` under `data_dir`.
    pub messages_file: Option<PathBuf>,
    /// Longest first line kept by `collect`.
    pub max_message_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            author_quota: DEFAULT_AUTHOR_QUOTA,
            data_dir: PathBuf::from("data"),
            outputs_dir: PathBuf::from("outputs"),
            messages_file: None,
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or from the default location when
    /// `None`, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_settings_path()?,
        };
        Self::load_from_path(&path)?.with_overrides(|key| env::var(key).ok())
    }

    /// Loads settings from a YAML file. A missing file yields defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn default_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".commit-grammar").join("settings.yaml"))
    }

    /// Applies overrides looked up by environment variable name.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(quota) = lookup(QUOTA_ENV) {
            self.author_quota = quota
                .trim()
                .parse()
                .with_context(|| format!("Invalid {QUOTA_ENV} value: {quota:?}"))?;
        }
        if let Some(dir) = lookup(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(OUTPUTS_DIR_ENV) {
            self.outputs_dir = PathBuf::from(dir);
        }
        Ok(self)
    }

    /// Record file to analyse.
    pub fn messages_path(&self) -> PathBuf {
        self.messages_file
            .clone()
            .unwrap_or_else(|| self.processed_dir().join("commits.txt"))
    }

    /// Directory holding derived reference data.
    pub fn processed_dir(&self) -> PathBuf {
        self.data_dir.join("processed")
    }

    /// Stop-word list; its first line is a header.
    pub fn stopwords_path(&self) -> PathBuf {
        self.data_dir.join("raw").join("stopwords.txt")
    }

    /// Irregular verb table.
    pub fn irregular_verbs_path(&self) -> PathBuf {
        self.processed_dir().join("irregular_verbs.json")
    }

    /// Infinitive list the word-form lists are generated from.
    pub fn infinitives_path(&self) -> PathBuf {
        self.processed_dir().join("infinitives.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from_path(temp_dir.path().join("settings.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.author_quota, DEFAULT_AUTHOR_QUOTA);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        fs::write(&path, "author_quota: 3\ndata_dir: /srv/corpus\n").unwrap();

        let settings = Settings::load_from_path(&path).unwrap();
        assert_eq!(settings.author_quota, 3);
        assert_eq!(settings.data_dir, PathBuf::from("/srv/corpus"));
        assert_eq!(settings.outputs_dir, PathBuf::from("outputs"));
        assert_eq!(
            settings.messages_path(),
            PathBuf::from("/srv/corpus/processed/commits.txt")
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        fs::write(&path, "author_quota: many\n").unwrap();
        assert!(Settings::load_from_path(&path).is_err());
    }

    #[test]
    fn overrides_take_precedence() {
        let env: HashMap<&str, &str> = [(QUOTA_ENV, "7"), (OUTPUTS_DIR_ENV, "/tmp/out")]
            .into_iter()
            .collect();
        let settings = Settings::default()
            .with_overrides(|key| env.get(key).map(|v| (*v).to_string()))
            .unwrap();

        assert_eq!(settings.author_quota, 7);
        assert_eq!(settings.outputs_dir, PathBuf::from("/tmp/out"));
        assert_eq!(settings.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn invalid_quota_override_is_an_error() {
        let result = Settings::default().with_overrides(|key| {
            (key == QUOTA_ENV).then(|| "lots".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn reference_paths_follow_data_dir() {
        let settings = Settings {
            data_dir: PathBuf::from("corpus"),
            ..Settings::default()
        };
        assert_eq!(settings.stopwords_path(), PathBuf::from("corpus/raw/stopwords.txt"));
        assert_eq!(
            settings.irregular_verbs_path(),
            PathBuf::from("corpus/processed/irregular_verbs.json")
        );
        assert_eq!(
            settings.infinitives_path(),
            PathBuf::from("corpus/processed/infinitives.txt")
        );
    }
}
