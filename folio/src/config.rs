//! Configuration management for Folio
//!
//! Settings are resolved from, in increasing precedence: built-in defaults,
//! `FOLIO_*` environment variables and an optional `folio.yaml` in the
//! project root. The resolved [`Config`] produces a [`ContentLayout`], the
//! explicit root value every component receives instead of consulting the
//! process working directory.

use crate::error::FolioError;
use crate::fs_utils::FileSystem;
use serde::Deserialize;
use std::env;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_CONTENT_DIR: &str = "content";
const DEFAULT_FALLBACK_CONTENT_DIR: &str = "example";
const DEFAULT_RECORD_FILE_NAME: &str = "article.md";
const DEFAULT_MAX_SLUG_LENGTH: usize = 80;
const DEFAULT_AUTHOR: &str = "Your Name";

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file from disk
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        /// Path to the configuration file that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse YAML content from a configuration file
    #[error("Invalid YAML syntax in {path}:\n{source}\n\nHint: Check for proper indentation and YAML formatting")]
    YamlParse {
        /// Path to the configuration file with invalid YAML content
        path: PathBuf,
        /// Underlying YAML parsing error
        #[source]
        source: serde_yaml::Error,
    },

    /// Invalid configuration value for a specific field
    #[error("Invalid configuration value for '{field}': {value}\n{hint}")]
    InvalidValue {
        /// Name of the offending field
        field: String,
        /// The rejected value
        value: String,
        /// How to fix it
        hint: String,
    },
}

impl From<ConfigError> for FolioError {
    fn from(err: ConfigError) -> Self {
        FolioError::Config(err.to_string())
    }
}

/// Loads `FOLIO_`-prefixed environment variables
#[derive(Debug)]
struct EnvLoader {
    prefix: &'static str,
}

impl EnvLoader {
    fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    fn load_string(&self, suffix: &str, current: &str) -> String {
        env::var(self.key(suffix))
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| current.to_string())
    }

    fn load_parsed<T: FromStr + Copy>(&self, suffix: &str, current: T) -> T {
        let key = self.key(suffix);
        match env::var(&key) {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid value '{}' for {}", raw, key);
                current
            }),
            Err(_) => current,
        }
    }
}

/// Configuration settings for a Folio project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory under the project root holding records (default: `content`)
    pub content_dir: String,
    /// Directory searched when the content directory is absent (default: `example`)
    pub fallback_content_dir: String,
    /// File name of the record inside each leaf directory (default: `article.md`)
    pub record_file_name: String,
    /// Maximum slug length in bytes (default: 80)
    pub max_slug_length: usize,
    /// Byline used when the site configuration names no author
    pub default_author: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: DEFAULT_CONTENT_DIR.to_string(),
            fallback_content_dir: DEFAULT_FALLBACK_CONTENT_DIR.to_string(),
            record_file_name: DEFAULT_RECORD_FILE_NAME.to_string(),
            max_slug_length: DEFAULT_MAX_SLUG_LENGTH,
            default_author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

/// Shape of `folio.yaml`; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct YamlConfig {
    content_dir: Option<String>,
    fallback_content_dir: Option<String>,
    record_file_name: Option<String>,
    max_slug_length: Option<usize>,
    default_author: Option<String>,
}

impl YamlConfig {
    fn apply_to(self, config: &mut Config) {
        if let Some(v) = self.content_dir {
            config.content_dir = v;
        }
        if let Some(v) = self.fallback_content_dir {
            config.fallback_content_dir = v;
        }
        if let Some(v) = self.record_file_name {
            config.record_file_name = v;
        }
        if let Some(v) = self.max_slug_length {
            config.max_slug_length = v;
        }
        if let Some(v) = self.default_author {
            config.default_author = v;
        }
    }
}

impl Config {
    /// Name of the optional project configuration file
    pub const FILE_NAME: &'static str = "folio.yaml";

    /// Resolve configuration for the project rooted at `project_root`.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_vars();

        let path = project_root.join(Self::FILE_NAME);
        if path.is_file() {
            let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::FileRead {
                path: path.clone(),
                source,
            })?;
            let yaml: YamlConfig = if text.trim().is_empty() {
                YamlConfig::default()
            } else {
                serde_yaml::from_str(&text).map_err(|source| ConfigError::YamlParse {
                    path: path.clone(),
                    source,
                })?
            };
            yaml.apply_to(&mut config);
            tracing::debug!("Loaded configuration from {}", path.display());
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        let loader = EnvLoader { prefix: "FOLIO" };

        self.content_dir = loader.load_string("CONTENT_DIR", &self.content_dir);
        self.fallback_content_dir =
            loader.load_string("FALLBACK_CONTENT_DIR", &self.fallback_content_dir);
        self.record_file_name = loader.load_string("RECORD_FILE", &self.record_file_name);
        self.max_slug_length = loader.load_parsed("MAX_SLUG_LENGTH", self.max_slug_length);
        self.default_author = loader.load_string("DEFAULT_AUTHOR", &self.default_author);
    }

    /// Validate the current configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_slug_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_slug_length".to_string(),
                value: "0".to_string(),
                hint: "Use a positive number of characters".to_string(),
            });
        }

        let is_single_component = |value: &str| {
            let mut components = Path::new(value).components();
            matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
        };

        for (field, value) in [
            ("content_dir", &self.content_dir),
            ("fallback_content_dir", &self.fallback_content_dir),
            ("record_file_name", &self.record_file_name),
        ] {
            if !is_single_component(value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                    hint: "Use a plain name without path separators".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Build the storage layout for `project_root`
    pub fn layout(&self, project_root: impl Into<PathBuf>) -> ContentLayout {
        let project_root = project_root.into();
        ContentLayout {
            content_root: project_root.join(&self.content_dir),
            fallback_root: project_root.join(&self.fallback_content_dir),
            record_file_name: self.record_file_name.clone(),
            project_root,
        }
    }
}

/// Where records live on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLayout {
    /// Project root; relative paths in search results are relative to it
    pub project_root: PathBuf,
    /// Root of the `YYYY/MM/DD/NN-slug` tree
    pub content_root: PathBuf,
    /// Tree searched when `content_root` does not exist
    pub fallback_root: PathBuf,
    /// Record file inside each leaf directory
    pub record_file_name: String,
}

impl ContentLayout {
    /// Layout with default names under `project_root`
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Config::default().layout(project_root)
    }

    /// Fail with [`FolioError::ContentRootMissing`] unless the content root exists
    pub fn ensure_content_root(&self, fs: &dyn FileSystem) -> Result<(), FolioError> {
        if fs.is_dir(&self.content_root) {
            Ok(())
        } else {
            Err(FolioError::ContentRootMissing(self.content_root.clone()))
        }
    }

    /// Directory scanned by search: the content root, or the fallback tree
    /// when no content root exists yet
    pub fn search_root(&self, fs: &dyn FileSystem) -> &Path {
        if !fs.is_dir(&self.content_root) && fs.is_dir(&self.fallback_root) {
            &self.fallback_root
        } else {
            &self.content_root
        }
    }

    /// Record file inside a leaf directory
    pub fn record_file(&self, dir: &Path) -> PathBuf {
        dir.join(&self.record_file_name)
    }

    /// `path` relative to the project root with `/` separators; paths
    /// outside the project are returned as given
    pub fn relative_path(&self, path: &Path) -> String {
        let Ok(relative) = path.strip_prefix(&self.project_root) else {
            return path.display().to_string();
        };
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
