//! Configuration loading and parsing.
//!
//! Parses `consolewrap.toml` (or an override path provided by the binary)
//! into `ConfigFile`. Every section is optional; unknown fields are ignored
//! (TOML deserialization tolerance) so older binaries keep working with newer
//! files. A file that fails to parse falls back to defaults with a warning.
//!
//! The scope table (`FileTypeMap`) is assembled here as well because it is the
//! only piece of configuration with merge semantics: a user supplied
//! `file_type_map` *replaces* the template defaults, then the fixed defaults
//! are applied on top so `source.js`, `source.python` and `embedding.php`
//! always map to their own wrapper.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};
use tracing::{debug, info, warn};

pub const CONFIG_FILE_NAME: &str = "consolewrap.toml";

/// Scope identifiers mapped to template-language keys, used when the user does
/// not supply a `file_type_map` of their own.
pub const TEMPLATE_FILE_TYPES: &[(&str, &str)] = &[
    ("text.html.vue", "js"),
    ("source.ts", "js"),
    ("source.tsx", "js"),
    ("source.coffee", "js"),
    ("text.html.basic", "js"),
    ("text.html.blade", "js"),
    ("text.html.twig", "js"),
];

/// Always applied last; wins over any user entry with the same key.
pub const FIXED_FILE_TYPES: &[(&str, &str)] = &[
    ("embedding.php", "php"),
    ("source.js", "js"),
    ("source.python", "py"),
];

/// Mapping from scope identifier to language key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypeMap {
    entries: BTreeMap<String, String>,
}

impl FileTypeMap {
    /// Merge an optional user table with the defaults.
    pub fn build(user: Option<&BTreeMap<String, String>>) -> Self {
        let mut entries: BTreeMap<String, String> = match user {
            Some(map) => map.clone(),
            None => TEMPLATE_FILE_TYPES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        for (scope, key) in FIXED_FILE_TYPES {
            if let Some(prev) = entries.insert(scope.to_string(), key.to_string())
                && prev != *key
            {
                debug!(target: "config", scope, user_key = prev.as_str(), key, "file_type_fixed_override");
            }
        }
        Self { entries }
    }

    pub fn get(&self, scope: &str) -> Option<&str> {
        self.entries.get(scope).map(String::as_str)
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.entries.contains_key(scope)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for FileTypeMap {
    fn default() -> Self {
        Self::build(None)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct JsConfig {
    #[serde(default = "JsConfig::default_console_func")]
    pub console_func: Vec<String>,
    #[serde(default)]
    pub single_quotes: bool,
    #[serde(default = "JsConfig::default_semicolon")]
    pub semicolon: bool,
}

impl Default for JsConfig {
    fn default() -> Self {
        Self {
            console_func: Self::default_console_func(),
            single_quotes: false,
            semicolon: Self::default_semicolon(),
        }
    }
}

impl JsConfig {
    fn default_console_func() -> Vec<String> {
        vec!["console".to_string(), "log".to_string()]
    }
    const fn default_semicolon() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PyConfig {
    #[serde(default = "PyConfig::default_version")] // Python 3 `print()` call
    pub version: u8,
    #[serde(default)]
    pub single_quotes: bool,
}

impl Default for PyConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            single_quotes: false,
        }
    }
}

impl PyConfig {
    const fn default_version() -> u8 {
        3
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PhpFunc {
    #[default]
    PrintR,
    VarDump,
    ErrorLog,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PhpConfig {
    #[serde(default)]
    pub php_func: PhpFunc,
    #[serde(default)]
    pub pre_tag: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    #[serde(default = "FormatConfig::default_indent_size")]
    pub indent_size: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_size: Self::default_indent_size(),
        }
    }
}

impl FormatConfig {
    const fn default_indent_size() -> usize {
        4
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub file_type_map: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub js: JsConfig,
    #[serde(default)]
    pub py: PyConfig,
    #[serde(default)]
    pub php: PhpConfig,
    #[serde(default)]
    pub format: FormatConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub path: Option<PathBuf>,
    pub file: ConfigFile, // parsed (or default) data
}

impl Config {
    /// Effective scope table for this configuration.
    pub fn file_type_map(&self) -> FileTypeMap {
        FileTypeMap::build(self.file.file_type_map.as_ref())
    }

    /// Parse configuration from an in-memory TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file = toml::from_str::<ConfigFile>(content).context("invalid consolewrap config")?;
        Ok(Self {
            raw: Some(content.to_string()),
            path: None,
            file,
        })
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("consolewrap").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match Config::from_toml(&content) {
        Ok(mut cfg) => {
            info!(
                target: "config",
                path = %path.display(),
                user_file_types = cfg.file.file_type_map.as_ref().map(|m| m.len()),
                "config_loaded"
            );
            cfg.path = Some(path);
            Ok(cfg)
        }
        Err(e) => {
            // Parse errors fall back to defaults.
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}
