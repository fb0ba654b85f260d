//! Python wrapper (`print('x', x)`, or the statement form for Python 2).

use crate::wrap::{Wrap, quoted};
use crate::{Language, WrapError};
use core_config::{FormatConfig, PyConfig};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct PyWrapper {
    legacy_print: bool,
    quote: char,
    format: FormatConfig,
    pattern: Regex,
}

impl PyWrapper {
    pub fn new(cfg: &PyConfig, format: &FormatConfig) -> Result<Self, WrapError> {
        Ok(Self {
            legacy_print: cfg.version == 2,
            quote: if cfg.single_quotes { '\'' } else { '"' },
            format: format.clone(),
            pattern: Regex::new(r"^\s*(?:#\s*)?print(?:\s*\(.*\)|\s+[^\s=(:.,\[+\-*/%&|^<>!@].*)\s*$")?,
        })
    }
}

impl Wrap for PyWrapper {
    fn language(&self) -> Language {
        Language::Python
    }

    fn format(&self) -> &FormatConfig {
        &self.format
    }

    fn statement(&self, label: &str, target: &str) -> String {
        let label = quoted(label, self.quote);
        if self.legacy_print {
            format!("print {label}, {target}")
        } else {
            format!("print({label}, {target})")
        }
    }

    fn log_pattern(&self) -> &Regex {
        &self.pattern
    }

    fn comment_token(&self) -> &'static str {
        "#"
    }

    fn connectors(&self) -> &'static [&'static str] {
        &["."]
    }

    fn opens_block(&self, line: &str) -> bool {
        line.ends_with(':')
    }
}
