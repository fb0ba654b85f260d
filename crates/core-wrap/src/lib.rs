//! Per-language console wrappers and the registry the dispatcher reads from.
//!
//! `Wrapper` is a closed tagged union over the supported languages; every
//! variant implements the `Wrap` capability trait and `Wrapper` forwards to
//! it with an explicit match. Named actions are the closed `ActionKind` set,
//! parsed from the snake_case names hosts bind commands to.
//!
//! `WrapperRegistry` is built once from configuration and never mutated; it
//! is passed to the dispatcher rather than living in a global.

use core_config::Config;
use core_text::Region;
use core_view::{Edit, View};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

mod error;
pub mod js;
pub mod php;
pub mod python;
mod wrap;

pub use error::{ActionParseError, WrapError};
pub use js::JsWrapper;
pub use php::PhpWrapper;
pub use python::PyWrapper;
pub use wrap::Wrap;

/// Language keys used as `FileTypeMap` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Js,
    Python,
    Php,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Js, Language::Python, Language::Php];

    pub fn key(self) -> &'static str {
        match self {
            Language::Js => "js",
            Language::Python => "py",
            Language::Php => "php",
        }
    }
}

/// Named wrapper actions other than `create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    RemoveLogs,
    CommentLogs,
    ShowQuickNav,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::RemoveLogs => "remove_logs",
            ActionKind::CommentLogs => "comment_logs",
            ActionKind::ShowQuickNav => "show_quick_nav",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "remove_logs" => Ok(ActionKind::RemoveLogs),
            "comment_logs" => Ok(ActionKind::CommentLogs),
            "show_quick_nav" => Ok(ActionKind::ShowQuickNav),
            other => Err(ActionParseError(other.to_string())),
        }
    }
}

/// Operation requested of a wrapper for one cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create { insert_before: bool },
    Action(ActionKind),
}

#[derive(Debug, Clone)]
pub enum Wrapper {
    Js(JsWrapper),
    Python(PyWrapper),
    Php(PhpWrapper),
}

impl Wrapper {
    pub fn language(&self) -> Language {
        match self {
            Wrapper::Js(w) => w.language(),
            Wrapper::Python(w) => w.language(),
            Wrapper::Php(w) => w.language(),
        }
    }

    pub fn create(
        &self,
        view: &mut dyn View,
        edit: &mut Edit,
        cursor: Region,
        insert_before: bool,
    ) -> Result<Option<usize>, WrapError> {
        match self {
            Wrapper::Js(w) => w.create(view, edit, cursor, insert_before),
            Wrapper::Python(w) => w.create(view, edit, cursor, insert_before),
            Wrapper::Php(w) => w.create(view, edit, cursor, insert_before),
        }
    }

    pub fn action(
        &self,
        kind: ActionKind,
        view: &mut dyn View,
        edit: &mut Edit,
        cursor: Region,
    ) -> Result<Option<usize>, WrapError> {
        match self {
            Wrapper::Js(w) => w.action(kind, view, edit, cursor),
            Wrapper::Python(w) => w.action(kind, view, edit, cursor),
            Wrapper::Php(w) => w.action(kind, view, edit, cursor),
        }
    }

    /// Run `op` for a single cursor.
    pub fn run(
        &self,
        op: Operation,
        view: &mut dyn View,
        edit: &mut Edit,
        cursor: Region,
    ) -> Result<Option<usize>, WrapError> {
        match op {
            Operation::Create { insert_before } => self.create(view, edit, cursor, insert_before),
            Operation::Action(kind) => self.action(kind, view, edit, cursor),
        }
    }
}

/// Immutable language key -> wrapper table.
#[derive(Debug, Clone, Default)]
pub struct WrapperRegistry {
    wrappers: BTreeMap<String, Wrapper>,
}

impl WrapperRegistry {
    /// Registry with the JS, Python and PHP wrappers configured from `config`.
    pub fn from_config(config: &Config) -> Result<Self, WrapError> {
        let file = &config.file;
        let mut registry = Self::default();
        registry = registry
            .with(Language::Js.key(), Wrapper::Js(JsWrapper::new(&file.js, &file.format)?))
            .with(
                Language::Python.key(),
                Wrapper::Python(PyWrapper::new(&file.py, &file.format)?),
            )
            .with(Language::Php.key(), Wrapper::Php(PhpWrapper::new(&file.php, &file.format)?));
        tracing::debug!(target: "wrap", registered = registry.len(), "registry_built");
        Ok(registry)
    }

    /// Builder-style registration, used at construction time only.
    pub fn with(mut self, key: impl Into<String>, wrapper: Wrapper) -> Self {
        self.wrappers.insert(key.into(), wrapper);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Wrapper> {
        self.wrappers.get(key)
    }

    pub fn len(&self) -> usize {
        self.wrappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wrappers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_kind_parses_snake_case_names() {
        assert_eq!("remove_logs".parse::<ActionKind>(), Ok(ActionKind::RemoveLogs));
        assert_eq!(" comment_logs ".parse::<ActionKind>(), Ok(ActionKind::CommentLogs));
        assert_eq!("show_quick_nav".parse::<ActionKind>(), Ok(ActionKind::ShowQuickNav));
        let err = "create".parse::<ActionKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown console action `create`");
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for kind in [ActionKind::RemoveLogs, ActionKind::CommentLogs, ActionKind::ShowQuickNav] {
            assert_eq!(kind.to_string().parse::<ActionKind>(), Ok(kind));
        }
    }

    #[test]
    fn registry_from_default_config_has_every_language() {
        let registry = WrapperRegistry::from_config(&Config::default()).unwrap();
        assert_eq!(registry.len(), Language::ALL.len());
        for lang in Language::ALL {
            assert_eq!(registry.get(lang.key()).map(Wrapper::language), Some(lang));
        }
        assert!(registry.get("rb").is_none());
    }
}
