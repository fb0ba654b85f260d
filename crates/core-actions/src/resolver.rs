//! Scope name -> language key resolution.
//!
//! The scope name's tokens are intersected with the `FileTypeMap` keys. When
//! several tokens match, the innermost one (last in the scope stack, i.e. the
//! most specific context) decides the language. Embedded PHP and plain JS
//! selectors then override the table: PHP first, JS second, so a position
//! matching both resolves to `php`.

use core_config::FileTypeMap;
use core_view::View;

/// Selector identifying PHP code embedded in a template.
pub const PHP_SELECTOR: &str = "source.php";
/// Selector identifying plain (possibly embedded) JavaScript.
pub const JS_SELECTOR: &str = "source.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Language key to look up in the wrapper registry.
    Language(String),
    /// No scope token is in the table; `scope` is the primary (first) token.
    Unsupported { scope: String },
}

/// Scope tokens present in `map`, in scope order (outermost first), without duplicates.
pub fn intersect<'s>(scope_name: &'s str, map: &FileTypeMap) -> Vec<&'s str> {
    let mut out: Vec<&str> = Vec::new();
    for token in scope_name.split_whitespace() {
        if map.contains(token) && !out.contains(&token) {
            out.push(token);
        }
    }
    out
}

/// Table lookup alone: the innermost matching token's language.
pub fn lookup<'m>(scope_name: &str, map: &'m FileTypeMap) -> Option<&'m str> {
    intersect(scope_name, map)
        .last()
        .and_then(|token| map.get(token))
}

/// First token of a scope name, reported when nothing matches.
pub fn primary_scope(scope_name: &str) -> &str {
    scope_name.split_whitespace().next().unwrap_or("")
}

pub fn unsupported_message(scope: &str) -> String {
    format!("Console Wrap: Not work in this file type ( {scope} )")
}

/// Resolve the language for the position `offset` of `view`.
pub fn resolve(view: &dyn View, offset: usize, map: &FileTypeMap) -> Resolution {
    let scope_name = view.scope_name(offset);
    let Some(key) = lookup(&scope_name, map) else {
        return Resolution::Unsupported {
            scope: primary_scope(&scope_name).to_string(),
        };
    };
    let key = if view.match_selector(offset, PHP_SELECTOR) {
        "php"
    } else if view.match_selector(offset, JS_SELECTOR) {
        "js"
    } else {
        key
    };
    tracing::trace!(target: "actions.resolve", offset, scope = scope_name.as_str(), key, "resolved");
    Resolution::Language(key.to_string())
}
