//! Scope model for `BufferView`.
//!
//! A lightweight stand-in for a real syntax engine: the base scope comes from
//! the file name, and two kinds of embedded regions are detected with regular
//! expressions over the whole document:
//! * `<script>` bodies in HTML-like documents -> `source.js.embedded.html`
//! * `<?php ... ?>` blocks in PHP documents -> `meta.embedded.block.php source.php`
//!
//! Regions are recomputed after every edit; documents handled here are small
//! enough that a full rescan is cheaper than incremental bookkeeping.

use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<script\b[^>]*>").expect("valid script regex"));
static SCRIPT_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</script\s*>").expect("valid script close regex"));
static PHP_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\?(?:php\b|=)").expect("valid php open regex"));

pub const JS_EMBEDDED_SCOPE: &str = "source.js.embedded.html";
pub const PHP_EMBEDDED_SCOPE: &str = "meta.embedded.block.php source.php";

/// Syntax guessed from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    JavaScript,
    TypeScript,
    Tsx,
    Coffee,
    Python,
    Php,
    Blade,
    Html,
    Vue,
    Twig,
    Ruby,
    Plain,
}

impl Syntax {
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".blade.php") {
            return Syntax::Blade;
        }
        let ext = lower.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        match ext {
            "js" | "mjs" | "cjs" | "jsx" => Syntax::JavaScript,
            "ts" | "mts" | "cts" => Syntax::TypeScript,
            "tsx" => Syntax::Tsx,
            "coffee" => Syntax::Coffee,
            "py" | "pyw" => Syntax::Python,
            "php" | "phtml" => Syntax::Php,
            "html" | "htm" => Syntax::Html,
            "vue" => Syntax::Vue,
            "twig" => Syntax::Twig,
            "rb" => Syntax::Ruby,
            _ => Syntax::Plain,
        }
    }

    /// Base scope stack for the whole document.
    pub fn base_scope(self) -> &'static str {
        match self {
            Syntax::JavaScript => "source.js",
            Syntax::TypeScript => "source.ts",
            Syntax::Tsx => "source.tsx",
            Syntax::Coffee => "source.coffee",
            Syntax::Python => "source.python",
            Syntax::Php => "embedding.php text.html.basic",
            Syntax::Blade => "text.html.blade",
            Syntax::Html => "text.html.basic",
            Syntax::Vue => "text.html.vue",
            Syntax::Twig => "text.html.twig",
            Syntax::Ruby => "source.ruby",
            Syntax::Plain => "text.plain",
        }
    }

    pub fn is_html_like(self) -> bool {
        matches!(
            self,
            Syntax::Php | Syntax::Blade | Syntax::Html | Syntax::Vue | Syntax::Twig
        )
    }

    pub fn embeds_php(self) -> bool {
        matches!(self, Syntax::Php | Syntax::Blade)
    }
}

/// An embedded-language span in char offsets. `end == None` means the block
/// is unterminated and runs to the end of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedRegion {
    pub start: usize,
    pub end: Option<usize>,
    pub scope: &'static str,
}

impl EmbeddedRegion {
    pub fn covers(&self, offset: usize) -> bool {
        offset >= self.start && self.end.is_none_or(|end| offset < end)
    }
}

fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

/// Detect embedded regions for `syntax` in `text`.
pub fn embedded_regions(syntax: Syntax, text: &str) -> Vec<EmbeddedRegion> {
    let mut out = Vec::new();
    if syntax.embeds_php() {
        let mut from = 0;
        while let Some(open) = PHP_OPEN.find_at(text, from) {
            let start = char_offset(text, open.start());
            match text[open.end()..].find("?>") {
                Some(rel) => {
                    let close = open.end() + rel + 2;
                    out.push(EmbeddedRegion {
                        start,
                        end: Some(char_offset(text, close)),
                        scope: PHP_EMBEDDED_SCOPE,
                    });
                    from = close;
                }
                None => {
                    out.push(EmbeddedRegion {
                        start,
                        end: None,
                        scope: PHP_EMBEDDED_SCOPE,
                    });
                    break;
                }
            }
        }
    }
    if syntax.is_html_like() {
        let mut from = 0;
        while let Some(open) = SCRIPT_OPEN.find_at(text, from) {
            let start = char_offset(text, open.end());
            match SCRIPT_CLOSE.find_at(text, open.end()) {
                Some(close) => {
                    out.push(EmbeddedRegion {
                        start,
                        end: Some(char_offset(text, close.start())),
                        scope: JS_EMBEDDED_SCOPE,
                    });
                    from = close.end();
                }
                None => {
                    out.push(EmbeddedRegion {
                        start,
                        end: None,
                        scope: JS_EMBEDDED_SCOPE,
                    });
                    break;
                }
            }
        }
    }
    out.sort_by_key(|r| r.start);
    out
}

/// Full scope name at `offset`: base scope followed by every covering region.
pub fn scope_at(syntax: Syntax, regions: &[EmbeddedRegion], offset: usize) -> String {
    let mut name = syntax.base_scope().to_string();
    for region in regions.iter().filter(|r| r.covers(offset)) {
        name.push(' ');
        name.push_str(region.scope);
    }
    name
}
