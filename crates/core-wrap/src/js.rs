//! JavaScript family wrapper (`console.log('x', x);`).

use crate::wrap::{Wrap, quoted};
use crate::{Language, WrapError};
use core_config::{FormatConfig, JsConfig};
use regex::Regex;

const CONSOLE_METHODS: &str = "log|info|warn|error|debug|table|dir|trace";

#[derive(Debug, Clone)]
pub struct JsWrapper {
    func: String,
    quote: char,
    semicolon: bool,
    format: FormatConfig,
    pattern: Regex,
}

impl JsWrapper {
    pub fn new(cfg: &JsConfig, format: &FormatConfig) -> Result<Self, WrapError> {
        let func = if cfg.console_func.is_empty() {
            "console.log".to_string()
        } else {
            cfg.console_func.join(".")
        };
        let pattern = Regex::new(&format!(
            r"^\s*(?://\s*)?(?:console\.(?:{CONSOLE_METHODS})|{})\s*\(.*\)\s*;?\s*$",
            regex::escape(&func)
        ))?;
        Ok(Self {
            func,
            quote: if cfg.single_quotes { '\'' } else { '"' },
            semicolon: cfg.semicolon,
            format: format.clone(),
            pattern,
        })
    }
}

impl Wrap for JsWrapper {
    fn language(&self) -> Language {
        Language::Js
    }

    fn format(&self) -> &FormatConfig {
        &self.format
    }

    fn statement(&self, label: &str, target: &str) -> String {
        let semi = if self.semicolon { ";" } else { "" };
        format!("{}({}, {target}){semi}", self.func, quoted(label, self.quote))
    }

    fn log_pattern(&self) -> &Regex {
        &self.pattern
    }

    fn comment_token(&self) -> &'static str {
        "//"
    }

    fn connectors(&self) -> &'static [&'static str] {
        &["."]
    }

    fn opens_block(&self, line: &str) -> bool {
        line.ends_with(['{', '(', '['])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapper(cfg: JsConfig) -> JsWrapper {
        JsWrapper::new(&cfg, &FormatConfig::default()).unwrap()
    }

    #[test]
    fn default_statement_shape() {
        let js = wrapper(JsConfig::default());
        assert_eq!(js.statement("user.name", "user.name"), r#"console.log("user.name", user.name);"#);
    }

    #[test]
    fn configured_func_quotes_and_semicolon() {
        let js = wrapper(JsConfig {
            console_func: vec!["logger".into(), "debug".into()],
            single_quotes: true,
            semicolon: false,
        });
        assert_eq!(js.statement("a", "a"), "logger.debug('a', a)");
        assert!(js.log_pattern().is_match("  logger.debug('a', a)"));
    }

    #[test]
    fn pattern_recognizes_console_family_and_comments() {
        let js = wrapper(JsConfig::default());
        assert!(js.log_pattern().is_match("console.log('x', x);"));
        assert!(js.log_pattern().is_match("\t// console.warn(err)"));
        assert!(js.log_pattern().is_match("console.table(rows)"));
        assert!(!js.log_pattern().is_match("const log = console.log;"));
        assert!(!js.log_pattern().is_match("foo(); console.log(x);"));
    }

    #[test]
    fn empty_console_func_falls_back() {
        let js = wrapper(JsConfig {
            console_func: Vec::new(),
            ..JsConfig::default()
        });
        assert_eq!(js.statement("b", "b"), r#"console.log("b", b);"#);
    }
}
