//! PHP wrapper (`print_r($x);` and friends).

use crate::wrap::Wrap;
use crate::{Language, WrapError};
use core_config::{FormatConfig, PhpConfig, PhpFunc};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct PhpWrapper {
    func: PhpFunc,
    pre_tag: bool,
    format: FormatConfig,
    pattern: Regex,
}

impl PhpWrapper {
    pub fn new(cfg: &PhpConfig, format: &FormatConfig) -> Result<Self, WrapError> {
        let pattern = Regex::new(
            r#"^\s*(?://\s*|#\s*)?(?:echo\s+['"]<pre>['"];\s*)?(?:print_r|var_dump|var_export|error_log)\s*\(.*\)\s*;(?:\s*echo\s+['"]</pre>['"];)?\s*$"#,
        )?;
        Ok(Self {
            func: cfg.php_func,
            pre_tag: cfg.pre_tag,
            format: format.clone(),
            pattern,
        })
    }
}

impl Wrap for PhpWrapper {
    fn language(&self) -> Language {
        Language::Php
    }

    fn format(&self) -> &FormatConfig {
        &self.format
    }

    // The label is unused: PHP dumps carry no caption.
    fn statement(&self, _label: &str, target: &str) -> String {
        let call = match self.func {
            PhpFunc::PrintR => format!("print_r({target});"),
            PhpFunc::VarDump => format!("var_dump({target});"),
            PhpFunc::ErrorLog => format!("error_log(print_r({target}, true));"),
        };
        if self.pre_tag {
            format!("echo '<pre>'; {call} echo '</pre>';")
        } else {
            call
        }
    }

    fn log_pattern(&self) -> &Regex {
        &self.pattern
    }

    fn comment_token(&self) -> &'static str {
        "//"
    }

    fn connectors(&self) -> &'static [&'static str] {
        &["->", "::"]
    }

    fn sigil(&self) -> Option<char> {
        Some('$')
    }

    fn opens_block(&self, line: &str) -> bool {
        line.ends_with(['{', '(', '['])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapper(php_func: PhpFunc, pre_tag: bool) -> PhpWrapper {
        PhpWrapper::new(&PhpConfig { php_func, pre_tag }, &FormatConfig::default()).unwrap()
    }

    #[test]
    fn statement_per_func() {
        assert_eq!(wrapper(PhpFunc::PrintR, false).statement("$a", "$a"), "print_r($a);");
        assert_eq!(wrapper(PhpFunc::VarDump, false).statement("$a", "$a"), "var_dump($a);");
        assert_eq!(
            wrapper(PhpFunc::ErrorLog, false).statement("$a", "$a"),
            "error_log(print_r($a, true));"
        );
        assert_eq!(
            wrapper(PhpFunc::PrintR, true).statement("$a", "$a"),
            "echo '<pre>'; print_r($a); echo '</pre>';"
        );
    }

    #[test]
    fn pattern_matches_generated_statements() {
        let php = wrapper(PhpFunc::PrintR, true);
        for func in [PhpFunc::PrintR, PhpFunc::VarDump, PhpFunc::ErrorLog] {
            for pre in [false, true] {
                let line = format!("    {}", wrapper(func, pre).statement("$x", "$x->y"));
                assert!(php.log_pattern().is_match(&line), "{line}");
            }
        }
        assert!(php.log_pattern().is_match("// var_dump($x);"));
        assert!(!php.log_pattern().is_match("$dump = var_dump($x) ?: 1"));
    }
}
