//! Language-independent wrapper operations.
//!
//! A language only describes itself (statement shape, log-line pattern,
//! comment token, member connectors, block openers); `create`,
//! `remove_logs`, `comment_logs` and `show_quick_nav` are provided on top of
//! that description.

use crate::{ActionKind, Language, WrapError};
use core_config::FormatConfig;
use core_text::{Region, word_at};
use core_view::{Edit, QuickNavItem, View};
use regex::Regex;

/// Capability interface implemented by every language variant.
pub trait Wrap {
    fn language(&self) -> Language;
    fn format(&self) -> &FormatConfig;
    /// Build the debug statement logging `target` under `label`.
    fn statement(&self, label: &str, target: &str) -> String;
    /// Matches a whole line that is a (possibly commented) log statement.
    fn log_pattern(&self) -> &Regex;
    /// Line comment token, without trailing space.
    fn comment_token(&self) -> &'static str;
    /// Tokens joining member accesses into one expression.
    fn connectors(&self) -> &'static [&'static str];
    fn sigil(&self) -> Option<char> {
        None
    }
    /// Whether a statement inserted after `line` belongs one level deeper.
    fn opens_block(&self, line: &str) -> bool;

    fn create(
        &self,
        view: &mut dyn View,
        edit: &mut Edit,
        cursor: Region,
        insert_before: bool,
    ) -> Result<Option<usize>, WrapError> {
        check_bounds(view, cursor)?;
        let Some(target) = self.target_text(view, cursor) else {
            tracing::debug!(target: "wrap", language = self.language().key(), begin = cursor.begin(), "create_no_target");
            return Ok(None);
        };
        let label = target.split_whitespace().collect::<Vec<_>>().join(" ");
        let statement = self.statement(&label, &target);

        let end = if insert_before {
            let line = view.line(cursor.begin());
            let line_text = view.substr(line);
            let indent = leading_whitespace(&line_text);
            let newline = line_ending(view, line);
            let text = format!("{indent}{statement}{newline}");
            view.insert(edit, line.begin(), &text);
            line.begin() + indent.chars().count() + statement.chars().count()
        } else {
            let line = view.line(cursor.end());
            let line_text = view.substr(line);
            let mut indent = leading_whitespace(&line_text).to_string();
            if self.opens_block(line_text.trim_end()) {
                indent.push_str(&indent_unit(&indent, self.format()));
            }
            let newline = line_ending(view, line);
            let text = format!("{newline}{indent}{statement}");
            view.insert(edit, line.end(), &text);
            line.end() + text.chars().count()
        };
        tracing::debug!(
            target: "wrap",
            language = self.language().key(),
            insert_before,
            end,
            "create"
        );
        Ok(Some(end))
    }

    fn remove_logs(
        &self,
        view: &mut dyn View,
        edit: &mut Edit,
        cursor: Region,
    ) -> Result<Option<usize>, WrapError> {
        check_bounds(view, cursor)?;
        let lines = self.log_lines(view, cursor);
        // Bottom-up so earlier line regions stay valid.
        for line in lines.iter().rev() {
            let mut doomed = view.full_line(line.begin());
            if doomed.end() == line.end() && doomed.begin() > 0 {
                // Last line without newline: take the preceding line ending instead.
                let prev = view.line(doomed.begin() - 1);
                doomed = Region::new(prev.end(), doomed.end());
            }
            view.erase(edit, doomed);
        }
        tracing::debug!(target: "wrap", language = self.language().key(), removed = lines.len(), "remove_logs");
        Ok(None)
    }

    fn comment_logs(
        &self,
        view: &mut dyn View,
        edit: &mut Edit,
        cursor: Region,
    ) -> Result<Option<usize>, WrapError> {
        check_bounds(view, cursor)?;
        let token = self.comment_token();
        let mut commented = 0usize;
        for line in self.log_lines(view, cursor).iter().rev() {
            let text = view.substr(*line);
            let indent = leading_whitespace(&text);
            if text[indent.len()..].starts_with(token) {
                continue;
            }
            view.insert(edit, line.begin() + indent.chars().count(), &format!("{token} "));
            commented += 1;
        }
        tracing::debug!(target: "wrap", language = self.language().key(), commented, "comment_logs");
        Ok(None)
    }

    fn show_quick_nav(
        &self,
        view: &mut dyn View,
        _edit: &mut Edit,
        cursor: Region,
    ) -> Result<Option<usize>, WrapError> {
        check_bounds(view, cursor)?;
        let items: Vec<QuickNavItem> = {
            let reader: &dyn View = &*view;
            self.log_lines(reader, cursor)
                .into_iter()
                .map(|line| {
                    let text = reader.substr(line);
                    let indent = leading_whitespace(&text).chars().count();
                    QuickNavItem {
                        line: line_index(reader, line.begin()),
                        text: text.trim().to_string(),
                        offset: line.begin() + indent,
                    }
                })
                .collect()
        };
        view.show_quick_panel(items);
        Ok(None)
    }

    /// Run a named action.
    fn action(
        &self,
        kind: ActionKind,
        view: &mut dyn View,
        edit: &mut Edit,
        cursor: Region,
    ) -> Result<Option<usize>, WrapError> {
        match kind {
            ActionKind::RemoveLogs => self.remove_logs(view, edit, cursor),
            ActionKind::CommentLogs => self.comment_logs(view, edit, cursor),
            ActionKind::ShowQuickNav => self.show_quick_nav(view, edit, cursor),
        }
    }

    /// Expression to log: the selection, or the member chain under the caret.
    fn target_text(&self, view: &dyn View, cursor: Region) -> Option<String> {
        if !cursor.is_empty() {
            let text = view.substr(cursor).trim().to_string();
            return (!text.is_empty()).then_some(text);
        }
        let line = view.line(cursor.b);
        let text = view.substr(line);
        let (start, end) = word_at(&text, cursor.b - line.begin(), self.connectors(), self.sigil())?;
        Some(view.substr(Region::new(line.begin() + start, line.begin() + end)))
    }

    /// Log statement lines within the cursor, or the whole document for a caret.
    fn log_lines(&self, view: &dyn View, cursor: Region) -> Vec<Region> {
        let scope = if cursor.is_empty() {
            Region::new(0, view.size())
        } else {
            cursor
        };
        view.lines(scope)
            .into_iter()
            .filter(|line| self.log_pattern().is_match(&view.substr(*line)))
            .collect()
    }
}

fn check_bounds(view: &dyn View, cursor: Region) -> Result<(), WrapError> {
    let size = view.size();
    if cursor.end() > size {
        return Err(WrapError::OutOfBounds {
            offset: cursor.end(),
            size,
        });
    }
    Ok(())
}

/// Line terminator used around `line`: its own, else the previous line's, else `\n`.
fn line_ending(view: &dyn View, line: Region) -> String {
    let own = view.substr(Region::new(line.end(), view.full_line(line.begin()).end()));
    if !own.is_empty() || line.begin() == 0 {
        return if own.is_empty() { "\n".to_string() } else { own };
    }
    let prev = view.line(line.begin() - 1);
    let ending = view.substr(Region::new(prev.end(), line.begin()));
    if ending.is_empty() { "\n".to_string() } else { ending }
}

fn line_index(view: &dyn View, offset: usize) -> usize {
    view.substr(Region::new(0, offset))
        .chars()
        .filter(|c| *c == '\n')
        .count()
}

pub(crate) fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

fn indent_unit(current: &str, format: &FormatConfig) -> String {
    if current.contains('\t') {
        "\t".to_string()
    } else {
        " ".repeat(format.indent_size)
    }
}

/// Quote `label` with `quote`, escaping backslashes and the quote char.
pub(crate) fn quoted(label: &str, quote: char) -> String {
    let mut out = String::with_capacity(label.len() + 2);
    out.push(quote);
    for c in label.chars() {
        if c == quote || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(quote);
    out
}
