#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::Context;
use core_config::Config;
use core_text::Region;
use core_view::{BufferView, Edit, QuickNavItem, View};

pub fn context() -> Context {
    Context::from_config(&Config::default()).expect("default context")
}

pub fn context_from_toml(toml: &str) -> Context {
    Context::from_config(&Config::from_toml(toml).expect("config")).expect("context")
}

/// Build a view from `marked`, where every `|` is a caret and is removed from the text.
pub fn view_with_carets(name: &str, marked: &str) -> BufferView {
    let (text, carets) = split_carets(marked);
    let mut view = BufferView::new(name, &text).expect("view");
    view.set_carets(&carets);
    view
}

pub fn split_carets(marked: &str) -> (String, Vec<usize>) {
    let mut text = String::new();
    let mut carets = Vec::new();
    for c in marked.chars() {
        if c == '|' {
            carets.push(text.chars().count());
        } else {
            text.push(c);
        }
    }
    (text, carets)
}

/// `BufferView` whose scope names are scripted per line instead of derived
/// from the file name. Lines without a script fall back to `default_scope`.
pub struct ScriptedView {
    pub inner: BufferView,
    pub line_scopes: Vec<&'static str>,
    pub default_scope: &'static str,
}

impl ScriptedView {
    pub fn new(marked: &str, line_scopes: Vec<&'static str>) -> Self {
        let (text, carets) = split_carets(marked);
        let mut inner = BufferView::new("scripted.txt", &text).expect("view");
        inner.set_carets(&carets);
        Self {
            inner,
            line_scopes,
            default_scope: "text.plain",
        }
    }

    /// Single-line document whose only scope is `scope`, caret at 0.
    pub fn with_scope(scope: &'static str) -> Self {
        Self::new("|value", vec![scope])
    }
}

impl View for ScriptedView {
    fn name(&self) -> &str {
        self.inner.name()
    }
    fn selection_len(&self) -> usize {
        self.inner.selection_len()
    }
    fn selection(&self, idx: usize) -> Option<Region> {
        self.inner.selection(idx)
    }
    fn add_selection(&mut self, region: Region) {
        self.inner.add_selection(region)
    }
    fn clear_selection(&mut self) {
        self.inner.clear_selection()
    }
    fn scope_name(&self, offset: usize) -> String {
        let line = self
            .inner
            .substr(Region::new(0, offset))
            .chars()
            .filter(|c| *c == '\n')
            .count();
        self.line_scopes
            .get(line)
            .copied()
            .unwrap_or(self.default_scope)
            .to_string()
    }
    fn size(&self) -> usize {
        self.inner.size()
    }
    fn substr(&self, region: Region) -> String {
        self.inner.substr(region)
    }
    fn line(&self, offset: usize) -> Region {
        self.inner.line(offset)
    }
    fn full_line(&self, offset: usize) -> Region {
        self.inner.full_line(offset)
    }
    fn lines(&self, region: Region) -> Vec<Region> {
        self.inner.lines(region)
    }
    fn begin_edit(&mut self) -> Edit {
        self.inner.begin_edit()
    }
    fn end_edit(&mut self, edit: Edit) {
        self.inner.end_edit(edit)
    }
    fn insert(&mut self, edit: &mut Edit, offset: usize, text: &str) -> usize {
        self.inner.insert(edit, offset, text)
    }
    fn erase(&mut self, edit: &mut Edit, region: Region) {
        self.inner.erase(edit, region)
    }
    fn status_message(&mut self, message: &str) {
        self.inner.status_message(message)
    }
    fn show_quick_panel(&mut self, items: Vec<QuickNavItem>) {
        self.inner.show_quick_panel(items)
    }
    fn move_to_eol(&mut self) {
        self.inner.move_to_eol()
    }
}
