//! In-memory `View` backed by `core_text::Buffer`.

use crate::scope::{self, EmbeddedRegion, Syntax};
use crate::{Edit, EditOp, QuickNavItem, View};
use anyhow::Result;
use core_text::{Buffer, Region};

#[derive(Debug, Clone)]
pub struct BufferView {
    buffer: Buffer,
    syntax: Syntax,
    regions: Vec<EmbeddedRegion>,
    selection: Vec<Region>,
    next_edit_id: u64,
    history: Vec<Edit>,
    status_messages: Vec<String>,
    quick_panel: Vec<QuickNavItem>,
}

impl BufferView {
    /// Build a view whose syntax is guessed from `name`.
    pub fn new(name: impl Into<String>, content: &str) -> Result<Self> {
        let name = name.into();
        let syntax = Syntax::from_file_name(&name);
        Self::with_syntax(name, content, syntax)
    }

    pub fn with_syntax(name: impl Into<String>, content: &str, syntax: Syntax) -> Result<Self> {
        let buffer = Buffer::from_str(name, content)?;
        let regions = scope::embedded_regions(syntax, content);
        tracing::debug!(
            target: "view",
            name = buffer.name.as_str(),
            ?syntax,
            embedded = regions.len(),
            "view_open"
        );
        Ok(Self {
            buffer,
            syntax,
            regions,
            selection: Vec::new(),
            next_edit_id: 1,
            history: Vec::new(),
            status_messages: Vec::new(),
            quick_panel: Vec::new(),
        })
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn selections(&self) -> &[Region] {
        &self.selection
    }

    /// Replace the selection with carets at `offsets`.
    pub fn set_carets(&mut self, offsets: &[usize]) {
        self.selection = offsets.iter().copied().map(Region::point).collect();
    }

    /// Every status message shown so far, oldest first.
    pub fn status_messages(&self) -> &[String] {
        &self.status_messages
    }

    /// Items of the most recent quick panel.
    pub fn quick_panel(&self) -> &[QuickNavItem] {
        &self.quick_panel
    }

    /// Committed edit transactions, oldest first.
    pub fn history(&self) -> &[Edit] {
        &self.history
    }

    /// Convert a zero-based (line, column) pair to a char offset (column clamped).
    pub fn text_point(&self, line: usize, col: usize) -> usize {
        let start = self.buffer.line_start(line);
        let region = self.buffer.line_region(start);
        start + col.min(region.len())
    }

    fn shift_after_insert(&mut self, at: usize, len: usize) {
        let shift = |x: &mut usize| {
            if *x >= at {
                *x += len;
            }
        };
        for r in &mut self.selection {
            shift(&mut r.a);
            shift(&mut r.b);
        }
    }

    fn shift_after_erase(&mut self, region: Region) {
        let (s, e) = (region.begin(), region.end());
        let shift = |x: &mut usize| {
            if *x >= e {
                *x -= e - s;
            } else if *x > s {
                *x = s;
            }
        };
        for r in &mut self.selection {
            shift(&mut r.a);
            shift(&mut r.b);
        }
    }

    fn rescan(&mut self) {
        self.regions = scope::embedded_regions(self.syntax, &self.buffer.text());
    }
}

impl View for BufferView {
    fn name(&self) -> &str {
        &self.buffer.name
    }

    fn selection_len(&self) -> usize {
        self.selection.len()
    }

    fn selection(&self, idx: usize) -> Option<Region> {
        self.selection.get(idx).copied()
    }

    fn add_selection(&mut self, region: Region) {
        if !self.selection.contains(&region) {
            self.selection.push(region);
        }
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn scope_name(&self, offset: usize) -> String {
        scope::scope_at(self.syntax, &self.regions, offset)
    }

    fn size(&self) -> usize {
        self.buffer.len_chars()
    }

    fn substr(&self, region: Region) -> String {
        self.buffer.substr(region)
    }

    fn line(&self, offset: usize) -> Region {
        self.buffer.line_region(offset)
    }

    fn full_line(&self, offset: usize) -> Region {
        self.buffer.full_line_region(offset)
    }

    fn lines(&self, region: Region) -> Vec<Region> {
        self.buffer.lines_in(region)
    }

    fn begin_edit(&mut self) -> Edit {
        let edit = Edit::new(self.next_edit_id);
        self.next_edit_id += 1;
        tracing::trace!(target: "view.edit", id = edit.id(), "edit_begin");
        edit
    }

    fn end_edit(&mut self, edit: Edit) {
        tracing::trace!(target: "view.edit", id = edit.id(), ops = edit.ops().len(), "edit_end");
        if !edit.is_empty() {
            self.history.push(edit);
        }
    }

    fn insert(&mut self, edit: &mut Edit, offset: usize, text: &str) -> usize {
        let at = offset.min(self.buffer.len_chars());
        let len = self.buffer.insert(at, text);
        self.shift_after_insert(at, len);
        self.rescan();
        tracing::trace!(target: "view.edit", id = edit.id(), offset = at, len, "insert");
        edit.record(EditOp::Insert {
            offset: at,
            text: text.to_string(),
        });
        len
    }

    fn erase(&mut self, edit: &mut Edit, region: Region) {
        let removed = self.buffer.erase(region);
        if removed.is_empty() {
            return;
        }
        let actual = Region::new(region.begin(), region.begin() + removed.chars().count());
        self.shift_after_erase(actual);
        self.rescan();
        tracing::trace!(target: "view.edit", id = edit.id(), begin = actual.begin(), len = actual.len(), "erase");
        edit.record(EditOp::Erase {
            region: actual,
            removed,
        });
    }

    fn status_message(&mut self, message: &str) {
        tracing::info!(target: "view.status", message, "status_message");
        self.status_messages.push(message.to_string());
    }

    fn show_quick_panel(&mut self, items: Vec<QuickNavItem>) {
        tracing::debug!(target: "view", items = items.len(), "quick_panel");
        self.quick_panel = items;
    }

    fn move_to_eol(&mut self) {
        for i in 0..self.selection.len() {
            let eol = self.buffer.line_region(self.selection[i].b).end();
            self.selection[i] = Region::point(eol);
        }
    }
}
