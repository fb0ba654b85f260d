//! Host view abstraction.
//!
//! `View` is the seam between the console-wrap logic and whatever editor hosts
//! it. Everything the dispatcher and the wrappers need from the host goes
//! through this trait: selection enumeration, scope lookup, selector matching,
//! text access, edits, status messages, the quick panel and the
//! move-to-end-of-line command.
//!
//! Edits are grouped by an `Edit` token obtained from `begin_edit` and handed
//! back with `end_edit`. Hosts keep selections up to date across edits (a
//! caret after an insertion point moves with the text), which is why the
//! selection is read by index rather than as a snapshot.
//!
//! `BufferView` is the in-memory host used by the binary and the tests.

use core_text::Region;

mod buffer_view;
pub mod scope;
pub mod selector;

pub use buffer_view::BufferView;
pub use scope::Syntax;

/// A single recorded mutation inside an `Edit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Insert { offset: usize, text: String },
    Erase { region: Region, removed: String },
}

/// Edit transaction token. Every mutation performed through a `View` is
/// recorded on the token it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    id: u64,
    ops: Vec<EditOp>,
}

impl Edit {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ops: Vec::new(),
        }
    }
    pub fn id(&self) -> u64 {
        self.id
    }
    pub fn record(&mut self, op: EditOp) {
        self.ops.push(op);
    }
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// One entry offered in the host's quick panel (log navigation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickNavItem {
    /// Zero-based line index.
    pub line: usize,
    /// Line text with surrounding whitespace trimmed.
    pub text: String,
    /// Char offset of the first non-whitespace char of the line.
    pub offset: usize,
}

/// Host document/view API.
pub trait View {
    /// Human-readable name (file name) for logs.
    fn name(&self) -> &str;

    /// Number of regions in the current selection.
    fn selection_len(&self) -> usize;
    /// Region at `idx`, reflecting every edit made so far.
    fn selection(&self, idx: usize) -> Option<Region>;
    fn add_selection(&mut self, region: Region);
    fn clear_selection(&mut self);

    /// Space separated scope stack at `offset`, outermost first.
    fn scope_name(&self, offset: usize) -> String;
    /// Whether the scope stack at `offset` matches `selector`.
    fn match_selector(&self, offset: usize, selector: &str) -> bool {
        selector::matches(&self.scope_name(offset), selector)
    }

    /// Document length in chars.
    fn size(&self) -> usize;
    fn substr(&self, region: Region) -> String;
    /// Line containing `offset`, newline excluded.
    fn line(&self, offset: usize) -> Region;
    /// Line containing `offset`, newline included.
    fn full_line(&self, offset: usize) -> Region;
    /// Every line touched by `region`.
    fn lines(&self, region: Region) -> Vec<Region>;

    fn begin_edit(&mut self) -> Edit;
    fn end_edit(&mut self, edit: Edit);
    /// Insert `text` at `offset`; returns the number of chars inserted.
    fn insert(&mut self, edit: &mut Edit, offset: usize, text: &str) -> usize;
    fn erase(&mut self, edit: &mut Edit, region: Region);
    fn replace(&mut self, edit: &mut Edit, region: Region, text: &str) {
        let at = region.begin();
        self.erase(edit, region);
        self.insert(edit, at, text);
    }

    /// Transient status bar message.
    fn status_message(&mut self, message: &str);
    fn show_quick_panel(&mut self, items: Vec<QuickNavItem>);
    /// Move every caret to the end of its line.
    fn move_to_eol(&mut self);
}

impl<T: View + ?Sized> View for &mut T {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn selection_len(&self) -> usize {
        (**self).selection_len()
    }
    fn selection(&self, idx: usize) -> Option<Region> {
        (**self).selection(idx)
    }
    fn add_selection(&mut self, region: Region) {
        (**self).add_selection(region)
    }
    fn clear_selection(&mut self) {
        (**self).clear_selection()
    }
    fn scope_name(&self, offset: usize) -> String {
        (**self).scope_name(offset)
    }
    fn match_selector(&self, offset: usize, selector: &str) -> bool {
        (**self).match_selector(offset, selector)
    }
    fn size(&self) -> usize {
        (**self).size()
    }
    fn substr(&self, region: Region) -> String {
        (**self).substr(region)
    }
    fn line(&self, offset: usize) -> Region {
        (**self).line(offset)
    }
    fn full_line(&self, offset: usize) -> Region {
        (**self).full_line(offset)
    }
    fn lines(&self, region: Region) -> Vec<Region> {
        (**self).lines(region)
    }
    fn begin_edit(&mut self) -> Edit {
        (**self).begin_edit()
    }
    fn end_edit(&mut self, edit: Edit) {
        (**self).end_edit(edit)
    }
    fn insert(&mut self, edit: &mut Edit, offset: usize, text: &str) -> usize {
        (**self).insert(edit, offset, text)
    }
    fn erase(&mut self, edit: &mut Edit, region: Region) {
        (**self).erase(edit, region)
    }
    fn replace(&mut self, edit: &mut Edit, region: Region, text: &str) {
        (**self).replace(edit, region, text)
    }
    fn status_message(&mut self, message: &str) {
        (**self).status_message(message)
    }
    fn show_quick_panel(&mut self, items: Vec<QuickNavItem>) {
        (**self).show_quick_panel(items)
    }
    fn move_to_eol(&mut self) {
        (**self).move_to_eol()
    }
}
