//! Dispatcher applying an `Operation` to every cursor of a view.
//!
//! Cursors are visited by index so each one reflects the edits made for the
//! cursors before it. Partial failure is expected: an unsupported scope emits
//! a status message and moves on, a language without a registered wrapper is
//! skipped silently. A wrapper error aborts the loop and is returned.

use crate::resolver::{self, Resolution};
use crate::{Context, DispatchError};
use core_text::Region;
use core_view::{Edit, View};
use core_wrap::Operation;

/// Outcome of dispatching one operation across the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// Smallest end offset any wrapper returned; `None` stands for "no offset"
    /// (positive infinity in host terms).
    pub last_pos: Option<usize>,
    /// Cursors visited (including a synthesized one).
    pub cursors: usize,
    /// Wrapper invocations performed.
    pub invoked: usize,
    /// Cursors whose scope had no table entry (one status message each).
    pub unsupported: usize,
    /// Cursors resolved to a language without a registered wrapper.
    pub unregistered: usize,
}

/// Give an empty selection a single caret at offset 0.
pub fn ensure_cursor(view: &mut dyn View) {
    if view.selection_len() == 0 {
        tracing::trace!(target: "actions.dispatch", "synthetic_cursor");
        view.add_selection(Region::point(0));
    }
}

/// Run `op` for every cursor of `view` inside the edit transaction `edit`.
pub fn dispatch(
    op: Operation,
    view: &mut dyn View,
    edit: &mut Edit,
    ctx: &Context,
) -> Result<DispatchResult, DispatchError> {
    ensure_cursor(view);
    let mut result = DispatchResult::default();

    let mut idx = 0;
    while let Some(cursor) = view.selection(idx) {
        idx += 1;
        result.cursors += 1;

        let key = match resolver::resolve(&*view, cursor.begin(), ctx.file_types()) {
            Resolution::Language(key) => key,
            Resolution::Unsupported { scope } => {
                result.unsupported += 1;
                tracing::debug!(target: "actions.dispatch", cursor = idx - 1, scope = scope.as_str(), "unsupported_scope");
                view.status_message(&resolver::unsupported_message(&scope));
                continue;
            }
        };

        let Some(wrapper) = ctx.registry().get(&key) else {
            result.unregistered += 1;
            tracing::debug!(target: "actions.dispatch", cursor = idx - 1, key = key.as_str(), "no_wrapper");
            continue;
        };

        let end = wrapper
            .run(op, view, edit, cursor)
            .map_err(|source| DispatchError::Wrapper {
                index: idx - 1,
                language: key.clone(),
                source,
            })?;
        result.invoked += 1;
        if let Some(end) = end {
            result.last_pos = Some(result.last_pos.map_or(end, |prev| prev.min(end)));
        }
    }

    tracing::debug!(
        target: "actions.dispatch",
        ?op,
        cursors = result.cursors,
        invoked = result.invoked,
        unsupported = result.unsupported,
        unregistered = result.unregistered,
        last_pos = result.last_pos,
        "dispatch"
    );
    Ok(result)
}

/// True when any cursor's scope has a table entry. Wrapper registration and
/// selector overrides are not consulted.
pub fn supported_file(view: &mut dyn View, ctx: &Context) -> bool {
    ensure_cursor(view);
    (0..view.selection_len())
        .filter_map(|idx| view.selection(idx))
        .any(|cursor| {
            !resolver::intersect(&view.scope_name(cursor.begin()), ctx.file_types()).is_empty()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Config;
    use core_view::BufferView;
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    #[test]
    fn ensure_cursor_only_fills_empty_selection() {
        let mut view = BufferView::new("a.js", "abc").unwrap();
        ensure_cursor(&mut view);
        ensure_cursor(&mut view);
        assert_eq!(view.selections(), &[Region::point(0)]);
    }

    #[test]
    fn dispatch_logs_unsupported_scope_under_dispatch_target() {
        let ctx = Context::from_config(&Config::default()).unwrap();
        let mut view = BufferView::new("notes.txt", "hello").unwrap();
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(BufferWriter {
                inner: buffer.clone(),
            })
            .finish();

        let result = with_default(subscriber, || {
            let mut edit = view.begin_edit();
            let out = dispatch(Operation::Create { insert_before: false }, &mut view, &mut edit, &ctx);
            view.end_edit(edit);
            out.unwrap()
        });

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("DEBUG actions.dispatch:"));
        assert!(log_output.contains("unsupported_scope"));
        assert!(log_output.contains("scope=\"text.plain\"") || log_output.contains("scope=text.plain"));
        assert_eq!(result.unsupported, 1);
        assert_eq!(
            view.status_messages(),
            &["Console Wrap: Not work in this file type ( text.plain )".to_string()]
        );
    }
}
