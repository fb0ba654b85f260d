//! Host-facing commands.
//!
//! * `ConsoleWrapCommand` inserts a log statement for every cursor, then
//!   parks a single caret at the end of the first inserted statement.
//! * `ConsoleActionCommand` runs a named action and is only enabled where at
//!   least one cursor sits in a mapped scope.

use crate::dispatcher::{self, DispatchResult};
use crate::{Context, DispatchError};
use core_text::Region;
use core_view::View;
use core_wrap::{ActionKind, Operation};

pub struct ConsoleWrapCommand<'a> {
    ctx: &'a Context,
}

impl<'a> ConsoleWrapCommand<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    pub fn run(&self, view: &mut dyn View, insert_before: bool) -> Result<DispatchResult, DispatchError> {
        let mut edit = view.begin_edit();
        let outcome = dispatcher::dispatch(Operation::Create { insert_before }, view, &mut edit, self.ctx);
        view.end_edit(edit);
        let result = outcome?;

        if let Some(pos) = result.last_pos.filter(|pos| *pos > 0) {
            view.clear_selection();
            view.add_selection(Region::point(pos));
            view.move_to_eol();
            tracing::debug!(target: "actions.command", pos, "wrap_reposition");
        }
        Ok(result)
    }
}

pub struct ConsoleActionCommand<'a> {
    ctx: &'a Context,
}

impl<'a> ConsoleActionCommand<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    pub fn is_enabled(&self, view: &mut dyn View) -> bool {
        dispatcher::supported_file(view, self.ctx)
    }

    /// Run the action named `action` (e.g. `remove_logs`).
    pub fn run(&self, view: &mut dyn View, action: &str) -> Result<DispatchResult, DispatchError> {
        let kind: ActionKind = action.parse()?;
        self.run_kind(view, kind)
    }

    pub fn run_kind(&self, view: &mut dyn View, kind: ActionKind) -> Result<DispatchResult, DispatchError> {
        let mut edit = view.begin_edit();
        let outcome = dispatcher::dispatch(Operation::Action(kind), view, &mut edit, self.ctx);
        view.end_edit(edit);
        outcome
    }
}
