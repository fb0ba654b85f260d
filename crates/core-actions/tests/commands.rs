mod common;

use common::{ScriptedView, context, view_with_carets};
use core_actions::{ConsoleActionCommand, ConsoleWrapCommand, DispatchError};
use core_text::Region;
use core_view::BufferView;
use pretty_assertions::assert_eq;

#[test]
fn wrap_parks_caret_at_end_of_first_statement() {
    let ctx = context();
    let mut view = view_with_carets("a.js", "|a = 1;\n|b = 2;\n");
    let result = ConsoleWrapCommand::new(&ctx).run(&mut view, false).unwrap();
    assert_eq!(result.last_pos, Some(27));
    assert_eq!(view.selections(), &[Region::point(27)]);
}

#[test]
fn wrap_before_moves_to_end_of_inserted_line() {
    let ctx = context();
    let mut view = view_with_carets("a.py", "if ok:\n    x = comp|ute()\n");
    ConsoleWrapCommand::new(&ctx).run(&mut view, true).unwrap();
    assert_eq!(
        view.text(),
        "if ok:\n    print(\"compute\", compute)\n    x = compute()\n"
    );
    let eol = view.text_point(1, usize::MAX);
    assert_eq!(view.selections(), &[Region::point(eol)]);
}

#[test]
fn wrap_without_result_leaves_selection_alone() {
    let ctx = context();
    let mut view = view_with_carets("a.rb", "|x = 1\n");
    let result = ConsoleWrapCommand::new(&ctx).run(&mut view, false).unwrap();
    assert_eq!(result.last_pos, None);
    assert_eq!(view.selections(), &[Region::point(0)]);
    assert!(view.history().is_empty());
}

#[test]
fn action_enabled_only_for_mapped_scopes() {
    let ctx = context();
    let cmd = ConsoleActionCommand::new(&ctx);
    assert!(cmd.is_enabled(&mut view_with_carets("a.js", "|x")));
    assert!(!cmd.is_enabled(&mut view_with_carets("a.rb", "|x")));

    // Any supported cursor enables the command.
    let mut mixed = ScriptedView::new("|a\n|b\n", vec!["source.ruby", "text.html.twig"]);
    assert!(cmd.is_enabled(&mut mixed));

    // Overrides are not consulted: `source.php` alone is not in the table.
    assert!(!cmd.is_enabled(&mut ScriptedView::with_scope("source.php")));
}

#[test]
fn is_enabled_adds_synthetic_cursor() {
    let ctx = context();
    let mut view = BufferView::new("a.py", "x = 1\n").unwrap();
    assert!(ConsoleActionCommand::new(&ctx).is_enabled(&mut view));
    assert_eq!(view.selections(), &[Region::point(0)]);
}

#[test]
fn action_runs_named_operation() {
    let ctx = context();
    let mut view = view_with_carets("a.js", "|x();\nconsole.log(x);\n");
    let result = ConsoleActionCommand::new(&ctx)
        .run(&mut view, "comment_logs")
        .unwrap();
    assert_eq!(result.invoked, 1);
    assert_eq!(view.text(), "x();\n// console.log(x);\n");
    assert_eq!(view.history().len(), 1);
}

#[test]
fn unknown_action_is_rejected_before_any_edit() {
    let ctx = context();
    let mut view = view_with_carets("a.js", "|console.log(x);\n");
    let err = ConsoleActionCommand::new(&ctx)
        .run(&mut view, "explode")
        .unwrap_err();
    assert!(matches!(err, DispatchError::UnknownAction(_)));
    assert_eq!(err.to_string(), "unknown console action `explode`");
    assert_eq!(view.text(), "console.log(x);\n");
}
