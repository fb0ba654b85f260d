#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_config::Config;
use core_text::Region;
use core_view::{BufferView, View};
use core_wrap::{Language, Wrapper, WrapperRegistry};

/// Build a view from `marked`, where every `|` is a caret and is removed from the text.
pub fn view_with_carets(name: &str, marked: &str) -> BufferView {
    let mut text = String::new();
    let mut carets = Vec::new();
    for c in marked.chars() {
        if c == '|' {
            carets.push(text.chars().count());
        } else {
            text.push(c);
        }
    }
    let mut view = BufferView::new(name, &text).expect("view");
    view.set_carets(&carets);
    view
}

pub fn wrapper(config: &Config, lang: Language) -> Wrapper {
    WrapperRegistry::from_config(config)
        .expect("registry")
        .get(lang.key())
        .cloned()
        .expect("wrapper registered")
}

pub fn first_cursor(view: &BufferView) -> Region {
    view.selection(0).expect("at least one caret")
}
