//! Scope selector matching.
//!
//! Supported grammar (the subset editor commands actually use):
//! * `,` separates alternatives; any matching alternative wins.
//! * Within an alternative, space separated atoms must match scope tokens in
//!   order (descendant relation), not necessarily adjacent.
//! * An atom matches a token equal to it or having it as a dotted prefix, so
//!   `source.js` matches `source.js.embedded.html` but not `source.json`.

/// True when `atom` is `token` or a dotted prefix of it.
pub fn atom_matches(atom: &str, token: &str) -> bool {
    match token.strip_prefix(atom) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

fn alternative_matches(tokens: &[&str], alternative: &str) -> bool {
    let mut remaining = tokens.iter();
    let mut any = false;
    for atom in alternative.split_whitespace() {
        any = true;
        if !remaining.any(|token| atom_matches(atom, token)) {
            return false;
        }
    }
    any
}

/// Match a selector against a space separated scope name.
pub fn matches(scope_name: &str, selector: &str) -> bool {
    let tokens: Vec<&str> = scope_name.split_whitespace().collect();
    selector
        .split(',')
        .any(|alternative| alternative_matches(&tokens, alternative))
}
