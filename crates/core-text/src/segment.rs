//! Word extent lookup on a single line.
//!
//! Contract:
//! - Input: a line (no newline), a caret column in chars, and the language's
//!   member connectors (`"."`, `"->"`, `"::"`) plus an optional sigil (`$`).
//! - Output: `[start, end)` char columns of the expression under the caret, or
//!   `None` when the caret touches no word.
//! - Word boundaries follow UAX #29 (`unicode-segmentation`), so `foo_bar` and
//!   `obj.prop` are already single words; connectors only join what the
//!   segmentation split apart.

use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy)]
struct Piece {
    start: usize, // byte offset (inclusive)
    end: usize,   // byte offset (exclusive)
    word: bool,
}

fn is_word(s: &str) -> bool {
    s.chars()
        .next()
        .map(|c| c == '_' || c.is_alphanumeric())
        .unwrap_or(false)
}

fn char_to_byte(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

fn byte_to_char(line: &str, byte: usize) -> usize {
    line[..byte].chars().count()
}

/// Find the word (and connected member chain) touching char column `col`.
pub fn word_at(
    line: &str,
    col: usize,
    connectors: &[&str],
    sigil: Option<char>,
) -> Option<(usize, usize)> {
    let pieces: Vec<Piece> = line
        .split_word_bound_indices()
        .map(|(start, s)| Piece {
            start,
            end: start + s.len(),
            word: is_word(s),
        })
        .collect();
    let caret = char_to_byte(line, col);

    // Prefer the word starting at / spanning the caret, else the one ending at it.
    let hit = pieces
        .iter()
        .position(|p| p.word && p.start <= caret && caret < p.end)
        .or_else(|| pieces.iter().position(|p| p.word && p.end == caret))?;

    let word_ending_at = |byte: usize| pieces.iter().find(|p| p.word && p.end == byte);
    let word_starting_at = |byte: usize| pieces.iter().find(|p| p.word && p.start == byte);

    let mut start = pieces[hit].start;
    let mut end = pieces[hit].end;

    // Walk left across `<word><connector>` pairs.
    'left: loop {
        for c in connectors {
            if line[..start].ends_with(c) {
                if let Some(prev) = word_ending_at(start - c.len()) {
                    start = prev.start;
                    continue 'left;
                }
            }
        }
        break;
    }
    // Walk right across `<connector><word>` pairs.
    'right: loop {
        for c in connectors {
            if line[end..].starts_with(c) {
                if let Some(next) = word_starting_at(end + c.len()) {
                    end = next.end;
                    continue 'right;
                }
            }
        }
        break;
    }
    if let Some(s) = sigil {
        if line[..start].ends_with(s) {
            start -= s.len_utf8();
        }
    }
    Some((byte_to_char(line, start), byte_to_char(line, end)))
}
