//! Position mapper
//!
//! Converts between a flat code-point offset into a `\n`-joined text and a
//! logical `(row, col)` position. Offsets here are **code-point** offsets,
//! counting each `\n` as one unit of separator — never UTF-8 byte offsets.

/// A logical position: `row` indexes lines, `col` indexes code points within
/// `lines[row]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Map a code-point `offset` into `text` to a logical `(row, col)`.
///
/// `offset` is clamped to the end of the text if it runs past the end.
#[must_use]
pub fn offset_to_logical(text: &str, offset: usize) -> Position {
    let lines: Vec<&str> = text.split('\n').collect();
    let last_row = lines.len() - 1;
    let mut remaining = offset;

    for (i, line) in lines.iter().enumerate() {
        let line_len = line.chars().count();
        if i == last_row {
            // No trailing separator to consume; clamp to the end of text.
            return Position::new(i, remaining.min(line_len));
        }
        if remaining <= line_len {
            // This includes landing exactly on the separator after line i:
            // that offset resolves to the end of line i, not the head of
            // line i+1, which is what keeps this function injective (and
            // therefore invertible by `logical_to_offset`) on [0, textLen].
            return Position::new(i, remaining);
        }
        // Consume this line's body plus its trailing separator in one step.
        remaining -= line_len + 1;
    }

    unreachable!("split('\\n') always yields at least one line")
}

/// Map a logical `(row, col)` back to a code-point offset into `text`.
///
/// Rows/cols outside the text are clamped to the nearest valid position.
#[must_use]
pub fn logical_to_offset(text: &str, pos: Position) -> usize {
    let lines: Vec<&str> = text.split('\n').collect();
    let last_row = lines.len().saturating_sub(1);
    let row = pos.row.min(last_row);

    let mut offset = 0;
    for line in lines.iter().take(row) {
        offset += line.chars().count() + 1; // +1 for the separator
    }
    let line_len = lines[row].chars().count();
    offset + pos.col.min(line_len)
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod tests;
