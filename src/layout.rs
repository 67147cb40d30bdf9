//! Visual layouter
//!
//! Wraps logical lines to a fixed viewport width and derives a visual
//! cursor plus bidirectional maps between logical and visual coordinates.
//! Never mutates the buffer; recomputed on demand from
//! `(lines, cursor, viewport.width)` and cached by the controller.

use crate::codepoint::{char_width, cp_slice, visual_width};
use crate::position::Position;

/// One wrapped chunk of a logical line: the code points `[start, start+len)`
/// of that line, assigned to a single visual row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub visual_row: usize,
    pub start_col: usize,
}

/// The fully wrapped view of a buffer against one viewport width.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisualLayout {
    /// Wrapped visual lines, in display order. Always non-empty.
    pub visual_lines: Vec<String>,
    /// Visual position of the logical cursor.
    pub visual_cursor: Position,
    /// For each logical row, the ordered chunks that make it up.
    pub logical_to_visual: Vec<Vec<Chunk>>,
    /// For each visual row, which logical row/column it starts at.
    pub visual_to_logical: Vec<(usize, usize)>,
}

/// Compute the wrapped layout of `lines` for a cursor at `cursor` against a
/// viewport of `width` character cells. `width` is clamped to at least 1.
#[must_use]
pub fn compute_layout(lines: &[String], cursor: Position, width: usize) -> VisualLayout {
    let width = width.max(1);

    let mut visual_lines = Vec::new();
    let mut logical_to_visual = Vec::with_capacity(lines.len());
    let mut visual_to_logical = Vec::new();

    let mut cursor_visual = Position::default();

    for (row, line) in lines.iter().enumerate() {
        let chunks = wrap_line(line, width);
        let mut row_chunks = Vec::with_capacity(chunks.len());

        if row == cursor.row {
            cursor_visual = resolve_boundary_cursor(cursor.col, &chunks, visual_lines.len());
        }

        for &(start_col, chunk_len) in &chunks {
            let visual_row = visual_lines.len();
            row_chunks.push(Chunk {
                visual_row,
                start_col,
            });
            visual_to_logical.push((row, start_col));
            visual_lines.push(cp_slice(line, start_col, Some(start_col + chunk_len)));
        }

        logical_to_visual.push(row_chunks);
    }

    VisualLayout {
        visual_lines,
        visual_cursor: cursor_visual,
        logical_to_visual,
        visual_to_logical,
    }
}

/// Resolve which chunk of a logical row a cursor column belongs to.
///
/// `chunks` are that row's `(start_col, len)` wrap chunks in order;
/// `first_visual_row` is the visual row index of `chunks[0]`. Chunks are
/// checked in order and the first one whose `[start, start+len]` (inclusive
/// of the trailing edge) contains `col` wins — so when two chunks are
/// adjacent with no skipped delimiter, the earlier chunk's trailing edge
/// takes priority over the next chunk's head, matching the "end of a
/// non-final chunk is stable for `end`" rule.
fn resolve_boundary_cursor(
    col: usize,
    chunks: &[(usize, usize)],
    first_visual_row: usize,
) -> Position {
    for (i, &(start, len)) in chunks.iter().enumerate() {
        if col >= start && col <= start + len {
            return Position::new(first_visual_row + i, col - start);
        }
    }
    // col is past the end of every chunk (shouldn't happen for a valid
    // cursor); clamp to the end of the last chunk.
    let last = chunks.len().saturating_sub(1);
    let (start, len) = chunks.get(last).copied().unwrap_or((0, 0));
    Position::new(first_visual_row + last, (col.saturating_sub(start)).min(len))
}

/// Wrap a single logical line into `(start_col, len)` chunks, codepoint-indexed.
fn wrap_line(line: &str, width: usize) -> Vec<(usize, usize)> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![(0, 0)];
    }

    let mut chunks = Vec::new();
    let mut chunk_start = 0usize;
    let mut i = chunk_start;
    let mut col_width = 0usize;
    let mut last_space: Option<usize> = None;

    while i < chars.len() {
        let w = char_width(chars[i]);

        if col_width + w > width && i > chunk_start {
            if let Some(space_idx) = last_space.filter(|&s| s > chunk_start) {
                chunks.push((chunk_start, space_idx - chunk_start));
                chunk_start = space_idx + 1; // skip the delimiter space
                i = chunk_start;
            } else {
                chunks.push((chunk_start, i - chunk_start));
                chunk_start = i;
            }
            col_width = 0;
            last_space = None;
            continue;
        }

        if chars[i] == ' ' {
            last_space = Some(i);
        }
        col_width += w;
        i += 1;

        // A single code point wider than the viewport: emit it alone rather
        // than loop forever trying to fit it.
        if w > width && i - 1 == chunk_start {
            chunks.push((chunk_start, 1));
            chunk_start = i;
            col_width = 0;
            last_space = None;
        }
    }

    if chunk_start < chars.len() || chunks.is_empty() {
        chunks.push((chunk_start, chars.len() - chunk_start));
    }

    chunks
}

/// Translate a visual position back to a logical `(row, col)` using the
/// layout's `visual_to_logical` map.
#[must_use]
pub fn visual_to_logical_position(layout: &VisualLayout, visual: Position) -> Position {
    let visual_row = visual.row.min(layout.visual_to_logical.len().saturating_sub(1));
    let Some(&(row, start_col)) = layout.visual_to_logical.get(visual_row) else {
        return Position::default();
    };
    Position::new(row, start_col + visual.col)
}

/// Length, in code points, of visual row `visual_row`.
#[must_use]
pub fn visual_row_len(layout: &VisualLayout, visual_row: usize) -> usize {
    layout
        .visual_lines
        .get(visual_row)
        .map_or(0, |s| s.chars().count())
}

/// Testable-properties invariant 5: every visual line's width is at most
/// `width`, except a line that is a single code point wider than `width`
/// (the hard-break overflow case — preferred to an infinite wrap loop).
fn visual_width_invariant_holds(layout: &VisualLayout, width: usize) -> bool {
    layout
        .visual_lines
        .iter()
        .all(|l| visual_width(l) <= width || l.chars().count() == 1)
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
