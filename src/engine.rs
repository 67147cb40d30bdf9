//! Edit engine
//!
//! A pure state-transition function over [`BufferState`]. `apply` never
//! mutates its input; it returns the next state, cloning only the parts
//! that actually change. Every action that is defined as a no-op in its
//! current state (backspace at the origin, undo on an empty stack, paste
//! with an empty clipboard, ...) returns the input state unchanged, with no
//! history push — see [`crate::error::ErrorKind::NoopAction`].

use crate::codepoint::{cp_len, cp_slice, strip_unsafe};
use crate::history::{History, Snapshot};
use crate::layout::{self, VisualLayout};
use crate::position::{self, Position};
use crate::wordclass::{is_non_word, is_word_char};

/// A single insert/backspace step, as used by [`Action::ApplyOperations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Insert(String),
    Backspace,
}

/// Direction for [`Action::Move`], in visual space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// The closed set of mutations the engine understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetText { text: String, push_to_undo: bool },
    ApplyOperations(Vec<EditOp>),
    Delete,
    DeleteWordLeft,
    DeleteWordRight,
    KillLineRight,
    KillLineLeft,
    Move(MoveDir),
    MoveToOffset(usize),
    ReplaceRange { start: Position, end: Position, text: String },
    Undo,
    Redo,
    Copy,
    Paste,
    StartSelection,
}

/// The buffer's full state: content, cursor, selection, clipboard, history.
#[derive(Debug, Clone)]
pub struct BufferState {
    pub lines: Vec<String>,
    pub cursor: Position,
    pub preferred_col: Option<usize>,
    pub selection_anchor: Option<Position>,
    pub clipboard: Option<String>,
    pub history: History,
}

impl BufferState {
    /// Construct a buffer from initial text and a code-point cursor offset,
    /// with the default undo capacity (see [`crate::history::UNDO_CAPACITY`]).
    #[must_use]
    pub fn new(initial_text: &str, initial_cursor_offset: usize) -> Self {
        Self::with_capacity(initial_text, initial_cursor_offset, crate::history::UNDO_CAPACITY)
    }

    /// [`BufferState::new`], with an explicit undo capacity (see
    /// [`crate::config::BufferConfig::undo_capacity`]).
    #[must_use]
    pub fn with_capacity(initial_text: &str, initial_cursor_offset: usize, undo_capacity: usize) -> Self {
        let normalized = normalize_newlines(initial_text);
        let lines = split_lines(&normalized);
        let cursor = position::offset_to_logical(&normalized, initial_cursor_offset);
        Self {
            lines,
            cursor,
            preferred_col: None,
            selection_anchor: None,
            clipboard: None,
            history: History::with_capacity(undo_capacity),
        }
    }

    /// The full buffer content, lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// The ordered `(start, end)` of the active selection, or `None` if
    /// there isn't one (anchor unset or equal to the cursor).
    #[must_use]
    pub fn selection_range(&self) -> Option<(Position, Position)> {
        let anchor = self.selection_anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some(if anchor <= self.cursor {
            (anchor, self.cursor)
        } else {
            (self.cursor, anchor)
        })
    }
}

/// Normalize `\r\n` and lone `\r` to `\n`.
#[must_use]
pub fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

fn split_lines(normalized: &str) -> Vec<String> {
    normalized.split('\n').map(str::to_string).collect()
}

/// Apply `action` to `state`, returning the next state. `layout` is the
/// visual layout of `state` against the current viewport width; it is only
/// consulted by [`Action::Move`], but the caller always has one on hand
/// since it is cached alongside the state (see [`crate::controller`]).
#[must_use]
pub fn apply(state: &BufferState, action: Action, layout: &VisualLayout) -> BufferState {
    match action {
        Action::SetText { text, push_to_undo } => {
            let normalized = normalize_newlines(&text);
            let new_lines = split_lines(&normalized);
            let last_row = new_lines.len() - 1;
            let new_cursor = Position::new(last_row, cp_len(&new_lines[last_row]));
            mutate_unconditionally(state, new_lines, new_cursor, push_to_undo)
        }
        Action::ApplyOperations(ops) => apply_operations(state, ops),
        Action::Delete => mutate(state, |lines, cursor| forward_delete(lines, cursor)),
        Action::DeleteWordLeft => mutate(state, |lines, cursor| delete_word_left(lines, cursor)),
        Action::DeleteWordRight => mutate(state, |lines, cursor| delete_word_right(lines, cursor)),
        Action::KillLineRight => mutate(state, |lines, cursor| kill_line_right(lines, cursor)),
        Action::KillLineLeft => mutate(state, |lines, cursor| kill_line_left(lines, cursor)),
        Action::Move(dir) => apply_move(state, dir, layout),
        Action::MoveToOffset(offset) => {
            let mut next = state.clone();
            next.cursor = position::offset_to_logical(&state.text(), offset);
            next.preferred_col = None;
            next
        }
        Action::ReplaceRange { start, end, text } => apply_replace_range(state, start, end, &text),
        Action::Undo => apply_undo(state),
        Action::Redo => apply_redo(state),
        Action::Copy => apply_copy(state),
        Action::Paste => apply_paste(state),
        Action::StartSelection => {
            let mut next = state.clone();
            next.selection_anchor = Some(state.cursor);
            next
        }
    }
}

/// Shared harness for actions that edit `lines`/`cursor` in place: clones
/// the state, runs `f`, and if anything actually changed pushes a snapshot
/// of the *pre*-edit state, clears redo, clears `preferred_col`, and clears
/// the selection anchor (see the selection-anchor design decision in
/// `DESIGN.md`). If nothing changed, returns the input state verbatim —
/// this is what makes e.g. backspace-at-origin a true no-op.
fn mutate<F>(state: &BufferState, f: F) -> BufferState
where
    F: FnOnce(&mut Vec<String>, &mut Position),
{
    let mut new_lines = state.lines.clone();
    let mut new_cursor = state.cursor;
    f(&mut new_lines, &mut new_cursor);
    mutate_unconditionally(state, new_lines, new_cursor, true)
}

fn mutate_unconditionally(
    state: &BufferState,
    new_lines: Vec<String>,
    new_cursor: Position,
    push_to_undo: bool,
) -> BufferState {
    if new_lines == state.lines && new_cursor == state.cursor {
        return state.clone();
    }
    let mut next = state.clone();
    if push_to_undo {
        next.history
            .push(Snapshot::new(state.lines.clone(), state.cursor));
    }
    next.lines = new_lines;
    next.cursor = new_cursor;
    next.preferred_col = None;
    next.selection_anchor = None;
    next
}

/// Splice `text` into `lines` at `cursor`, advancing `cursor` to the end of
/// the inserted content. `text` is assumed already `strip_unsafe`d and
/// newline-normalized by the caller.
fn insert_at(lines: &mut Vec<String>, cursor: &mut Position, text: &str) {
    let fragments: Vec<&str> = text.split('\n').collect();
    let line = &lines[cursor.row];
    let before = cp_slice(line, 0, Some(cursor.col));
    let after = cp_slice(line, cursor.col, None);

    if fragments.len() == 1 {
        let new_line = format!("{before}{}{after}", fragments[0]);
        let new_col = cp_len(&before) + cp_len(fragments[0]);
        lines[cursor.row] = new_line;
        cursor.col = new_col;
        return;
    }

    let mut new_rows = Vec::with_capacity(fragments.len());
    new_rows.push(format!("{before}{}", fragments[0]));
    for frag in &fragments[1..fragments.len() - 1] {
        new_rows.push((*frag).to_string());
    }
    let last_frag = fragments[fragments.len() - 1];
    new_rows.push(format!("{last_frag}{after}"));

    let new_cursor_row = cursor.row + fragments.len() - 1;
    let new_cursor_col = cp_len(last_frag);

    lines.splice(cursor.row..=cursor.row, new_rows);
    cursor.row = new_cursor_row;
    cursor.col = new_cursor_col;
}

fn backspace(lines: &mut Vec<String>, cursor: &mut Position) {
    if cursor.row == 0 && cursor.col == 0 {
        return;
    }
    if cursor.col == 0 {
        let current = lines.remove(cursor.row);
        let prev_len = cp_len(&lines[cursor.row - 1]);
        lines[cursor.row - 1].push_str(&current);
        cursor.row -= 1;
        cursor.col = prev_len;
        return;
    }
    let line = &lines[cursor.row];
    let new_line = format!(
        "{}{}",
        cp_slice(line, 0, Some(cursor.col - 1)),
        cp_slice(line, cursor.col, None)
    );
    lines[cursor.row] = new_line;
    cursor.col -= 1;
}

fn forward_delete(lines: &mut Vec<String>, cursor: &mut Position) {
    let line_len = cp_len(&lines[cursor.row]);
    if cursor.col < line_len {
        let line = &lines[cursor.row];
        lines[cursor.row] = format!(
            "{}{}",
            cp_slice(line, 0, Some(cursor.col)),
            cp_slice(line, cursor.col + 1, None)
        );
        return;
    }
    if cursor.row + 1 < lines.len() {
        let next = lines.remove(cursor.row + 1);
        lines[cursor.row].push_str(&next);
    }
}

fn delete_word_left(lines: &mut Vec<String>, cursor: &mut Position) {
    if cursor.row == 0 && cursor.col == 0 {
        return;
    }
    if cursor.col == 0 {
        backspace(lines, cursor);
        return;
    }

    let chars: Vec<char> = lines[cursor.row].chars().collect();
    let col = cursor.col;

    if chars[..col].iter().all(|&c| is_non_word(c)) {
        let line = &lines[cursor.row];
        lines[cursor.row] = format!(
            "{}{}",
            cp_slice(line, 0, Some(col - 1)),
            cp_slice(line, col, None)
        );
        cursor.col = col - 1;
        return;
    }

    let mut i = col;
    while i > 0 && is_non_word(chars[i - 1]) {
        i -= 1;
    }
    while i > 0 && is_word_char(chars[i - 1]) {
        i -= 1;
    }

    let line = &lines[cursor.row];
    lines[cursor.row] = format!("{}{}", cp_slice(line, 0, Some(i)), cp_slice(line, col, None));
    cursor.col = i;
}

fn delete_word_right(lines: &mut Vec<String>, cursor: &mut Position) {
    let line_len = cp_len(&lines[cursor.row]);
    if cursor.col == line_len {
        if cursor.row + 1 < lines.len() {
            forward_delete(lines, cursor);
        }
        return;
    }

    let chars: Vec<char> = lines[cursor.row].chars().collect();
    let col = cursor.col;
    let mut i = col;
    while i < line_len && is_non_word(chars[i]) {
        i += 1;
    }
    while i < line_len && is_word_char(chars[i]) {
        i += 1;
    }

    let line = &lines[cursor.row];
    lines[cursor.row] = format!("{}{}", cp_slice(line, 0, Some(col)), cp_slice(line, i, None));
}

fn kill_line_right(lines: &mut Vec<String>, cursor: &mut Position) {
    let line_len = cp_len(&lines[cursor.row]);
    if cursor.col == line_len {
        if cursor.row + 1 < lines.len() {
            forward_delete(lines, cursor);
        }
        return;
    }
    let line = &lines[cursor.row];
    lines[cursor.row] = cp_slice(line, 0, Some(cursor.col));
}

fn kill_line_left(lines: &mut Vec<String>, cursor: &mut Position) {
    if cursor.col == 0 {
        return;
    }
    let line = &lines[cursor.row];
    lines[cursor.row] = cp_slice(line, cursor.col, None);
    cursor.col = 0;
}

/// Expand `0x7F` code points embedded in an insert payload into explicit
/// backspaces, splitting the surrounding text around them.
fn expand_del_bytes(ops: &[EditOp]) -> Vec<EditOp> {
    let mut expanded = Vec::with_capacity(ops.len());
    for op in ops {
        match op {
            EditOp::Backspace => expanded.push(EditOp::Backspace),
            EditOp::Insert(s) => {
                let mut current = String::new();
                for c in s.chars() {
                    if c == '\u{7f}' {
                        if !current.is_empty() {
                            expanded.push(EditOp::Insert(std::mem::take(&mut current)));
                        }
                        expanded.push(EditOp::Backspace);
                    } else {
                        current.push(c);
                    }
                }
                if !current.is_empty() {
                    expanded.push(EditOp::Insert(current));
                }
            }
        }
    }
    expanded
}

fn apply_operations(state: &BufferState, ops: Vec<EditOp>) -> BufferState {
    let expanded = expand_del_bytes(&ops);
    mutate(state, |lines, cursor| {
        for op in &expanded {
            match op {
                EditOp::Insert(s) => {
                    let safe = normalize_newlines(&strip_unsafe(s));
                    insert_at(lines, cursor, &safe);
                }
                EditOp::Backspace => backspace(lines, cursor),
            }
        }
    })
}

fn apply_move(state: &BufferState, dir: MoveDir, layout: &VisualLayout) -> BufferState {
    let total_rows = layout.visual_lines.len();
    let current = layout.visual_cursor;

    let mut next = state.clone();
    let target = match dir {
        MoveDir::Left => {
            next.preferred_col = None;
            if current.col > 0 {
                Position::new(current.row, current.col - 1)
            } else if current.row > 0 {
                let prev_len = layout::visual_row_len(layout, current.row - 1);
                Position::new(current.row - 1, prev_len)
            } else {
                current
            }
        }
        MoveDir::Right => {
            next.preferred_col = None;
            let row_len = layout::visual_row_len(layout, current.row);
            if current.col < row_len {
                Position::new(current.row, current.col + 1)
            } else if current.row + 1 < total_rows {
                Position::new(current.row + 1, 0)
            } else {
                current
            }
        }
        MoveDir::Up | MoveDir::Down => {
            let preferred = state.preferred_col.unwrap_or(current.col);
            next.preferred_col = Some(preferred);
            let target_row = match dir {
                MoveDir::Up => current.row.saturating_sub(1),
                _ => (current.row + 1).min(total_rows - 1),
            };
            let target_col = preferred.min(layout::visual_row_len(layout, target_row));
            Position::new(target_row, target_col)
        }
        MoveDir::Home => {
            next.preferred_col = None;
            Position::new(current.row, 0)
        }
        MoveDir::End => {
            next.preferred_col = None;
            Position::new(current.row, layout::visual_row_len(layout, current.row))
        }
    };

    next.cursor = layout::visual_to_logical_position(layout, target);
    next
}

fn apply_replace_range(state: &BufferState, start: Position, end: Position, text: &str) -> BufferState {
    if start > end {
        return state.clone();
    }
    if start.row >= state.lines.len() || end.row >= state.lines.len() {
        return state.clone();
    }
    if start.col > cp_len(&state.lines[start.row]) || end.col > cp_len(&state.lines[end.row]) {
        return state.clone();
    }

    mutate(state, |lines, cursor| {
        let before = cp_slice(&lines[start.row], 0, Some(start.col));
        let after = cp_slice(&lines[end.row], end.col, None);
        let joined = format!("{before}{after}");
        lines.splice(start.row..=end.row, std::iter::once(joined));
        *cursor = start;
        let normalized = normalize_newlines(text);
        insert_at(lines, cursor, &normalized);
    })
}

fn apply_undo(state: &BufferState) -> BufferState {
    let current = Snapshot::new(state.lines.clone(), state.cursor);
    let mut history = state.history.clone();
    let Some(restored) = history.undo(current) else {
        return state.clone();
    };
    let mut next = state.clone();
    next.history = history;
    next.lines = restored.lines;
    next.cursor = restored.cursor;
    next.preferred_col = None;
    next.selection_anchor = None;
    next
}

fn apply_redo(state: &BufferState) -> BufferState {
    let current = Snapshot::new(state.lines.clone(), state.cursor);
    let mut history = state.history.clone();
    let Some(restored) = history.redo(current) else {
        return state.clone();
    };
    let mut next = state.clone();
    next.history = history;
    next.lines = restored.lines;
    next.cursor = restored.cursor;
    next.preferred_col = None;
    next.selection_anchor = None;
    next
}

fn apply_copy(state: &BufferState) -> BufferState {
    let Some((start, end)) = state.selection_range() else {
        return state.clone();
    };
    let text = selected_text(&state.lines, start, end);
    let mut next = state.clone();
    next.clipboard = Some(text);
    next
}

fn selected_text(lines: &[String], start: Position, end: Position) -> String {
    if start.row == end.row {
        return cp_slice(&lines[start.row], start.col, Some(end.col));
    }
    let mut parts = Vec::with_capacity(end.row - start.row + 1);
    parts.push(cp_slice(&lines[start.row], start.col, None));
    for line in &lines[start.row + 1..end.row] {
        parts.push(line.clone());
    }
    parts.push(cp_slice(&lines[end.row], 0, Some(end.col)));
    parts.join("\n")
}

fn apply_paste(state: &BufferState) -> BufferState {
    let Some(clip) = state.clipboard.clone().filter(|s| !s.is_empty()) else {
        return state.clone();
    };
    mutate(state, |lines, cursor| insert_at(lines, cursor, &clip))
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
