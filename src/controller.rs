//! Controller: scroll tracking, key translation, and the external-editor round-trip
//!
//! The engine (`crate::engine`) is a pure function of `(state, action)`. The
//! controller is the stateful shell around it that a terminal host actually
//! drives: it owns the current [`BufferState`] and its cached
//! [`VisualLayout`], keeps a scroll offset in sync with the visual cursor,
//! translates key events to [`Action`]s through a small default keymap, and
//! drives an external `$VISUAL`/`$EDITOR` subprocess when asked to.

use std::env;
use std::io::Write as _;
use std::process::Command;

use crate::codepoint::cp_len;
use crate::config::{BufferConfig, HostCapabilities};
use crate::engine::{self, Action, BufferState, EditOp, MoveDir};
use crate::error::{Result, TextBufferError};
use crate::history::Snapshot;
use crate::key::{Key, KeyCode};
use crate::layout::{self, VisualLayout};
use crate::position::{self, Position};

/// Owns a buffer, its cached layout, and the scroll/viewport state needed to
/// drive a terminal display.
pub struct Controller {
    pub state: BufferState,
    pub caps: HostCapabilities,
    viewport_width: usize,
    viewport_height: usize,
    scroll_row: usize,
    layout: VisualLayout,
}

impl Controller {
    #[must_use]
    pub fn new(
        config: BufferConfig,
        caps: HostCapabilities,
        viewport_width: usize,
        viewport_height: usize,
    ) -> Self {
        let state = BufferState::with_capacity(
            &config.initial_text,
            config.initial_cursor_offset,
            config.undo_capacity,
        );
        let viewport_width = viewport_width.max(1);
        let viewport_height = viewport_height.max(1);
        let layout = layout::compute_layout(&state.lines, state.cursor, viewport_width);
        let mut controller = Self {
            state,
            caps,
            viewport_width,
            viewport_height,
            scroll_row: 0,
            layout,
        };
        controller.update_scroll();
        controller
    }

    #[must_use]
    pub fn layout(&self) -> &VisualLayout {
        &self.layout
    }

    #[must_use]
    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    /// The visual lines currently within the viewport, i.e. `allVisualLines`
    /// sliced to `[scroll_row, scroll_row + viewport_height)`.
    #[must_use]
    pub fn viewport_visual_lines(&self) -> &[String] {
        let end = (self.scroll_row + self.viewport_height).min(self.layout.visual_lines.len());
        &self.layout.visual_lines[self.scroll_row.min(end)..end]
    }

    pub fn resize(&mut self, viewport_width: usize, viewport_height: usize) {
        self.viewport_width = viewport_width.max(1);
        self.viewport_height = viewport_height.max(1);
        self.recompute_layout();
    }

    fn recompute_layout(&mut self) {
        self.layout = layout::compute_layout(&self.state.lines, self.state.cursor, self.viewport_width);
        self.update_scroll();
    }

    /// Keep the visual cursor row inside `[scroll_row, scroll_row + height)`,
    /// scrolling by the minimum amount necessary in either direction.
    fn update_scroll(&mut self) {
        let cursor_row = self.layout.visual_cursor.row;
        if cursor_row < self.scroll_row {
            self.scroll_row = cursor_row;
        } else if cursor_row >= self.scroll_row + self.viewport_height {
            self.scroll_row = cursor_row + 1 - self.viewport_height;
        }
        let max_scroll = self
            .layout
            .visual_lines
            .len()
            .saturating_sub(self.viewport_height);
        self.scroll_row = self.scroll_row.min(max_scroll);
    }

    /// Apply `action`, recompute layout/scroll, and fire `on_change` if the
    /// buffer's text actually changed.
    pub fn dispatch(&mut self, action: Action) {
        let before = self.state.text();
        self.state = engine::apply(&self.state, action, &self.layout);
        self.recompute_layout();
        let after = self.state.text();
        if after != before {
            self.caps.notify_change(&after);
        }
    }

    /// Translate `key` through the default keymap and dispatch the result.
    /// Returns `true` iff the text or cursor actually changed — `false`
    /// covers both an unmapped key (an `UnsupportedKey` condition the
    /// caller may surface or ignore) and a mapped key that resolved to a
    /// no-op (e.g. backspace at the origin).
    pub fn handle_key(&mut self, key: Key) -> bool {
        let Some(action) = default_keymap(key) else {
            return false;
        };
        let before = (self.state.lines.clone(), self.state.cursor);
        self.dispatch(action);
        (self.state.lines.clone(), self.state.cursor) != before
    }

    /// Insert `text` at the cursor (`Action::ApplyOperations` with a single
    /// insert step).
    pub fn insert(&mut self, text: &str) {
        self.dispatch(Action::ApplyOperations(vec![EditOp::Insert(text.to_string())]));
    }

    pub fn newline(&mut self) {
        self.insert("\n");
    }

    pub fn backspace(&mut self) {
        self.dispatch(Action::ApplyOperations(vec![EditOp::Backspace]));
    }

    pub fn del(&mut self) {
        self.dispatch(Action::Delete);
    }

    pub fn move_cursor(&mut self, dir: MoveDir) {
        self.dispatch(Action::Move(dir));
    }

    pub fn move_to_offset(&mut self, offset: usize) {
        self.dispatch(Action::MoveToOffset(offset));
    }

    pub fn delete_word_left(&mut self) {
        self.dispatch(Action::DeleteWordLeft);
    }

    pub fn delete_word_right(&mut self) {
        self.dispatch(Action::DeleteWordRight);
    }

    pub fn kill_line_right(&mut self) {
        self.dispatch(Action::KillLineRight);
    }

    pub fn kill_line_left(&mut self) {
        self.dispatch(Action::KillLineLeft);
    }

    pub fn start_selection(&mut self) {
        self.dispatch(Action::StartSelection);
    }

    /// Set the buffer's full text, replacing undo history only if
    /// `push_to_undo` is true (the external-editor round-trip passes
    /// `false` since it pushes its own snapshot before launching).
    pub fn set_text(&mut self, text: &str, push_to_undo: bool) {
        self.dispatch(Action::SetText {
            text: text.to_string(),
            push_to_undo,
        });
    }

    /// Pop the most recent undo snapshot. Returns whether there was one.
    pub fn undo(&mut self) -> bool {
        let had = self.state.history.can_undo();
        self.dispatch(Action::Undo);
        had
    }

    /// Replay the most recently undone snapshot. Returns whether there was one.
    pub fn redo(&mut self) -> bool {
        let had = self.state.history.can_redo();
        self.dispatch(Action::Redo);
        had
    }

    /// Copy the active selection to the clipboard, returning it. `None` if
    /// there is no selection.
    pub fn copy(&mut self) -> Option<String> {
        self.dispatch(Action::Copy);
        self.state.clipboard.clone()
    }

    /// Paste the clipboard at the cursor. Returns whether it changed the text.
    pub fn paste(&mut self) -> bool {
        let before = self.state.text();
        self.dispatch(Action::Paste);
        self.state.text() != before
    }

    /// Replace `[start, end)` with `text`. Returns whether the range was
    /// valid and the replacement applied.
    pub fn replace_range(&mut self, start: Position, end: Position, text: &str) -> bool {
        let before = (self.state.lines.clone(), self.state.cursor);
        self.dispatch(Action::ReplaceRange {
            start,
            end,
            text: text.to_string(),
        });
        (self.state.lines.clone(), self.state.cursor) != before
    }

    /// [`Controller::replace_range`], with `start`/`end` given as code-point
    /// offsets into the current text rather than `(row, col)` positions.
    pub fn replace_range_by_offset(&mut self, start_offset: usize, end_offset: usize, text: &str) -> bool {
        let full = self.state.text();
        let start = position::offset_to_logical(&full, start_offset);
        let end = position::offset_to_logical(&full, end_offset);
        self.replace_range(start, end, text)
    }

    /// Insert pasted or drag-and-dropped text. If it resolves to a path the
    /// host recognizes, it is inserted `@`-prefixed so embedding UIs can
    /// treat it as a file reference rather than literal text.
    pub fn handle_paste(&mut self, raw: &str) {
        let payload = infer_path_insert(&self.caps, raw);
        self.dispatch(Action::ApplyOperations(vec![EditOp::Insert(payload)]));
    }

    /// Hand the current text to `$VISUAL`/`$EDITOR` (falling back to `notepad`
    /// on Windows, `vi` elsewhere), block until it exits, and load the edited
    /// text back in on success.
    /// Toggles raw mode off/on around the subprocess via `HostCapabilities`.
    /// The snapshot taken before launching is this operation's single undo
    /// step; the resulting `SetText` itself does not push a second one.
    pub fn open_external_editor(&mut self) -> Result<()> {
        let mut history = self.state.history.clone();
        history.push(Snapshot::new(self.state.lines.clone(), self.state.cursor));

        let text = run_external_editor(&self.state.text(), &self.caps)?;

        let mut next = BufferState::new(&text, 0);
        next.history = history;
        next.clipboard = self.state.clipboard.clone();
        self.state = next;
        self.recompute_layout();
        self.caps.notify_change(&self.state.text());
        Ok(())
    }
}

fn debug_enabled() -> bool {
    env::var_os("TEXTBUFFER_DEBUG").is_some()
}

/// Write `text` to a temp file, spawn the resolved editor on it, and read
/// the result back. Cleans up the temp file on every path, including
/// failure, since it is a `tempfile::NamedTempFile` dropped at the end of
/// this function's scope.
fn run_external_editor(text: &str, caps: &HostCapabilities) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("textbuffer-")
        .suffix(".txt")
        .tempfile()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    let path = file.path().to_path_buf();

    let editor = env::var("VISUAL").or_else(|_| env::var("EDITOR")).unwrap_or_else(|_| {
        if cfg!(target_os = "windows") { "notepad".to_string() } else { "vi".to_string() }
    });

    if debug_enabled() {
        eprintln!("[textbuffer] launching external editor: {editor} {}", path.display());
    }

    caps.set_raw_mode(false);
    let status = Command::new(&editor).arg(&path).status();
    caps.set_raw_mode(true);

    let status = status.map_err(|e| {
        TextBufferError::external_editor(format!("failed to launch `{editor}`: {e}"))
    })?;
    if !status.success() {
        return Err(TextBufferError::external_editor(format!(
            "`{editor}` exited with {status}"
        )));
    }

    let contents = std::fs::read_to_string(&path)?;
    // A text editor always writes a trailing newline; trim the one that
    // doesn't correspond to a blank last line the user actually typed.
    Ok(contents.strip_suffix('\n').unwrap_or(&contents).to_string())
}

/// Strip one layer of matching quotes and surrounding whitespace, then ask
/// the host whether the result names a real path; if so, prefix it with `@`
/// so embedding UIs can distinguish a file reference from literal pasted
/// text. Only considered for chunks of at least 3 code points — shorter
/// pastes are never path-inferred. Falls back to the untouched `raw` string
/// for anything that isn't a recognized path.
fn infer_path_insert(caps: &HostCapabilities, raw: &str) -> String {
    if cp_len(raw) < 3 {
        return raw.to_string();
    }
    let trimmed = strip_matching_quotes(raw).trim();
    let unescaped = caps.unescape_path(trimmed);
    if caps.is_valid_path(&unescaped) {
        format!("@{unescaped}")
    } else {
        raw.to_string()
    }
}

fn strip_matching_quotes(s: &str) -> &str {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return s;
    };
    let Some(last) = chars.last() else {
        return s;
    };
    if (first == '"' || first == '\'') && first == last && s.chars().count() >= 2 {
        &s[first.len_utf8()..s.len() - last.len_utf8()]
    } else {
        s
    }
}

/// The minimal default key map. This intentionally covers only what a bare
/// input field needs to be usable by keystroke alone: `undo`/`redo`/
/// `copy`/`paste`/word-kill/line-kill are exposed as direct commands on
/// [`Controller`] (mirroring [`crate::engine::Action`] one-to-one) for a
/// host to wire into its own richer keymap, not reached through here.
fn default_keymap(key: Key) -> Option<Action> {
    if key.mods.ctrl {
        return match key.code {
            // `ctrl-d` is the one ctrl shortcut the default map defines: forward delete.
            KeyCode::Char('d' | 'D') => Some(Action::Delete),
            _ => None,
        };
    }

    if !key.mods.is_plain() {
        return None;
    }

    match key.code {
        KeyCode::Char(c) => Some(Action::ApplyOperations(vec![EditOp::Insert(c.to_string())])),
        KeyCode::Enter => Some(Action::ApplyOperations(vec![EditOp::Insert("\n".to_string())])),
        KeyCode::Backspace => Some(Action::ApplyOperations(vec![EditOp::Backspace])),
        KeyCode::Delete => Some(Action::Delete),
        KeyCode::Left => Some(Action::Move(MoveDir::Left)),
        KeyCode::Right => Some(Action::Move(MoveDir::Right)),
        KeyCode::Up => Some(Action::Move(MoveDir::Up)),
        KeyCode::Down => Some(Action::Move(MoveDir::Down)),
        KeyCode::Home => Some(Action::Move(MoveDir::Home)),
        KeyCode::End => Some(Action::Move(MoveDir::End)),
        KeyCode::Escape | KeyCode::Tab => None,
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
