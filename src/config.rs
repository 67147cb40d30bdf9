//! Construction-time configuration and host capability injection
//!
//! Two small structs at the seam between this crate's pure engine and
//! whatever terminal/host embeds it: [`BufferConfig`] carries constructor
//! knobs, [`HostCapabilities`] carries the handful of environment-specific
//! behaviors the controller needs but can't implement itself (raw-mode
//! toggling, path validation for drag-and-drop, change notification).

use crate::history::UNDO_CAPACITY;

/// Constructor-time knobs for a new buffer.
#[derive(Debug, Clone)]
pub struct BufferConfig {
    /// Seed text for the buffer. Defaults to empty.
    pub initial_text: String,
    /// Code-point cursor offset into `initial_text`, clamped to its length.
    pub initial_cursor_offset: usize,
    /// Maximum retained undo snapshots. Defaults to [`UNDO_CAPACITY`].
    pub undo_capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            initial_text: String::new(),
            initial_cursor_offset: 0,
            undo_capacity: UNDO_CAPACITY,
        }
    }
}

/// Host-supplied capabilities the controller calls into for anything that
/// isn't pure text manipulation. Every field is optional; a host that
/// doesn't implement a capability gets the conservative default behavior
/// documented on each field.
pub struct HostCapabilities {
    /// Whether a dropped/pasted string names a real path on the host's
    /// filesystem. `None` means "never treat pasted text as a path".
    pub is_valid_path: Option<Box<dyn Fn(&str) -> bool + Send + Sync>>,
    /// Undo shell quoting/escaping a host's drag-and-drop delivers around a
    /// path (e.g. a terminal emulator that backslash-escapes spaces).
    /// Identity if absent.
    pub unescape_path: Option<Box<dyn Fn(&str) -> String + Send + Sync>>,
    /// Toggle the host terminal's raw mode. Called around an external
    /// editor round-trip so the child process gets a normal terminal and
    /// the host regains raw mode on return. No-op if absent.
    pub set_raw_mode: Option<Box<dyn Fn(bool) + Send + Sync>>,
    /// Fired once per action that actually changed the buffer's text.
    /// No-op if absent.
    pub on_change: Option<Box<dyn Fn(&str) + Send + Sync>>,
}

impl HostCapabilities {
    /// A capability set with every hook absent: paths are never recognized,
    /// `unescape_path` is identity, raw-mode toggling and change
    /// notification are no-ops.
    #[must_use]
    pub fn none() -> Self {
        Self {
            is_valid_path: None,
            unescape_path: None,
            set_raw_mode: None,
            on_change: None,
        }
    }

    pub(crate) fn is_valid_path(&self, path: &str) -> bool {
        self.is_valid_path.as_ref().is_some_and(|f| f(path))
    }

    pub(crate) fn unescape_path(&self, path: &str) -> String {
        self.unescape_path
            .as_ref()
            .map_or_else(|| path.to_string(), |f| f(path))
    }

    pub(crate) fn set_raw_mode(&self, enabled: bool) {
        if let Some(f) = &self.set_raw_mode {
            f(enabled);
        }
    }

    pub(crate) fn notify_change(&self, text: &str) {
        if let Some(f) = &self.on_change {
            f(text);
        }
    }
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for HostCapabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCapabilities")
            .field("is_valid_path", &self.is_valid_path.is_some())
            .field("unescape_path", &self.unescape_path.is_some())
            .field("set_raw_mode", &self.set_raw_mode.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
