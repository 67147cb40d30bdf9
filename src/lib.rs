//! An interactive multi-line text buffer for a terminal input field.
//!
//! Logical lines are stored as a flat `Vec<String>`, indexed everywhere by
//! Unicode code point (see [`codepoint`]), never by byte or UTF-16 unit. A
//! pure [`engine`] turns `(state, action)` into the next state, with bounded
//! undo/redo ([`history`]) and a closed action set. A [`layout`] layouter
//! wraps logical lines to a viewport width, East-Asian-wide-aware, and
//! tracks a visual cursor. [`controller`] is the stateful shell a terminal
//! host actually drives: scroll tracking, key translation, drag/paste path
//! inference, and the external-editor round-trip.
//!
//! ```
//! use textbuffer::{BufferConfig, Controller, HostCapabilities, Key};
//!
//! let mut controller = Controller::new(
//!     BufferConfig {
//!         initial_text: "hello".into(),
//!         initial_cursor_offset: 5,
//!         ..Default::default()
//!     },
//!     HostCapabilities::none(),
//!     80,
//!     24,
//! );
//! controller.handle_key(Key::char('!'));
//! assert_eq!(controller.state.text(), "hello!");
//! ```

pub mod codepoint;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod history;
pub mod key;
pub mod layout;
pub mod position;
pub mod wordclass;

pub use config::{BufferConfig, HostCapabilities};
pub use controller::Controller;
pub use engine::{Action, BufferState, EditOp, MoveDir};
pub use error::{ErrorKind, Result, TextBufferError};
pub use history::{History, Snapshot};
pub use key::{Key, KeyCode, Modifiers};
pub use layout::{Chunk, VisualLayout};
pub use position::Position;
