//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. The same key
//! means different things on different screens, so mapping always takes the
//! current [`crate::types::InputMode`].

pub mod map;

pub use lexicon_types as types;

pub use map::{map_key, should_quit, PANEL_KEY};
