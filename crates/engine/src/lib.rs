//! Engine - drives a [`GameSession`](lexicon_core::GameSession) from commands and ticks
//!
//! The host loop owns one [`Director`], feeds it [`Command`](lexicon_types::Command)s
//! from the input layer and calls [`Director::tick`] every `TICK_MS`. Rendering reads
//! back through [`Director::snapshot`] and [`Director::level`].

pub mod director;
pub mod panel;

pub use director::Director;
pub use panel::TeacherPanel;
