//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: screens are drawn into a plain
//! framebuffer by the pure [`GameView`], then flushed by [`TerminalRenderer`],
//! which only re-emits the cells that changed since the previous frame.

pub mod fb;
pub mod flash;
pub mod game_view;
pub mod renderer;

pub use lexicon_core as core;
pub use lexicon_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use flash::FlashState;
pub use game_view::{Frame, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, DrawStats, TerminalRenderer};
