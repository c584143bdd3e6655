//! Lexicon Expedition (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and adds the pieces that
//! only make sense for the terminal host: environment [`config`], a shell
//! command [`speech`] capability and log setup.

pub mod config;
pub mod logging;
pub mod speech;

pub use lexicon_core as core;
pub use lexicon_engine as engine;
pub use lexicon_input as input;
pub use lexicon_store as store;
pub use lexicon_term as term;
pub use lexicon_types as types;

pub use config::{AppConfig, ConfigError};
pub use speech::CommandSpeech;
