//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the progression rules, scoring, level evaluation and
//! checkpoint persistence for the expedition. It has **no dependencies** on
//! rendering, terminals or the file system: storage, speech input and visual
//! effects are reached only through the traits in [`persist`], [`speech`] and
//! [`effects`].
//!
//! # Module Structure
//!
//! - [`scoring`]: score deltas, combo streaks and the bonus (adrenaline) multiplier
//! - [`session`]: the [`GameSession`] state machine (menu, levels, transitions, endings)
//! - [`persist`]: blob store seam plus the checkpoint / high score adapter
//! - [`levels`]: the four puzzle modules and their static content
//! - [`snapshot`]: the read-only view handed to the presentation layer
//! - [`effects`]: abstract effect notifications sink
//! - [`speech`]: optional speech-to-text capability
//!
//! # Game Rules
//!
//! - **Lives**: 3 per run; a wrong answer costs one unless override mode is on
//! - **Combo**: consecutive correct answers; any mistake resets it
//! - **Bonus mode**: combo of 3 or more doubles every score award
//! - **Checkpoint**: written whenever a level becomes current, cleared on victory,
//!   kept on game over so the failed level can be resumed
//!
//! # Example
//!
//! ```
//! use lexicon_core::{GameSession, MemoryStore, Persistence};
//! use lexicon_core::types::Stage;
//!
//! let mut session = GameSession::new(Persistence::new(MemoryStore::new()));
//! assert!(session.start_new_game());
//! assert_eq!(session.stage(), Stage::Level1);
//!
//! // A correct answer on level 1.
//! session.add_score(Stage::Level1.points());
//! session.increment_combo();
//! assert_eq!(session.score(), 100);
//!
//! // Two-phase transition to the next level.
//! assert!(session.request_transition(Stage::Level2));
//! assert_eq!(session.stage(), Stage::Transitioning);
//! assert_eq!(session.complete_transition(), Some(Stage::Level2));
//! assert_eq!(session.combo(), 0);
//! ```

pub mod effects;
pub mod levels;
pub mod persist;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod speech;

pub use lexicon_types as types;

// Re-export commonly used types for convenience
pub use effects::{EffectsSink, NullEffects};
pub use levels::{LevelModule, Verdict};
pub use persist::{BlobStore, Checkpoint, MemoryStore, Persistence, StoreError};
pub use scoring::{bonus_active, effective_points, ScoreBoard};
pub use session::{GameSession, LifeLoss};
pub use snapshot::SessionSnapshot;
pub use speech::{NoSpeech, SpeechError, SpeechInput, SpeechOutcome};
