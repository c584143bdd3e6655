//! Level 4: fill the blank of a second-conditional sentence to fire the cannon.
//!
//! The field accepts typed characters or, when the host has one, a speech
//! transcript. Voice state is tracked here; driving the capability is the
//! engine's job.

use super::content::{BlankSentence, CANNON_SENTENCE};
use super::Verdict;
use crate::speech::{clean_transcript, SpeechOutcome};
use crate::types::Stage;

/// Upper bound on typed input
pub const MAX_INPUT_CHARS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VoiceState {
    #[default]
    Idle,
    Listening,
    /// The host cannot do speech recognition; typing still works
    Unavailable,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillBlank {
    input: String,
    voice: VoiceState,
    fired: bool,
}

impl Default for FillBlank {
    fn default() -> Self {
        Self::new()
    }
}

impl FillBlank {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            voice: VoiceState::Idle,
            fired: false,
        }
    }

    pub fn sentence(&self) -> &'static BlankSentence {
        &CANNON_SENTENCE
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn voice(&self) -> &VoiceState {
        &self.voice
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }

    pub fn push_char(&mut self, c: char) {
        if self.fired || c.is_control() || self.input.chars().count() >= MAX_INPUT_CHARS {
            return;
        }
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        if !self.fired {
            self.input.pop();
        }
    }

    /// Compare the field to the answer, trimmed and case-insensitive.
    ///
    /// A blank field is not an answer and costs nothing.
    pub fn submit(&mut self) -> Verdict {
        if self.fired {
            return Verdict::Pending;
        }
        let guess = self.input.trim();
        if guess.is_empty() {
            return Verdict::Pending;
        }
        if guess.to_lowercase() == CANNON_SENTENCE.answer {
            self.fired = true;
            self.voice = VoiceState::Idle;
            Verdict::Correct {
                points: Stage::Level4.points(),
                slot: None,
                cleared: true,
            }
        } else {
            Verdict::Incorrect
        }
    }

    pub fn set_listening(&mut self) {
        self.voice = VoiceState::Listening;
    }

    pub fn stop_listening(&mut self) {
        if self.voice == VoiceState::Listening {
            self.voice = VoiceState::Idle;
        }
    }

    /// Apply a speech result. A transcript replaces the field after punctuation cleanup.
    pub fn apply_speech(&mut self, outcome: SpeechOutcome) {
        if self.fired {
            return;
        }
        self.voice = match outcome {
            SpeechOutcome::Heard(raw) => {
                self.input = clean_transcript(&raw)
                    .chars()
                    .take(MAX_INPUT_CHARS)
                    .collect();
                VoiceState::Idle
            }
            SpeechOutcome::Unavailable => VoiceState::Unavailable,
            SpeechOutcome::Failed(reason) => VoiceState::Failed(reason),
        };
    }
}
