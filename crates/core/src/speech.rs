//! Speech input capability - optional voice-to-text for free-text levels
//!
//! The capability is polled from the fixed tick: `start` begins listening,
//! `poll` eventually yields one result, `cancel` abandons an in-flight attempt.
//! A host without speech support plugs in [`NoSpeech`]; the text field stays
//! editable either way.

use std::collections::VecDeque;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("voice input is not supported here")]
    Unsupported,

    #[error("speech recognition failed: {0}")]
    Recognition(String),
}

pub trait SpeechInput {
    /// Begin listening. `Err(Unsupported)` means the capability is absent.
    fn start(&mut self) -> Result<(), SpeechError>;

    /// `None` while still listening (or idle); `Some` exactly once per started attempt.
    fn poll(&mut self) -> Option<Result<String, SpeechError>>;

    /// Abandon the current attempt; a later `poll` yields nothing for it.
    fn cancel(&mut self);
}

/// Tri-state result surfaced to the level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutcome {
    Heard(String),
    Unavailable,
    Failed(String),
}

impl From<Result<String, SpeechError>> for SpeechOutcome {
    fn from(value: Result<String, SpeechError>) -> Self {
        match value {
            Ok(text) => SpeechOutcome::Heard(text),
            Err(SpeechError::Unsupported) => SpeechOutcome::Unavailable,
            Err(SpeechError::Recognition(msg)) => SpeechOutcome::Failed(msg),
        }
    }
}

/// Strip punctuation from a raw transcript and trim it.
///
/// # Examples
///
/// ```
/// use lexicon_core::speech::clean_transcript;
///
/// assert_eq!(clean_transcript(" Had. "), "Had");
/// assert_eq!(clean_transcript("(had)!"), "had");
/// ```
pub fn clean_transcript(raw: &str) -> String {
    const STRIP: &[char] = &[
        '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_',
        '`', '~', '(', ')',
    ];
    raw.chars()
        .filter(|c| !STRIP.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Capability stand-in for hosts without speech recognition.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

impl SpeechInput for NoSpeech {
    fn start(&mut self) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }

    fn poll(&mut self) -> Option<Result<String, SpeechError>> {
        None
    }

    fn cancel(&mut self) {}
}

/// Deterministic capability that replays queued results.
///
/// Each `start` takes the next queued result and delivers it after `latency_polls`
/// calls to `poll`. With an empty queue `start` reports `Unsupported`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSpeech {
    queue: VecDeque<Result<String, SpeechError>>,
    in_flight: Option<(Result<String, SpeechError>, u32)>,
    latency_polls: u32,
}

impl ScriptedSpeech {
    pub fn new(results: impl IntoIterator<Item = Result<String, SpeechError>>) -> Self {
        Self {
            queue: results.into_iter().collect(),
            in_flight: None,
            latency_polls: 0,
        }
    }

    pub fn with_latency_polls(mut self, polls: u32) -> Self {
        self.latency_polls = polls;
        self
    }

    pub fn is_listening(&self) -> bool {
        self.in_flight.is_some()
    }
}

impl SpeechInput for ScriptedSpeech {
    fn start(&mut self) -> Result<(), SpeechError> {
        let next = self.queue.pop_front().ok_or(SpeechError::Unsupported)?;
        self.in_flight = Some((next, self.latency_polls));
        Ok(())
    }

    fn poll(&mut self) -> Option<Result<String, SpeechError>> {
        let (_, wait) = self.in_flight.as_mut()?;
        if *wait > 0 {
            *wait -= 1;
            return None;
        }
        self.in_flight.take().map(|(result, _)| result)
    }

    fn cancel(&mut self) {
        self.in_flight = None;
    }
}
