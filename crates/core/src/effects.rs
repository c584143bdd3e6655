//! Effects sink - where the engine reports visual moments
//!
//! Rendering particles or shaking the screen is entirely the host's concern; the
//! engine only says that something happened.

use std::sync::mpsc::Sender;

use crate::types::Effect;

pub trait EffectsSink {
    fn emit(&mut self, effect: Effect);
}

/// Discards every effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEffects;

impl EffectsSink for NullEffects {
    fn emit(&mut self, _effect: Effect) {}
}

/// Records effects in order (handy for tests and replays).
impl EffectsSink for Vec<Effect> {
    fn emit(&mut self, effect: Effect) {
        self.push(effect);
    }
}

/// Forwards effects to a receiver owned by the host loop.
///
/// A dropped receiver is not an error: the effect is simply lost.
impl EffectsSink for Sender<Effect> {
    fn emit(&mut self, effect: Effect) {
        let _ = self.send(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn channel_sink_forwards_in_order() {
        let (mut tx, rx) = mpsc::channel();
        tx.emit(Effect::Wrong);
        tx.emit(Effect::Correct { slot: Some(1) });
        let got: Vec<Effect> = rx.try_iter().collect();
        assert_eq!(got, vec![Effect::Wrong, Effect::Correct { slot: Some(1) }]);
    }

    #[test]
    fn channel_sink_tolerates_closed_receiver() {
        let (mut tx, rx) = mpsc::channel();
        drop(rx);
        tx.emit(Effect::Victory);
    }
}
