//! Timed screen flashes for engine effects.
//!
//! The terminal has no particles or screen shake; each effect tints the frame
//! border for a short while instead. A newer effect replaces an older one.

use crate::types::Effect;

fn duration_ms(effect: Effect) -> u32 {
    match effect {
        Effect::Correct { .. } => 400,
        Effect::Wrong => 300,
        Effect::BonusStarted => 800,
        Effect::TransitionBurst => 500,
        Effect::Victory | Effect::GameOver => 1500,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlashState {
    current: Option<(Effect, u32)>,
}

impl FlashState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.current = Some((effect, duration_ms(effect)));
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        if let Some((effect, left)) = self.current {
            let left = left.saturating_sub(elapsed_ms);
            self.current = (left > 0).then_some((effect, left));
        }
    }

    pub fn current(&self) -> Option<Effect> {
        self.current.map(|(effect, _)| effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_expires() {
        let mut flash = FlashState::new();
        flash.push(Effect::Wrong);
        flash.tick(250);
        assert_eq!(flash.current(), Some(Effect::Wrong));
        flash.tick(50);
        assert_eq!(flash.current(), None);
    }

    #[test]
    fn newer_effect_wins() {
        let mut flash = FlashState::new();
        flash.push(Effect::Victory);
        flash.push(Effect::Correct { slot: None });
        assert_eq!(flash.current(), Some(Effect::Correct { slot: None }));
    }
}
