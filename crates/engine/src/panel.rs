//! Hidden teacher panel: opened by a quick triple tap, modal while open.

use lexicon_types::{TEACHER_TAP_COUNT, TEACHER_TAP_WINDOW_MS};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherPanel {
    open: bool,
    taps: u8,
    first_tap_ms: u64,
}

impl TeacherPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Register a tap at `now_ms`. Returns `true` when this tap opened the panel.
    ///
    /// The count restarts when the window since the first tap has passed.
    pub fn tap(&mut self, now_ms: u64) -> bool {
        if self.open {
            return false;
        }
        let window = u64::from(TEACHER_TAP_WINDOW_MS);
        if self.taps == 0 || now_ms.saturating_sub(self.first_tap_ms) >= window {
            self.taps = 0;
            self.first_tap_ms = now_ms;
        }
        self.taps += 1;
        if self.taps >= TEACHER_TAP_COUNT {
            self.taps = 0;
            self.open = true;
            return true;
        }
        false
    }

    pub fn close(&mut self) {
        self.open = false;
        self.taps = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_quick_taps_open() {
        let mut panel = TeacherPanel::new();
        assert!(!panel.tap(0));
        assert!(!panel.tap(300));
        assert!(panel.tap(900));
        assert!(panel.is_open());
        assert!(!panel.tap(950));
    }

    #[test]
    fn slow_taps_restart_the_count() {
        let mut panel = TeacherPanel::new();
        panel.tap(0);
        panel.tap(500);
        assert!(!panel.tap(1000));
        assert!(!panel.tap(1400));
        assert!(panel.tap(1900));
    }

    #[test]
    fn close_resets() {
        let mut panel = TeacherPanel::new();
        for t in [0, 10, 20] {
            panel.tap(t);
        }
        panel.close();
        assert!(!panel.is_open());
        assert!(!panel.tap(30));
    }
}
