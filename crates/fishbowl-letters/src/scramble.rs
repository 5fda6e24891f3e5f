//! Hover scramble between two words.

use fishbowl_core::TimerSet;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::chars::SCRAMBLE_CHARS;

/// Spacing between ticks within one character's chain, ms.
const TICK_SPACING_MS: u64 = 50;
/// Stagger between adjacent character indices, ms.
const INDEX_STAGGER_MS: u64 = 70;

#[derive(Debug, Clone, Copy)]
enum ScrambleEvent {
    Tick(usize),
    Settle(usize),
}

/// A word that scrambles glyph-by-glyph toward its current target.
///
/// Targets are padded to a shared width so the rendered word never
/// shifts. Retargeting cancels every pending timer before scheduling the
/// new chains; a timer from a superseded target can never touch current
/// state.
#[derive(Debug)]
pub struct ScrambleWord {
    display: Vec<char>,
    target: Vec<char>,
    width: usize,
    timers: TimerSet<ScrambleEvent>,
    rng: fastrand::Rng,
}

impl ScrambleWord {
    /// `initial` is shown as-is. `width` is the padded width shared by
    /// every target this word scrambles between; see [`padded_width`].
    ///
    /// [`padded_width`]: Self::padded_width
    pub fn new(initial: &str, width: usize) -> Self {
        Self::with_rng(initial, width, fastrand::Rng::new())
    }

    pub fn with_rng(initial: &str, width: usize, rng: fastrand::Rng) -> Self {
        let width = width.max(initial.chars().count());
        let display = pad(initial, width);
        Self {
            target: display.clone(),
            display,
            width,
            timers: TimerSet::new(),
            rng,
        }
    }

    /// Width both words fit in without the display ever shifting.
    pub fn padded_width(a: &str, b: &str) -> usize {
        a.chars().count().max(b.chars().count())
    }

    /// Begin scrambling toward `word`, cancelling all pending timers from
    /// any previous target first. Each index gets a short chain of 3-7
    /// random-glyph ticks, staggered across indices, then a settle.
    pub fn retarget(&mut self, word: &str, now_ms: u64) {
        self.timers.cancel_all();
        self.target = pad(word, self.width);
        for i in 0..self.width {
            let ticks = self.rng.u64(3..8);
            let stagger = i as u64 * INDEX_STAGGER_MS;
            for t in 0..ticks {
                self.timers
                    .schedule(now_ms + t * TICK_SPACING_MS + stagger, ScrambleEvent::Tick(i));
            }
            self.timers.schedule(
                now_ms + ticks * TICK_SPACING_MS + stagger,
                ScrambleEvent::Settle(i),
            );
        }
    }

    /// Drive pending timers.
    pub fn advance(&mut self, now_ms: u64) {
        for event in self.timers.drain_due(now_ms) {
            match event {
                ScrambleEvent::Tick(i) => {
                    self.display[i] = SCRAMBLE_CHARS[self.rng.usize(..SCRAMBLE_CHARS.len())];
                }
                ScrambleEvent::Settle(i) => self.display[i] = self.target[i],
            }
        }
    }

    /// Displayed glyphs, flagging those still differing from the target.
    pub fn glyphs(&self) -> impl Iterator<Item = (char, bool)> + '_ {
        self.display
            .iter()
            .zip(&self.target)
            .map(|(&shown, &target)| (shown, shown != target))
    }

    /// All characters settled on the current target.
    pub fn is_settled(&self) -> bool {
        self.timers.is_empty() && self.display == self.target
    }

    /// Render the word; mid-scramble glyphs get `scramble_fg`.
    pub fn line(&self, fg: Color, scramble_fg: Color) -> Line<'static> {
        let spans: Vec<Span> = self
            .glyphs()
            .map(|(ch, scrambling)| {
                let color = if scrambling { scramble_fg } else { fg };
                Span::styled(ch.to_string(), Style::new().fg(color))
            })
            .collect();
        Line::from(spans)
    }

    /// Cancel every pending timer. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.timers.cancel_all();
    }
}

fn pad(word: &str, width: usize) -> Vec<char> {
    let mut chars: Vec<char> = word.chars().collect();
    chars.resize(width, ' ');
    chars
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: &str = "swim_";
    const HOVER: &str = "U+1F421";

    fn word() -> ScrambleWord {
        let width = ScrambleWord::padded_width(DEFAULT, HOVER);
        ScrambleWord::with_rng(DEFAULT, width, fastrand::Rng::with_seed(9))
    }

    fn run(word: &mut ScrambleWord, from_ms: u64, to_ms: u64) {
        for now in (from_ms..=to_ms).step_by(16) {
            word.advance(now);
        }
    }

    #[test]
    fn test_scramble_settles_on_target() {
        let mut word = word();
        word.retarget(HOVER, 0);
        // Worst case: 6 * 70 + 7 * 50 = 770 ms.
        run(&mut word, 0, 2_000);
        assert!(word.is_settled());
        let shown: String = word.glyphs().map(|(c, _)| c).collect();
        assert_eq!(shown, "U+1F421");
    }

    #[test]
    fn test_retarget_mid_animation_wins() {
        let mut word = word();
        word.retarget(HOVER, 0);
        run(&mut word, 0, 200);
        // Pointer leaves before the hover word settles.
        word.retarget(DEFAULT, 200);
        run(&mut word, 216, 3_000);
        assert!(word.is_settled());
        let shown: String = word.glyphs().map(|(c, _)| c).collect();
        assert_eq!(shown, "swim_  ");
        // No character kept the superseded target's settled glyph.
        assert_ne!(shown.trim_end(), HOVER);
    }

    #[test]
    fn test_width_never_shifts() {
        let mut word = word();
        assert_eq!(word.glyphs().count(), 7);
        word.retarget(HOVER, 0);
        for now in (0..=2_000).step_by(16) {
            word.advance(now);
            assert_eq!(word.glyphs().count(), 7);
        }
        word.retarget(DEFAULT, 2_000);
        run(&mut word, 2_000, 4_000);
        assert_eq!(word.glyphs().count(), 7);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut word = word();
        word.retarget(HOVER, 0);
        word.cancel();
        word.cancel();
        word.advance(10_000);
        // Frozen mid-scramble, but no stale settlement ever lands.
        let shown: String = word.glyphs().map(|(c, _)| c).collect();
        assert_eq!(shown.chars().count(), 7);
    }
}
