//! Message ticker: reveal from the right, erase from the left.

use fishbowl_core::{TimerSet, mix};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Delay before a new message starts revealing, ms.
const LEAD_IN_MS: u64 = 500;
/// Per-character reveal interval, ms.
const REVEAL_TICK_MS: u64 = 45;
/// Pause with the full message visible, ms.
const DWELL_MS: u64 = 3000;
/// Per-character erase interval, ms.
const ERASE_TICK_MS: u64 = 25;
/// Pointer lens radius in normalized container coordinates.
const LENS_RADIUS: f32 = 0.15;
/// Trailing caret glyph.
const CARET: char = '_';

#[derive(Debug, Clone, Copy)]
enum TickerEvent {
    Reveal,
    DwellOver,
    Erase,
}

/// Where the current message is in its reveal/erase cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerPhase {
    Revealing,
    Dwelling,
    Erasing,
}

/// Cyclic message ticker with a pointer-proximity lens.
///
/// Each message types in from the right (later characters first), dwells,
/// erases from the left, then the cycle advances to the next message
/// modulo the list length. The lens runs independently of the timers: it
/// boosts characters near the pointer's normalized x, falling off
/// linearly to zero at the lens radius.
#[derive(Debug)]
pub struct Ticker {
    messages: Vec<String>,
    index: usize,
    chars: Vec<char>,
    reveal_count: usize,
    erase_count: usize,
    phase: TickerPhase,
    timers: TimerSet<TickerEvent>,
    pointer_x: Option<f32>,
}

impl Ticker {
    pub fn new(messages: Vec<String>, start_ms: u64) -> Self {
        let messages = if messages.is_empty() {
            vec![String::new()]
        } else {
            messages
        };
        let chars = messages[0].chars().collect();
        let mut timers = TimerSet::new();
        timers.schedule(start_ms + LEAD_IN_MS, TickerEvent::Reveal);
        Self {
            messages,
            index: 0,
            chars,
            reveal_count: 0,
            erase_count: 0,
            phase: TickerPhase::Revealing,
            timers,
            pointer_x: None,
        }
    }

    /// Drive pending timers.
    pub fn advance(&mut self, now_ms: u64) {
        for event in self.timers.drain_due(now_ms) {
            match event {
                TickerEvent::Reveal => {
                    if self.reveal_count < self.chars.len() {
                        self.reveal_count += 1;
                        self.timers.schedule(now_ms + REVEAL_TICK_MS, TickerEvent::Reveal);
                    } else {
                        self.phase = TickerPhase::Dwelling;
                        self.timers.schedule(now_ms + DWELL_MS, TickerEvent::DwellOver);
                    }
                }
                TickerEvent::DwellOver => {
                    self.phase = TickerPhase::Erasing;
                    self.timers.schedule(now_ms + ERASE_TICK_MS, TickerEvent::Erase);
                }
                TickerEvent::Erase => {
                    if self.erase_count < self.chars.len() {
                        self.erase_count += 1;
                        self.timers.schedule(now_ms + ERASE_TICK_MS, TickerEvent::Erase);
                    } else {
                        self.index = (self.index + 1) % self.messages.len();
                        self.chars = self.messages[self.index].chars().collect();
                        self.reveal_count = 0;
                        self.erase_count = 0;
                        self.phase = TickerPhase::Revealing;
                        self.timers.schedule(now_ms + LEAD_IN_MS, TickerEvent::Reveal);
                    }
                }
            }
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> TickerPhase {
        self.phase
    }

    pub fn reveal_count(&self) -> usize {
        self.reveal_count
    }

    pub fn erase_count(&self) -> usize {
        self.erase_count
    }

    pub fn message(&self) -> &str {
        &self.messages[self.index]
    }

    /// Display width of the ticker: message plus the trailing caret.
    pub fn width(&self) -> usize {
        self.chars.len() + 1
    }

    /// Whether character `i` of the current message is visible. Reveal
    /// counts right-to-left, erasure left-to-right.
    pub fn char_visible(&self, i: usize) -> bool {
        let revealed = self.chars.len().saturating_sub(i) <= self.reveal_count;
        let erased = self.phase == TickerPhase::Erasing && i < self.erase_count;
        revealed && !erased
    }

    /// Record the pointer's normalized x within the ticker container.
    pub fn set_pointer(&mut self, norm_x: f32) {
        self.pointer_x = Some(norm_x);
    }

    /// Pointer left the container; the lens clears.
    pub fn clear_pointer(&mut self) {
        self.pointer_x = None;
    }

    /// Lens intensity for character `i`: 1.0 directly under the pointer,
    /// falling linearly to 0.0 at the lens radius and beyond.
    pub fn lens_boost(&self, i: usize) -> f32 {
        let Some(px) = self.pointer_x else {
            return 0.0;
        };
        if self.chars.is_empty() {
            return 0.0;
        }
        let pos = i as f32 / self.chars.len() as f32;
        let dist = (pos - px).abs();
        if dist > LENS_RADIUS {
            0.0
        } else {
            1.0 - dist / LENS_RADIUS
        }
    }

    /// Render the ticker line. Boosted characters go bold and shift from
    /// `fg` toward `peak` with the lens intensity.
    pub fn line(&self, fg: Color, peak: Color) -> Line<'static> {
        let mut spans: Vec<Span> = Vec::with_capacity(self.chars.len() + 1);
        for (i, &ch) in self.chars.iter().enumerate() {
            let shown = if self.char_visible(i) { ch } else { ' ' };
            let boost = self.lens_boost(i);
            let mut style = Style::new().fg(mix(fg, peak, boost));
            if boost > 0.35 {
                style = style.add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(shown.to_string(), style));
        }
        spans.push(Span::styled(
            CARET.to_string(),
            Style::new().fg(fg).add_modifier(Modifier::DIM),
        ));
        Line::from(spans)
    }

    /// Cancel the cycle. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.timers.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticker(messages: &[&str]) -> Ticker {
        Ticker::new(messages.iter().map(|m| m.to_string()).collect(), 0)
    }

    fn run(t: &mut Ticker, from_ms: u64, to_ms: u64) {
        for now in (from_ms..=to_ms).step_by(16) {
            t.advance(now);
        }
    }

    #[test]
    fn test_reveal_then_erase_then_next_message() {
        let mut t = ticker(&["hello", "again"]);
        let mut max_reveal = 0;
        let mut max_erase = 0;
        // Reveal is monotonic up to the full length.
        for now in (0..=1_000u64).step_by(16) {
            t.advance(now);
            assert!(t.reveal_count() >= max_reveal);
            max_reveal = t.reveal_count();
        }
        assert_eq!(max_reveal, 5);
        assert_eq!(t.phase(), TickerPhase::Dwelling);

        // After the dwell, erasure is monotonic up to the full length.
        for now in (1_000..=6_000u64).step_by(16) {
            t.advance(now);
            if t.phase() == TickerPhase::Erasing {
                assert!(t.erase_count() >= max_erase);
                max_erase = t.erase_count();
            }
        }
        assert_eq!(max_erase, 5);
        // The cycle wrapped to the next message.
        assert_eq!(t.index(), 1);
        assert_eq!(t.message(), "again");
    }

    #[test]
    fn test_index_wraps_modulo_message_count() {
        let mut t = ticker(&["ab", "cd"]);
        // Two full cycles: each is ~500 + 3*45 + 3000 + 3*25 ≈ 3.7 s.
        run(&mut t, 0, 9_000);
        assert_eq!(t.index(), 0, "two wraps return to the first message");
    }

    #[test]
    fn test_reveal_is_right_to_left() {
        let mut t = ticker(&["hello"]);
        run(&mut t, 0, 544);
        // One character revealed: the last one.
        assert_eq!(t.reveal_count(), 1);
        assert!(t.char_visible(4));
        assert!(!t.char_visible(0));
    }

    #[test]
    fn test_erase_is_left_to_right() {
        let mut t = ticker(&["hello"]);
        // Through reveal + dwell and one erase tick.
        run(&mut t, 0, 3_800);
        assert_eq!(t.phase(), TickerPhase::Erasing);
        assert_eq!(t.erase_count(), 1);
        assert!(!t.char_visible(0), "index 0 erases first");
        assert!(t.char_visible(4), "last character erases last");
    }

    #[test]
    fn test_lens_boost_falloff() {
        let mut t = ticker(&["hello"]);
        assert_eq!(t.lens_boost(0), 0.0, "no pointer, no boost");

        // Pointer directly over character 0 (pos 0.0).
        t.set_pointer(0.0);
        assert!((t.lens_boost(0) - 1.0).abs() < f32::EPSILON);

        // Character at exactly the lens radius gets zero boost:
        // pos(i=3) = 3/5 = 0.6; pointer at 0.45 puts it at dist 0.15.
        t.set_pointer(0.45);
        assert!(t.lens_boost(3).abs() < 1e-6);
        // Just inside the radius gets a positive boost.
        t.set_pointer(0.46);
        assert!(t.lens_boost(3) > 0.0);

        t.clear_pointer();
        assert_eq!(t.lens_boost(0), 0.0);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut t = ticker(&["hello"]);
        t.cancel();
        t.cancel();
        t.advance(60_000);
        assert_eq!(t.reveal_count(), 0);
    }
}
