//! Simulated human typing.

use fishbowl_core::TimerSet;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Base delay between keystrokes, ms.
const BASE_DELAY_MS: u64 = 90;
/// Uniform jitter added to every keystroke, ms.
const JITTER_MS: u64 = 120;
/// Occasional thinking pause, ms.
const PAUSE_MS: u64 = 200;
/// Chance of the thinking pause per keystroke.
const PAUSE_CHANCE: f32 = 0.15;
/// Caret blink period, ms.
const CARET_BLINK_MS: u64 = 530;
/// Caret glyph.
const CARET: char = '▎';

/// A line revealed one keystroke at a time with human-like rhythm.
///
/// Every reveal is scheduled after base delay + uniform jitter, with a
/// low-probability extra pause. The caret sits before the next
/// unrevealed character and holds at the end once the line completes.
#[derive(Debug)]
pub struct TypingLine {
    text: Vec<char>,
    revealed: usize,
    timers: TimerSet<()>,
    started: bool,
    rng: fastrand::Rng,
}

impl TypingLine {
    pub fn new(text: &str) -> Self {
        Self::with_rng(text, fastrand::Rng::new())
    }

    pub fn with_rng(text: &str, rng: fastrand::Rng) -> Self {
        Self {
            text: text.chars().collect(),
            revealed: 0,
            timers: TimerSet::new(),
            started: false,
            rng,
        }
    }

    /// Schedule the first keystroke; later keystrokes chain until the
    /// whole line is revealed. Repeat calls are no-ops.
    pub fn start(&mut self, now_ms: u64) {
        if self.started || self.text.is_empty() {
            self.started = true;
            return;
        }
        self.started = true;
        let delay = self.key_delay();
        self.timers.schedule(now_ms + delay, ());
    }

    fn key_delay(&mut self) -> u64 {
        let jitter = (self.rng.f32() * JITTER_MS as f32) as u64;
        let pause = if self.rng.f32() < PAUSE_CHANCE {
            PAUSE_MS
        } else {
            0
        };
        BASE_DELAY_MS + jitter + pause
    }

    /// Drive pending keystrokes. Returns true exactly once, when the
    /// final character is revealed.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        let mut finished = false;
        for () in self.timers.drain_due(now_ms) {
            self.revealed += 1;
            if self.revealed < self.text.len() {
                let delay = self.key_delay();
                self.timers.schedule(now_ms + delay, ());
            } else {
                finished = true;
            }
        }
        finished
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn is_done(&self) -> bool {
        self.revealed >= self.text.len()
    }

    /// Caret position: before the next unrevealed character, holding at
    /// the end once the line is complete.
    pub fn caret_index(&self) -> usize {
        self.revealed.min(self.text.len())
    }

    /// Caret blink state for the given clock.
    pub fn caret_visible(now_ms: u64) -> bool {
        (now_ms / CARET_BLINK_MS) % 2 == 0
    }

    /// Render the line at fixed width: revealed glyphs, the blinking
    /// caret, and blanks for what is still unrevealed.
    pub fn line(&self, now_ms: u64, fg: Color) -> Line<'static> {
        let caret_on = Self::caret_visible(now_ms);
        let caret = self.caret_index();
        let mut spans: Vec<Span> = Vec::with_capacity(self.text.len() + 1);
        for (i, &ch) in self.text.iter().enumerate() {
            if i == caret && caret_on {
                spans.push(Span::styled(
                    CARET.to_string(),
                    Style::new().fg(fg).add_modifier(Modifier::BOLD),
                ));
            }
            let shown = if i < self.revealed { ch } else { ' ' };
            spans.push(Span::styled(shown.to_string(), Style::new().fg(fg)));
        }
        if caret >= self.text.len() && caret_on {
            spans.push(Span::styled(
                CARET.to_string(),
                Style::new().fg(fg).add_modifier(Modifier::BOLD),
            ));
        }
        Line::from(spans)
    }

    /// Cancel any pending keystroke. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.timers.cancel_all();
    }
}
