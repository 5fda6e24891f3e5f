//! Slot-machine letter reveal for the intro phrase.

use fishbowl_core::TimerSet;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::chars::SLOT_CHARS;

/// Start-delay step between consecutive non-space letters, ms.
const LETTER_STAGGER_MS: u64 = 180;
/// Interval between roll ticks, ms.
const ROLL_TICK_MS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LetterState {
    /// Waiting for its start delay.
    Idle,
    /// Cycling through random glyphs.
    Rolling,
    /// Showing its true glyph, done.
    Settled,
}

#[derive(Debug)]
struct SlotLetter {
    target: char,
    shown: char,
    state: LetterState,
    ticks_left: u32,
}

#[derive(Debug, Clone, Copy)]
enum SlotEvent {
    Start(usize),
    Tick(usize),
}

/// The intro phrase, revealed one rolling letter at a time.
///
/// Each non-space letter starts after a stagger proportional to its
/// position, rolls through random glyphs for a randomized tick count,
/// then snaps to its target. Spaces render as blanks and never count
/// toward completion.
#[derive(Debug)]
pub struct SlotSequence {
    letters: Vec<SlotLetter>,
    timers: TimerSet<SlotEvent>,
    settled: usize,
    letter_count: usize,
    completed: bool,
    rng: fastrand::Rng,
}

impl SlotSequence {
    pub fn new(phrase: &str, start_ms: u64) -> Self {
        Self::with_rng(phrase, start_ms, fastrand::Rng::new())
    }

    pub fn with_rng(phrase: &str, start_ms: u64, rng: fastrand::Rng) -> Self {
        let mut timers = TimerSet::new();
        let mut letters = Vec::new();
        let mut non_space = 0usize;
        for (i, ch) in phrase.chars().enumerate() {
            if ch == ' ' {
                letters.push(SlotLetter {
                    target: ch,
                    shown: ' ',
                    state: LetterState::Settled,
                    ticks_left: 0,
                });
            } else {
                timers.schedule(
                    start_ms + non_space as u64 * LETTER_STAGGER_MS,
                    SlotEvent::Start(i),
                );
                non_space += 1;
                letters.push(SlotLetter {
                    target: ch,
                    shown: ' ',
                    state: LetterState::Idle,
                    ticks_left: 0,
                });
            }
        }
        Self {
            letters,
            timers,
            settled: 0,
            letter_count: non_space,
            completed: false,
            rng,
        }
    }

    /// Drive pending timers. Returns true exactly once, on the frame the
    /// last letter settles.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        for event in self.timers.drain_due(now_ms) {
            match event {
                SlotEvent::Start(i) => {
                    let ticks = self.rng.u32(8..14);
                    let letter = &mut self.letters[i];
                    letter.state = LetterState::Rolling;
                    letter.ticks_left = ticks;
                    self.timers.schedule(now_ms + ROLL_TICK_MS, SlotEvent::Tick(i));
                }
                SlotEvent::Tick(i) => {
                    let roll = SLOT_CHARS[self.rng.usize(..SLOT_CHARS.len())];
                    let letter = &mut self.letters[i];
                    if letter.ticks_left <= 1 {
                        letter.shown = letter.target;
                        letter.state = LetterState::Settled;
                        self.settled += 1;
                    } else {
                        letter.ticks_left -= 1;
                        letter.shown = roll;
                        self.timers.schedule(now_ms + ROLL_TICK_MS, SlotEvent::Tick(i));
                    }
                }
            }
        }
        if self.settled >= self.letter_count && !self.completed {
            self.completed = true;
            return true;
        }
        false
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Displayed glyphs with their settled flags.
    pub fn glyphs(&self) -> impl Iterator<Item = (char, bool)> + '_ {
        self.letters
            .iter()
            .map(|l| (l.shown, l.state == LetterState::Settled))
    }

    /// Render the phrase: settled letters bold, rolling letters dim.
    pub fn line(&self, fg: Color) -> Line<'static> {
        let spans: Vec<Span> = self
            .letters
            .iter()
            .map(|l| {
                let style = match l.state {
                    LetterState::Settled => Style::new().fg(fg).add_modifier(Modifier::BOLD),
                    LetterState::Rolling => Style::new().fg(fg).add_modifier(Modifier::DIM),
                    LetterState::Idle => Style::new(),
                };
                Span::styled(l.shown.to_string(), style)
            })
            .collect();
        Line::from(spans)
    }

    /// Cancel every pending roll timer. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.timers.cancel_all();
    }
}
