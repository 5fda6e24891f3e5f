//! Page shell state: intro sequencing, hit zones, toast.

use fishbowl_core::{IntroPhase, TimerSet};

/// Pause between the last slot settle and the slot fade, ms.
const SLOT_EXIT_MS: u64 = 500;
/// Slot fade duration before typing begins, ms.
const FADE_SLOT_MS: u64 = 800;
/// Pause after typing completes, ms.
const TYPING_EXIT_MS: u64 = 800;
/// Loader fade-out duration, ms.
const FADE_OUT_MS: u64 = 600;
/// How long a toast stays visible, ms.
const TOAST_MS: u64 = 2600;

/// Interactive zones hit-tested against the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    SwimWord,
    FileRow(usize),
    DownloadButton,
    ProgressTrack,
    Ticker,
}

/// Drives the intro phase chain with one-shot timers.
///
/// The fades chain on their own; slot and typing completion are reported
/// by the caller, which owns those sequences.
#[derive(Debug, Default)]
pub struct IntroShell {
    phase: IntroPhase,
    timers: TimerSet<IntroPhase>,
}

impl IntroShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// The slot sequence settled; fade it out shortly.
    pub fn slot_finished(&mut self, now_ms: u64) {
        self.timers
            .schedule(now_ms + SLOT_EXIT_MS, IntroPhase::FadeSlot);
    }

    /// The typing line completed; fade the loader away shortly.
    pub fn typing_finished(&mut self, now_ms: u64) {
        self.timers
            .schedule(now_ms + TYPING_EXIT_MS, IntroPhase::FadeOut);
    }

    /// Drive pending transitions; returns phases entered this frame.
    pub fn advance(&mut self, now_ms: u64) -> Vec<IntroPhase> {
        let mut entered = Vec::new();
        for phase in self.timers.drain_due(now_ms) {
            self.phase = phase;
            entered.push(phase);
            match phase {
                IntroPhase::FadeSlot => self
                    .timers
                    .schedule(now_ms + FADE_SLOT_MS, IntroPhase::Typing),
                IntroPhase::FadeOut => {
                    self.timers.schedule(now_ms + FADE_OUT_MS, IntroPhase::Done)
                }
                _ => {}
            }
        }
        entered
    }

    /// Jump straight to the end of the intro, cancelling the chain.
    /// Safe to call repeatedly.
    pub fn skip(&mut self) {
        self.timers.cancel_all();
        self.phase = IntroPhase::Done;
    }
}

/// A transient status line.
#[derive(Debug, Default)]
pub struct Toast {
    message: String,
    visible_until: Option<u64>,
}

impl Toast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: String, now_ms: u64) {
        self.message = message;
        self.visible_until = Some(now_ms + TOAST_MS);
    }

    /// Hide the toast once its time is up.
    pub fn expire(&mut self, now_ms: u64) {
        if self.visible_until.is_some_and(|until| now_ms >= until) {
            self.visible_until = None;
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.visible_until.map(|_| self.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intro_chain_runs_in_order() {
        let mut shell = IntroShell::new();
        assert_eq!(shell.phase(), IntroPhase::Slot);

        shell.slot_finished(2_000);
        assert!(shell.advance(2_400).is_empty());
        assert_eq!(shell.advance(2_500), vec![IntroPhase::FadeSlot]);
        assert_eq!(shell.advance(3_300), vec![IntroPhase::Typing]);
        assert_eq!(shell.phase(), IntroPhase::Typing);

        shell.typing_finished(5_000);
        assert_eq!(shell.advance(5_800), vec![IntroPhase::FadeOut]);
        assert_eq!(shell.advance(6_400), vec![IntroPhase::Done]);
        assert!(!shell.phase().loader_visible());
    }

    #[test]
    fn test_skip_cancels_pending_transitions() {
        let mut shell = IntroShell::new();
        shell.slot_finished(0);
        shell.skip();
        shell.skip();
        assert_eq!(shell.phase(), IntroPhase::Done);
        // The cancelled FadeSlot never lands.
        assert!(shell.advance(60_000).is_empty());
        assert_eq!(shell.phase(), IntroPhase::Done);
    }

    #[test]
    fn test_toast_expires() {
        let mut toast = Toast::new();
        assert!(toast.message().is_none());
        toast.show("downloading 2 files".to_string(), 1_000);
        toast.expire(1_500);
        assert_eq!(toast.message(), Some("downloading 2 files"));
        toast.expire(1_000 + TOAST_MS);
        assert!(toast.message().is_none());
        // Expiring again is harmless.
        toast.expire(u64::MAX);
        assert!(toast.message().is_none());
    }
}
