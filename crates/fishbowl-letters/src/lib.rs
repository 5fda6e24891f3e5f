//! Character-level text animations.
//!
//! Four animations built on one pattern: a target string, a per-character
//! random delay policy, and a timer arena ([`fishbowl_core::TimerSet`])
//! drained by the frame loop. Each character runs its own small state
//! machine; retargeting cancels the whole arena before scheduling the
//! replacement, so a stale timer can never overwrite newer state.

mod chars;
mod scramble;
mod slot;
mod ticker;
mod typing;

pub use scramble::ScrambleWord;
pub use slot::SlotSequence;
pub use ticker::{Ticker, TickerPhase};
pub use typing::TypingLine;
