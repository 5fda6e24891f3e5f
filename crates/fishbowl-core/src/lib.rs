//! Core primitives shared by the fishbowl animation crates.
//!
//! Provides the timer arena that drives every character animation, the
//! intro phase enum, and the color math used by the trail and ticker
//! rendering.

mod color;
mod phase;
mod timer;

pub use color::{fade, mix};
pub use phase::IntroPhase;
pub use timer::TimerSet;
