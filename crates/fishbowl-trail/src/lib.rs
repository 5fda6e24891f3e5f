//! Pointer-following petal trail.
//!
//! Petals spawn along the pointer's path once it has travelled far enough
//! since the last spawn, drift downward while fading out, and are kept in
//! a bounded ring buffer. A ring marker eases toward the raw pointer
//! position every frame and expands over interactive zones.

mod chars;
mod engine;
mod particle;

pub use engine::{MAX_PETALS, TrailEngine};
pub use particle::Particle;
