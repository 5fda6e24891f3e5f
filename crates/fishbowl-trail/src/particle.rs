//! Petal particle state.

use crate::chars::PETAL_CHARS;

/// A single drifting petal spawned along the pointer path.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Position in cell coordinates.
    pub x: f32,
    pub y: f32,
    /// Velocity in cells per frame.
    pub vx: f32,
    pub vy: f32,
    /// Rotation in degrees. Glyphs cannot rotate in a cell grid, so the
    /// angle drives a sinusoidal horizontal wobble instead.
    pub rot: f32,
    /// Rotational velocity in degrees per frame.
    pub rot_v: f32,
    /// Glyph drawn for this petal.
    pub glyph: char,
    /// Visual weight; larger petals render bold, smaller ones dim.
    pub size: f32,
    /// Remaining life: 1.0 at spawn, dead at <= 0.
    pub life: f32,
    /// Lifetime in frames; life decays by `1 / max_life` per frame.
    pub max_life: f32,
}

impl Particle {
    /// Spawn a petal at `(x, y)` with randomized drift, spin, size and
    /// lifetime. The vertical velocity is biased downward so petals fall.
    pub fn spawn(x: f32, y: f32, rng: &mut fastrand::Rng) -> Self {
        Self {
            x,
            y,
            vx: (rng.f32() - 0.5) * 0.4,
            vy: 0.15 + rng.f32() * 0.25,
            rot: rng.f32() * 360.0,
            rot_v: (rng.f32() - 0.5) * 6.0,
            glyph: PETAL_CHARS[rng.usize(..PETAL_CHARS.len())],
            size: 8.0 + rng.f32() * 5.0,
            life: 1.0,
            max_life: 45.0 + rng.f32() * 30.0,
        }
    }

    /// Advance one frame. Returns false once the petal is dead.
    pub fn step(&mut self) -> bool {
        self.x += self.vx + self.rot.to_radians().sin() * 0.05;
        self.y += self.vy;
        self.rot += self.rot_v;
        self.life -= 1.0 / self.max_life;
        self.life > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_falls_downward() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..50 {
            let p = Particle::spawn(10.0, 5.0, &mut rng);
            assert!(p.vy > 0.0, "petals must fall, got vy={}", p.vy);
            assert!((p.life - 1.0).abs() < f32::EPSILON);
            assert!(p.max_life >= 45.0 && p.max_life < 75.0);
        }
    }

    #[test]
    fn test_step_decays_life_to_death() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut p = Particle::spawn(0.0, 0.0, &mut rng);
        let expected_frames = p.max_life.ceil() as usize;
        let mut frames = 0;
        while p.step() {
            frames += 1;
            assert!(frames <= expected_frames + 1, "petal outlived its lifetime");
        }
        // Dead exactly the frame accumulated life crosses zero.
        assert!(p.life <= 0.0);
        assert!(frames >= expected_frames - 1);
    }
}
