//! Trail engine: spawn throttling, per-frame update, marker easing.

use std::collections::VecDeque;

use fishbowl_core::fade;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
};

use crate::particle::Particle;

/// Maximum live petals; the oldest is evicted beyond this.
pub const MAX_PETALS: usize = 18;
/// Squared pointer travel (in cells) required between spawns.
const SPAWN_DIST_SQ: f32 = 9.0;
/// Marker easing factor per frame.
const EASE: f32 = 0.12;
/// Petal and marker color.
const PETAL_COLOR: Color = Color::Rgb(244, 163, 187);
/// Ring marker glyphs.
const RING: char = '○';
const RING_EXPANDED: char = '◎';
/// Dot at the raw pointer position.
const DOT: char = '·';

/// The petal trail and cursor marker.
///
/// The mouse handler only records the raw pointer position via
/// [`pointer_moved`](Self::pointer_moved); spawning, petal motion, life
/// decay and marker easing all happen in the per-frame
/// [`update`](Self::update), so the live set has exactly one writer.
/// Dropping the engine releases everything; there are no detached
/// callbacks to leak.
#[derive(Debug)]
pub struct TrailEngine {
    petals: VecDeque<Particle>,
    /// Raw pointer position; None until the pointer first moves, which
    /// also gates marker visibility.
    pointer: Option<(f32, f32)>,
    /// Eased ring position.
    marker: (f32, f32),
    /// Ring expanded over an interactive zone.
    expanded: bool,
    /// Where the previous petal spawned.
    last_spawn: (f32, f32),
    rng: fastrand::Rng,
}

impl TrailEngine {
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Engine with a caller-supplied generator; tests pass a seeded one.
    pub fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            petals: VecDeque::with_capacity(MAX_PETALS),
            pointer: None,
            marker: (0.0, 0.0),
            expanded: false,
            last_spawn: (0.0, 0.0),
            rng,
        }
    }

    /// Record the raw pointer position. Nothing else moves here; the
    /// next [`update`](Self::update) reacts to it.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.pointer.is_none() {
            // First movement snaps the ring instead of easing it across
            // the whole screen, and anchors the spawn throttle.
            self.marker = (x, y);
            self.last_spawn = (x, y);
        }
        self.pointer = Some((x, y));
    }

    /// Mark whether the pointer is over an interactive zone.
    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    /// Advance one frame: ease the ring toward the raw pointer, spawn a
    /// petal once the pointer has travelled at least `SPAWN_DIST_SQ`
    /// (squared cells, no sqrt) since the previous spawn, and step every
    /// petal, dropping the dead ones.
    pub fn update(&mut self) {
        if let Some((px, py)) = self.pointer {
            self.marker.0 += (px - self.marker.0) * EASE;
            self.marker.1 += (py - self.marker.1) * EASE;

            let (dx, dy) = (px - self.last_spawn.0, py - self.last_spawn.1);
            if dx * dx + dy * dy > SPAWN_DIST_SQ {
                self.spawn(px, py);
                self.last_spawn = (px, py);
            }
        }
        self.petals.retain_mut(Particle::step);
    }

    fn spawn(&mut self, x: f32, y: f32) {
        if self.petals.len() >= MAX_PETALS {
            self.petals.pop_front();
        }
        self.petals.push_back(Particle::spawn(x, y, &mut self.rng));
    }

    pub fn len(&self) -> usize {
        self.petals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.petals.is_empty()
    }

    pub fn petals(&self) -> impl Iterator<Item = &Particle> {
        self.petals.iter()
    }

    pub fn marker(&self) -> (f32, f32) {
        self.marker
    }

    /// Drop all petals. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.petals.clear();
    }

    /// Draw petals and the cursor marker into `buf`. Cells outside `area`
    /// are skipped, so a resize keeps petal state and simply clips what
    /// no longer fits.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        for p in &self.petals {
            let life = p.life.clamp(0.0, 1.0);
            let mut style = Style::new().fg(fade(PETAL_COLOR, 0.3 + life * 0.7));
            if p.size >= 11.5 {
                style = style.add_modifier(Modifier::BOLD);
            } else if p.size < 9.0 {
                style = style.add_modifier(Modifier::DIM);
            }
            put(area, buf, p.x, p.y, p.glyph, style);
        }

        if let Some((px, py)) = self.pointer {
            let ring = if self.expanded { RING_EXPANDED } else { RING };
            let ring_style = Style::new().fg(PETAL_COLOR).add_modifier(Modifier::BOLD);
            put(area, buf, self.marker.0, self.marker.1, ring, ring_style);
            if !self.expanded {
                put(area, buf, px, py, DOT, Style::new().fg(PETAL_COLOR));
            }
        }
    }
}

impl Default for TrailEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Write one glyph at fractional cell coordinates, clipped to `area`.
fn put(area: Rect, buf: &mut Buffer, x: f32, y: f32, glyph: char, style: Style) {
    let (cx, cy) = (x.round(), y.round());
    if cx < 0.0 || cy < 0.0 || cx > u16::MAX as f32 || cy > u16::MAX as f32 {
        return;
    }
    let pos = Position::new(cx as u16, cy as u16);
    if !area.contains(pos) {
        return;
    }
    if let Some(cell) = buf.cell_mut(pos) {
        cell.set_char(glyph);
        cell.set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TrailEngine {
        TrailEngine::with_rng(fastrand::Rng::with_seed(42))
    }

    #[test]
    fn test_pointer_moved_records_without_spawning() {
        let mut trail = engine();
        trail.pointer_moved(10.0, 10.0);
        trail.pointer_moved(100.0, 100.0);
        // Only the frame update spawns.
        assert!(trail.is_empty());
    }

    #[test]
    fn test_spawn_requires_squared_distance() {
        let mut trail = engine();
        trail.pointer_moved(10.0, 10.0);
        trail.update();
        assert!(trail.is_empty(), "first move only anchors the throttle");

        // 2 cells of travel: 4 < 9, below the squared threshold.
        trail.pointer_moved(12.0, 10.0);
        trail.update();
        assert!(trail.is_empty());

        // 6 cells from the anchor: 36 > 9.
        trail.pointer_moved(16.0, 10.0);
        trail.update();
        assert_eq!(trail.len(), 1);

        // Jitter around the new anchor stays quiet.
        trail.pointer_moved(16.5, 10.5);
        trail.update();
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_capacity_evicts_oldest_first() {
        let mut trail = engine();
        trail.pointer_moved(0.0, 0.0);
        trail.update();
        // 19 spawns at x = 40, 80, ..., 760; petals drift well under a
        // cell per frame, so spawn positions stay distinguishable.
        for i in 1..=19 {
            trail.pointer_moved(i as f32 * 40.0, 0.0);
            trail.update();
        }
        assert_eq!(trail.len(), MAX_PETALS);
        let xs: Vec<f32> = trail.petals().map(|p| p.x).collect();
        // Spawn #1 (x = 40) is gone; #2 (x = 80) is now the oldest.
        assert!((xs[0] - 80.0).abs() < 20.0, "oldest is spawn #2, got {}", xs[0]);
        assert!((xs[MAX_PETALS - 1] - 760.0).abs() < 20.0);
        assert!(xs.iter().all(|x| (*x - 40.0).abs() > 20.0), "spawn #1 must be evicted");
    }

    #[test]
    fn test_dead_petals_removed_on_update() {
        let mut trail = engine();
        trail.pointer_moved(0.0, 0.0);
        trail.update();
        trail.pointer_moved(40.0, 0.0);
        trail.update();
        assert_eq!(trail.len(), 1);
        let max_life = trail.petals().next().unwrap().max_life.ceil() as usize;
        for _ in 0..max_life + 1 {
            trail.update();
        }
        assert!(trail.is_empty());
    }

    #[test]
    fn test_marker_eases_toward_pointer() {
        let mut trail = engine();
        trail.pointer_moved(0.0, 0.0);
        assert_eq!(trail.marker(), (0.0, 0.0));
        trail.pointer_moved(100.0, 50.0);

        trail.update();
        let (mx, my) = trail.marker();
        assert!((mx - 12.0).abs() < 0.01);
        assert!((my - 6.0).abs() < 0.01);

        // Converges without ever overshooting.
        let mut last = mx;
        for _ in 0..200 {
            trail.update();
            let (x, _) = trail.marker();
            assert!(x >= last && x <= 100.0);
            last = x;
        }
        assert!((last - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_render_clips_offscreen_petals() {
        let mut trail = engine();
        trail.pointer_moved(0.0, 0.0);
        trail.update();
        trail.pointer_moved(40.0, 20.0);
        trail.update();
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        // Petal and marker partly outside the area; nothing panics and
        // only in-area cells are touched.
        trail.render(area, &mut buf);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut trail = engine();
        trail.pointer_moved(0.0, 0.0);
        trail.update();
        trail.pointer_moved(40.0, 0.0);
        trail.update();
        trail.clear();
        trail.clear();
        assert!(trail.is_empty());
        trail.update();
    }
}
