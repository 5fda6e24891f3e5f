//! Deadline arena for animation timers.

/// Every timer an animation instance schedules, in one place.
///
/// Instances own their set, so a retarget or teardown is a single
/// `cancel_all` call and no timer can outlive its owner. `drain_due`
/// returns events in deadline order; entries sharing a deadline come
/// back in the order they were scheduled.
#[derive(Debug)]
pub struct TimerSet<E> {
    entries: Vec<Entry<E>>,
    seq: u64,
}

#[derive(Debug)]
struct Entry<E> {
    fire_at: u64,
    seq: u64,
    event: E,
}

impl<E> TimerSet<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            seq: 0,
        }
    }

    /// Schedule `event` to fire at `fire_at_ms` on the animation clock.
    pub fn schedule(&mut self, fire_at_ms: u64, event: E) {
        self.entries.push(Entry {
            fire_at: fire_at_ms,
            seq: self.seq,
            event,
        });
        self.seq += 1;
    }

    /// Drop every pending timer. Safe to call repeatedly.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.fire_at).min()
    }

    /// Remove and return every event due at `now_ms`, earliest first.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<E> {
        let mut due = Vec::new();
        let mut rest = Vec::new();
        for entry in self.entries.drain(..) {
            if entry.fire_at <= now_ms {
                due.push(entry);
            } else {
                rest.push(entry);
            }
        }
        self.entries = rest;
        due.sort_by_key(|e| (e.fire_at, e.seq));
        due.into_iter().map(|e| e.event).collect()
    }
}

impl<E> Default for TimerSet<E> {
    fn default() -> Self {
        Self::new()
    }
}
