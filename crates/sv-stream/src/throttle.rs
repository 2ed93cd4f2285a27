//! Notification throttling

use std::time::Duration;

use tokio::time::Instant;

/// Limits notifications to one per interval.
///
/// The first change after a quiet period fires immediately. Changes inside
/// the window leave a single pending notification that [`Throttle::poll`]
/// releases once the window has elapsed.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_fire: Option<Instant>,
    pending: bool,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
            pending: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record a change; returns whether to notify now
    pub fn request(&mut self, now: Instant) -> bool {
        if self.is_open(now) {
            self.fire(now);
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Release a pending notification whose window has elapsed
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.pending && self.is_open(now) {
            self.fire(now);
            true
        } else {
            false
        }
    }

    /// Mark a notification as sent outside the normal flow
    pub fn fire(&mut self, now: Instant) {
        self.last_fire = Some(now);
        self.pending = false;
    }

    /// When a pending notification becomes due
    pub fn deadline(&self) -> Option<Instant> {
        if !self.pending {
            return None;
        }
        Some(self.last_fire.map_or_else(Instant::now, |last| last + self.interval))
    }

    /// When the current window closes, if one has started
    pub fn reopens_at(&self) -> Option<Instant> {
        self.last_fire.map(|last| last + self.interval)
    }

    fn is_open(&self, now: Instant) -> bool {
        match self.last_fire {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        }
    }
}
