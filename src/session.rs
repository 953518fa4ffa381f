//! Page-lifetime session state.
//!
//! Holds the page start instant and the interaction counters. One instance is
//! created at mount and shared (via `Rc`) between the DOM listeners that bump
//! the counters and the submitter that reads them once.

use std::cell::Cell;

use serde::Serialize;
use web_time::Instant;

/// Behavioral telemetry attached to the fingerprint at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorMetrics {
    /// Seconds since the session started.
    pub time_on_page: f64,
    pub mouse_movements: u32,
    pub clicks: u32,
}

/// Session counters. Single-threaded: only touched from event-loop callbacks.
#[derive(Debug)]
pub struct SessionState {
    started_at: Instant,
    mouse_movements: Cell<u32>,
    clicks: Cell<u32>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    pub fn started_at(started_at: Instant) -> Self {
        Self {
            started_at,
            mouse_movements: Cell::new(0),
            clicks: Cell::new(0),
        }
    }

    pub fn record_mouse_move(&self) {
        self.mouse_movements.set(self.mouse_movements.get().saturating_add(1));
    }

    pub fn record_click(&self) {
        self.clicks.set(self.clicks.get().saturating_add(1));
    }

    pub fn mouse_movements(&self) -> u32 {
        self.mouse_movements.get()
    }

    pub fn clicks(&self) -> u32 {
        self.clicks.get()
    }

    /// Elapsed seconds at `now`; never negative.
    pub fn elapsed_secs_at(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.started_at).as_secs_f64()
    }

    /// Read the counters and elapsed time as of `now`.
    pub fn snapshot_at(&self, now: Instant) -> BehaviorMetrics {
        BehaviorMetrics {
            time_on_page: self.elapsed_secs_at(now),
            mouse_movements: self.mouse_movements(),
            clicks: self.clicks(),
        }
    }

    pub fn snapshot(&self) -> BehaviorMetrics {
        self.snapshot_at(Instant::now())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_counts_match_events() {
        let session = SessionState::new();
        for _ in 0..37 {
            session.record_mouse_move();
        }
        for _ in 0..5 {
            session.record_click();
        }
        let metrics = session.snapshot();
        assert_eq!(metrics.mouse_movements, 37);
        assert_eq!(metrics.clicks, 5);
    }

    #[test]
    fn test_fresh_session_is_zeroed() {
        let metrics = SessionState::new().snapshot();
        assert_eq!(metrics.mouse_movements, 0);
        assert_eq!(metrics.clicks, 0);
        assert!(metrics.time_on_page >= 0.0);
    }

    #[test]
    fn test_elapsed_tracks_clock() {
        let start = Instant::now();
        let session = SessionState::started_at(start);
        let early = session.snapshot_at(start + Duration::from_millis(1500));
        let late = session.snapshot_at(start + Duration::from_secs(4));
        assert!((early.time_on_page - 1.5).abs() < 1e-9);
        assert!((late.time_on_page - 4.0).abs() < 1e-9);
        assert!(late.time_on_page >= early.time_on_page);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let now = Instant::now();
        let session = SessionState::started_at(now + Duration::from_secs(10));
        assert_eq!(session.elapsed_secs_at(now), 0.0);
    }

    #[test]
    fn test_metrics_wire_names() {
        let metrics = BehaviorMetrics { time_on_page: 2.5, mouse_movements: 3, clicks: 1 };
        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(json["timeOnPage"], 2.5);
        assert_eq!(json["mouseMovements"], 3);
        assert_eq!(json["clicks"], 1);
    }
}
