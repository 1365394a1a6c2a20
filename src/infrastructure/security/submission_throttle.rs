//! Sliding-window submission throttle.
//!
//! Process-local and non-persistent on purpose: it resets with the app
//! and is not shared across devices. A client-side abuse deterrent, not
//! a security boundary. Each session owns exactly one instance; the
//! record list is mutated synchronously and must not be shared between
//! concurrent callers expecting independent accounting.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::debug;

use crate::config::GovernanceConfig;
use crate::domain::shared::clock::Clock;

/// Submission kinds throttled independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Event,
    Comment,
}

#[derive(Debug, Clone)]
struct SubmissionRecord {
    timestamp: DateTime<Utc>,
    kind: SubmissionKind,
}

/// Counts accepted submissions per kind over a rolling window.
///
/// Checking and recording are separate on purpose: callers call
/// [`can_submit`](Self::can_submit) first and record only attempts that
/// were actually accepted.
pub struct SubmissionThrottle {
    window: Duration,
    cap: usize,
    clock: Arc<dyn Clock>,
    records: Vec<SubmissionRecord>,
}

impl SubmissionThrottle {
    pub fn new(cap: usize, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            window,
            cap,
            clock,
            records: Vec::new(),
        }
    }

    pub fn from_config(config: &GovernanceConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            config.throttle_max_per_kind,
            Duration::minutes(config.throttle_window_minutes),
            clock,
        )
    }

    /// Whether another submission of `kind` fits in the current window.
    pub fn can_submit(&mut self, kind: SubmissionKind) -> bool {
        self.purge_expired();
        let used = self.count(kind);
        let allowed = used < self.cap;
        if !allowed {
            debug!(?kind, used, cap = self.cap, "submission throttled");
        }
        allowed
    }

    /// Record one accepted submission. Never called implicitly by
    /// [`can_submit`](Self::can_submit).
    pub fn record_submission(&mut self, kind: SubmissionKind) {
        self.records.push(SubmissionRecord {
            timestamp: self.clock.now(),
            kind,
        });
    }

    /// How many more submissions of `kind` the window still allows.
    pub fn get_remaining_submissions(&mut self, kind: SubmissionKind) -> usize {
        self.purge_expired();
        self.cap.saturating_sub(self.count(kind))
    }

    /// Time until the single oldest record, across all kinds, falls out
    /// of the window. Zero when no records exist.
    pub fn get_time_until_reset(&mut self) -> Duration {
        self.purge_expired();
        let now = self.clock.now();
        self.records
            .iter()
            .map(|r| r.timestamp)
            .min()
            .map(|oldest| (oldest + self.window - now).max(Duration::zero()))
            .unwrap_or_else(Duration::zero)
    }

    fn purge_expired(&mut self) {
        let cutoff = self.clock.now() - self.window;
        self.records.retain(|r| r.timestamp > cutoff);
    }

    fn count(&self, kind: SubmissionKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::clock::ManualClock;

    fn throttle_with_clock() -> (SubmissionThrottle, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let throttle = SubmissionThrottle::new(5, Duration::minutes(10), clock.clone());
        (throttle, clock)
    }

    #[test]
    fn sixth_submission_of_a_kind_is_denied() {
        let (mut throttle, _clock) = throttle_with_clock();
        for _ in 0..5 {
            assert!(throttle.can_submit(SubmissionKind::Event));
            throttle.record_submission(SubmissionKind::Event);
        }
        assert!(!throttle.can_submit(SubmissionKind::Event));
        assert_eq!(throttle.get_remaining_submissions(SubmissionKind::Event), 0);
    }

    #[test]
    fn kinds_are_counted_independently() {
        let (mut throttle, _clock) = throttle_with_clock();
        for _ in 0..5 {
            throttle.record_submission(SubmissionKind::Event);
        }
        assert!(!throttle.can_submit(SubmissionKind::Event));
        assert!(throttle.can_submit(SubmissionKind::Comment));
        assert_eq!(
            throttle.get_remaining_submissions(SubmissionKind::Comment),
            5
        );
    }

    #[test]
    fn window_expiry_restores_the_full_cap() {
        let (mut throttle, clock) = throttle_with_clock();
        for _ in 0..5 {
            throttle.record_submission(SubmissionKind::Event);
        }
        assert!(!throttle.can_submit(SubmissionKind::Event));

        clock.advance(Duration::minutes(11));
        assert!(throttle.can_submit(SubmissionKind::Event));
        assert_eq!(throttle.get_remaining_submissions(SubmissionKind::Event), 5);
    }

    #[test]
    fn checking_never_consumes_budget() {
        let (mut throttle, _clock) = throttle_with_clock();
        for _ in 0..10 {
            assert!(throttle.can_submit(SubmissionKind::Comment));
        }
        assert_eq!(
            throttle.get_remaining_submissions(SubmissionKind::Comment),
            5
        );
    }

    #[test]
    fn from_config_applies_cap_and_window() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let config = GovernanceConfig {
            throttle_window_minutes: 1,
            throttle_max_per_kind: 2,
            extra_blocked_keywords: vec![],
        };
        let mut throttle = SubmissionThrottle::from_config(&config, clock.clone());

        throttle.record_submission(SubmissionKind::Comment);
        throttle.record_submission(SubmissionKind::Comment);
        assert!(!throttle.can_submit(SubmissionKind::Comment));

        clock.advance(Duration::minutes(2));
        assert!(throttle.can_submit(SubmissionKind::Comment));
    }

    #[test]
    fn reset_time_tracks_the_oldest_record_across_kinds() {
        let (mut throttle, clock) = throttle_with_clock();
        assert_eq!(throttle.get_time_until_reset(), Duration::zero());

        throttle.record_submission(SubmissionKind::Event);
        clock.advance(Duration::minutes(4));
        throttle.record_submission(SubmissionKind::Comment);

        // Oldest record is the event from 4 minutes ago.
        assert_eq!(throttle.get_time_until_reset(), Duration::minutes(6));

        clock.advance(Duration::minutes(7));
        assert_eq!(throttle.get_time_until_reset(), Duration::minutes(3));
    }
}
