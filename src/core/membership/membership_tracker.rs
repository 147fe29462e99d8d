// Membership tracker - remembers who recently joined the group.
//
// A user who joined within the last 72 hours is considered a "new user"
// and gets stricter moderation. The mapping is the only shared mutable
// state in the whole bot, so it lives behind a DashMap and every
// operation is a single entry-level read or write.
//
// NO GroupMe dependencies here - just pure domain logic.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// How long after joining a user counts as "new".
pub const NEW_USER_WINDOW_HOURS: i64 = 72;

/// Source of the current instant.
///
/// Injected so tests can simulate elapsed time instead of sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system wall clock.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Tracks recent-join timestamps per user.
///
/// Entries are evicted lazily: either on a `is_recent_joiner` lookup that
/// finds the window expired, or explicitly via `forget` after a successful
/// moderation action. There is no background sweep - the map is bounded in
/// practice by group size, and a stale entry sitting between lookups is
/// harmless.
pub struct MembershipTracker<C: Clock> {
    joins: DashMap<String, DateTime<Utc>>,
    window: Duration,
    clock: C,
}

impl<C: Clock> MembershipTracker<C> {
    /// Create a tracker with the default 72-hour window.
    pub fn new(clock: C) -> Self {
        Self::with_window(clock, Duration::hours(NEW_USER_WINDOW_HOURS))
    }

    /// Create a tracker with a custom window.
    pub fn with_window(clock: C, window: Duration) -> Self {
        Self {
            joins: DashMap::new(),
            window,
            clock,
        }
    }

    /// Record that a user just joined. Overwrites any earlier record.
    pub fn record_join(&self, user_id: &str) {
        let now = self.clock.now();
        self.joins.insert(user_id.to_string(), now);
        tracing::info!(user_id, %now, "Recorded group join");
    }

    /// Is this user still inside the new-user window?
    ///
    /// Returns false for unknown users. An expired record is evicted on
    /// the spot, so a later call for the same user stays false until the
    /// next `record_join`.
    pub fn is_recent_joiner(&self, user_id: &str) -> bool {
        let Some(joined_at) = self.joins.get(user_id).map(|entry| *entry.value()) else {
            return false;
        };

        let elapsed = self.clock.now().signed_duration_since(joined_at);
        if elapsed >= self.window {
            self.joins.remove(user_id);
            tracing::debug!(user_id, "Join record expired, evicted");
            return false;
        }

        true
    }

    /// Drop a user's join record if present. Idempotent.
    ///
    /// Called after a successful removal so the user is not re-processed,
    /// and so a later reuse of the same identifier starts clean.
    pub fn forget(&self, user_id: &str) {
        self.joins.remove(user_id);
    }

    /// Number of join records currently held.
    #[allow(dead_code)]
    pub fn tracked_count(&self) -> usize {
        self.joins.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    /// Test clock that only moves when told to.
    #[derive(Clone)]
    pub(crate) struct ManualClock {
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        pub(crate) fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: Arc::new(Mutex::new(start)),
            }
        }

        pub(crate) fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now = *now + by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn t0() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn unknown_user_is_not_recent() {
        let tracker = MembershipTracker::new(ManualClock::new(t0()));
        assert!(!tracker.is_recent_joiner("u1"));
    }

    #[test]
    fn join_is_recent_inside_window() {
        let clock = ManualClock::new(t0());
        let tracker = MembershipTracker::new(clock.clone());

        tracker.record_join("u1");
        assert!(tracker.is_recent_joiner("u1"));

        clock.advance(Duration::hours(71));
        assert!(tracker.is_recent_joiner("u1"));
    }

    #[test]
    fn join_expires_at_window_boundary() {
        let clock = ManualClock::new(t0());
        let tracker = MembershipTracker::new(clock.clone());

        tracker.record_join("u1");
        clock.advance(Duration::hours(72));

        assert!(!tracker.is_recent_joiner("u1"));
        // Record was evicted, so even rolling the clock back changes nothing.
        assert_eq!(tracker.tracked_count(), 0);
        assert!(!tracker.is_recent_joiner("u1"));
    }

    #[test]
    fn rejoin_resets_the_window() {
        let clock = ManualClock::new(t0());
        let tracker = MembershipTracker::new(clock.clone());

        tracker.record_join("u1");
        clock.advance(Duration::hours(73));
        assert!(!tracker.is_recent_joiner("u1"));

        tracker.record_join("u1");
        assert!(tracker.is_recent_joiner("u1"));
    }

    #[test]
    fn forget_always_wins() {
        let clock = ManualClock::new(t0());
        let tracker = MembershipTracker::new(clock.clone());

        tracker.record_join("u1");
        tracker.forget("u1");
        assert!(!tracker.is_recent_joiner("u1"));

        // Forgetting an unknown user is a no-op.
        tracker.forget("nobody");
    }

    #[test]
    fn rejoin_overwrites_older_timestamp() {
        let clock = ManualClock::new(t0());
        let tracker = MembershipTracker::new(clock.clone());

        tracker.record_join("u1");
        clock.advance(Duration::hours(48));
        tracker.record_join("u1");
        clock.advance(Duration::hours(48));

        // 96h after the first join but only 48h after the second.
        assert!(tracker.is_recent_joiner("u1"));
    }
}
