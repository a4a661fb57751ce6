//! Transient toast notifications
//!
//! A single-slot notifier: at most one notification is held at any time, and
//! showing a new one drops the previous one immediately. Each notification
//! walks through `Entering -> Visible -> Leaving -> removed`, driven by
//! deferred jobs on a [`Scheduler`].

mod scheduler;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

#[cfg(test)]
pub use scheduler::ManualScheduler;
pub use scheduler::{Job, Scheduler, TokioScheduler};

/// Notification kind, used for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Lifecycle phase of the held notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Inserted but still transparent, waiting for the enter delay
    Entering,
    Visible,
    /// Fading out, removed after the exit delay
    Leaving,
}

/// Identifier of a single `notify` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

/// Snapshot of a notification held by the notifier
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub phase: Phase,
    /// When the current phase started (for rendering transitions)
    pub phase_since: Instant,
}

impl Notification {
    /// Opacity for rendering, ramped over `transition` after each phase change
    pub fn opacity(&self, now: Instant, transition: Duration) -> f32 {
        let progress = if transition.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(self.phase_since).as_secs_f32()
                / transition.as_secs_f32())
            .clamp(0.0, 1.0)
        };

        match self.phase {
            Phase::Entering => 0.0,
            Phase::Visible => progress,
            Phase::Leaving => 1.0 - progress,
        }
    }
}

/// Delays between lifecycle steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifierTimings {
    /// Insert -> visible (lets the enter transition engage)
    pub enter_delay: Duration,
    /// Insert -> leaving
    pub display: Duration,
    /// Leaving -> removed (matches the exit transition)
    pub exit: Duration,
}

impl Default for NotifierTimings {
    fn default() -> Self {
        Self {
            enter_delay: Duration::from_millis(10),
            display: Duration::from_millis(3000),
            exit: Duration::from_millis(300),
        }
    }
}

struct Slot {
    current: Option<Notification>,
}

struct Inner {
    slot: Mutex<Slot>,
    next_id: AtomicU64,
    timings: NotifierTimings,
}

/// Single-slot notifier
///
/// Cloning is cheap and every clone addresses the same slot.
pub struct Notifier<S: Scheduler> {
    inner: Arc<Inner>,
    scheduler: S,
}

impl<S: Scheduler> Clone for Notifier<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<S: Scheduler> std::fmt::Debug for Notifier<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("current", &self.current().map(|n| n.id))
            .field("timings", &self.inner.timings)
            .finish()
    }
}

impl<S: Scheduler> Notifier<S> {
    pub fn new(scheduler: S) -> Self {
        Self::with_timings(scheduler, NotifierTimings::default())
    }

    pub fn with_timings(scheduler: S, timings: NotifierTimings) -> Self {
        Self {
            inner: Arc::new(Inner {
                slot: Mutex::new(Slot { current: None }),
                next_id: AtomicU64::new(1),
                timings,
            }),
            scheduler,
        }
    }

    pub fn timings(&self) -> NotifierTimings {
        self.inner.timings
    }

    /// Show `message`, replacing whatever is currently shown
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let id = NotificationId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let notification = Notification {
            id,
            message: message.into(),
            kind,
            phase: Phase::Entering,
            phase_since: Instant::now(),
        };

        tracing::debug!("Notification {:?} ({:?}): {}", id, kind, notification.message);

        if let Some(previous) = self.inner.slot.lock().current.replace(notification) {
            tracing::debug!("Notification {:?} superseded by {:?}", previous.id, id);
        }

        let timings = self.inner.timings;
        let weak = Arc::downgrade(&self.inner);
        self.scheduler.schedule(
            timings.enter_delay,
            Box::new(move || {
                transition(&weak, id, Phase::Entering, Phase::Visible);
            }),
        );

        let weak = Arc::downgrade(&self.inner);
        let scheduler = self.scheduler.clone();
        self.scheduler.schedule(
            timings.display,
            Box::new(move || {
                let leaving = transition(&weak, id, Phase::Visible, Phase::Leaving)
                    || transition(&weak, id, Phase::Entering, Phase::Leaving);
                if leaving {
                    scheduler.schedule(
                        timings.exit,
                        Box::new(move || {
                            remove(&weak, id);
                        }),
                    );
                }
            }),
        );

        id
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, NotificationKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, NotificationKind::Error)
    }

    /// Remove the current notification without a transition
    pub fn dismiss(&self) {
        if let Some(previous) = self.inner.slot.lock().current.take() {
            tracing::debug!("Notification {:?} dismissed", previous.id);
        }
    }

    /// Snapshot of the held notification
    pub fn current(&self) -> Option<Notification> {
        self.inner.slot.lock().current.clone()
    }

    /// Whether a notification is held (in any phase)
    pub fn is_active(&self) -> bool {
        self.inner.slot.lock().current.is_some()
    }
}

/// Move notification `id` from `from` to `to`; no-op if it was superseded
fn transition(inner: &Weak<Inner>, id: NotificationId, from: Phase, to: Phase) -> bool {
    let Some(inner) = inner.upgrade() else {
        return false;
    };
    let mut slot = inner.slot.lock();
    match slot.current.as_mut() {
        Some(current) if current.id == id && current.phase == from => {
            current.phase = to;
            current.phase_since = Instant::now();
            true
        }
        _ => false,
    }
}

fn remove(inner: &Weak<Inner>, id: NotificationId) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut slot = inner.slot.lock();
    if slot.current.as_ref().map(|n| n.id) == Some(id) {
        slot.current = None;
        tracing::debug!("Notification {:?} removed", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn notifier() -> (Notifier<ManualScheduler>, ManualScheduler) {
        let scheduler = ManualScheduler::new();
        (Notifier::new(scheduler.clone()), scheduler)
    }

    #[test]
    fn test_lifecycle_phases() {
        let (notifier, clock) = notifier();
        notifier.success("Saved");

        let current = notifier.current().unwrap();
        assert_eq!(current.phase, Phase::Entering);
        assert_eq!(current.kind, NotificationKind::Success);

        clock.advance(ms(10));
        assert_eq!(notifier.current().unwrap().phase, Phase::Visible);

        clock.advance(ms(2989));
        assert_eq!(notifier.current().unwrap().phase, Phase::Visible);

        clock.advance(ms(1));
        assert_eq!(notifier.current().unwrap().phase, Phase::Leaving);

        clock.advance(ms(299));
        assert!(notifier.is_active());

        clock.advance(ms(1));
        assert!(notifier.current().is_none());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_new_notification_supersedes_immediately() {
        let (notifier, clock) = notifier();
        let first = notifier.notify("X", NotificationKind::Success);
        let second = notifier.notify("Y", NotificationKind::Error);

        let current = notifier.current().unwrap();
        assert_eq!(current.id, second);
        assert_ne!(current.id, first);
        assert_eq!(current.message, "Y");
        assert_eq!(current.kind, NotificationKind::Error);
        assert_eq!(current.phase, Phase::Entering);

        clock.advance(ms(10));
        assert_eq!(notifier.current().unwrap().message, "Y");
        assert_eq!(notifier.current().unwrap().phase, Phase::Visible);
    }

    #[test]
    fn test_stale_timers_do_not_touch_newer_notification() {
        let (notifier, clock) = notifier();
        notifier.success("first");
        clock.advance(ms(2000));

        // Second one lands while the first is still visible
        notifier.error("second");

        // First notification's hide timer fires at t=3000
        clock.advance(ms(1000));
        let current = notifier.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.phase, Phase::Visible);

        // First notification's removal would have fired at t=3300
        clock.advance(ms(300));
        assert_eq!(notifier.current().unwrap().message, "second");

        // Second one leaves at t=5000 and is gone at t=5300
        clock.advance(ms(1700));
        assert_eq!(notifier.current().unwrap().phase, Phase::Leaving);
        clock.advance(ms(300));
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_at_most_one_notification_over_any_sequence() {
        let (notifier, clock) = notifier();
        let mut shown = Vec::new();

        for i in 0..20u64 {
            let kind = if i % 3 == 0 {
                NotificationKind::Error
            } else {
                NotificationKind::Success
            };
            shown.push(notifier.notify(format!("message {}", i), kind));
            clock.advance(ms(i * 137 % 3500));

            // The slot only ever holds the most recent notification (or nothing)
            if let Some(current) = notifier.current() {
                assert_eq!(Some(&current.id), shown.last());
            }
        }

        clock.advance(ms(10_000));
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_dismiss_makes_pending_timers_noops() {
        let (notifier, clock) = notifier();
        notifier.success("bye");
        notifier.dismiss();
        assert!(!notifier.is_active());

        clock.advance(ms(5000));
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_custom_timings() {
        let scheduler = ManualScheduler::new();
        let notifier = Notifier::with_timings(
            scheduler.clone(),
            NotifierTimings {
                enter_delay: ms(0),
                display: ms(100),
                exit: ms(50),
            },
        );
        notifier.success("quick");

        scheduler.advance(ms(0));
        assert_eq!(notifier.current().unwrap().phase, Phase::Visible);
        scheduler.advance(ms(150));
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_opacity_follows_phase() {
        let now = Instant::now();
        let transition = ms(300);
        let mut notification = Notification {
            id: NotificationId(1),
            message: "x".to_string(),
            kind: NotificationKind::Success,
            phase: Phase::Entering,
            phase_since: now,
        };
        assert_eq!(notification.opacity(now + ms(500), transition), 0.0);

        notification.phase = Phase::Visible;
        assert_eq!(notification.opacity(now, transition), 0.0);
        assert!((notification.opacity(now + ms(150), transition) - 0.5).abs() < 0.01);
        assert_eq!(notification.opacity(now + ms(900), transition), 1.0);

        notification.phase = Phase::Leaving;
        assert_eq!(notification.opacity(now, transition), 1.0);
        assert_eq!(notification.opacity(now + ms(300), transition), 0.0);
    }
}
