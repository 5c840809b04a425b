use crate::store::Store;
use crate::store::sessions::Activity;
use chrono::{DateTime, Utc};
use log::warn;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct ActiveSession {
    activity: Activity,
    resource_name: Option<String>,
    started_at: DateTime<Utc>,
}

/// At most one open activity timer per tracker.
///
/// Explicit state machine: idle until `start`, active until `end` or the next
/// `start` (which flushes the previous interval first). Dropping an active
/// tracker flushes too, so abandoning a page never loses the open timer.
pub struct SessionTracker {
    store: Arc<Store>,
    user_id: String,
    active: Option<ActiveSession>,
}

impl SessionTracker {
    pub fn new(store: Arc<Store>, user_id: &str) -> Self {
        Self {
            store,
            user_id: user_id.to_string(),
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Opens a timer for the given activity, ending any previous one first
    pub fn start(&mut self, activity: Activity, resource_name: Option<&str>) -> rusqlite::Result<()> {
        self.flush()?;
        self.active = Some(ActiveSession {
            activity,
            resource_name: resource_name.map(str::to_string),
            started_at: self.store.current_time(),
        });
        Ok(())
    }

    /// Ends the open timer, persisting the interval; returns the session id
    pub fn end(&mut self) -> rusqlite::Result<Option<i64>> {
        let Some(active) = self.active.take() else {
            return Ok(None);
        };

        let ended_at = self.store.current_time();
        let session_id = self.store.record_session(
            &self.user_id,
            active.activity,
            active.resource_name.as_deref(),
            active.started_at,
            ended_at,
        )?;
        Ok(Some(session_id))
    }

    fn flush(&mut self) -> rusqlite::Result<()> {
        self.end().map(|_| ())
    }
}

impl Drop for SessionTracker {
    fn drop(&mut self) {
        if self.active.is_some() {
            if let Err(e) = self.flush() {
                warn!("failed to flush open study session on teardown: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_store() -> Arc<Store> {
        Arc::new(Store::new(":memory:").unwrap())
    }

    #[test]
    fn test_tracker_starts_idle() {
        let tracker = SessionTracker::new(create_store(), "alice");
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_end_without_start_is_noop() {
        let mut tracker = SessionTracker::new(create_store(), "alice");
        assert_eq!(tracker.end().unwrap(), None);
    }

    #[test]
    fn test_start_then_end_records_session() {
        let store = create_store();
        let mut tracker = SessionTracker::new(store.clone(), "alice");

        tracker.start(Activity::Review, Some("Biology Flashcards")).unwrap();
        assert!(tracker.is_active());

        let session_id = tracker.end().unwrap();
        assert!(session_id.is_some());
        assert!(!tracker.is_active());
        assert_eq!(store.count_sessions("alice").unwrap(), 1);
    }

    #[test]
    fn test_start_flushes_previous_session() {
        let store = create_store();
        let mut tracker = SessionTracker::new(store.clone(), "alice");

        tracker.start(Activity::Quiz, Some("Quiz A")).unwrap();
        tracker.start(Activity::Review, Some("Quiz A results")).unwrap();

        // The first timer was closed by the second start
        assert_eq!(store.count_sessions("alice").unwrap(), 1);

        tracker.end().unwrap();
        assert_eq!(store.count_sessions("alice").unwrap(), 2);
    }

    #[test]
    fn test_drop_flushes_open_session() {
        let store = create_store();
        {
            let mut tracker = SessionTracker::new(store.clone(), "alice");
            tracker.start(Activity::Upload, Some("notes.pdf")).unwrap();
        }
        assert_eq!(store.count_sessions("alice").unwrap(), 1);
    }
}
