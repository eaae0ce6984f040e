//! Bounded activity log.
//!
//! Most-recent-first ring of the last 50 activities. Eviction is purely
//! positional, the oldest entry goes regardless of its kind.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::models::{Activity, NewActivity};

use super::StoreError;

/// Maximum number of retained activities.
pub const ACTIVITY_LOG_CAPACITY: usize = 50;

/// Append-only log behind a `Mutex`, newest entry at the front.
pub struct ActivityLog {
    entries: Mutex<VecDeque<Activity>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
        }
    }

    /// Stamp the input, prepend it, and drop anything past capacity.
    pub fn append(&self, input: NewActivity) -> Result<Activity, StoreError> {
        let activity = Activity::record(input);
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        entries.push_front(activity.clone());
        entries.truncate(ACTIVITY_LOG_CAPACITY);
        tracing::debug!(kind = %activity.kind, document = %activity.document, "Activity recorded");
        Ok(activity)
    }

    /// All retained entries, most recent first.
    pub fn list(&self) -> Result<Vec<Activity>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.iter().cloned().collect())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Swap in a full entry set (blob hydration, clear). The input is
    /// expected most-recent-first and is truncated to capacity.
    pub fn replace(&self, entries: Vec<Activity>) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        *guard = entries.into_iter().take(ACTIVITY_LOG_CAPACITY).collect();
        Ok(())
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityKind;

    fn input(kind: ActivityKind, action: &str) -> NewActivity {
        NewActivity {
            kind,
            user: "demo".to_string(),
            action: action.to_string(),
            document: "notes.txt".to_string(),
        }
    }

    #[test]
    fn append_returns_stamped_entry() {
        let log = ActivityLog::new();
        let activity = log.append(input(ActivityKind::Upload, "Uploaded notes.txt")).unwrap();
        assert_eq!(activity.kind, ActivityKind::Upload);
        assert!(!activity.time.is_empty());
        assert_eq!(log.len().unwrap(), 1);
    }

    #[test]
    fn list_is_most_recent_first() {
        let log = ActivityLog::new();
        log.append(input(ActivityKind::Upload, "first")).unwrap();
        log.append(input(ActivityKind::Query, "second")).unwrap();
        log.append(input(ActivityKind::Search, "third")).unwrap();
        let listed = log.list().unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].action, "third");
        assert_eq!(listed[1].action, "second");
        assert_eq!(listed[2].action, "first");
    }

    #[test]
    fn capacity_holds_after_many_appends() {
        let log = ActivityLog::new();
        for i in 0..1000 {
            log.append(input(ActivityKind::Processing, &format!("event {i}"))).unwrap();
        }
        let listed = log.list().unwrap();
        assert_eq!(listed.len(), ACTIVITY_LOG_CAPACITY);
        // The newest 50 survive, newest first
        assert_eq!(listed[0].action, "event 999");
        assert_eq!(listed[49].action, "event 950");
    }

    #[test]
    fn eviction_ignores_kind() {
        let log = ActivityLog::new();
        log.append(input(ActivityKind::Upload, "keep me")).unwrap();
        for i in 0..ACTIVITY_LOG_CAPACITY {
            log.append(input(ActivityKind::Processing, &format!("filler {i}"))).unwrap();
        }
        let listed = log.list().unwrap();
        assert_eq!(listed.len(), ACTIVITY_LOG_CAPACITY);
        // The lone upload was oldest, so it went first
        assert!(listed.iter().all(|a| a.kind == ActivityKind::Processing));
    }

    #[test]
    fn replace_truncates_to_capacity() {
        let log = ActivityLog::new();
        let entries: Vec<Activity> = (0..80)
            .map(|i| Activity::record(input(ActivityKind::Search, &format!("seed {i}"))))
            .collect();
        log.replace(entries).unwrap();
        assert_eq!(log.len().unwrap(), ACTIVITY_LOG_CAPACITY);
        let listed = log.list().unwrap();
        assert_eq!(listed[0].action, "seed 0");
    }

    #[test]
    fn replace_with_empty_clears() {
        let log = ActivityLog::new();
        log.append(input(ActivityKind::Upload, "gone")).unwrap();
        log.replace(Vec::new()).unwrap();
        assert!(log.is_empty().unwrap());
    }

    #[test]
    fn concurrent_appends_respect_capacity() {
        use std::sync::Arc;
        use std::thread;

        let log = Arc::new(ActivityLog::new());
        let mut handles = vec![];
        for t in 0..8 {
            let log = Arc::clone(&log);
            handles.push(thread::spawn(move || {
                for i in 0..25 {
                    log.append(NewActivity {
                        kind: ActivityKind::Processing,
                        user: "demo".to_string(),
                        action: format!("thread {t} event {i}"),
                        document: "batch.pdf".to_string(),
                    })
                    .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(log.len().unwrap(), ACTIVITY_LOG_CAPACITY);
    }
}
