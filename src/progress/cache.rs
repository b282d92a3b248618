//! Local completion cache.

use std::collections::BTreeSet;

use crate::storage::KeyValueStore;
use crate::CoreError;

use super::merge_completed;

/// Per-(identity, course) completed-video sets over a [`KeyValueStore`].
///
/// The cache only ever grows: [`mark_one`](Self::mark_one) is an idempotent
/// insert and [`write`](Self::write) is called only with merged supersets by
/// the synchronizer, never by direct UI mutation.
#[derive(Clone)]
pub struct ProgressCache<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ProgressCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key(identity_id: &str, course_id: &str) -> String {
        format!("completion:{course_id}:{identity_id}")
    }

    /// Returns the locally cached completion set. Absent or corrupt data
    /// yields the empty set.
    pub fn read(&self, identity_id: &str, course_id: &str) -> BTreeSet<String> {
        let Ok(Some(raw)) = self.store.get(&Self::key(identity_id, course_id)) else {
            return BTreeSet::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!(
                target: "coursebound::progress",
                "msg=\"discarding unparsable completion record\" course_id={course_id} error=\"{e}\""
            );
            BTreeSet::new()
        })
    }

    /// Overwrites the cached completion set.
    ///
    /// Merge-only call site: used by reconciliation to write back the
    /// cache/remote union.
    pub fn write(
        &self,
        identity_id: &str,
        course_id: &str,
        completed: &BTreeSet<String>,
    ) -> Result<(), CoreError> {
        let encoded = serde_json::to_string(completed)
            .map_err(|e| CoreError::Storage(format!("Failed to serialize completion: {e}")))?;
        self.store.set(&Self::key(identity_id, course_id), &encoded)
    }

    /// Marks a single video completed. Idempotent.
    pub fn mark_one(
        &self,
        identity_id: &str,
        course_id: &str,
        video_id: &str,
    ) -> Result<(), CoreError> {
        let mut completed = self.read(identity_id, course_id);
        if !completed.insert(video_id.to_owned()) {
            return Ok(());
        }
        self.write(identity_id, course_id, &completed)
    }

    /// Merges `incoming` into the cache and returns the union (read-repair).
    pub fn merge_in(
        &self,
        identity_id: &str,
        course_id: &str,
        incoming: &BTreeSet<String>,
    ) -> Result<BTreeSet<String>, CoreError> {
        let merged = merge_completed(incoming, &self.read(identity_id, course_id));
        self.write(identity_id, course_id, &merged)?;
        Ok(merged)
    }
}
