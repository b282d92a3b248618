//! Cache/remote reconciliation for one player session.

use std::collections::BTreeSet;

use chrono::Utc;

use crate::events::{dispatch, AccessEvent};
use crate::storage::KeyValueStore;
use crate::CoreError;

use super::authority::CompletionAuthority;
use super::cache::ProgressCache;

/// Reconciliation state of a synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Uninitialized,
    Reconciling,
    Ready,
}

/// Reconciles the local [`ProgressCache`] with a [`CompletionAuthority`]
/// and propagates completion events, for one `(identity, course)` player
/// session.
///
/// Entering the player calls [`reconcile`](Self::reconcile); each natural
/// playback end calls [`complete`](Self::complete). Two synchronizers for
/// the same key may race (fast re-navigation before the first fetch
/// resolves) without locking: the merge is a set union, so whichever
/// reconciliation lands last still writes a correct superset, and a
/// late-arriving response after navigation-away is harmless.
pub struct ProgressSynchronizer<S: KeyValueStore, A: CompletionAuthority> {
    cache: ProgressCache<S>,
    authority: A,
    identity_id: String,
    course_id: String,
    state: SyncState,
}

impl<S: KeyValueStore, A: CompletionAuthority> ProgressSynchronizer<S, A> {
    pub fn new(
        cache: ProgressCache<S>,
        authority: A,
        identity_id: impl Into<String>,
        course_id: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            authority,
            identity_id: identity_id.into(),
            course_id: course_id.into(),
            state: SyncState::Uninitialized,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Returns the completion set currently visible to the UI.
    pub fn completed(&self) -> BTreeSet<String> {
        self.cache.read(&self.identity_id, &self.course_id)
    }

    /// Merges the remote completion record into the local cache.
    ///
    /// On fetch success the cache/remote union is written back into the
    /// cache (read-repair) and returned. On failure the local cache becomes
    /// the sole source of truth for this session: the prior cached set is
    /// returned unchanged, nothing is retried mid-session, and no error
    /// reaches the caller.
    ///
    /// Safe to invoke repeatedly, including from a double-invoked lifecycle
    /// hook: union is commutative and idempotent.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "reconcile_progress", skip(self), fields(course_id = %self.course_id))
    )]
    pub async fn reconcile(&mut self) -> BTreeSet<String> {
        self.state = SyncState::Reconciling;

        let visible = match self
            .authority
            .fetch_completion(&self.identity_id, &self.course_id)
            .await
        {
            Ok(remote) => {
                match self.cache.merge_in(&self.identity_id, &self.course_id, &remote) {
                    Ok(merged) => {
                        dispatch(AccessEvent::ProgressReconciled {
                            identity_id: self.identity_id.clone(),
                            course_id: self.course_id.clone(),
                            completed_count: merged.len(),
                            at: Utc::now(),
                        })
                        .await;
                        merged
                    }
                    Err(e) => {
                        // cache write failed; still serve the in-memory union
                        log::warn!(
                            target: "coursebound::progress",
                            "msg=\"completion read-repair failed\" course_id={} error=\"{e}\"",
                            self.course_id
                        );
                        super::merge_completed(&remote, &self.completed())
                    }
                }
            }
            Err(e) => {
                log::warn!(
                    target: "coursebound::progress",
                    "msg=\"remote completion fetch failed, serving local cache\" course_id={} error=\"{e}\"",
                    self.course_id
                );
                dispatch(AccessEvent::ReconcileFailed {
                    identity_id: self.identity_id.clone(),
                    course_id: self.course_id.clone(),
                    reason: e.to_string(),
                    at: Utc::now(),
                })
                .await;
                self.completed()
            }
        };

        self.state = SyncState::Ready;
        visible
    }

    /// Handles a completion event from the playback component.
    ///
    /// The local cache is updated synchronously first, so the "completed"
    /// indicator is correct regardless of network state; the remote push is
    /// best-effort and its outcome never mutates local state (no rollback
    /// on failure, no re-apply on success).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "complete_video", skip(self), fields(course_id = %self.course_id))
    )]
    pub async fn complete(&self, video_id: &str) -> Result<(), CoreError> {
        self.cache
            .mark_one(&self.identity_id, &self.course_id, video_id)?;

        dispatch(AccessEvent::VideoCompleted {
            identity_id: self.identity_id.clone(),
            course_id: self.course_id.clone(),
            video_id: video_id.to_owned(),
            at: Utc::now(),
        })
        .await;

        if let Err(e) = self
            .authority
            .mark_completed(&self.identity_id, &self.course_id, video_id)
            .await
        {
            log::warn!(
                target: "coursebound::progress",
                "msg=\"remote completion push failed, keeping local record\" video_id={video_id} error=\"{e}\""
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::MemoryStore;

    use super::super::authority_mock::MockCompletionAuthority;
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn synchronizer(
        store: &MemoryStore,
        authority: &MockCompletionAuthority,
    ) -> ProgressSynchronizer<MemoryStore, MockCompletionAuthority> {
        ProgressSynchronizer::new(
            ProgressCache::new(store.clone()),
            authority.clone(),
            "u1",
            "7",
        )
    }

    #[tokio::test]
    async fn test_reconcile_merges_remote_and_cache() {
        let store = MemoryStore::new();
        let cache = ProgressCache::new(store.clone());
        cache.write("u1", "7", &set(&["v1", "v2"])).unwrap();

        let authority = MockCompletionAuthority::new();
        authority.seed("u1", "7", &["v2", "v3"]);

        let mut sync = synchronizer(&store, &authority);
        assert_eq!(sync.state(), SyncState::Uninitialized);

        let visible = sync.reconcile().await;

        assert_eq!(visible, set(&["v1", "v2", "v3"]));
        assert_eq!(sync.state(), SyncState::Ready);
        // read-repair: the union is now in the local cache
        assert_eq!(cache.read("u1", "7"), visible);
    }

    #[tokio::test]
    async fn test_reconcile_failure_serves_cache_unchanged() {
        let store = MemoryStore::new();
        let cache = ProgressCache::new(store.clone());
        cache.write("u1", "7", &set(&["v1"])).unwrap();

        let authority = MockCompletionAuthority::new();
        authority.seed("u1", "7", &["v9"]);
        authority.set_unavailable();

        let mut sync = synchronizer(&store, &authority);
        let visible = sync.reconcile().await;

        assert_eq!(visible, set(&["v1"]));
        assert_eq!(sync.state(), SyncState::Ready);
        assert_eq!(cache.read("u1", "7"), set(&["v1"]));
    }

    #[tokio::test]
    async fn test_reconcile_is_repeatable() {
        let store = MemoryStore::new();
        let authority = MockCompletionAuthority::new();
        authority.seed("u1", "7", &["v1"]);

        let mut sync = synchronizer(&store, &authority);

        let first = sync.reconcile().await;
        // double-invoked lifecycle hook
        let second = sync.reconcile().await;

        assert_eq!(first, second);
        assert_eq!(second, set(&["v1"]));
    }

    #[tokio::test]
    async fn test_interleaved_reconciliations_produce_superset() {
        let store = MemoryStore::new();
        let cache = ProgressCache::new(store.clone());
        cache.write("u1", "7", &set(&["local"])).unwrap();

        let authority = MockCompletionAuthority::new();
        authority.seed("u1", "7", &["remote"]);

        // two synchronizers racing over the same key, as triggered by a
        // fast re-navigation before the first fetch resolves
        let mut first = synchronizer(&store, &authority);
        let mut second = synchronizer(&store, &authority);

        first.reconcile().await;
        let visible = second.reconcile().await;

        assert_eq!(visible, set(&["local", "remote"]));
        assert_eq!(cache.read("u1", "7"), visible);
    }

    #[tokio::test]
    async fn test_complete_updates_cache_and_remote() {
        let store = MemoryStore::new();
        let authority = MockCompletionAuthority::new();

        let sync = synchronizer(&store, &authority);
        sync.complete("v1").await.unwrap();

        assert_eq!(sync.completed(), set(&["v1"]));
        assert!(authority.canonical("u1", "7").contains("v1"));
    }

    #[tokio::test]
    async fn test_complete_survives_remote_failure() {
        let store = MemoryStore::new();
        let authority = MockCompletionAuthority::new();
        authority.set_unavailable();

        let sync = synchronizer(&store, &authority);
        sync.complete("v1").await.unwrap();

        // local record stands; remote got nothing
        assert_eq!(sync.completed(), set(&["v1"]));
        assert!(authority.canonical("u1", "7").is_empty());
    }

    #[tokio::test]
    async fn test_complete_is_idempotent() {
        let store = MemoryStore::new();
        let authority = MockCompletionAuthority::new();

        let sync = synchronizer(&store, &authority);
        sync.complete("v1").await.unwrap();
        sync.complete("v1").await.unwrap();

        assert_eq!(sync.completed().len(), 1);
        assert_eq!(authority.canonical("u1", "7").len(), 1);
    }

    #[tokio::test]
    async fn test_late_arriving_reconcile_after_local_progress() {
        let store = MemoryStore::new();
        let authority = MockCompletionAuthority::new();
        authority.seed("u1", "7", &["v1"]);

        let mut sync = synchronizer(&store, &authority);

        // completion lands while a reconcile would still be in flight
        sync.complete("v2").await.unwrap();
        let visible = sync.reconcile().await;

        assert_eq!(visible, set(&["v1", "v2"]));
    }
}
