//! Remote completion authority trait.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::CoreError;

/// The remote, canonical source of completion records.
///
/// Implementations wrap whatever transport the application uses; this core
/// only assumes "attempt a call; it resolves or fails". No ordering
/// guarantee is assumed between the two calls across sessions.
///
/// Failures are expected and recoverable: the synchronizer falls back to the
/// local cache and never propagates an authority error to the player.
#[async_trait]
pub trait CompletionAuthority: Send + Sync {
    /// Fetches the canonical completion set for an identity and course.
    async fn fetch_completion(
        &self,
        identity_id: &str,
        course_id: &str,
    ) -> Result<BTreeSet<String>, CoreError>;

    /// Records one completed video with the authority.
    ///
    /// Expected to be idempotent on the remote side: reporting the same
    /// fact twice must not change the canonical record.
    async fn mark_completed(
        &self,
        identity_id: &str,
        course_id: &str,
        video_id: &str,
    ) -> Result<(), CoreError>;
}
