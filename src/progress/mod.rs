//! Completion records and cache/remote reconciliation.
//!
//! The set of videos an identity has finished within a course lives in two
//! places: a local cache (fast, always available, possibly stale) and a
//! remote authority (canonical, possibly unreachable). The value the UI
//! sees is the union of the two, and [`ProgressSynchronizer`] keeps the
//! cache repaired with that union so later reads don't need the remote side.

mod authority;
mod cache;
mod sync;

#[cfg(any(test, feature = "mocks"))]
mod authority_mock;

pub use authority::CompletionAuthority;
pub use cache::ProgressCache;
pub use sync::{ProgressSynchronizer, SyncState};

#[cfg(any(test, feature = "mocks"))]
pub use authority_mock::MockCompletionAuthority;

use std::collections::BTreeSet;

/// Merges two completion sets.
///
/// Plain set union: commutative and idempotent, so reconciliation can run
/// any number of times, in any interleaving, without losing a completion
/// recorded on either side. No vector clock or timestamp is needed because
/// "completed" is a monotone flag.
pub fn merge_completed(a: &BTreeSet<String>, b: &BTreeSet<String>) -> BTreeSet<String> {
    a.union(b).cloned().collect()
}
