//! Purchase entitlements.
//!
//! Tracks, per identity, the set of course ids the identity has purchased.
//! Membership is monotonic: there is no removal path, matching the product
//! decision that entitlements are never revoked by this core.

use std::collections::BTreeSet;

use crate::storage::KeyValueStore;
use crate::CoreError;

/// Per-identity purchased-course sets over a [`KeyValueStore`].
///
/// The record for an identity is created lazily: querying an identity with
/// no record yields the empty set. Corrupt persisted data is treated the
/// same way, never surfaced as an error.
#[derive(Clone)]
pub struct EntitlementStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> EntitlementStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key(identity_id: &str) -> String {
        format!("entitlements:{identity_id}")
    }

    /// Returns true if `identity_id` has purchased `course_id`.
    pub fn is_entitled(&self, identity_id: &str, course_id: &str) -> bool {
        self.entitlements_for(identity_id).contains(course_id)
    }

    /// Returns all course ids purchased by `identity_id`.
    pub fn entitlements_for(&self, identity_id: &str) -> BTreeSet<String> {
        let Ok(Some(raw)) = self.store.get(&Self::key(identity_id)) else {
            return BTreeSet::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!(
                target: "coursebound::entitlement",
                "msg=\"discarding unparsable entitlement record\" identity_id={identity_id} error=\"{e}\""
            );
            BTreeSet::new()
        })
    }

    /// Records that `identity_id` has purchased `course_id`.
    ///
    /// Idempotent set-insert: granting an already-held entitlement is a
    /// no-op and does not rewrite storage.
    pub fn grant(&self, identity_id: &str, course_id: &str) -> Result<(), CoreError> {
        let mut courses = self.entitlements_for(identity_id);
        if !courses.insert(course_id.to_owned()) {
            return Ok(());
        }

        let encoded = serde_json::to_string(&courses)
            .map_err(|e| CoreError::Storage(format!("Failed to serialize entitlements: {e}")))?;
        self.store.set(&Self::key(identity_id), &encoded)
    }
}
