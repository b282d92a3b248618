use chrono::Utc;

use crate::entitlement::EntitlementStore;
use crate::events::{dispatch, AccessEvent};
use crate::storage::KeyValueStore;
use crate::CoreError;

/// The checkout flow's sole write path into the entitlement store.
///
/// Invoked by the purchase-completion callback after the payment collaborator
/// reports success; the gate will allow the course from the next navigation.
pub struct CompletePurchaseAction<S: KeyValueStore> {
    entitlements: EntitlementStore<S>,
}

impl<S: KeyValueStore> CompletePurchaseAction<S> {
    pub fn new(entitlements: EntitlementStore<S>) -> Self {
        CompletePurchaseAction { entitlements }
    }

    /// Grants the course entitlement. Idempotent: replaying a purchase
    /// callback changes nothing.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "complete_purchase", skip(self), err)
    )]
    pub async fn execute(&self, identity_id: &str, course_id: &str) -> Result<(), CoreError> {
        self.entitlements.grant(identity_id, course_id)?;

        dispatch(AccessEvent::PurchaseGranted {
            identity_id: identity_id.to_owned(),
            course_id: course_id.to_owned(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "coursebound::entitlement",
            "msg=\"purchase granted\" identity_id={identity_id} course_id={course_id}"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_purchase_grants_entitlement() {
        let entitlements = EntitlementStore::new(MemoryStore::new());

        let action = CompletePurchaseAction::new(entitlements.clone());
        action.execute("u1", "7").await.unwrap();

        assert!(entitlements.is_entitled("u1", "7"));
    }

    #[tokio::test]
    async fn test_replayed_purchase_is_idempotent() {
        let entitlements = EntitlementStore::new(MemoryStore::new());

        let action = CompletePurchaseAction::new(entitlements.clone());
        action.execute("u1", "7").await.unwrap();
        action.execute("u1", "7").await.unwrap();

        assert_eq!(entitlements.entitlements_for("u1").len(), 1);
    }
}
