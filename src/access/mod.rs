//! Navigation access decisions.
//!
//! Route guards ask [`AccessGate::decide`] whether a navigation may proceed
//! and translate the returned [`AccessVerdict`] into a redirect; the gate
//! itself performs no navigation and has no side effects.

mod guards;

pub use guards::{course_access_guard, role_guard, NavigationRequest};

use crate::entitlement::EntitlementStore;
use crate::session::{Role, Session};
use crate::storage::KeyValueStore;

/// The outcome of evaluating navigation permission for a protected route.
///
/// Transient: computed fresh per navigation attempt, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessVerdict {
    /// The visitor may proceed.
    Allow,
    /// No session; send to login, returning here afterwards.
    RedirectLogin { return_path: String },
    /// Logged in but wrong role; send to the role's own home.
    RedirectRoleHome { role: Role },
    /// Logged in but the course is not purchased; send to checkout.
    RedirectPayment { course_id: String, reason: String },
    /// A course-scoped route was requested without a course id; send to the
    /// catalog listing rather than failing.
    RedirectCatalog,
}

/// Decides, for any protected navigation, whether a visitor may proceed.
///
/// A pure decision function over the session and entitlement state: identical
/// inputs always yield an identical verdict, so the gate is testable without
/// mocking navigation.
#[derive(Clone)]
pub struct AccessGate<S: KeyValueStore> {
    entitlements: EntitlementStore<S>,
}

impl<S: KeyValueStore> AccessGate<S> {
    pub fn new(entitlements: EntitlementStore<S>) -> Self {
        Self { entitlements }
    }

    /// Evaluates a navigation attempt.
    ///
    /// First matching rule wins:
    ///
    /// 1. role restriction, no session → login redirect
    /// 2. role restriction, session, role not in the restriction → role home
    /// 3. course requirement, no session → login redirect
    /// 4. course requirement, session, course not purchased → payment redirect
    /// 5. otherwise → allow
    ///
    /// Authentication is checked before role and before entitlement: role
    /// and entitlement checks are undefined without an identity, and an
    /// anonymous visitor never learns role- or purchase-specific redirect
    /// targets.
    pub fn decide(
        &self,
        session: Option<&Session>,
        required_roles: Option<&[Role]>,
        course_id: Option<&str>,
        current_path: &str,
    ) -> AccessVerdict {
        if let Some(roles) = required_roles {
            match session {
                None => {
                    return AccessVerdict::RedirectLogin {
                        return_path: current_path.to_owned(),
                    }
                }
                Some(session) if !roles.contains(&session.role) => {
                    return AccessVerdict::RedirectRoleHome { role: session.role }
                }
                Some(_) => {}
            }
        }

        if let Some(course_id) = course_id {
            let Some(session) = session else {
                return AccessVerdict::RedirectLogin {
                    return_path: current_path.to_owned(),
                };
            };

            if !self.entitlements.is_entitled(&session.identity_id, course_id) {
                return AccessVerdict::RedirectPayment {
                    course_id: course_id.to_owned(),
                    reason: "purchase required".to_owned(),
                };
            }
        }

        AccessVerdict::Allow
    }
}
