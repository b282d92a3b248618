//! Route guard helpers.
//!
//! Guards assemble the gate's inputs from a navigation request and hand the
//! verdict back to the router, which performs the actual redirect. The
//! [`RouteTargets`](crate::config::RouteTargets) config maps verdicts to
//! concrete paths.

use crate::session::{Role, SessionStore};
use crate::storage::KeyValueStore;

use super::{AccessGate, AccessVerdict};

/// One navigation attempt, as seen by a route guard.
#[derive(Debug, Clone)]
pub struct NavigationRequest {
    /// The path being navigated to; used as the post-login return target.
    pub path: String,
    /// The course id route parameter, if the route carries one.
    pub course_id: Option<String>,
    /// Roles allowed on this route; `None` means no role restriction.
    pub required_roles: Option<Vec<Role>>,
}

impl NavigationRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            course_id: None,
            required_roles: None,
        }
    }

    pub fn with_course(mut self, course_id: impl Into<String>) -> Self {
        self.course_id = Some(course_id.into());
        self
    }

    pub fn with_roles(mut self, roles: impl Into<Vec<Role>>) -> Self {
        self.required_roles = Some(roles.into());
        self
    }
}

/// Guard for role-restricted routes (dashboards).
pub fn role_guard<S: KeyValueStore>(
    sessions: &SessionStore<S>,
    gate: &AccessGate<S>,
    request: &NavigationRequest,
) -> AccessVerdict {
    let session = sessions.current();
    gate.decide(
        session.as_ref(),
        request.required_roles.as_deref(),
        None,
        &request.path,
    )
}

/// Guard for course-scoped routes (the player).
///
/// A course route reached without its course id parameter is malformed
/// routing data, answered with a redirect to the catalog listing rather
/// than an error.
pub fn course_access_guard<S: KeyValueStore>(
    sessions: &SessionStore<S>,
    gate: &AccessGate<S>,
    request: &NavigationRequest,
) -> AccessVerdict {
    let session = sessions.current();

    // authentication first, so an anonymous visitor is sent to login even
    // when the course parameter is missing
    if session.is_none() {
        return AccessVerdict::RedirectLogin {
            return_path: request.path.clone(),
        };
    }

    let Some(course_id) = request.course_id.as_deref() else {
        return AccessVerdict::RedirectCatalog;
    };

    gate.decide(session.as_ref(), None, Some(course_id), &request.path)
}
