//! Configuration types for the coursebound core.
//!
//! # Example
//!
//! ```rust
//! use coursebound::{CoreConfig, RouteTargets};
//!
//! // Use defaults
//! let config = CoreConfig::default();
//!
//! // Or customize
//! let config = CoreConfig {
//!     routes: RouteTargets {
//!         login: "/signin".to_owned(),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! ```

use crate::access::AccessVerdict;
use crate::crypto::DEFAULT_TOKEN_LENGTH;
use crate::session::Role;

/// Main configuration for the coursebound core.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Redirect targets used when translating verdicts into navigation.
    pub routes: RouteTargets,

    /// Length of generated session auth tokens (in characters).
    ///
    /// Default is 32 alphanumeric characters.
    pub token_length: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            routes: RouteTargets::default(),
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }
}

impl CoreConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Concrete navigation paths for each redirect verdict.
///
/// The gate returns typed verdicts; the router resolves them to paths
/// through this table, so route layout stays out of the decision logic.
#[derive(Debug, Clone)]
pub struct RouteTargets {
    /// Login page; the guard appends the return path as a query parameter.
    pub login: String,
    /// Generic landing page. Never produced by [`RouteTargets::resolve`],
    /// since every role maps to its own home; this exists for apps that
    /// wire role-free landing routes outside the gate.
    pub generic_home: String,
    /// Student dashboard home.
    pub student_home: String,
    /// Instructor dashboard home.
    pub instructor_home: String,
    /// Course catalog listing, the safe target for malformed course routes.
    pub catalog: String,
    /// Checkout page prefix; the course id is appended as a segment.
    pub payment: String,
}

impl Default for RouteTargets {
    fn default() -> Self {
        Self {
            login: "/login".to_owned(),
            generic_home: "/home".to_owned(),
            student_home: "/student/home".to_owned(),
            instructor_home: "/instructor/home".to_owned(),
            catalog: "/courses".to_owned(),
            payment: "/payment".to_owned(),
        }
    }
}

impl RouteTargets {
    /// Returns the home path for a role.
    pub fn role_home(&self, role: Role) -> &str {
        match role {
            Role::Student => &self.student_home,
            Role::Instructor => &self.instructor_home,
        }
    }

    /// Resolves a verdict to the path the router should navigate to, or
    /// `None` for [`AccessVerdict::Allow`].
    pub fn resolve(&self, verdict: &AccessVerdict) -> Option<String> {
        match verdict {
            AccessVerdict::Allow => None,
            AccessVerdict::RedirectLogin { return_path } => {
                Some(format!("{}?returnUrl={return_path}", self.login))
            }
            AccessVerdict::RedirectRoleHome { role } => Some(self.role_home(*role).to_owned()),
            AccessVerdict::RedirectPayment { course_id, .. } => {
                Some(format!("{}/{course_id}", self.payment))
            }
            AccessVerdict::RedirectCatalog => Some(self.catalog.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoreConfig::default();

        assert_eq!(config.token_length, 32);
        assert_eq!(config.routes.login, "/login");
        assert_eq!(config.routes.catalog, "/courses");
    }

    #[test]
    fn test_role_home() {
        let routes = RouteTargets::default();

        assert_eq!(routes.role_home(Role::Student), "/student/home");
        assert_eq!(routes.role_home(Role::Instructor), "/instructor/home");
    }

    #[test]
    fn test_resolve_verdicts() {
        let routes = RouteTargets::default();

        assert_eq!(routes.resolve(&AccessVerdict::Allow), None);
        assert_eq!(
            routes.resolve(&AccessVerdict::RedirectLogin {
                return_path: "course/42/player".to_owned()
            }),
            Some("/login?returnUrl=course/42/player".to_owned())
        );
        assert_eq!(
            routes.resolve(&AccessVerdict::RedirectRoleHome {
                role: Role::Instructor
            }),
            Some("/instructor/home".to_owned())
        );
        assert_eq!(
            routes.resolve(&AccessVerdict::RedirectPayment {
                course_id: "7".to_owned(),
                reason: "purchase required".to_owned()
            }),
            Some("/payment/7".to_owned())
        );
        assert_eq!(
            routes.resolve(&AccessVerdict::RedirectCatalog),
            Some("/courses".to_owned())
        );
    }
}
