use chrono::{DateTime, Utc};

/// Events emitted by the access-and-progress core.
///
/// Events are always fired. With no listeners installed they go nowhere;
/// see [`install_listeners`](super::install_listeners).
#[derive(Debug, Clone)]
pub enum AccessEvent {
    // user lifecycle
    UserRegistered {
        identity_id: String,
        email: String,
        at: DateTime<Utc>,
    },
    ProfileUpdated {
        identity_id: String,
        at: DateTime<Utc>,
    },

    // authentication
    LoginSuccess {
        identity_id: String,
        email: String,
        at: DateTime<Utc>,
    },
    LoginFailed {
        email: String,
        reason: String,
        at: DateTime<Utc>,
    },
    LogoutSuccess {
        identity_id: String,
        at: DateTime<Utc>,
    },

    // entitlements
    PurchaseGranted {
        identity_id: String,
        course_id: String,
        at: DateTime<Utc>,
    },

    // progress
    VideoCompleted {
        identity_id: String,
        course_id: String,
        video_id: String,
        at: DateTime<Utc>,
    },
    ProgressReconciled {
        identity_id: String,
        course_id: String,
        completed_count: usize,
        at: DateTime<Utc>,
    },
    ReconcileFailed {
        identity_id: String,
        course_id: String,
        reason: String,
        at: DateTime<Utc>,
    },
}

impl AccessEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => "user.registered",
            Self::ProfileUpdated { .. } => "user.profile.updated",
            Self::LoginSuccess { .. } => "auth.login.success",
            Self::LoginFailed { .. } => "auth.login.failed",
            Self::LogoutSuccess { .. } => "auth.logout.success",
            Self::PurchaseGranted { .. } => "entitlement.purchase.granted",
            Self::VideoCompleted { .. } => "progress.video.completed",
            Self::ProgressReconciled { .. } => "progress.reconcile.merged",
            Self::ReconcileFailed { .. } => "progress.reconcile.failed",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::UserRegistered { at, .. }
            | Self::ProfileUpdated { at, .. }
            | Self::LoginSuccess { at, .. }
            | Self::LoginFailed { at, .. }
            | Self::LogoutSuccess { at, .. }
            | Self::PurchaseGranted { at, .. }
            | Self::VideoCompleted { at, .. }
            | Self::ProgressReconciled { at, .. }
            | Self::ReconcileFailed { at, .. } => *at,
        }
    }
}
