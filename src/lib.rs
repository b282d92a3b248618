pub mod access;
pub mod actions;
pub mod config;
pub mod crypto;
pub mod directory;
pub mod entitlement;
pub mod events;
pub mod progress;
pub mod session;
pub mod storage;
pub mod validators;

pub use access::{AccessGate, AccessVerdict, NavigationRequest};
pub use config::{CoreConfig, RouteTargets};
pub use directory::{UserDirectory, UserRecord};
pub use entitlement::EntitlementStore;
pub use progress::{
    merge_completed, CompletionAuthority, ProgressCache, ProgressSynchronizer, SyncState,
};
pub use session::{Role, Session, SessionStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

#[cfg(any(test, feature = "mocks"))]
pub use progress::MockCompletionAuthority;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    Storage(String),
    RemoteUnavailable(String),
    InvalidEmail,
    InvalidCredentials,
    UserAlreadyExists,
    PasswordHash,
}

impl std::error::Error for CoreError {}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Storage(msg) => write!(f, "Storage error: {}", msg),
            CoreError::RemoteUnavailable(msg) => {
                write!(f, "Remote authority unavailable: {}", msg)
            }
            CoreError::InvalidEmail => write!(f, "Invalid email format"),
            CoreError::InvalidCredentials => write!(f, "Invalid email or password"),
            CoreError::UserAlreadyExists => write!(f, "A user with this email already exists"),
            CoreError::PasswordHash => write!(f, "Failed to hash password"),
        }
    }
}
