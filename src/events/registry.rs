use std::sync::OnceLock;

use async_trait::async_trait;

use super::AccessEvent;

static LISTENERS: OnceLock<Vec<Box<dyn Listener>>> = OnceLock::new();

/// Receives every dispatched [`AccessEvent`].
///
/// Implementors match on the variants they care about and ignore the rest.
///
/// # Example
///
/// ```rust,ignore
/// use coursebound::events::{AccessEvent, Listener};
/// use async_trait::async_trait;
///
/// struct CompletionToast;
///
/// #[async_trait]
/// impl Listener for CompletionToast {
///     async fn handle(&self, event: &AccessEvent) {
///         if let AccessEvent::VideoCompleted { video_id, .. } = event {
///             // show a "video completed" toast
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    async fn handle(&self, event: &AccessEvent);
}

/// Installs the listener set once, at startup.
///
/// Listeners receive events in the order given here. A second call is
/// ignored with a warning; if this is never called, dispatching is a no-op.
///
/// # Example
///
/// ```rust,ignore
/// use coursebound::events::install_listeners;
/// use coursebound::events::listeners::LogListener;
///
/// install_listeners(vec![Box::new(LogListener)]);
/// ```
pub fn install_listeners(listeners: Vec<Box<dyn Listener>>) {
    if LISTENERS.set(listeners).is_err() {
        log::warn!(
            target: "coursebound",
            "msg=\"install_listeners called more than once, keeping the first set\""
        );
    }
}

/// Hands an event to every installed listener.
pub async fn dispatch(event: AccessEvent) {
    if let Some(listeners) = LISTENERS.get() {
        for listener in listeners {
            listener.handle(&event).await;
        }
    }
}
