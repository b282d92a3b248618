//! Built-in event listeners.

use async_trait::async_trait;

use super::{AccessEvent, Listener};

/// Picks the log level for an event. Failures are warnings, everything
/// else is informational.
fn level_for(event: &AccessEvent) -> log::Level {
    match event {
        AccessEvent::LoginFailed { .. } | AccessEvent::ReconcileFailed { .. } => log::Level::Warn,
        _ => log::Level::Info,
    }
}

/// Writes every event to the `log` facade.
///
/// # Example
///
/// ```rust,ignore
/// use coursebound::events::install_listeners;
/// use coursebound::events::listeners::LogListener;
///
/// install_listeners(vec![Box::new(LogListener)]);
/// ```
pub struct LogListener;

#[async_trait]
impl Listener for LogListener {
    async fn handle(&self, event: &AccessEvent) {
        log::log!(
            target: "coursebound::events",
            level_for(event),
            "msg=\"{}\" detail={:?}",
            event.name(),
            event
        );
    }
}

/// Emits every event through `tracing`, at the same warn/info split as
/// [`LogListener`]. Requires the `tracing` feature.
#[cfg(feature = "tracing")]
pub struct TraceListener;

#[cfg(feature = "tracing")]
#[async_trait]
impl Listener for TraceListener {
    async fn handle(&self, event: &AccessEvent) {
        match level_for(event) {
            log::Level::Warn => tracing::warn!(
                target: "coursebound::events",
                event_name = event.name(),
                ?event,
            ),
            _ => tracing::info!(
                target: "coursebound::events",
                event_name = event.name(),
                ?event,
            ),
        }
    }
}
