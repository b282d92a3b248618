//! Events fired by the actions and the progress synchronizer.
//!
//! Dispatching is fire-and-forget. Nothing in the core waits on a
//! listener's result, and with no listeners installed a dispatch does
//! nothing.
//!
//! Install the built-in log listener at startup:
//!
//! ```rust,ignore
//! use coursebound::events::install_listeners;
//! use coursebound::events::listeners::LogListener;
//!
//! install_listeners(vec![Box::new(LogListener)]);
//! ```
//!
//! Anything else that wants to observe the core (metrics counters, UI
//! toasts) implements [`Listener`] and goes into the same vec.

mod event;
mod registry;

pub mod listeners;

pub use event::AccessEvent;
pub use registry::{dispatch, install_listeners, Listener};
