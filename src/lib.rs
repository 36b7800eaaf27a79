//! `kirigami-input-method`:
//!
//! Input method state for Kirigami applications.
//!
//! The compositor owns the virtual keyboard and exports its state over D-Bus as
//! `org.kde.kwin.VirtualKeyboard` on the well-known bus name `org.kde.KWin`, object
//! path `/org/kde/KWin`. This crate mirrors that state into observable properties:
//!
//! * [`VirtualKeyboardWatcher`] holds the raw `available`, `enabled`, `active` and
//!   `visible` flags and forwards writes to the compositor.
//! * [`InputMethod`] is the simplified view UI code binds to.
//! * [`Kirigami`] is the composition root that creates the single watcher.
//!
//! Everything lives on the UI thread. Hosts call
//! [`VirtualKeyboardWatcher::dispatch_pending`] from their event loop to apply what
//! the compositor reported since the last iteration.
//!
//! ## Without a compositor
//!
//! If there is no session bus, or the configuration disables the integration, the
//! watcher falls back to [`NullKeyboardIntegration`]: `available` and `visible` stay
//! `false`, and `enabled`/`active` behave as plain local flags. Nothing reports an
//! error in that case; the UI simply renders as if there were no virtual keyboard.

pub mod config;
mod error;
pub mod input_method;
pub mod integration;
mod kirigami;
pub mod notify;
pub mod proxy;
mod remote;
pub mod watcher;
#[cfg(test)]
mod test;

pub use config::{BusKind, Config, IntegrationMode, VirtualKeyboardConfig};
pub use error::{Error, Result};
pub use input_method::{InputMethod, InputMethodType};
pub use integration::{KeyboardIntegration, KeyboardProperty, NullKeyboardIntegration, PropertyUpdate};
pub use kirigami::Kirigami;
pub use notify::{Signal, SignalHandle};
pub use remote::RemoteKeyboardIntegration;
pub use watcher::{KeyboardState, VirtualKeyboardWatcher};
