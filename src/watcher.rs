//! Observable mirror of the compositor's virtual keyboard state.

#![deny(
    clippy::all,
    missing_docs,
    rustdoc::all,
    clippy::print_stdout,
    clippy::print_stderr
)]

use crate::integration::{KeyboardIntegration, KeyboardProperty, PropertyUpdate};
use crate::notify::Signal;
use log::trace;
use std::cell::Cell;
use std::fmt;

/// The four flags of the virtual keyboard, as last seen by a watcher.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    /// The compositor offers a virtual keyboard.
    pub available: bool,
    /// The virtual keyboard is turned on.
    pub enabled: bool,
    /// The virtual keyboard is requested for the focused input.
    pub active: bool,
    /// The virtual keyboard is on screen.
    pub visible: bool,
}

impl KeyboardState {
    fn get(&self, property: KeyboardProperty) -> bool {
        match property {
            KeyboardProperty::Available => self.available,
            KeyboardProperty::Enabled => self.enabled,
            KeyboardProperty::Active => self.active,
            KeyboardProperty::Visible => self.visible,
        }
    }

    fn set(&mut self, property: KeyboardProperty, value: bool) {
        match property {
            KeyboardProperty::Available => self.available = value,
            KeyboardProperty::Enabled => self.enabled = value,
            KeyboardProperty::Active => self.active = value,
            KeyboardProperty::Visible => self.visible = value,
        }
    }
}

/// Reports on the status of the compositor's virtual keyboard.
///
/// One watcher exists per [`crate::Kirigami`]; everything that needs keyboard state
/// shares it through an `Rc`. Values confirmed by the integration are applied by
/// [`VirtualKeyboardWatcher::dispatch_pending`], which the host calls from its event
/// loop. Each applied update emits the matching signal, even when the value did not
/// change, because that is how a forwarded write gets confirmed.
pub struct VirtualKeyboardWatcher {
    integration: Box<dyn KeyboardIntegration>,
    state: Cell<KeyboardState>,

    /// Emitted with the new value of [`VirtualKeyboardWatcher::available`].
    pub available_changed: Signal<bool>,
    /// Emitted with the new value of [`VirtualKeyboardWatcher::enabled`].
    pub enabled_changed: Signal<bool>,
    /// Emitted with the new value of [`VirtualKeyboardWatcher::active`].
    pub active_changed: Signal<bool>,
    /// Emitted with the new value of [`VirtualKeyboardWatcher::visible`].
    pub visible_changed: Signal<bool>,
}

impl VirtualKeyboardWatcher {
    /// Creates a watcher backed by `integration`, with every flag `false`.
    pub fn new(integration: Box<dyn KeyboardIntegration>) -> Self {
        VirtualKeyboardWatcher {
            integration,
            state: Cell::new(KeyboardState::default()),
            available_changed: Signal::new(),
            enabled_changed: Signal::new(),
            active_changed: Signal::new(),
            visible_changed: Signal::new(),
        }
    }

    /// Whether the compositor offers a virtual keyboard. Always `false` without one.
    pub fn available(&self) -> bool {
        self.state.get().available
    }

    /// Whether the virtual keyboard is turned on.
    pub fn enabled(&self) -> bool {
        self.state.get().enabled
    }

    /// Turns the virtual keyboard on or off.
    ///
    /// The new value is readable right away. If the integration forwards writes,
    /// [`VirtualKeyboardWatcher::enabled_changed`] is emitted once the compositor
    /// confirms; otherwise it is emitted immediately.
    pub fn set_enabled(&self, enabled: bool) {
        if self.write_local(KeyboardProperty::Enabled, enabled) {
            self.integration.request_enabled(enabled);
        }
    }

    /// Whether the virtual keyboard is requested for the focused input.
    pub fn active(&self) -> bool {
        self.state.get().active
    }

    /// Activates or deactivates the virtual keyboard; same contract as
    /// [`VirtualKeyboardWatcher::set_enabled`].
    pub fn set_active(&self, active: bool) {
        if self.write_local(KeyboardProperty::Active, active) {
            self.integration.request_active(active);
        }
    }

    /// Whether the virtual keyboard is on screen. Always `false` without a compositor.
    pub fn visible(&self) -> bool {
        self.state.get().visible
    }

    /// All four flags at once.
    pub fn state(&self) -> KeyboardState {
        self.state.get()
    }

    /// Applies every update the integration has received, in order, and returns how
    /// many there were.
    pub fn dispatch_pending(&self) -> usize {
        let updates = self.integration.take_updates();
        for update in &updates {
            self.apply(*update);
        }
        updates.len()
    }

    /// Stores a confirmed value and emits its signal.
    pub fn apply(&self, update: PropertyUpdate) {
        trace!("Applying {update:?}");
        let mut state = self.state.get();
        state.set(update.property, update.value);
        self.state.set(state);
        self.signal(update.property).emit(update.value);
    }

    /// Signal emitted when `property` changes.
    pub fn signal(&self, property: KeyboardProperty) -> &Signal<bool> {
        match property {
            KeyboardProperty::Available => &self.available_changed,
            KeyboardProperty::Enabled => &self.enabled_changed,
            KeyboardProperty::Active => &self.active_changed,
            KeyboardProperty::Visible => &self.visible_changed,
        }
    }

    /// Returns whether the write has to be forwarded.
    fn write_local(&self, property: KeyboardProperty, value: bool) -> bool {
        let mut state = self.state.get();
        if state.get(property) == value {
            return false;
        }
        state.set(property, value);
        self.state.set(state);

        if self.integration.forwards_writes() {
            true
        } else {
            self.signal(property).emit(value);
            false
        }
    }
}

impl fmt::Debug for VirtualKeyboardWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualKeyboardWatcher")
            .field("state", &self.state.get())
            .field("forwards_writes", &self.integration.forwards_writes())
            .finish()
    }
}
