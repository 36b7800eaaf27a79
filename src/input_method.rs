//! Information about the input method currently in use.

#![deny(
    clippy::all,
    missing_docs,
    rustdoc::all,
    clippy::print_stdout,
    clippy::print_stderr
)]

use crate::notify::{Signal, SignalHandle};
use crate::watcher::VirtualKeyboardWatcher;
use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Kind of input method the system provides.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum InputMethodType {
    /// No input method detected.
    #[default]
    NoInputMethod,
    /// The system has a virtual keyboard that may be active.
    VirtualKeyboard,
    /// Some other type of input method is active. Not reported yet.
    Other,
}

impl InputMethodType {
    fn from_available(available: bool) -> Self {
        if available {
            InputMethodType::VirtualKeyboard
        } else {
            InputMethodType::NoInputMethod
        }
    }
}

struct Inner {
    input_type: Cell<InputMethodType>,
    enabled: Cell<bool>,
    active: Cell<bool>,

    type_changed: Signal<InputMethodType>,
    enabled_changed: Signal<bool>,
    active_changed: Signal<bool>,
}

/// UI facing view of the input method state.
///
/// Caches the watcher's values and follows its notifications. Local writes through
/// [`InputMethod::set_enabled`] and [`InputMethod::set_active`] only change this
/// view; they are not sent to the watcher, and the next notification from the
/// watcher overwrites them.
pub struct InputMethod {
    inner: Rc<Inner>,
    watcher: Rc<VirtualKeyboardWatcher>,
    connections: [SignalHandle; 3],
}

impl InputMethod {
    /// Subscribes to `watcher` and seeds the cache from its current state.
    pub fn new(watcher: Rc<VirtualKeyboardWatcher>) -> Self {
        let inner = Rc::new(Inner {
            input_type: Cell::new(InputMethodType::NoInputMethod),
            enabled: Cell::new(false),
            active: Cell::new(false),
            type_changed: Signal::new(),
            enabled_changed: Signal::new(),
            active_changed: Signal::new(),
        });

        let connections = [
            watcher.available_changed.connect(forward(Rc::downgrade(&inner), |inner, available| {
                inner.input_type.set(InputMethodType::from_available(available));
                inner.type_changed.emit(inner.input_type.get());
            })),
            watcher.enabled_changed.connect(forward(Rc::downgrade(&inner), |inner, enabled| {
                inner.enabled.set(enabled);
                inner.enabled_changed.emit(enabled);
            })),
            watcher.active_changed.connect(forward(Rc::downgrade(&inner), |inner, active| {
                inner.active.set(active);
                inner.active_changed.emit(active);
            })),
        ];

        let state = watcher.state();
        inner.input_type.set(InputMethodType::from_available(state.available));
        inner.enabled.set(state.enabled);
        inner.active.set(state.active);

        InputMethod {
            inner,
            watcher,
            connections,
        }
    }

    /// The type of input method that is currently available.
    pub fn input_type(&self) -> InputMethodType {
        self.inner.input_type.get()
    }

    /// Is the current input method enabled.
    ///
    /// If this is false, the input method is available but not in use.
    pub fn enabled(&self) -> bool {
        self.inner.enabled.get()
    }

    /// Changes this view's `enabled` value without touching the watcher.
    pub fn set_enabled(&self, enabled: bool) {
        if self.inner.enabled.get() == enabled {
            return;
        }
        self.inner.enabled.set(enabled);
        self.inner.enabled_changed.emit(enabled);
    }

    /// Whether the current input method is active.
    ///
    /// What active means depends on the type of input method. For a virtual keyboard
    /// it means the keyboard is requested for the focused input.
    pub fn active(&self) -> bool {
        self.inner.active.get()
    }

    /// Changes this view's `active` value without touching the watcher.
    pub fn set_active(&self, active: bool) {
        if self.inner.active.get() == active {
            return;
        }
        self.inner.active.set(active);
        self.inner.active_changed.emit(active);
    }

    /// Emitted whenever the watcher reports a change of availability.
    pub fn type_changed(&self) -> &Signal<InputMethodType> {
        &self.inner.type_changed
    }

    /// Emitted when [`InputMethod::enabled`] changes.
    pub fn enabled_changed(&self) -> &Signal<bool> {
        &self.inner.enabled_changed
    }

    /// Emitted when [`InputMethod::active`] changes.
    pub fn active_changed(&self) -> &Signal<bool> {
        &self.inner.active_changed
    }

    /// The watcher this view follows.
    pub fn watcher(&self) -> &Rc<VirtualKeyboardWatcher> {
        &self.watcher
    }
}

fn forward(inner: Weak<Inner>, update: fn(&Inner, bool)) -> impl Fn(bool) {
    move |value| {
        if let Some(inner) = inner.upgrade() {
            update(&inner, value);
        }
    }
}

impl Drop for InputMethod {
    fn drop(&mut self) {
        let [available, enabled, active] = self.connections;
        self.watcher.available_changed.disconnect(available);
        self.watcher.enabled_changed.disconnect(enabled);
        self.watcher.active_changed.disconnect(active);
    }
}

impl fmt::Debug for InputMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputMethod")
            .field("type", &self.input_type())
            .field("enabled", &self.enabled())
            .field("active", &self.active())
            .finish()
    }
}
