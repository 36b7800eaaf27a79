//! The seam between [`crate::VirtualKeyboardWatcher`] and whatever actually owns the
//! virtual keyboard.
//!
//! [`NullKeyboardIntegration`] is used when there is no compositor to talk to;
//! [`crate::RemoteKeyboardIntegration`] talks to one over D-Bus.

/// One of the four flags of the compositor's virtual keyboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyboardProperty {
    /// The compositor has a virtual keyboard at all.
    Available,
    /// The virtual keyboard is turned on by the user.
    Enabled,
    /// The virtual keyboard is requested for the focused input.
    Active,
    /// The virtual keyboard is shown on screen.
    Visible,
}

impl KeyboardProperty {
    /// All properties, in the order a full refresh reports them.
    pub const ALL: [KeyboardProperty; 4] = [
        KeyboardProperty::Available,
        KeyboardProperty::Enabled,
        KeyboardProperty::Active,
        KeyboardProperty::Visible,
    ];
}

/// A value confirmed by the compositor for one property.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PropertyUpdate {
    /// Which flag changed.
    pub property: KeyboardProperty,
    /// Its current value on the compositor side.
    pub value: bool,
}

impl PropertyUpdate {
    /// Shorthand constructor.
    pub fn new(property: KeyboardProperty, value: bool) -> Self {
        PropertyUpdate { property, value }
    }
}

/// Backend of a [`crate::VirtualKeyboardWatcher`].
///
/// All methods are called from the thread owning the watcher and must not block.
pub trait KeyboardIntegration {
    /// Whether writes are sent somewhere that will later confirm them.
    ///
    /// When `false` the watcher notifies about local writes itself.
    fn forwards_writes(&self) -> bool;

    /// Asks the compositor to turn the virtual keyboard on or off. Fire and forget.
    fn request_enabled(&self, enabled: bool);

    /// Asks the compositor to activate or deactivate the virtual keyboard. Fire and forget.
    fn request_active(&self, active: bool);

    /// Returns every update received since the last call, oldest first.
    fn take_updates(&self) -> Vec<PropertyUpdate>;
}

/// Integration used when no compositor is reachable: nothing is forwarded and
/// nothing ever arrives, so every flag stays as the watcher sets it locally.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullKeyboardIntegration;

impl KeyboardIntegration for NullKeyboardIntegration {
    fn forwards_writes(&self) -> bool {
        false
    }

    fn request_enabled(&self, _enabled: bool) {}

    fn request_active(&self, _active: bool) {}

    fn take_updates(&self) -> Vec<PropertyUpdate> {
        Vec::new()
    }
}
