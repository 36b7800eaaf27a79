//! `org.kde.kwin.VirtualKeyboard`:
//!
//! The compositor's virtual keyboard state, exported by KWin on the session bus.
//!
//! Property names are lowercase on the wire. The compositor announces changes through
//! its own argument-less `xxxChanged` signals rather than `PropertiesChanged`, so
//! proxies must be built with property caching disabled and the getters re-read
//! after each signal.

use zbus::proxy;

#[proxy(
    interface = "org.kde.kwin.VirtualKeyboard",
    default_path = "/org/kde/KWin",
    default_service = "org.kde.KWin"
)]
pub trait VirtualKeyboard {
    /// available property
    #[zbus(property, name = "available")]
    fn available(&self) -> zbus::Result<bool>;

    /// enabled property
    #[zbus(property, name = "enabled")]
    fn enabled(&self) -> zbus::Result<bool>;
    /// Set the enabled property
    #[zbus(property, name = "enabled")]
    fn set_enabled(&self, value: bool) -> zbus::Result<()>;

    /// active property
    #[zbus(property, name = "active")]
    fn active(&self) -> zbus::Result<bool>;
    /// Set the active property
    #[zbus(property, name = "active")]
    fn set_active(&self, value: bool) -> zbus::Result<()>;

    /// visible property
    #[zbus(property, name = "visible")]
    fn visible(&self) -> zbus::Result<bool>;

    /// availableChanged signal
    #[zbus(signal, name = "availableChanged")]
    fn available_notify(&self) -> zbus::Result<()>;

    /// enabledChanged signal
    #[zbus(signal, name = "enabledChanged")]
    fn enabled_notify(&self) -> zbus::Result<()>;

    /// activeChanged signal
    #[zbus(signal, name = "activeChanged")]
    fn active_notify(&self) -> zbus::Result<()>;

    /// visibleChanged signal
    #[zbus(signal, name = "visibleChanged")]
    fn visible_notify(&self) -> zbus::Result<()>;
}
