//! D-Bus backed [`KeyboardIntegration`].
//!
//! The listening side runs as a task on the connection's executor (zbus's own thread)
//! and hands confirmed values to the owning thread through a channel, which the
//! watcher drains in [`crate::VirtualKeyboardWatcher::dispatch_pending`]. Writes are
//! spawned on the same executor, so nothing here blocks the caller.

use crate::config::{BusKind, VirtualKeyboardConfig};
use crate::error::Result;
use crate::integration::{KeyboardIntegration, KeyboardProperty, PropertyUpdate};
use crate::proxy::VirtualKeyboardProxy;
use futures_util::stream::{self, BoxStream, StreamExt};
use log::{debug, info, warn};
use std::future::Future;
use std::sync::mpsc;
use zbus::{Connection, connection};
use zbus::proxy::CacheProperties;

/// What woke the listening task up.
#[derive(Debug, Copy, Clone)]
enum Trigger {
    Changed(KeyboardProperty),
    OwnerLost,
    OwnerAppeared,
}

/// Mirrors `org.kde.kwin.VirtualKeyboard` of a running compositor.
///
/// If the compositor is not on the bus yet, reads fail quietly and every flag stays
/// `false` until it shows up. If it leaves the bus, all flags are reported `false`.
pub struct RemoteKeyboardIntegration {
    proxy: VirtualKeyboardProxy<'static>,
    updates: mpsc::Receiver<PropertyUpdate>,
    // Dropping the task cancels the listener.
    _listener: zbus::Task<()>,
}

impl RemoteKeyboardIntegration {
    /// Opens the configured bus (or address) and starts listening.
    pub async fn connect(config: &VirtualKeyboardConfig) -> Result<Self> {
        let connection = match (&config.address, config.bus) {
            (Some(address), _) => connection::Builder::address(address.as_str())?.build().await?,
            (None, BusKind::Session) => Connection::session().await?,
            (None, BusKind::System) => Connection::system().await?,
        };
        Self::connect_with(&connection, config).await
    }

    /// Blocking variant of [`RemoteKeyboardIntegration::connect`], for use from a UI
    /// thread during startup.
    pub fn connect_blocking(config: &VirtualKeyboardConfig) -> Result<Self> {
        zbus::block_on(Self::connect(config))
    }

    /// Starts listening on an existing connection.
    ///
    /// The signal subscriptions are in place before this returns, and the first thing
    /// the listener does is read all four properties, so no change can fall between
    /// subscribing and the initial read.
    pub async fn connect_with(connection: &Connection, config: &VirtualKeyboardConfig) -> Result<Self> {
        let proxy = VirtualKeyboardProxy::builder(connection)
            .destination(config.service.clone())?
            .path(config.path.clone())?
            .cache_properties(CacheProperties::No)
            .build()
            .await?;

        let triggers = subscribe(&proxy).await?;
        let (tx, updates) = mpsc::channel();
        let listener = connection.executor().spawn(
            forward_updates(proxy.clone(), triggers, tx),
            "kirigami-virtual-keyboard",
        );

        info!(
            "Watching virtual keyboard at {} {}",
            config.service, config.path
        );

        Ok(RemoteKeyboardIntegration {
            proxy,
            updates,
            _listener: listener,
        })
    }

    fn spawn_write<F>(&self, property: &'static str, write: F)
    where
        F: Future<Output = zbus::Result<()>> + Send + 'static,
    {
        self.proxy
            .inner()
            .connection()
            .executor()
            .spawn(
                async move {
                    if let Err(e) = write.await {
                        warn!("Failed to set virtual keyboard {property}: {e}");
                    }
                },
                property,
            )
            .detach();
    }
}

impl KeyboardIntegration for RemoteKeyboardIntegration {
    fn forwards_writes(&self) -> bool {
        true
    }

    fn request_enabled(&self, enabled: bool) {
        debug!("Requesting virtual keyboard enabled={enabled}");
        let proxy = self.proxy.clone();
        self.spawn_write("enabled", async move { proxy.set_enabled(enabled).await });
    }

    fn request_active(&self, active: bool) {
        debug!("Requesting virtual keyboard active={active}");
        let proxy = self.proxy.clone();
        self.spawn_write("active", async move { proxy.set_active(active).await });
    }

    fn take_updates(&self) -> Vec<PropertyUpdate> {
        self.updates.try_iter().collect()
    }
}

async fn subscribe(proxy: &VirtualKeyboardProxy<'static>) -> zbus::Result<BoxStream<'static, Trigger>> {
    let sources = vec![
        proxy
            .receive_available_notify()
            .await?
            .map(|_| Trigger::Changed(KeyboardProperty::Available))
            .boxed(),
        proxy
            .receive_enabled_notify()
            .await?
            .map(|_| Trigger::Changed(KeyboardProperty::Enabled))
            .boxed(),
        proxy
            .receive_active_notify()
            .await?
            .map(|_| Trigger::Changed(KeyboardProperty::Active))
            .boxed(),
        proxy
            .receive_visible_notify()
            .await?
            .map(|_| Trigger::Changed(KeyboardProperty::Visible))
            .boxed(),
        proxy
            .inner()
            .receive_owner_changed()
            .await?
            .map(|owner| match owner {
                Some(_) => Trigger::OwnerAppeared,
                None => Trigger::OwnerLost,
            })
            .boxed(),
    ];
    Ok(stream::select_all(sources).boxed())
}

async fn read_property(proxy: &VirtualKeyboardProxy<'static>, property: KeyboardProperty) -> zbus::Result<bool> {
    match property {
        KeyboardProperty::Available => proxy.available().await,
        KeyboardProperty::Enabled => proxy.enabled().await,
        KeyboardProperty::Active => proxy.active().await,
        KeyboardProperty::Visible => proxy.visible().await,
    }
}

/// Returns `false` once the receiving side is gone.
async fn forward_property(
    proxy: &VirtualKeyboardProxy<'static>,
    property: KeyboardProperty,
    tx: &mpsc::Sender<PropertyUpdate>,
) -> bool {
    match read_property(proxy, property).await {
        Ok(value) => {
            debug!("Virtual keyboard {property:?} = {value}");
            tx.send(PropertyUpdate::new(property, value)).is_ok()
        }
        Err(e) => {
            debug!("Could not read virtual keyboard {property:?}: {e}");
            true
        }
    }
}

async fn refresh(proxy: &VirtualKeyboardProxy<'static>, tx: &mpsc::Sender<PropertyUpdate>) -> bool {
    for property in KeyboardProperty::ALL {
        if !forward_property(proxy, property, tx).await {
            return false;
        }
    }
    true
}

async fn forward_updates(
    proxy: VirtualKeyboardProxy<'static>,
    mut triggers: BoxStream<'static, Trigger>,
    tx: mpsc::Sender<PropertyUpdate>,
) {
    if !refresh(&proxy, &tx).await {
        return;
    }

    while let Some(trigger) = triggers.next().await {
        let delivered = match trigger {
            Trigger::Changed(property) => forward_property(&proxy, property, &tx).await,
            Trigger::OwnerLost => {
                info!("Virtual keyboard provider left the bus");
                KeyboardProperty::ALL
                    .into_iter()
                    .all(|property| tx.send(PropertyUpdate::new(property, false)).is_ok())
            }
            Trigger::OwnerAppeared => {
                info!("Virtual keyboard provider appeared on the bus");
                refresh(&proxy, &tx).await
            }
        };
        if !delivered {
            debug!("Virtual keyboard watcher is gone, stopping listener");
            break;
        }
    }
}
