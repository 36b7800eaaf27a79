//! Composition root.
//!
//! An application creates one [`Kirigami`] on its UI thread at startup and hands it
//! (or the watcher it returns) to everything that needs keyboard state.

use crate::config::{Config, IntegrationMode};
use crate::input_method::InputMethod;
use crate::integration::{KeyboardIntegration, NullKeyboardIntegration};
use crate::remote::RemoteKeyboardIntegration;
use crate::watcher::VirtualKeyboardWatcher;
use log::{info, warn};
use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

/// Owns the single [`VirtualKeyboardWatcher`] of an application.
pub struct Kirigami {
    config: Config,
    integration: RefCell<Option<Box<dyn KeyboardIntegration>>>,
    watcher: OnceCell<Rc<VirtualKeyboardWatcher>>,
}

impl Kirigami {
    /// Creates the root; the watcher is built lazily from `config` on first use.
    pub fn new(config: Config) -> Self {
        Kirigami {
            config,
            integration: RefCell::new(None),
            watcher: OnceCell::new(),
        }
    }

    /// Like [`Kirigami::new`] with [`Config::load`]; an unreadable config file is
    /// logged and replaced by the defaults.
    pub fn from_default_config() -> Self {
        let config = Config::load().unwrap_or_else(|e| {
            warn!("Ignoring input method config: {e}");
            Config::default()
        });
        Self::new(config)
    }

    /// Creates the root with an integration chosen by the caller instead of `config`.
    pub fn with_integration(config: Config, integration: Box<dyn KeyboardIntegration>) -> Self {
        Kirigami {
            config,
            integration: RefCell::new(Some(integration)),
            watcher: OnceCell::new(),
        }
    }

    /// The configuration this root was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The application's watcher, created on the first call.
    ///
    /// Every call returns the same instance.
    pub fn virtual_keyboard_watcher(&self) -> Rc<VirtualKeyboardWatcher> {
        Rc::clone(self.watcher.get_or_init(|| {
            let integration = self
                .integration
                .borrow_mut()
                .take()
                .unwrap_or_else(|| build_integration(&self.config));
            Rc::new(VirtualKeyboardWatcher::new(integration))
        }))
    }

    /// A new input method view following the application's watcher.
    pub fn input_method(&self) -> InputMethod {
        InputMethod::new(self.virtual_keyboard_watcher())
    }
}

fn build_integration(config: &Config) -> Box<dyn KeyboardIntegration> {
    match config.virtual_keyboard.mode {
        IntegrationMode::Disabled => {
            info!("Virtual keyboard integration disabled by configuration");
            Box::new(NullKeyboardIntegration)
        }
        IntegrationMode::Auto => match RemoteKeyboardIntegration::connect_blocking(&config.virtual_keyboard) {
            Ok(remote) => Box::new(remote),
            Err(e) => {
                warn!("Virtual keyboard integration unavailable: {e}");
                Box::new(NullKeyboardIntegration)
            }
        },
    }
}
