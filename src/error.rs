use std::path::PathBuf;

/// Errors from the fallible setup paths: loading configuration and connecting to the
/// compositor explicitly. Watcher and input method operations never fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Talking to the bus or the compositor's virtual keyboard interface failed.
    #[error("virtual keyboard D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),
    /// Reading the configuration file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML or has unknown values.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result alias used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
