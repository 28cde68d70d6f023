//! # Finboard Configuration Crate
//!
//! Loads the application `Settings` once at startup and installs the logging stack.
//! Nothing in the workspace reads configuration lazily; the `Settings` value is passed
//! down explicitly to the pieces that need it.
//!
//! ## Public API
//!
//! - `load_settings`: defaults, then an optional TOML file, then the environment.
//! - `Settings` and its sections (`DatabaseSettings`, `ServerSettings`, `AuthSettings`,
//!   `LoggingSettings`).
//! - `init_tracing`: installs the `tracing-subscriber` registry.
//! - `ConfigArgs` (feature `clap`): the `--config` flag shared by the binaries.

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_tracing;
pub use settings::{
    load_settings, settings_from_toml, AuthSettings, DatabaseSettings, LoggingSettings,
    ServerSettings, Settings, DEFAULT_CONFIG_FILE,
};

#[cfg(feature = "clap")]
pub use args::ConfigArgs;

#[cfg(feature = "clap")]
mod args {
    use std::path::PathBuf;

    /// Command-line options for locating the configuration file.
    #[derive(Debug, Clone, Default, clap::Args)]
    pub struct ConfigArgs {
        /// Path to a TOML settings file (defaults to `finboard.toml` if present).
        #[arg(long, global = true)]
        pub config: Option<PathBuf>,
    }

    impl ConfigArgs {
        pub fn load(&self) -> Result<crate::Settings, crate::ConfigError> {
            crate::load_settings(self.config.as_deref())
        }
    }
}
