//! # Pool Configuration
//!
//! Loads the settings a pool deployment runs with and installs the
//! tracing subscriber they describe.
//!
//! ## Sources
//!
//! Layered, later sources winning:
//!
//! - **Base file**: TOML, every field optional
//! - **Environment overlay**: `<dir>/environments/<env>.toml` next to the base file
//! - **Environment variables**: `POOL_` prefix, `__` between nested keys
//!   (`POOL_EXECUTOR__MAILBOX_CAPACITY=64`)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pool_config::{init_tracing, load_config};
//!
//! let config = load_config(Some("staging")).unwrap();
//! init_tracing(&config.logging).unwrap();
//! println!("initial shares: {}", config.pool.initial_shares);
//! ```

pub mod file_config;
pub mod logging;

// Re-export commonly used types
pub use file_config::{load_config, ExecutorSettings, LogFormat, LoggingConfig, PoolFileConfig};
pub use logging::init_tracing;
