//! CubicLauncher library root
//!
//! Re-exports core functionality for external use.

pub mod config;
pub mod core;
pub mod util;

pub use config::Config;
pub use crate::core::store::LauncherStore;
