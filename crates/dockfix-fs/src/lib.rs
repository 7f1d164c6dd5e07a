//! Filesystem side of dockfix
//!
//! Finds candidate Dockerfiles, loads configuration and reads/writes text
//! safely.

pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod io;

pub use config::{Config, ConfigStore};
pub use discovery::{Discovery, discover};
pub use error::{Error, Result};
