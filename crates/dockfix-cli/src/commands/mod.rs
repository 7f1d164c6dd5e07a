//! Command implementations for dockfix-cli

pub mod batch;
pub mod check;
pub mod fix;

pub use check::run_check;
pub use fix::run_fix;
