//! Logging setup for the `spektra` binary.
//!
//! Everything else in the workspace only talks to the `log` facade.

mod init;

pub use init::{LoggingConfig, init_logging};
