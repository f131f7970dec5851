//! Command handlers, one module per subcommand.

pub mod api;
pub mod completions;
mod create;
pub mod init_config;
pub mod webhook;
