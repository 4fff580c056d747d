//! Mode routing
//!
//! This module provides unified entry points for different execution modes:
//! - Server mode (HTTP server)
//! - CLI mode (one-shot commands)
//!
//! The mode selection is based on the parsed command and feature flags.

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "server")]
pub use server::run_server;

#[cfg(feature = "cli")]
pub use cli::run_cli;

use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    #[cfg(feature = "server")]
    Server,
    #[cfg(feature = "cli")]
    Cli,
    Unknown,
}

/// Detect which mode to run based on the parsed command
///
/// # Mode Detection Logic
/// 1. No command or `serve` and server feature enabled -> Server mode
/// 2. Any other command and CLI feature enabled -> CLI mode
/// 3. Otherwise -> Unknown
pub fn detect_mode(command: Option<&Commands>) -> Mode {
    let wants_server = matches!(command, None | Some(Commands::Serve));

    #[cfg(feature = "server")]
    if wants_server {
        return Mode::Server;
    }

    #[cfg(feature = "cli")]
    if !wants_server {
        return Mode::Cli;
    }

    Mode::Unknown
}
