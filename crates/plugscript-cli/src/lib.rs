//! plugscript library - command handlers and the Java build driver
//!
//! The binary in `main.rs` only parses arguments and dispatches here.

pub mod build_driver;
pub mod commands;
pub mod common;

pub use common::GlobalOpts;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the tracing subscriber for library diagnostics
///
/// `RUST_LOG` wins; otherwise the level follows the CLI verbosity.
pub fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "plugscript=warn",
        1 => "plugscript=debug",
        _ => "plugscript=trace",
    };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
