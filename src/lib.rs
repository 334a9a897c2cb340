//! # fncli
//!
//! Build command-line interfaces out of plain Rust functions.
//! Functions are registered as named commands on an [`Application`], which
//! then dispatches process arguments to the matching one.
//!
//! ## Features
//!
//! - Command names, parameters and help text derived from the function
//! - Type-driven coercion of arguments (text, integers, floats, booleans)
//! - Optional `--options`, boolean flags and a variadic trailing parameter
//! - Automatic `--help` and `--version`
//! - Usage errors and unknown commands reported with proper exit codes
//!
//! ## Example
//!
//! ```no_run
//! use fncli::{Application, command};
//!
//! /// Add two numbers
//! fn add(a: i64, b: i64) -> i64 {
//!     a + b
//! }
//!
//! let mut app = Application::new("calc", "A tiny calculator", "1.0.0")?;
//! app.command(command!(add(a: i64, b: i64)))?;
//! let code = app.execute(std::env::args().skip(1));
//! # let _ = code;
//! # Ok::<(), fncli::CliError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::config::AppConfig;
pub use crate::core::{
    Application, ArgType, Command, Invocation, IntoOutcome, Outcome, ParamType, Parameter, Value,
};
pub use crate::error::{CliError, UsageKind};
pub use crate::utils::logger::{LogBuffer, Logger};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize diagnostics on standard error
///
/// `RUST_LOG` takes precedence; otherwise `debug` enables debug output and the
/// default shows warnings only, so command output on stdout stays clean.
pub fn setup_logging(debug: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
