//! Demo command-line interface
//!
//! Registers a handful of commands on an [`Application`](crate::Application);
//! the `fncli-demo` binary runs it against the process arguments.

pub mod commands;

pub use commands::build_app;
