//! Core functionality for command registration and dispatch
//!
//! Contains the application façade, the command registry, the dispatcher and
//! the coercion table.

pub mod application;
pub mod command;
pub mod dispatcher;
pub mod parameter;
pub mod registry;
pub mod value;

pub use application::Application;
pub use command::{Command, Handler};
pub use dispatcher::{Dispatcher, Invocation, Resolution};
pub use parameter::Parameter;
pub use registry::CommandRegistry;
pub use value::{ArgType, IntoOutcome, Outcome, ParamType, Value};
