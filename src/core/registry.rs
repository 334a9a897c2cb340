//! Command registry
//!
//! Maps command names to commands and validates every registration.
//! Registering a name twice replaces the earlier command.

use crate::{
    core::command::Command,
    error::{CliError, Result},
};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// Parameter names that clap reserves for itself
const RESERVED_PARAMETERS: &[&str] = &["help"];

/// Mapping from command name to command
#[derive(Debug)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
    /// Regex for valid command names
    re_command: Regex,
    /// Regex for valid parameter names
    re_parameter: Regex,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Result<Self> {
        Ok(Self {
            commands: BTreeMap::new(),
            re_command: Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$")
                .map_err(|e| CliError::config(format!("Failed to compile regex: {}", e)))?,
            re_parameter: Regex::new(r"^_*[A-Za-z][A-Za-z0-9_]*$")
                .map_err(|e| CliError::config(format!("Failed to compile regex: {}", e)))?,
        })
    }

    /// Validate and insert a command, returning the one it replaced
    pub fn register(&mut self, command: Command) -> Result<Option<Command>> {
        self.validate(&command)?;

        let name = command.name().to_string();
        debug!(
            "Registering command '{}' with {} parameter(s)",
            name,
            command.parameters().len()
        );

        let previous = self.commands.insert(name.clone(), command);
        if previous.is_some() {
            warn!("Command '{}' was already registered, replacing it", name);
        }
        Ok(previous)
    }

    /// Look up a command by name
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    /// Registered commands, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Check the command name and its parameter signature
    fn validate(&self, command: &Command) -> Result<()> {
        let name = command.name();
        if !self.re_command.is_match(name) {
            return Err(CliError::definition(format!(
                "invalid command name '{}'",
                name
            )));
        }

        let mut seen = HashSet::new();
        let mut long_names = HashSet::new();
        let mut variadic: Option<&str> = None;

        for param in command.parameters() {
            if !self.re_parameter.is_match(&param.name) {
                return Err(CliError::definition(format!(
                    "command '{}': invalid parameter name '{}'",
                    name, param.name
                )));
            }

            let long_name = param.long_name();
            if RESERVED_PARAMETERS.contains(&long_name.as_str()) {
                return Err(CliError::definition(format!(
                    "command '{}': parameter name '{}' is reserved",
                    name, param.name
                )));
            }

            if !seen.insert(param.name.as_str()) {
                return Err(CliError::definition(format!(
                    "command '{}': duplicate parameter '{}'",
                    name, param.name
                )));
            }

            // `_verbose` and `verbose` would both become `--verbose`
            let is_option = !param.is_required() && !param.is_variadic();
            if is_option && !long_names.insert(long_name.clone()) {
                return Err(CliError::definition(format!(
                    "command '{}': option '--{}' is declared twice",
                    name, long_name
                )));
            }

            if param.is_variadic() {
                if let Some(first) = variadic {
                    return Err(CliError::definition(format!(
                        "command '{}': '{}' and '{}' both take a variable number of arguments",
                        name, first, param.name
                    )));
                }
                variadic = Some(param.name.as_str());
            } else if param.is_required() {
                if let Some(first) = variadic {
                    return Err(CliError::definition(format!(
                        "command '{}': required parameter '{}' follows variadic parameter '{}'",
                        name, param.name, first
                    )));
                }
            }
        }

        Ok(())
    }
}
