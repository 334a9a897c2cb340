//! Argument dispatch
//!
//! Maps a flat argument sequence onto one command invocation: the first
//! argument selects the command, the rest are parsed against the command's
//! parameters with clap and coerced to their declared types.

use crate::{
    config::AppConfig,
    core::{
        command::Command,
        parameter::Parameter,
        registry::CommandRegistry,
        value::{ArgType, Value},
    },
    error::{CliError, Result, UsageKind},
    utils::logger::Logger,
};
use clap::{
    Arg, ArgAction, ArgMatches, ColorChoice,
    error::{ContextKind, ContextValue, ErrorKind},
    parser::MatchesError,
};
use std::fmt;
use tracing::{debug, instrument};

/// One execution of a command with its coerced arguments
#[derive(Debug, Clone)]
pub struct Invocation {
    command: String,
    raw: Vec<String>,
    values: Vec<(String, Value)>,
    logger: Logger,
}

impl Invocation {
    pub fn new(
        command: impl Into<String>,
        raw: Vec<String>,
        values: Vec<(String, Value)>,
        logger: Logger,
    ) -> Self {
        Self {
            command: command.into(),
            raw,
            values,
            logger,
        }
    }

    /// Name of the invoked command
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The arguments as given, command name included
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// Coerced values in parameter order
    pub fn values(&self) -> &[(String, Value)] {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value)
    }

    /// Typed access to a parameter value
    pub fn get<T: ArgType>(&self, name: &str) -> Result<T> {
        let value = self.value(name).ok_or_else(|| {
            CliError::definition(format!(
                "command '{}' has no parameter '{}'",
                self.command, name
            ))
        })?;

        T::from_value(value).ok_or_else(|| {
            CliError::definition(format!(
                "parameter '{}' of command '{}' holds {:?}, not {}",
                name,
                self.command,
                value,
                T::PARAM_TYPE
            ))
        })
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Log through the application's logger
    pub fn log(&self, message: impl fmt::Display) {
        self.logger.log(message);
    }
}

/// What an argument sequence resolves to
#[derive(Debug)]
pub enum Resolution<'a> {
    /// Help text to show instead of running anything
    Help(String),
    /// The application version was requested
    Version(String),
    /// A command to invoke
    Invoke(&'a Command, Invocation),
}

/// Dispatcher bound to one application
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    config: &'a AppConfig,
    registry: &'a CommandRegistry,
    logger: &'a Logger,
}

impl<'a> Dispatcher<'a> {
    pub fn new(config: &'a AppConfig, registry: &'a CommandRegistry, logger: &'a Logger) -> Self {
        Self {
            config,
            registry,
            logger,
        }
    }

    /// Resolve and run one argument sequence
    #[instrument(skip(self))]
    pub fn dispatch(&self, args: &[String]) -> Result<Option<Value>> {
        match self.resolve(args)? {
            Resolution::Help(text) => {
                self.logger.log(text.trim_end());
                Ok(None)
            }
            Resolution::Version(version) => {
                self.logger.log(version);
                Ok(None)
            }
            Resolution::Invoke(command, invocation) => {
                debug!(
                    "Invoking '{}' with {:?}",
                    command.name(),
                    invocation.values()
                );
                command.call(&invocation).map_err(CliError::Command)
            }
        }
    }

    /// Resolve an argument sequence without running anything
    pub fn resolve(&self, args: &[String]) -> Result<Resolution<'a>> {
        let Some((first, rest)) = args.split_first() else {
            return Err(CliError::no_command(self.usage()));
        };

        match first.as_str() {
            "-h" | "--help" | "-v" | "--version" if !rest.is_empty() => {
                let extra = &rest[0];
                let kind = if extra.starts_with('-') {
                    UsageKind::InvalidOption
                } else {
                    UsageKind::ArgumentCount
                };
                return Err(CliError::usage(
                    kind,
                    format!("unexpected argument '{}' after '{}'", extra, first),
                )
                .with_usage(self.usage()));
            }
            "-h" | "--help" => return Ok(Resolution::Help(self.help())),
            "-v" | "--version" => return Ok(Resolution::Version(self.config.version.clone())),
            option if option.starts_with('-') => {
                return Err(CliError::usage(
                    UsageKind::InvalidOption,
                    format!("unexpected option '{}'", option),
                )
                .with_usage(self.usage()));
            }
            _ => {}
        }

        let command = self
            .registry
            .get(first)
            .ok_or_else(|| CliError::unknown_command(first.clone(), self.registry.names()))?;
        debug!("Resolved command '{}'", command.name());

        let parser = command.to_clap(&self.config.name).no_binary_name(true);
        let matches = match parser.try_get_matches_from(rest) {
            Ok(matches) => matches,
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                return Ok(Resolution::Help(e.to_string()));
            }
            Err(e) => return Err(usage_from_clap(&e)),
        };

        let values = command
            .parameters()
            .iter()
            .map(|param| -> Result<Option<(String, Value)>> {
                Ok(extract_value(param, &matches)?.map(|v| (param.name.clone(), v)))
            })
            .filter_map(Result::transpose)
            .collect::<Result<Vec<_>>>()?;

        Ok(Resolution::Invoke(
            command,
            Invocation::new(command.name(), args.to_vec(), values, self.logger.clone()),
        ))
    }

    /// Full application help
    pub fn help(&self) -> String {
        self.clap_app().render_help().to_string()
    }

    /// Short usage guidance
    pub fn usage(&self) -> String {
        format!(
            "{}\n\nRun '{} --help' for the list of commands.",
            self.clap_app().render_usage(),
            self.config.name
        )
    }

    /// Top-level parser, only used to render help
    fn clap_app(&self) -> clap::Command {
        clap::Command::new(self.config.name.clone())
            .about(self.config.description.clone())
            .version(self.config.version.clone())
            .color(ColorChoice::Never)
            .disable_version_flag(true)
            .disable_help_subcommand(true)
            .arg(
                Arg::new("version")
                    .short('v')
                    .long("version")
                    .action(ArgAction::SetTrue)
                    .help("Show the program version"),
            )
            .subcommands(self.registry.iter().map(|c| c.to_clap(&self.config.name)))
    }
}

/// Read one parameter from the parsed matches and coerce it
fn extract_value(param: &Parameter, matches: &ArgMatches) -> Result<Option<Value>> {
    let id = param.name.as_str();
    let lookup = |e: MatchesError| CliError::definition(format!("parameter '{}': {}", id, e));

    if param.is_variadic() {
        let items = matches
            .try_get_many::<String>(id)
            .map_err(lookup)?
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        return Ok(Some(Value::List(items)));
    }

    if param.is_flag() {
        let set = matches
            .try_get_one::<bool>(id)
            .map_err(lookup)?
            .copied()
            .unwrap_or(false);
        return Ok(Some(Value::Boolean(set)));
    }

    match matches.try_get_one::<String>(id).map_err(lookup)? {
        Some(raw) => param.kind.coerce(&param.name, raw).map(Some),
        None => Ok(param.default.clone()),
    }
}

/// Translate a clap parse failure into a usage error
fn usage_from_clap(error: &clap::Error) -> CliError {
    let kind = match error.kind() {
        ErrorKind::MissingRequiredArgument
        | ErrorKind::TooManyValues
        | ErrorKind::TooFewValues
        | ErrorKind::WrongNumberOfValues => UsageKind::ArgumentCount,
        ErrorKind::UnknownArgument => match error.get(ContextKind::InvalidArg) {
            Some(ContextValue::String(arg)) if !arg.starts_with('-') => UsageKind::ArgumentCount,
            _ => UsageKind::InvalidOption,
        },
        ErrorKind::InvalidValue | ErrorKind::ValueValidation | ErrorKind::InvalidUtf8 => {
            UsageKind::BadArgument
        }
        _ => UsageKind::InvalidOption,
    };

    let rendered = error.to_string();
    let message = rendered.trim_start_matches("error: ").trim_end();
    CliError::usage(kind, message)
}
