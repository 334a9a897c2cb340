//! The application façade
//!
//! An [`Application`] owns its identity, its command registry and its logger.
//! There is no global instance: build one, register commands, then call
//! [`Application::run`] or [`Application::execute`] once.

use crate::{
    config::AppConfig,
    core::{
        command::Command,
        dispatcher::{Dispatcher, Resolution},
        registry::CommandRegistry,
        value::Value,
    },
    error::{CliError, Result},
    utils::logger::Logger,
};
use std::{fmt, process::ExitCode};
use tracing::{debug, instrument};

/// A command-line application made of registered commands
#[derive(Debug)]
pub struct Application {
    config: AppConfig,
    registry: CommandRegistry,
    logger: Logger,
}

impl Application {
    /// Create an application
    pub fn new(
        name: impl Into<String>,
        description: &str,
        version: impl Into<String>,
    ) -> Result<Self> {
        Self::from_config(AppConfig::new(name, description).with_version(version))
    }

    /// Create an application from a prepared configuration
    pub fn from_config(config: AppConfig) -> Result<Self> {
        config.validate()?;
        debug!("Creating application '{}' {}", config.name, config.version);

        Ok(Self {
            registry: CommandRegistry::new()?,
            logger: Logger::stdout(config.log_prefix()),
            config,
        })
    }

    /// Replace the logger, e.g. to capture output
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn description(&self) -> &str {
        &self.config.description
    }

    pub fn version(&self) -> &str {
        &self.config.version
    }

    /// A handle on the application logger, for use inside commands
    pub fn logger(&self) -> Logger {
        self.logger.clone()
    }

    /// Log a message to the console
    pub fn log(&self, message: impl fmt::Display) {
        self.logger.log(message);
    }

    /// Register a command and hand it back unchanged
    ///
    /// A command registered under an existing name replaces the earlier one.
    pub fn command(&mut self, command: Command) -> Result<Command> {
        self.registry.register(command.clone())?;
        Ok(command)
    }

    /// Look up a registered command
    pub fn get_command(&self, name: &str) -> Option<&Command> {
        self.registry.get(name)
    }

    /// Registered command names, sorted
    pub fn command_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Rendered application help
    pub fn help(&self) -> String {
        self.dispatcher().help()
    }

    /// Resolve arguments without invoking anything
    pub fn resolve(&self, args: &[String]) -> Result<Resolution<'_>> {
        self.dispatcher().resolve(args)
    }

    /// Execute the command selected by `args` (argv without the program name)
    ///
    /// Returns the command's value. Errors raised by the command body come
    /// back unchanged inside [`CliError::Command`].
    #[instrument(skip(self, args), fields(app = %self.config.name))]
    pub fn run<I, S>(&self, args: I) -> Result<Option<Value>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        self.dispatcher().dispatch(&args)
    }

    /// Run and translate the outcome into a process exit code
    ///
    /// A returned value is logged; failures are printed on standard error.
    pub fn execute<I, S>(&self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.run(args) {
            Ok(Some(value)) => {
                self.log(value);
                ExitCode::SUCCESS
            }
            Ok(None) => ExitCode::SUCCESS,
            Err(err) => {
                report(&err);
                ExitCode::from(err.exit_code())
            }
        }
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.config, &self.registry, &self.logger)
    }
}

/// Print an error for the user
fn report(err: &CliError) {
    eprintln!("error: {err:#}");
    if let CliError::Usage {
        usage: Some(usage), ..
    } = err
    {
        eprintln!("\n{}", usage.trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{dispatcher::Invocation, parameter::Parameter, value::ParamType},
        error::UsageKind,
        utils::logger::LogBuffer,
    };
    use anyhow::Context;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn greet_app() -> (Application, LogBuffer, Arc<AtomicUsize>) {
        let (logger, buffer) = Logger::buffered(None);
        let mut app = Application::new("my-app", "Greets people", "1.0.0")
            .unwrap()
            .with_logger(logger);

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let log = app.logger();
        app.command(
            Command::new("greet", move |inv: &Invocation| -> anyhow::Result<()> {
                counter.fetch_add(1, Ordering::SeqCst);
                log.log(format!("Hello, {}!", inv.get::<String>("name")?));
                Ok(())
            })
            .param(Parameter::new("name", ParamType::Text)),
        )
        .unwrap();

        (app, buffer, calls)
    }

    #[test]
    fn test_greet_scenario() {
        let (app, buffer, calls) = greet_app();
        assert_eq!(app.run(["greet", "World"]).unwrap(), None);
        assert_eq!(buffer.lines(), vec!["Hello, World!"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_run_does_not_invoke() {
        let (app, buffer, calls) = greet_app();
        let err = app.run(Vec::<String>::new()).unwrap_err();
        assert_eq!(err.usage_kind(), Some(UsageKind::NoCommand));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_unknown_command_lists_greet() {
        let (app, _, calls) = greet_app();
        let err = app.run(["fly"]).unwrap_err();
        assert!(matches!(err, CliError::UnknownCommand { ref known, .. } if known.contains(&"greet".to_string())));
        assert!(err.to_string().contains("greet"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_command_returns_itself() {
        let mut app = Application::new("my-app", "", "1.0.0").unwrap();
        let cmd = Command::new("ping", |_: &Invocation| "pong").doc("Reply with pong");
        let returned = app.command(cmd).unwrap();
        assert_eq!(returned.name(), "ping");
        assert_eq!(returned.description(), "Reply with pong");
        assert_eq!(app.command_names(), vec!["ping"]);
    }

    #[test]
    fn test_reregistration_keeps_newest() {
        let mut app = Application::new("my-app", "", "1.0.0").unwrap();
        app.command(Command::new("answer", |_: &Invocation| 1_i64)).unwrap();
        app.command(Command::new("answer", |_: &Invocation| 2_i64)).unwrap();

        assert_eq!(app.command_names(), vec!["answer"]);
        assert_eq!(app.run(["answer"]).unwrap(), Some(Value::Integer(2)));
    }

    #[test]
    fn test_command_errors_propagate_unchanged() {
        let mut app = Application::new("my-app", "", "1.0.0").unwrap();
        app.command(Command::new("explode", |_: &Invocation| -> anyhow::Result<()> {
            let written: std::io::Result<()> = Err(std::io::Error::other("disk full"));
            written.context("Failed to write report")?;
            Ok(())
        }))
        .unwrap();

        let err = app.run(["explode"]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        match err {
            CliError::Command(inner) => {
                assert_eq!(inner.to_string(), "Failed to write report");
                assert!(inner.root_cause().to_string().contains("disk full"));
            }
            other => panic!("Expected Command error, got {:?}", other),
        }
    }

    #[test]
    fn test_log_prefix_from_config() {
        let config = AppConfig::new("my-app", "").with_log_prefix(true);
        let app = Application::from_config(config).unwrap();
        let (logger, buffer) = Logger::buffered(app.config().log_prefix());
        let app = app.with_logger(logger);
        app.log("started");
        assert_eq!(buffer.contents(), "my-app: started\n");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            Application::new("", "nameless", "1.0.0"),
            Err(CliError::Config { .. })
        ));
    }

    #[test]
    fn test_help_lists_commands() {
        let (app, _, _) = greet_app();
        let help = app.help();
        assert!(help.contains("Greets people"));
        assert!(help.contains("greet"));
        assert!(help.contains("--version"));
    }
}
