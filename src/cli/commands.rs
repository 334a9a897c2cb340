//! Command implementations for the demo CLI

use crate::{
    command,
    core::{Application, Command, Invocation, ParamType, Parameter},
    error::Result,
};
use anyhow::{Context, bail};

const DESCRIPTION: &str = "
    Demo application for fncli.
    Every command is a plain Rust function.
";

/// Build the demo application with all of its commands
pub fn build_app() -> Result<Application> {
    let mut app = Application::new("fncli-demo", DESCRIPTION, env!("CARGO_PKG_VERSION"))?;

    app.command(greet())?;
    app.command(command!(
        /// Add two integers
        add(a: i64, b: i64)
    ))?;
    app.command(command!(
        /// Sum two numbers
        ///
        /// The result is rounded to `prec` decimal places.
        sum(a: f64, b: f64, prec: i64 = 2)
    ))?;
    app.command(command!(
        /// Echo a message
        ///
        /// Prints the message back, in capitals with --cap.
        echo(msg: String, cap: bool = false)
    ))?;
    app.command(command!(
        /// Join all arguments with a separator
        concat(parts: Vec<String>, sep: String = ",".to_string())
    ))?;
    app.command(command!(
        /// Fail with an error
        fail(reason: String = "on purpose".to_string())
    ))?;

    Ok(app)
}

fn greet() -> Command {
    Command::new("greet", |inv: &Invocation| -> anyhow::Result<()> {
        inv.log(format!("Hello, {}!", inv.get::<String>("name")?));
        Ok(())
    })
    .doc("Greet somebody by name")
    .param(
        Parameter::new("name", ParamType::Text)
            .pretty("NAME")
            .described("Who to greet"),
    )
}

fn add(a: i64, b: i64) -> i64 {
    a + b
}

fn sum(a: f64, b: f64, prec: i64) -> anyhow::Result<String> {
    let prec = usize::try_from(prec).context("Precision must not be negative")?;
    Ok(format!("{:.*}", prec, a + b))
}

fn echo(msg: String, cap: bool) -> String {
    if cap { msg.to_uppercase() } else { msg }
}

fn concat(parts: Vec<String>, sep: String) -> String {
    parts.join(&sep)
}

fn fail(reason: String) -> anyhow::Result<()> {
    bail!("command failed {}", reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::Value,
        error::CliError,
        utils::logger::{LogBuffer, Logger},
    };

    fn demo() -> (Application, LogBuffer) {
        let (logger, buffer) = Logger::buffered(None);
        (build_app().unwrap().with_logger(logger), buffer)
    }

    #[test]
    fn test_all_commands_registered() {
        let (app, _) = demo();
        assert_eq!(
            app.command_names(),
            vec!["add", "concat", "echo", "fail", "greet", "sum"]
        );
        assert_eq!(app.description(), "Demo application for fncli.\nEvery command is a plain Rust function.");
    }

    #[test]
    fn test_greet_logs_message() {
        let (app, buffer) = demo();
        assert_eq!(app.run(["greet", "World"]).unwrap(), None);
        assert_eq!(buffer.lines(), vec!["Hello, World!"]);
    }

    #[test]
    fn test_add_coerces_integers() {
        let (app, _) = demo();
        assert_eq!(app.run(["add", "2", "3"]).unwrap(), Some(Value::Integer(5)));
    }

    #[test]
    fn test_sum_precision() {
        let (app, _) = demo();
        assert_eq!(
            app.run(["sum", "1.5", "2.25"]).unwrap(),
            Some(Value::Text("3.75".to_string()))
        );
        assert_eq!(
            app.run(["sum", "1.5", "2.25", "--prec", "0"]).unwrap(),
            Some(Value::Text("4".to_string()))
        );

        let err = app.run(["sum", "1", "2", "--prec", "-1"]).unwrap_err();
        assert!(matches!(err, CliError::Command(_)));
    }

    #[test]
    fn test_echo_flag() {
        let (app, _) = demo();
        assert_eq!(app.run(["echo", "hi"]).unwrap(), Some(Value::from("hi")));
        assert_eq!(app.run(["echo", "hi", "--cap"]).unwrap(), Some(Value::from("HI")));
    }

    #[test]
    fn test_concat_variadic() {
        let (app, _) = demo();
        assert_eq!(
            app.run(["concat", "--sep", "+", "a", "b", "c"]).unwrap(),
            Some(Value::from("a+b+c"))
        );
        assert_eq!(app.run(["concat"]).unwrap(), Some(Value::from("")));
    }

    #[test]
    fn test_fail_propagates() {
        let (app, _) = demo();
        let err = app.run(["fail"]).unwrap_err();
        assert_eq!(err.to_string(), "command failed on purpose");
    }
}
