//! Commands: named handlers with a parameter signature

use crate::{
    core::{
        dispatcher::Invocation,
        parameter::Parameter,
        value::{IntoOutcome, Outcome},
    },
    utils::text::{command_name, split_doc},
};
use clap::ColorChoice;
use std::{fmt, sync::Arc};

/// Type-erased command body
pub type Handler = Arc<dyn Fn(&Invocation) -> Outcome + Send + Sync>;

/// A named, invocable unit registered on an application
#[derive(Clone)]
pub struct Command {
    name: String,
    description: String,
    documentation: String,
    parameters: Vec<Parameter>,
    handler: Handler,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl Command {
    /// Create a command from a function name and its body
    ///
    /// The command name is derived from `function_name` (`do_it` → `do-it`).
    pub fn new<F, R>(function_name: &str, handler: F) -> Self
    where
        F: Fn(&Invocation) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        let name = command_name(function_name);
        Self {
            description: name.clone(),
            documentation: String::new(),
            name,
            parameters: Vec::new(),
            handler: Arc::new(move |invocation: &Invocation| handler(invocation).into_outcome()),
        }
    }

    /// Override the derived name
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        let previous = std::mem::replace(&mut self.name, name.into());
        if self.description == previous {
            self.description = self.name.clone();
        }
        self
    }

    /// Set description and documentation from doc text
    #[must_use]
    pub fn doc(mut self, doc: &str) -> Self {
        let (description, documentation) = split_doc(doc, &self.name);
        self.description = description;
        self.documentation = documentation;
        self
    }

    /// Append a parameter to the signature
    #[must_use]
    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short description, shown in the command list
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Long description, shown by `<command> --help`
    pub fn documentation(&self) -> &str {
        &self.documentation
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Run the command body
    pub fn call(&self, invocation: &Invocation) -> Outcome {
        (self.handler)(invocation)
    }

    /// Build the clap parser for this command's arguments
    pub(crate) fn to_clap(&self, app_name: &str) -> clap::Command {
        let mut cmd = clap::Command::new(self.name.clone())
            .about(self.description.clone())
            .color(ColorChoice::Never)
            .disable_version_flag(true)
            .args(self.parameters.iter().map(Parameter::to_arg));

        if !self.documentation.is_empty() {
            cmd = cmd.long_about(format!("{}\n\n{}", self.description, self.documentation));
        }

        cmd.bin_name(format!("{} {}", app_name, self.name))
    }
}

/// Build a [`Command`] from a plain function
///
/// The command name comes from the function name, the parameters and their
/// coercion from the declared types, and the help text from doc comments.
/// Parameters with `= default` become options (flags for `bool`).
///
/// ```
/// use fncli::{Application, command};
///
/// /// Add two numbers
/// fn add(a: i64, b: i64) -> i64 {
///     a + b
/// }
///
/// let mut app = Application::new("calc", "A calculator", "1.0.0")?;
/// app.command(command!(add(a: i64, b: i64)))?;
/// assert_eq!(app.run(["add", "2", "3"])?, Some(fncli::Value::Integer(5)));
/// # Ok::<(), fncli::CliError>(())
/// ```
#[macro_export]
macro_rules! command {
    (
        $(#[doc = $doc:expr])*
        $func:ident ( $($param:ident : $ty:ty $(= $default:expr)?),* $(,)? )
    ) => {{
        let docs: &[&str] = &[$($doc),*];
        $crate::Command::new(
            stringify!($func),
            |invocation: &$crate::Invocation| -> $crate::Outcome {
                $crate::IntoOutcome::into_outcome(
                    $func($(invocation.get::<$ty>(stringify!($param))?),*)
                )
            },
        )
        .doc(&docs.join("\n"))
        $(
            .param(
                $crate::Parameter::new(
                    stringify!($param),
                    <$ty as $crate::ArgType>::PARAM_TYPE,
                )
                $(.with_default($crate::ArgType::into_value({
                    let default: $ty = $default;
                    default
                })))?
            )
        )*
    }};
}
