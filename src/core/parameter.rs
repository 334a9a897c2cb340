//! Command parameters
//!
//! A parameter without a default is a required positional argument. One with a
//! default becomes an `--option`, or a flag when it is a boolean. A `List`
//! parameter collects the trailing positional arguments.

use crate::core::value::{ParamType, Value};
use clap::{Arg, ArgAction, builder::PossibleValuesParser};

/// Information about one command parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Identifier, as declared in the function signature
    pub name: String,
    /// Human-readable name used in help output
    pub pretty_name: String,
    /// Declared type, selects the coercion
    pub kind: ParamType,
    /// Description used in help output
    pub description: String,
    /// Allowed raw values, if restricted
    pub choices: Option<Vec<String>>,
    /// Default for optional parameters
    pub default: Option<Value>,
}

impl Parameter {
    /// Create a required parameter (or a variadic one for `ParamType::List`)
    pub fn new(name: impl Into<String>, kind: ParamType) -> Self {
        let name = name.into();
        let default = (kind == ParamType::List).then(|| Value::List(Vec::new()));
        Self {
            pretty_name: name.clone(),
            description: format!("Parameter '{}' of {}", name, kind.type_name()),
            name,
            kind,
            choices: None,
            default,
        }
    }

    /// Make the parameter optional with the given default
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the human-readable name
    #[must_use]
    pub fn pretty(mut self, pretty_name: impl Into<String>) -> Self {
        self.pretty_name = pretty_name.into();
        self
    }

    /// Set the help description
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Restrict the accepted raw values
    #[must_use]
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// True for parameters that must be given positionally
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    pub fn is_variadic(&self) -> bool {
        self.kind == ParamType::List
    }

    /// True for boolean options, which take no value on the command line
    pub fn is_flag(&self) -> bool {
        self.kind == ParamType::Boolean && !self.is_required()
    }

    /// Option name on the command line, e.g. `dry-run` for `dry_run`
    ///
    /// Leading underscores are dropped, so `_verbose` becomes `verbose`.
    pub fn long_name(&self) -> String {
        self.name.trim_start_matches('_').replace('_', "-")
    }

    /// Build the clap argument for this parameter
    pub(crate) fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.name.clone()).help(self.description.clone());

        if self.is_variadic() {
            return arg
                .value_name(self.pretty_name.clone())
                .num_args(0..)
                .allow_negative_numbers(true)
                .action(ArgAction::Append);
        }

        if self.is_flag() {
            let action = match self.default {
                Some(Value::Boolean(true)) => ArgAction::SetFalse,
                _ => ArgAction::SetTrue,
            };
            return arg.long(self.long_name()).action(action);
        }

        // Values such as `-5` belong to the parameter, not to an option
        let arg = arg
            .value_name(self.pretty_name.clone())
            .allow_negative_numbers(true)
            .action(ArgAction::Set);
        let arg = if self.is_required() {
            arg.required(true)
        } else {
            arg.long(self.long_name()).required(false)
        };

        match &self.choices {
            Some(choices) => arg.value_parser(PossibleValuesParser::new(choices.clone())),
            None => arg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_parameter() {
        let param = Parameter::new("name", ParamType::Text);
        assert!(param.is_required());
        assert!(!param.is_flag());
        assert_eq!(param.description, "Parameter 'name' of Text");
    }

    #[test]
    fn test_variadic_parameter_defaults_to_empty_list() {
        let param = Parameter::new("files", ParamType::List);
        assert!(param.is_variadic());
        assert!(!param.is_required());
        assert_eq!(param.default, Some(Value::List(Vec::new())));
    }

    #[test]
    fn test_boolean_with_default_is_flag() {
        let param = Parameter::new("dry_run", ParamType::Boolean).with_default(false);
        assert!(param.is_flag());
        assert_eq!(param.long_name(), "dry-run");
    }

    #[test]
    fn test_long_name_drops_leading_underscores() {
        let param = Parameter::new("_verbose", ParamType::Boolean).with_default(false);
        assert_eq!(param.long_name(), "verbose");
        assert_eq!(param.to_arg().get_long(), Some("verbose"));
    }

    #[test]
    fn test_text_and_list_accept_negative_numbers() {
        let text = Parameter::new("msg", ParamType::Text).to_arg();
        assert!(text.is_allow_negative_numbers_set());

        let list = Parameter::new("parts", ParamType::List).to_arg();
        assert!(list.is_allow_negative_numbers_set());
    }

    #[test]
    fn test_builder_methods() {
        let param = Parameter::new("color", ParamType::Text)
            .pretty("Color")
            .described("Paint color")
            .choices(["red", "green"])
            .with_default("red");
        assert_eq!(param.pretty_name, "Color");
        assert_eq!(param.description, "Paint color");
        assert_eq!(param.choices, Some(vec!["red".to_string(), "green".to_string()]));
        assert_eq!(param.default, Some(Value::Text("red".to_string())));
    }
}
