//! Behavior shared by flags and arguments.

use crate::error::{CommandError, ParseError};
use crate::kind::{ValueKind, ValueParser};
use crate::value::Value;

/// A declared input of a command: either a [`crate::Flag`] or an
/// [`crate::Argument`].
pub trait Parameter {
    /// `"flag"` or `"argument"`, used in user messages.
    const KIND_LABEL: &'static str;

    /// Name shown to users (the long name for flags).
    fn name(&self) -> &str;

    /// How raw values are validated and parsed.
    fn kind(&self) -> &ValueKind;

    /// Whether the invocation fails when the parameter is absent.
    fn is_required(&self) -> bool;

    /// Whether a value must follow the parameter.
    fn requires_value(&self) -> bool;

    /// Value used when the parameter is absent and optional.
    fn default_value(&self) -> Option<&Value>;

    /// Side-effect free validity check.
    fn is_valid_value(&self, raw: &str) -> bool {
        self.kind().is_valid(raw)
    }

    /// Parses a value that passed [`Parameter::is_valid_value`].
    fn parse(&self, raw: &str) -> Result<Value, ParseError> {
        self.kind().parse(raw)
    }

    /// User-facing message for a rejected value.
    fn error_message(&self, raw: &str) -> String {
        self.kind().error_message(raw)
    }

    /// Reads the default, failing loudly when none was declared.
    fn require_default(&self) -> Result<&Value, CommandError> {
        self.default_value().ok_or_else(|| {
            CommandError::configuration_fault(format!(
                "{} `{}` has no default value",
                Self::KIND_LABEL,
                self.name()
            ))
        })
    }

    /// Validates then parses `raw`, turning a rejection into
    /// [`CommandError::InvalidValue`].
    fn resolve(&self, raw: &str) -> Result<Value, CommandError> {
        if !self.is_valid_value(raw) {
            return Err(CommandError::InvalidValue {
                name: self.name().to_string(),
                message: self.error_message(raw),
            });
        }

        Ok(self.parse(raw)?)
    }
}
