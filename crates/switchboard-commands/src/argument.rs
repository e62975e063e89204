//! Argument specifications: positional parameters matched by order.

use crate::kind::ValueKind;
use crate::parameter::Parameter;
use crate::value::Value;

/// Optional settings of an [`Argument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentOptions {
    /// Fail the invocation when the argument is absent (default `true`)
    pub required: bool,
    /// Expect a value in this position (default `true`)
    pub requires_value: bool,
    /// Value used when the argument is absent (default none)
    pub default_value: Option<Value>,
    /// Consume every remaining positional token (default `false`)
    pub takes_rest: bool,
}

impl Default for ArgumentOptions {
    fn default() -> Self {
        Self {
            required: true,
            requires_value: true,
            default_value: None,
            takes_rest: false,
        }
    }
}

impl ArgumentOptions {
    /// An optional argument without a default.
    pub fn optional() -> Self {
        Self {
            required: false,
            ..Self::default()
        }
    }
}

/// One positional argument of a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Argument {
    name: String,
    kind: ValueKind,
    required: bool,
    requires_value: bool,
    default_value: Option<Value>,
    takes_rest: bool,
}

impl Argument {
    /// Creates a required argument.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self::with_options(name, kind, ArgumentOptions::default())
    }

    /// Creates an argument with explicit options.
    pub fn with_options(name: impl Into<String>, kind: ValueKind, options: ArgumentOptions) -> Self {
        Self {
            name: name.into(),
            kind,
            required: options.required,
            requires_value: options.requires_value,
            default_value: options.default_value,
            takes_rest: options.takes_rest,
        }
    }

    /// Whether the argument swallows every remaining positional token.
    pub const fn takes_rest(&self) -> bool {
        self.takes_rest
    }
}

impl Parameter for Argument {
    const KIND_LABEL: &'static str = "argument";

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &ValueKind {
        &self.kind
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn requires_value(&self) -> bool {
        self.requires_value
    }

    fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }
}
