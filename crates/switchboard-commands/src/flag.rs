//! Flag specifications: named switches such as `-m @someone`.

use crate::kind::ValueKind;
use crate::parameter::Parameter;
use crate::value::Value;

/// Optional settings of a [`Flag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagOptions {
    /// Fail the invocation when the flag is absent (default `true`)
    pub required: bool,
    /// Expect a value after the flag (default `true`)
    pub requires_value: bool,
    /// Value used when the flag is absent (default none)
    pub default_value: Option<Value>,
}

impl Default for FlagOptions {
    fn default() -> Self {
        Self {
            required: true,
            requires_value: true,
            default_value: None,
        }
    }
}

impl FlagOptions {
    /// An optional flag without a default.
    pub fn optional() -> Self {
        Self {
            required: false,
            ..Self::default()
        }
    }
}

/// One named flag of a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flag {
    short_name: String,
    long_name: String,
    kind: ValueKind,
    required: bool,
    requires_value: bool,
    default_value: Option<Value>,
}

impl Flag {
    /// Creates a required, value-bearing flag.
    pub fn new(short_name: impl Into<String>, long_name: impl Into<String>, kind: ValueKind) -> Self {
        Self::with_options(short_name, long_name, kind, FlagOptions::default())
    }

    /// Creates a flag with explicit options.
    pub fn with_options(
        short_name: impl Into<String>,
        long_name: impl Into<String>,
        kind: ValueKind,
        options: FlagOptions,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            long_name: long_name.into(),
            kind,
            required: options.required,
            requires_value: options.requires_value,
            default_value: options.default_value,
        }
    }

    /// Name matched after `-` in raw input.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Name used in usage and help, also matched after `--`.
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    /// Whether `token` (without dashes) names this flag.
    pub fn matches(&self, token: &str) -> bool {
        token == self.short_name || token == self.long_name
    }
}

impl Parameter for Flag {
    const KIND_LABEL: &'static str = "flag";

    fn name(&self) -> &str {
        &self.long_name
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
