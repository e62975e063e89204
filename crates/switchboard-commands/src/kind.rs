//! Value kinds: how raw tokens are validated, parsed and explained.

use crate::error::ParseError;
use crate::value::{Choice, Choices, TimeSpan, TimeUnit, Value};
use std::any::TypeId;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Generic message used when a kind has nothing more specific to say.
pub fn invalid_value_message(raw: &str, expected: &str) -> String {
    format!("Invalid value `{raw}`! Required value: {expected}.")
}

/// The three behaviors every flag and argument kind provides.
///
/// [`ValueParser::parse`] must only be called on input that
/// [`ValueParser::is_valid`] accepted. Implementations are pure and may be
/// called concurrently.
pub trait ValueParser {
    /// Whether `raw` is acceptable. Never panics.
    fn is_valid(&self, raw: &str) -> bool;

    /// Parses a validated token.
    fn parse(&self, raw: &str) -> Result<Value, ParseError>;

    /// User-facing explanation of why `raw` was rejected.
    fn error_message(&self, raw: &str) -> String;
}

/// Case-insensitive lookup table over a [`Choices`] type, built once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChoiceSet {
    set: TypeId,
    names: Vec<&'static str>,
    lookup: BTreeMap<String, &'static str>,
}

impl ChoiceSet {
    /// Builds the table for `T`.
    pub fn of<T: Choices>() -> Self {
        let names: Vec<_> = T::VARIANTS.iter().map(|variant| variant.name()).collect();
        let lookup = names
            .iter()
            .map(|name| (name.to_lowercase(), *name))
            .collect();

        Self {
            set: TypeId::of::<T>(),
            names,
            lookup,
        }
    }

    /// Canonical names in declaration order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Finds the constant matching `raw`, ignoring case.
    pub fn find(&self, raw: &str) -> Option<Choice> {
        self.lookup
            .get(&raw.to_lowercase())
            .map(|name| Choice::from_parts(name, self.set))
    }

    fn lowercase_names(&self) -> Vec<String> {
        self.names.iter().map(|name| name.to_lowercase()).collect()
    }
}

/// A kind supplied by the command author as plain functions.
///
/// Two custom kinds are equal when their names are equal, so give every
/// distinct bundle its own name.
#[derive(Clone, Copy)]
pub struct CustomKind {
    /// Identifies the bundle
    pub name: &'static str,
    /// Validity predicate
    pub validate: fn(&str) -> bool,
    /// Parser for validated input, `None` signals an internal inconsistency
    pub parse: fn(&str) -> Option<Value>,
    /// Error-message formatter
    pub error_message: fn(&str) -> String,
}

impl fmt::Debug for CustomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomKind").field("name", &self.name).finish_non_exhaustive()
    }
}

impl PartialEq for CustomKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CustomKind {}

impl Hash for CustomKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Every kind of value a flag or argument can carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Any text, taken as-is
    Text,
    /// A whole number within optional inclusive bounds
    Integer {
        /// Smallest accepted number
        min: Option<i64>,
        /// Largest accepted number
        max: Option<i64>,
    },
    /// One of a fixed set of names, case-insensitive
    Choice(ChoiceSet),
    /// `<amount><unit>` such as `10m` or `2days`
    TimeSpan,
    /// Author-supplied behaviors
    Custom(CustomKind),
}

impl ValueKind {
    /// Integer kind without bounds.
    pub const fn integer() -> Self {
        Self::Integer { min: None, max: None }
    }

    /// Choice kind over `T`.
    pub fn choice<T: Choices>() -> Self {
        Self::Choice(ChoiceSet::of::<T>())
    }

    /// Human description of what the kind accepts.
    pub fn expected(&self) -> String {
        match self {
            Self::Text => "any text".to_string(),
            Self::Integer { min: None, max: None } => "a whole number".to_string(),
            Self::Integer { min: Some(min), max: None } => format!("a whole number of at least {min}"),
            Self::Integer { min: None, max: Some(max) } => format!("a whole number of at most {max}"),
            Self::Integer { min: Some(min), max: Some(max) } => {
                format!("a whole number between {min} and {max}")
            }
            Self::Choice(set) => format!("one of {}", set.lowercase_names().join(", ")),
            Self::TimeSpan => "an amount of time such as 10m, 2h or 3days".to_string(),
            Self::Custom(custom) => custom.name.to_string(),
        }
    }
}

/// Splits `10m` into `("10", "m")`.
fn split_time_span(raw: &str) -> (&str, &str) {
    let unit_start = raw
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map_or(raw.len(), |(index, _)| index);

    raw.split_at(unit_start)
}

fn parse_time_span(raw: &str) -> Option<TimeSpan> {
    let (amount, unit) = split_time_span(raw);
    let amount = amount.parse::<u64>().ok()?;
    let unit = TimeUnit::from_alias(unit)?;

    Some(TimeSpan::new(amount, unit))
}

impl ValueParser for ValueKind {
    fn is_valid(&self, raw: &str) -> bool {
        match self {
            Self::Text => true,
            Self::Integer { min, max } => raw.parse::<i64>().is_ok_and(|number| {
                min.map_or(true, |min| number >= min) && max.map_or(true, |max| number <= max)
            }),
            Self::Choice(set) => set.find(raw).is_some(),
            Self::TimeSpan => parse_time_span(raw).is_some(),
            Self::Custom(custom) => (custom.validate)(raw),
        }
    }

    fn parse(&self, raw: &str) -> Result<Value, ParseError> {
        match self {
            Self::Text => Ok(Value::Text(raw.to_string())),
            Self::Integer { .. } => raw
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| ParseError::new(raw, self.expected(), e.to_string())),
            Self::Choice(set) => set
                .find(raw)
                .map(Value::Choice)
                .ok_or_else(|| ParseError::new(raw, self.expected(), "no constant with that name")),
            Self::TimeSpan => parse_time_span(raw)
                .map(Value::TimeSpan)
                .ok_or_else(|| ParseError::new(raw, self.expected(), "validity check should have rejected it")),
            Self::Custom(custom) => (custom.parse)(raw)
                .ok_or_else(|| ParseError::new(raw, custom.name, "custom parser rejected validated input")),
        }
    }

    fn error_message(&self, raw: &str) -> String {
        match self {
            Self::Choice(set) => format!(
                "Invalid value `{raw}`! The available values are: [{}]",
                set.lowercase_names().join(", ")
            ),
            Self::Custom(custom) => (custom.error_message)(raw),
            _ => invalid_value_message(raw, &self.expected()),
        }
    }
}
