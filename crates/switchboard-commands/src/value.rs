//! Parsed parameter values.
//!
//! Every flag and argument parses into one [`Value`]. The set of value types
//! is closed so usage rendering and error formatting stay exhaustive.

use std::any::TypeId;
use std::fmt;

/// Unit of a [`TimeSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeUnit {
    /// Days
    Days,
    /// Hours
    Hours,
    /// Minutes
    Minutes,
    /// Seconds
    Seconds,
}

/// Accepted spellings of every [`TimeUnit`], matched case-insensitively.
pub const TIME_UNIT_ALIASES: &[(&str, TimeUnit)] = &[
    ("d", TimeUnit::Days),
    ("day", TimeUnit::Days),
    ("days", TimeUnit::Days),
    ("h", TimeUnit::Hours),
    ("hr", TimeUnit::Hours),
    ("hrs", TimeUnit::Hours),
    ("hour", TimeUnit::Hours),
    ("hours", TimeUnit::Hours),
    ("m", TimeUnit::Minutes),
    ("min", TimeUnit::Minutes),
    ("mins", TimeUnit::Minutes),
    ("minute", TimeUnit::Minutes),
    ("minutes", TimeUnit::Minutes),
    ("s", TimeUnit::Seconds),
    ("sec", TimeUnit::Seconds),
    ("secs", TimeUnit::Seconds),
    ("second", TimeUnit::Seconds),
    ("seconds", TimeUnit::Seconds),
];

impl TimeUnit {
    /// Looks a unit up by one of its aliases, ignoring case.
    pub fn from_alias(alias: &str) -> Option<Self> {
        TIME_UNIT_ALIASES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(alias))
            .map(|(_, unit)| *unit)
    }

    /// Shortest spelling, used when rendering a span.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Days => "d",
            Self::Hours => "h",
            Self::Minutes => "m",
            Self::Seconds => "s",
        }
    }

    /// Length of one unit in seconds.
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Days => 86_400,
            Self::Hours => 3_600,
            Self::Minutes => 60,
            Self::Seconds => 1,
        }
    }
}

/// An amount of time as typed by the user, e.g. `10m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSpan {
    /// How many units
    pub amount: u64,
    /// Which unit
    pub unit: TimeUnit,
}

impl TimeSpan {
    /// Creates a new span.
    pub const fn new(amount: u64, unit: TimeUnit) -> Self {
        Self { amount, unit }
    }

    /// Converts the span into a [`chrono::Duration`], `None` on overflow.
    pub fn to_duration(self) -> Option<chrono::Duration> {
        let amount = i64::try_from(self.amount).ok()?;
        let seconds = amount.checked_mul(self.unit.seconds())?;
        chrono::Duration::try_seconds(seconds)
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

/// A closed set of named constants a choice parameter accepts.
///
/// ```
/// use switchboard_commands::Choices;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Color { Red, Green }
///
/// impl Choices for Color {
///     const VARIANTS: &'static [Self] = &[Color::Red, Color::Green];
///
///     fn name(self) -> &'static str {
///         match self {
///             Color::Red => "RED",
///             Color::Green => "GREEN",
///         }
///     }
/// }
/// ```
pub trait Choices: Sized + Copy + 'static {
    /// Every constant, in declaration order.
    const VARIANTS: &'static [Self];

    /// Canonical name of the constant.
    fn name(self) -> &'static str;

    /// Finds the constant with the given canonical name.
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|variant| variant.name() == name)
    }
}

/// One constant of a choice set.
///
/// Constants of different [`Choices`] types never compare equal, even when
/// they share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Choice {
    name: &'static str,
    set: TypeId,
}

impl Choice {
    /// Wraps a typed constant.
    pub fn of<T: Choices>(variant: T) -> Self {
        Self::from_parts(variant.name(), TypeId::of::<T>())
    }

    pub(crate) const fn from_parts(name: &'static str, set: TypeId) -> Self {
        Self { name, set }
    }

    /// Canonical (declared) name of the constant.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Converts back into the typed constant; `None` for a constant of
    /// another set.
    pub fn to_variant<T: Choices>(&self) -> Option<T> {
        if self.set != TypeId::of::<T>() {
            return None;
        }
        T::from_name(self.name)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name.to_lowercase())
    }
}

/// A parsed flag or argument value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Free text
    Text(String),
    /// Whole number
    Integer(i64),
    /// Enumeration constant
    Choice(Choice),
    /// Amount of time
    TimeSpan(TimeSpan),
}

impl Value {
    /// Value holding a choice constant, for use as a typed default.
    pub fn choice<T: Choices>(variant: T) -> Self {
        Self::Choice(Choice::of(variant))
    }

    /// Short name of the variant, used in fault messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Choice(_) => "choice",
            Self::TimeSpan(_) => "time span",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(number) => write!(f, "{number}"),
            Self::Choice(choice) => write!(f, "{choice}"),
            Self::TimeSpan(span) => write!(f, "{span}"),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Integer(number)
    }
}

impl From<TimeSpan> for Value {
    fn from(span: TimeSpan) -> Self {
        Self::TimeSpan(span)
    }
}

/// Typed extraction out of a [`Value`].
pub trait FromValue: Sized {
    /// Returns `None` when the value holds a different variant.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(number) => Some(*number),
            _ => None,
        }
    }
}

impl FromValue for TimeSpan {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::TimeSpan(span) => Some(*span),
            _ => None,
        }
    }
}

impl FromValue for Choice {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Choice(choice) => Some(*choice),
            _ => None,
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shade {
        Light,
        Dark,
    }

    impl Choices for Shade {
        const VARIANTS: &'static [Self] = &[Self::Light, Self::Dark];

        fn name(self) -> &'static str {
            match self {
                Self::Light => "LIGHT",
                Self::Dark => "DARK",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Theme {
        Light,
    }

    impl Choices for Theme {
        const VARIANTS: &'static [Self] = &[Self::Light];

        fn name(self) -> &'static str {
            "LIGHT"
        }
    }

    #[test]
    fn test_choice_round_trips_through_its_own_set_only() {
        let light = Choice::of(Shade::Light);
        assert_eq!(light.name(), "LIGHT");
        assert_eq!(light.to_variant::<Shade>(), Some(Shade::Light));
        assert_eq!(light.to_variant::<Theme>(), None);
        assert_ne!(light, Choice::of(Theme::Light));
        assert_ne!(Value::choice(Shade::Light), Value::choice(Theme::Light));
        assert_eq!(Shade::from_name("DARK"), Some(Shade::Dark));
        assert_eq!(Shade::from_name("dark"), None);
    }

    #[test]
    fn test_every_unit_has_three_to_five_aliases() {
        for unit in [TimeUnit::Days, TimeUnit::Hours, TimeUnit::Minutes, TimeUnit::Seconds] {
            let count = TIME_UNIT_ALIASES.iter().filter(|(_, u)| *u == unit).count();
            assert!((3..=5).contains(&count), "{unit:?} has {count} aliases");
        }
    }

    #[test]
    fn test_alias_lookup_ignores_case() {
        assert_eq!(TimeUnit::from_alias("H"), Some(TimeUnit::Hours));
        assert_eq!(TimeUnit::from_alias("Minutes"), Some(TimeUnit::Minutes));
        assert_eq!(TimeUnit::from_alias("weeks"), None);
        assert_eq!(TimeUnit::from_alias(""), None);
    }

    #[test]
    fn test_time_span_display_and_duration() {
        let span = TimeSpan::new(10, TimeUnit::Minutes);
        assert_eq!(span.to_string(), "10m");
        assert_eq!(span.to_duration(), Some(chrono::Duration::minutes(10)));
        assert_eq!(TimeSpan::new(u64::MAX, TimeUnit::Days).to_duration(), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("hello").to_string(), "hello");
        assert_eq!(Value::Integer(-3).to_string(), "-3");
        assert_eq!(Value::choice(Shade::Dark).to_string(), "dark");
    }

    #[test]
    fn test_from_value_rejects_other_variants() {
        assert_eq!(String::from_value(&Value::Integer(1)), None);
        assert_eq!(i64::from_value(&Value::Integer(1)), Some(1));
        assert_eq!(
            TimeSpan::from_value(&Value::TimeSpan(TimeSpan::new(1, TimeUnit::Days))),
            Some(TimeSpan::new(1, TimeUnit::Days))
        );
    }
}
