//! Help categories commands are grouped under.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of command categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Server moderation
    Administration,
    /// Bot maintenance
    BotAdministrator,
    /// Music playback
    Music,
    /// Informational
    Info,
    /// Leveling
    Leveling,
    /// Settings and configuration
    Settings,
    /// Fun
    Fun,
    /// Everything else
    #[default]
    Other,
}

impl Category {
    /// Every category in help order.
    pub const ALL: [Self; 8] = [
        Self::Administration,
        Self::BotAdministrator,
        Self::Music,
        Self::Info,
        Self::Leveling,
        Self::Settings,
        Self::Fun,
        Self::Other,
    ];

    /// Display name used in help pages.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Administration => "Administration",
            Self::BotAdministrator => "Bot Administrator",
            Self::Music => "Music",
            Self::Info => "Info",
            Self::Leveling => "Leveling",
            Self::Settings => "Settings",
            Self::Fun => "Fun",
            Self::Other => "Other",
        }
    }

    /// Fixed one-line description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Administration => "Commands related with administration.",
            Self::BotAdministrator => "Commands only for bot administrators.",
            Self::Music => "Commands related with playing music.",
            Self::Info => "Commands which give information.",
            Self::Leveling => "Leveling commands. Somewhat useless.",
            Self::Settings => "Commands that are used for settings/configurations.",
            Self::Fun => "Random commands for fun.",
            Self::Other => "Other commands which do not fit in any of the above categories.",
        }
    }

    /// Case-insensitive lookup by display name or serialized name.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();

        Self::ALL.into_iter().find(|category| {
            category
                .display_name()
                .replace(' ', "")
                .eq_ignore_ascii_case(&normalized)
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
