//! Common type definitions and newtype wrappers for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Returns the raw snowflake value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

snowflake! {
    /// A Discord guild ID.
    GuildId
}

snowflake! {
    /// A Discord channel ID.
    ChannelId
}

snowflake! {
    /// A Discord user ID.
    UserId
}

snowflake! {
    /// A Discord role ID.
    RoleId
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_display_is_raw_number() {
        assert_eq!(GuildId(123_456_789).to_string(), "123456789");
        assert_eq!(UserId(42).to_string(), "42");
    }

    #[test]
    fn test_ids_usable_as_map_keys() {
        let mut map = HashMap::new();
        map.insert(ChannelId(1), "general");
        assert_eq!(map.get(&ChannelId(1)), Some(&"general"));
        assert_eq!(map.get(&ChannelId(2)), None);
    }

    #[test]
    fn test_serde_is_transparent() {
        let serialized = serde_json::to_string(&RoleId(77)).unwrap();
        assert_eq!(serialized, "77");

        let deserialized: RoleId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, RoleId(77));
    }
}
