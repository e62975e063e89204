//! Test utilities and shared test helpers for Switchboard.
//!
//! Fixtures and helpers shared by the unit and integration tests of every
//! crate in the workspace. Enabled with the `testing` feature.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Discord-related test utilities.
pub mod discord_fixtures {
    use crate::{ChannelId, GuildId, RoleId, UserId};

    /// Create a test guild ID.
    pub fn test_guild_id() -> GuildId {
        GuildId(112_233_445_566_778_899)
    }

    /// Create a test channel ID.
    pub fn test_channel_id() -> ChannelId {
        ChannelId(123_456_789_012_345_678)
    }

    /// Create a test user ID.
    pub fn test_user_id() -> UserId {
        UserId(987_654_321_098_765_432)
    }

    /// Create a test role ID.
    pub fn test_role_id() -> RoleId {
        RoleId(555_555_555_555_555_555)
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// A minimal valid configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
discord:
  token: "test_token"
"#
    }

    /// A full configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "discord:\n",
            "  token: \"test_token_full\"\n",
            "  bot_administrators: [987654321098765432]\n",
            "\n",
            "commands:\n",
            "  default_prefix: \">\"\n",
            "  error_replies: true\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: \"compact\"\n",
            "\n",
            "guilds:\n",
            "  \"112233445566778899\":\n",
            "    prefix: \"bot\"\n",
            "    administrator_roles:\n",
            "      \"555555555555555555\": 2\n",
        )
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for symbolic command prefixes such as `!` or `>>`.
    pub fn symbolic_prefix_strategy() -> impl Strategy<Value = String> {
        r"[!?.>$%&*+=~]{1,3}".prop_map(|s| s)
    }

    /// Strategy for alphabetic word prefixes such as `bot`.
    pub fn alphabetic_prefix_strategy() -> impl Strategy<Value = String> {
        r"[a-zA-Z]{1,8}".prop_map(|s| s)
    }

    /// Strategy for command names.
    pub fn command_name_strategy() -> impl Strategy<Value = String> {
        r"[a-z][a-z0-9]{0,15}".prop_map(|s| s)
    }
}
