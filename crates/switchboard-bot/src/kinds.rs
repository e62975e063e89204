//! Value kinds specific to Discord.

use switchboard_commands::kind::invalid_value_message;
use switchboard_commands::{CustomKind, Value, ValueKind};
use switchboard_common::UserId;

/// Accepts `<@id>`, `<@!id>` or a bare id.
pub const MEMBER: CustomKind = CustomKind {
    name: "member",
    validate: is_member,
    parse: parse_member,
    error_message: member_error,
};

/// [`MEMBER`] as a [`ValueKind`].
pub const fn member() -> ValueKind {
    ValueKind::Custom(MEMBER)
}

/// Extracts the user id from a mention or bare id.
pub fn parse_member_id(raw: &str) -> Option<UserId> {
    let id = match raw.strip_prefix("<@").and_then(|rest| rest.strip_suffix('>')) {
        Some(inner) => inner.strip_prefix('!').unwrap_or(inner),
        None => raw,
    };

    // Ids are carried as `Value::Integer`, so they must fit an i64.
    id.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .and_then(|id| u64::try_from(id).ok())
        .map(UserId)
}

/// Reads back a value produced by [`MEMBER`].
pub fn member_of(value: i64) -> Option<UserId> {
    u64::try_from(value).ok().filter(|id| *id > 0).map(UserId)
}

/// Mention text for `user_id`.
pub fn mention(user_id: UserId) -> String {
    format!("<@{user_id}>")
}

fn is_member(raw: &str) -> bool {
    parse_member_id(raw).is_some()
}

fn parse_member(raw: &str) -> Option<Value> {
    let id = parse_member_id(raw)?;
    i64::try_from(id.0).ok().map(Value::Integer)
}

fn member_error(raw: &str) -> String {
    invalid_value_message(raw, "a member mention or id")
}
