//! Integration tests for switchboard-common crate.

use chrono::Duration;
use proptest::prelude::*;
use switchboard_common::{
    defuse_mentions, format_duration_human_readable, is_alphabetic_word, ChannelId, GuildId,
    SwitchboardError, UserId,
};

#[test]
fn test_id_display() {
    assert_eq!(format!("{}", GuildId(123_456_789)), "123456789");
    assert_eq!(format!("{}", ChannelId(1)), "1");
    assert_eq!(format!("{}", UserId(987_654_321)), "987654321");
}

#[test]
fn test_id_from_u64() {
    let guild: GuildId = 42.into();
    assert_eq!(guild.get(), 42);
}

#[test]
fn test_prefix_words() {
    assert!(is_alphabetic_word("xf"));
    assert!(!is_alphabetic_word("!!"));
}

#[test]
fn test_string_helpers() {
    assert_eq!(defuse_mentions("plain text"), "plain text");
    assert_eq!(defuse_mentions("hi @here"), "hi @\u{200b}here");
}

#[test]
fn test_duration_formatting() {
    assert_eq!(format_duration_human_readable(Duration::days(2)), "2 days");
    assert_eq!(format_duration_human_readable(Duration::seconds(-5)), "0 seconds");
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error: SwitchboardError = io.into();
    assert!(error.to_string().starts_with("I/O error"));
}

proptest! {
    #[test]
    fn defused_text_never_pings_everyone(text in "\\PC*") {
        let defused = defuse_mentions(&text);
        prop_assert!(!defused.contains("@everyone"));
        prop_assert!(!defused.contains("@here"));
    }

    #[test]
    fn words_with_symbols_are_not_alphabetic(word in "[a-z]{0,5}[!?$.][a-z]{0,5}") {
        prop_assert!(!is_alphabetic_word(&word));
    }
}
