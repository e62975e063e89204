//! Shared string and time helpers.

use chrono::Duration;

/// Returns true if `input` is non-empty and made of alphabetic characters only.
pub fn is_alphabetic_word(input: &str) -> bool {
    !input.is_empty() && input.chars().all(char::is_alphabetic)
}

/// Defuses mass mentions so echoed user input cannot ping a whole guild.
pub fn defuse_mentions(input: &str) -> String {
    input
        .replace("@everyone", "@\u{200b}everyone")
        .replace("@here", "@\u{200b}here")
}

/// Formats a duration as a readable phrase, e.g. `1 day, 2 hours`.
pub fn format_duration_human_readable(duration: Duration) -> String {
    let mut seconds = duration.num_seconds().max(0);

    if seconds == 0 {
        return "0 seconds".to_string();
    }

    let mut parts = Vec::with_capacity(4);

    for (unit, size) in [("day", 86_400), ("hour", 3_600), ("minute", 60), ("second", 1)] {
        let amount = seconds / size;
        seconds %= size;

        match amount {
            0 => {}
            1 => parts.push(format!("1 {unit}")),
            n => parts.push(format!("{n} {unit}s")),
        }
    }

    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_alphabetic_word() {
        assert!(is_alphabetic_word("bot"));
        assert!(is_alphabetic_word("Bot"));
        assert!(!is_alphabetic_word("!"));
        assert!(!is_alphabetic_word("b0t"));
        assert!(!is_alphabetic_word(""));
    }

    #[test]
    fn test_defuse_mentions() {
        let defused = defuse_mentions("hi @everyone and @here");
        assert!(!defused.contains("@everyone"));
        assert!(!defused.contains("@here"));
    }

    #[test]
    fn test_format_duration_human_readable() {
        assert_eq!(format_duration_human_readable(Duration::zero()), "0 seconds");
        assert_eq!(format_duration_human_readable(Duration::minutes(10)), "10 minutes");
        assert_eq!(
            format_duration_human_readable(Duration::hours(26) + Duration::seconds(1)),
            "1 day, 2 hours, 1 second"
        );
    }
}
