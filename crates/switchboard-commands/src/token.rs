//! Splits raw argument text into positional tokens and flag occurrences.

use crate::error::TokenizeError;
use crate::flag::Flag;
use crate::parameter::Parameter;

/// One occurrence of a declared flag in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagOccurrence {
    /// Index of the flag in the command's declared flags
    pub flag_index: usize,
    /// Value following the flag, if any
    pub value: Option<String>,
}

/// Result of tokenizing raw argument text against a set of flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    /// Tokens not consumed by a flag, in input order
    pub positional: Vec<String>,
    /// Flag occurrences in input order
    pub flags: Vec<FlagOccurrence>,
}

impl Tokens {
    /// The last value given for the flag at `flag_index`, if it occurred.
    pub fn last_occurrence(&self, flag_index: usize) -> Option<&FlagOccurrence> {
        self.flags
            .iter()
            .rev()
            .find(|occurrence| occurrence.flag_index == flag_index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Word {
    text: String,
    quoted: bool,
}

/// Splits on whitespace; double quotes group text and are removed.
fn split_words(raw: &str) -> Result<Vec<Word>, TokenizeError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;
    let mut open_quote: Option<usize> = None;

    for (index, c) in raw.char_indices() {
        match c {
            '"' => {
                open_quote = match open_quote {
                    Some(_) => None,
                    None => Some(index),
                };
                in_word = true;
                quoted = true;
            }
            c if c.is_whitespace() && open_quote.is_none() => {
                if in_word {
                    words.push(Word { text: std::mem::take(&mut current), quoted });
                    in_word = false;
                    quoted = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(position) = open_quote {
        return Err(TokenizeError::UnterminatedQuote { position });
    }
    if in_word {
        words.push(Word { text: current, quoted });
    }

    Ok(words)
}

/// Finds the declared flag a word names, with any inline `=value`.
fn match_flag<'w>(word: &'w Word, flags: &[Flag]) -> Option<(usize, Option<&'w str>)> {
    if word.quoted {
        return None;
    }

    let body = word
        .text
        .strip_prefix("--")
        .or_else(|| word.text.strip_prefix('-'))?;
    let (name, inline) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    flags
        .iter()
        .position(|flag| flag.matches(name))
        .map(|index| (index, inline))
}

/// Tokenizes `raw` against the declared `flags`.
///
/// A word starting with `-` or `--` that names a declared flag starts a
/// flag occurrence. Value-bearing flags take an inline `=value` or the next
/// word, unless that word is itself a flag. Everything else, including
/// quoted text and negative numbers, stays positional.
pub fn tokenize(raw: &str, flags: &[Flag]) -> Result<Tokens, TokenizeError> {
    let words = split_words(raw)?;
    let mut tokens = Tokens::default();
    let mut iter = words.iter().peekable();

    while let Some(word) = iter.next() {
        let Some((flag_index, inline)) = match_flag(word, flags) else {
            tokens.positional.push(word.text.clone());
            continue;
        };

        let value = match inline {
            Some(inline) => Some(inline.to_string()),
            None if flags[flag_index].requires_value() => iter
                .next_if(|next| match_flag(next, flags).is_none())
                .map(|next| next.text.clone()),
            None => None,
        };

        tokens.flags.push(FlagOccurrence { flag_index, value });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::FlagOptions;
    use crate::kind::ValueKind;

    fn flags() -> Vec<Flag> {
        vec![
            Flag::new("m", "member", ValueKind::Text),
            Flag::with_options(
                "s",
                "silent",
                ValueKind::Text,
                FlagOptions {
                    required: false,
                    requires_value: false,
                    default_value: None,
                },
            ),
            Flag::new("t", "time", ValueKind::TimeSpan),
        ]
    }

    #[test]
    fn test_positional_only() {
        let tokens = tokenize("  hello   world ", &flags()).unwrap();
        assert_eq!(tokens.positional, vec!["hello", "world"]);
        assert!(tokens.flags.is_empty());
    }

    #[test]
    fn test_quoted_segments_stay_together() {
        let tokens = tokenize(r#"say "hello there" "-m""#, &flags()).unwrap();
        assert_eq!(tokens.positional, vec!["say", "hello there", "-m"]);
        assert!(tokens.flags.is_empty());
    }

    #[test]
    fn test_empty_quotes_make_an_empty_token() {
        let tokens = tokenize(r#"a "" b"#, &[]).unwrap();
        assert_eq!(tokens.positional, vec!["a", "", "b"]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            tokenize(r#"say "oops"#, &[]).unwrap_err(),
            TokenizeError::UnterminatedQuote { position: 4 }
        );
    }

    #[test]
    fn test_flag_values() {
        let tokens = tokenize("-m bob --time 10m extra", &flags()).unwrap();
        assert_eq!(tokens.positional, vec!["extra"]);
        assert_eq!(
            tokens.flags,
            vec![
                FlagOccurrence { flag_index: 0, value: Some("bob".to_string()) },
                FlagOccurrence { flag_index: 2, value: Some("10m".to_string()) },
            ]
        );
    }

    #[test]
    fn test_inline_value() {
        let tokens = tokenize("-t=5h", &flags()).unwrap();
        assert_eq!(tokens.last_occurrence(2).unwrap().value.as_deref(), Some("5h"));
    }

    #[test]
    fn test_presence_flag_does_not_take_value() {
        let tokens = tokenize("-s hello", &flags()).unwrap();
        assert_eq!(tokens.positional, vec!["hello"]);
        assert_eq!(tokens.flags, vec![FlagOccurrence { flag_index: 1, value: None }]);
    }

    #[test]
    fn test_value_flag_followed_by_flag_has_no_value() {
        let tokens = tokenize("-m -t 1d", &flags()).unwrap();
        assert_eq!(tokens.last_occurrence(0).unwrap().value, None);
        assert_eq!(tokens.last_occurrence(2).unwrap().value.as_deref(), Some("1d"));
    }

    #[test]
    fn test_unknown_dash_tokens_stay_positional() {
        let tokens = tokenize("-5 -x --nope", &flags()).unwrap();
        assert_eq!(tokens.positional, vec!["-5", "-x", "--nope"]);
    }

    #[test]
    fn test_last_occurrence_wins() {
        let tokens = tokenize("-m alice -m bob", &flags()).unwrap();
        assert_eq!(tokens.last_occurrence(0).unwrap().value.as_deref(), Some("bob"));
    }
}
