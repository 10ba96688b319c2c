//! `split` and `explode`.
//!
//! Both cut `text` at every non-overlapping match found in `text[offset..]`.
//! Text before `offset` is never searched and stays glued to the first token.
//! Tokens are trimmed (when a [`CharSet`] is given) and empty ones dropped,
//! including the single token produced when nothing matched.

use super::Re;
use super::coords::char_to_byte;
use crate::charset::CharSet;

/// What happens to the matched separator text.
///
/// ```text
/// "a,b,c" split on ","
///
/// KeepSeparator       ["a", ",", "b", ",", "c"]
/// IgnoreSeparator     ["a", "b", "c"]
/// KeepSeparatorBack   ["a,", "b,", "c"]      separator ends the previous token
/// KeepSeparatorFront  ["a", ",b", ",c"]      separator starts the next token
/// ```
///
/// The lexer reads `Back`/`Front` the other way round; see
/// [`LexOptions`](crate::LexOptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExplodeOption {
    #[default]
    KeepSeparator,
    KeepSeparatorBack,
    KeepSeparatorFront,
    IgnoreSeparator,
}

impl Re {
    /// Tokens between separators; separators are dropped.
    pub fn split(&self, text: &str, offset: usize, trim: Option<&CharSet>) -> Vec<String> {
        self.explode(text, offset, trim, ExplodeOption::IgnoreSeparator)
    }

    pub fn explode(&self, text: &str, offset: usize, trim: Option<&CharSet>, policy: ExplodeOption) -> Vec<String> {
        let piece = |s: &str| trim.map_or(s, |set| set.trim(s)).to_string();

        let start = char_to_byte(text, offset);
        let mut tokens: Vec<String> = Vec::new();
        let mut cursor = 0;

        for m in self.regex.find_iter(&text[start..]) {
            let (sep_start, sep_end) = (start + m.start(), start + m.end());
            if cursor != sep_start {
                tokens.push(piece(&text[cursor..sep_start]));
            }
            match policy {
                ExplodeOption::KeepSeparator => {
                    tokens.push(piece(m.as_str()));
                    cursor = sep_end;
                }
                ExplodeOption::IgnoreSeparator => cursor = sep_end,
                ExplodeOption::KeepSeparatorBack => {
                    let sep = piece(m.as_str());
                    match tokens.last_mut() {
                        Some(prev) => prev.push_str(&sep),
                        None => tokens.push(sep),
                    }
                    cursor = sep_end;
                }
                // Leave the cursor on the separator so the next slice starts with it.
                ExplodeOption::KeepSeparatorFront => cursor = sep_start,
            }
        }

        if cursor < text.len() {
            tokens.push(piece(&text[cursor..]));
        }
        tokens.retain(|t| !t.is_empty());
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Hello, SwiftyRe. link: https://github.com/wl879/SwiftyRe";

    #[test]
    fn split_drops_separators() {
        let re = Re::new("[,.:] +", "");
        assert_eq!(re.split(SAMPLE, 0, None), vec!["Hello", "SwiftyRe", "link", "https://github.com/wl879/SwiftyRe"]);
    }

    #[test]
    fn explode_policies() {
        let re = Re::new(",", "");
        let cases: Vec<(ExplodeOption, Vec<&str>)> = vec![
            (ExplodeOption::KeepSeparator, vec!["a", ",", "b", ",", "c"]),
            (ExplodeOption::IgnoreSeparator, vec!["a", "b", "c"]),
            (ExplodeOption::KeepSeparatorBack, vec!["a,", "b,", "c"]),
            (ExplodeOption::KeepSeparatorFront, vec!["a", ",b", ",c"]),
        ];
        for (policy, expected) in cases {
            assert_eq!(re.explode("a,b,c", 0, None, policy), expected, "policy {policy:?}");
        }
    }

    #[test]
    fn explode_leading_and_adjacent_separators() {
        let re = Re::new(",", "");
        assert_eq!(re.explode(",a,,b", 0, None, ExplodeOption::KeepSeparatorBack), vec![",", "a,,", "b"]);
        assert_eq!(re.explode(",a,,b", 0, None, ExplodeOption::KeepSeparatorFront), vec![",a", ",", ",b"]);
    }

    #[test]
    fn keep_separator_concatenates_back_to_input() {
        let re = Re::new(r"\s*[;|]\s*", "");
        let text = "alpha ; beta|gamma ;delta";
        assert_eq!(re.explode(text, 0, None, ExplodeOption::KeepSeparator).concat(), text);
    }

    #[test]
    fn ignore_separator_rebuilds_with_rematched_separators() {
        let re = Re::new(r"\s*,\s*", "g");
        let text = "a , b,c ,d";
        let tokens = re.split(text, 0, None);
        let separators = re.match_at(text, 0).unwrap();

        let mut rebuilt = String::new();
        for (i, token) in tokens.iter().enumerate() {
            rebuilt.push_str(token);
            rebuilt.push_str(separators.get(i).unwrap_or_default());
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn offset_prefix_stays_in_first_token() {
        let re = Re::new(",", "");
        assert_eq!(re.split("a,b,c", 2, None), vec!["a,b", "c"]);
    }

    #[test]
    fn trim_and_empty_filtering() {
        let re = Re::new(",", "");
        let ws = CharSet::whitespace();
        assert_eq!(re.split(" a , ,b ", 0, Some(&ws)), vec!["a", "b"]);
        assert_eq!(re.split("  ", 0, Some(&ws)), Vec::<String>::new());
        assert_eq!(re.split("", 0, None), Vec::<String>::new());
        assert_eq!(re.split("abc", 0, None), vec!["abc"]);
    }

    #[test]
    fn split_never_yields_empty_tokens() {
        let re = Re::new("x*", "");
        for text in ["", "x", "axxb", "xxaxx"] {
            assert!(re.split(text, 0, None).iter().all(|t| !t.is_empty()), "{text:?}");
        }
    }
}
