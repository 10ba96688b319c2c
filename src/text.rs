//! Character-indexed string helpers.
//!
//! These sit next to [`Re`] rather than on it: `trim` builds its patterns on
//! the fly, `slice` works purely on character positions, and [`StrExt`] adds
//! the same operations as methods on `str`.

use crate::Re;
use crate::charset::CharSet;
use crate::pattern::coords::{char_len, char_to_byte};

/// Trim leading and trailing runs of `pattern` from `text`.
///
/// Regex operators in `pattern` (`( ) [ ] { } ? . * + ^ $`) are escaped
/// first, so `"*"` trims literal stars, while backslash classes such as `\d`
/// and `\s` keep their meaning. `|` still separates alternatives, unless it
/// is the whole pattern. Without a pattern, whitespace and newlines
/// are trimmed.
///
/// ```
/// assert_eq!(relex::trim("--a-b--", Some("-")), "a-b");
/// assert_eq!(relex::trim("  a b \n", None), "a b");
/// ```
pub fn trim(text: &str, pattern: Option<&str>) -> String {
    let Some(pattern) = pattern else {
        return text.trim().to_string();
    };
    if pattern.is_empty() {
        return text.to_string();
    }

    let escaped = crate::regex!(r"([()\[\]?{}.*$^+]|^\|$)").replace_all(pattern, r"\$1");
    let (head, tail) = match (
        Re::try_new(&format!("^(?:{escaped})+"), ""),
        Re::try_new(&format!("(?:{escaped})+$"), ""),
    ) {
        (Ok(head), Ok(tail)) => (head, tail),
        // A dangling backslash and the like: fall back to a fully literal pattern.
        _ => {
            let literal = regex::escape(pattern);
            (Re::new(&format!("^(?:{literal})+"), ""), Re::new(&format!("(?:{literal})+$"), ""))
        }
    };
    tail.replace(&head.replace(text, "", 0), "", 0)
}

/// Characters `start..end` of `text`.
///
/// Negative positions count from the end (`-1` is the last character), an
/// `end` past the text clamps to its length and `None` means "to the end".
/// A start past the end, or an end before the start, gives `""`.
///
/// ```
/// assert_eq!(relex::slice("Hello", -3, None), "llo");
/// assert_eq!(relex::slice("Hello", 0, Some(-1)), "Hell");
/// ```
pub fn slice(text: &str, start: isize, end: Option<isize>) -> String {
    let len = char_len(text) as isize;
    let start = if start < 0 { len + start } else { start };
    if start > len {
        return String::new();
    }
    let start = start.max(0);

    let end = match end {
        Some(end) if end < 0 => len + end,
        Some(end) => end,
        None => len,
    };
    let end = end.clamp(start, len);

    text.chars().skip(start as usize).take((end - start) as usize).collect()
}

/// Character-indexed helpers on `str`.
pub trait StrExt {
    /// Character at `index`, or `None` past the end.
    fn char_at(&self, index: usize) -> Option<char>;

    /// Same as [`slice`].
    fn slice_chars(&self, start: isize, end: Option<isize>) -> String;

    /// Split on a literal `separator`, trim each part with `trim` and drop the
    /// parts that end up empty.
    fn components_trimmed(&self, separator: &str, trim: &CharSet) -> Vec<String>;

    /// Split in two at the first `separator` found at or after character
    /// `at_after`. With `trim`, both halves are trimmed and empty halves
    /// dropped. `None` when the separator does not occur there.
    fn split_once_after(&self, separator: &str, at_after: usize, trim: Option<&CharSet>) -> Option<Vec<String>>;
}

impl StrExt for str {
    fn char_at(&self, index: usize) -> Option<char> {
        self.chars().nth(index)
    }

    fn slice_chars(&self, start: isize, end: Option<isize>) -> String {
        slice(self, start, end)
    }

    fn components_trimmed(&self, separator: &str, trim: &CharSet) -> Vec<String> {
        self.split(separator).map(|part| trim.trim(part)).filter(|part| !part.is_empty()).map(str::to_string).collect()
    }

    fn split_once_after(&self, separator: &str, at_after: usize, trim: Option<&CharSet>) -> Option<Vec<String>> {
        let from = char_to_byte(self, at_after);
        let found = from + self[from..].find(separator)?;
        let parts = [&self[..found], &self[found + separator.len()..]];

        Some(match trim {
            Some(set) => parts.iter().map(|p| set.trim(p)).filter(|p| !p.is_empty()).map(str::to_string).collect(),
            None => parts.iter().map(|p| p.to_string()).collect(),
        })
    }
}
