//! Pattern handle.
//!
//! [`Re`] wraps a compiled `regex::Regex` with a flag set and gives it
//! JavaScript-flavoured semantics:
//!
//! - every index is a character index (see `coords.rs`), never a byte offset;
//! - `match_at` returns the first match with its groups, or, when the `g` flag
//!   is set, every match's text folded into one [`MatchResult`];
//! - `exec` walks matches one at a time using a private `last_index` cursor;
//! - `replace` substitutes a `$n` template (`template.rs`) or a computed value;
//! - `split`/`explode` cut text at matches (`explode.rs`).
//!
//! ## How the parts fit
//!
//! ```text
//! Re::new(source, flags) ──▶ Flags::parse        (flags.rs)
//!                        └─▶ PatternCache        (cache.rs, shared Arc<Regex>)
//!
//! match_at / exec / replace / explode
//!        │ char offset ──▶ byte offset           (coords.rs)
//!        │ regex search on text[offset..]
//!        └─ byte spans ──▶ char spans ──▶ MatchResult (result.rs)
//! ```
//!
//! All searches run over the suffix `text[offset..]`, so anchors and word
//! boundaries see the suffix as if it were the whole input.

#[path = "pattern/cache.rs"]
mod cache;
#[path = "pattern/coords.rs"]
pub mod coords;
#[path = "pattern/explode.rs"]
mod explode;
#[path = "pattern/flags.rs"]
mod flags;
#[path = "pattern/result.rs"]
mod result;
#[path = "pattern/template.rs"]
mod template;

pub use cache::PatternCache;
pub use explode::ExplodeOption;
pub use flags::Flags;
pub use result::MatchResult;

use crate::error::Result;
use coords::{ByteToChar, byte_to_char, char_len, char_to_byte};
use regex::Regex;
use std::sync::Arc;

/// A compiled pattern plus flags and an `exec` cursor.
///
/// Cloning is cheap: the compiled program is shared. Each clone carries its
/// own cursor, and `exec` needs `&mut self`, so a handle shared across threads
/// has to be wrapped in a lock by the caller.
///
/// ```
/// use relex::Re;
///
/// let re = Re::new(r"(\w+)@(\w+)", "");
/// let m = re.match_at("mail bob@home now", 0).unwrap();
/// assert_eq!(m.get(2), Some("home"));
/// assert_eq!((m.index(), m.last_index()), (5, Some(12)));
/// ```
#[derive(Debug, Clone)]
pub struct Re {
    regex: Arc<Regex>,
    flags: Flags,
    last_index: usize,
}

impl Re {
    /// Build a pattern from a literal source and flag string.
    ///
    /// # Panics
    ///
    /// On an unsupported flag character or an invalid pattern. Both are
    /// programming errors for literal patterns; use [`Re::try_new`] for
    /// patterns that come from input.
    pub fn new(pattern: &str, flags: &str) -> Self {
        match Self::try_new(pattern, flags) {
            Ok(re) => re,
            Err(err) => panic!("[relex] {err}"),
        }
    }

    /// Fallible constructor using the process-wide [`PatternCache`].
    pub fn try_new(pattern: &str, flags: &str) -> Result<Self> {
        Self::with_cache(PatternCache::global(), pattern, flags)
    }

    /// Fallible constructor using a caller-owned cache.
    pub fn with_cache(cache: &PatternCache, pattern: &str, flags: &str) -> Result<Self> {
        let flags = Flags::parse(flags)?;
        let regex = cache.get_or_compile(pattern, flags)?;
        Ok(Self { regex, flags, last_index: 0 })
    }

    /// Pattern matching `text` literally.
    pub fn literal(text: &str) -> Self {
        Self::new(&regex::escape(text), "")
    }

    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn is_global(&self) -> bool {
        self.flags.is_global()
    }

    /// Character index where the next `exec` starts searching.
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    pub fn set_last_index(&mut self, index: usize) {
        self.last_index = index;
    }

    /// Rewind the `exec` cursor to the start.
    pub fn reset(&mut self) {
        self.last_index = 0;
    }

    /// Whether the pattern matches anywhere in `text[offset..]`. An offset
    /// past the end is `false`.
    pub fn test(&self, text: &str, offset: usize) -> bool {
        if offset > char_len(text) {
            return false;
        }
        self.regex.is_match(&text[char_to_byte(text, offset)..])
    }

    /// Match honouring the `g` flag.
    ///
    /// Without `g`: the first match at or after `offset`, with groups. With
    /// `g`: every non-overlapping match's text in `values`, `index` at the first
    /// match and `last_index` at the furthest consumed character.
    ///
    /// `None` when nothing matches or `offset` is not inside `text`.
    pub fn match_at(&self, text: &str, offset: usize) -> Option<MatchResult> {
        self.match_with(text, offset, false)
    }

    /// First match at or after `offset` with groups, ignoring the `g` flag.
    pub fn match_first(&self, text: &str, offset: usize) -> Option<MatchResult> {
        self.match_with(text, offset, true)
    }

    /// `match` with an explicit switch to force single-match semantics.
    pub fn match_with(&self, text: &str, offset: usize, non_global: bool) -> Option<MatchResult> {
        if offset >= char_len(text) {
            return None;
        }
        let hay = &text[char_to_byte(text, offset)..];
        if self.is_global() && !non_global { self.match_all(hay, offset) } else { self.match_one(hay, offset) }
    }

    fn match_one(&self, hay: &str, offset: usize) -> Option<MatchResult> {
        let caps = self.regex.captures(hay)?;
        let whole = caps.get(0)?;

        let mut last: Option<usize> = None;
        let mut values = Vec::with_capacity(caps.len());
        for group in caps.iter() {
            let Some(g) = group else {
                values.push(None);
                continue;
            };
            if !g.is_empty() {
                let end = offset + byte_to_char(hay, g.end()) - 1;
                last = Some(last.map_or(end, |l| l.max(end)));
            }
            values.push(Some(g.as_str().to_string()));
        }

        Some(MatchResult::new(offset + byte_to_char(hay, whole.start()), last, values))
    }

    fn match_all(&self, hay: &str, offset: usize) -> Option<MatchResult> {
        let mut tr = ByteToChar::new(hay);
        let mut first: Option<usize> = None;
        let mut last: Option<usize> = None;
        let mut values = Vec::new();

        for m in self.regex.find_iter(hay) {
            let start = offset + tr.char_index(m.start());
            let end = offset + tr.char_index(m.end());
            first.get_or_insert(start);
            if end > start {
                last = Some(last.map_or(end - 1, |l| l.max(end - 1)));
            }
            values.push(Some(m.as_str().to_string()));
        }

        Some(MatchResult::new(first?, last, values))
    }

    /// Next single match from the cursor, JavaScript `exec` style.
    ///
    /// On a match the cursor moves just past it (one character further for
    /// an empty match, so a loop over `exec` always ends). When nothing is
    /// left the cursor goes back to 0 and `None` is returned.
    pub fn exec(&mut self, text: &str) -> Option<MatchResult> {
        match self.match_first(text, self.last_index) {
            Some(m) => {
                self.last_index = m.index() + char_len(m.as_str()).max(1);
                Some(m)
            }
            None => {
                self.last_index = 0;
                None
            }
        }
    }

    /// Replace every match in `text[offset..]` with `template` (`$n` names a
    /// group, `\` escapes). Text before `offset` is kept as is.
    ///
    /// This always replaces all matches: the `g` flag only changes
    /// [`Re::match_at`], never `replace`.
    pub fn replace(&self, text: &str, template: &str, offset: usize) -> String {
        let (head, tail) = text.split_at(char_to_byte(text, offset));
        let mut out = String::with_capacity(text.len());
        out.push_str(head);

        let mut cursor = 0;
        for caps in self.regex.captures_iter(tail) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&tail[cursor..whole.start()]);
            let groups: Vec<&str> = caps.iter().map(|g| g.map_or("", |g| g.as_str())).collect();
            out.push_str(&template::expand(template, &groups));
            cursor = whole.end();
        }
        out.push_str(&tail[cursor..]);
        out
    }

    /// Replace each match in `text[offset..]` with `f(match)`, scanning left to
    /// right with single-match semantics regardless of the `g` flag.
    ///
    /// An empty match inserts `f`'s output before the character at its index
    /// and scanning resumes after that character.
    pub fn replace_with<F>(&self, text: &str, offset: usize, mut f: F) -> String
    where
        F: FnMut(&MatchResult) -> String,
    {
        let len = char_len(text);
        let mut cursor = offset.min(len);
        let mut out = String::with_capacity(text.len());
        out.push_str(&text[..char_to_byte(text, cursor)]);

        while let Some(m) = self.match_first(text, cursor) {
            out.push_str(&text[char_to_byte(text, cursor)..char_to_byte(text, m.index())]);
            out.push_str(&f(&m));
            cursor = match m.last_index() {
                Some(last) => last + 1,
                None => {
                    if let Some(c) = text[char_to_byte(text, m.index())..].chars().next() {
                        out.push(c);
                    }
                    m.index() + 1
                }
            };
        }

        if cursor < len {
            out.push_str(&text[char_to_byte(text, cursor)..]);
        }
        out
    }
}

impl std::fmt::Display for Re {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}/{}", self.source(), self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Hello, SwiftyRe. link: https://github.com/wl879/SwiftyRe";

    #[test]
    fn test_respects_offset() {
        let re = Re::new("https?://", "");
        assert!(re.test(SAMPLE, 0));
        assert!(re.test(SAMPLE, 23));
        assert!(!re.test(SAMPLE, 24));
        assert!(!re.test(SAMPLE, 500));
    }

    #[test]
    fn match_returns_first_with_groups() {
        let re = Re::new(r"(\w+)(X)?,", "");
        let m = re.match_at(SAMPLE, 0).unwrap();
        assert_eq!(m.values(), &[Some("Hello,".to_string()), Some("Hello".to_string()), None]);
        assert_eq!(m.index(), 0);
        assert_eq!(m.last_index(), Some(5));
    }

    #[test]
    fn match_text_spans_index_to_last_index() {
        let re = Re::new(r"[a-z]+\.com", "");
        let m = re.match_at(SAMPLE, 0).unwrap();
        let last = m.last_index().unwrap();
        let span: String = SAMPLE.chars().skip(m.index()).take(last - m.index() + 1).collect();
        assert_eq!(m.as_str(), span);
    }

    #[test]
    fn global_match_collects_all_texts() {
        let re = Re::new(r"\W", "g");
        let m = re.match_at("a,b c", 0).unwrap();
        assert_eq!(m.values(), &[Some(",".to_string()), Some(" ".to_string())]);
        assert_eq!(m.index(), 1);
        assert_eq!(m.last_index(), Some(3));
        assert!(re.match_at("abc", 0).is_none());
    }

    #[test]
    fn global_flag_is_ignored_when_forced_single() {
        let re = Re::new(r"(\d)", "g");
        let m = re.match_first("a1b2", 0).unwrap();
        assert_eq!(m.count(), 2);
        assert_eq!(m.get(1), Some("1"));
    }

    #[test]
    fn match_uses_character_indices() {
        let re = Re::new("b+", "");
        let m = re.match_at("ééabbc", 1).unwrap();
        assert_eq!(m.index(), 3);
        assert_eq!(m.last_index(), Some(4));
    }

    #[test]
    fn match_beyond_text_is_none() {
        let re = Re::new("a", "");
        assert!(re.match_at("abc", 3).is_none());
        assert!(re.match_at("", 0).is_none());
    }

    #[test]
    fn zero_length_match_has_no_last_index() {
        let re = Re::new("x*", "");
        let m = re.match_at("abc", 0).unwrap();
        assert_eq!(m.as_str(), "");
        assert_eq!(m.last_index(), None);
    }

    #[test]
    fn exec_advances_then_resets() {
        let mut re = Re::new(r"\W", "");
        let mut seen = Vec::new();
        let mut cursor = re.last_index();
        while let Some(m) = re.exec(SAMPLE) {
            assert!(re.last_index() > cursor);
            cursor = re.last_index();
            seen.push(m.as_str().to_string());
        }
        assert_eq!(re.last_index(), 0);
        assert_eq!(seen, vec![",", " ", ".", " ", ":", " ", ":", "/", "/", ".", "/", "/"]);
    }

    #[test]
    fn exec_makes_progress_on_empty_matches() {
        let mut re = Re::new("x*", "");
        let mut count = 0;
        while re.exec("abc").is_some() {
            count += 1;
            assert!(count < 10);
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn replace_template_replaces_all_regardless_of_flag() {
        let plain = Re::new(r"\W", "");
        let global = Re::new(r"\W", "g");
        let expected = "Hello  SwiftyRe  link  https   github com wl879 SwiftyRe";
        assert_eq!(plain.replace(SAMPLE, " ", 0), expected);
        assert_eq!(global.replace(SAMPLE, " ", 0), expected);
    }

    #[test]
    fn replace_template_keeps_prefix_and_expands_groups() {
        let re = Re::new(r"(\w)=(\w)", "");
        assert_eq!(re.replace("a=b c=d", "$2=$1", 0), "b=a d=c");
        assert_eq!(re.replace("a=b c=d", "$2=$1", 3), "a=b d=c");
    }

    #[test]
    fn replace_with_callback_is_left_to_right() {
        let re = Re::new(r"\d+", "g");
        let out = re.replace_with("a1b22c333", 0, |m| format!("<{}>", m.as_str().len()));
        assert_eq!(out, "a<1>b<2>c<3>");
        let out = re.replace_with("1 2 3", 2, |_| "#".to_string());
        assert_eq!(out, "1 # #");
    }

    #[test]
    fn replace_with_empty_matches_terminates() {
        let re = Re::new("x*", "");
        assert_eq!(re.replace_with("ab", 0, |_| "-".to_string()), "-a-b");
    }

    #[test]
    fn display_shows_source_and_flags() {
        assert_eq!(crate::re!("a+", "gi").to_string(), "/a+/ig");
        assert_eq!(crate::re!("a+").to_string(), "/a+/");
    }

    #[test]
    #[should_panic(expected = "unsupported flag")]
    fn unsupported_flag_is_fatal() {
        let _ = Re::new("a", "q");
    }

    #[test]
    fn try_new_reports_invalid_pattern() {
        assert!(Re::try_new("(", "").is_err());
        assert!(Re::try_new("a", "y").is_err());
    }
}
