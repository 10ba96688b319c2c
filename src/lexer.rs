//! Structure-aware lexer.
//!
//! Splits code-like text on a separator without ever splitting inside a
//! bracket pair (`()`, `[]`, `{}`) or a quoted string (`"…"`, `'…'`).
//! Symbols preceded by an odd number of backslashes are escaped and ignored.
//!
//! ## How it works
//!
//! Two searches race over the remaining text, both starting at `offset`:
//!
//! ```text
//! code:   f(a, b), c
//!         ^        separator search finds "," at 3
//!          ^       pairing search finds "(" at 1  -> push ")", offset = 2
//!              ^   stack is not empty: keep walking pairing symbols
//!               ^  ")" at 6 closes it              -> pop,      offset = 7
//!                ^ separator at 7 with an empty stack -> emit "f(a, b)"
//! ```
//!
//! - With an empty stack a pairing symbol only matters when it comes before
//!   the next separator.
//! - With a non-empty stack every pairing symbol is examined; separators are
//!   skipped until the stack drains.
//! - Inside a quote, only the matching quote is significant: `(`, `[` and `{`
//!   inside `"…"` or `'…'` never push, and closers there never pop.
//!
//! ## Recovery
//!
//! Malformed input never makes the lexer fail or spin:
//!
//! - An out-of-order closer whose opener is deeper in the stack truncates the
//!   stack down to that opener.
//! - A closer with no opener anywhere in a non-empty stack switches to
//!   *malformed* mode: pairing symbols are ignored until the next token is
//!   emitted.
//! - When the stack is open but no pairing symbol is left, the lexer
//!   re-synchronises just past the first pairing symbol at or after `floor`,
//!   clears the stack and moves `floor` there. `floor` only grows within a
//!   token, so this happens a bounded number of times.
//!
//! Set `RELEX_DEBUG=1` to trace stack decisions on stderr.

use crate::charset::CharSet;
use crate::pattern::coords::{char_len, char_to_byte};
use crate::{ExplodeOption, MatchResult, Re};
use once_cell::sync::Lazy;

/// Zero or more backslashes, then one pairing symbol.
static PAIR: Lazy<Re> = Lazy::new(|| Re::new(r#"(\\*)([()\[\]{}"'])"#, ""));

/// Where the lexer splits: a literal string (escaped before compiling) or a
/// ready-made pattern.
#[derive(Debug, Clone)]
pub enum Separator {
    Literal(String),
    Pattern(Re),
}

impl Separator {
    fn into_re(self) -> Re {
        match self {
            Separator::Literal(text) => Re::literal(&text),
            Separator::Pattern(re) => re,
        }
    }
}

impl From<&str> for Separator {
    fn from(text: &str) -> Self {
        Separator::Literal(text.to_string())
    }
}

impl From<String> for Separator {
    fn from(text: String) -> Self {
        Separator::Literal(text)
    }
}

impl From<Re> for Separator {
    fn from(re: Re) -> Self {
        Separator::Pattern(re)
    }
}

impl From<&Re> for Separator {
    fn from(re: &Re) -> Self {
        Separator::Pattern(re.clone())
    }
}

/// Lexer options.
///
/// `policy` decides what happens to separator text:
///
/// ```text
/// "a,(b,c),d" on ","
///
/// IgnoreSeparator     ["a", "(b,c)", "d"]
/// KeepSeparator       ["a", ",", "(b,c)", ",", "d"]
/// KeepSeparatorBack   ["a", ",(b,c)", ",d"]      separator starts the next token
/// KeepSeparatorFront  ["a,", "(b,c),", "d"]      separator ends the previous token
/// ```
///
/// Note that this is the mirror image of [`Re::explode`]'s naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexOptions {
    /// Trim every token (and kept separator) with this set.
    pub trim: Option<CharSet>,
    pub policy: ExplodeOption,
    /// `$n` template applied to a kept separator instead of its matched text.
    pub template: Option<String>,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self { trim: None, policy: ExplodeOption::IgnoreSeparator, template: None }
    }
}

impl LexOptions {
    pub fn with_trim(mut self, trim: CharSet) -> Self {
        self.trim = Some(trim);
        self
    }

    pub fn with_policy(mut self, policy: ExplodeOption) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

/// Split `code` on `separator`, respecting brackets, quotes and escapes.
///
/// Empty tokens (after trimming) are dropped.
///
/// ```
/// use relex::{LexOptions, lexer};
///
/// let tokens = lexer(r#"a, f(b, c), "d, e""#, ",", &LexOptions::default());
/// assert_eq!(tokens, vec!["a", " f(b, c)", r#" "d, e""#]);
/// ```
pub fn lexer(code: &str, separator: impl Into<Separator>, options: &LexOptions) -> Vec<String> {
    let separator = separator.into().into_re();
    Lexer::new(code, &separator, options).run()
}

/// Result of feeding one unescaped pairing symbol to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Observed {
    Closed,
    Opened,
    Truncated,
    /// Inside a quote, or a closer while nothing is open.
    Ignored,
    /// A closer that matches nothing in a non-empty stack.
    Malformed,
}

/// Expected closers of the currently open brackets and quotes, innermost last.
#[derive(Debug)]
struct NestingStack {
    closers: Vec<char>,
    debug: bool,
}

impl NestingStack {
    fn is_empty(&self) -> bool {
        self.closers.is_empty()
    }

    fn clear(&mut self) {
        self.closers.clear();
    }

    fn observe(&mut self, symbol: char) -> Observed {
        if let Some(&top) = self.closers.last() {
            if top == symbol {
                self.closers.pop();
                self.trace("pop", symbol);
                return Observed::Closed;
            }
            if is_quote(top) {
                return Observed::Ignored;
            }
        }

        if let Some(closer) = closer_for(symbol) {
            self.closers.push(closer);
            self.trace("push", closer);
            return Observed::Opened;
        }

        if let Some(depth) = self.closers.iter().rposition(|&c| c == symbol) {
            self.closers.truncate(depth);
            self.trace("truncate", symbol);
            return Observed::Truncated;
        }

        if self.closers.is_empty() {
            Observed::Ignored
        } else {
            self.trace("malformed", symbol);
            Observed::Malformed
        }
    }

    fn trace(&self, what: &str, symbol: char) {
        if self.debug {
            eprintln!("[lexer:{what}] symbol={symbol:?} stack={:?}", self.closers);
        }
    }
}

fn closer_for(symbol: char) -> Option<char> {
    match symbol {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '"' | '\'' => Some(symbol),
        _ => None,
    }
}

fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'')
}

struct Lexer<'a> {
    /// Text not yet emitted.
    code: String,
    separator: &'a Re,
    options: &'a LexOptions,
    stack: NestingStack,
    tokens: Vec<String>,
    /// Malformed mode: pairing symbols are ignored until the next token.
    bad: bool,
    /// Where boundary searches in `code` currently start.
    offset: usize,
    /// Lowest position searches may restart from: the length of a carried
    /// separator prefix, then past each re-synchronisation point.
    floor: usize,
    debug: bool,
}

impl<'a> Lexer<'a> {
    fn new(code: &str, separator: &'a Re, options: &'a LexOptions) -> Self {
        let debug = std::env::var_os("RELEX_DEBUG").is_some();
        Self {
            code: code.to_string(),
            separator,
            options,
            stack: NestingStack { closers: Vec::new(), debug },
            tokens: Vec::new(),
            bad: false,
            offset: 0,
            floor: 0,
            debug,
        }
    }

    fn run(mut self) -> Vec<String> {
        let pair = &*PAIR;

        while !self.code.is_empty() && self.offset < char_len(&self.code) {
            let sm = self.next_separator();
            if sm.is_none() && (self.stack.is_empty() || self.bad) {
                break;
            }

            if !self.bad {
                match pair.match_first(&self.code, self.offset) {
                    Some(pm) => {
                        let before_separator = sm.as_ref().is_some_and(|sm| pm.index() < sm.index());
                        if !self.stack.is_empty() || before_separator {
                            self.offset = pm.end();
                            let backslashes = pm.get(1).map_or(0, str::len);
                            if backslashes % 2 == 1 {
                                continue;
                            }
                            let Some(symbol) = pm.get(2).and_then(|s| s.chars().next()) else {
                                continue;
                            };
                            if self.stack.observe(symbol) == Observed::Malformed {
                                self.bad = true;
                                self.offset = self.floor;
                            }
                            continue;
                        }
                    }
                    None if !self.stack.is_empty() => {
                        let Some(pm) = pair.match_first(&self.code, self.floor) else {
                            break;
                        };
                        self.stack.clear();
                        self.offset = pm.end();
                        self.floor = self.offset;
                        if self.debug {
                            eprintln!("[lexer:resync] at={} floor={}", pm.index(), self.floor);
                        }
                        continue;
                    }
                    None => {}
                }
            }

            let Some(sm) = sm else {
                break;
            };
            self.emit(&sm);
        }

        if !self.code.is_empty() {
            let last = std::mem::take(&mut self.code);
            self.push(&last);
        }
        self.tokens.retain(|t| !t.is_empty());
        self.tokens
    }

    /// Next separator match from `offset`. An empty match right at `floor`
    /// (the start of `code`, or the end of a carried separator prefix) would
    /// leave the unconsumed text unchanged, so it is skipped.
    fn next_separator(&self) -> Option<MatchResult> {
        let sm = self.separator.match_first(&self.code, self.offset)?;
        if sm.index() == self.floor && sm.last_index().is_none() {
            return self.separator.match_first(&self.code, self.floor + 1);
        }
        Some(sm)
    }

    /// Emit `code[..sm.index()]`, drop the separator from `code` and apply the
    /// separator policy.
    fn emit(&mut self, sm: &MatchResult) {
        let head = self.code[..char_to_byte(&self.code, sm.index())].to_string();
        let mut rest = self.code[char_to_byte(&self.code, sm.end())..].to_string();
        self.push(&head);

        self.floor = 0;
        if self.options.policy != ExplodeOption::IgnoreSeparator {
            let display = match &self.options.template {
                Some(template) => sm.expand(template),
                None => sm.as_str().to_string(),
            };
            match self.options.policy {
                ExplodeOption::KeepSeparator => self.push(&display),
                ExplodeOption::KeepSeparatorBack => {
                    self.floor = char_len(&display);
                    rest.insert_str(0, &display);
                }
                ExplodeOption::KeepSeparatorFront => {
                    let display = self.trimmed(&display);
                    if let Some(prev) = self.tokens.last_mut() {
                        prev.push_str(&display);
                    }
                }
                ExplodeOption::IgnoreSeparator => {}
            }
        }

        self.code = rest;
        self.offset = self.floor;
        self.bad = false;
        self.stack.clear();
    }

    fn push(&mut self, token: &str) {
        let token = self.trimmed(token);
        if self.debug {
            eprintln!("[lexer:token] {token:?}");
        }
        self.tokens.push(token);
    }

    fn trimmed(&self, text: &str) -> String {
        match &self.options.trim {
            Some(set) => set.trim(text).to_string(),
            None => text.to_string(),
        }
    }
}
