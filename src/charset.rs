//! Trim boundary sets.
//!
//! `split`, `explode` and the lexer can trim every token before deciding
//! whether to keep it. A [`CharSet`] says which characters count as trimmable:
//! any mix of coarse Unicode classes and explicit characters.

use std::collections::BTreeSet;

bitflags::bitflags! {
    /// Coarse character classes a [`CharSet`] can include.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharClass: u8 {
        /// Horizontal whitespace (spaces, tabs, other `White_Space` that is not a line break).
        const WHITESPACE   = 1 << 0;
        /// Line breaks: `\n`, `\r`, vertical tab, form feed, NEL, LS, PS.
        const NEWLINES     = 1 << 1;
        const PUNCTUATION  = 1 << 2;
        const ALPHANUMERIC = 1 << 3;
        const CONTROL      = 1 << 4;
    }
}

impl Default for CharClass {
    fn default() -> Self {
        CharClass::empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharSet {
    classes: CharClass,
    chars: BTreeSet<char>,
}

impl CharSet {
    pub fn whitespace() -> Self {
        Self::from_classes(CharClass::WHITESPACE)
    }

    pub fn newlines() -> Self {
        Self::from_classes(CharClass::NEWLINES)
    }

    pub fn whitespace_and_newlines() -> Self {
        Self::from_classes(CharClass::WHITESPACE | CharClass::NEWLINES)
    }

    pub fn punctuation() -> Self {
        Self::from_classes(CharClass::PUNCTUATION)
    }

    pub fn from_classes(classes: CharClass) -> Self {
        Self { classes, chars: BTreeSet::new() }
    }

    /// Set made of exactly the characters in `chars`.
    pub fn from_chars(chars: &str) -> Self {
        Self { classes: CharClass::empty(), chars: chars.chars().collect() }
    }

    pub fn union(mut self, other: &CharSet) -> Self {
        self.classes |= other.classes;
        self.chars.extend(other.chars.iter().copied());
        self
    }

    pub fn contains(&self, c: char) -> bool {
        if self.chars.contains(&c) {
            return true;
        }
        let classes = self.classes;
        (classes.contains(CharClass::NEWLINES) && is_newline(c))
            || (classes.contains(CharClass::WHITESPACE) && c.is_whitespace() && !is_newline(c))
            || (classes.contains(CharClass::PUNCTUATION) && c.is_ascii_punctuation())
            || (classes.contains(CharClass::ALPHANUMERIC) && c.is_alphanumeric())
            || (classes.contains(CharClass::CONTROL) && c.is_control() && !c.is_whitespace())
    }

    /// `text` without leading and trailing characters from this set.
    pub fn trim<'t>(&self, text: &'t str) -> &'t str {
        text.trim_matches(|c| self.contains(c))
    }
}

fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}')
}
