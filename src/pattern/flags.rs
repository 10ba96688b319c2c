//! Pattern flags.
//!
//! Flags arrive as a short string over `i`, `m`, `s`, `g` (the JavaScript
//! convention) and are stored as a set, so `"gi"` and `"ig"` are the same
//! flag set and hit the same cache entry.

use crate::error::{Error, Result};
use std::fmt;

bitflags::bitflags! {
    /// Matching flags attached to a [`Re`](crate::Re).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        /// `i`: case-insensitive matching.
        const CASE_INSENSITIVE = 1 << 0;
        /// `m`: `^`/`$` match at line boundaries.
        const MULTILINE        = 1 << 1;
        /// `s`: `.` also matches `\n`.
        const DOT_ALL          = 1 << 2;
        /// `g`: `match` aggregates every match instead of the first.
        const GLOBAL           = 1 << 3;
    }
}

impl Flags {
    /// Parse a flag string. Order and repetition do not matter.
    pub fn parse(flags: &str) -> Result<Self> {
        let mut out = Flags::empty();
        for c in flags.chars() {
            out |= match c {
                'i' => Flags::CASE_INSENSITIVE,
                'm' => Flags::MULTILINE,
                's' => Flags::DOT_ALL,
                'g' => Flags::GLOBAL,
                other => return Err(Error::UnsupportedFlag { flag: other, flags: flags.to_string() }),
            };
        }
        Ok(out)
    }

    pub fn is_global(self) -> bool {
        self.contains(Flags::GLOBAL)
    }

    /// Flags that change how the engine compiles the pattern. `GLOBAL` only
    /// affects this crate's `match` semantics.
    pub(crate) fn engine_bits(self) -> Flags {
        self - Flags::GLOBAL
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, c) in [
            (Flags::CASE_INSENSITIVE, 'i'),
            (Flags::MULTILINE, 'm'),
            (Flags::DOT_ALL, 's'),
            (Flags::GLOBAL, 'g'),
        ] {
            if self.contains(flag) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
