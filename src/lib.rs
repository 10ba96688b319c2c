//! Regex facade with JavaScript-style bookkeeping, and a structure-aware lexer.
//!
//! - [`Re`]: a compiled pattern plus flags (`i`, `m`, `s`, `g`) exposing
//!   `test`, `match_at`, `exec`, `replace`, `replace_with`, `split` and
//!   `explode`. Indices are character indices, not byte offsets.
//! - [`lexer`]: splits code-like text on a separator while keeping bracket
//!   pairs, quoted strings and escaped symbols intact.
//! - [`trim`] / [`slice`] / [`StrExt`]: small character-indexed helpers.
//!
//! ```
//! use relex::{LexOptions, Re, lexer};
//!
//! let re = Re::new(r"\W", "g");
//! assert_eq!(re.replace("a,b c", "_", 0), "a_b_c");
//!
//! assert_eq!(lexer("a,(b, c),d", ",", &LexOptions::default()), vec!["a", "(b, c)", "d"]);
//! ```
//!
//! Set `RELEX_DEBUG=1` to print pattern compilation and lexer traces to stderr.

#[macro_use]
mod macros;
mod charset;
mod error;
mod lexer;
mod pattern;
mod text;

pub use charset::{CharClass, CharSet};
pub use error::{Error, Result};
pub use lexer::{LexOptions, Separator, lexer};
pub use pattern::{ExplodeOption, Flags, MatchResult, PatternCache, Re, coords};
pub use text::{StrExt, slice, trim};
