//! Character-index / byte-offset translation.
//!
//! Every index this crate hands out or accepts is a *character* index (a
//! count of Unicode scalar values). The `regex` engine works in UTF-8 byte
//! offsets. All conversion between the two happens here so the rest of the
//! crate never has to think about encoding.
//!
//! ```text
//! text:   "añb"
//! chars:   0 1 2 3
//! bytes:   0 1   3 4
//! ```

/// Byte offset of character `index` in `text`. Indices past the end clamp to
/// `text.len()`.
pub fn char_to_byte(text: &str, index: usize) -> usize {
    text.char_indices().nth(index).map(|(byte, _)| byte).unwrap_or(text.len())
}

/// Character index of byte offset `byte` in `text`. `byte` must lie on a char
/// boundary; offsets past the end clamp to the character count.
pub fn byte_to_char(text: &str, byte: usize) -> usize {
    let byte = byte.min(text.len());
    text[..byte].chars().count()
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Incremental byte -> char translator for a run of non-decreasing offsets,
/// such as the spans of successive matches.
pub(crate) struct ByteToChar<'t> {
    text: &'t str,
    byte: usize,
    chars: usize,
}

impl<'t> ByteToChar<'t> {
    pub(crate) fn new(text: &'t str) -> Self {
        Self { text, byte: 0, chars: 0 }
    }

    pub(crate) fn char_index(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        let byte = byte.min(self.text.len());
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}
