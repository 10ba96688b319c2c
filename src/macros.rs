/// Lazily compiled, process-wide `regex::Regex` for a literal pattern.
///
/// Used for the fixed internal patterns (pairing symbols, trim escaping) that
/// never go through the flag-aware cache.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`Re`](crate::Re) from a literal pattern and optional flag string.
///
/// ```
/// let re = relex::re!(r"\W", "g");
/// assert!(re.test("a b", 0));
/// ```
#[macro_export]
macro_rules! re {
    ($pat:expr) => {
        $crate::Re::new($pat, "")
    };
    ($pat:expr, $flags:expr) => {
        $crate::Re::new($pat, $flags)
    };
}
