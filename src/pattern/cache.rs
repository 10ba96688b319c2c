//! Compiled-pattern cache.
//!
//! Compiling a pattern is the expensive part of using a regex, and most
//! patterns in this crate are literals at a handful of call sites. The cache
//! maps `(source, flags)` to a shared compiled `Regex` so every `Re` built
//! from the same pair reuses one compiled program.
//!
//! ## Lifetime
//!
//! - [`PatternCache::global`] is created on first use and lives for the rest of
//!   the process. Entries are never evicted, so growth is unbounded: fine for
//!   literal patterns, a leak for patterns generated from user input.
//! - Callers that build patterns dynamically should own a [`PatternCache`] and
//!   pass it to [`Re::with_cache`](crate::Re::with_cache), dropping or
//!   clearing it when done.
//!
//! Only the engine-relevant flags are part of the key; `g` does not change the
//! compiled program.

use super::flags::Flags;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

static GLOBAL: Lazy<PatternCache> = Lazy::new(PatternCache::new);

/// Thread-safe map from `(pattern source, flags)` to a compiled `Regex`.
#[derive(Debug, Default)]
pub struct PatternCache {
    entries: Mutex<HashMap<(String, Flags), Arc<Regex>>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by [`Re::new`](crate::Re::new).
    pub fn global() -> &'static PatternCache {
        &GLOBAL
    }

    /// Return the compiled pattern for `(source, flags)`, compiling it on a miss.
    pub fn get_or_compile(&self, source: &str, flags: Flags) -> Result<Arc<Regex>> {
        let key = (source.to_string(), flags.engine_bits());
        if let Some(hit) = self.lock().get(&key) {
            return Ok(Arc::clone(hit));
        }

        // Compile outside the lock; a racing thread may insert first, in which
        // case its entry wins and ours is dropped.
        let compiled = Arc::new(compile(source, flags)?);
        if std::env::var_os("RELEX_DEBUG").is_some() {
            eprintln!("[cache:compile] pattern=/{}/ flags=\"{}\"", source, flags);
        }
        let mut entries = self.lock();
        Ok(Arc::clone(entries.entry(key).or_insert(compiled)))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every cached program. Existing `Re` values keep their own `Arc`.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(String, Flags), Arc<Regex>>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn compile(source: &str, flags: Flags) -> Result<Regex> {
    RegexBuilder::new(source)
        .case_insensitive(flags.contains(Flags::CASE_INSENSITIVE))
        .multi_line(flags.contains(Flags::MULTILINE))
        .dot_matches_new_line(flags.contains(Flags::DOT_ALL))
        .build()
        .map_err(|err| Error::InvalidPattern { pattern: source.to_string(), message: err.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_source_and_flags_share_program() {
        let cache = PatternCache::new();
        let a = cache.get_or_compile(r"\d+", Flags::parse("ig").unwrap()).unwrap();
        let b = cache.get_or_compile(r"\d+", Flags::parse("gi").unwrap()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_engine_flags_compile_separately() {
        let cache = PatternCache::new();
        let a = cache.get_or_compile("abc", Flags::empty()).unwrap();
        let b = cache.get_or_compile("abc", Flags::CASE_INSENSITIVE).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(b.is_match("ABC"));
        assert!(!a.is_match("ABC"));
    }

    #[test]
    fn invalid_pattern_is_reported_and_not_cached() {
        let cache = PatternCache::new();
        let err = cache.get_or_compile("(", Flags::empty()).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_lookups_share_one_program() {
        let cache = &PatternCache::new();
        let flags = Flags::parse("i").unwrap();
        let compiled: Vec<Arc<Regex>> = std::thread::scope(|s| {
            let handles: Vec<_> =
                (0..8).map(|_| s.spawn(move || cache.get_or_compile(r"(\w+)-(\d+)", flags).unwrap())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(compiled.iter().all(|re| Arc::ptr_eq(re, &compiled[0])));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn global_cache_backs_re_new() {
        let source = r"global-cache-share-[a-z]+";
        let a = crate::Re::new(source, "gi");
        let b = crate::Re::new(source, "ig");
        assert!(Arc::ptr_eq(&a.regex, &b.regex));
        let direct = PatternCache::global().get_or_compile(source, Flags::CASE_INSENSITIVE).unwrap();
        assert!(Arc::ptr_eq(&a.regex, &direct));
    }

    #[test]
    fn clear_empties_cache() {
        let cache = PatternCache::new();
        cache.get_or_compile("x", Flags::empty()).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
