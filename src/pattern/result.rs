use super::template;
use std::fmt;

/// One match, in character coordinates.
///
/// `values[0]` is the matched text and `values[1..]` are capture groups; a
/// group that did not participate is `None`. In global mode `values` holds the
/// full text of every match and no groups.
///
/// `last_index` is the index of the last character consumed (the maximum over
/// all matches in global mode), or `None` for a zero-length match (`-1` in
/// the display form).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    values: Vec<Option<String>>,
    index: usize,
    last_index: Option<usize>,
}

impl MatchResult {
    pub(crate) fn new(index: usize, last_index: Option<usize>, values: Vec<Option<String>>) -> Self {
        debug_assert!(!values.is_empty());
        debug_assert!(last_index.is_none_or(|last| index <= last));
        Self { values, index, last_index }
    }

    /// Start of the match.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }

    /// Exclusive end of the match: one past `last_index`, or `index` when the
    /// match was empty.
    pub fn end(&self) -> usize {
        self.last_index.map_or(self.index, |last| last + 1)
    }

    /// Full matched text (first match in global mode).
    pub fn as_str(&self) -> &str {
        self.get(0).unwrap_or_default()
    }

    /// Value `i`, or `None` when out of range or the group did not participate.
    pub fn get(&self, i: usize) -> Option<&str> {
        self.values.get(i).and_then(|v| v.as_deref())
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Expand a `$n` template against this match's values.
    pub fn expand(&self, template: &str) -> String {
        let groups: Vec<&str> = self.values.iter().map(|v| v.as_deref().unwrap_or_default()).collect();
        template::expand(template, &groups)
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.last_index.map_or(-1, |l| l as i64);
        write!(f, "<Re.Result index: {}, lastIndex: {}, values: [", self.index, last)?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match v {
                Some(s) => write!(f, "{s:?}")?,
                None => write!(f, "nil")?,
            }
        }
        write!(f, "]>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatchResult {
        MatchResult::new(2, Some(4), vec![Some("abc".into()), None, Some("b".into())])
    }

    #[test]
    fn accessor_handles_absent_and_out_of_range() {
        let m = sample();
        assert_eq!(m.get(0), Some("abc"));
        assert_eq!(m.get(1), None);
        assert_eq!(m.get(2), Some("b"));
        assert_eq!(m.get(9), None);
        assert_eq!(m.count(), 3);
        assert_eq!(m.end(), 5);
        assert_eq!(m.expand("$2-$1-$0"), "b--abc");
    }

    #[test]
    fn display_marks_empty_match_and_absent_group() {
        let m = MatchResult::new(3, None, vec![Some(String::new()), None]);
        assert_eq!(m.to_string(), r#"<Re.Result index: 3, lastIndex: -1, values: ["", nil]>"#);
        assert_eq!(m.end(), 3);
    }
}
