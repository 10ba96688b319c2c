//! `$n` replacement templates.
//!
//! - `$` followed by digits refers to a capture group. Digits are consumed
//!   greedily while the number still names an existing group, so with two
//!   groups `$12` is group 1 followed by a literal `2`.
//! - A reference to a group that does not exist expands to nothing.
//! - `\` makes the next character literal (`\$1` is the text `$1`).
//! - A `$` not followed by a digit is literal.

pub(crate) fn expand(template: &str, groups: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            },
            '$' => {
                let Some(first) = chars.peek().and_then(|d| d.to_digit(10)) else {
                    out.push('$');
                    continue;
                };
                chars.next();
                let mut group = first as usize;
                while let Some(d) = chars.peek().and_then(|d| d.to_digit(10)) {
                    let wider = group * 10 + d as usize;
                    if wider >= groups.len() {
                        break;
                    }
                    group = wider;
                    chars.next();
                }
                if let Some(text) = groups.get(group) {
                    out.push_str(text);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::expand;

    #[test]
    fn expands_group_references() {
        assert_eq!(expand("[$1:$2]", &["a=b", "a", "b"]), "[a:b]");
        assert_eq!(expand("$0$0", &["x"]), "xx");
    }

    #[test]
    fn greedy_digits_stop_at_group_count() {
        let groups = ["m", "one", "two"];
        assert_eq!(expand("$12", &groups), "one2");
        let many: Vec<&str> = (0..12).map(|_| "g").collect();
        assert_eq!(expand("$11", &many), "g");
    }

    #[test]
    fn escapes_and_stray_dollars_are_literal() {
        assert_eq!(expand(r"\$1 costs $", &["m", "g"]), "$1 costs $");
        assert_eq!(expand("$9", &["m"]), "");
        assert_eq!(expand(r"end\", &["m"]), r"end\");
    }
}
