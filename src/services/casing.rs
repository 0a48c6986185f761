use crate::domain::models::CasingPolicy;

impl CasingPolicy {
    /// Rewrites a raw token name. Total over any input.
    pub fn convert(self, raw: &str) -> String {
        match self {
            CasingPolicy::Identity => raw.to_string(),
            CasingPolicy::CamelCase => camel_case(raw),
            CasingPolicy::DashesOnly => dashes_camel_case(raw),
        }
    }
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_camel_separator(c: char) -> bool {
    matches!(c, '_' | '.' | '-' | ' ')
}

fn is_lower(c: char) -> bool {
    c.to_lowercase().eq(std::iter::once(c))
}

fn is_upper(c: char) -> bool {
    c.to_uppercase().eq(std::iter::once(c))
}

/// `foo-bar--baz` → `fooBarBaz`. Underscores, digits and existing case stay put.
pub fn dashes_camel_case(raw: &str) -> String {
    collapse_separator_runs(raw, |c| c == '-', false)
}

pub fn camel_case(raw: &str) -> String {
    let input = raw.trim();
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (None, _) => return String::new(),
        (Some(only), None) => return only.to_lowercase().collect(),
        _ => {}
    }
    if input
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return input.to_string();
    }

    let marked = if input != input.to_lowercase() {
        mark_case_boundaries(input)
    } else {
        input.to_string()
    };
    let lowered = marked.trim_start_matches(is_camel_separator).to_lowercase();
    collapse_separator_runs(&lowered, is_camel_separator, true)
}

/// Inserts `-` where the case changes so the separator pass can split there:
/// `fooBar` → `foo-Bar`, `XMLHttp` → `XML-Http`.
fn mark_case_boundaries(input: &str) -> String {
    let mut out: Vec<char> = Vec::with_capacity(input.len() + 4);
    let mut last_lower = false;
    let mut last_upper = false;
    let mut last_last_upper = false;

    for c in input.chars() {
        if last_lower && c.is_ascii_alphabetic() && is_upper(c) {
            out.push('-');
            out.push(c);
            last_lower = false;
            last_last_upper = last_upper;
            last_upper = true;
        } else if last_upper && last_last_upper && c.is_ascii_alphabetic() && is_lower(c) {
            if let Some(prev) = out.pop() {
                out.push('-');
                out.push(prev);
            }
            out.push(c);
            last_lower = true;
            last_last_upper = false;
            last_upper = false;
        } else {
            out.push(c);
            last_lower = is_lower(c);
            last_last_upper = last_upper;
            last_upper = is_upper(c);
        }
    }
    out.into_iter().collect()
}

/// Removes each run of separators that is followed by a word character and
/// upper-cases that character. With `at_end`, a trailing run is dropped too.
/// Runs followed by anything else are kept, except that an `_` inside the run
/// can itself stand in as the following word character.
fn collapse_separator_runs(input: &str, is_sep: impl Fn(char) -> bool, at_end: bool) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if !is_sep(c) {
            out.push(c);
            i += 1;
            continue;
        }

        let start = i;
        let mut end = i;
        while end < chars.len() && is_sep(chars[end]) {
            end += 1;
        }

        match chars.get(end) {
            Some(&next) if is_word(next) => {
                out.push(next.to_ascii_uppercase());
                i = end + 1;
            }
            None if at_end => i = end,
            _ => match (start + 1..end).rev().find(|&k| is_word(chars[k])) {
                Some(k) => {
                    out.push(chars[k].to_ascii_uppercase());
                    i = k + 1;
                }
                None => {
                    out.push(c);
                    i = start + 1;
                }
            },
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{camel_case, dashes_camel_case};
    use crate::domain::models::CasingPolicy;

    #[test]
    fn identity_keeps_input() {
        assert_eq!(CasingPolicy::Identity.convert("foo-bar"), "foo-bar");
        assert_eq!(CasingPolicy::Identity.convert(""), "");
    }

    #[test]
    fn dashes_only_touches_dash_boundaries() {
        assert_eq!(dashes_camel_case("foo-bar-baz"), "fooBarBaz");
        assert_eq!(dashes_camel_case("foo_bar"), "foo_bar");
        assert_eq!(dashes_camel_case("foo--bar"), "fooBar");
        assert_eq!(dashes_camel_case("Foo-Bar_baz-1x"), "FooBar_baz1x");
        assert_eq!(dashes_camel_case("-foo"), "Foo");
        assert_eq!(dashes_camel_case("foo-"), "foo-");
        assert_eq!(dashes_camel_case("foo-#bar"), "foo-#bar");
    }

    #[test]
    fn camel_case_splits_on_separators() {
        assert_eq!(camel_case("foo-bar"), "fooBar");
        assert_eq!(camel_case("foo_bar"), "fooBar");
        assert_eq!(camel_case("foo.bar baz"), "fooBarBaz");
        assert_eq!(camel_case("--foo--bar--"), "fooBar");
        assert_eq!(camel_case("item-1st"), "item1st");
    }

    #[test]
    fn camel_case_handles_existing_case() {
        assert_eq!(camel_case("FooBar"), "fooBar");
        assert_eq!(camel_case("XMLHttpRequest"), "xmlHttpRequest");
        assert_eq!(camel_case("FOO"), "foo");
        assert_eq!(camel_case("A"), "a");
        assert_eq!(camel_case("foobar"), "foobar");
    }

    #[test]
    fn camel_case_trims_and_tolerates_empty() {
        assert_eq!(camel_case("  foo-bar "), "fooBar");
        assert_eq!(camel_case("   "), "");
    }

    #[test]
    fn camel_case_keeps_unmatched_runs() {
        assert_eq!(camel_case("a-#b"), "a-#b");
        assert_eq!(camel_case("a-_#b"), "a_#b");
    }
}
