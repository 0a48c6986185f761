use crate::domain::constants::{RESERVED_MEMBERS, RESERVED_WORDS};
use crate::domain::models::ValidationOutcome;

/// Classifies a display name as a bare member, a quoted member, or unusable.
/// Pure function of the string.
pub fn validate(name: &str) -> ValidationOutcome {
    if name.is_empty() || RESERVED_MEMBERS.contains(&name) {
        return ValidationOutcome::skipped(format!(
            "{} is not a valid identifier and was skipped.",
            name
        ));
    }
    if is_bare_identifier(name) {
        return ValidationOutcome::bare();
    }
    ValidationOutcome::quoted(format!(
        "{} is not a valid identifier. Adding quotes.",
        name
    ))
}

pub fn is_bare_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_identifier_start(first)
        && chars.all(is_identifier_part)
        && !RESERVED_WORDS.contains(&name)
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c == '$' || unicode_ident::is_xid_start(c)
}

fn is_identifier_part(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}

/// Single-quoted property key. Escapes keep any input a valid string literal.
pub fn quote_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('\'');
    for c in name.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
