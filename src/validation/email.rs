//! Mailbox syntax check.
//!
//! `lettre` parses the `name-addr`/`addr-spec` grammar but rejects comments
//! and quoted local parts. Both are rewritten into forms it accepts before
//! parsing: comments become whitespace and a well-formed quoted local part
//! becomes a plain atom.

use std::borrow::Cow;
use std::str::FromStr;

use lettre::message::Mailbox;

const QUOTED_LOCAL_PART: &str = "quoted";

/// Returns true if `value` is a single mailbox, with or without display name.
pub(super) fn is_mailbox(value: &str) -> bool {
    let Some(uncommented) = strip_comments(value) else {
        return false;
    };
    let Some(normalized) = unquote_local_part(&uncommented) else {
        return false;
    };
    Mailbox::from_str(&normalized).is_ok()
}

/// Replaces each `(comment)` outside quoted strings and domain literals with
/// a space. Comments nest and may contain quoted pairs.
///
/// Returns `None` on unbalanced parentheses or an unterminated quote.
fn strip_comments(value: &str) -> Option<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut in_literal = false;

    while let Some(c) = chars.next() {
        if depth > 0 {
            match c {
                '\\' => {
                    chars.next()?;
                }
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            if depth == 0 {
                out.push(' ');
            }
            continue;
        }

        match c {
            '\\' if in_quotes => {
                out.push(c);
                out.push(chars.next()?);
            }
            '"' if !in_literal => {
                in_quotes = !in_quotes;
                out.push(c);
            }
            '[' if !in_quotes => {
                in_literal = true;
                out.push(c);
            }
            ']' if !in_quotes => {
                in_literal = false;
                out.push(c);
            }
            '(' if !in_quotes && !in_literal => depth = 1,
            ')' if !in_quotes && !in_literal => return None,
            _ => out.push(c),
        }
    }

    (depth == 0 && !in_quotes).then_some(out)
}

/// Swaps a quoted local part (`"john doe"@example.com`) for a plain atom.
///
/// Returns `None` if the quoted string is empty or contains control
/// characters. Values without a quoted local part are returned unchanged.
fn unquote_local_part(value: &str) -> Option<Cow<'_, str>> {
    let spec_start = angle_start(value).map_or(0, |i| i + 1);
    let spec = &value[spec_start..];
    let trimmed = spec.trim_start();
    if !trimmed.starts_with('"') {
        return Some(Cow::Borrowed(value));
    }

    let quote_start = spec_start + (spec.len() - trimmed.len());
    let quoted_len = quoted_string_len(&value[quote_start..])?;

    Some(Cow::Owned(format!(
        "{}{}{}",
        &value[..quote_start],
        QUOTED_LOCAL_PART,
        &value[quote_start + quoted_len..]
    )))
}

/// Byte index of the first `<` outside a quoted string.
fn angle_start(value: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '<' if !in_quotes => return Some(i),
            _ => {}
        }
    }
    None
}

/// Length in bytes of the non-empty quoted string at the start of `s`,
/// including both quotes.
fn quoted_string_len(s: &str) -> Option<usize> {
    let mut chars = s.char_indices().skip(1);
    let mut content = 0usize;

    while let Some((i, c)) = chars.next() {
        match c {
            '"' if content > 0 => return Some(i + 1),
            '"' => return None,
            '\\' => {
                let (_, escaped) = chars.next()?;
                if escaped.is_control() && escaped != '\t' {
                    return None;
                }
            }
            c if c.is_control() && c != '\t' => return None,
            _ => {}
        }
        content += 1;
    }
    None
}
