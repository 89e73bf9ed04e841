//! Spelling of Go literals and identifiers.

use std::fmt::Write as _;

/// Go reserved keywords.
pub const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Returns true if `name` is a valid, non-keyword Go identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
        && !GO_KEYWORDS.contains(&name)
}

/// Quote `s` as an interpreted Go string literal, like `strconv.Quote`.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        escape_char(&mut out, c);
    }
    out.push('"');
    out
}

/// Quote arbitrary bytes as an interpreted Go string literal.
///
/// Valid UTF-8 runs are escaped like [`quote`]; invalid bytes become `\xNN`.
pub fn quote_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    for chunk in bytes.utf8_chunks() {
        for c in chunk.valid().chars() {
            escape_char(&mut out, c);
        }
        for b in chunk.invalid() {
            let _ = write!(out, "\\x{:02x}", b);
        }
    }
    out.push('"');
    out
}

/// Spell `s` as a raw (backtick) Go string literal.
///
/// Embedded backticks are spliced in as `` ` + "`" + ` ``. Returns `None`
/// when `s` holds a carriage return, which raw literals silently drop.
pub fn raw_string(s: &str) -> Option<String> {
    if s.contains('\r') {
        return None;
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('`');
    out.push_str(&s.replace('`', "` + \"`\" + `"));
    out.push('`');
    Some(out)
}

fn escape_char(out: &mut String, c: char) {
    match c {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\u{7}' => out.push_str("\\a"),
        '\u{8}' => out.push_str("\\b"),
        '\u{c}' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{b}' => out.push_str("\\v"),
        c if c < ' ' || c == '\u{7f}' => {
            let _ = write!(out, "\\x{:02x}", u32::from(c));
        }
        c if c.is_control() || (c.is_whitespace() && c != ' ') => {
            let code = u32::from(c);
            if code < 0x10000 {
                let _ = write!(out, "\\u{:04x}", code);
            } else {
                let _ = write!(out, "\\U{:08x}", code);
            }
        }
        c => out.push(c),
    }
}
