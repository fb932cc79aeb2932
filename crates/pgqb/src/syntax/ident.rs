//! Identifier quoting for rendered SQL.
//!
//! Names matching `[A-Za-z_][A-Za-z0-9_$]*` are written bare unless quoting is
//! forced; anything else is wrapped in double quotes with embedded `"`
//! escaped as `""`. The lone `*` wildcard is always written bare.

/// Check if `name` can be written without quotes.
pub fn is_plain(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric())
}

/// Append `name` to `out` as a single SQL identifier.
pub fn write_ident(out: &mut String, name: &str, always_quote: bool) {
    if name == "*" || (!always_quote && is_plain(name)) {
        out.push_str(name);
        return;
    }

    out.reserve(name.len() + 2);
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

/// Quote `name` into a new string.
pub fn quote_ident(name: &str, always_quote: bool) -> String {
    let mut out = String::with_capacity(name.len());
    write_ident(&mut out, name, always_quote);
    out
}
