//! TypeScript literal escaping

use assetmax_manifest::is_js_identifier;

/// Single-quoted string literal
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Body of a template literal; backticks and `${` are escaped, newlines kept
pub fn template(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

/// Text safe to place inside a `/** */` block on a single line
pub fn comment_text(value: &str) -> String {
    value.replace("*/", "*\\/").replace(['\n', '\r'], " ")
}

/// Object key, quoted when it is not a plain identifier
pub fn property_key(key: &str) -> String {
    if is_js_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}
