//! `key: value,` line formatting

use regex_lite::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

use super::storage::StoredValue;

fn non_identifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9]").expect("valid regex"))
}

/// Quote keys that are not plain alphanumeric identifiers
pub fn escape_key(key: &str) -> Cow<'_, str> {
    if non_identifier().is_match(key) {
        Cow::Owned(format!("\"{}\"", key))
    } else {
        Cow::Borrowed(key)
    }
}

/// Format one stored value as a `key: value,` line
///
/// String values are quoted verbatim with no escaping. Other types are
/// emitted as-is, except an empty value becomes `undefined`.
pub fn format_line(key: &str, stored: &StoredValue<'_>) -> String {
    let key = escape_key(key);
    if stored.schema.is_string() {
        format!("{}: \"{}\",", key, stored.value)
    } else if stored.value.is_empty() {
        format!("{}: undefined,", key)
    } else {
        format!("{}: {},", key, stored.value)
    }
}
