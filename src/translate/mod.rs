//! Environment → config fragment translation
//!
//! Entries are processed in iteration order. Each recognized entry runs its
//! `on_found` hook, then competes for its canonical key:
//! - no existing value: inserted
//! - legacy entry vs. a non-base value: existing value kept
//! - otherwise: existing value dropped, new value appended at the end
//!
//! The surviving values are written out as `key: value,` lines.

mod format;
mod storage;

pub use format::escape_key;
pub use storage::{StoredValue, ValueStorage};

use serde::Serialize;
use std::ffi::OsString;

use crate::config::{BaseConfig, SchemaTable};

/// Inputs controlling a translation
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Seed storage from `base_config` before reading the environment
    pub inject_base_config: bool,

    /// Recognized variables
    pub schema: SchemaTable,

    /// Base values used when `inject_base_config` is set
    pub base_config: BaseConfig,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            inject_base_config: false,
            schema: SchemaTable::standard(),
            base_config: BaseConfig::default(),
        }
    }
}

impl TranslateOptions {
    /// Options for a custom schema with no base values
    pub fn with_schema(schema: SchemaTable) -> Self {
        Self {
            inject_base_config: false,
            schema,
            base_config: BaseConfig::empty(),
        }
    }

    pub fn inject_base_config(mut self, inject: bool) -> Self {
        self.inject_base_config = inject;
        self
    }
}

/// What happened to one recognized environment entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// First value for its key
    Inserted { variable: String, key: String },

    /// Replaced an earlier value for its key
    Replaced {
        variable: String,
        key: String,
        previous_base: bool,
    },

    /// Legacy alias ignored because a non-base value was already set
    LegacySuperseded { variable: String, key: String },
}

impl EntryOutcome {
    pub fn variable(&self) -> &str {
        match self {
            Self::Inserted { variable, .. }
            | Self::Replaced { variable, .. }
            | Self::LegacySuperseded { variable, .. } => variable,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Inserted { key, .. }
            | Self::Replaced { key, .. }
            | Self::LegacySuperseded { key, .. } => key,
        }
    }
}

/// Result of a translation, with a trace of every recognized entry
#[derive(Debug, Clone, Serialize)]
pub struct Translation {
    /// The `key: value,` listing
    pub fragment: String,

    /// Outcome per recognized entry, in processing order
    pub entries: Vec<EntryOutcome>,

    /// Number of entries with no schema
    pub ignored: usize,
}

impl Translation {
    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable trace
    pub fn to_human(&self) -> String {
        let mut lines = Vec::new();
        for entry in &self.entries {
            let line = match entry {
                EntryOutcome::Inserted { variable, key } => {
                    format!("{} -> {}: set", variable, key)
                }
                EntryOutcome::Replaced {
                    variable,
                    key,
                    previous_base: true,
                } => format!("{} -> {}: overrides base value", variable, key),
                EntryOutcome::Replaced { variable, key, .. } => {
                    format!("{} -> {}: overrides earlier value", variable, key)
                }
                EntryOutcome::LegacySuperseded { variable, key } => {
                    format!("{} -> {}: ignored, legacy name loses to existing value", variable, key)
                }
            };
            lines.push(line);
        }
        lines.push(format!("{} unrecognized variable(s) ignored", self.ignored));
        lines.push(String::new());
        lines.push(self.fragment.clone());
        lines.join("\n")
    }
}

/// Translate environment entries into a config fragment, with a trace
pub fn translate<I, K, V>(env: I, options: &TranslateOptions) -> Translation
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut storage = if options.inject_base_config {
        ValueStorage::seeded(&options.base_config)
    } else {
        ValueStorage::new()
    };
    let mut entries = Vec::new();
    let mut ignored = 0;

    for (variable, value) in env {
        let variable = variable.as_ref();
        let Some(schema) = options.schema.get(variable) else {
            ignored += 1;
            continue;
        };

        if let Some(on_found) = &schema.on_found {
            on_found(variable);
        }

        let key = schema.name.as_str();
        let outcome = match storage.get(key) {
            None => EntryOutcome::Inserted {
                variable: variable.to_string(),
                key: key.to_string(),
            },
            Some(existing) if schema.legacy && !existing.schema.base => {
                tracing::debug!(variable, key, "legacy variable superseded by existing value");
                entries.push(EntryOutcome::LegacySuperseded {
                    variable: variable.to_string(),
                    key: key.to_string(),
                });
                continue;
            }
            Some(existing) => EntryOutcome::Replaced {
                variable: variable.to_string(),
                key: key.to_string(),
                previous_base: existing.schema.base,
            },
        };

        storage.insert(
            key,
            StoredValue {
                value: value.as_ref().to_string(),
                schema,
            },
        );
        entries.push(outcome);
    }

    let fragment = storage
        .iter()
        .map(|(key, stored)| format::format_line(key, stored))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    Translation {
        fragment,
        entries,
        ignored,
    }
}

/// Keep the environment pairs whose name and value are valid UTF-8
///
/// Other pairs cannot name a known variable or be emitted, so they are
/// dropped like unrecognized entries.
pub fn utf8_vars<I>(vars: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
            (Ok(name), Ok(value)) => Some((name, value)),
            (name, _) => {
                let name = match &name {
                    Ok(name) => name.clone(),
                    Err(raw) => raw.to_string_lossy().into_owned(),
                };
                tracing::debug!(variable = %name, "skipping non-UTF-8 environment variable");
                None
            }
        })
        .collect()
}

/// Translate environment entries into a `key: value,` listing
pub fn serialize<I, K, V>(env: I, options: &TranslateOptions) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    translate(env, options).fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{VarType, VariableSchema};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn url_schema() -> SchemaTable {
        let mut schema = SchemaTable::new();
        schema.insert("URL", VariableSchema::new("url", VarType::String));
        schema.insert("LEGACY_URL", VariableSchema::new("url", VarType::String).legacy());
        schema
    }

    #[test]
    fn test_single_string_value() {
        let mut schema = SchemaTable::new();
        schema.insert("API_URL", VariableSchema::new("url", VarType::String));
        let options = TranslateOptions::with_schema(schema);

        let out = serialize([("API_URL", "http://x")], &options);
        assert_eq!(out, "url: \"http://x\",");
    }

    #[test]
    fn test_empty_env() {
        let options = TranslateOptions::default();
        let env: [(&str, &str); 0] = [];
        assert_eq!(serialize(env, &options), "");
    }

    #[test]
    fn test_unknown_ignored() {
        let options = TranslateOptions::with_schema(url_schema());
        let result = translate([("HOME", "/root"), ("URL", "a")], &options);

        assert_eq!(result.fragment, "url: \"a\",");
        assert_eq!(result.ignored, 1);
        assert_eq!(result.entries.len(), 1);
    }

    #[test]
    fn test_legacy_first_then_current() {
        let options = TranslateOptions::with_schema(url_schema());
        let result = translate([("LEGACY_URL", "a"), ("URL", "b")], &options);

        assert_eq!(result.fragment, "url: \"b\",");
        assert!(matches!(result.entries[1], EntryOutcome::Replaced { previous_base: false, .. }));
    }

    #[test]
    fn test_current_first_then_legacy() {
        let options = TranslateOptions::with_schema(url_schema());
        let result = translate([("URL", "b"), ("LEGACY_URL", "a")], &options);

        assert_eq!(result.fragment, "url: \"b\",");
        assert_eq!(
            result.entries[1],
            EntryOutcome::LegacySuperseded {
                variable: "LEGACY_URL".to_string(),
                key: "url".to_string(),
            }
        );
    }

    #[test]
    fn test_legacy_overrides_base() {
        let mut base = BaseConfig::empty();
        base.insert("url", "default", VarType::String);
        let options = TranslateOptions {
            inject_base_config: true,
            schema: url_schema(),
            base_config: base,
        };

        let result = translate([("LEGACY_URL", "a")], &options);
        assert_eq!(result.fragment, "url: \"a\",");
        assert!(matches!(result.entries[0], EntryOutcome::Replaced { previous_base: true, .. }));
    }

    #[test]
    fn test_base_ignored_without_flag() {
        let mut base = BaseConfig::empty();
        base.insert("layout", "BaseLayout", VarType::String);
        let options = TranslateOptions {
            inject_base_config: false,
            schema: url_schema(),
            base_config: base,
        };

        assert_eq!(serialize([("URL", "a")], &options), "url: \"a\",");
    }

    #[test]
    fn test_overwrite_moves_key_to_end() {
        let mut schema = url_schema();
        schema.insert("LAYOUT", VariableSchema::new("layout", VarType::String));
        let options = TranslateOptions::with_schema(schema);

        let out = serialize([("URL", "a"), ("LAYOUT", "L"), ("URL", "b")], &options);
        assert_eq!(out, "layout: \"L\",\nurl: \"b\",");
    }

    #[test]
    fn test_superseded_legacy_keeps_position() {
        let mut schema = url_schema();
        schema.insert("LAYOUT", VariableSchema::new("layout", VarType::String));
        let options = TranslateOptions::with_schema(schema);

        let out = serialize([("URL", "a"), ("LAYOUT", "L"), ("LEGACY_URL", "b")], &options);
        assert_eq!(out, "url: \"a\",\nlayout: \"L\",");
    }

    #[test]
    fn test_on_found_called_even_when_superseded() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut schema = url_schema();
        schema.insert(
            "LEGACY_URL",
            VariableSchema::new("url", VarType::String)
                .legacy()
                .with_on_found(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
        );
        let options = TranslateOptions::with_schema(schema);

        let out = serialize(
            [("URL", "b"), ("LEGACY_URL", "a"), ("LEGACY_URL", "c")],
            &options,
        );
        assert_eq!(out, "url: \"b\",");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_owned_pairs_accepted() {
        let env: Vec<(String, String)> = vec![("URL".to_string(), "x".to_string())];
        let options = TranslateOptions::with_schema(url_schema());

        assert_eq!(serialize(env.iter().map(|(k, v)| (k, v)), &options), "url: \"x\",");
        assert_eq!(serialize(env, &options), "url: \"x\",");
    }

    #[test]
    fn test_utf8_vars_keeps_valid_pairs() {
        let vars = vec![
            (OsString::from("URL"), OsString::from("/a")),
            (OsString::from("LAYOUT"), OsString::from("BaseLayout")),
        ];
        assert_eq!(
            utf8_vars(vars),
            vec![
                ("URL".to_string(), "/a".to_string()),
                ("LAYOUT".to_string(), "BaseLayout".to_string()),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_utf8_vars_skips_invalid_pairs() {
        use std::os::unix::ffi::OsStringExt;

        let vars = vec![
            (OsString::from("BAD"), OsString::from_vec(vec![0xff])),
            (OsString::from_vec(vec![b'X', 0xfe]), OsString::from("x")),
            (OsString::from("URL"), OsString::from("/a")),
        ];
        let env = utf8_vars(vars);
        assert_eq!(env, vec![("URL".to_string(), "/a".to_string())]);

        let options = TranslateOptions::with_schema(url_schema());
        assert_eq!(serialize(env, &options), "url: \"/a\",");
    }

    #[test]
    fn test_to_json() {
        let options = TranslateOptions::with_schema(url_schema());
        let result = translate([("URL", "b"), ("LEGACY_URL", "a")], &options);
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

        assert_eq!(json["fragment"], "url: \"b\",");
        assert_eq!(json["entries"][0]["outcome"], "inserted");
        assert_eq!(json["entries"][1]["outcome"], "legacy_superseded");
        assert_eq!(json["ignored"], 0);
    }

    #[test]
    fn test_to_human() {
        let options = TranslateOptions::with_schema(url_schema());
        let result = translate([("URL", "b"), ("LEGACY_URL", "a"), ("X", "y")], &options);
        let human = result.to_human();

        assert!(human.contains("URL -> url: set"));
        assert!(human.contains("LEGACY_URL -> url: ignored"));
        assert!(human.contains("1 unrecognized"));
        assert!(human.ends_with("url: \"b\","));
        assert_eq!(result.entries[1].variable(), "LEGACY_URL");
        assert_eq!(result.entries[1].key(), "url");
    }
}
