//! Built-in base config
//!
//! Out-of-the-box settings for the Swagger UI bootstrap call. Seeded ahead
//! of the environment when requested; any environment value for the same
//! key, legacy or not, overrides them.

use super::schema::{VarType, VariableSchema};

/// OpenAPI document loaded when nothing else is configured
pub const DEFAULT_URL: &str = "https://petstore.swagger.io/v2/swagger.json";

const DEFAULT_PRESETS: &str = "[
  SwaggerUIBundle.presets.apis,
  SwaggerUIStandalonePreset
]";

const DEFAULT_PLUGINS: &str = "[
  SwaggerUIBundle.plugins.DownloadUrl
]";

/// Send requests the UI makes against the proxy port to the API server port.
const DEFAULT_REQUEST_INTERCEPTOR: &str = r#"function (request) {
  request.url = request.url.split(":8081/").join(":8080/");
  console.log("[requestInterceptor] :8080", request);
  return request;
}"#;

/// One pre-set config value
#[derive(Debug, Clone)]
pub struct BaseEntry {
    /// Canonical config key
    pub key: String,

    /// Raw value, emitted like an environment value
    pub value: String,

    /// Schema for the value; always marked `base`
    pub schema: VariableSchema,
}

/// Ordered table of base config values
#[derive(Debug, Clone)]
pub struct BaseConfig {
    entries: Vec<BaseEntry>,
}

impl BaseConfig {
    /// An empty table
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set a key, replacing its value in place or appending it if new
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>, var_type: VarType) {
        let key = key.into();
        let entry = BaseEntry {
            schema: VariableSchema::new(key.clone(), var_type).base(),
            key,
            value: value.into(),
        };

        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, key: &str) -> Option<&BaseEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BaseEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BaseConfig {
    fn default() -> Self {
        let mut base = Self::empty();
        base.insert("url", DEFAULT_URL, VarType::String);
        base.insert("dom_id", "#swagger-ui", VarType::String);
        base.insert("deepLinking", "true", VarType::Boolean);
        base.insert("presets", DEFAULT_PRESETS, VarType::Array);
        base.insert("plugins", DEFAULT_PLUGINS, VarType::Array);
        base.insert("layout", "StandaloneLayout", VarType::String);
        base.insert("requestInterceptor", DEFAULT_REQUEST_INTERCEPTOR, VarType::Function);
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let base = BaseConfig::default();
        let keys: Vec<&str> = base.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "url",
                "dom_id",
                "deepLinking",
                "presets",
                "plugins",
                "layout",
                "requestInterceptor"
            ]
        );
        assert_eq!(base.get("url").unwrap().value, DEFAULT_URL);
        assert_eq!(base.get("layout").unwrap().value, "StandaloneLayout");
    }

    #[test]
    fn test_entries_are_base() {
        let base = BaseConfig::default();
        for entry in base.iter() {
            assert!(entry.schema.base, "{} not marked base", entry.key);
            assert_eq!(entry.schema.name, entry.key);
            assert!(!entry.schema.legacy);
        }
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut base = BaseConfig::default();
        base.insert("dom_id", "#docs", VarType::String);

        assert_eq!(base.len(), 7);
        assert_eq!(base.iter().nth(1).unwrap().value, "#docs");
    }

    #[test]
    fn test_insert_appends_new_key() {
        let mut base = BaseConfig::empty();
        assert!(base.is_empty());
        base.insert("a", "1", VarType::Number);
        base.insert("b", "x", VarType::String);

        let keys: Vec<&str> = base.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
