//! Variable schema tables
//!
//! Maps recognized environment variable names to the Swagger UI config key
//! they set. Several variable names may share one canonical key; legacy
//! aliases are marked so that they never override a value set by the
//! current name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Hook invoked with the raw variable name whenever that variable is present
pub type OnFound = Arc<dyn Fn(&str) + Send + Sync>;

/// Declared type of a config value
///
/// Only `String` changes how a value is emitted (it gets quoted); every
/// other type is written out verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    #[default]
    String,
    Boolean,
    Number,
    Array,
    Object,
    Function,
}

/// Definition of one recognized variable
#[derive(Clone)]
pub struct VariableSchema {
    /// Canonical output key in the generated config object
    pub name: String,

    /// Declared value type
    pub var_type: VarType,

    /// Deprecated alias of another variable with the same canonical key
    pub legacy: bool,

    /// Entry was seeded from the base config rather than the environment
    pub base: bool,

    /// Side effect run each time the variable is encountered
    pub on_found: Option<OnFound>,
}

impl VariableSchema {
    pub fn new(name: impl Into<String>, var_type: VarType) -> Self {
        Self {
            name: name.into(),
            var_type,
            legacy: false,
            base: false,
            on_found: None,
        }
    }

    /// Mark as a legacy alias
    pub fn legacy(mut self) -> Self {
        self.legacy = true;
        self
    }

    /// Mark as a base-config entry
    pub fn base(mut self) -> Self {
        self.base = true;
        self
    }

    /// Attach an `on_found` hook
    pub fn with_on_found(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_found = Some(Arc::new(hook));
        self
    }

    /// Attach a hook that logs a deprecation warning
    pub fn with_deprecation(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.with_on_found(move |variable| {
            tracing::warn!(variable, "{}", message);
        })
    }

    /// Whether values of this variable are emitted quoted
    pub fn is_string(&self) -> bool {
        self.var_type == VarType::String
    }
}

impl fmt::Debug for VariableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableSchema")
            .field("name", &self.name)
            .field("var_type", &self.var_type)
            .field("legacy", &self.legacy)
            .field("base", &self.base)
            .field("on_found", &self.on_found.is_some())
            .finish()
    }
}

/// Lookup table from environment variable name to its schema
#[derive(Debug, Clone, Default)]
pub struct SchemaTable {
    variables: HashMap<String, VariableSchema>,
}

impl SchemaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable definition, returning the previous one
    pub fn insert(
        &mut self,
        variable: impl Into<String>,
        schema: VariableSchema,
    ) -> Option<VariableSchema> {
        self.variables.insert(variable.into(), schema)
    }

    pub fn get(&self, variable: &str) -> Option<&VariableSchema> {
        self.variables.get(variable)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Variables understood by the Swagger UI bootstrap call
    pub fn standard() -> Self {
        use VarType as T;

        let mut table = Self::new();
        for (variable, name, var_type) in [
            ("CONFIG_URL", "configUrl", T::String),
            ("DOM_ID", "dom_id", T::String),
            ("SPEC", "spec", T::Object),
            ("URL", "url", T::String),
            ("URLS", "urls", T::Array),
            ("URLS_PRIMARY_NAME", "urls.primaryName", T::String),
            ("LAYOUT", "layout", T::String),
            ("DEEP_LINKING", "deepLinking", T::Boolean),
            ("DISPLAY_OPERATION_ID", "displayOperationId", T::Boolean),
            ("DEFAULT_MODELS_EXPAND_DEPTH", "defaultModelsExpandDepth", T::Number),
            ("DEFAULT_MODEL_EXPAND_DEPTH", "defaultModelExpandDepth", T::Number),
            ("DEFAULT_MODEL_RENDERING", "defaultModelRendering", T::String),
            ("DISPLAY_REQUEST_DURATION", "displayRequestDuration", T::Boolean),
            ("DOC_EXPANSION", "docExpansion", T::String),
            ("FILTER", "filter", T::String),
            ("MAX_DISPLAYED_TAGS", "maxDisplayedTags", T::Number),
            ("SHOW_EXTENSIONS", "showExtensions", T::Boolean),
            ("SHOW_COMMON_EXTENSIONS", "showCommonExtensions", T::Boolean),
            ("OAUTH2_REDIRECT_URL", "oauth2RedirectUrl", T::String),
            ("SHOW_MUTATED_REQUEST", "showMutatedRequest", T::Boolean),
            ("SUPPORTED_SUBMIT_METHODS", "supportedSubmitMethods", T::Array),
            ("VALIDATOR_URL", "validatorUrl", T::String),
            ("WITH_CREDENTIALS", "withCredentials", T::Boolean),
        ] {
            table.insert(variable, VariableSchema::new(name, var_type));
        }

        table.insert(
            "API_URL",
            VariableSchema::new("url", T::String).legacy().with_deprecation(
                "Usage of the `API_URL` environment variable is deprecated. Please use `URL` instead.",
            ),
        );
        table.insert(
            "API_URLS",
            VariableSchema::new("urls", T::Array).legacy().with_deprecation(
                "Usage of the `API_URLS` environment variable is deprecated. Please use `URLS` instead.",
            ),
        );

        table
    }

    /// Variables passed to `ui.initOAuth`
    pub fn oauth() -> Self {
        use VarType as T;

        let mut table = Self::new();
        for (variable, name, var_type) in [
            ("OAUTH_CLIENT_ID", "clientId", T::String),
            ("OAUTH_REALM", "realm", T::String),
            ("OAUTH_APP_NAME", "appName", T::String),
            ("OAUTH_SCOPE_SEPARATOR", "scopeSeparator", T::String),
            ("OAUTH_ADDITIONAL_PARAMS", "additionalQueryStringParams", T::Object),
            (
                "OAUTH_USE_BASIC_AUTH",
                "useBasicAuthenticationWithAccessCodeGrant",
                T::Boolean,
            ),
            ("OAUTH_USE_PKCE", "usePkceWithAuthorizationCodeGrant", T::Boolean),
        ] {
            table.insert(variable, VariableSchema::new(name, var_type));
        }

        table.insert(
            "OAUTH_CLIENT_SECRET",
            VariableSchema::new("clientSecret", T::String).with_deprecation(
                "OAUTH_CLIENT_SECRET is embedded in the page and visible to every browser that loads it. \
                 Do not use a secret that grants access to anything sensitive.",
            ),
        );

        table
    }
}
