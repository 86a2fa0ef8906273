//! swagger-ui-env - environment-driven Swagger UI configuration
//!
//! Translates environment variables into the `key: value,` body of a
//! `SwaggerUIBundle({...})` call, merging them over built-in defaults and
//! resolving legacy variable names, then splices the call into an HTML
//! template.

pub mod config;
pub mod render;
pub mod translate;

pub use config::{BaseConfig, ConfigError, OverridesFile, SchemaTable, VarType, VariableSchema};
pub use render::{inject, inject_file, render_call, InjectError};
pub use translate::{
    serialize, translate, utf8_vars, EntryOutcome, TranslateOptions, Translation,
};
