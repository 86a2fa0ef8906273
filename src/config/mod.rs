//! Variable and base-config tables
//!
//! Tables are layered:
//! 1. Built-in schema and base defaults
//! 2. Overrides file (swagger-ui-env.toml)
//! 3. Process environment, applied by the translator

mod defaults;
mod overrides;
mod schema;

pub use defaults::{BaseConfig, BaseEntry, DEFAULT_URL};
pub use overrides::{BaseOverride, ConfigError, OverridesFile, VariableOverride};
pub use schema::{OnFound, SchemaTable, VarType, VariableSchema};
