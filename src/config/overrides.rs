//! Overrides file (swagger-ui-env.toml)
//!
//! Extends the built-in tables without recompiling. Layer order:
//! built-in tables → overrides file → process environment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use super::defaults::BaseConfig;
use super::schema::{SchemaTable, VarType, VariableSchema};

/// Error types for overrides file operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// A variable definition from the overrides file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableOverride {
    /// Canonical config key
    pub name: String,

    /// Value type (default: "string")
    #[serde(default, rename = "type")]
    pub var_type: VarType,

    /// Deprecated alias that loses to values set by other names
    #[serde(default)]
    pub legacy: bool,

    /// Warning logged whenever the variable is present
    pub deprecated: Option<String>,
}

impl VariableOverride {
    fn to_schema(&self) -> VariableSchema {
        let mut schema = VariableSchema::new(self.name.clone(), self.var_type);
        if self.legacy {
            schema = schema.legacy();
        }
        match &self.deprecated {
            Some(message) => schema.with_deprecation(message.clone()),
            None => schema,
        }
    }
}

/// A base config entry from the overrides file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseOverride {
    pub key: String,

    pub value: String,

    #[serde(default, rename = "type")]
    pub var_type: VarType,
}

/// Contents of an overrides file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverridesFile {
    /// Variable definitions keyed by environment variable name
    #[serde(default)]
    pub variables: BTreeMap<String, VariableOverride>,

    /// Base config entries, in order
    #[serde(default)]
    pub base: Vec<BaseOverride>,
}

impl OverridesFile {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let file: OverridesFile = toml::from_str(contents)?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (variable, def) in &self.variables {
            if variable.is_empty() {
                return Err(ConfigError::ValidationError(
                    "variable names must not be empty".to_string(),
                ));
            }
            if def.name.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "variable {} has an empty name",
                    variable
                )));
            }
        }

        if let Some(pos) = self.base.iter().position(|b| b.key.is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "base entry {} has an empty key",
                pos
            )));
        }

        Ok(())
    }

    /// Overlay onto a schema table and base config
    ///
    /// Variables replace or extend the schema by environment name. Base
    /// entries replace existing keys in place and append new ones.
    pub fn apply(&self, schema: &mut SchemaTable, base: &mut BaseConfig) {
        for (variable, def) in &self.variables {
            schema.insert(variable.clone(), def.to_schema());
        }
        for entry in &self.base {
            base.insert(entry.key.clone(), entry.value.clone(), entry.var_type);
        }
    }
}
