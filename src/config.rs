//! Provider configuration: the flags a rendering pass is parameterised by.
//!
//! ```toml
//! dialect = "informix"
//! pretty = false
//! default_nullable = "null"
//! sequences = true
//!
//! [pagination]
//! take = "FIRST {0}"
//! skip = "SKIP {0}"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::transpiler::Dialect;
use crate::transpiler::template::Template;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "sqlweave.toml";

/// Table-level nullability default used by CREATE TABLE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultNullable {
    /// Columns are nullable unless marked otherwise.
    Null,
    /// Columns are NOT NULL unless marked otherwise.
    NotNull,
    /// Every column states its nullability.
    #[default]
    Explicit,
}

/// Replacements for the dialect's own pagination templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationOverrides {
    pub take: Option<String>,
    pub skip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub dialect: Dialect,
    /// Multi-line output with indented clause bodies.
    pub pretty: bool,
    pub default_nullable: DefaultNullable,
    /// Allow per-column sequences on dialects that have them.
    pub sequences: bool,
    pub pagination: PaginationOverrides,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            pretty: false,
            default_nullable: DefaultNullable::default(),
            sequences: true,
            pagination: PaginationOverrides::default(),
        }
    }
}

impl RenderConfig {
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn default_nullable(mut self, policy: DefaultNullable) -> Self {
        self.default_nullable = policy;
        self
    }

    pub fn sequences(mut self, enabled: bool) -> Self {
        self.sequences = enabled;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> RenderResult<Self> {
        let config: RenderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RenderError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded render config from {}", path.display());
        Ok(config)
    }

    /// Look for `./sqlweave.toml`, then the user config directory, then fall
    /// back to defaults.
    pub fn discover() -> RenderResult<Self> {
        match Self::candidate_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("sqlweave").join("config.toml"));
        }
        paths
    }

    /// Pagination overrides must be single-argument templates.
    pub fn validate(&self) -> RenderResult<()> {
        for template in [&self.pagination.take, &self.pagination.skip]
            .into_iter()
            .flatten()
        {
            let parsed = Template::parse(template)?;
            if parsed.arity() != 1 {
                return Err(RenderError::Config(format!(
                    "pagination template '{}' must use exactly one argument {{0}}",
                    template
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.dialect, Dialect::Generic);
        assert_eq!(config.default_nullable, DefaultNullable::Explicit);
        assert!(config.sequences);
        assert!(!config.pretty);
    }

    #[test]
    fn test_from_toml() {
        let config = RenderConfig::from_toml_str(
            r#"
            dialect = "informix"
            pretty = true
            default_nullable = "not-null"

            [pagination]
            take = "FIRST {0}"
            "#,
        )
        .unwrap();
        assert_eq!(config.dialect, Dialect::Informix);
        assert!(config.pretty);
        assert_eq!(config.default_nullable, DefaultNullable::NotNull);
        assert_eq!(config.pagination.take.as_deref(), Some("FIRST {0}"));
        assert_eq!(config.pagination.skip, None);
    }

    #[test]
    fn test_rejects_bad_template() {
        let err = RenderConfig::from_toml_str(
            r#"
            [pagination]
            take = "TOP {0} {1}"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));

        let err = RenderConfig::from_toml_str(
            r#"
            [pagination]
            skip = "SKIP {x}"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::InvalidTemplate { .. }));
    }

    #[test]
    fn test_rejects_unknown_dialect() {
        let err = RenderConfig::from_toml_str(r#"dialect = "foxpro""#).unwrap_err();
        assert!(matches!(err, RenderError::Toml(_)));
    }
}
