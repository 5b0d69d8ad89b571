//! Configuration for the solver.
//!
//! `SolveConfig` centralizes behavioral knobs so no constants are hardcoded
//! in the search itself. The problem instance (quotas, pins) lives in
//! [`crate::table`]; this type only controls how the search runs and how the
//! materialized grid renders.

use crate::validate::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveConfig {
    /// Blank entirely-blank columns before the search starts.
    ///
    /// A column whose quota equals the row count must be blank in every row,
    /// so those cells can be assigned up front and the search run over the
    /// residual quotas. Never changes which instances are satisfiable.
    pub warm_start: bool,
    /// Node budget for the backtracking search. `None` runs exhaustively;
    /// exceeding a set budget aborts with an explicit error, never a
    /// partial answer.
    pub max_nodes: Option<u64>,
    /// Marker rendered into blank cells by the materializer.
    pub blank_marker: String,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            warm_start: true,
            max_nodes: None,
            blank_marker: "-".to_string(),
        }
    }
}

impl SolveConfig {
    /// Unbounded search: terminates only with a solution or a definitive
    /// infeasibility verdict.
    pub fn exhaustive() -> Self {
        Self::default()
    }

    /// Search with a generous node budget for untrusted quota inputs.
    pub fn bounded() -> Self {
        Self {
            max_nodes: Some(5_000_000),
            ..Default::default()
        }
    }

    pub fn builder() -> SolveConfigBuilder {
        SolveConfigBuilder {
            inner: SolveConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_nodes == Some(0) {
            return Err(ConfigError::NonPositiveLimit {
                field: "max_nodes",
                value: 0,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SolveConfigBuilder {
    inner: SolveConfig,
}

impl Default for SolveConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolveConfigBuilder {
    pub fn new() -> Self {
        SolveConfig::builder()
    }

    pub fn warm_start(mut self, value: bool) -> Self {
        self.inner.warm_start = value;
        self
    }

    pub fn max_nodes(mut self, value: Option<u64>) -> Self {
        self.inner.max_nodes = value;
        self
    }

    pub fn blank_marker(mut self, value: impl Into<String>) -> Self {
        self.inner.blank_marker = value.into();
        self
    }

    pub fn build(self) -> Result<SolveConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
