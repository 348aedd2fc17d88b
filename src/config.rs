// Copyright (c) 2025 - Cowboy AI, Inc.
//! Graph compilation configuration

use serde::{Deserialize, Serialize};

use crate::errors::{GraphError, GraphResult};

/// Limits enforced by the term builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermConfig {
    /// Maximum byte length of a node's natural identifier
    pub max_identifier_len: usize,

    /// Maximum byte length of a literal value
    pub max_literal_len: usize,
}

impl TermConfig {
    /// Default identifier limit
    pub const DEFAULT_MAX_IDENTIFIER_LEN: usize = 1024;

    /// Default literal limit
    pub const DEFAULT_MAX_LITERAL_LEN: usize = 8192;

    /// Set the identifier length limit
    pub fn with_max_identifier_len(mut self, max: usize) -> Self {
        self.max_identifier_len = max;
        self
    }

    /// Set the literal length limit
    pub fn with_max_literal_len(mut self, max: usize) -> Self {
        self.max_literal_len = max;
        self
    }
}

impl Default for TermConfig {
    fn default() -> Self {
        Self {
            max_identifier_len: Self::DEFAULT_MAX_IDENTIFIER_LEN,
            max_literal_len: Self::DEFAULT_MAX_LITERAL_LEN,
        }
    }
}

/// Configuration for the graph assembler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Term builder limits
    pub term: TermConfig,

    /// Apply set semantics to the assembled statements (first occurrence wins)
    pub deduplicate: bool,
}

impl GraphConfig {
    /// Create a configuration with default limits and no deduplication
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the term builder limits
    pub fn with_term(mut self, term: TermConfig) -> Self {
        self.term = term;
        self
    }

    /// Enable or disable statement deduplication
    pub fn with_deduplication(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    /// Load a configuration document
    ///
    /// Missing keys fall back to their defaults. The result is validated.
    pub fn from_json(json: &str) -> GraphResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every limit leaves room for at least one term
    pub fn validate(&self) -> GraphResult<()> {
        if self.term.max_identifier_len == 0 {
            return Err(GraphError::Configuration(
                "max_identifier_len must be greater than zero".to_string(),
            ));
        }
        if self.term.max_literal_len == 0 {
            return Err(GraphError::Configuration(
                "max_literal_len must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
