//! Service configuration.
//!
//! Loaded from an optional TOML file with one section per service:
//!
//! ```toml
//! [people]
//! addr = "127.0.0.1:9000"
//! miss-policy = "empty-record"
//!
//! [pokemon]
//! start-empty = true
//! ```
//!
//! Every key is optional. Without a file, both services use their defaults.

use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

/// What `GET /<collection>/{id}` answers when no record matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissPolicy {
    /// `404` with a structured error payload.
    #[default]
    NotFound,
    /// `200` with a zero-valued record.
    EmptyRecord,
}

/// Settings for one service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ServiceConfig {
    /// Listen address; falls back to the service's default when unset.
    pub addr: Option<String>,
    pub miss_policy: MissPolicy,
    /// Start without the built-in sample records.
    pub start_empty: bool,
}

impl ServiceConfig {
    pub fn addr_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.addr.as_deref().unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub people: ServiceConfig,
    pub pokemon: ServiceConfig,
}

impl Config {
    /// Reads `path` if given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::parse(&std::fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }

    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }
}
