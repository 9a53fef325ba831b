// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Environment-driven configuration.
//!
//! Values are read through the [`Environment`] trait so that tests can supply a
//! [`MapEnvironment`] instead of touching process variables.

use std::collections::HashMap;
use std::sync::Arc;

use crate::dialect::{DatabaseDialect, DialectRegistry};
use crate::orm_error::OrmError;

pub const EXO_ORM_DATABASE_URL: &str = "EXO_ORM_DATABASE_URL";
pub const EXO_ORM_STRING_WIDTH: &str = "EXO_ORM_STRING_WIDTH";
pub const EXO_ORM_LOG_ARGUMENTS: &str = "EXO_ORM_LOG_ARGUMENTS";
pub const EXO_ORM_LOG: &str = "EXO_ORM_LOG";

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn enabled(&self, key: &str, default_value: bool) -> Result<bool, EnvError> {
        match self.get(key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" | "enabled" | "enable" => Ok(true),
                "false" | "0" | "no" | "off" | "disabled" | "disable" => Ok(false),
                _ => Err(EnvError::InvalidBoolean {
                    key: key.to_string(),
                    value,
                }),
            },
            None => Ok(default_value),
        }
    }

    fn get_or_else(&self, key: &str, default_value: &str) -> String {
        self.get(key).unwrap_or(default_value.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "Invalid value for {key}: {value}. Expected true, 1, yes, on, enabled, enable OR false, 0, no, off, disabled, disable"
    )]
    InvalidBoolean { key: String, value: String },

    #[error("Invalid value for {key}: {value}. Expected a positive integer")]
    InvalidNumber { key: String, value: String },

    #[error("{key} must be set")]
    Missing { key: String },
}

pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Default)]
pub struct MapEnvironment {
    values: HashMap<String, String>,
    fallback: Option<Arc<dyn Environment>>,
}

impl Environment for MapEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| self.fallback.as_ref().and_then(|fb| fb.get(key)))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MapEnvironment {
    fn from(values: [(&str, &str); N]) -> Self {
        Self {
            values: HashMap::from_iter(
                values
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string())),
            ),
            fallback: None,
        }
    }
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_fallback(fallback: Arc<dyn Environment>) -> Self {
        Self {
            values: HashMap::new(),
            fallback: Some(fallback),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Settings that apply to every statement built for one database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrmConfig {
    pub database_url: Option<String>,
    /// Overrides the dialect's width for string columns declared without one
    pub string_width: Option<usize>,
    /// Trace the values of bound arguments (off by default since they may hold user data)
    pub log_arguments: bool,
}

impl OrmConfig {
    pub fn from_env(env: &dyn Environment) -> Result<Self, EnvError> {
        let string_width = match env.get(EXO_ORM_STRING_WIDTH) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(width) if width > 0 => Some(width),
                _ => {
                    return Err(EnvError::InvalidNumber {
                        key: EXO_ORM_STRING_WIDTH.to_string(),
                        value,
                    });
                }
            },
            None => None,
        };

        Ok(Self {
            database_url: env.get(EXO_ORM_DATABASE_URL),
            string_width,
            log_arguments: env.enabled(EXO_ORM_LOG_ARGUMENTS, false)?,
        })
    }

    /// Look up the dialect for the configured url and apply the overrides in this config.
    pub fn resolve_dialect(&self, registry: &DialectRegistry) -> Result<DatabaseDialect, OrmError> {
        let url = self
            .database_url
            .as_deref()
            .ok_or_else(|| EnvError::Missing {
                key: EXO_ORM_DATABASE_URL.to_string(),
            })?;

        let mut dialect = registry.for_url(url)?.clone();
        if let Some(width) = self.string_width {
            dialect.default_string_width = width;
        }
        dialect.log_arguments = self.log_arguments;

        Ok(dialect)
    }
}
