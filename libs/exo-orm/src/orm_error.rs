// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::config::EnvError;

/// Errors surfaced while translating records into SQL text, bound arguments or DDL.
///
/// All of these are build-time failures. None of them describe a transient condition, so callers
/// should not retry.
#[derive(Error, Debug)]
pub enum OrmError {
    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("Incomplete where expression: {reason} (clause stack size {stack_size})")]
    IncompleteWhereExpression { reason: String, stack_size: usize },

    #[error("No where clause defined")]
    NoWhereClauseDefined,

    #[error("Invalid default value '{value}' for column '{column}': {reason}")]
    InvalidDefaultValue {
        column: String,
        value: String,
        reason: String,
    },

    #[error("Type mismatch for column '{column}': expected {expected}, got {value}")]
    TypeMismatch {
        column: String,
        expected: String,
        value: String,
    },

    #[error("Serialization failure for column '{column}': {reason}")]
    SerializationFailure { column: String, reason: String },

    #[error("{dialect} does not support {feature}")]
    UnsupportedDialectFeature { dialect: String, feature: String },

    #[error("Argument for column '{column}' was consumed before its value was set")]
    UnsetArgument { column: String },

    #[error("No dialect registered for database url '{url}'")]
    UnknownDialect { url: String },

    #[error("Invalid configuration for column '{column}': {message}")]
    InvalidFieldConfig { column: String, message: String },

    #[error("Raw clause '{fragment}' has {markers} argument markers but {args} arguments")]
    RawArgumentMismatch {
        fragment: String,
        markers: usize,
        args: usize,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] EnvError),

    #[error("{0} {1}")]
    WithContext(String, #[source] Box<OrmError>),
}

impl OrmError {
    pub fn with_context(self, context: String) -> OrmError {
        OrmError::WithContext(context, Box::new(self))
    }

    pub(crate) fn unsupported(dialect: &str, feature: impl Into<String>) -> OrmError {
        OrmError::UnsupportedDialectFeature {
            dialect: dialect.to_string(),
            feature: feature.into(),
        }
    }

    pub(crate) fn invalid_field(column: &str, message: impl Into<String>) -> OrmError {
        OrmError::InvalidFieldConfig {
            column: column.to_string(),
            message: message.into(),
        }
    }
}

pub trait WithContext {
    fn with_context(self, context: String) -> Self;
}

impl<T> WithContext for Result<T, OrmError> {
    fn with_context(self, context: String) -> Result<T, OrmError> {
        self.map_err(|e| e.with_context(context))
    }
}
