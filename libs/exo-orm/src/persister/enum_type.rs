// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{ConversionError, ConversionResult, DataKind, PersisterContext};
use crate::sql_arg::SqlArg;
use crate::value::Value;

/// An enumeration a field's values are drawn from. Constants are listed in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    pub name: String,
    pub constants: Vec<EnumConstant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumConstant {
    pub name: String,
    /// The display form stored by `ENUM_TO_STRING` fields; the name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, constants: &[&str]) -> Self {
        Self {
            name: name.into(),
            constants: constants
                .iter()
                .map(|c| EnumConstant {
                    name: c.to_string(),
                    display: None,
                })
                .collect(),
        }
    }

    pub fn with_display(mut self, constant: &str, display: impl Into<String>) -> Self {
        if let Some(c) = self.constants.iter_mut().find(|c| c.name == constant) {
            c.display = Some(display.into());
        }
        self
    }
}

impl EnumConstant {
    fn display(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.name)
    }
}

/// Lookup tables built once per field.
///
/// Values read from the database that match no constant resolve to the configured unknown
/// constant when there is one, and fail otherwise.
#[derive(Debug, Clone)]
pub struct EnumLookup {
    enum_type: EnumType,
    by_name: HashMap<String, usize>,
    by_display: HashMap<String, usize>,
    unknown: Option<usize>,
}

impl EnumLookup {
    pub fn new(enum_type: &EnumType, unknown_name: Option<&str>) -> Result<Self, String> {
        if enum_type.constants.is_empty() {
            return Err(format!("enum {} has no constants", enum_type.name));
        }

        let mut by_name = HashMap::new();
        let mut by_display = HashMap::new();
        for (ordinal, constant) in enum_type.constants.iter().enumerate() {
            if by_name.insert(constant.name.clone(), ordinal).is_some() {
                return Err(format!(
                    "enum {} declares {} twice",
                    enum_type.name, constant.name
                ));
            }
        }
        for (ordinal, constant) in enum_type.constants.iter().enumerate() {
            let display = constant.display();
            let shadows_name = by_name.get(display).is_some_and(|other| *other != ordinal);
            if shadows_name || by_display.insert(display.to_string(), ordinal).is_some() {
                return Err(format!(
                    "enum {} displays {display} for more than one constant",
                    enum_type.name
                ));
            }
        }

        let unknown = unknown_name
            .map(|name| {
                by_name.get(name).copied().ok_or_else(|| {
                    format!(
                        "unknown enum value {name} is not a constant of {}",
                        enum_type.name
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            enum_type: enum_type.clone(),
            by_name,
            by_display,
            unknown,
        })
    }

    pub fn enum_type(&self) -> &EnumType {
        &self.enum_type
    }

    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    fn constant(&self, ordinal: usize) -> Option<&EnumConstant> {
        self.enum_type.constants.get(ordinal)
    }

    /// Resolve a database-side value, falling back to the unknown constant
    fn resolve(&self, found: Option<usize>, stored: &SqlArg) -> Option<&EnumConstant> {
        match found {
            Some(ordinal) => self.constant(ordinal),
            None => {
                let fallback = self.unknown.and_then(|ordinal| self.constant(ordinal))?;
                warn!(
                    "Value {stored} is not a constant of {}, using {}",
                    self.enum_type.name, fallback.name
                );
                Some(fallback)
            }
        }
    }
}

fn lookup<'a>(context: &PersisterContext<'a>) -> ConversionResult<&'a EnumLookup> {
    context.enum_lookup.ok_or_else(|| {
        ConversionError::TypeMismatch {
            expected: "an enum type for the field".to_string(),
            value: "none configured".to_string(),
        }
    })
}

pub(super) fn parse_default(
    kind: DataKind,
    context: &PersisterContext,
    text: &str,
) -> ConversionResult<Value> {
    let lookup = lookup(context)?;
    let text = text.trim();

    let ordinal = match kind {
        DataKind::EnumInteger => match text.parse::<usize>() {
            Ok(ordinal) if ordinal < lookup.enum_type.constants.len() => Some(ordinal),
            Ok(ordinal) => {
                return Err(ConversionError::bad_default(
                    text,
                    format!(
                        "ordinal {ordinal} is out of range for {}",
                        lookup.enum_type.name
                    ),
                ));
            }
            Err(_) => lookup.ordinal(text),
        },
        DataKind::EnumToString => lookup
            .ordinal(text)
            .or_else(|| lookup.by_display.get(text).copied()),
        _ => lookup.ordinal(text),
    };

    ordinal
        .and_then(|ordinal| lookup.constant(ordinal))
        .map(|constant| Value::Enum(constant.name.clone()))
        .ok_or_else(|| {
            ConversionError::bad_default(
                text,
                format!("not a constant of {}", lookup.enum_type.name),
            )
        })
}

pub(super) fn to_sql_argument(
    kind: DataKind,
    context: &PersisterContext,
    value: &Value,
) -> ConversionResult<SqlArg> {
    let lookup = lookup(context)?;

    let (Value::Enum(name) | Value::String(name)) = value else {
        return Err(ConversionError::mismatch("enum", value));
    };
    let Some(ordinal) = lookup.ordinal(name) else {
        return Err(ConversionError::mismatch(
            format!("a constant of {}", lookup.enum_type.name),
            value,
        ));
    };

    match kind {
        DataKind::EnumInteger => i32::try_from(ordinal)
            .map(SqlArg::Int)
            .map_err(|_| ConversionError::mismatch("an ordinal within i32 range", value)),
        DataKind::EnumToString => {
            let display = lookup
                .constant(ordinal)
                .map(|c| c.display().to_string())
                .unwrap_or_else(|| name.clone());
            Ok(SqlArg::String(display))
        }
        _ => Ok(SqlArg::String(name.clone())),
    }
}

pub(super) fn from_sql_argument(
    kind: DataKind,
    context: &PersisterContext,
    arg: &SqlArg,
) -> ConversionResult<Value> {
    let lookup = lookup(context)?;

    let found = match (kind, arg) {
        (DataKind::EnumInteger, SqlArg::Int(ordinal)) => usize::try_from(*ordinal)
            .ok()
            .filter(|ordinal| *ordinal < lookup.enum_type.constants.len()),
        (DataKind::EnumToString, SqlArg::String(display)) => {
            lookup.by_display.get(display).copied()
        }
        (DataKind::EnumName, SqlArg::String(name)) => lookup.ordinal(name),
        _ => {
            return Err(ConversionError::mismatch(
                format!("{kind} column value"),
                arg,
            ));
        }
    };

    lookup
        .resolve(found, arg)
        .map(|constant| Value::Enum(constant.name.clone()))
        .ok_or_else(|| {
            ConversionError::mismatch(format!("a constant of {}", lookup.enum_type.name), arg)
        })
}
