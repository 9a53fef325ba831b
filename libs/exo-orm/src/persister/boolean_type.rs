// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ConversionError, ConversionResult, DataKind, PersisterContext};
use crate::sql_arg::SqlArg;
use crate::value::Value;

/// True and false characters of a `BooleanChar` field
const DEFAULT_BOOLEAN_CHARS: (char, char) = ('1', '0');

fn boolean_chars(context: &PersisterContext) -> (char, char) {
    context
        .format
        .and_then(|format| {
            let mut chars = format.chars();
            Some((chars.next()?, chars.next()?))
        })
        .unwrap_or(DEFAULT_BOOLEAN_CHARS)
}

pub(super) fn validate_format(format: &str) -> Result<(), String> {
    let chars: Vec<char> = format.chars().collect();
    match chars.as_slice() {
        [t, f] if t != f => Ok(()),
        _ => Err(format!(
            "boolean character format must be two distinct characters, got '{format}'"
        )),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

pub(super) fn parse_default(
    kind: DataKind,
    context: &PersisterContext,
    text: &str,
) -> ConversionResult<Value> {
    let parsed = match kind {
        DataKind::BooleanChar => parse_bool(text).or_else(|| {
            let (true_char, false_char) = boolean_chars(context);
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c == true_char => Some(true),
                (Some(c), None) if c == false_char => Some(false),
                _ => None,
            }
        }),
        _ => parse_bool(text),
    };

    parsed
        .map(Value::Bool)
        .ok_or_else(|| ConversionError::bad_default(text, "expected true or false"))
}

pub(super) fn to_sql_argument(
    kind: DataKind,
    context: &PersisterContext,
    value: &Value,
) -> ConversionResult<SqlArg> {
    let Value::Bool(b) = value else {
        return Err(ConversionError::mismatch("boolean", value));
    };

    Ok(match kind {
        DataKind::BooleanChar => {
            let (true_char, false_char) = boolean_chars(context);
            SqlArg::Char(if *b { true_char } else { false_char })
        }
        DataKind::BooleanInteger => SqlArg::Int(if *b { 1 } else { 0 }),
        _ => SqlArg::Bool(*b),
    })
}

pub(super) fn from_sql_argument(
    kind: DataKind,
    context: &PersisterContext,
    arg: &SqlArg,
) -> ConversionResult<Value> {
    let b = match (kind, arg) {
        (DataKind::Boolean, SqlArg::Bool(b)) => *b,
        (DataKind::BooleanChar, SqlArg::Char(c)) => {
            let (true_char, false_char) = boolean_chars(context);
            if *c == true_char {
                true
            } else if *c == false_char {
                false
            } else {
                return Err(ConversionError::mismatch(
                    format!("'{true_char}' or '{false_char}'"),
                    arg,
                ));
            }
        }
        (DataKind::BooleanInteger, SqlArg::Byte(i)) => *i != 0,
        (DataKind::BooleanInteger, SqlArg::Short(i)) => *i != 0,
        (DataKind::BooleanInteger, SqlArg::Int(i)) => *i != 0,
        (DataKind::BooleanInteger, SqlArg::Long(i)) => *i != 0,
        _ => {
            return Err(ConversionError::mismatch(
                format!("{} column value", kind.name()),
                arg,
            ));
        }
    };

    Ok(Value::Bool(b))
}
