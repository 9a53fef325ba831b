// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use uuid::Uuid;

use super::{ConversionError, ConversionResult, DataKind};
use crate::sql_arg::SqlArg;
use crate::value::Value;

pub(super) fn generate_id() -> Value {
    Value::Uuid(Uuid::new_v4())
}

pub(super) fn parse_default(text: &str) -> ConversionResult<Value> {
    Uuid::parse_str(text.trim())
        .map(Value::Uuid)
        .map_err(|e| ConversionError::bad_default(text, e))
}

pub(super) fn to_sql_argument(kind: DataKind, value: &Value) -> ConversionResult<SqlArg> {
    let uuid = match value {
        Value::Uuid(uuid) => *uuid,
        Value::String(s) => {
            Uuid::parse_str(s).map_err(|_| ConversionError::mismatch("uuid", value))?
        }
        _ => return Err(ConversionError::mismatch("uuid", value)),
    };

    Ok(match kind {
        DataKind::UuidNative => SqlArg::Uuid(uuid),
        _ => SqlArg::String(uuid.hyphenated().to_string()),
    })
}

pub(super) fn from_sql_argument(kind: DataKind, arg: &SqlArg) -> ConversionResult<Value> {
    match arg {
        SqlArg::Uuid(uuid) => Ok(Value::Uuid(*uuid)),
        SqlArg::String(s) => Uuid::parse_str(s)
            .map(Value::Uuid)
            .map_err(|_| ConversionError::mismatch(format!("{kind} column value"), arg)),
        _ => Err(ConversionError::mismatch(
            format!("{kind} column value"),
            arg,
        )),
    }
}
