// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ConversionError, ConversionResult, DataKind};
use crate::sql_arg::SqlArg;
use crate::value::Value;

pub(super) fn parse_default(kind: DataKind, text: &str) -> ConversionResult<Value> {
    Err(ConversionError::bad_default(
        text,
        format!("default values are not supported for {kind} fields"),
    ))
}

pub(super) fn to_sql_argument(kind: DataKind, value: &Value) -> ConversionResult<SqlArg> {
    match (kind, value) {
        (DataKind::ByteArray, Value::Bytes(bytes)) => Ok(SqlArg::Bytes(bytes.clone())),
        (DataKind::Serializable, Value::Json(json)) => serde_json::to_vec(json)
            .map(SqlArg::Bytes)
            .map_err(|e| ConversionError::SerializationFailure(e.to_string())),
        (DataKind::ByteArray, _) => Err(ConversionError::mismatch("byte array", value)),
        _ => Err(ConversionError::mismatch("serializable value", value)),
    }
}

pub(super) fn from_sql_argument(kind: DataKind, arg: &SqlArg) -> ConversionResult<Value> {
    match (kind, arg) {
        (DataKind::ByteArray, SqlArg::Bytes(bytes)) => Ok(Value::Bytes(bytes.clone())),
        (DataKind::Serializable, SqlArg::Bytes(bytes)) => serde_json::from_slice(bytes)
            .map(Value::Json)
            .map_err(|e| {
                ConversionError::SerializationFailure(format!(
                    "could not deserialize {} bytes: {e}",
                    bytes.len()
                ))
            }),
        _ => Err(ConversionError::mismatch(
            format!("{kind} column value"),
            arg,
        )),
    }
}
