// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::str::FromStr;
use std::sync::LazyLock;

use pg_bigdecimal::BigDecimal;
use regex::Regex;

use super::{ConversionError, ConversionResult, DataKind};
use crate::sql_arg::SqlArg;
use crate::value::Value;

static INTEGER_TEXT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?\d+$").unwrap());

fn parse_big_integer(text: &str) -> Option<BigDecimal> {
    if INTEGER_TEXT.is_match(text) {
        BigDecimal::from_str(text).ok()
    } else {
        None
    }
}

pub(super) fn parse_default(kind: DataKind, text: &str) -> ConversionResult<Value> {
    fn parsed<T: FromStr>(
        text: &str,
        f: impl FnOnce(T) -> Value,
    ) -> ConversionResult<Value>
    where
        T::Err: std::fmt::Display,
    {
        text.trim()
            .parse::<T>()
            .map(f)
            .map_err(|e| ConversionError::bad_default(text, e))
    }

    match kind {
        DataKind::Byte => parsed(text, Value::Byte),
        DataKind::Short => parsed(text, Value::Short),
        DataKind::Integer => parsed(text, Value::Int),
        DataKind::Long => parsed(text, Value::Long),
        DataKind::Float => parsed(text, Value::Float),
        DataKind::Double => parsed(text, Value::Double),
        DataKind::BigInteger => parse_big_integer(text.trim())
            .map(Value::BigInteger)
            .ok_or_else(|| ConversionError::bad_default(text, "not an integer")),
        _ => parsed(text, Value::BigDecimal),
    }
}

fn integral<T: TryFrom<i64>>(kind: DataKind, value: &Value) -> ConversionResult<T> {
    value
        .as_i64()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| ConversionError::mismatch(format!("{} value", kind.name()), value))
}

pub(super) fn to_sql_argument(kind: DataKind, value: &Value) -> ConversionResult<SqlArg> {
    match kind {
        DataKind::Byte => integral(kind, value).map(SqlArg::Byte),
        DataKind::Short => integral(kind, value).map(SqlArg::Short),
        DataKind::Integer => integral(kind, value).map(SqlArg::Int),
        DataKind::Long => integral(kind, value).map(SqlArg::Long),
        DataKind::Float => match value {
            Value::Float(v) => Ok(SqlArg::Float(*v)),
            _ => integral::<i32>(kind, value).map(|v| SqlArg::Float(v as f32)),
        },
        DataKind::Double => match value {
            Value::Double(v) => Ok(SqlArg::Double(*v)),
            Value::Float(v) => Ok(SqlArg::Double(*v as f64)),
            _ => integral::<i64>(kind, value).map(|v| SqlArg::Double(v as f64)),
        },
        DataKind::BigInteger => match value {
            Value::BigInteger(v) => Ok(SqlArg::String(v.to_string())),
            _ => integral::<i64>(kind, value).map(|v| SqlArg::String(v.to_string())),
        },
        DataKind::BigDecimal => match value {
            Value::BigDecimal(v) | Value::BigInteger(v) => Ok(SqlArg::String(v.to_string())),
            _ => integral::<i64>(kind, value).map(|v| SqlArg::String(v.to_string())),
        },
        _ => match value {
            Value::BigDecimal(v) | Value::BigInteger(v) => Ok(SqlArg::Decimal(v.clone())),
            _ => integral::<i64>(kind, value).map(|v| SqlArg::Decimal(BigDecimal::from(v))),
        },
    }
}

fn arg_integral(arg: &SqlArg) -> Option<i64> {
    match arg {
        SqlArg::Byte(v) => Some(*v as i64),
        SqlArg::Short(v) => Some(*v as i64),
        SqlArg::Int(v) => Some(*v as i64),
        SqlArg::Long(v) => Some(*v),
        _ => None,
    }
}

pub(super) fn from_sql_argument(kind: DataKind, arg: &SqlArg) -> ConversionResult<Value> {
    fn narrowed<T: TryFrom<i64>>(
        kind: DataKind,
        arg: &SqlArg,
        f: impl FnOnce(T) -> Value,
    ) -> ConversionResult<Value> {
        arg_integral(arg)
            .and_then(|v| T::try_from(v).ok())
            .map(f)
            .ok_or_else(|| ConversionError::mismatch(format!("{} column value", kind.name()), arg))
    }

    let mismatch = || ConversionError::mismatch(format!("{} column value", kind.name()), arg);

    match (kind, arg) {
        (DataKind::Byte, _) => narrowed(kind, arg, Value::Byte),
        (DataKind::Short, _) => narrowed(kind, arg, Value::Short),
        (DataKind::Integer, _) => narrowed(kind, arg, Value::Int),
        (DataKind::Long, _) => narrowed(kind, arg, Value::Long),
        (DataKind::Float, SqlArg::Float(v)) => Ok(Value::Float(*v)),
        (DataKind::Double, SqlArg::Double(v)) => Ok(Value::Double(*v)),
        (DataKind::Double, SqlArg::Float(v)) => Ok(Value::Double(*v as f64)),
        (DataKind::BigInteger, SqlArg::String(s)) => parse_big_integer(s)
            .map(Value::BigInteger)
            .ok_or_else(mismatch),
        (DataKind::BigInteger, SqlArg::Decimal(v)) => parse_big_integer(&v.to_string())
            .map(Value::BigInteger)
            .ok_or_else(mismatch),
        (DataKind::BigDecimal | DataKind::BigDecimalNumeric, SqlArg::String(s)) => {
            BigDecimal::from_str(s)
                .map(Value::BigDecimal)
                .map_err(|_| mismatch())
        }
        (DataKind::BigDecimal | DataKind::BigDecimalNumeric, SqlArg::Decimal(v)) => {
            Ok(Value::BigDecimal(v.clone()))
        }
        _ => Err(mismatch()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persister::PersisterContext;

    #[test]
    fn integral_values_widen_and_narrow() {
        let context = PersisterContext::default();
        assert_eq!(
            DataKind::Long
                .to_sql_argument(&context, &Value::Int(7))
                .unwrap(),
            SqlArg::Long(7)
        );
        assert_eq!(
            DataKind::Short
                .to_sql_argument(&context, &Value::Long(12))
                .unwrap(),
            SqlArg::Short(12)
        );
        assert!(matches!(
            DataKind::Byte.to_sql_argument(&context, &Value::Int(300)),
            Err(ConversionError::TypeMismatch { .. })
        ));
        assert_eq!(
            DataKind::Integer
                .from_sql_argument(&context, &SqlArg::Long(42))
                .unwrap(),
            Value::Int(42)
        );
    }

    #[test]
    fn big_integer_is_stored_as_text() {
        let context = PersisterContext::default();
        let value = DataKind::BigInteger
            .parse_default(&context, "123456789012345678901234567890")
            .unwrap();

        let arg = DataKind::BigInteger
            .to_sql_argument(&context, &value)
            .unwrap();
        assert_eq!(
            arg,
            SqlArg::String("123456789012345678901234567890".to_string())
        );
        assert_eq!(
            DataKind::BigInteger
                .from_sql_argument(&context, &arg)
                .unwrap(),
            value
        );

        assert!(matches!(
            DataKind::BigInteger.parse_default(&context, "1.5"),
            Err(ConversionError::InvalidDefaultValue { .. })
        ));
        assert!(matches!(
            DataKind::BigInteger.from_sql_argument(&context, &SqlArg::String("12x".into())),
            Err(ConversionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn big_decimal_variants() {
        let context = PersisterContext::default();
        let value = Value::BigDecimal(BigDecimal::from_str("1234.5678").unwrap());

        assert_eq!(
            DataKind::BigDecimal
                .to_sql_argument(&context, &value)
                .unwrap(),
            SqlArg::String("1234.5678".into())
        );

        let numeric = DataKind::BigDecimalNumeric
            .to_sql_argument(&context, &value)
            .unwrap();
        assert_eq!(
            numeric,
            SqlArg::Decimal(BigDecimal::from_str("1234.5678").unwrap())
        );
        assert_eq!(
            DataKind::BigDecimalNumeric
                .from_sql_argument(&context, &numeric)
                .unwrap(),
            value
        );
    }

    #[test]
    fn bad_numeric_defaults() {
        let context = PersisterContext::default();
        assert_eq!(
            DataKind::Integer.parse_default(&context, "42").unwrap(),
            Value::Int(42)
        );
        assert!(DataKind::Integer.parse_default(&context, "forty").is_err());
        assert!(DataKind::Byte.parse_default(&context, "1000").is_err());
        assert_eq!(
            DataKind::Double.parse_default(&context, "2.5").unwrap(),
            Value::Double(2.5)
        );
    }
}
