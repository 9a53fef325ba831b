// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::LazyLock;

use regex::Regex;

use super::{ConversionError, ConversionResult, DataKind};
use crate::sql_arg::SqlArg;
use crate::value::Value;

static CURRENCY_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());

const CURRENCY_EXPECTED: &str = "a three letter currency code";

/// `StringBytes` fields only support UTF-8
pub(super) fn validate_charset(charset: &str) -> Result<(), String> {
    match charset.to_ascii_lowercase().replace('-', "").as_str() {
        "utf8" => Ok(()),
        _ => Err(format!("unsupported character set '{charset}'")),
    }
}

fn currency(code: &str) -> Option<Value> {
    CURRENCY_CODE
        .is_match(code)
        .then(|| Value::Currency(code.to_string()))
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

pub(super) fn parse_default(kind: DataKind, text: &str) -> ConversionResult<Value> {
    match kind {
        DataKind::Char => single_char(text)
            .map(Value::Char)
            .ok_or_else(|| ConversionError::bad_default(text, "expected a single character")),
        DataKind::Currency => currency(text)
            .ok_or_else(|| ConversionError::bad_default(text, "not a currency code")),
        _ => Ok(Value::String(text.to_string())),
    }
}

pub(super) fn to_sql_argument(kind: DataKind, value: &Value) -> ConversionResult<SqlArg> {
    match (kind, value) {
        (DataKind::String | DataKind::LongString, Value::String(s)) => {
            Ok(SqlArg::String(s.clone()))
        }
        (DataKind::StringBytes, Value::String(s)) => Ok(SqlArg::Bytes(s.as_bytes().to_vec())),
        (DataKind::Char, Value::Char(c)) => Ok(SqlArg::Char(*c)),
        (DataKind::Currency, Value::Currency(code) | Value::String(code)) => {
            if CURRENCY_CODE.is_match(code) {
                Ok(SqlArg::String(code.clone()))
            } else {
                Err(ConversionError::mismatch(CURRENCY_EXPECTED, value))
            }
        }
        (DataKind::Char, _) => Err(ConversionError::mismatch("char", value)),
        (DataKind::Currency, _) => Err(ConversionError::mismatch(CURRENCY_EXPECTED, value)),
        _ => Err(ConversionError::mismatch("string", value)),
    }
}

pub(super) fn from_sql_argument(kind: DataKind, arg: &SqlArg) -> ConversionResult<Value> {
    match (kind, arg) {
        (DataKind::String | DataKind::LongString, SqlArg::String(s)) => {
            Ok(Value::String(s.clone()))
        }
        (DataKind::StringBytes, SqlArg::Bytes(bytes)) => String::from_utf8(bytes.clone())
            .map(Value::String)
            .map_err(|e| ConversionError::SerializationFailure(e.to_string())),
        (DataKind::Char, SqlArg::Char(c)) => Ok(Value::Char(*c)),
        (DataKind::Char, SqlArg::String(s)) => single_char(s)
            .map(Value::Char)
            .ok_or_else(|| ConversionError::mismatch("char", arg)),
        (DataKind::Currency, SqlArg::String(code)) => {
            currency(code).ok_or_else(|| ConversionError::mismatch(CURRENCY_EXPECTED, arg))
        }
        _ => Err(ConversionError::mismatch(
            format!("{} column value", kind.name()),
            arg,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persister::PersisterContext;

    #[test]
    fn string_bytes_stored_as_utf8() {
        let context = PersisterContext::default();
        let value = Value::String("grüße".into());

        let arg = DataKind::StringBytes
            .to_sql_argument(&context, &value)
            .unwrap();
        assert_eq!(arg, SqlArg::Bytes("grüße".as_bytes().to_vec()));
        assert_eq!(
            DataKind::StringBytes
                .from_sql_argument(&context, &arg)
                .unwrap(),
            value
        );

        assert!(matches!(
            DataKind::StringBytes.from_sql_argument(&context, &SqlArg::Bytes(vec![0xff, 0xfe])),
            Err(ConversionError::SerializationFailure(_))
        ));
    }

    #[test]
    fn char_defaults() {
        let context = PersisterContext::default();
        assert_eq!(
            DataKind::Char.parse_default(&context, "x").unwrap(),
            Value::Char('x')
        );
        assert!(DataKind::Char.parse_default(&context, "xy").is_err());
        assert!(DataKind::Char.parse_default(&context, "").is_err());
    }

    #[test]
    fn currency_codes() {
        let context = PersisterContext::default();
        assert_eq!(
            DataKind::Currency.parse_default(&context, "EUR").unwrap(),
            Value::Currency("EUR".into())
        );
        assert!(matches!(
            DataKind::Currency.parse_default(&context, "euro"),
            Err(ConversionError::InvalidDefaultValue { .. })
        ));
        assert_eq!(
            DataKind::Currency
                .to_sql_argument(&context, &Value::Currency("USD".into()))
                .unwrap(),
            SqlArg::String("USD".into())
        );
        assert!(matches!(
            DataKind::Currency.from_sql_argument(&context, &SqlArg::String("US".into())),
            Err(ConversionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn wrong_variant_is_a_mismatch() {
        let context = PersisterContext::default();
        assert!(matches!(
            DataKind::String.to_sql_argument(&context, &Value::Int(1)),
            Err(ConversionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn charsets() {
        assert!(validate_charset("UTF-8").is_ok());
        assert!(validate_charset("utf8").is_ok());
        assert!(validate_charset("ISO-8859-1").is_err());
    }
}
