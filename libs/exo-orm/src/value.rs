// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Utc};
use indexmap::IndexMap;
use pg_bigdecimal::BigDecimal;
use uuid::Uuid;

/// An in-memory value of a mapped record field.
///
/// The variant chosen for a field is dictated by its [`DataKind`](crate::DataKind); for example a
/// `DateLong` field still holds a [`Value::Date`], it is only stored as a number.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    BigInteger(BigDecimal),
    BigDecimal(BigDecimal),
    /// A point in time with millisecond precision. Build it with [`Value::date`] (or `From`),
    /// which drops anything finer.
    Date(DateTime<Utc>),
    Uuid(Uuid),
    /// The name of an enum constant
    Enum(String),
    /// The payload of a serialized-blob field
    Json(serde_json::Value),
    /// An ISO 4217 currency code
    Currency(String),
    LocalDate(NaiveDate),
    LocalTime(NaiveTime),
    LocalDateTime(NaiveDateTime),
    OffsetTime(NaiveTime, FixedOffset),
    OffsetDateTime(DateTime<FixedOffset>),
}

impl Value {
    pub fn date(date: DateTime<Utc>) -> Self {
        Value::Date(date.trunc_subsecs(3))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// A short name of the variant for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Char(_) => "char",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Bytes(_) => "byte array",
            Value::BigInteger(_) => "big integer",
            Value::BigDecimal(_) => "big decimal",
            Value::Date(_) => "date",
            Value::Uuid(_) => "uuid",
            Value::Enum(_) => "enum",
            Value::Json(_) => "serialized value",
            Value::Currency(_) => "currency",
            Value::LocalDate(_) => "local date",
            Value::LocalTime(_) => "local time",
            Value::LocalDateTime(_) => "local date-time",
            Value::OffsetTime(..) => "offset time",
            Value::OffsetDateTime(_) => "offset date-time",
        }
    }

    /// Widen any integral variant to `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(v) => Some(*v as i64),
            Value::Short(v) => Some(*v as i64),
            Value::Int(v) => Some(*v as i64),
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Enum(s) | Value::Currency(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "'{v}'"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{v}'"),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Value::BigInteger(v) | Value::BigDecimal(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{}", v.to_rfc3339()),
            Value::Uuid(v) => write!(f, "{v}"),
            Value::Enum(v) => f.write_str(v),
            Value::Json(v) => write!(f, "{v}"),
            Value::Currency(v) => f.write_str(v),
            Value::LocalDate(v) => write!(f, "{v}"),
            Value::LocalTime(v) => write!(f, "{v}"),
            Value::LocalDateTime(v) => write!(f, "{v}"),
            Value::OffsetTime(time, offset) => write!(f, "{time}{offset}"),
            Value::OffsetDateTime(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

macro_rules! value_from {
    ($($typ:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$typ> for Value {
                fn from(v: $typ) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from!(
    bool => Bool,
    char => Char,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    Vec<u8> => Bytes,
    Uuid => Uuid,
    NaiveDate => LocalDate,
    NaiveTime => LocalTime,
    NaiveDateTime => LocalDateTime,
    DateTime<FixedOffset> => OffsetDateTime,
);

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::date(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A mapped row: column name to value, in column order
pub type Record = IndexMap<String, Value>;

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    #[test]
    fn dates_keep_milliseconds_only() {
        let precise = Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);

        let Value::Date(date) = Value::from(precise) else {
            panic!("expected a date");
        };
        assert_eq!(date.nanosecond(), 123_000_000);
        assert_eq!(Value::date(precise), Value::Date(date));
    }
}
