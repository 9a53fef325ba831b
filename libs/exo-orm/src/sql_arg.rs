// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use pg_bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value::Value;

/// The representation of a value as handed to (or read from) the database driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
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
    Decimal(BigDecimal),
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    TimeTz(NaiveTime, FixedOffset),
    TimestampTz(DateTime<FixedOffset>),
    Uuid(Uuid),
}

impl SqlArg {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlArg::Null)
    }

    /// Best-effort conversion for arguments that aren't tied to a column (raw clauses). The
    /// value is passed through in its most natural wire form.
    pub fn from_untyped(value: &Value) -> SqlArg {
        match value {
            Value::Null => SqlArg::Null,
            Value::Bool(v) => SqlArg::Bool(*v),
            Value::Char(v) => SqlArg::Char(*v),
            Value::Byte(v) => SqlArg::Byte(*v),
            Value::Short(v) => SqlArg::Short(*v),
            Value::Int(v) => SqlArg::Int(*v),
            Value::Long(v) => SqlArg::Long(*v),
            Value::Float(v) => SqlArg::Float(*v),
            Value::Double(v) => SqlArg::Double(*v),
            Value::String(v) | Value::Enum(v) | Value::Currency(v) => SqlArg::String(v.clone()),
            Value::Bytes(v) => SqlArg::Bytes(v.clone()),
            Value::BigInteger(v) | Value::BigDecimal(v) => SqlArg::Decimal(v.clone()),
            Value::Date(v) => SqlArg::Timestamp(v.naive_utc()),
            Value::Uuid(v) => SqlArg::Uuid(*v),
            Value::Json(v) => SqlArg::String(v.to_string()),
            Value::LocalDate(v) => SqlArg::Date(*v),
            Value::LocalTime(v) => SqlArg::Time(*v),
            Value::LocalDateTime(v) => SqlArg::Timestamp(*v),
            Value::OffsetTime(time, offset) => SqlArg::TimeTz(*time, *offset),
            Value::OffsetDateTime(v) => SqlArg::TimestampTz(*v),
        }
    }

    /// Whether the literal form of this argument must be quoted
    pub fn is_quoted_literal(&self) -> bool {
        !matches!(
            self,
            SqlArg::Null
                | SqlArg::Bool(_)
                | SqlArg::Byte(_)
                | SqlArg::Short(_)
                | SqlArg::Int(_)
                | SqlArg::Long(_)
                | SqlArg::Float(_)
                | SqlArg::Double(_)
                | SqlArg::Decimal(_)
        )
    }
}

/// Literal text of the argument, without quoting. Used for DDL default values.
impl Display for SqlArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlArg::Null => f.write_str("NULL"),
            SqlArg::Bool(true) => f.write_str("TRUE"),
            SqlArg::Bool(false) => f.write_str("FALSE"),
            SqlArg::Char(v) => write!(f, "{v}"),
            SqlArg::Byte(v) => write!(f, "{v}"),
            SqlArg::Short(v) => write!(f, "{v}"),
            SqlArg::Int(v) => write!(f, "{v}"),
            SqlArg::Long(v) => write!(f, "{v}"),
            SqlArg::Float(v) => write!(f, "{v}"),
            SqlArg::Double(v) => write!(f, "{v}"),
            SqlArg::String(v) => f.write_str(v),
            SqlArg::Bytes(v) => {
                for byte in v {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            SqlArg::Decimal(v) => write!(f, "{v}"),
            SqlArg::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.f")),
            SqlArg::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            SqlArg::Time(v) => write!(f, "{}", v.format("%H:%M:%S%.f")),
            SqlArg::TimeTz(time, offset) => write!(f, "{}{offset}", time.format("%H:%M:%S%.f")),
            SqlArg::TimestampTz(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.f%:z")),
            SqlArg::Uuid(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! sql_arg_from {
    ($($typ:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$typ> for SqlArg {
                fn from(v: $typ) -> Self {
                    SqlArg::$variant(v)
                }
            }
        )*
    };
}

sql_arg_from!(
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
    BigDecimal => Decimal,
    Uuid => Uuid,
);

impl From<&str> for SqlArg {
    fn from(v: &str) -> Self {
        SqlArg::String(v.to_string())
    }
}

/// The category of column type a persister asks the dialect for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlType {
    String,
    LongString,
    Date,
    Boolean,
    Char,
    Byte,
    ByteArray,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Serializable,
    BigDecimal,
    Uuid,
    LocalDate,
    LocalTime,
    LocalDateTime,
    OffsetTime,
    OffsetDateTime,
}

impl SqlType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SqlType::Byte
                | SqlType::Short
                | SqlType::Integer
                | SqlType::Long
                | SqlType::Float
                | SqlType::Double
                | SqlType::BigDecimal
        )
    }
}
