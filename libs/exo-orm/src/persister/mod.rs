// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Conversions between in-memory [`Value`]s and the [`SqlArg`]s handed to the driver.
//!
//! Each semantic data kind is a variant of the closed [`DataKind`] enum. A kind is picked once
//! when a [`FieldDescriptor`](crate::FieldDescriptor) is resolved against a dialect, and every
//! conversion afterwards is a `match` on it, so adding a kind forces every conversion to handle it.
//!
//! Conversions must round-trip: `from_sql_argument(to_sql_argument(v)) == v` for every value the
//! kind can represent.

mod blob_type;
mod boolean_type;
mod date_type;
mod enum_type;
mod numeric_type;
mod registry;
mod string_type;
mod temporal_type;
mod uuid_type;

pub use date_type::{DEFAULT_DATE_STRING_FORMAT, NO_MILLIS_DATE_STRING_FORMAT, date_string_format};
pub use enum_type::{EnumConstant, EnumLookup, EnumType};
pub use registry::PersisterRegistry;

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orm_error::OrmError;
use crate::result_row::ResultRow;
use crate::sql_arg::{SqlArg, SqlType};
use crate::value::Value;

/// The semantic kind of a mapped field, independent of any one database's column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataKind {
    String,
    LongString,
    /// A string stored as UTF-8 bytes
    StringBytes,
    Char,
    Boolean,
    /// A boolean stored as one of two characters (`'1'`/`'0'` unless the field's format says otherwise)
    BooleanChar,
    /// A boolean stored as the integer 1 or 0
    BooleanInteger,
    /// A date stored as a timestamp column
    Date,
    /// A date stored as epoch milliseconds
    DateLong,
    /// A date stored as epoch seconds
    DateInteger,
    /// A date stored as formatted text
    DateString,
    Byte,
    ByteArray,
    Short,
    Integer,
    Long,
    Float,
    Double,
    /// An arbitrary precision integer stored as text
    BigInteger,
    /// An arbitrary precision decimal stored as text
    BigDecimal,
    /// An arbitrary precision decimal stored in a numeric column
    BigDecimalNumeric,
    /// A UUID stored as text
    Uuid,
    /// A UUID stored in the database's native UUID column
    UuidNative,
    EnumName,
    EnumToString,
    EnumInteger,
    /// A serialized value stored as a blob
    Serializable,
    Currency,
    LocalDate,
    LocalTime,
    LocalDateTime,
    OffsetTime,
    OffsetDateTime,
}

/// Failure while converting a single value. [`FieldDescriptor`](crate::FieldDescriptor) turns
/// these into [`OrmError`]s naming the column.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("invalid default value '{value}': {reason}")]
    InvalidDefaultValue { value: String, reason: String },

    #[error("expected {expected}, got {value}")]
    TypeMismatch { expected: String, value: String },

    #[error("{0}")]
    SerializationFailure(String),

    #[error("{0}")]
    Cursor(#[from] Box<OrmError>),
}

impl ConversionError {
    pub(crate) fn mismatch(expected: impl Into<String>, value: &impl Display) -> Self {
        ConversionError::TypeMismatch {
            expected: expected.into(),
            value: value.to_string(),
        }
    }

    pub(crate) fn bad_default(value: &str, reason: impl Display) -> Self {
        ConversionError::InvalidDefaultValue {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Lift into an [`OrmError`] for the given column
    pub(crate) fn for_column(self, column: &str) -> OrmError {
        match self {
            ConversionError::InvalidDefaultValue { value, reason } => {
                OrmError::InvalidDefaultValue {
                    column: column.to_string(),
                    value,
                    reason,
                }
            }
            ConversionError::TypeMismatch { expected, value } => OrmError::TypeMismatch {
                column: column.to_string(),
                expected,
                value,
            },
            ConversionError::SerializationFailure(reason) => OrmError::SerializationFailure {
                column: column.to_string(),
                reason,
            },
            ConversionError::Cursor(error) => *error,
        }
    }
}

impl From<OrmError> for ConversionError {
    fn from(error: OrmError) -> Self {
        ConversionError::Cursor(Box::new(error))
    }
}

pub(crate) type ConversionResult<T> = Result<T, ConversionError>;

/// Per-field settings some kinds need: the date/boolean format and the enum lookup table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersisterContext<'a> {
    pub format: Option<&'a str>,
    pub enum_lookup: Option<&'a EnumLookup>,
}

impl DataKind {
    pub const ALL: [DataKind; 33] = [
        DataKind::String,
        DataKind::LongString,
        DataKind::StringBytes,
        DataKind::Char,
        DataKind::Boolean,
        DataKind::BooleanChar,
        DataKind::BooleanInteger,
        DataKind::Date,
        DataKind::DateLong,
        DataKind::DateInteger,
        DataKind::DateString,
        DataKind::Byte,
        DataKind::ByteArray,
        DataKind::Short,
        DataKind::Integer,
        DataKind::Long,
        DataKind::Float,
        DataKind::Double,
        DataKind::BigInteger,
        DataKind::BigDecimal,
        DataKind::BigDecimalNumeric,
        DataKind::Uuid,
        DataKind::UuidNative,
        DataKind::EnumName,
        DataKind::EnumToString,
        DataKind::EnumInteger,
        DataKind::Serializable,
        DataKind::Currency,
        DataKind::LocalDate,
        DataKind::LocalTime,
        DataKind::LocalDateTime,
        DataKind::OffsetTime,
        DataKind::OffsetDateTime,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DataKind::String => "STRING",
            DataKind::LongString => "LONG_STRING",
            DataKind::StringBytes => "STRING_BYTES",
            DataKind::Char => "CHAR",
            DataKind::Boolean => "BOOLEAN",
            DataKind::BooleanChar => "BOOLEAN_CHAR",
            DataKind::BooleanInteger => "BOOLEAN_INTEGER",
            DataKind::Date => "DATE",
            DataKind::DateLong => "DATE_LONG",
            DataKind::DateInteger => "DATE_INTEGER",
            DataKind::DateString => "DATE_STRING",
            DataKind::Byte => "BYTE",
            DataKind::ByteArray => "BYTE_ARRAY",
            DataKind::Short => "SHORT",
            DataKind::Integer => "INTEGER",
            DataKind::Long => "LONG",
            DataKind::Float => "FLOAT",
            DataKind::Double => "DOUBLE",
            DataKind::BigInteger => "BIG_INTEGER",
            DataKind::BigDecimal => "BIG_DECIMAL",
            DataKind::BigDecimalNumeric => "BIG_DECIMAL_NUMERIC",
            DataKind::Uuid => "UUID",
            DataKind::UuidNative => "UUID_NATIVE",
            DataKind::EnumName => "ENUM_NAME",
            DataKind::EnumToString => "ENUM_TO_STRING",
            DataKind::EnumInteger => "ENUM_INTEGER",
            DataKind::Serializable => "SERIALIZABLE",
            DataKind::Currency => "CURRENCY",
            DataKind::LocalDate => "LOCAL_DATE",
            DataKind::LocalTime => "LOCAL_TIME",
            DataKind::LocalDateTime => "LOCAL_DATE_TIME",
            DataKind::OffsetTime => "OFFSET_TIME",
            DataKind::OffsetDateTime => "OFFSET_DATE_TIME",
        }
    }

    /// The column type category the dialect is asked for
    pub fn sql_type(&self) -> SqlType {
        match self {
            DataKind::String
            | DataKind::DateString
            | DataKind::BigInteger
            | DataKind::BigDecimal
            | DataKind::Uuid
            | DataKind::EnumName
            | DataKind::EnumToString
            | DataKind::Currency => SqlType::String,
            DataKind::LongString => SqlType::LongString,
            DataKind::StringBytes | DataKind::ByteArray => SqlType::ByteArray,
            DataKind::Char | DataKind::BooleanChar => SqlType::Char,
            DataKind::Boolean => SqlType::Boolean,
            DataKind::BooleanInteger | DataKind::Integer | DataKind::DateInteger => {
                SqlType::Integer
            }
            DataKind::EnumInteger => SqlType::Integer,
            DataKind::Date => SqlType::Date,
            DataKind::DateLong | DataKind::Long => SqlType::Long,
            DataKind::Byte => SqlType::Byte,
            DataKind::Short => SqlType::Short,
            DataKind::Float => SqlType::Float,
            DataKind::Double => SqlType::Double,
            DataKind::BigDecimalNumeric => SqlType::BigDecimal,
            DataKind::UuidNative => SqlType::Uuid,
            DataKind::Serializable => SqlType::Serializable,
            DataKind::LocalDate => SqlType::LocalDate,
            DataKind::LocalTime => SqlType::LocalTime,
            DataKind::LocalDateTime => SqlType::LocalDateTime,
            DataKind::OffsetTime => SqlType::OffsetTime,
            DataKind::OffsetDateTime => SqlType::OffsetDateTime,
        }
    }

    /// Numeric kinds compare and default as numbers (unquoted literals)
    pub fn is_numeric(&self) -> bool {
        self.sql_type().is_numeric()
    }

    /// Whether a literal of this kind must be quoted in SQL text
    pub fn is_string_escaped(&self) -> bool {
        !self.is_numeric() && self.sql_type() != SqlType::Boolean
    }

    /// Kinds whose typed read does not tolerate `NULL`: the caller checks for null first
    pub fn is_stream_like(&self) -> bool {
        matches!(
            self,
            DataKind::Byte
                | DataKind::ByteArray
                | DataKind::StringBytes
                | DataKind::Serializable
                | DataKind::EnumName
                | DataKind::EnumToString
                | DataKind::EnumInteger
        )
    }

    /// Kinds read through a getter that reports `NULL` as a zero value
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            DataKind::Boolean
                | DataKind::BooleanChar
                | DataKind::BooleanInteger
                | DataKind::Char
                | DataKind::Byte
                | DataKind::Short
                | DataKind::Integer
                | DataKind::Long
                | DataKind::Float
                | DataKind::Double
                | DataKind::DateLong
                | DataKind::DateInteger
                | DataKind::EnumInteger
        )
    }

    pub fn is_valid_generated_id(&self) -> bool {
        matches!(
            self,
            DataKind::Short
                | DataKind::Integer
                | DataKind::Long
                | DataKind::Uuid
                | DataKind::UuidNative
        )
    }

    /// Generated ids of these kinds are created in memory rather than by the database
    pub fn is_self_generated_id(&self) -> bool {
        matches!(self, DataKind::Uuid | DataKind::UuidNative)
    }

    pub fn is_comparable(&self) -> bool {
        !matches!(
            self,
            DataKind::ByteArray | DataKind::StringBytes | DataKind::Serializable
        )
    }

    pub fn is_enum(&self) -> bool {
        matches!(
            self,
            DataKind::EnumName | DataKind::EnumToString | DataKind::EnumInteger
        )
    }

    /// Create a new id for a self-generated id kind
    pub fn generate_id(&self) -> Option<Value> {
        match self {
            DataKind::Uuid | DataKind::UuidNative => Some(uuid_type::generate_id()),
            _ => None,
        }
    }

    /// Check a field's format setting; `Err` carries a description of the problem.
    pub fn validate_format(&self, format: Option<&str>) -> Result<(), String> {
        match (self, format) {
            (_, None) => Ok(()),
            (DataKind::BooleanChar, Some(format)) => boolean_type::validate_format(format),
            (DataKind::Date | DataKind::DateString, Some(format)) => {
                date_type::validate_format(format)
            }
            (DataKind::StringBytes, Some(format)) => string_type::validate_charset(format),
            (kind, Some(format)) => Err(format!(
                "format '{format}' is not applicable to {} fields",
                kind.name()
            )),
        }
    }

    /// Convert a textual default (from the schema configuration) into a value
    pub fn parse_default(&self, context: &PersisterContext, text: &str) -> ConversionResult<Value> {
        match self {
            DataKind::String
            | DataKind::LongString
            | DataKind::StringBytes
            | DataKind::Char
            | DataKind::Currency => string_type::parse_default(*self, text),
            DataKind::Boolean | DataKind::BooleanChar | DataKind::BooleanInteger => {
                boolean_type::parse_default(*self, context, text)
            }
            DataKind::Date | DataKind::DateLong | DataKind::DateInteger | DataKind::DateString => {
                date_type::parse_default(*self, context, text)
            }
            DataKind::Byte
            | DataKind::Short
            | DataKind::Integer
            | DataKind::Long
            | DataKind::Float
            | DataKind::Double
            | DataKind::BigInteger
            | DataKind::BigDecimal
            | DataKind::BigDecimalNumeric => numeric_type::parse_default(*self, text),
            DataKind::Uuid | DataKind::UuidNative => uuid_type::parse_default(text),
            DataKind::EnumName | DataKind::EnumToString | DataKind::EnumInteger => {
                enum_type::parse_default(*self, context, text)
            }
            DataKind::ByteArray | DataKind::Serializable => blob_type::parse_default(*self, text),
            DataKind::LocalDate
            | DataKind::LocalTime
            | DataKind::LocalDateTime
            | DataKind::OffsetTime
            | DataKind::OffsetDateTime => temporal_type::parse_default(*self, text),
        }
    }

    /// Convert an in-memory value into the argument handed to the driver
    pub fn to_sql_argument(
        &self,
        context: &PersisterContext,
        value: &Value,
    ) -> ConversionResult<SqlArg> {
        if value.is_null() {
            return Ok(SqlArg::Null);
        }

        match self {
            DataKind::String
            | DataKind::LongString
            | DataKind::StringBytes
            | DataKind::Char
            | DataKind::Currency => string_type::to_sql_argument(*self, value),
            DataKind::Boolean | DataKind::BooleanChar | DataKind::BooleanInteger => {
                boolean_type::to_sql_argument(*self, context, value)
            }
            DataKind::Date | DataKind::DateLong | DataKind::DateInteger | DataKind::DateString => {
                date_type::to_sql_argument(*self, context, value)
            }
            DataKind::Byte
            | DataKind::Short
            | DataKind::Integer
            | DataKind::Long
            | DataKind::Float
            | DataKind::Double
            | DataKind::BigInteger
            | DataKind::BigDecimal
            | DataKind::BigDecimalNumeric => numeric_type::to_sql_argument(*self, value),
            DataKind::Uuid | DataKind::UuidNative => uuid_type::to_sql_argument(*self, value),
            DataKind::EnumName | DataKind::EnumToString | DataKind::EnumInteger => {
                enum_type::to_sql_argument(*self, context, value)
            }
            DataKind::ByteArray | DataKind::Serializable => {
                blob_type::to_sql_argument(*self, value)
            }
            DataKind::LocalDate
            | DataKind::LocalTime
            | DataKind::LocalDateTime
            | DataKind::OffsetTime
            | DataKind::OffsetDateTime => temporal_type::to_sql_argument(*self, value),
        }
    }

    /// Convert an argument (as bound, or as read from a result) back into an in-memory value
    pub fn from_sql_argument(
        &self,
        context: &PersisterContext,
        arg: &SqlArg,
    ) -> ConversionResult<Value> {
        if arg.is_null() {
            return Ok(Value::Null);
        }

        match self {
            DataKind::String
            | DataKind::LongString
            | DataKind::StringBytes
            | DataKind::Char
            | DataKind::Currency => string_type::from_sql_argument(*self, arg),
            DataKind::Boolean | DataKind::BooleanChar | DataKind::BooleanInteger => {
                boolean_type::from_sql_argument(*self, context, arg)
            }
            DataKind::Date | DataKind::DateLong | DataKind::DateInteger | DataKind::DateString => {
                date_type::from_sql_argument(*self, context, arg)
            }
            DataKind::Byte
            | DataKind::Short
            | DataKind::Integer
            | DataKind::Long
            | DataKind::Float
            | DataKind::Double
            | DataKind::BigInteger
            | DataKind::BigDecimal
            | DataKind::BigDecimalNumeric => numeric_type::from_sql_argument(*self, arg),
            DataKind::Uuid | DataKind::UuidNative => uuid_type::from_sql_argument(*self, arg),
            DataKind::EnumName | DataKind::EnumToString | DataKind::EnumInteger => {
                enum_type::from_sql_argument(*self, context, arg)
            }
            DataKind::ByteArray | DataKind::Serializable => {
                blob_type::from_sql_argument(*self, arg)
            }
            DataKind::LocalDate
            | DataKind::LocalTime
            | DataKind::LocalDateTime
            | DataKind::OffsetTime
            | DataKind::OffsetDateTime => temporal_type::from_sql_argument(*self, arg),
        }
    }

    /// Read the column at `column` of the current row.
    ///
    /// Stream-like kinds are null-checked before the typed read, primitive kinds after it (their
    /// getters report `NULL` as zero).
    pub fn from_sql_result(
        &self,
        context: &PersisterContext,
        row: &dyn ResultRow,
        column: usize,
    ) -> ConversionResult<Value> {
        if self.is_stream_like() && row.is_null(column)? {
            return Ok(Value::Null);
        }

        let arg = self.read_result(row, column)?;

        if self.is_primitive() && row.is_null(column)? {
            return Ok(Value::Null);
        }

        self.from_sql_argument(context, &arg)
    }

    /// The typed read for this kind's wire representation
    fn read_result(&self, row: &dyn ResultRow, column: usize) -> Result<SqlArg, OrmError> {
        fn or_null<T>(value: Option<T>, f: impl FnOnce(T) -> SqlArg) -> SqlArg {
            value.map(f).unwrap_or(SqlArg::Null)
        }

        Ok(match self {
            DataKind::String
            | DataKind::LongString
            | DataKind::DateString
            | DataKind::BigInteger
            | DataKind::BigDecimal
            | DataKind::Uuid
            | DataKind::EnumName
            | DataKind::EnumToString
            | DataKind::Currency => or_null(row.get_string(column)?, SqlArg::String),
            DataKind::StringBytes | DataKind::ByteArray | DataKind::Serializable => {
                or_null(row.get_bytes(column)?, SqlArg::Bytes)
            }
            DataKind::Char | DataKind::BooleanChar => SqlArg::Char(row.get_char(column)?),
            DataKind::Boolean => SqlArg::Bool(row.get_bool(column)?),
            DataKind::BooleanInteger
            | DataKind::Integer
            | DataKind::DateInteger
            | DataKind::EnumInteger => SqlArg::Int(row.get_int(column)?),
            DataKind::Byte => SqlArg::Byte(row.get_byte(column)?),
            DataKind::Short => SqlArg::Short(row.get_short(column)?),
            DataKind::Long | DataKind::DateLong => SqlArg::Long(row.get_long(column)?),
            DataKind::Float => SqlArg::Float(row.get_float(column)?),
            DataKind::Double => SqlArg::Double(row.get_double(column)?),
            DataKind::BigDecimalNumeric => or_null(row.get_decimal(column)?, SqlArg::Decimal),
            DataKind::Date | DataKind::LocalDateTime => {
                or_null(row.get_timestamp(column)?, SqlArg::Timestamp)
            }
            DataKind::UuidNative => or_null(row.get_uuid(column)?, SqlArg::Uuid),
            DataKind::LocalDate => or_null(row.get_date(column)?, SqlArg::Date),
            DataKind::LocalTime => or_null(row.get_time(column)?, SqlArg::Time),
            DataKind::OffsetTime => or_null(row.get_time_tz(column)?, |(time, offset)| {
                SqlArg::TimeTz(time, offset)
            }),
            DataKind::OffsetDateTime => or_null(row.get_timestamp_tz(column)?, SqlArg::TimestampTz),
        })
    }
}

impl FromStr for DataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        DataKind::ALL
            .iter()
            .find(|kind| kind.name() == upper)
            .copied()
            .ok_or_else(|| format!("unknown data kind {s}"))
    }
}

impl Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SubsecRound, Utc};
    use pg_bigdecimal::BigDecimal;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::testing::MemoryRow;

    #[test]
    fn names_round_trip() {
        for kind in DataKind::ALL {
            assert_eq!(kind.name().parse::<DataKind>().unwrap(), kind);
        }
        assert_eq!(
            "boolean_integer".parse::<DataKind>().unwrap(),
            DataKind::BooleanInteger
        );
        assert!("QUATERNION".parse::<DataKind>().is_err());
    }

    #[test]
    fn escaping_follows_numeric_kinds() {
        assert!(!DataKind::Integer.is_string_escaped());
        assert!(!DataKind::BigDecimalNumeric.is_string_escaped());
        assert!(!DataKind::Boolean.is_string_escaped());
        assert!(!DataKind::BooleanInteger.is_string_escaped());
        assert!(DataKind::BooleanChar.is_string_escaped());
        assert!(DataKind::BigDecimal.is_string_escaped());
        assert!(DataKind::Date.is_string_escaped());
    }

    #[test]
    fn null_passes_through() {
        let context = PersisterContext::default();
        for kind in DataKind::ALL {
            assert_eq!(
                kind.to_sql_argument(&context, &Value::Null).unwrap(),
                SqlArg::Null
            );
            assert_eq!(
                kind.from_sql_argument(&context, &SqlArg::Null).unwrap(),
                Value::Null
            );
        }
    }

    #[test]
    fn stream_like_checks_null_before_read() {
        // The cursor fails a byte read on NULL, so only the up-front null check keeps this working
        let row = MemoryRow::new(vec![("b", SqlArg::Null)]);
        let context = PersisterContext::default();

        assert!(row.get_byte(0).is_err());
        assert_eq!(
            DataKind::Byte.from_sql_result(&context, &row, 0).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn primitive_reads_detect_null_afterwards() {
        let row = MemoryRow::new(vec![("i", SqlArg::Null), ("j", SqlArg::Int(0))]);
        let context = PersisterContext::default();

        assert_eq!(
            DataKind::Integer.from_sql_result(&context, &row, 0).unwrap(),
            Value::Null
        );
        assert_eq!(
            DataKind::Integer.from_sql_result(&context, &row, 1).unwrap(),
            Value::Int(0)
        );
    }

    #[test]
    fn reference_reads() {
        let row = MemoryRow::new(vec![
            ("s", SqlArg::String("hello".into())),
            ("n", SqlArg::Null),
        ]);
        let context = PersisterContext::default();

        assert_eq!(
            DataKind::String.from_sql_result(&context, &row, 0).unwrap(),
            Value::String("hello".into())
        );
        assert_eq!(
            DataKind::LongString
                .from_sql_result(&context, &row, 1)
                .unwrap(),
            Value::Null
        );
    }

    #[test]
    fn only_integral_and_uuid_kinds_generate_ids() {
        let generated: Vec<_> = DataKind::ALL
            .into_iter()
            .filter(|kind| kind.is_valid_generated_id())
            .collect();
        assert_eq!(
            generated,
            vec![
                DataKind::Short,
                DataKind::Integer,
                DataKind::Long,
                DataKind::Uuid,
                DataKind::UuidNative
            ]
        );
        assert!(DataKind::Uuid.generate_id().is_some());
        assert!(DataKind::Long.generate_id().is_none());
    }

    fn big(text: &str) -> BigDecimal {
        text.parse().unwrap()
    }

    /// Values every kind must carry through a write and a read unchanged
    fn samples(kind: DataKind, colors: &EnumLookup) -> Vec<Value> {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        let now = Utc::now();

        match kind {
            DataKind::String | DataKind::LongString | DataKind::StringBytes => vec![
                Value::String(String::new()),
                Value::String("plain".into()),
                Value::String("Zoë ✓ 日本語".into()),
            ],
            DataKind::Char => vec![Value::Char('a'), Value::Char('é'), Value::Char('✓')],
            DataKind::Boolean | DataKind::BooleanChar | DataKind::BooleanInteger => {
                vec![Value::Bool(true), Value::Bool(false)]
            }
            DataKind::Date | DataKind::DateLong | DataKind::DateString => {
                vec![epoch.into(), now.into()]
            }
            // Stored as whole seconds
            DataKind::DateInteger => vec![epoch.into(), now.trunc_subsecs(0).into()],
            DataKind::Byte => vec![Value::Byte(i8::MIN), Value::Byte(0), Value::Byte(i8::MAX)],
            DataKind::Short => vec![Value::Short(i16::MIN), Value::Short(i16::MAX)],
            DataKind::Integer => vec![Value::Int(i32::MIN), Value::Int(i32::MAX)],
            DataKind::Long => vec![Value::Long(i64::MIN), Value::Long(i64::MAX)],
            DataKind::Float => vec![
                Value::Float(f32::MIN),
                Value::Float(-0.5),
                Value::Float(f32::MAX),
            ],
            DataKind::Double => vec![
                Value::Double(f64::MIN),
                Value::Double(0.1),
                Value::Double(f64::MAX),
            ],
            DataKind::BigInteger => vec![
                Value::BigInteger(big("-123456789012345678901234567890")),
                Value::BigInteger(big("0")),
            ],
            DataKind::BigDecimal | DataKind::BigDecimalNumeric => vec![
                Value::BigDecimal(big("-98765432109876543210.0123456789")),
                Value::BigDecimal(big("0.5")),
            ],
            DataKind::Uuid | DataKind::UuidNative => {
                vec![Value::Uuid(Uuid::nil()), Value::Uuid(Uuid::new_v4())]
            }
            DataKind::EnumName | DataKind::EnumToString | DataKind::EnumInteger => colors
                .enum_type()
                .constants
                .iter()
                .map(|constant| Value::Enum(constant.name.clone()))
                .collect(),
            DataKind::ByteArray => vec![
                Value::Bytes(Vec::new()),
                Value::Bytes(vec![0x00, 0xff, 0x7f, 0x80]),
            ],
            DataKind::Serializable => vec![
                Value::Json(json!([])),
                Value::Json(json!({"name": "Zoë", "tags": [1, 2.5, null]})),
            ],
            DataKind::Currency => vec![Value::Currency("EUR".into())],
            DataKind::LocalDate => vec![
                Value::LocalDate(NaiveDate::MIN),
                Value::LocalDate(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
            ],
            DataKind::LocalTime => vec![
                Value::LocalTime(NaiveTime::MIN),
                Value::LocalTime(NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap()),
            ],
            DataKind::LocalDateTime => vec![Value::LocalDateTime(epoch.naive_utc())],
            DataKind::OffsetTime => vec![Value::OffsetTime(
                NaiveTime::from_hms_opt(5, 6, 7).unwrap(),
                FixedOffset::west_opt(9 * 3600 + 1800).unwrap(),
            )],
            DataKind::OffsetDateTime => vec![Value::OffsetDateTime(
                DateTime::parse_from_rfc3339("2021-03-04T05:06:07.5+05:30").unwrap(),
            )],
        }
    }

    #[test]
    fn every_kind_round_trips() {
        let colors = EnumLookup::new(
            &EnumType::new("Color", &["RED", "GREEN", "BLUE"]).with_display("GREEN", "green-ish"),
            None,
        )
        .unwrap();
        let context = PersisterContext {
            enum_lookup: Some(&colors),
            ..Default::default()
        };

        for kind in DataKind::ALL {
            for value in samples(kind, &colors) {
                let arg = kind
                    .to_sql_argument(&context, &value)
                    .unwrap_or_else(|e| panic!("{kind} could not write {value}: {e}"));
                let read = kind
                    .from_sql_argument(&context, &arg)
                    .unwrap_or_else(|e| panic!("{kind} could not read {arg}: {e}"));
                assert_eq!(read, value, "{kind} changed {value} stored as {arg}");
            }
        }
    }
}
