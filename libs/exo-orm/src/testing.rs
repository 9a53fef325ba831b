// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! An in-memory [`ResultRow`] for exercising row mapping without a database.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use pg_bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::orm_error::OrmError;
use crate::result_row::ResultRow;
use crate::sql_arg::SqlArg;

/// One row of named columns. Behaves like a strict driver cursor: reads must match the stored
/// variant, primitive reads of `NULL` return zero, and a byte read of `NULL` fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryRow {
    columns: Vec<(String, SqlArg)>,
}

impl MemoryRow {
    pub fn new<'a>(columns: impl IntoIterator<Item = (&'a str, SqlArg)>) -> Self {
        Self {
            columns: columns
                .into_iter()
                .map(|(name, arg)| (name.to_string(), arg))
                .collect(),
        }
    }

    fn arg(&self, column: usize) -> Result<&SqlArg, OrmError> {
        self.columns
            .get(column)
            .map(|(_, arg)| arg)
            .ok_or_else(|| OrmError::UnknownColumn {
                table: "<row>".to_string(),
                column: column.to_string(),
            })
    }

    fn mismatch(&self, column: usize, expected: &str, arg: &SqlArg) -> OrmError {
        OrmError::TypeMismatch {
            column: self
                .columns
                .get(column)
                .map(|(name, _)| name.clone())
                .unwrap_or_else(|| column.to_string()),
            expected: expected.to_string(),
            value: format!("{arg:?}"),
        }
    }
}

macro_rules! primitive_getter {
    ($name:ident, $typ:ty, $variant:ident, $zero:expr) => {
        fn $name(&self, column: usize) -> Result<$typ, OrmError> {
            match self.arg(column)? {
                SqlArg::$variant(v) => Ok(*v),
                SqlArg::Null => Ok($zero),
                other => Err(self.mismatch(column, stringify!($variant), other)),
            }
        }
    };
}

macro_rules! reference_getter {
    ($name:ident, $typ:ty, $variant:ident) => {
        fn $name(&self, column: usize) -> Result<Option<$typ>, OrmError> {
            match self.arg(column)? {
                SqlArg::$variant(v) => Ok(Some(v.clone())),
                SqlArg::Null => Ok(None),
                other => Err(self.mismatch(column, stringify!($variant), other)),
            }
        }
    };
}

impl ResultRow for MemoryRow {
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|(column, _)| column == name)
    }

    fn is_null(&self, column: usize) -> Result<bool, OrmError> {
        self.arg(column).map(SqlArg::is_null)
    }

    fn get_byte(&self, column: usize) -> Result<i8, OrmError> {
        match self.arg(column)? {
            SqlArg::Byte(v) => Ok(*v),
            other => Err(self.mismatch(column, "Byte", other)),
        }
    }

    primitive_getter!(get_bool, bool, Bool, false);
    primitive_getter!(get_char, char, Char, '\0');
    primitive_getter!(get_short, i16, Short, 0);
    primitive_getter!(get_int, i32, Int, 0);
    primitive_getter!(get_long, i64, Long, 0);
    primitive_getter!(get_float, f32, Float, 0.0);
    primitive_getter!(get_double, f64, Double, 0.0);

    reference_getter!(get_string, String, String);
    reference_getter!(get_bytes, Vec<u8>, Bytes);
    reference_getter!(get_decimal, BigDecimal, Decimal);
    reference_getter!(get_timestamp, NaiveDateTime, Timestamp);
    reference_getter!(get_date, NaiveDate, Date);
    reference_getter!(get_time, NaiveTime, Time);
    reference_getter!(get_timestamp_tz, DateTime<FixedOffset>, TimestampTz);
    reference_getter!(get_uuid, Uuid, Uuid);

    fn get_time_tz(&self, column: usize) -> Result<Option<(NaiveTime, FixedOffset)>, OrmError> {
        match self.arg(column)? {
            SqlArg::TimeTz(time, offset) => Ok(Some((*time, *offset))),
            SqlArg::Null => Ok(None),
            other => Err(self.mismatch(column, "TimeTz", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads() {
        let row = MemoryRow::new(vec![
            ("a", SqlArg::Int(4)),
            ("b", SqlArg::Null),
            ("c", SqlArg::String("x".into())),
        ]);

        assert_eq!(row.column_count(), 3);
        assert_eq!(row.column_index("c"), Some(2));
        assert_eq!(row.column_index("d"), None);

        assert_eq!(row.get_int(0).unwrap(), 4);
        assert_eq!(row.get_long(1).unwrap(), 0);
        assert!(row.is_null(1).unwrap());
        assert_eq!(row.get_string(1).unwrap(), None);
        assert_eq!(row.get_string(2).unwrap(), Some("x".to_string()));

        assert!(matches!(
            row.get_long(0),
            Err(OrmError::TypeMismatch { ref column, .. }) if column == "a"
        ));
        assert!(row.get_byte(1).is_err());
        assert!(matches!(row.get_int(7), Err(OrmError::UnknownColumn { .. })));
    }
}
