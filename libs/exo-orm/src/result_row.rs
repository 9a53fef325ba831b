// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use pg_bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::orm_error::OrmError;

/// A positional cursor over the current row of a result set, implemented by the execution layer.
///
/// Getters for primitive types return a zero value for SQL `NULL` (callers that care check
/// [`ResultRow::is_null`] afterwards), except where the underlying driver refuses the read. In
/// particular `get_byte` may fail on `NULL`; persisters flagged as stream-like therefore check for
/// null *before* calling the typed getter. Getters for reference types return `None` for `NULL`.
pub trait ResultRow {
    fn column_count(&self) -> usize;

    fn column_index(&self, name: &str) -> Option<usize>;

    fn is_null(&self, column: usize) -> Result<bool, OrmError>;

    fn get_bool(&self, column: usize) -> Result<bool, OrmError>;
    fn get_char(&self, column: usize) -> Result<char, OrmError>;
    fn get_byte(&self, column: usize) -> Result<i8, OrmError>;
    fn get_short(&self, column: usize) -> Result<i16, OrmError>;
    fn get_int(&self, column: usize) -> Result<i32, OrmError>;
    fn get_long(&self, column: usize) -> Result<i64, OrmError>;
    fn get_float(&self, column: usize) -> Result<f32, OrmError>;
    fn get_double(&self, column: usize) -> Result<f64, OrmError>;

    fn get_string(&self, column: usize) -> Result<Option<String>, OrmError>;
    fn get_bytes(&self, column: usize) -> Result<Option<Vec<u8>>, OrmError>;
    fn get_decimal(&self, column: usize) -> Result<Option<BigDecimal>, OrmError>;
    fn get_timestamp(&self, column: usize) -> Result<Option<NaiveDateTime>, OrmError>;
    fn get_date(&self, column: usize) -> Result<Option<NaiveDate>, OrmError>;
    fn get_time(&self, column: usize) -> Result<Option<NaiveTime>, OrmError>;
    fn get_time_tz(&self, column: usize) -> Result<Option<(NaiveTime, FixedOffset)>, OrmError>;
    fn get_timestamp_tz(&self, column: usize) -> Result<Option<DateTime<FixedOffset>>, OrmError>;
    fn get_uuid(&self, column: usize) -> Result<Option<Uuid>, OrmError>;
}
