// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use super::{ConversionError, ConversionResult, DataKind};
use crate::sql_arg::SqlArg;
use crate::value::Value;

const TIME_FORMAT: &str = "%H:%M:%S%.f";

fn parse_offset_time(text: &str) -> Option<(NaiveTime, FixedOffset)> {
    if let Some(time) = text.strip_suffix('Z') {
        let time = NaiveTime::parse_from_str(time, TIME_FORMAT).ok()?;
        return Some((time, FixedOffset::east_opt(0)?));
    }

    // The offset starts at the last sign; times themselves carry no sign
    let split = text.rfind(['+', '-'])?;
    let (time, offset) = text.split_at(split);
    let time = NaiveTime::parse_from_str(time, TIME_FORMAT).ok()?;
    let offset = offset.parse::<FixedOffset>().ok()?;
    Some((time, offset))
}

fn parse_local_date_time(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

pub(super) fn parse_default(kind: DataKind, text: &str) -> ConversionResult<Value> {
    let text = text.trim();
    let parsed = match kind {
        DataKind::LocalDate => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .map(Value::LocalDate),
        DataKind::LocalTime => NaiveTime::parse_from_str(text, TIME_FORMAT)
            .ok()
            .map(Value::LocalTime),
        DataKind::LocalDateTime => parse_local_date_time(text).map(Value::LocalDateTime),
        DataKind::OffsetTime => {
            parse_offset_time(text).map(|(time, offset)| Value::OffsetTime(time, offset))
        }
        _ => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(Value::OffsetDateTime),
    };

    parsed.ok_or_else(|| ConversionError::bad_default(text, format!("not a valid {kind} value")))
}

pub(super) fn to_sql_argument(kind: DataKind, value: &Value) -> ConversionResult<SqlArg> {
    match (kind, value) {
        (DataKind::LocalDate, Value::LocalDate(v)) => Ok(SqlArg::Date(*v)),
        (DataKind::LocalTime, Value::LocalTime(v)) => Ok(SqlArg::Time(*v)),
        (DataKind::LocalDateTime, Value::LocalDateTime(v)) => Ok(SqlArg::Timestamp(*v)),
        (DataKind::OffsetTime, Value::OffsetTime(time, offset)) => {
            Ok(SqlArg::TimeTz(*time, *offset))
        }
        (DataKind::OffsetDateTime, Value::OffsetDateTime(v)) => Ok(SqlArg::TimestampTz(*v)),
        _ => Err(ConversionError::mismatch(format!("{kind} value"), value)),
    }
}

pub(super) fn from_sql_argument(kind: DataKind, arg: &SqlArg) -> ConversionResult<Value> {
    match (kind, arg) {
        (DataKind::LocalDate, SqlArg::Date(v)) => Ok(Value::LocalDate(*v)),
        (DataKind::LocalTime, SqlArg::Time(v)) => Ok(Value::LocalTime(*v)),
        (DataKind::LocalDateTime, SqlArg::Timestamp(v)) => Ok(Value::LocalDateTime(*v)),
        (DataKind::OffsetTime, SqlArg::TimeTz(time, offset)) => {
            Ok(Value::OffsetTime(*time, *offset))
        }
        (DataKind::OffsetDateTime, SqlArg::TimestampTz(v)) => Ok(Value::OffsetDateTime(*v)),
        _ => Err(ConversionError::mismatch(
            format!("{kind} column value"),
            arg,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persister::PersisterContext;

    #[test]
    fn offset_time_defaults() {
        let context = PersisterContext::default();
        assert_eq!(
            DataKind::OffsetTime
                .parse_default(&context, "10:15:30+01:00")
                .unwrap(),
            Value::OffsetTime(
                NaiveTime::from_hms_opt(10, 15, 30).unwrap(),
                FixedOffset::east_opt(3600).unwrap()
            )
        );
        assert_eq!(
            DataKind::OffsetTime
                .parse_default(&context, "10:15:30Z")
                .unwrap(),
            Value::OffsetTime(
                NaiveTime::from_hms_opt(10, 15, 30).unwrap(),
                FixedOffset::east_opt(0).unwrap()
            )
        );
        assert!(DataKind::OffsetTime.parse_default(&context, "10:15:30").is_err());
    }

    #[test]
    fn local_kinds() {
        let context = PersisterContext::default();
        let date_time = DataKind::LocalDateTime
            .parse_default(&context, "2020-01-02T03:04:05")
            .unwrap();
        let arg = DataKind::LocalDateTime
            .to_sql_argument(&context, &date_time)
            .unwrap();
        assert!(matches!(arg, SqlArg::Timestamp(_)));
        assert_eq!(
            DataKind::LocalDateTime
                .from_sql_argument(&context, &arg)
                .unwrap(),
            date_time
        );

        assert!(matches!(
            DataKind::LocalDate.to_sql_argument(&context, &date_time),
            Err(ConversionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn offset_date_time() {
        let context = PersisterContext::default();
        let value = DataKind::OffsetDateTime
            .parse_default(&context, "2020-01-02T03:04:05-05:00")
            .unwrap();
        let arg = DataKind::OffsetDateTime
            .to_sql_argument(&context, &value)
            .unwrap();
        assert_eq!(
            DataKind::OffsetDateTime
                .from_sql_argument(&context, &arg)
                .unwrap(),
            value
        );
    }
}
