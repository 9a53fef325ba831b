// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::{ConversionError, ConversionResult, DataKind, PersisterContext};
use crate::sql_arg::SqlArg;
use crate::value::Value;

/// Format of `DateString` columns (and of date defaults) unless the field overrides it
pub const DEFAULT_DATE_STRING_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Fallback for values written without fractional seconds
pub const NO_MILLIS_DATE_STRING_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The format used to parse `text`.
///
/// Only the default format falls back to the no-millis variant, and only when the text has no
/// fractional part; a custom format is always used as given.
pub fn date_string_format<'a>(format: Option<&'a str>, text: &str) -> &'a str {
    match format {
        None | Some(DEFAULT_DATE_STRING_FORMAT) if !text.contains('.') => {
            NO_MILLIS_DATE_STRING_FORMAT
        }
        Some(format) => format,
        None => DEFAULT_DATE_STRING_FORMAT,
    }
}

pub(super) fn validate_format(format: &str) -> Result<(), String> {
    let sample = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| "invalid sample date".to_string())?;

    let rendered = sample.format(format).to_string();
    match parse_date_string(Some(format), &rendered) {
        Some(_) => Ok(()),
        None => Err(format!("date format '{format}' can't be parsed back")),
    }
}

fn parse_date_string(format: Option<&str>, text: &str) -> Option<DateTime<Utc>> {
    let format = date_string_format(format, text);

    NaiveDateTime::parse_from_str(text, format)
        .or_else(|_| {
            NaiveDate::parse_from_str(text, format)
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .ok()
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

fn format_date(context: &PersisterContext, date: &DateTime<Utc>) -> String {
    date.naive_utc()
        .format(context.format.unwrap_or(DEFAULT_DATE_STRING_FORMAT))
        .to_string()
}

pub(super) fn parse_default(
    kind: DataKind,
    context: &PersisterContext,
    text: &str,
) -> ConversionResult<Value> {
    let parsed = match kind {
        DataKind::DateLong => text
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis),
        DataKind::DateInteger => text
            .trim()
            .parse::<i32>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs as i64, 0)),
        _ => parse_date_string(context.format, text),
    };

    parsed
        .map(Value::date)
        .ok_or_else(|| ConversionError::bad_default(text, format!("not a valid {kind} value")))
}

pub(super) fn to_sql_argument(
    kind: DataKind,
    context: &PersisterContext,
    value: &Value,
) -> ConversionResult<SqlArg> {
    let Value::Date(date) = value else {
        return Err(ConversionError::mismatch("date", value));
    };

    match kind {
        DataKind::DateLong => Ok(SqlArg::Long(date.timestamp_millis())),
        DataKind::DateInteger => i32::try_from(date.timestamp())
            .map(SqlArg::Int)
            .map_err(|_| ConversionError::mismatch("a date within the 32-bit epoch range", value)),
        DataKind::DateString => Ok(SqlArg::String(format_date(context, date))),
        _ => Ok(SqlArg::Timestamp(date.naive_utc())),
    }
}

pub(super) fn from_sql_argument(
    kind: DataKind,
    context: &PersisterContext,
    arg: &SqlArg,
) -> ConversionResult<Value> {
    let date = match (kind, arg) {
        (DataKind::Date, SqlArg::Timestamp(ts)) => {
            Some(DateTime::<Utc>::from_naive_utc_and_offset(*ts, Utc))
        }
        (DataKind::DateLong, SqlArg::Long(millis)) => DateTime::from_timestamp_millis(*millis),
        (DataKind::DateInteger, SqlArg::Int(secs)) => DateTime::from_timestamp(*secs as i64, 0),
        (DataKind::DateString, SqlArg::String(text)) => parse_date_string(context.format, text),
        _ => None,
    };

    date.map(Value::date)
        .ok_or_else(|| ConversionError::mismatch(format!("{kind} column value"), arg))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap() + chrono::Duration::milliseconds(890)
    }

    #[test]
    fn default_format_falls_back_without_fraction() {
        assert_eq!(
            date_string_format(None, "2021-03-04 05:06:07"),
            NO_MILLIS_DATE_STRING_FORMAT
        );
        assert_eq!(
            date_string_format(Some(DEFAULT_DATE_STRING_FORMAT), "2021-03-04 05:06:07"),
            NO_MILLIS_DATE_STRING_FORMAT
        );
        assert_eq!(
            date_string_format(None, "2021-03-04 05:06:07.000890"),
            DEFAULT_DATE_STRING_FORMAT
        );
        assert_eq!(date_string_format(Some("%d/%m/%Y"), "04/03/2021"), "%d/%m/%Y");
    }

    #[test]
    fn date_string_round_trip() {
        let context = PersisterContext::default();
        let value = Value::Date(sample());

        let arg = DataKind::DateString
            .to_sql_argument(&context, &value)
            .unwrap();
        assert_eq!(arg, SqlArg::String("2021-03-04 05:06:07.890000".into()));
        assert_eq!(
            DataKind::DateString
                .from_sql_argument(&context, &arg)
                .unwrap(),
            value
        );
    }

    #[test]
    fn custom_format_has_no_fallback() {
        let context = PersisterContext {
            format: Some("%Y/%m/%d %H:%M:%S%.3f"),
            ..Default::default()
        };
        assert!(
            DataKind::DateString
                .from_sql_argument(&context, &SqlArg::String("2021/03/04 05:06:07.123".into()))
                .is_ok()
        );
        assert!(
            DataKind::DateString
                .parse_default(&context, "2021-03-04 05:06:07")
                .is_err()
        );
    }

    #[test]
    fn epoch_kinds() {
        let context = PersisterContext::default();
        let value = Value::Date(sample());

        let millis = DataKind::DateLong
            .to_sql_argument(&context, &value)
            .unwrap();
        assert_eq!(millis, SqlArg::Long(sample().timestamp_millis()));
        assert_eq!(
            DataKind::DateLong
                .from_sql_argument(&context, &millis)
                .unwrap(),
            value
        );

        let secs = DataKind::DateInteger
            .to_sql_argument(&context, &value)
            .unwrap();
        assert_eq!(secs, SqlArg::Int(sample().timestamp() as i32));
        assert_eq!(
            DataKind::DateInteger.parse_default(&context, "0").unwrap(),
            Value::Date(DateTime::from_timestamp(0, 0).unwrap())
        );
    }

    #[test]
    fn date_defaults() {
        let context = PersisterContext::default();
        assert_eq!(
            DataKind::Date
                .parse_default(&context, "2021-03-04 05:06:07")
                .unwrap(),
            Value::Date(Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap())
        );
        assert!(matches!(
            DataKind::Date.parse_default(&context, "yesterday"),
            Err(ConversionError::InvalidDefaultValue { .. })
        ));
        assert!(matches!(
            DataKind::DateLong.parse_default(&context, "soon"),
            Err(ConversionError::InvalidDefaultValue { .. })
        ));
    }

    #[test]
    fn now_round_trips() {
        let context = PersisterContext::default();
        let now: Value = Utc::now().into();

        for kind in [DataKind::Date, DataKind::DateLong, DataKind::DateString] {
            let arg = kind.to_sql_argument(&context, &now).unwrap();
            assert_eq!(kind.from_sql_argument(&context, &arg).unwrap(), now, "{kind}");
        }
    }

    #[test]
    fn stored_precision_is_truncated_on_read() {
        let context = PersisterContext::default();
        let value = DataKind::DateString
            .from_sql_argument(&context, &SqlArg::String("2021-03-04 05:06:07.890123".into()))
            .unwrap();
        assert_eq!(value, Value::Date(sample()));
    }

    #[test]
    fn formats_are_validated() {
        assert!(validate_format("%Y-%m-%d").is_ok());
        assert!(validate_format("%H:%M").is_err());
    }
}
