// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Per-database strategy tables.
//!
//! A [`DatabaseDialect`] is plain data: every decision the statement builders delegate to the
//! database (quoting, column types, id generation, paging) is a field or a small function over
//! those fields. Dialects are built once, usually through a [`DialectRegistry`], and shared
//! read-only afterwards.

mod db2;
mod derby;
mod generic;
mod h2;
mod hsqldb;
mod mysql;
mod netezza;
mod oracle;
mod postgres;
mod registry;
mod sqlite;
mod sqlserver;

pub use registry::DialectRegistry;

use crate::field::{FieldDescriptor, IdRole};
use crate::orm_error::OrmError;
use crate::persister::PersisterRegistry;
use crate::sql::SqlBuilder;
use crate::sql_arg::SqlType;

/// Where the row limit goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStyle {
    /// `... LIMIT n` at the end of the statement
    Suffix,
    /// `SELECT LIMIT n ...`
    AfterSelect,
    /// `SELECT TOP n ...`
    Top,
    /// No SQL syntax; the driver truncates the result to the maximum row count
    MaxRows,
}

/// How an offset is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetStyle {
    /// `OFFSET n` after the limit
    Suffix,
    /// Part of the limit clause: `LIMIT o,n` as a suffix, `LIMIT o n` after `SELECT`
    InLimit,
    Unsupported,
}

/// How the database assigns generated (non-sequence) ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedIdStrategy {
    /// A keyword in the column definition, such as `AUTO_INCREMENT`
    Inline {
        clause: &'static str,
        /// Emit `PRIMARY KEY` before the clause rather than after it
        primary_key_first: bool,
        /// Column type the clause only works with
        forced_type: Option<&'static str>,
    },
    /// Generated ids are backed by a sequence named after the table and column
    Sequence,
    Unsupported,
}

/// Sequence statement templates; `{seq}` is replaced by the quoted sequence name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceSyntax {
    pub create: &'static str,
    pub drop: &'static str,
    /// Column default drawing from the sequence, for databases that support one
    pub column_default: Option<&'static str>,
    /// The query that fetches the next value before an insert
    pub next_value: &'static str,
}

/// Column type keyword per type category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTypeNames {
    pub string: &'static str,
    pub long_string: &'static str,
    pub date: &'static str,
    pub boolean: &'static str,
    pub char: &'static str,
    pub byte: &'static str,
    pub byte_array: &'static str,
    pub short: &'static str,
    pub integer: &'static str,
    pub long: &'static str,
    pub float: &'static str,
    pub double: &'static str,
    pub serializable: &'static str,
    pub big_decimal: &'static str,
    pub uuid: &'static str,
    pub local_date: &'static str,
    pub local_time: &'static str,
    pub local_date_time: &'static str,
    pub offset_time: &'static str,
    pub offset_date_time: &'static str,
}

/// How the id of a new row comes to be, as seen by the execution layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdStrategy {
    /// The caller supplies the id
    Plain,
    /// The id is created in memory before the insert
    SelfGenerated,
    /// The database assigns the id; it is read back as a generated key after the insert
    Inline,
    /// The id is fetched from the sequence before the insert
    Sequence { name: String },
}

#[derive(Debug, Clone)]
pub struct DatabaseDialect {
    pub name: &'static str,
    /// Keys matched against the second segment of a database url
    pub url_keys: &'static [&'static str],
    /// Opening and closing quote for identifiers
    pub entity_quote: (char, char),
    pub literal_quote: char,
    pub limit_style: LimitStyle,
    pub offset_style: OffsetStyle,
    pub offset_requires_limit: bool,
    pub varchar_width_supported: bool,
    /// Width of string columns declared without one
    pub default_string_width: usize,
    pub generated_id: GeneratedIdStrategy,
    pub sequence: Option<SequenceSyntax>,
    /// Generated names (sequences, indexes) are upper-cased
    pub entity_names_upper_case: bool,
    pub create_table_suffix: Option<&'static str>,
    pub create_if_not_exists_supported: bool,
    pub drop_if_exists_supported: bool,
    /// What follows `INSERT INTO table` when a row has no explicit columns
    pub insert_no_columns: &'static str,
    pub column_types: ColumnTypeNames,
    pub persisters: PersisterRegistry,
    /// Trace bound argument values along with statements
    pub log_arguments: bool,
}

impl DatabaseDialect {
    pub fn sequence_supported(&self) -> bool {
        self.sequence.is_some()
    }

    pub fn limit_after_select(&self) -> bool {
        matches!(self.limit_style, LimitStyle::AfterSelect | LimitStyle::Top)
    }

    pub fn quote_identifier(&self, name: &str) -> String {
        let (open, close) = self.entity_quote;
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(open);
        for c in name.chars() {
            if c == close {
                quoted.push(close);
            }
            quoted.push(c);
        }
        quoted.push(close);
        quoted
    }

    pub fn quote_literal(&self, text: &str) -> String {
        let quote = self.literal_quote;
        let mut quoted = String::with_capacity(text.len() + 2);
        quoted.push(quote);
        for c in text.chars() {
            if c == quote {
                quoted.push(quote);
            }
            quoted.push(c);
        }
        quoted.push(quote);
        quoted
    }

    /// Column type for a field, chosen by the kind the schema declared
    pub fn column_type(&self, field: &FieldDescriptor) -> String {
        let names = &self.column_types;
        match field.declared_kind().sql_type() {
            SqlType::String if self.varchar_width_supported => format!(
                "{}({})",
                names.string,
                field.width().unwrap_or(self.default_string_width)
            ),
            SqlType::String => names.string.to_string(),
            SqlType::LongString => names.long_string.to_string(),
            SqlType::Date => names.date.to_string(),
            SqlType::Boolean => names.boolean.to_string(),
            SqlType::Char => names.char.to_string(),
            SqlType::Byte => names.byte.to_string(),
            SqlType::ByteArray => names.byte_array.to_string(),
            SqlType::Short => names.short.to_string(),
            SqlType::Integer => names.integer.to_string(),
            SqlType::Long => names.long.to_string(),
            SqlType::Float => names.float.to_string(),
            SqlType::Double => names.double.to_string(),
            SqlType::Serializable => names.serializable.to_string(),
            SqlType::BigDecimal => names.big_decimal.to_string(),
            SqlType::Uuid => names.uuid.to_string(),
            SqlType::LocalDate => names.local_date.to_string(),
            SqlType::LocalTime => names.local_time.to_string(),
            SqlType::LocalDateTime => names.local_date_time.to_string(),
            SqlType::OffsetTime => names.offset_time.to_string(),
            SqlType::OffsetDateTime => names.offset_date_time.to_string(),
        }
    }

    /// Name of the sequence backing a generated id that didn't name one
    pub fn sequence_name(&self, table: &str, column: &str) -> String {
        self.entity_name(format!("{table}_{column}_seq"))
    }

    pub(crate) fn entity_name(&self, name: String) -> String {
        if self.entity_names_upper_case {
            name.to_uppercase()
        } else {
            name
        }
    }

    /// Decide the id strategy of `field`. Sequence ids take precedence over generated ids, which
    /// take precedence over plain ids. Returns `None` for non-id fields.
    pub fn id_strategy(
        &self,
        table: &str,
        field: &FieldDescriptor,
    ) -> Result<Option<IdStrategy>, OrmError> {
        let sequence_for = |name: Option<&str>| -> Result<IdStrategy, OrmError> {
            if !self.sequence_supported() {
                return Err(OrmError::unsupported(
                    self.name,
                    format!("sequence ids (column {})", field.column_name()),
                ));
            }
            Ok(IdStrategy::Sequence {
                name: name
                    .map(str::to_string)
                    .unwrap_or_else(|| self.sequence_name(table, field.column_name())),
            })
        };

        match field.id_role() {
            IdRole::None => Ok(None),
            IdRole::GeneratedIdViaSequence => sequence_for(field.sequence_name()).map(Some),
            IdRole::GeneratedId if field.data_kind().is_self_generated_id() => {
                Ok(Some(IdStrategy::SelfGenerated))
            }
            IdRole::GeneratedId => match self.generated_id {
                GeneratedIdStrategy::Inline { .. } => Ok(Some(IdStrategy::Inline)),
                GeneratedIdStrategy::Sequence => sequence_for(None).map(Some),
                GeneratedIdStrategy::Unsupported => Err(OrmError::unsupported(
                    self.name,
                    format!("generated ids (column {})", field.column_name()),
                )),
            },
            IdRole::PlainId => Ok(Some(IdStrategy::Plain)),
        }
    }

    fn sequence_syntax(&self) -> Result<&SequenceSyntax, OrmError> {
        self.sequence
            .as_ref()
            .ok_or_else(|| OrmError::unsupported(self.name, "sequences"))
    }

    fn sequence_template(&self, template: &str, name: &str) -> String {
        template.replace("{seq}", &self.quote_identifier(name))
    }

    pub fn create_sequence_sql(&self, name: &str) -> Result<String, OrmError> {
        let syntax = self.sequence_syntax()?;
        Ok(self.sequence_template(syntax.create, name))
    }

    pub fn drop_sequence_sql(&self, name: &str) -> Result<String, OrmError> {
        let syntax = self.sequence_syntax()?;
        Ok(self.sequence_template(syntax.drop, name))
    }

    /// The query run before an insert to obtain the id from the sequence
    pub fn next_sequence_value_sql(&self, name: &str) -> Result<String, OrmError> {
        let syntax = self.sequence_syntax()?;
        Ok(self.sequence_template(syntax.next_value, name))
    }

    pub(crate) fn sequence_column_default(&self, name: &str) -> Option<String> {
        self.sequence
            .as_ref()
            .and_then(|syntax| syntax.column_default)
            .map(|template| self.sequence_template(template, name))
    }

    /// The field's default as a SQL literal. Numeric and boolean defaults are emitted as is,
    /// everything else is quoted.
    pub fn default_literal(&self, field: &FieldDescriptor) -> Result<Option<String>, OrmError> {
        let Some(value) = field.parse_default()? else {
            return Ok(None);
        };

        let arg = field.to_sql_argument(&value)?;
        let literal = if arg.is_null() {
            arg.to_string()
        } else if field.data_kind().is_string_escaped() {
            self.quote_literal(&arg.to_string())
        } else {
            arg.to_string()
        };
        Ok(Some(literal))
    }

    pub(crate) fn check_paging(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<(), OrmError> {
        if offset.is_none() {
            return Ok(());
        }
        if self.offset_style == OffsetStyle::Unsupported {
            return Err(OrmError::unsupported(self.name, "offsets"));
        }
        if limit.is_none() && self.offset_requires_limit {
            return Err(OrmError::unsupported(self.name, "offsets without a limit"));
        }
        Ok(())
    }

    /// Paging that goes right after `SELECT `
    pub(crate) fn build_paging_prefix(
        &self,
        builder: &mut SqlBuilder,
        limit: Option<u64>,
        offset: Option<u64>,
    ) {
        let Some(limit) = limit else {
            return;
        };

        match self.limit_style {
            LimitStyle::AfterSelect => {
                builder.push_str("LIMIT ");
                if let (OffsetStyle::InLimit, Some(offset)) = (self.offset_style, offset) {
                    builder.push_str(offset.to_string());
                    builder.push_space();
                }
                builder.push_str(limit.to_string());
                builder.push_space();
            }
            LimitStyle::Top => {
                builder.push_str("TOP ");
                builder.push_str(limit.to_string());
                builder.push_space();
            }
            LimitStyle::Suffix | LimitStyle::MaxRows => {}
        }
    }

    /// Paging at the end of the statement
    pub(crate) fn build_paging_suffix(
        &self,
        builder: &mut SqlBuilder,
        limit: Option<u64>,
        offset: Option<u64>,
    ) {
        if let (LimitStyle::Suffix, Some(limit)) = (self.limit_style, limit) {
            builder.push_str("LIMIT ");
            if let (OffsetStyle::InLimit, Some(offset)) = (self.offset_style, offset) {
                builder.push_str(offset.to_string());
                builder.push(',');
            }
            builder.push_str(limit.to_string());
            builder.push_space();
        }

        if let (OffsetStyle::Suffix, Some(offset)) = (self.offset_style, offset) {
            builder.push_str("OFFSET ");
            builder.push_str(offset.to_string());
            builder.push_space();
        }
    }

    /// Rows the driver should truncate the result to
    pub(crate) fn max_rows(&self, limit: Option<u64>) -> Option<u64> {
        match self.limit_style {
            LimitStyle::MaxRows => limit,
            _ => None,
        }
    }
}

impl Default for DatabaseDialect {
    fn default() -> Self {
        Self::generic()
    }
}
