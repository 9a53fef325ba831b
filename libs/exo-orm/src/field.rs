// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::orm_error::OrmError;
use crate::persister::{DataKind, EnumLookup, EnumType, PersisterContext, PersisterRegistry};
use crate::result_row::ResultRow;
use crate::sql_arg::SqlArg;
use crate::value::Value;

/// How (and whether) a column identifies its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdRole {
    #[default]
    None,
    /// The caller supplies the id
    PlainId,
    /// The database assigns the id using the dialect's generated-id strategy
    GeneratedId,
    /// The database assigns the id from a named sequence
    GeneratedIdViaSequence,
}

/// The column a foreign-key column refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignTarget {
    pub table: String,
    pub column: String,
}

/// Metadata of one mapped column along with the data kind used to convert its values.
///
/// Descriptors are created by the schema layer and are immutable once they are part of a
/// [`TableInfo`](crate::TableInfo). The only interior state is the enum lookup table, which is
/// computed on first use.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    column_name: String,
    declared_kind: DataKind,
    data_kind: DataKind,
    width: Option<usize>,
    nullable: bool,
    default_value: Option<String>,
    id_role: IdRole,
    sequence_name: Option<String>,
    foreign_target: Option<ForeignTarget>,
    unique: bool,
    indexed: bool,
    format: Option<String>,
    enum_type: Option<EnumType>,
    unknown_enum_name: Option<String>,
    enum_lookup: OnceLock<Result<EnumLookup, String>>,
}

impl FieldDescriptor {
    pub fn new(column_name: impl Into<String>, data_kind: DataKind) -> Self {
        Self {
            column_name: column_name.into(),
            declared_kind: data_kind,
            data_kind,
            width: None,
            nullable: true,
            default_value: None,
            id_role: IdRole::None,
            sequence_name: None,
            foreign_target: None,
            unique: false,
            indexed: false,
            format: None,
            enum_type: None,
            unknown_enum_name: None,
            enum_lookup: OnceLock::new(),
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn id(mut self) -> Self {
        self.id_role = IdRole::PlainId;
        self
    }

    pub fn generated_id(mut self) -> Self {
        self.id_role = IdRole::GeneratedId;
        self
    }

    pub fn generated_id_sequence(mut self, sequence_name: Option<&str>) -> Self {
        self.id_role = IdRole::GeneratedIdViaSequence;
        self.sequence_name = sequence_name.map(str::to_string);
        self
    }

    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.foreign_target = Some(ForeignTarget {
            table: table.into(),
            column: column.into(),
        });
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_enum(mut self, enum_type: EnumType) -> Self {
        self.enum_type = Some(enum_type);
        self
    }

    /// The constant used when a stored enum value matches none of the constants
    pub fn with_unknown_enum_name(mut self, name: impl Into<String>) -> Self {
        self.unknown_enum_name = Some(name.into());
        self
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// The kind used for conversions, after the dialect's overrides
    pub fn data_kind(&self) -> DataKind {
        self.data_kind
    }

    /// The kind the schema declared; column types are chosen from this one
    pub fn declared_kind(&self) -> DataKind {
        self.declared_kind
    }

    pub fn width(&self) -> Option<usize> {
        self.width
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn id_role(&self) -> IdRole {
        self.id_role
    }

    pub fn is_id(&self) -> bool {
        self.id_role != IdRole::None
    }

    pub fn is_generated_id(&self) -> bool {
        matches!(
            self.id_role,
            IdRole::GeneratedId | IdRole::GeneratedIdViaSequence
        )
    }

    pub fn sequence_name(&self) -> Option<&str> {
        self.sequence_name.as_deref()
    }

    pub fn foreign_target(&self) -> Option<&ForeignTarget> {
        self.foreign_target.as_ref()
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn unknown_enum_name(&self) -> Option<&str> {
        self.unknown_enum_name.as_deref()
    }

    /// Apply the dialect's persister overrides
    pub(crate) fn resolve(mut self, registry: &PersisterRegistry) -> Self {
        self.data_kind = registry.resolve(self.declared_kind);
        self
    }

    /// Check the descriptor for inconsistencies that can be detected without a dialect
    pub(crate) fn validate(&self) -> Result<(), OrmError> {
        let column = self.column_name.as_str();

        if column.is_empty() {
            return Err(OrmError::invalid_field(column, "column name is empty"));
        }

        self.data_kind
            .validate_format(self.format())
            .map_err(|message| OrmError::invalid_field(column, message))?;

        if self.data_kind.is_enum() && self.enum_type.is_none() {
            return Err(OrmError::invalid_field(
                column,
                format!("{} fields need an enum type", self.data_kind),
            ));
        }
        if !self.data_kind.is_enum() && self.unknown_enum_name.is_some() {
            return Err(OrmError::invalid_field(
                column,
                "unknown enum name set on a non-enum field",
            ));
        }

        if self.is_generated_id() {
            if !self.data_kind.is_valid_generated_id() {
                return Err(OrmError::invalid_field(
                    column,
                    format!("{} can't be a generated id", self.data_kind),
                ));
            }
            if self.default_value.is_some() {
                return Err(OrmError::invalid_field(
                    column,
                    "generated id columns can't have a default value",
                ));
            }
        }

        if self.is_id() && self.foreign_target.is_some() {
            return Err(OrmError::invalid_field(
                column,
                "an id column can't also be a foreign key",
            ));
        }

        if self.id_role == IdRole::GeneratedIdViaSequence && self.data_kind.is_self_generated_id() {
            return Err(OrmError::invalid_field(
                column,
                format!("{} ids are generated in memory, not by a sequence", self.data_kind),
            ));
        }

        if self.sequence_name.is_some() && self.id_role != IdRole::GeneratedIdViaSequence {
            return Err(OrmError::invalid_field(
                column,
                "sequence name set on a column without a sequence id",
            ));
        }

        // Parse the default eagerly so a bad one fails at mapping time
        self.parse_default()?;

        Ok(())
    }

    pub(crate) fn context(&self) -> Result<PersisterContext<'_>, OrmError> {
        let enum_lookup = match &self.enum_type {
            Some(enum_type) => {
                let lookup = self
                    .enum_lookup
                    .get_or_init(|| EnumLookup::new(enum_type, self.unknown_enum_name()));
                match lookup {
                    Ok(lookup) => Some(lookup),
                    Err(message) => return Err(OrmError::invalid_field(&self.column_name, message)),
                }
            }
            None => None,
        };

        Ok(PersisterContext {
            format: self.format(),
            enum_lookup,
        })
    }

    /// The parsed default, if one is configured
    pub fn parse_default(&self) -> Result<Option<Value>, OrmError> {
        let Some(text) = self.default_value() else {
            return Ok(None);
        };

        self.data_kind
            .parse_default(&self.context()?, text)
            .map(Some)
            .map_err(|e| e.for_column(&self.column_name))
    }

    pub fn to_sql_argument(&self, value: &Value) -> Result<SqlArg, OrmError> {
        self.data_kind
            .to_sql_argument(&self.context()?, value)
            .map_err(|e| e.for_column(&self.column_name))
    }

    pub fn from_sql_argument(&self, arg: &SqlArg) -> Result<Value, OrmError> {
        self.data_kind
            .from_sql_argument(&self.context()?, arg)
            .map_err(|e| e.for_column(&self.column_name))
    }

    pub fn from_sql_result(&self, row: &dyn ResultRow, column: usize) -> Result<Value, OrmError> {
        self.data_kind
            .from_sql_result(&self.context()?, row, column)
            .map_err(|e| e.for_column(&self.column_name))
    }

    /// Bring a comparison operand into this column's value form. Text compared against a
    /// non-text column is parsed the same way a default would be.
    pub(crate) fn coerce_operand(&self, value: Value) -> Result<Value, OrmError> {
        match value {
            Value::String(text) if !self.holds_text() => self
                .data_kind
                .parse_default(&self.context()?, &text)
                .map_err(|_| OrmError::TypeMismatch {
                    column: self.column_name.clone(),
                    expected: format!("{} value", self.data_kind),
                    value: format!("'{text}'"),
                }),
            value => Ok(value),
        }
    }

    fn holds_text(&self) -> bool {
        matches!(
            self.data_kind,
            DataKind::String
                | DataKind::LongString
                | DataKind::StringBytes
                | DataKind::Uuid
                | DataKind::UuidNative
                | DataKind::Currency
                | DataKind::EnumName
                | DataKind::EnumToString
                | DataKind::EnumInteger
        )
    }
}

/// Two descriptors are equal if their configuration is; the enum lookup cache is ignored
impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.column_name == other.column_name
            && self.declared_kind == other.declared_kind
            && self.data_kind == other.data_kind
            && self.width == other.width
            && self.nullable == other.nullable
            && self.default_value == other.default_value
            && self.id_role == other.id_role
            && self.sequence_name == other.sequence_name
            && self.foreign_target == other.foreign_target
            && self.unique == other.unique
            && self.indexed == other.indexed
            && self.format == other.format
            && self.enum_type == other.enum_type
            && self.unknown_enum_name == other.unknown_enum_name
    }
}
