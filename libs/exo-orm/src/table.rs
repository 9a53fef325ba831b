// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dialect::DatabaseDialect;
use crate::field::{FieldDescriptor, ForeignTarget, IdRole};
use crate::orm_error::OrmError;
use crate::persister::{DataKind, EnumType};

/// The mapped columns of one table, resolved against a dialect.
#[derive(Debug, Clone)]
pub struct TableInfo {
    name: String,
    fields: Vec<Arc<FieldDescriptor>>,
    id_index: usize,
}

impl TableInfo {
    /// Resolve `fields` against the dialect's persister overrides and validate them. The table
    /// must have exactly one id column.
    pub fn new(
        dialect: &DatabaseDialect,
        name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self, OrmError> {
        let name = name.into();

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(fields.len());
        for field in fields {
            let field = field.resolve(&dialect.persisters);
            field.validate()?;
            if !seen.insert(field.column_name().to_string()) {
                return Err(OrmError::invalid_field(
                    field.column_name(),
                    format!("column declared twice in table {name}"),
                ));
            }
            resolved.push(Arc::new(field));
        }

        let id_columns: Vec<usize> = resolved
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_id())
            .map(|(index, _)| index)
            .collect();

        let id_index = match id_columns.as_slice() {
            [index] => *index,
            [] => {
                return Err(OrmError::invalid_field(
                    &name,
                    "table has no id column",
                ));
            }
            _ => {
                return Err(OrmError::invalid_field(
                    &name,
                    format!("table has {} id columns", id_columns.len()),
                ));
            }
        };

        Ok(Self {
            name,
            fields: resolved,
            id_index,
        })
    }

    pub fn from_config(dialect: &DatabaseDialect, config: TableConfig) -> Result<Self, OrmError> {
        let fields = config.fields.into_iter().map(FieldDescriptor::from).collect();
        Self::new(dialect, config.name, fields)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Arc<FieldDescriptor>] {
        &self.fields
    }

    pub fn id_field(&self) -> &Arc<FieldDescriptor> {
        &self.fields[self.id_index]
    }

    pub fn field(&self, column_name: &str) -> Option<&Arc<FieldDescriptor>> {
        self.fields.iter().find(|f| f.column_name() == column_name)
    }

    /// Like [`TableInfo::field`], but failing with [`OrmError::UnknownColumn`]
    pub fn field_or_err(&self, column_name: &str) -> Result<&Arc<FieldDescriptor>, OrmError> {
        self.field(column_name)
            .ok_or_else(|| OrmError::UnknownColumn {
                table: self.name.clone(),
                column: column_name.to_string(),
            })
    }
}

/// Table description as handed over by the schema layer (typically as JSON)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub column: String,
    pub kind: DataKind,
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub id_role: IdRole,
    #[serde(default)]
    pub sequence_name: Option<String>,
    #[serde(default)]
    pub references: Option<ForeignTarget>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub index: bool,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub enum_type: Option<EnumType>,
    #[serde(default)]
    pub unknown_enum_name: Option<String>,
}

fn default_nullable() -> bool {
    true
}

impl From<FieldConfig> for FieldDescriptor {
    fn from(config: FieldConfig) -> Self {
        let mut field = FieldDescriptor::new(config.column, config.kind);

        if let Some(width) = config.width {
            field = field.with_width(width);
        }
        if !config.nullable {
            field = field.not_null();
        }
        if let Some(default_value) = config.default_value {
            field = field.with_default(default_value);
        }
        field = match config.id_role {
            IdRole::None => field,
            IdRole::PlainId => field.id(),
            IdRole::GeneratedId => field.generated_id(),
            IdRole::GeneratedIdViaSequence => {
                field.generated_id_sequence(config.sequence_name.as_deref())
            }
        };
        if let Some(target) = config.references {
            field = field.references(target.table, target.column);
        }
        if config.unique {
            field = field.unique();
        }
        if config.index {
            field = field.indexed();
        }
        if let Some(format) = config.format {
            field = field.with_format(format);
        }
        if let Some(enum_type) = config.enum_type {
            field = field.with_enum(enum_type);
        }
        if let Some(name) = config.unknown_enum_name {
            field = field.with_unknown_enum_name(name);
        }

        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialect() -> DatabaseDialect {
        DatabaseDialect::generic()
    }

    #[test]
    fn exactly_one_id() {
        let none = TableInfo::new(
            &dialect(),
            "foo",
            vec![FieldDescriptor::new("val", DataKind::String)],
        );
        assert!(matches!(none, Err(OrmError::InvalidFieldConfig { .. })));

        let two = TableInfo::new(
            &dialect(),
            "foo",
            vec![
                FieldDescriptor::new("id", DataKind::Long).id(),
                FieldDescriptor::new("other", DataKind::Long).generated_id(),
            ],
        );
        assert!(matches!(two, Err(OrmError::InvalidFieldConfig { .. })));

        let table = TableInfo::new(
            &dialect(),
            "foo",
            vec![
                FieldDescriptor::new("id", DataKind::Long).generated_id(),
                FieldDescriptor::new("val", DataKind::String),
            ],
        )
        .unwrap();
        assert_eq!(table.id_field().column_name(), "id");
    }

    #[test]
    fn duplicate_columns() {
        let table = TableInfo::new(
            &dialect(),
            "foo",
            vec![
                FieldDescriptor::new("id", DataKind::Long).id(),
                FieldDescriptor::new("id", DataKind::String),
            ],
        );
        assert!(matches!(table, Err(OrmError::InvalidFieldConfig { .. })));
    }

    #[test]
    fn unknown_columns() {
        let table = TableInfo::new(
            &dialect(),
            "foo",
            vec![FieldDescriptor::new("id", DataKind::Long).id()],
        )
        .unwrap();

        assert!(matches!(
            table.field_or_err("nope"),
            Err(OrmError::UnknownColumn { ref table, ref column }) if table == "foo" && column == "nope"
        ));
    }

    #[test]
    fn from_json_config() {
        let config: TableConfig = serde_json::from_str(
            r#"{
                "name": "accounts",
                "fields": [
                    { "column": "id", "kind": "LONG", "id_role": "GENERATED_ID" },
                    { "column": "name", "kind": "STRING", "width": 100, "nullable": false, "unique": true },
                    { "column": "active", "kind": "BOOLEAN", "default_value": "true" },
                    { "column": "owner_id", "kind": "LONG", "references": { "table": "users", "column": "id" } },
                    {
                        "column": "status",
                        "kind": "ENUM_NAME",
                        "enum_type": { "name": "Status", "constants": [{ "name": "OPEN" }, { "name": "CLOSED" }] },
                        "unknown_enum_name": "OPEN"
                    }
                ]
            }"#,
        )
        .unwrap();

        let table = TableInfo::from_config(&dialect(), config).unwrap();

        assert_eq!(table.name(), "accounts");
        assert_eq!(table.fields().len(), 5);
        assert_eq!(table.id_field().id_role(), IdRole::GeneratedId);

        let name = table.field("name").unwrap();
        assert_eq!(name.width(), Some(100));
        assert!(!name.is_nullable());
        assert!(name.is_unique());

        let owner = table.field("owner_id").unwrap();
        assert_eq!(owner.foreign_target().unwrap().table, "users");

        assert_eq!(table.field("status").unwrap().unknown_enum_name(), Some("OPEN"));
    }
}
