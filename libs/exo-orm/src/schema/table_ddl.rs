// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! CREATE TABLE and DROP TABLE for mapped tables.

use tracing::{debug, instrument};

use super::statement::SchemaStatement;
use crate::dialect::{DatabaseDialect, GeneratedIdStrategy, IdStrategy};
use crate::field::FieldDescriptor;
use crate::orm_error::OrmError;
use crate::table::TableInfo;

/// The column definition of `field`. Sequences it needs are added to `pre_statements`.
fn column_definition(
    dialect: &DatabaseDialect,
    table: &TableInfo,
    field: &FieldDescriptor,
    pre_statements: &mut Vec<String>,
) -> Result<String, OrmError> {
    let id_strategy = dialect.id_strategy(table.name(), field)?;

    let column_type = match (&id_strategy, dialect.generated_id) {
        (
            Some(IdStrategy::Inline),
            GeneratedIdStrategy::Inline {
                forced_type: Some(forced_type),
                ..
            },
        ) => forced_type.to_string(),
        _ => dialect.column_type(field),
    };

    let mut definition = format!(
        "{} {column_type}",
        dialect.quote_identifier(field.column_name())
    );

    match id_strategy {
        None => {}
        Some(IdStrategy::Plain | IdStrategy::SelfGenerated) => {
            definition.push_str(" PRIMARY KEY");
        }
        Some(IdStrategy::Inline) => match dialect.generated_id {
            GeneratedIdStrategy::Inline {
                clause,
                primary_key_first: true,
                ..
            } => {
                definition.push_str(" PRIMARY KEY ");
                definition.push_str(clause);
            }
            GeneratedIdStrategy::Inline { clause, .. } => {
                definition.push(' ');
                definition.push_str(clause);
                definition.push_str(" PRIMARY KEY");
            }
            _ => definition.push_str(" PRIMARY KEY"),
        },
        Some(IdStrategy::Sequence { name }) => {
            let create_sequence = dialect.create_sequence_sql(&name)?;
            if !pre_statements.contains(&create_sequence) {
                pre_statements.push(create_sequence);
            }
            if let Some(default) = dialect.sequence_column_default(&name) {
                definition.push(' ');
                definition.push_str(&default);
            }
            definition.push_str(" PRIMARY KEY");
        }
    }

    if !field.is_nullable() && !field.is_id() {
        definition.push_str(" NOT NULL");
    }

    // Parsing validates the default against the field's kind
    if let Some(default) = dialect.default_literal(field)? {
        definition.push_str(" DEFAULT ");
        definition.push_str(&default);
    }

    if field.is_unique() && !field.is_id() {
        definition.push_str(" UNIQUE");
    }

    if let Some(target) = field.foreign_target() {
        definition.push_str(&format!(
            " REFERENCES {} ({})",
            dialect.quote_identifier(&target.table),
            dialect.quote_identifier(&target.column)
        ));
    }

    Ok(definition)
}

#[instrument(name = "create_table", skip_all, fields(table = table.name()))]
pub fn create_table(
    dialect: &DatabaseDialect,
    table: &TableInfo,
    if_not_exists: bool,
) -> Result<SchemaStatement, OrmError> {
    if if_not_exists && !dialect.create_if_not_exists_supported {
        return Err(OrmError::unsupported(dialect.name, "CREATE TABLE IF NOT EXISTS"));
    }

    let mut pre_statements = vec![];
    let columns = table
        .fields()
        .iter()
        .map(|field| column_definition(dialect, table, field, &mut pre_statements))
        .collect::<Result<Vec<_>, _>>()?;

    let mut statement = String::from("CREATE TABLE ");
    if if_not_exists {
        statement.push_str("IF NOT EXISTS ");
    }
    statement.push_str(&format!(
        "{} ({})",
        dialect.quote_identifier(table.name()),
        columns.join(", ")
    ));
    if let Some(suffix) = dialect.create_table_suffix {
        statement.push(' ');
        statement.push_str(suffix);
    }

    let post_statements = table
        .fields()
        .iter()
        .filter(|field| field.is_indexed())
        .map(|field| {
            let index_name =
                dialect.entity_name(format!("{}_{}_idx", table.name(), field.column_name()));
            format!(
                "CREATE INDEX {} ON {} ({})",
                dialect.quote_identifier(&index_name),
                dialect.quote_identifier(table.name()),
                dialect.quote_identifier(field.column_name())
            )
        })
        .collect();

    let statement = SchemaStatement {
        statement,
        pre_statements,
        post_statements,
    };
    debug!(%statement, "Built create table");
    Ok(statement)
}

#[instrument(name = "drop_table", skip_all, fields(table = table.name()))]
pub fn drop_table(
    dialect: &DatabaseDialect,
    table: &TableInfo,
    if_exists: bool,
) -> Result<SchemaStatement, OrmError> {
    if if_exists && !dialect.drop_if_exists_supported {
        return Err(OrmError::unsupported(dialect.name, "DROP TABLE IF EXISTS"));
    }

    let mut statement = String::from("DROP TABLE ");
    if if_exists {
        statement.push_str("IF EXISTS ");
    }
    statement.push_str(&dialect.quote_identifier(table.name()));

    let mut post_statements = vec![];
    if let Some(IdStrategy::Sequence { name }) =
        dialect.id_strategy(table.name(), table.id_field())?
    {
        post_statements.push(dialect.drop_sequence_sql(&name)?);
    }

    let statement = SchemaStatement {
        statement,
        pre_statements: vec![],
        post_statements,
    };
    debug!(%statement, "Built drop table");
    Ok(statement)
}
