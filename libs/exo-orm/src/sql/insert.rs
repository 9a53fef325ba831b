// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Statements over a single mapped row: insert, and query, update or delete by id.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::{
    SqlBuilder,
    argument::{ArgumentHolder, BoundArgument, SelectArg},
    delete::DeleteBuilder,
    prepared::{PreparedQuery, PreparedStatement},
    select::QueryBuilder,
    update::UpdateBuilder,
    where_builder::bind_value,
};
use crate::dialect::{DatabaseDialect, IdStrategy};
use crate::field::FieldDescriptor;
use crate::orm_error::OrmError;
use crate::table::TableInfo;
use crate::value::{Record, Value};

/// A prepared INSERT along with what the execution layer needs to know about the row's id.
///
/// For [`IdStrategy::Sequence`] the caller must run [`PreparedInsert::id_query`] first and pass
/// its result to [`PreparedInsert::set_sequence_id`] before running the insert. For
/// [`IdStrategy::Inline`] the id is read back as a generated key after the insert.
#[derive(Debug, Clone)]
pub struct PreparedInsert {
    statement: PreparedStatement,
    id_strategy: IdStrategy,
    id_query: Option<String>,
    id_argument: Option<BoundArgument>,
    generated_id: Option<Value>,
}

impl PreparedInsert {
    pub fn statement(&self) -> &PreparedStatement {
        &self.statement
    }

    pub fn sql(&self) -> &str {
        self.statement.sql()
    }

    pub fn id_strategy(&self) -> &IdStrategy {
        &self.id_strategy
    }

    /// The query fetching the next sequence value, to be run before the insert
    pub fn id_query(&self) -> Option<&str> {
        self.id_query.as_deref()
    }

    /// Supply the value fetched by [`PreparedInsert::id_query`]
    pub fn set_sequence_id(&self, id: impl Into<Value>) -> Result<(), OrmError> {
        match &self.id_argument {
            Some(argument) => {
                argument.set_value(id);
                Ok(())
            }
            None => Err(OrmError::unsupported(
                "this insert",
                "setting a sequence id (the id isn't drawn from a sequence)",
            )),
        }
    }

    /// The id created in memory for a self-generated id column
    pub fn generated_id(&self) -> Option<&Value> {
        self.generated_id.as_ref()
    }
}

/// Statements over single rows of one table, addressed by the id column
#[derive(Debug, Clone, Copy)]
pub struct MappedStatements<'a> {
    dialect: &'a DatabaseDialect,
    table: &'a TableInfo,
}

impl<'a> MappedStatements<'a> {
    pub fn new(dialect: &'a DatabaseDialect, table: &'a TableInfo) -> Self {
        Self { dialect, table }
    }

    fn check_columns(&self, record: &Record) -> Result<(), OrmError> {
        for column in record.keys() {
            self.table.field_or_err(column)?;
        }
        Ok(())
    }

    fn id_value<'r>(&self, record: &'r Record) -> Option<&'r Value> {
        record
            .get(self.table.id_field().column_name())
            .filter(|value| !value.is_null())
    }

    fn missing_id(&self) -> OrmError {
        OrmError::invalid_field(
            self.table.id_field().column_name(),
            "the record has no id value",
        )
    }

    /// Insert `record`. Columns missing from the record are left to their database defaults.
    #[instrument(name = "MappedStatements::insert", skip_all, fields(table = self.table.name()))]
    pub fn insert(&self, record: &Record) -> Result<PreparedInsert, OrmError> {
        self.check_columns(record)?;

        let id_field = self.table.id_field();
        let id_strategy = self
            .dialect
            .id_strategy(self.table.name(), id_field)?
            .ok_or_else(|| OrmError::invalid_field(id_field.column_name(), "not an id column"))?;

        let mut id_query = None;
        let mut id_argument = None;
        let mut generated_id = None;
        let mut columns: Vec<(&Arc<FieldDescriptor>, BoundArgument)> = vec![];

        for field in self.table.fields() {
            if field.is_id() {
                let argument = match &id_strategy {
                    IdStrategy::Inline => continue,
                    IdStrategy::Sequence { name } => {
                        id_query = Some(self.dialect.next_sequence_value_sql(name)?);
                        let holder = SelectArg::new();
                        holder.set_metadata(field.column_name(), Some(field.clone()))?;
                        let argument = BoundArgument::new(Arc::new(holder));
                        id_argument = Some(argument.clone());
                        argument
                    }
                    IdStrategy::SelfGenerated => {
                        let id = match self.id_value(record) {
                            Some(id) => id.clone(),
                            None => {
                                let id = field
                                    .data_kind()
                                    .generate_id()
                                    .ok_or_else(|| self.missing_id())?;
                                generated_id = Some(id.clone());
                                id
                            }
                        };
                        bind_value(field, id)?
                    }
                    IdStrategy::Plain => {
                        let id = self.id_value(record).ok_or_else(|| self.missing_id())?;
                        bind_value(field, id.clone())?
                    }
                };
                columns.push((field, argument));
                continue;
            }

            if let Some(value) = record.get(field.column_name()) {
                columns.push((field, bind_value(field, value.clone())?));
            }
        }

        let mut builder = SqlBuilder::new(self.dialect);
        builder.push_str("INSERT INTO ");
        builder.push_identifier(self.table.name());
        builder.push_space();

        if columns.is_empty() {
            builder.push_str(self.dialect.insert_no_columns);
        } else {
            builder.push('(');
            builder.push_iter(columns.iter(), ",", |builder, (field, _)| {
                builder.push_identifier(field.column_name())
            });
            builder.push_str(") VALUES (");
            builder.push_iter(columns.into_iter(), ",", |builder, (_, argument)| {
                builder.push_argument(argument)
            });
            builder.push(')');
        }

        let (sql, arguments) = builder.into_sql();
        debug!(sql, arguments = arguments.len(), ?id_strategy, "Prepared insert");

        Ok(PreparedInsert {
            statement: PreparedStatement::new(sql, arguments, self.dialect.log_arguments),
            id_strategy,
            id_query,
            id_argument,
            generated_id,
        })
    }

    /// Select the row with the given id
    pub fn query_for_id(&self, id: impl Into<Value>) -> Result<PreparedQuery, OrmError> {
        let mut builder = QueryBuilder::new(self.dialect, self.table);
        builder.where_clause().id_eq(id.into())?;
        builder.prepare()
    }

    /// Update every non-id column present in `record` on the row with the record's id
    pub fn update_by_id(&self, record: &Record) -> Result<PreparedStatement, OrmError> {
        self.check_columns(record)?;
        let id = self.id_value(record).ok_or_else(|| self.missing_id())?;

        let mut builder = UpdateBuilder::new(self.dialect, self.table);
        for field in self.table.fields() {
            if field.is_id() {
                continue;
            }
            if let Some(value) = record.get(field.column_name()) {
                builder.update_column_value(field.column_name(), value.clone())?;
            }
        }
        builder.where_clause().id_eq(id.clone())?;
        builder.prepare()
    }

    pub fn delete_by_id(&self, id: impl Into<Value>) -> Result<PreparedStatement, OrmError> {
        let mut builder = DeleteBuilder::new(self.dialect, self.table);
        builder.where_clause().id_eq(id.into())?;
        builder.prepare()
    }
}
