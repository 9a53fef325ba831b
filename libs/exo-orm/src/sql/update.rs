// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::{
    SqlBuilder,
    argument::BoundArgument,
    prepared::PreparedStatement,
    where_builder::{Operand, Where, bind_holder, bind_value},
};
use crate::dialect::DatabaseDialect;
use crate::field::FieldDescriptor;
use crate::orm_error::OrmError;
use crate::table::TableInfo;

#[derive(Debug, Clone)]
enum SetValue {
    Argument(BoundArgument),
    /// Raw SQL, such as an increment of the column itself
    Expression(String),
}

/// Builds an UPDATE over one table
#[derive(Debug, Clone)]
pub struct UpdateBuilder<'a> {
    dialect: &'a DatabaseDialect,
    table: &'a TableInfo,
    updates: Vec<(String, SetValue)>,
    where_clause: Where<'a>,
}

impl<'a> UpdateBuilder<'a> {
    pub fn new(dialect: &'a DatabaseDialect, table: &'a TableInfo) -> Self {
        Self {
            dialect,
            table,
            updates: Vec::new(),
            where_clause: Where::new(table),
        }
    }

    fn updatable_field(&self, column: &str) -> Result<&'a Arc<FieldDescriptor>, OrmError> {
        let field = self.table.field_or_err(column)?;
        if field.is_id() {
            return Err(OrmError::invalid_field(
                column,
                "the id column can't be updated",
            ));
        }
        Ok(field)
    }

    /// Set `column` to a value. Unlike in a WHERE clause, a null value is allowed for nullable
    /// columns.
    pub fn update_column_value(
        &mut self,
        column: &str,
        value: impl Into<Operand>,
    ) -> Result<&mut Self, OrmError> {
        let field = self.updatable_field(column)?;
        let argument = match value.into() {
            Operand::Value(value) => bind_value(field, value)?,
            Operand::Argument(holder) => bind_holder(field, holder)?,
            Operand::Column(other) => {
                self.table.field_or_err(&other)?;
                let expression = self.dialect.quote_identifier(&other);
                self.updates
                    .push((column.to_string(), SetValue::Expression(expression)));
                return Ok(self);
            }
        };

        self.updates
            .push((column.to_string(), SetValue::Argument(argument)));
        Ok(self)
    }

    /// Set `column` to a raw SQL expression
    pub fn update_column_expression(
        &mut self,
        column: &str,
        expression: impl Into<String>,
    ) -> Result<&mut Self, OrmError> {
        self.updatable_field(column)?;
        self.updates
            .push((column.to_string(), SetValue::Expression(expression.into())));
        Ok(self)
    }

    pub fn where_clause(&mut self) -> &mut Where<'a> {
        &mut self.where_clause
    }

    #[instrument(name = "UpdateBuilder::prepare", skip_all, fields(table = self.table.name()))]
    pub fn prepare(&self) -> Result<PreparedStatement, OrmError> {
        if self.updates.is_empty() {
            return Err(OrmError::invalid_field(
                self.table.name(),
                "an update needs at least one column to set",
            ));
        }

        let mut builder = SqlBuilder::new(self.dialect);
        builder.push_str("UPDATE ");
        builder.push_identifier(self.table.name());
        builder.push_str(" SET ");
        builder.push_iter(self.updates.iter(), ",", |builder, (column, value)| {
            builder.push_identifier(column);
            builder.push_str(" = ");
            match value {
                SetValue::Argument(argument) => builder.push_argument(argument.clone()),
                SetValue::Expression(expression) => builder.push_str(expression),
            }
            builder.push_space();
        });

        self.where_clause.build_into(&mut builder)?;

        let (sql, arguments) = builder.into_sql();
        debug!(sql, arguments = arguments.len(), "Prepared update");
        Ok(PreparedStatement::new(sql, arguments, self.dialect.log_arguments))
    }
}
