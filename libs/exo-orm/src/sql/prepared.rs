// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Finished statements as handed to the execution layer.

use std::sync::Arc;

use tracing::trace;

use super::argument::BoundArgument;
use crate::field::FieldDescriptor;
use crate::orm_error::OrmError;
use crate::result_row::ResultRow;
use crate::sql_arg::SqlArg;
use crate::value::Record;

fn collect_args(
    sql: &str,
    arguments: &[BoundArgument],
    log_arguments: bool,
) -> Result<Vec<SqlArg>, OrmError> {
    let args = arguments
        .iter()
        .map(BoundArgument::sql_arg)
        .collect::<Result<Vec<_>, _>>()?;

    if log_arguments {
        trace!(sql, ?args, "Binding arguments");
    }
    Ok(args)
}

/// Statement text with the arguments bound to its placeholders
#[derive(Debug, Clone)]
pub struct PreparedStatement {
    sql: String,
    arguments: Vec<BoundArgument>,
    log_arguments: bool,
}

impl PreparedStatement {
    pub(crate) fn new(sql: String, arguments: Vec<BoundArgument>, log_arguments: bool) -> Self {
        Self {
            sql,
            arguments,
            log_arguments,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn arguments(&self) -> &[BoundArgument] {
        &self.arguments
    }

    /// Current argument values in placeholder order. Fails if any argument is unset.
    pub fn sql_args(&self) -> Result<Vec<SqlArg>, OrmError> {
        collect_args(&self.sql, &self.arguments, self.log_arguments)
    }
}

/// Maps result rows to records, reading each column through its field's data kind
#[derive(Debug, Clone, Copy)]
pub struct RowMapper<'a> {
    table_name: &'a str,
    fields: &'a [Arc<FieldDescriptor>],
}

impl<'a> RowMapper<'a> {
    pub fn new(table_name: &'a str, fields: &'a [Arc<FieldDescriptor>]) -> Self {
        Self { table_name, fields }
    }

    pub fn map_row(&self, row: &dyn ResultRow) -> Result<Record, OrmError> {
        let mut record = Record::with_capacity(self.fields.len());

        for field in self.fields {
            let column = row.column_index(field.column_name()).ok_or_else(|| {
                OrmError::UnknownColumn {
                    table: self.table_name.to_string(),
                    column: field.column_name().to_string(),
                }
            })?;

            let value = field.from_sql_result(row, column)?;
            record.insert(field.column_name().to_string(), value);
        }

        Ok(record)
    }
}

/// A prepared SELECT
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    statement: PreparedStatement,
    table_name: String,
    result_fields: Vec<Arc<FieldDescriptor>>,
    max_rows: Option<u64>,
    identity_safe: bool,
}

impl PreparedQuery {
    pub(crate) fn new(
        statement: PreparedStatement,
        table_name: String,
        result_fields: Vec<Arc<FieldDescriptor>>,
        max_rows: Option<u64>,
        identity_safe: bool,
    ) -> Self {
        Self {
            statement,
            table_name,
            result_fields,
            max_rows,
            identity_safe,
        }
    }

    pub fn sql(&self) -> &str {
        self.statement.sql()
    }

    pub fn arguments(&self) -> &[BoundArgument] {
        self.statement.arguments()
    }

    pub fn sql_args(&self) -> Result<Vec<SqlArg>, OrmError> {
        self.statement.sql_args()
    }

    /// Fields of the result columns, in projection order. Empty for raw and count projections.
    pub fn result_fields(&self) -> &[Arc<FieldDescriptor>] {
        &self.result_fields
    }

    /// Row limit the driver must apply, for dialects without a LIMIT clause
    pub fn max_rows(&self) -> Option<u64> {
        self.max_rows
    }

    /// Whether the rows include the id and map one-to-one onto table rows. Distinct, grouped and
    /// raw projections are not.
    pub fn is_identity_safe(&self) -> bool {
        self.identity_safe
    }

    pub fn row_mapper(&self) -> RowMapper<'_> {
        RowMapper::new(&self.table_name, &self.result_fields)
    }

    pub fn map_row(&self, row: &dyn ResultRow) -> Result<Record, OrmError> {
        self.row_mapper().map_row(row)
    }
}
