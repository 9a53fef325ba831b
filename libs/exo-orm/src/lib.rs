// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// This library turns a declarative description of a table ([TableInfo], a list of
/// [FieldDescriptor]s) into SQL for a particular database ([DatabaseDialect]). It does not
/// connect to a database: every operation produces statement text with `?` placeholders along
/// with the arguments bound to them, and the execution layer runs them.
///
/// Statements come from builders: [QueryBuilder] for selects, [UpdateBuilder] and
/// [DeleteBuilder] for bulk changes, and [MappedStatements] for the per-record insert, query,
/// update and delete by id. Predicates are assembled with [Where], either by chaining
/// (`eq(..)?.and().eq(..)`) or in prefix form (`and_of(a, b)`). Arguments may be bound late
/// through [SelectArg] so that a prepared statement can be reused with different values.
///
/// The conversion between application [Value]s and driver [SqlArg]s is done by the
/// [DataKind] of each field, which the dialect may replace with a different storage form (for
/// example booleans stored as integers). [create_table] and [drop_table] produce the DDL,
/// including the sequences and indexes that go with a table.
#[macro_use]
mod sql;

pub mod config;
pub mod dialect;
pub mod field;
pub mod logging;
pub mod orm_error;
pub mod persister;
pub mod result_row;
pub mod schema;
pub mod sql_arg;
pub mod table;
pub mod value;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::{EnvError, Environment, MapEnvironment, OrmConfig, SystemEnvironment};
pub use dialect::{
    ColumnTypeNames, DatabaseDialect, GeneratedIdStrategy, IdStrategy, LimitStyle, OffsetStyle,
    DialectRegistry, SequenceSyntax,
};
pub use field::{FieldDescriptor, ForeignTarget, IdRole};
pub use orm_error::{OrmError, WithContext};
pub use persister::{DataKind, EnumConstant, EnumType, PersisterContext, PersisterRegistry};
pub use result_row::ResultRow;
pub use schema::{
    statement::SchemaStatement,
    table_ddl::{create_table, drop_table},
};
pub use sql_arg::{SqlArg, SqlType};
pub use table::{FieldConfig, TableConfig, TableInfo};
pub use value::{Record, Value};

pub use sql::{
    ExpressionBuilder, SqlBuilder,
    argument::{ArgumentHolder, BoundArgument, SelectArg, ThreadLocalSelectArg},
    clause::{BoundOperand, Clause, ComparisonOp},
    delete::DeleteBuilder,
    insert::{MappedStatements, PreparedInsert},
    prepared::{PreparedQuery, PreparedStatement, RowMapper},
    select::QueryBuilder,
    update::UpdateBuilder,
    where_builder::{Expr, Operand, Where},
};
