// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#![allow(dead_code)]

use exo_orm::{DataKind, DatabaseDialect, FieldDescriptor, PreparedStatement, Record, TableInfo, Value};

/// `foo` with a generated id, a string and a numeric column
pub fn foo(dialect: &DatabaseDialect) -> TableInfo {
    TableInfo::new(
        dialect,
        "foo",
        vec![
            FieldDescriptor::new("id", DataKind::Long).generated_id(),
            FieldDescriptor::new("val", DataKind::String),
            FieldDescriptor::new("amount", DataKind::Integer),
        ],
    )
    .unwrap()
}

pub fn record(entries: &[(&str, Value)]) -> Record {
    entries
        .iter()
        .map(|(column, value)| (column.to_string(), value.clone()))
        .collect()
}

/// Every placeholder in the text has exactly one argument
pub fn assert_positional(sql: &str, statement_args: usize) {
    assert_eq!(
        sql.matches('?').count(),
        statement_args,
        "placeholders and arguments disagree in {sql}"
    );
}

pub fn assert_statement(statement: &PreparedStatement) {
    assert_positional(statement.sql(), statement.arguments().len());
}
