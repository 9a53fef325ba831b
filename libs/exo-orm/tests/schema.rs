// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod common;

use common::foo;
use exo_orm::{
    DataKind, DatabaseDialect, DialectRegistry, FieldDescriptor, OrmError, TableInfo, create_table,
    drop_table,
};
use test_log::test;

fn sequenced(dialect: &DatabaseDialect) -> TableInfo {
    TableInfo::new(
        dialect,
        "orders",
        vec![
            FieldDescriptor::new("id", DataKind::Long).generated_id_sequence(Some("order_ids")),
            FieldDescriptor::new("total", DataKind::Double).with_default("0"),
        ],
    )
    .unwrap()
}

#[test]
fn sequence_ids_where_supported() {
    let postgres = DatabaseDialect::postgres();
    let statement = create_table(&postgres, &sequenced(&postgres), false).unwrap();

    assert_eq!(
        statement.to_string(),
        "CREATE SEQUENCE \"order_ids\"\n         CREATE TABLE \"orders\" (\"id\" BIGINT DEFAULT NEXTVAL('\"order_ids\"') PRIMARY KEY,          \"total\" DOUBLE PRECISION DEFAULT 0)"
    );
}

#[test]
fn sequence_ids_where_unsupported() {
    let mysql = DatabaseDialect::mysql();
    let table = sequenced(&mysql);

    assert!(matches!(
        create_table(&mysql, &table, false),
        Err(OrmError::UnsupportedDialectFeature { ref dialect, .. }) if dialect == "MySQL"
    ));
}

#[test]
fn generated_id_clauses() {
    let registry = DialectRegistry::new();
    let cases = [
        ("mysql", "`id` BIGINT AUTO_INCREMENT PRIMARY KEY"),
        ("sqlite", "`id` INTEGER PRIMARY KEY AUTOINCREMENT"),
        ("sqlserver", "[id] BIGINT IDENTITY PRIMARY KEY"),
        ("db2", "\"id\" BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY"),
    ];

    for (key, expected) in cases {
        let dialect = registry.for_key(key).unwrap();
        let statement = create_table(dialect, &foo(dialect), false).unwrap();
        assert!(
            statement.statement.contains(expected),
            "{key}: {}",
            statement.statement
        );
        assert!(statement.pre_statements.is_empty());
    }
}

#[test]
fn drop_removes_sequences() {
    let postgres = DatabaseDialect::postgres();

    let statement = drop_table(&postgres, &foo(&postgres), true).unwrap();
    assert_eq!(statement.statement, "DROP TABLE IF EXISTS \"foo\"");
    assert_eq!(statement.post_statements, vec!["DROP SEQUENCE \"foo_id_seq\""]);

    let mysql = DatabaseDialect::mysql();
    let statement = drop_table(&mysql, &foo(&mysql), false).unwrap();
    assert_eq!(statement.statement, "DROP TABLE `foo`");
    assert!(statement.post_statements.is_empty());
}
