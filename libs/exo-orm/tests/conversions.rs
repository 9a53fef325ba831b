// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use exo_orm::{
    DataKind, DatabaseDialect, EnumType, FieldDescriptor, OrmError, SqlArg, TableInfo, Value,
};
use uuid::Uuid;

fn resolved(dialect: &DatabaseDialect, field: FieldDescriptor) -> std::sync::Arc<FieldDescriptor> {
    let table = TableInfo::new(
        dialect,
        "t",
        vec![FieldDescriptor::new("id", DataKind::Long).id(), field],
    )
    .unwrap();
    table.fields()[1].clone()
}

#[test]
fn dialect_overrides_change_storage_only() {
    let field = FieldDescriptor::new("flag", DataKind::Boolean);

    let generic = resolved(&DatabaseDialect::generic(), field.clone());
    assert_eq!(
        generic.to_sql_argument(&Value::Bool(true)).unwrap(),
        SqlArg::Bool(true)
    );

    let sqlserver = resolved(&DatabaseDialect::sqlserver(), field);
    let arg = sqlserver.to_sql_argument(&Value::Bool(true)).unwrap();
    assert_eq!(arg, SqlArg::Int(1));
    assert_eq!(sqlserver.from_sql_argument(&arg).unwrap(), Value::Bool(true));
}

#[test]
fn uuids_as_text() {
    let dialect = DatabaseDialect::mysql();
    let field = resolved(&dialect, FieldDescriptor::new("ref", DataKind::UuidNative));
    let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();

    let arg = field.to_sql_argument(&Value::Uuid(uuid)).unwrap();
    assert_eq!(arg, SqlArg::String(uuid.to_string()));
    assert_eq!(field.from_sql_argument(&arg).unwrap(), Value::Uuid(uuid));
}

#[test]
fn enum_ordinals() {
    let field = resolved(
        &DatabaseDialect::generic(),
        FieldDescriptor::new("color", DataKind::EnumInteger)
            .with_enum(EnumType::new("Color", &["RED", "GREEN", "BLUE"]))
            .with_unknown_enum_name("RED"),
    );

    assert_eq!(
        field.to_sql_argument(&Value::Enum("GREEN".into())).unwrap(),
        SqlArg::Int(1)
    );
    // Ordinals no longer in the type fall back to the unknown constant
    assert_eq!(
        field.from_sql_argument(&SqlArg::Int(12)).unwrap(),
        Value::Enum("RED".into())
    );
    assert!(matches!(
        field.to_sql_argument(&Value::Enum("PURPLE".into())),
        Err(OrmError::TypeMismatch { ref column, .. }) if column == "color"
    ));
}

#[test]
fn nulls_pass_through_every_kind() {
    let dialect = DatabaseDialect::generic();
    for kind in [
        DataKind::String,
        DataKind::Long,
        DataKind::Date,
        DataKind::ByteArray,
        DataKind::BigDecimal,
        DataKind::Uuid,
    ] {
        let field = resolved(&dialect, FieldDescriptor::new("c", kind));
        assert_eq!(field.to_sql_argument(&Value::Null).unwrap(), SqlArg::Null);
        assert_eq!(field.from_sql_argument(&SqlArg::Null).unwrap(), Value::Null);
    }
}
