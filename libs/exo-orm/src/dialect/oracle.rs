// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{
    ColumnTypeNames, DatabaseDialect, GeneratedIdStrategy, LimitStyle, OffsetStyle,
    SequenceSyntax, generic::GENERIC_COLUMN_TYPES,
};
use crate::persister::{DataKind, PersisterRegistry};

const ORACLE_COLUMN_TYPES: ColumnTypeNames = ColumnTypeNames {
    string: "VARCHAR2",
    long_string: "LONG",
    boolean: "CHAR(1)",
    byte: "SMALLINT",
    byte_array: "LONG RAW",
    serializable: "LONG RAW",
    long: "NUMERIC(38)",
    double: "FLOAT(126)",
    uuid: "VARCHAR2(36)",
    local_time: "TIMESTAMP",
    offset_time: "TIMESTAMP WITH TIME ZONE",
    ..GENERIC_COLUMN_TYPES
};

impl DatabaseDialect {
    pub fn oracle() -> Self {
        Self {
            name: "Oracle",
            url_keys: &["oracle"],
            entity_quote: ('"', '"'),
            limit_style: LimitStyle::MaxRows,
            offset_style: OffsetStyle::Unsupported,
            generated_id: GeneratedIdStrategy::Sequence,
            sequence: Some(SequenceSyntax {
                create: "CREATE SEQUENCE {seq}",
                drop: "DROP SEQUENCE {seq}",
                column_default: None,
                next_value: "SELECT {seq}.NEXTVAL FROM DUAL",
            }),
            entity_names_upper_case: true,
            create_if_not_exists_supported: false,
            drop_if_exists_supported: false,
            insert_no_columns: "VALUES (DEFAULT)",
            column_types: ORACLE_COLUMN_TYPES,
            persisters: PersisterRegistry::new()
                .with_override(DataKind::Boolean, DataKind::BooleanChar)
                .with_override(DataKind::UuidNative, DataKind::Uuid),
            ..Self::generic()
        }
    }
}
