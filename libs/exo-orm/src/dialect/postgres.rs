// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{
    ColumnTypeNames, DatabaseDialect, GeneratedIdStrategy, SequenceSyntax,
    generic::GENERIC_COLUMN_TYPES,
};

const POSTGRES_COLUMN_TYPES: ColumnTypeNames = ColumnTypeNames {
    byte: "SMALLINT",
    byte_array: "BYTEA",
    serializable: "BYTEA",
    ..GENERIC_COLUMN_TYPES
};

impl DatabaseDialect {
    pub fn postgres() -> Self {
        Self {
            name: "Postgres",
            url_keys: &["postgresql", "postgres"],
            entity_quote: ('"', '"'),
            generated_id: GeneratedIdStrategy::Sequence,
            sequence: Some(SequenceSyntax {
                create: "CREATE SEQUENCE {seq}",
                drop: "DROP SEQUENCE {seq}",
                column_default: Some("DEFAULT NEXTVAL('{seq}')"),
                next_value: "SELECT NEXTVAL('{seq}')",
            }),
            insert_no_columns: "DEFAULT VALUES",
            column_types: POSTGRES_COLUMN_TYPES,
            ..Self::generic()
        }
    }
}
