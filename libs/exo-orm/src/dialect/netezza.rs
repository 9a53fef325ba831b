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
use crate::persister::{DataKind, PersisterRegistry};

const NETEZZA_COLUMN_TYPES: ColumnTypeNames = ColumnTypeNames {
    byte: "BYTEINT",
    byte_array: "BYTEA",
    serializable: "BYTEA",
    uuid: "CHAR(36)",
    ..GENERIC_COLUMN_TYPES
};

impl DatabaseDialect {
    pub fn netezza() -> Self {
        Self {
            name: "Netezza",
            url_keys: &["netezza"],
            entity_quote: ('"', '"'),
            generated_id: GeneratedIdStrategy::Sequence,
            sequence: Some(SequenceSyntax {
                create: "CREATE SEQUENCE {seq}",
                drop: "DROP SEQUENCE {seq}",
                column_default: None,
                next_value: "SELECT NEXT VALUE FOR {seq}",
            }),
            insert_no_columns: "DEFAULT VALUES",
            column_types: NETEZZA_COLUMN_TYPES,
            persisters: PersisterRegistry::new()
                .with_override(DataKind::UuidNative, DataKind::Uuid),
            ..Self::generic()
        }
    }
}
