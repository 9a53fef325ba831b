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

const DB2_COLUMN_TYPES: ColumnTypeNames = ColumnTypeNames {
    long_string: "LONG VARCHAR",
    boolean: "SMALLINT",
    byte: "SMALLINT",
    uuid: "CHAR(36)",
    offset_time: "TIME",
    offset_date_time: "TIMESTAMP",
    ..GENERIC_COLUMN_TYPES
};

impl DatabaseDialect {
    pub fn db2() -> Self {
        Self {
            name: "DB2",
            url_keys: &["db2"],
            entity_quote: ('"', '"'),
            limit_style: LimitStyle::MaxRows,
            offset_style: OffsetStyle::Unsupported,
            generated_id: GeneratedIdStrategy::Inline {
                clause: "GENERATED ALWAYS AS IDENTITY",
                primary_key_first: false,
                forced_type: None,
            },
            sequence: Some(SequenceSyntax {
                create: "CREATE SEQUENCE {seq}",
                drop: "DROP SEQUENCE {seq} RESTRICT",
                column_default: None,
                next_value: "VALUES NEXTVAL FOR {seq}",
            }),
            entity_names_upper_case: true,
            create_if_not_exists_supported: false,
            drop_if_exists_supported: false,
            insert_no_columns: "VALUES (DEFAULT)",
            column_types: DB2_COLUMN_TYPES,
            persisters: PersisterRegistry::new()
                .with_override(DataKind::Boolean, DataKind::BooleanInteger)
                .with_override(DataKind::UuidNative, DataKind::Uuid),
            ..Self::generic()
        }
    }
}
