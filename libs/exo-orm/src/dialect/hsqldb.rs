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

const HSQLDB_COLUMN_TYPES: ColumnTypeNames = ColumnTypeNames {
    long_string: "LONGVARCHAR",
    byte_array: "VARBINARY(255)",
    serializable: "VARBINARY(255)",
    ..GENERIC_COLUMN_TYPES
};

impl DatabaseDialect {
    pub fn hsqldb() -> Self {
        Self {
            name: "HSQLDB",
            url_keys: &["hsqldb"],
            entity_quote: ('"', '"'),
            limit_style: LimitStyle::AfterSelect,
            offset_style: OffsetStyle::InLimit,
            offset_requires_limit: true,
            generated_id: GeneratedIdStrategy::Inline {
                clause: "GENERATED BY DEFAULT AS IDENTITY",
                primary_key_first: false,
                forced_type: None,
            },
            sequence: Some(SequenceSyntax {
                create: "CREATE SEQUENCE {seq}",
                drop: "DROP SEQUENCE {seq}",
                column_default: None,
                next_value: "CALL NEXT VALUE FOR {seq}",
            }),
            entity_names_upper_case: true,
            insert_no_columns: "DEFAULT VALUES",
            column_types: HSQLDB_COLUMN_TYPES,
            ..Self::generic()
        }
    }
}
