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
    generic::GENERIC_COLUMN_TYPES,
};
use crate::persister::{DataKind, PersisterRegistry};

const SQLSERVER_COLUMN_TYPES: ColumnTypeNames = ColumnTypeNames {
    long_string: "VARCHAR(MAX)",
    date: "DATETIME",
    boolean: "BIT",
    // TINYINT is unsigned
    byte: "SMALLINT",
    byte_array: "IMAGE",
    serializable: "IMAGE",
    double: "FLOAT",
    float: "REAL",
    uuid: "UNIQUEIDENTIFIER",
    local_date_time: "DATETIME2",
    offset_time: "TIME",
    offset_date_time: "DATETIMEOFFSET",
    ..GENERIC_COLUMN_TYPES
};

impl DatabaseDialect {
    pub fn sqlserver() -> Self {
        Self {
            name: "SQL Server",
            url_keys: &["sqlserver", "jtds"],
            entity_quote: ('[', ']'),
            limit_style: LimitStyle::Top,
            offset_style: OffsetStyle::Unsupported,
            generated_id: GeneratedIdStrategy::Inline {
                clause: "IDENTITY",
                primary_key_first: false,
                forced_type: None,
            },
            create_if_not_exists_supported: false,
            insert_no_columns: "DEFAULT VALUES",
            column_types: SQLSERVER_COLUMN_TYPES,
            persisters: PersisterRegistry::new()
                .with_override(DataKind::Boolean, DataKind::BooleanInteger),
            ..Self::generic()
        }
    }
}
