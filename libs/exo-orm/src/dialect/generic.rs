// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ColumnTypeNames, DatabaseDialect, GeneratedIdStrategy, LimitStyle, OffsetStyle};
use crate::persister::PersisterRegistry;

pub(super) const GENERIC_COLUMN_TYPES: ColumnTypeNames = ColumnTypeNames {
    string: "VARCHAR",
    long_string: "TEXT",
    date: "TIMESTAMP",
    boolean: "BOOLEAN",
    char: "CHAR",
    byte: "TINYINT",
    byte_array: "BLOB",
    short: "SMALLINT",
    integer: "INTEGER",
    long: "BIGINT",
    float: "FLOAT",
    double: "DOUBLE PRECISION",
    serializable: "BLOB",
    big_decimal: "NUMERIC",
    uuid: "UUID",
    local_date: "DATE",
    local_time: "TIME",
    local_date_time: "TIMESTAMP",
    offset_time: "TIME WITH TIME ZONE",
    offset_date_time: "TIMESTAMP WITH TIME ZONE",
};

impl DatabaseDialect {
    /// The baseline every other dialect starts from. Also used when no specific database is
    /// configured.
    pub fn generic() -> Self {
        Self {
            name: "Generic",
            url_keys: &["generic"],
            entity_quote: ('`', '`'),
            literal_quote: '\'',
            limit_style: LimitStyle::Suffix,
            offset_style: OffsetStyle::Suffix,
            offset_requires_limit: false,
            varchar_width_supported: true,
            default_string_width: 255,
            generated_id: GeneratedIdStrategy::Inline {
                clause: "AUTO_INCREMENT",
                primary_key_first: false,
                forced_type: None,
            },
            sequence: None,
            entity_names_upper_case: false,
            create_table_suffix: None,
            create_if_not_exists_supported: true,
            drop_if_exists_supported: true,
            insert_no_columns: "() VALUES ()",
            column_types: GENERIC_COLUMN_TYPES,
            persisters: PersisterRegistry::new(),
            log_arguments: false,
        }
    }
}
