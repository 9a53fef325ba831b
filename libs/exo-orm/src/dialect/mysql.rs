// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ColumnTypeNames, DatabaseDialect, OffsetStyle, generic::GENERIC_COLUMN_TYPES};
use crate::persister::{DataKind, PersisterRegistry};

const MYSQL_COLUMN_TYPES: ColumnTypeNames = ColumnTypeNames {
    date: "DATETIME",
    boolean: "TINYINT(1)",
    big_decimal: "DECIMAL",
    uuid: "CHAR(36)",
    local_date_time: "DATETIME",
    offset_time: "TIME",
    offset_date_time: "DATETIME",
    ..GENERIC_COLUMN_TYPES
};

impl DatabaseDialect {
    pub fn mysql() -> Self {
        Self {
            name: "MySQL",
            url_keys: &["mysql"],
            offset_style: OffsetStyle::InLimit,
            offset_requires_limit: true,
            create_table_suffix: Some("ENGINE=InnoDB"),
            column_types: MYSQL_COLUMN_TYPES,
            // No native uuid column; store as text
            persisters: PersisterRegistry::new()
                .with_override(DataKind::UuidNative, DataKind::Uuid),
            ..Self::generic()
        }
    }

    pub fn mariadb() -> Self {
        Self {
            name: "MariaDB",
            url_keys: &["mariadb"],
            ..Self::mysql()
        }
    }
}
