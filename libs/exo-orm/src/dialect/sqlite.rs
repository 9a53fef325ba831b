// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{DatabaseDialect, GeneratedIdStrategy};

impl DatabaseDialect {
    pub fn sqlite() -> Self {
        Self {
            name: "SQLite",
            url_keys: &["sqlite"],
            offset_requires_limit: true,
            varchar_width_supported: false,
            // AUTOINCREMENT is only accepted on an INTEGER PRIMARY KEY
            generated_id: GeneratedIdStrategy::Inline {
                clause: "AUTOINCREMENT",
                primary_key_first: true,
                forced_type: Some("INTEGER"),
            },
            insert_no_columns: "DEFAULT VALUES",
            ..Self::generic()
        }
    }
}
