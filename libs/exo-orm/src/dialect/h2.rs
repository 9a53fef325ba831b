// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{DatabaseDialect, SequenceSyntax};

impl DatabaseDialect {
    pub fn h2() -> Self {
        Self {
            name: "H2",
            url_keys: &["h2"],
            sequence: Some(SequenceSyntax {
                create: "CREATE SEQUENCE {seq}",
                drop: "DROP SEQUENCE {seq}",
                column_default: None,
                next_value: "CALL NEXT VALUE FOR {seq}",
            }),
            entity_names_upper_case: true,
            insert_no_columns: "DEFAULT VALUES",
            ..Self::generic()
        }
    }
}
