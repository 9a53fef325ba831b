// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use super::DataKind;

/// Per-dialect replacements of one data kind by another.
///
/// A replacement must hold the same [`Value`](crate::Value) variant as the kind it replaces; only
/// the storage form may differ (e.g. a database without a boolean type storing `BOOLEAN` fields
/// as `BOOLEAN_INTEGER`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersisterRegistry {
    overrides: HashMap<DataKind, DataKind>,
}

impl PersisterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, kind: DataKind, replacement: DataKind) -> Self {
        self.overrides.insert(kind, replacement);
        self
    }

    /// The kind actually used to store `kind`
    pub fn resolve(&self, kind: DataKind) -> DataKind {
        self.overrides.get(&kind).copied().unwrap_or(kind)
    }

    /// Look up a kind by its configuration name, such as `"BOOLEAN_CHAR"`
    pub fn lookup(&self, name: &str) -> Option<DataKind> {
        name.parse::<DataKind>().ok().map(|kind| self.resolve(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_only_to_their_kind() {
        let registry = PersisterRegistry::new().with_override(DataKind::Boolean, DataKind::BooleanInteger);

        assert_eq!(registry.resolve(DataKind::Boolean), DataKind::BooleanInteger);
        assert_eq!(registry.resolve(DataKind::BooleanChar), DataKind::BooleanChar);
        assert_eq!(registry.lookup("boolean"), Some(DataKind::BooleanInteger));
        assert_eq!(registry.lookup("bogus"), None);
    }
}
