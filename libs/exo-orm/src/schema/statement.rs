// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::{self, Display, Formatter};

/// A DDL statement along with the statements that must run around it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SchemaStatement {
    pub statement: String,
    // Statements that need to be executed before this statement. For example, the sequence backing
    // an id column must exist before the table that draws from it is created.
    pub pre_statements: Vec<String>,
    // Statements that need to be executed after this statement. For example, indexes can only be
    // created once their table exists.
    pub post_statements: Vec<String>,
}

impl SchemaStatement {
    /// All statements in execution order
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.pre_statements
            .iter()
            .chain(std::iter::once(&self.statement))
            .chain(self.post_statements.iter())
            .map(String::as_str)
    }
}

impl Display for SchemaStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let statements: Vec<&str> = self.statements().collect();
        write!(f, "{}", statements.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_order() {
        let statement = SchemaStatement {
            statement: "CREATE TABLE t".into(),
            pre_statements: vec!["CREATE SEQUENCE s".into()],
            post_statements: vec!["CREATE INDEX i".into()],
        };

        assert_eq!(
            statement.to_string(),
            "CREATE SEQUENCE s\nCREATE TABLE t\nCREATE INDEX i"
        );
        assert_eq!(SchemaStatement::default().statements().count(), 1);
    }
}
