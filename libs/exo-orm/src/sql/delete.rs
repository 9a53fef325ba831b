// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tracing::{debug, instrument};

use super::{SqlBuilder, prepared::PreparedStatement, where_builder::Where};
use crate::dialect::DatabaseDialect;
use crate::orm_error::OrmError;
use crate::table::TableInfo;

/// Builds a DELETE over one table. Without a WHERE clause every row is deleted.
#[derive(Debug, Clone)]
pub struct DeleteBuilder<'a> {
    dialect: &'a DatabaseDialect,
    table: &'a TableInfo,
    where_clause: Where<'a>,
}

impl<'a> DeleteBuilder<'a> {
    pub fn new(dialect: &'a DatabaseDialect, table: &'a TableInfo) -> Self {
        Self {
            dialect,
            table,
            where_clause: Where::new(table),
        }
    }

    pub fn where_clause(&mut self) -> &mut Where<'a> {
        &mut self.where_clause
    }

    #[instrument(name = "DeleteBuilder::prepare", skip_all, fields(table = self.table.name()))]
    pub fn prepare(&self) -> Result<PreparedStatement, OrmError> {
        let mut builder = SqlBuilder::new(self.dialect);
        builder.push_str("DELETE FROM ");
        builder.push_identifier(self.table.name());
        builder.push_space();
        self.where_clause.build_into(&mut builder)?;

        let (sql, arguments) = builder.into_sql();
        debug!(sql, arguments = arguments.len(), "Prepared delete");
        Ok(PreparedStatement::new(sql, arguments, self.dialect.log_arguments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldDescriptor;
    use crate::persister::DataKind;

    #[test]
    fn delete_with_and_without_where() {
        let dialect = DatabaseDialect::generic();
        let table = TableInfo::new(
            &dialect,
            "foo",
            vec![
                FieldDescriptor::new("id", DataKind::Long).id(),
                FieldDescriptor::new("name", DataKind::String),
            ],
        )
        .unwrap();

        let all = DeleteBuilder::new(&dialect, &table).prepare().unwrap();
        assert_eq!(all.sql(), "DELETE FROM `foo` ");
        assert!(all.arguments().is_empty());

        let mut builder = DeleteBuilder::new(&dialect, &table);
        builder
            .where_clause()
            .in_("id", [1i64, 2, 3])
            .unwrap();
        let statement = builder.prepare().unwrap();

        assert_binding!(
            (statement.sql(), statement.arguments()),
            "DELETE FROM `foo` WHERE `id` IN (?,?,?) ",
            1i64,
            2i64,
            3i64
        );

        let mut dangling = DeleteBuilder::new(&dialect, &table);
        dangling.where_clause().is_null("name").unwrap().or().unwrap();
        assert!(matches!(
            dangling.prepare(),
            Err(OrmError::IncompleteWhereExpression { .. })
        ));
    }
}
