// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::{
    SqlBuilder,
    prepared::{PreparedQuery, PreparedStatement},
    where_builder::Where,
};
use crate::dialect::DatabaseDialect;
use crate::field::FieldDescriptor;
use crate::orm_error::OrmError;
use crate::table::TableInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
enum GroupBy {
    Column(String),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum OrderBy {
    Column { column: String, ascending: bool },
    Raw(String),
}

/// Builds a SELECT over one table.
///
/// Without an explicit projection every mapped column is selected (`SELECT *`). An explicit
/// column list gets the id column appended unless the query is distinct, grouped or raw, so that
/// the resulting rows can still be updated or deleted by id.
#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    dialect: &'a DatabaseDialect,
    table: &'a TableInfo,
    columns: Vec<String>,
    raw_columns: Vec<String>,
    count_of: bool,
    distinct: bool,
    group_by: Vec<GroupBy>,
    order_by: Vec<OrderBy>,
    limit: Option<u64>,
    offset: Option<u64>,
    where_clause: Where<'a>,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(dialect: &'a DatabaseDialect, table: &'a TableInfo) -> Self {
        Self {
            dialect,
            table,
            columns: Vec::new(),
            raw_columns: Vec::new(),
            count_of: false,
            distinct: false,
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            where_clause: Where::new(table),
        }
    }

    /// Add columns to the projection
    pub fn select_columns<'c>(
        &mut self,
        columns: impl IntoIterator<Item = &'c str>,
    ) -> Result<&mut Self, OrmError> {
        for column in columns {
            self.table.field_or_err(column)?;
            self.columns.push(column.to_string());
        }
        Ok(self)
    }

    /// Add raw expressions (typically aggregates) to the projection. Rows of such a query are not
    /// mapped to records.
    pub fn select_raw(&mut self, expression: impl Into<String>) -> &mut Self {
        self.raw_columns.push(expression.into());
        self
    }

    /// Select `COUNT(*)` instead of the rows
    pub fn count_of(&mut self) -> &mut Self {
        self.count_of = true;
        self
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    pub fn group_by(&mut self, column: &str) -> Result<&mut Self, OrmError> {
        self.table.field_or_err(column)?;
        self.group_by.push(GroupBy::Column(column.to_string()));
        Ok(self)
    }

    pub fn group_by_raw(&mut self, expression: impl Into<String>) -> &mut Self {
        self.group_by.push(GroupBy::Raw(expression.into()));
        self
    }

    pub fn order_by(&mut self, column: &str, ascending: bool) -> Result<&mut Self, OrmError> {
        self.table.field_or_err(column)?;
        self.order_by.push(OrderBy::Column {
            column: column.to_string(),
            ascending,
        });
        Ok(self)
    }

    pub fn order_by_raw(&mut self, expression: impl Into<String>) -> &mut Self {
        self.order_by.push(OrderBy::Raw(expression.into()));
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    pub fn where_clause(&mut self) -> &mut Where<'a> {
        &mut self.where_clause
    }

    fn is_identity_safe(&self) -> bool {
        !(self.distinct
            || self.count_of
            || !self.group_by.is_empty()
            || !self.raw_columns.is_empty())
    }

    /// Push the projection and return the fields of the result columns
    fn build_projection(&self, builder: &mut SqlBuilder) -> Vec<Arc<FieldDescriptor>> {
        if self.count_of {
            builder.push_str("COUNT(*) ");
            return vec![];
        }

        if !self.raw_columns.is_empty() {
            builder.push_iter(self.raw_columns.iter(), ",", |builder, expression| {
                builder.push_str(expression)
            });
            builder.push_space();
            return vec![];
        }

        if self.columns.is_empty() {
            builder.push_str("* ");
            return self.table.fields().to_vec();
        }

        let mut fields: Vec<Arc<FieldDescriptor>> = vec![];
        for column in &self.columns {
            let Some(field) = self.table.field(column) else {
                continue;
            };
            if !fields.iter().any(|f| Arc::ptr_eq(f, field)) {
                fields.push(field.clone());
            }
        }

        let id_field = self.table.id_field();
        if self.is_identity_safe() && !fields.iter().any(|f| Arc::ptr_eq(f, id_field)) {
            fields.push(id_field.clone());
        }

        builder.push_iter(fields.iter(), ",", |builder, field| {
            builder.push_identifier(field.column_name())
        });
        builder.push_space();
        fields
    }

    fn build_group_by(&self, builder: &mut SqlBuilder) {
        if self.group_by.is_empty() {
            return;
        }
        builder.push_str("GROUP BY ");
        builder.push_iter(self.group_by.iter(), ",", |builder, group_by| match group_by {
            GroupBy::Column(column) => builder.push_identifier(column),
            GroupBy::Raw(expression) => builder.push_str(expression),
        });
        builder.push_space();
    }

    fn build_order_by(&self, builder: &mut SqlBuilder) {
        if self.order_by.is_empty() {
            return;
        }
        builder.push_str("ORDER BY ");
        builder.push_iter(self.order_by.iter(), ",", |builder, order_by| match order_by {
            OrderBy::Column { column, ascending } => {
                builder.push_identifier(column);
                if !ascending {
                    builder.push_str(" DESC");
                }
            }
            OrderBy::Raw(expression) => builder.push_str(expression),
        });
        builder.push_space();
    }

    #[instrument(name = "QueryBuilder::prepare", skip_all, fields(table = self.table.name()))]
    pub fn prepare(&self) -> Result<PreparedQuery, OrmError> {
        self.dialect.check_paging(self.limit, self.offset)?;

        let mut builder = SqlBuilder::new(self.dialect);
        builder.push_str("SELECT ");
        self.dialect
            .build_paging_prefix(&mut builder, self.limit, self.offset);
        if self.distinct {
            builder.push_str("DISTINCT ");
        }
        let result_fields = self.build_projection(&mut builder);

        builder.push_str("FROM ");
        builder.push_identifier(self.table.name());
        builder.push_space();

        self.where_clause.build_into(&mut builder)?;
        self.build_group_by(&mut builder);
        self.build_order_by(&mut builder);
        self.dialect
            .build_paging_suffix(&mut builder, self.limit, self.offset);

        let (sql, arguments) = builder.into_sql();
        debug!(sql, arguments = arguments.len(), "Prepared query");

        Ok(PreparedQuery::new(
            PreparedStatement::new(sql, arguments, self.dialect.log_arguments),
            self.table.name().to_string(),
            result_fields,
            self.dialect.max_rows(self.limit),
            self.is_identity_safe(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persister::DataKind;
    use crate::sql::argument::BoundArgument;

    fn table(dialect: &DatabaseDialect) -> TableInfo {
        TableInfo::new(
            dialect,
            "foo",
            vec![
                FieldDescriptor::new("id", DataKind::Long).generated_id(),
                FieldDescriptor::new("val", DataKind::Integer),
                FieldDescriptor::new("name", DataKind::String),
            ],
        )
        .unwrap()
    }

    fn binding(query: PreparedQuery) -> (String, Vec<BoundArgument>) {
        (query.sql().to_string(), query.arguments().to_vec())
    }

    #[test]
    fn select_all() {
        let dialect = DatabaseDialect::generic();
        let table = table(&dialect);

        let query = QueryBuilder::new(&dialect, &table).prepare().unwrap();
        assert_eq!(query.sql(), "SELECT * FROM `foo` ");
        assert_eq!(query.result_fields().len(), 3);
        assert!(query.is_identity_safe());

        let query = QueryBuilder::new(&dialect, &table).limit(10).prepare().unwrap();
        assert_eq!(query.sql(), "SELECT * FROM `foo` LIMIT 10 ");
        assert_eq!(query.max_rows(), None);
    }

    #[test]
    fn id_is_appended_to_explicit_columns() {
        let dialect = DatabaseDialect::generic();
        let table = table(&dialect);

        let mut builder = QueryBuilder::new(&dialect, &table);
        builder.select_columns(["val"]).unwrap();
        let query = builder.prepare().unwrap();
        assert_eq!(query.sql(), "SELECT `val`,`id` FROM `foo` ");

        let mut builder = QueryBuilder::new(&dialect, &table);
        builder.select_columns(["val"]).unwrap().distinct();
        let query = builder.prepare().unwrap();
        assert_eq!(query.sql(), "SELECT DISTINCT `val` FROM `foo` ");
        assert!(!query.is_identity_safe());

        assert!(matches!(
            QueryBuilder::new(&dialect, &table).select_columns(["nope"]),
            Err(OrmError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn full_select() {
        let dialect = DatabaseDialect::generic();
        let table = table(&dialect);

        let mut builder = QueryBuilder::new(&dialect, &table);
        builder
            .select_columns(["name"])
            .unwrap()
            .group_by("name")
            .unwrap()
            .order_by("name", false)
            .unwrap()
            .order_by_raw("COUNT(*)")
            .limit(5)
            .offset(10);
        builder
            .where_clause()
            .gt("val", 3)
            .unwrap()
            .and()
            .unwrap()
            .like("name", "a%")
            .unwrap();

        assert_binding!(
            binding(builder.prepare().unwrap()),
            "SELECT `name` FROM `foo` WHERE (`val` > ? AND `name` LIKE ? ) GROUP BY `name` ORDER BY `name` DESC,COUNT(*) LIMIT 5 OFFSET 10 ",
            3,
            "a%"
        );
    }

    #[test]
    fn raw_and_count_projections() {
        let dialect = DatabaseDialect::generic();
        let table = table(&dialect);

        let query = QueryBuilder::new(&dialect, &table).count_of().prepare().unwrap();
        assert_eq!(query.sql(), "SELECT COUNT(*) FROM `foo` ");
        assert!(query.result_fields().is_empty());

        let mut builder = QueryBuilder::new(&dialect, &table);
        builder.select_raw("MAX(`val`)").select_raw("MIN(`val`)");
        let query = builder.prepare().unwrap();
        assert_eq!(query.sql(), "SELECT MAX(`val`),MIN(`val`) FROM `foo` ");
        assert!(!query.is_identity_safe());
    }

    #[test]
    fn limit_placement_per_dialect() {
        let hsqldb = DatabaseDialect::hsqldb();
        let hsqldb_table = table(&hsqldb);
        let query = QueryBuilder::new(&hsqldb, &hsqldb_table)
            .limit(103)
            .offset(7)
            .prepare()
            .unwrap();
        assert_eq!(query.sql(), r#"SELECT LIMIT 7 103 * FROM "foo" "#);

        let sqlserver = DatabaseDialect::sqlserver();
        let sqlserver_table = table(&sqlserver);
        let query = QueryBuilder::new(&sqlserver, &sqlserver_table).limit(5).prepare().unwrap();
        assert_eq!(query.sql(), "SELECT TOP 5 * FROM [foo] ");

        let mysql = DatabaseDialect::mysql();
        let mysql_table = table(&mysql);
        let query = QueryBuilder::new(&mysql, &mysql_table)
            .limit(5)
            .offset(20)
            .prepare()
            .unwrap();
        assert_eq!(query.sql(), "SELECT * FROM `foo` LIMIT 20,5 ");

        let derby = DatabaseDialect::derby();
        let derby_table = table(&derby);
        let query = QueryBuilder::new(&derby, &derby_table).limit(5).prepare().unwrap();
        assert_eq!(query.sql(), r#"SELECT * FROM "foo" "#);
        assert_eq!(query.max_rows(), Some(5));

        assert!(matches!(
            QueryBuilder::new(&derby, &derby_table).offset(5).prepare(),
            Err(OrmError::UnsupportedDialectFeature { .. })
        ));
    }

    #[test]
    fn incomplete_where_fails_prepare() {
        let dialect = DatabaseDialect::generic();
        let table = table(&dialect);

        let mut builder = QueryBuilder::new(&dialect, &table);
        builder.where_clause().eq("val", 1).unwrap().eq("val", 2).unwrap();

        assert!(matches!(
            builder.prepare(),
            Err(OrmError::IncompleteWhereExpression { stack_size: 2, .. })
        ));
    }
}
