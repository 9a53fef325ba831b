// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! WHERE expression assembly.
//!
//! [`Where`] keeps a stack of finished clauses. Predicates push a clause; combinators take their
//! operands off the stack. The no-argument combinators ([`Where::and`], [`Where::or`],
//! [`Where::not`]) bind to the clause pushed *next*, so they read the way the expression does:
//!
//! ```ignore
//! where_clause.eq("a", 1)?.and()?.eq("b", 2)?;
//! ```
//!
//! Clauses can also be built without touching the stack through [`Where::expr`] and combined
//! explicitly with [`Where::and_of`] and friends. Both forms produce the same tree.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

use super::{
    ExpressionBuilder, SqlBuilder,
    argument::{ArgumentHolder, BoundArgument, SelectArg, ThreadLocalSelectArg},
    clause::{BoundOperand, Clause, ComparisonOp},
};
use crate::field::FieldDescriptor;
use crate::orm_error::OrmError;
use crate::table::TableInfo;
use crate::value::Value;

/// The right-hand side of a predicate
#[derive(Debug, Clone)]
pub enum Operand {
    Value(Value),
    /// A holder whose value may be set (or changed) after the statement is built
    Argument(Arc<dyn ArgumentHolder>),
    /// Another column of the same table
    Column(String),
}

impl Operand {
    pub fn column(name: impl Into<String>) -> Self {
        Operand::Column(name.into())
    }
}

macro_rules! operand_from {
    ($($typ:ty),* $(,)?) => {
        $(
            impl From<$typ> for Operand {
                fn from(v: $typ) -> Self {
                    Operand::Value(v.into())
                }
            }
        )*
    };
}

operand_from!(
    Value,
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    f32,
    f64,
    String,
    Vec<u8>,
    Uuid,
    DateTime<Utc>,
    DateTime<FixedOffset>,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
);

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Operand::Value(v.into())
    }
}

impl From<Arc<dyn ArgumentHolder>> for Operand {
    fn from(holder: Arc<dyn ArgumentHolder>) -> Self {
        Operand::Argument(holder)
    }
}

impl From<Arc<SelectArg>> for Operand {
    fn from(holder: Arc<SelectArg>) -> Self {
        Operand::Argument(holder)
    }
}

impl From<Arc<ThreadLocalSelectArg>> for Operand {
    fn from(holder: Arc<ThreadLocalSelectArg>) -> Self {
        Operand::Argument(holder)
    }
}

/// Bind `value` to a new argument for `field`, validating it against the field's data kind
pub(crate) fn bind_value(
    field: &Arc<FieldDescriptor>,
    value: Value,
) -> Result<BoundArgument, OrmError> {
    if value.is_null() && !field.is_nullable() {
        return Err(OrmError::TypeMismatch {
            column: field.column_name().to_string(),
            expected: "a non-null value".to_string(),
            value: value.to_string(),
        });
    }

    let value = field.coerce_operand(value)?;
    field.to_sql_argument(&value)?;

    let arg = SelectArg::with_value(value);
    arg.set_metadata(field.column_name(), Some(field.clone()))?;
    Ok(BoundArgument::new(Arc::new(arg)))
}

/// Attach `holder` to `field` without requiring a value yet
pub(crate) fn bind_holder(
    field: &Arc<FieldDescriptor>,
    holder: Arc<dyn ArgumentHolder>,
) -> Result<BoundArgument, OrmError> {
    holder.set_metadata(field.column_name(), Some(field.clone()))?;
    Ok(BoundArgument::new(holder))
}

/// Builds clauses over one table without pushing them anywhere
#[derive(Debug, Clone, Copy)]
pub struct Expr<'t> {
    table: &'t TableInfo,
}

impl<'t> Expr<'t> {
    pub fn new(table: &'t TableInfo) -> Self {
        Self { table }
    }

    fn field(&self, column: &str) -> Result<&'t Arc<FieldDescriptor>, OrmError> {
        self.table.field_or_err(column)
    }

    fn comparable_field(&self, column: &str) -> Result<&'t Arc<FieldDescriptor>, OrmError> {
        let field = self.field(column)?;
        if !field.data_kind().is_comparable() {
            return Err(OrmError::TypeMismatch {
                column: column.to_string(),
                expected: "a comparable column".to_string(),
                value: format!("{} column", field.data_kind()),
            });
        }
        Ok(field)
    }

    fn bind_argument(
        &self,
        field: &Arc<FieldDescriptor>,
        operand: Operand,
    ) -> Result<BoundArgument, OrmError> {
        match operand {
            Operand::Value(value) if value.is_null() => Err(OrmError::TypeMismatch {
                column: field.column_name().to_string(),
                expected: "a non-null value (use is_null to compare with null)".to_string(),
                value: value.to_string(),
            }),
            Operand::Value(value) => bind_value(field, value),
            Operand::Argument(holder) => bind_holder(field, holder),
            Operand::Column(other) => Err(OrmError::TypeMismatch {
                column: field.column_name().to_string(),
                expected: "a value or an argument".to_string(),
                value: format!("column '{other}'"),
            }),
        }
    }

    fn comparison(
        &self,
        op: ComparisonOp,
        column: &str,
        operand: Operand,
    ) -> Result<Clause, OrmError> {
        let field = self.comparable_field(column)?;
        let is_numeric = field.data_kind().is_numeric();

        if op == ComparisonOp::Like && is_numeric {
            return Err(OrmError::TypeMismatch {
                column: column.to_string(),
                expected: "a textual column for LIKE".to_string(),
                value: format!("{} column", field.data_kind()),
            });
        }

        let operand = match operand {
            Operand::Column(other) => {
                self.comparable_field(&other)?;
                BoundOperand::Column(other)
            }
            operand => BoundOperand::Argument(self.bind_argument(field, operand)?),
        };

        Ok(Clause::Comparison {
            op,
            column: column.to_string(),
            is_numeric,
            operand,
        })
    }

    pub fn eq(&self, column: &str, operand: impl Into<Operand>) -> Result<Clause, OrmError> {
        self.comparison(ComparisonOp::Eq, column, operand.into())
    }

    pub fn ne(&self, column: &str, operand: impl Into<Operand>) -> Result<Clause, OrmError> {
        self.comparison(ComparisonOp::Ne, column, operand.into())
    }

    pub fn lt(&self, column: &str, operand: impl Into<Operand>) -> Result<Clause, OrmError> {
        self.comparison(ComparisonOp::Lt, column, operand.into())
    }

    pub fn le(&self, column: &str, operand: impl Into<Operand>) -> Result<Clause, OrmError> {
        self.comparison(ComparisonOp::Le, column, operand.into())
    }

    pub fn gt(&self, column: &str, operand: impl Into<Operand>) -> Result<Clause, OrmError> {
        self.comparison(ComparisonOp::Gt, column, operand.into())
    }

    pub fn ge(&self, column: &str, operand: impl Into<Operand>) -> Result<Clause, OrmError> {
        self.comparison(ComparisonOp::Ge, column, operand.into())
    }

    pub fn like(&self, column: &str, pattern: impl Into<Operand>) -> Result<Clause, OrmError> {
        self.comparison(ComparisonOp::Like, column, pattern.into())
    }

    /// Compare two columns of the table
    pub fn eq_column(&self, column: &str, other: &str) -> Result<Clause, OrmError> {
        self.comparison(ComparisonOp::Eq, column, Operand::column(other))
    }

    pub fn id_eq(&self, operand: impl Into<Operand>) -> Result<Clause, OrmError> {
        let id_column = self.table.id_field().column_name();
        self.eq(id_column, operand)
    }

    pub fn between(
        &self,
        column: &str,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Result<Clause, OrmError> {
        let field = self.comparable_field(column)?;
        Ok(Clause::Between {
            column: column.to_string(),
            is_numeric: field.data_kind().is_numeric(),
            low: self.bind_argument(field, low.into())?,
            high: self.bind_argument(field, high.into())?,
        })
    }

    fn in_list<T: Into<Operand>>(
        &self,
        column: &str,
        values: impl IntoIterator<Item = T>,
        negated: bool,
    ) -> Result<Clause, OrmError> {
        let field = self.comparable_field(column)?;
        let values = values
            .into_iter()
            .map(|value| self.bind_argument(field, value.into()))
            .collect::<Result<Vec<_>, _>>()?;

        if values.is_empty() {
            return Err(OrmError::invalid_field(
                column,
                "IN needs at least one value",
            ));
        }

        Ok(Clause::In {
            column: column.to_string(),
            is_numeric: field.data_kind().is_numeric(),
            negated,
            values,
        })
    }

    pub fn in_<T: Into<Operand>>(
        &self,
        column: &str,
        values: impl IntoIterator<Item = T>,
    ) -> Result<Clause, OrmError> {
        self.in_list(column, values, false)
    }

    pub fn not_in<T: Into<Operand>>(
        &self,
        column: &str,
        values: impl IntoIterator<Item = T>,
    ) -> Result<Clause, OrmError> {
        self.in_list(column, values, true)
    }

    pub fn is_null(&self, column: &str) -> Result<Clause, OrmError> {
        self.field(column)?;
        Ok(Clause::IsNull {
            column: column.to_string(),
        })
    }

    pub fn is_not_null(&self, column: &str) -> Result<Clause, OrmError> {
        self.field(column)?;
        Ok(Clause::IsNotNull {
            column: column.to_string(),
        })
    }

    /// A caller-written fragment. Each `?` in the fragment needs exactly one argument; the
    /// arguments aren't tied to a column, so values are bound in their natural wire form.
    pub fn raw(&self, fragment: &str, args: Vec<Operand>) -> Result<Clause, OrmError> {
        let markers = fragment.matches('?').count();
        if markers != args.len() {
            return Err(OrmError::RawArgumentMismatch {
                fragment: fragment.to_string(),
                markers,
                args: args.len(),
            });
        }

        let args = args
            .into_iter()
            .map(|arg| match arg {
                Operand::Value(value) => Ok(BoundArgument::new(Arc::new(SelectArg::with_value(
                    value,
                )))),
                Operand::Argument(holder) => Ok(BoundArgument::new(holder)),
                Operand::Column(column) => Err(OrmError::TypeMismatch {
                    column,
                    expected: "a value or an argument in a raw clause".to_string(),
                    value: "column reference".to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Clause::Raw {
            fragment: fragment.to_string(),
            args,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    And,
    Or,
}

impl Combinator {
    fn combine(self, left: Clause, right: Clause) -> Clause {
        match self {
            Combinator::And => Clause::and(left, right),
            Combinator::Or => Clause::or(left, right),
        }
    }
}

fn incomplete(reason: impl Into<String>, stack_size: usize) -> OrmError {
    OrmError::IncompleteWhereExpression {
        reason: reason.into(),
        stack_size,
    }
}

/// The WHERE part of a statement over one table.
///
/// A finished expression has exactly one clause on the stack and no combinator waiting for its
/// right-hand side. Anything else fails when the statement is prepared.
#[derive(Debug, Clone)]
pub struct Where<'t> {
    table: &'t TableInfo,
    stack: Vec<Clause>,
    /// An implicit `and()`/`or()` holding its left operand until the next clause arrives
    pending: Option<(Combinator, Clause)>,
    /// An implicit `not()` waiting for the next clause
    negate_next: bool,
}

impl<'t> Where<'t> {
    pub fn new(table: &'t TableInfo) -> Self {
        Self {
            table,
            stack: Vec::new(),
            pending: None,
            negate_next: false,
        }
    }

    pub fn table(&self) -> &'t TableInfo {
        self.table
    }

    /// A clause factory over the same table, for the explicit combinator form
    pub fn expr(&self) -> Expr<'t> {
        Expr::new(self.table)
    }

    fn waiting(&self) -> bool {
        self.pending.is_some() || self.negate_next
    }

    /// Size of the clause stack, counting a pending combinator's left operand
    pub fn stack_size(&self) -> usize {
        self.stack.len() + usize::from(self.pending.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty() && !self.waiting()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
        self.pending = None;
        self.negate_next = false;
    }

    /// Push a finished clause, resolving any implicit combinators waiting for it
    pub fn push(&mut self, clause: Clause) -> Result<&mut Self, OrmError> {
        let mut clause = clause;
        if self.negate_next {
            clause = Clause::not(clause);
            self.negate_next = false;
        }
        if let Some((combinator, left)) = self.pending.take() {
            clause = combinator.combine(left, clause);
        }
        self.stack.push(clause);
        Ok(self)
    }

    pub fn eq(&mut self, column: &str, operand: impl Into<Operand>) -> Result<&mut Self, OrmError> {
        let clause = self.expr().eq(column, operand)?;
        self.push(clause)
    }

    pub fn ne(&mut self, column: &str, operand: impl Into<Operand>) -> Result<&mut Self, OrmError> {
        let clause = self.expr().ne(column, operand)?;
        self.push(clause)
    }

    pub fn lt(&mut self, column: &str, operand: impl Into<Operand>) -> Result<&mut Self, OrmError> {
        let clause = self.expr().lt(column, operand)?;
        self.push(clause)
    }

    pub fn le(&mut self, column: &str, operand: impl Into<Operand>) -> Result<&mut Self, OrmError> {
        let clause = self.expr().le(column, operand)?;
        self.push(clause)
    }

    pub fn gt(&mut self, column: &str, operand: impl Into<Operand>) -> Result<&mut Self, OrmError> {
        let clause = self.expr().gt(column, operand)?;
        self.push(clause)
    }

    pub fn ge(&mut self, column: &str, operand: impl Into<Operand>) -> Result<&mut Self, OrmError> {
        let clause = self.expr().ge(column, operand)?;
        self.push(clause)
    }

    pub fn like(&mut self, column: &str, pattern: impl Into<Operand>) -> Result<&mut Self, OrmError> {
        let clause = self.expr().like(column, pattern)?;
        self.push(clause)
    }

    pub fn eq_column(&mut self, column: &str, other: &str) -> Result<&mut Self, OrmError> {
        let clause = self.expr().eq_column(column, other)?;
        self.push(clause)
    }

    pub fn id_eq(&mut self, operand: impl Into<Operand>) -> Result<&mut Self, OrmError> {
        let clause = self.expr().id_eq(operand)?;
        self.push(clause)
    }

    pub fn between(
        &mut self,
        column: &str,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Result<&mut Self, OrmError> {
        let clause = self.expr().between(column, low, high)?;
        self.push(clause)
    }

    pub fn in_<T: Into<Operand>>(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = T>,
    ) -> Result<&mut Self, OrmError> {
        let clause = self.expr().in_(column, values)?;
        self.push(clause)
    }

    pub fn not_in<T: Into<Operand>>(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = T>,
    ) -> Result<&mut Self, OrmError> {
        let clause = self.expr().not_in(column, values)?;
        self.push(clause)
    }

    pub fn is_null(&mut self, column: &str) -> Result<&mut Self, OrmError> {
        let clause = self.expr().is_null(column)?;
        self.push(clause)
    }

    pub fn is_not_null(&mut self, column: &str) -> Result<&mut Self, OrmError> {
        let clause = self.expr().is_not_null(column)?;
        self.push(clause)
    }

    pub fn raw(&mut self, fragment: &str, args: Vec<Operand>) -> Result<&mut Self, OrmError> {
        let clause = self.expr().raw(fragment, args)?;
        self.push(clause)
    }

    fn pend(&mut self, combinator: Combinator) -> Result<&mut Self, OrmError> {
        if self.waiting() {
            return Err(incomplete(
                "a combinator directly follows another combinator",
                self.stack_size(),
            ));
        }
        let Some(left) = self.stack.pop() else {
            return Err(incomplete("a combinator has no left-hand clause", 0));
        };
        self.pending = Some((combinator, left));
        Ok(self)
    }

    /// Combine the last clause with the next one using AND
    pub fn and(&mut self) -> Result<&mut Self, OrmError> {
        self.pend(Combinator::And)
    }

    /// Combine the last clause with the next one using OR
    pub fn or(&mut self) -> Result<&mut Self, OrmError> {
        self.pend(Combinator::Or)
    }

    /// Negate the next clause
    pub fn not(&mut self) -> Result<&mut Self, OrmError> {
        if self.negate_next {
            return Err(incomplete("not() follows another not()", self.stack_size()));
        }
        self.negate_next = true;
        Ok(self)
    }

    pub fn and_of(&mut self, left: Clause, right: Clause) -> Result<&mut Self, OrmError> {
        self.push(Clause::and(left, right))
    }

    pub fn or_of(&mut self, left: Clause, right: Clause) -> Result<&mut Self, OrmError> {
        self.push(Clause::or(left, right))
    }

    pub fn not_of(&mut self, inner: Clause) -> Result<&mut Self, OrmError> {
        self.push(Clause::not(inner))
    }

    fn pop_n(&mut self, n: usize, min: usize) -> Result<Vec<Clause>, OrmError> {
        if self.waiting() {
            return Err(incomplete(
                "an explicit combinator while an implicit one is waiting",
                self.stack_size(),
            ));
        }
        if n < min || self.stack.len() < n {
            return Err(incomplete(
                format!("can't combine {n} clauses"),
                self.stack.len(),
            ));
        }
        Ok(self.stack.split_off(self.stack.len() - n))
    }

    fn fold_last(
        &mut self,
        n: usize,
        combine: fn(Clause, Clause) -> Clause,
    ) -> Result<&mut Self, OrmError> {
        let mut clauses = self.pop_n(n, 2)?.into_iter();
        let combined = match clauses.next() {
            Some(first) => clauses.fold(first, combine),
            None => return Err(incomplete("nothing to combine", self.stack.len())),
        };
        self.push(combined)
    }

    /// AND together the last `n` clauses (n >= 2), in the order they were pushed
    pub fn and_n(&mut self, n: usize) -> Result<&mut Self, OrmError> {
        self.fold_last(n, Clause::and)
    }

    /// OR together the last `n` clauses (n >= 2), in the order they were pushed
    pub fn or_n(&mut self, n: usize) -> Result<&mut Self, OrmError> {
        self.fold_last(n, Clause::or)
    }

    /// Negate the last clause
    pub fn not_last(&mut self) -> Result<&mut Self, OrmError> {
        let mut clauses = self.pop_n(1, 1)?;
        match clauses.pop() {
            Some(inner) => self.push(Clause::not(inner)),
            None => Err(incomplete("nothing to negate", 0)),
        }
    }

    /// The finished expression
    pub fn clause(&self) -> Result<&Clause, OrmError> {
        if self.waiting() {
            return Err(incomplete(
                "a combinator is missing its right-hand clause",
                self.stack_size(),
            ));
        }
        match self.stack.as_slice() {
            [] => Err(OrmError::NoWhereClauseDefined),
            [clause] => Ok(clause),
            clauses => Err(incomplete(
                "clauses were not combined with and() or or()",
                clauses.len(),
            )),
        }
    }

    /// Push `WHERE <clause> `, or nothing if no clause was defined
    pub(crate) fn build_into(&self, builder: &mut SqlBuilder) -> Result<(), OrmError> {
        match self.clause() {
            Ok(clause) => {
                builder.push_str("WHERE ");
                clause.build(builder);
                Ok(())
            }
            Err(OrmError::NoWhereClauseDefined) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DatabaseDialect;
    use crate::persister::DataKind;
    use crate::sql_arg::SqlArg;

    fn table() -> TableInfo {
        TableInfo::new(
            &DatabaseDialect::generic(),
            "foo",
            vec![
                FieldDescriptor::new("id", DataKind::Long).generated_id(),
                FieldDescriptor::new("name", DataKind::String),
                FieldDescriptor::new("age", DataKind::Integer),
                FieldDescriptor::new("avatar", DataKind::ByteArray),
            ],
        )
        .unwrap()
    }

    fn render(where_clause: &Where) -> (String, Vec<BoundArgument>) {
        where_clause.clause().unwrap().to_sql(&DatabaseDialect::generic())
    }

    #[test]
    fn implicit_and_explicit_forms_agree() {
        let table = table();

        let mut implicit = Where::new(&table);
        implicit.eq("name", "bob").unwrap().and().unwrap().eq("age", 30).unwrap();

        let mut explicit = Where::new(&table);
        let expr = explicit.expr();
        explicit
            .and_of(expr.eq("name", "bob").unwrap(), expr.eq("age", 30).unwrap())
            .unwrap();

        let mut stacked = Where::new(&table);
        stacked.eq("name", "bob").unwrap().eq("age", 30).unwrap().and_n(2).unwrap();

        assert_eq!(implicit.clause().unwrap(), explicit.clause().unwrap());
        assert_eq!(implicit.clause().unwrap(), stacked.clause().unwrap());
        assert_binding!(
            render(&implicit),
            "(`name` = ? AND `age` = ? ) ",
            "bob",
            30
        );
    }

    #[test]
    fn dangling_predicates_are_incomplete() {
        let table = table();

        let mut where_clause = Where::new(&table);
        where_clause.eq("age", 1).unwrap().eq("age", 2).unwrap();

        assert!(matches!(
            where_clause.clause(),
            Err(OrmError::IncompleteWhereExpression { stack_size: 2, .. })
        ));
    }

    #[test]
    fn waiting_combinators_are_incomplete() {
        let table = table();

        let mut where_clause = Where::new(&table);
        where_clause.eq("age", 1).unwrap().or().unwrap();
        assert!(matches!(
            where_clause.clause(),
            Err(OrmError::IncompleteWhereExpression { stack_size: 1, .. })
        ));

        assert!(where_clause.and().is_err());
        assert!(Where::new(&table).and().is_err());
        assert!(matches!(
            Where::new(&table).clause(),
            Err(OrmError::NoWhereClauseDefined)
        ));
    }

    #[test]
    fn not_applies_to_the_next_clause() {
        let table = table();

        let mut where_clause = Where::new(&table);
        where_clause
            .eq("age", 1)
            .unwrap()
            .and()
            .unwrap()
            .not()
            .unwrap()
            .is_null("name")
            .unwrap();

        assert_binding!(
            render(&where_clause),
            "(`age` = ? AND (NOT `name` IS NULL ) ) ",
            1
        );

        let mut last = Where::new(&table);
        last.is_null("name").unwrap().not_last().unwrap();
        assert_binding!(render(&last), "(NOT `name` IS NULL ) ");
    }

    #[test]
    fn n_ary_combinators_fold_left() {
        let table = table();

        let mut where_clause = Where::new(&table);
        where_clause
            .eq("age", 1)
            .unwrap()
            .eq("age", 2)
            .unwrap()
            .eq("age", 3)
            .unwrap()
            .or_n(3)
            .unwrap();

        assert_binding!(
            render(&where_clause),
            "((`age` = ? OR `age` = ? ) OR `age` = ? ) ",
            1,
            2,
            3
        );

        assert!(where_clause.or_n(2).is_err());
        assert!(where_clause.and_n(1).is_err());
    }

    #[test]
    fn columns_are_validated() {
        let table = table();
        let mut where_clause = Where::new(&table);

        assert!(matches!(
            where_clause.eq("nope", 1),
            Err(OrmError::UnknownColumn { .. })
        ));
        assert!(matches!(
            where_clause.like("age", "1%"),
            Err(OrmError::TypeMismatch { .. })
        ));
        assert!(matches!(
            where_clause.eq("avatar", vec![1u8]),
            Err(OrmError::TypeMismatch { .. })
        ));
        assert!(matches!(
            where_clause.eq("age", Value::Null),
            Err(OrmError::TypeMismatch { .. })
        ));
        assert!(matches!(
            where_clause.eq("age", "old"),
            Err(OrmError::TypeMismatch { .. })
        ));
        assert!(where_clause.is_empty());
    }

    #[test]
    fn operands_are_coerced_to_the_column() {
        let table = table();
        let mut where_clause = Where::new(&table);
        where_clause.eq("age", "42").unwrap();

        let (_, args) = render(&where_clause);
        assert_eq!(args[0].sql_arg().unwrap(), SqlArg::Int(42));
    }

    #[test]
    fn other_predicates() {
        let table = table();

        let mut where_clause = Where::new(&table);
        where_clause
            .between("age", 18, 65)
            .unwrap()
            .and()
            .unwrap()
            .in_("name", ["a", "b"])
            .unwrap()
            .and()
            .unwrap()
            .eq_column("name", "id")
            .unwrap();

        assert_binding!(
            render(&where_clause),
            "((`age` BETWEEN ? AND ? AND `name` IN (?,?) ) AND `name` = `id` ) ",
            18,
            65,
            "a",
            "b"
        );

        assert!(Where::new(&table).in_("age", Vec::<i32>::new()).is_err());
    }

    #[test]
    fn raw_clauses_check_their_markers() {
        let table = table();
        let mut where_clause = Where::new(&table);

        assert!(matches!(
            where_clause.raw("age > ? AND age < ?", vec![1.into()]),
            Err(OrmError::RawArgumentMismatch {
                markers: 2,
                args: 1,
                ..
            })
        ));

        where_clause
            .raw("age > ? AND age < ?", vec![1.into(), 9.into()])
            .unwrap();
        assert_binding!(render(&where_clause), "age > ? AND age < ? ", 1, 9);
    }

    #[test]
    fn late_bound_arguments() {
        let table = table();
        let arg = Arc::new(SelectArg::new());

        let mut where_clause = Where::new(&table);
        where_clause.id_eq(arg.clone()).unwrap();

        let (sql, args) = render(&where_clause);
        assert_eq!(sql, "`id` = ? ");
        assert!(matches!(
            args[0].sql_arg(),
            Err(OrmError::UnsetArgument { .. })
        ));

        arg.set_value(Value::Long(7));
        assert_eq!(args[0].sql_arg().unwrap(), SqlArg::Long(7));
    }
}
