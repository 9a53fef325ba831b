// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Statement text assembly.
//!
//! Every statement is rendered into a [`SqlBuilder`], which collects the text along with the
//! arguments bound to its `?` placeholders. Elements push exactly one placeholder per argument
//! they add, so the placeholders and the argument list always line up.

#[cfg(test)]
#[macro_use]
mod test_util;

pub(crate) mod argument;
pub(crate) mod clause;
pub(crate) mod delete;
pub(crate) mod insert;
pub(crate) mod prepared;
pub(crate) mod select;
pub(crate) mod sql_builder;
pub(crate) mod update;
pub(crate) mod where_builder;

pub use sql_builder::SqlBuilder;

use argument::BoundArgument;

use crate::dialect::DatabaseDialect;

/// A trait for types that can render themselves into statement text.
///
/// Each part of a statement (a clause, a column list, a whole select) implements this trait, so
/// that statements can be built hierarchically into one [`SqlBuilder`].
pub trait ExpressionBuilder {
    /// Build the SQL expression into the given SQL builder
    fn build(&self, builder: &mut SqlBuilder);

    /// Build the SQL expression into a string along with its arguments. Mostly useful for
    /// testing, where we want to assert on the generated SQL without setting up a builder.
    fn to_sql(&self, dialect: &DatabaseDialect) -> (String, Vec<BoundArgument>)
    where
        Self: Sized,
    {
        let mut builder = SqlBuilder::new(dialect);
        self.build(&mut builder);
        builder.into_sql()
    }
}

impl<T> ExpressionBuilder for Box<T>
where
    T: ExpressionBuilder,
{
    fn build(&self, builder: &mut SqlBuilder) {
        self.as_ref().build(builder)
    }
}

impl<T> ExpressionBuilder for &T
where
    T: ExpressionBuilder,
{
    fn build(&self, builder: &mut SqlBuilder) {
        (**self).build(builder)
    }
}
