// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, argument::BoundArgument};
use crate::dialect::DatabaseDialect;

pub struct SqlBuilder<'d> {
    dialect: &'d DatabaseDialect,
    /// The SQL being built with a `?` placeholder for each argument
    sql: String,
    /// The arguments, in placeholder order
    arguments: Vec<BoundArgument>,
}

impl<'d> SqlBuilder<'d> {
    pub fn new(dialect: &'d DatabaseDialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            arguments: Vec::new(),
        }
    }

    pub fn dialect(&self) -> &'d DatabaseDialect {
        self.dialect
    }

    /// Push a string
    pub fn push_str<T: AsRef<str>>(&mut self, s: T) {
        self.sql.push_str(s.as_ref());
    }

    /// Push a character
    pub fn push(&mut self, c: char) {
        self.sql.push(c);
    }

    /// Push an identifier (table, column, sequence or index name) quoted the dialect's way
    pub fn push_identifier<T: AsRef<str>>(&mut self, s: T) {
        let quoted = self.dialect.quote_identifier(s.as_ref());
        self.sql.push_str(&quoted);
    }

    /// Push a space. This is a common operation, so it is provided as a separate method.
    pub fn push_space(&mut self) {
        self.sql.push(' ');
    }

    /// Push a placeholder and record the argument bound to it
    pub fn push_argument(&mut self, argument: BoundArgument) {
        self.arguments.push(argument);
        self.push('?');
    }

    /// Record an argument whose placeholder is already part of pushed text (raw fragments)
    pub fn add_argument(&mut self, argument: BoundArgument) {
        self.arguments.push(argument);
    }

    /// Push elements of an iterator, separated by `sep`. The `push_elem` function provides
    /// the flexibility to map the elements (compared to [`SqlBuilder::push_elems`], which assumes
    /// that the elements implement [`ExpressionBuilder`]).
    pub fn push_iter<T>(
        &mut self,
        iter: impl ExactSizeIterator<Item = T>,
        sep: &str,
        push_elem: impl Fn(&mut Self, T),
    ) {
        let len = iter.len();
        for (i, item) in iter.enumerate() {
            push_elem(self, item);

            if i < len - 1 {
                self.sql.push_str(sep);
            }
        }
    }

    /// Push elements of a slice, separated by `sep`
    pub fn push_elems<T: ExpressionBuilder>(&mut self, elems: &[T], sep: &str) {
        self.push_iter(elems.iter(), sep, |builder, elem| {
            elem.build(builder);
        });
    }

    /// Get the SQL string and the list of arguments. Calling this method should be the final
    /// step in building a statement, and thus this builder consumes `self`.
    pub fn into_sql(self) -> (String, Vec<BoundArgument>) {
        (self.sql, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_follow_the_dialect() {
        let generic = DatabaseDialect::generic();
        let mut builder = SqlBuilder::new(&generic);
        builder.push_iter(["a", "b"].into_iter(), ",", |builder, name| {
            builder.push_identifier(name)
        });
        assert_eq!(builder.into_sql().0, "`a`,`b`");

        let postgres = DatabaseDialect::postgres();
        let mut builder = SqlBuilder::new(&postgres);
        builder.push_identifier("a");
        assert_eq!(builder.into_sql().0, r#""a""#);
    }
}
