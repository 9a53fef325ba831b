// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::{Display, Formatter};

use super::{ExpressionBuilder, SqlBuilder, argument::BoundArgument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

impl Display for ComparisonOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Ne => "<>",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Like => "LIKE",
        })
    }
}

/// The right-hand side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum BoundOperand {
    Argument(BoundArgument),
    Column(String),
}

/// One node of a WHERE expression tree.
///
/// Every node renders with a trailing space, so nodes can be concatenated without separators.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Comparison {
        op: ComparisonOp,
        column: String,
        /// Comparison semantics of the column (numeric vs textual)
        is_numeric: bool,
        operand: BoundOperand,
    },
    Between {
        column: String,
        is_numeric: bool,
        low: BoundArgument,
        high: BoundArgument,
    },
    In {
        column: String,
        is_numeric: bool,
        negated: bool,
        values: Vec<BoundArgument>,
    },
    IsNull {
        column: String,
    },
    IsNotNull {
        column: String,
    },
    And(Box<Clause>, Box<Clause>),
    Or(Box<Clause>, Box<Clause>),
    Not(Box<Clause>),
    /// Caller-supplied text; `args` line up with the `?` markers in `fragment`
    Raw {
        fragment: String,
        args: Vec<BoundArgument>,
    },
}

impl Clause {
    pub fn and(left: Clause, right: Clause) -> Clause {
        Clause::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Clause, right: Clause) -> Clause {
        Clause::Or(Box::new(left), Box::new(right))
    }

    pub fn not(inner: Clause) -> Clause {
        Clause::Not(Box::new(inner))
    }

    /// Number of arguments bound in this tree
    pub fn argument_count(&self) -> usize {
        match self {
            Clause::Comparison { operand, .. } => match operand {
                BoundOperand::Argument(_) => 1,
                BoundOperand::Column(_) => 0,
            },
            Clause::Between { .. } => 2,
            Clause::In { values, .. } => values.len(),
            Clause::IsNull { .. } | Clause::IsNotNull { .. } => 0,
            Clause::And(left, right) | Clause::Or(left, right) => {
                left.argument_count() + right.argument_count()
            }
            Clause::Not(inner) => inner.argument_count(),
            Clause::Raw { args, .. } => args.len(),
        }
    }
}

fn logical_combine(builder: &mut SqlBuilder, left: &Clause, right: &Clause, op: &str) {
    builder.push('(');
    left.build(builder);
    builder.push_str(op);
    builder.push_space();
    right.build(builder);
    builder.push_str(") ");
}

impl ExpressionBuilder for Clause {
    fn build(&self, builder: &mut SqlBuilder) {
        match self {
            Clause::Comparison {
                op,
                column,
                operand,
                ..
            } => {
                builder.push_identifier(column);
                builder.push_space();
                builder.push_str(op.to_string());
                builder.push_space();
                match operand {
                    BoundOperand::Argument(arg) => builder.push_argument(arg.clone()),
                    BoundOperand::Column(other) => builder.push_identifier(other),
                }
                builder.push_space();
            }
            Clause::Between {
                column, low, high, ..
            } => {
                builder.push_identifier(column);
                builder.push_str(" BETWEEN ");
                builder.push_argument(low.clone());
                builder.push_str(" AND ");
                builder.push_argument(high.clone());
                builder.push_space();
            }
            Clause::In {
                column,
                negated,
                values,
                ..
            } => {
                builder.push_identifier(column);
                builder.push_str(if *negated { " NOT IN (" } else { " IN (" });
                builder.push_iter(values.iter(), ",", |builder, arg| {
                    builder.push_argument(arg.clone())
                });
                builder.push_str(") ");
            }
            Clause::IsNull { column } => {
                builder.push_identifier(column);
                builder.push_str(" IS NULL ");
            }
            Clause::IsNotNull { column } => {
                builder.push_identifier(column);
                builder.push_str(" IS NOT NULL ");
            }
            Clause::And(left, right) => logical_combine(builder, left, right, "AND"),
            Clause::Or(left, right) => logical_combine(builder, left, right, "OR"),
            Clause::Not(inner) => {
                builder.push_str("(NOT ");
                inner.build(builder);
                builder.push_str(") ");
            }
            Clause::Raw { fragment, args } => {
                builder.push_str(fragment);
                for arg in args {
                    builder.add_argument(arg.clone());
                }
                builder.push_space();
            }
        }
    }
}
