// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#![cfg(test)]

//! Test assertion to check SQL statements and bound arguments.

/// Assert that the given bound arguments carry the expected values.
///
/// # Usage:
/// ```no_run
/// assert_args!(actual_args, expected_arg1, expected_arg2, ...);
/// ```
///
/// Each expected argument is converted with `SqlArg::from`, so plain Rust values work:
/// ```no_run
/// assert_args!(actual_args, 1, "hello");
/// ```
macro_rules! assert_args {
    ($actual_args:expr $(, $expected_arg:expr)* $(,)?) => {{
        let actual: Vec<$crate::SqlArg> = $actual_args
            .iter()
            .map(|arg| arg.sql_arg().unwrap())
            .collect();
        let expected: Vec<$crate::SqlArg> = vec![$($crate::SqlArg::from($expected_arg)),*];
        assert_eq!(actual, expected, "Argument mismatch");
    }};
}

/// Assert the statement text and its bound arguments in one go
macro_rules! assert_binding {
    ($actual:expr, $expected_stmt:expr $(, $expected_arg:expr)* $(,)?) => {{
        let (actual_stmt, actual_args) = $actual;
        assert_eq!(actual_stmt, $expected_stmt);
        assert_args!(actual_args $(, $expected_arg)*);
    }};
}
