// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! # Tracing configuration setup.
//!
//! Statement construction is instrumented with Rust's `tracing` framework. Finished statements
//! are logged at `debug` level, bound argument values at `trace` level (only when
//! `EXO_ORM_LOG_ARGUMENTS` is enabled).
//!
//! Applications that already install a subscriber don't need this module. Others may call
//! [`init`], which reads the filter from the `EXO_ORM_LOG` environment variable using the same
//! conventions as `RUST_LOG`.

use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};

use crate::config::EXO_ORM_LOG;

/// Initialize a global tracing subscriber with a compact console layer.
///
/// Returns an error if a global subscriber has already been installed.
pub fn init() -> Result<(), tracing_subscriber::util::TryInitError> {
    let fmt_layer = tracing_subscriber::fmt::layer().compact();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(EXO_ORM_LOG)
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
}
