// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Value slots behind statement placeholders.
//!
//! A prepared statement keeps its argument holders, so the caller can set new values and run the
//! same statement again without rebuilding it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};
use std::thread::{self, ThreadId};

use crate::field::FieldDescriptor;
use crate::orm_error::OrmError;
use crate::sql_arg::SqlArg;
use crate::value::Value;

#[derive(Debug, Clone)]
struct ArgumentMetadata {
    column_name: String,
    field: Option<Arc<FieldDescriptor>>,
}

/// A settable value bound to one placeholder.
///
/// Metadata (the column the argument is compared with) is attached once, when the argument is
/// used in a clause. The value can be set before or after that, but must be set before the
/// argument is consumed.
pub trait ArgumentHolder: Send + Sync + Debug {
    fn column_name(&self) -> Option<&str>;

    fn field(&self) -> Option<Arc<FieldDescriptor>>;

    /// Attach the column this argument is compared with. Attaching the same column again is a
    /// no-op; attaching a different one fails.
    fn set_metadata(
        &self,
        column_name: &str,
        field: Option<Arc<FieldDescriptor>>,
    ) -> Result<(), OrmError>;

    fn value(&self) -> Option<Value>;

    fn set_value(&self, value: Value);

    /// The value in its bound form. Fails with [`OrmError::UnsetArgument`] if no value has been
    /// set; a null has to be set explicitly.
    fn sql_arg(&self) -> Result<SqlArg, OrmError> {
        let Some(value) = self.value() else {
            return Err(OrmError::UnsetArgument {
                column: self.column_name().unwrap_or("<unbound>").to_string(),
            });
        };

        match self.field() {
            Some(field) => field.to_sql_argument(&value),
            None => Ok(SqlArg::from_untyped(&value)),
        }
    }
}

fn attach(
    slot: &OnceLock<ArgumentMetadata>,
    column_name: &str,
    field: Option<Arc<FieldDescriptor>>,
) -> Result<(), OrmError> {
    let metadata = slot.get_or_init(|| ArgumentMetadata {
        column_name: column_name.to_string(),
        field,
    });

    if metadata.column_name != column_name {
        return Err(OrmError::invalid_field(
            column_name,
            format!(
                "argument is already bound to column '{}'",
                metadata.column_name
            ),
        ));
    }
    Ok(())
}

/// An argument with a single value slot shared by all threads
#[derive(Debug, Default)]
pub struct SelectArg {
    metadata: OnceLock<ArgumentMetadata>,
    value: Mutex<Option<Value>>,
}

impl SelectArg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<Value>) -> Self {
        Self {
            metadata: OnceLock::new(),
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl ArgumentHolder for SelectArg {
    fn column_name(&self) -> Option<&str> {
        self.metadata.get().map(|m| m.column_name.as_str())
    }

    fn field(&self) -> Option<Arc<FieldDescriptor>> {
        self.metadata.get().and_then(|m| m.field.clone())
    }

    fn set_metadata(
        &self,
        column_name: &str,
        field: Option<Arc<FieldDescriptor>>,
    ) -> Result<(), OrmError> {
        attach(&self.metadata, column_name, field)
    }

    fn value(&self) -> Option<Value> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_value(&self, value: Value) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
    }
}

type ThreadSlots = Mutex<HashMap<ThreadId, Value>>;

fn lock_slots(slots: &ThreadSlots) -> MutexGuard<'_, HashMap<ThreadId, Value>> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drops the exiting thread's values from every [`ThreadLocalSelectArg`] it set a value on
struct ThreadExitGuard {
    thread: ThreadId,
    holders: RefCell<Vec<Weak<ThreadSlots>>>,
}

impl ThreadExitGuard {
    fn track(&self, slots: &Arc<ThreadSlots>) {
        let mut holders = self.holders.borrow_mut();
        holders.retain(|holder| holder.strong_count() > 0);
        let slots = Arc::downgrade(slots);
        if !holders.iter().any(|holder| holder.ptr_eq(&slots)) {
            holders.push(slots);
        }
    }
}

impl Drop for ThreadExitGuard {
    fn drop(&mut self) {
        for holder in self.holders.get_mut().drain(..) {
            if let Some(slots) = holder.upgrade() {
                lock_slots(&slots).remove(&self.thread);
            }
        }
    }
}

thread_local! {
    static EXIT_GUARD: ThreadExitGuard = ThreadExitGuard {
        thread: thread::current().id(),
        holders: RefCell::new(Vec::new()),
    };
}

/// An argument whose value is kept per calling thread, so that one prepared statement can be
/// re-parameterized concurrently. A thread sees only the value it set itself, and the value is
/// dropped when the thread exits.
#[derive(Debug, Default)]
pub struct ThreadLocalSelectArg {
    metadata: OnceLock<ArgumentMetadata>,
    values: Arc<ThreadSlots>,
}

impl ThreadLocalSelectArg {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the calling thread's value
    pub fn clear(&self) {
        lock_slots(&self.values).remove(&thread::current().id());
    }

    /// Number of threads currently holding a value
    pub fn thread_count(&self) -> usize {
        lock_slots(&self.values).len()
    }
}

impl ArgumentHolder for ThreadLocalSelectArg {
    fn column_name(&self) -> Option<&str> {
        self.metadata.get().map(|m| m.column_name.as_str())
    }

    fn field(&self) -> Option<Arc<FieldDescriptor>> {
        self.metadata.get().and_then(|m| m.field.clone())
    }

    fn set_metadata(
        &self,
        column_name: &str,
        field: Option<Arc<FieldDescriptor>>,
    ) -> Result<(), OrmError> {
        attach(&self.metadata, column_name, field)
    }

    fn value(&self) -> Option<Value> {
        lock_slots(&self.values)
            .get(&thread::current().id())
            .cloned()
    }

    fn set_value(&self, value: Value) {
        let first = lock_slots(&self.values)
            .insert(thread::current().id(), value)
            .is_none();
        if first {
            // Fails only once the thread's locals are being destroyed; the value then stays
            // until clear()
            let _ = EXIT_GUARD.try_with(|guard| guard.track(&self.values));
        }
    }
}

/// An argument as it appears in a built statement.
///
/// Cloning shares the underlying holder. Two bound arguments are equal when they are bound to the
/// same column and currently hold the same value.
#[derive(Debug, Clone)]
pub struct BoundArgument {
    holder: Arc<dyn ArgumentHolder>,
}

impl BoundArgument {
    pub fn new(holder: Arc<dyn ArgumentHolder>) -> Self {
        Self { holder }
    }

    pub fn holder(&self) -> &Arc<dyn ArgumentHolder> {
        &self.holder
    }

    pub fn column_name(&self) -> Option<&str> {
        self.holder.column_name()
    }

    pub fn field(&self) -> Option<Arc<FieldDescriptor>> {
        self.holder.field()
    }

    pub fn set_value(&self, value: impl Into<Value>) {
        self.holder.set_value(value.into());
    }

    pub fn sql_arg(&self) -> Result<SqlArg, OrmError> {
        self.holder.sql_arg()
    }
}

impl PartialEq for BoundArgument {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.holder, &other.holder)
            || (self.column_name() == other.column_name() && self.holder.value() == other.holder.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persister::DataKind;

    #[test]
    fn unset_arguments_fail() {
        let arg = SelectArg::new();
        arg.set_metadata("age", None).unwrap();

        assert!(matches!(
            arg.sql_arg(),
            Err(OrmError::UnsetArgument { ref column }) if column == "age"
        ));

        arg.set_value(Value::Null);
        assert_eq!(arg.sql_arg().unwrap(), SqlArg::Null);
    }

    #[test]
    fn values_convert_through_the_field() {
        let field = Arc::new(FieldDescriptor::new("active", DataKind::BooleanInteger));
        let arg = SelectArg::with_value(true);
        arg.set_metadata("active", Some(field)).unwrap();

        assert_eq!(arg.sql_arg().unwrap(), SqlArg::Int(1));
    }

    #[test]
    fn metadata_is_attached_once() {
        let arg = SelectArg::new();
        arg.set_metadata("a", None).unwrap();
        arg.set_metadata("a", None).unwrap();

        assert!(matches!(
            arg.set_metadata("b", None),
            Err(OrmError::InvalidFieldConfig { .. })
        ));
        assert_eq!(arg.column_name(), Some("a"));
    }

    #[test]
    fn thread_local_values_do_not_leak() {
        let arg = Arc::new(ThreadLocalSelectArg::new());
        arg.set_metadata("n", None).unwrap();
        arg.set_value(Value::Int(1));

        let handles: Vec<_> = (2..6)
            .map(|n| {
                let arg = arg.clone();
                thread::spawn(move || {
                    assert_eq!(arg.value(), None);
                    arg.set_value(Value::Int(n));
                    arg.sql_arg().unwrap()
                })
            })
            .collect();

        let mut seen: Vec<SqlArg> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        seen.sort_by_key(|arg| match arg {
            SqlArg::Int(n) => *n,
            _ => 0,
        });
        assert_eq!(
            seen,
            vec![SqlArg::Int(2), SqlArg::Int(3), SqlArg::Int(4), SqlArg::Int(5)]
        );
        assert_eq!(arg.sql_arg().unwrap(), SqlArg::Int(1));

        arg.clear();
        assert!(arg.sql_arg().is_err());
    }

    #[test]
    fn exited_threads_release_their_values() {
        let arg = Arc::new(ThreadLocalSelectArg::new());
        arg.set_value(Value::Int(0));

        for n in 0..50 {
            let arg = arg.clone();
            thread::spawn(move || {
                arg.set_value(Value::Int(n));
                arg.set_value(Value::Int(n + 1));
                assert_eq!(arg.thread_count(), 2);
            })
            .join()
            .unwrap();
        }

        // Only the value of the thread that is still alive remains
        assert_eq!(arg.thread_count(), 1);
        assert_eq!(arg.value(), Some(Value::Int(0)));
    }

    #[test]
    fn dropped_holders_are_not_kept_alive() {
        let first = ThreadLocalSelectArg::new();
        first.set_value(Value::Int(1));
        let slots = Arc::downgrade(&first.values);
        drop(first);

        assert!(slots.upgrade().is_none());

        let second = ThreadLocalSelectArg::new();
        second.set_value(Value::Int(2));
        assert_eq!(second.thread_count(), 1);
    }
}
