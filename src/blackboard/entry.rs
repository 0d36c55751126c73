//! Blackboard entry — a single port in a blackboard scope.

use super::any_value::{AnyValue, TypeInfo};

/// A single entry in a blackboard scope.
///
/// Holds the current value (possibly empty) and the type the port is locked
/// to, if any. The lock only ever goes from `None` to `Some`.
#[derive(Debug, Clone, Default)]
pub(crate) struct Entry {
    pub value: AnyValue,
    pub locked_type: Option<TypeInfo>,
}

impl Entry {
    pub fn new(value: AnyValue, locked_type: Option<TypeInfo>) -> Self {
        Self { value, locked_type }
    }

    /// An entry with no value, carrying only a type marker.
    ///
    /// Used for remapped ports (the value lives in an ancestor) and for
    /// ports declared before their first write.
    pub fn placeholder(locked_type: Option<TypeInfo>) -> Self {
        Self {
            value: AnyValue::empty(),
            locked_type,
        }
    }

    /// The value, if one has been written.
    pub fn stored(&self) -> Option<&AnyValue> {
        if self.value.is_empty() {
            None
        } else {
            Some(&self.value)
        }
    }
}
