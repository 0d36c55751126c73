//! Blackboard error types.

use thiserror::Error;

/// Errors reported by blackboard reads and writes.
///
/// The blackboard never retries or recovers on its own; every failure is
/// returned to the immediate caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackboardError {
    /// The key resolved (after remapping) to no entry holding a value.
    #[error("Blackboard::get() error. Missing key [{key}]")]
    MissingKey { key: String },

    /// The stored value is not of the requested type.
    #[error("Blackboard::get() error. Key [{key}] holds [{stored}], requested [{requested}]")]
    BadCast {
        key: String,
        stored: String,
        requested: String,
    },

    /// A write carried an empty value.
    #[error("Blackboard::set() failed: empty value offered for key [{key}]")]
    EmptyValue { key: String },

    /// A write or declaration tried to change the locked type of a port.
    #[error(
        "Blackboard::set() failed: once declared, the type of a port shall not change. \
         Key [{key}]: declared type [{declared}] != current type [{offered}]"
    )]
    TypeLockViolation {
        key: String,
        declared: String,
        offered: String,
    },
}

impl BlackboardError {
    pub(crate) fn missing_key(key: &str) -> Self {
        Self::MissingKey {
            key: key.to_string(),
        }
    }
}

/// Result alias for blackboard operations.
pub type Result<T> = std::result::Result<T, BlackboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_display() {
        let e = BlackboardError::missing_key("goal");
        assert_eq!(e.to_string(), "Blackboard::get() error. Missing key [goal]");
    }

    #[test]
    fn test_bad_cast_display() {
        let e = BlackboardError::BadCast {
            key: "goal".into(),
            stored: "i32".into(),
            requested: "alloc::string::String".into(),
        };
        let display = e.to_string();
        assert!(display.contains("[goal]"));
        assert!(display.contains("[i32]"));
        assert!(display.contains("alloc::string::String"));
    }

    #[test]
    fn test_empty_value_display() {
        let e = BlackboardError::EmptyValue { key: "goal".into() };
        assert_eq!(
            e.to_string(),
            "Blackboard::set() failed: empty value offered for key [goal]"
        );
    }

    #[test]
    fn test_type_lock_violation_display() {
        let e = BlackboardError::TypeLockViolation {
            key: "speed".into(),
            declared: "f64".into(),
            offered: "bool".into(),
        };
        let display = e.to_string();
        assert!(display.contains("shall not change"));
        assert!(display.contains("declared type [f64]"));
        assert!(display.contains("current type [bool]"));
    }
}
