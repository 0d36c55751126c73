//! # bt-blackboard
//!
//! A shared, hierarchically scoped key-value store for exchanging typed data
//! between cooperating components, such as the nodes of a behavior tree,
//! without those components knowing each other's concrete types.
//!
//! - Values of any `Send + Sync + 'static` type are stored type-erased and
//!   read back with a checked downcast.
//! - Scopes form a tree; a child scope can remap a port to a port of its
//!   parent, and the remapping composes across levels.
//! - A port can be locked to a single type once established.
//! - All operations are synchronous and safe to call from many threads.
//!
//! ```
//! use bt_blackboard::{Blackboard, BlackboardError};
//!
//! let root = Blackboard::create(None);
//! root.declare::<u32>("retries").unwrap();
//! root.set("retries", 3u32).unwrap();
//!
//! let err = root.set("retries", 3.0f64).unwrap_err();
//! assert!(matches!(err, BlackboardError::TypeLockViolation { .. }));
//! assert_eq!(root.get::<u32>("retries").unwrap(), 3);
//! ```

pub mod blackboard;

pub use blackboard::{
    AnyValue, Blackboard, BlackboardConfig, BlackboardError, BlackboardPtr, EntrySnapshot,
    Result, TypeInfo,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
