//! Blackboard — shared, typed port storage for cooperating tree nodes.
//!
//! Nodes exchange data through named ports without knowing each other's
//! concrete types. Values are stored type-erased ([`AnyValue`]) and read
//! back with a checked downcast, so a type mismatch surfaces as a typed
//! error rather than garbage.
//!
//! # Scopes and Remapping
//!
//! Blackboards form a tree. A subtree gets its own scope whose ports are
//! private unless remapped with
//! [`add_subtree_remapping`](Blackboard::add_subtree_remapping): a remapped
//! port forwards every read and write to a port of the parent scope, and the
//! forwarding composes across any number of levels. Children hold their
//! parent weakly and never keep it alive.
//!
//! # Type Locking
//!
//! A port may be locked to one type, either by an explicit declaration
//! ([`Blackboard::set_port_type`]) or, if configured, by its first write.
//! Once locked, the type never changes; writes of another type are rejected,
//! except for string values, which remain accepted so that textual
//! representations can be stored and parsed later.
//!
//! # Concurrency
//!
//! Every scope guards its state with a single mutex held for the duration of
//! one operation. Forwarding releases the child's lock before taking the
//! parent's, so scopes never deadlock on each other.

pub mod any_value;
pub mod config;
pub mod debug;
mod entry;
pub mod error;
pub mod view;

pub use any_value::{AnyValue, TypeInfo};
pub use config::BlackboardConfig;
pub use debug::EntrySnapshot;
pub use error::{BlackboardError, Result};
pub use view::{Blackboard, BlackboardPtr};
