//! Blackboard — the shared, hierarchically scoped port store.
//!
//! A blackboard maps port names to type-erased values. Scopes form a tree:
//! a child created with a parent may remap one of its port names to a port
//! of the parent, in which case every read and write of that name is
//! forwarded up the chain until it reaches a scope that stores it locally.
//!
//! Each scope serializes access through its own mutex. Forwarding releases
//! the child's lock before touching the parent, and traversal only goes from
//! child to ancestor, so scopes never wait on each other in a cycle.

use std::any::Any;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::any_value::{AnyValue, TypeInfo};
use super::config::BlackboardConfig;
use super::debug::{render_dump, EntrySnapshot};
use super::entry::Entry;
use super::error::{BlackboardError, Result};

/// Shared handle to a blackboard scope.
pub type BlackboardPtr = Arc<Blackboard>;

#[derive(Debug, Default)]
struct Storage {
    entries: HashMap<String, Entry>,
    /// Local port name -> port name in the parent scope.
    remap: HashMap<String, String>,
}

/// A blackboard scope.
///
/// Created through [`Blackboard::create`], which returns a shared
/// [`BlackboardPtr`]. A child holds its parent weakly: once the parent is
/// dropped, remapped ports resolve locally.
///
/// # Example
///
/// ```
/// use bt_blackboard::blackboard::Blackboard;
///
/// let root = Blackboard::create(None);
/// let subtree = Blackboard::create(Some(&root));
/// subtree.add_subtree_remapping("target", "goal");
///
/// subtree.set("target", 42i32).unwrap();
/// assert_eq!(root.get::<i32>("goal").unwrap(), 42);
/// assert_eq!(subtree.get::<i32>("target").unwrap(), 42);
/// ```
pub struct Blackboard {
    storage: Mutex<Storage>,
    parent: Weak<Blackboard>,
    config: BlackboardConfig,
}

impl Blackboard {
    /// Create a new, empty scope.
    ///
    /// A child inherits its parent's configuration.
    pub fn create(parent: Option<&BlackboardPtr>) -> BlackboardPtr {
        let config = parent.map(|p| p.config).unwrap_or_default();
        Self::create_with_config(parent, config)
    }

    /// Create a new, empty scope with an explicit configuration.
    pub fn create_with_config(
        parent: Option<&BlackboardPtr>,
        config: BlackboardConfig,
    ) -> BlackboardPtr {
        Arc::new(Self {
            storage: Mutex::new(Storage::default()),
            parent: parent.map(Arc::downgrade).unwrap_or_default(),
            config,
        })
    }

    pub fn config(&self) -> BlackboardConfig {
        self.config
    }

    /// The parent scope, if one was given and is still alive.
    pub fn parent(&self) -> Option<BlackboardPtr> {
        self.parent.upgrade()
    }

    /// Where `key` is forwarded to, if it is remapped and the parent lives.
    fn forward_target(&self, storage: &Storage, key: &str) -> Option<(BlackboardPtr, String)> {
        let external = storage.remap.get(key)?;
        let parent = self.parent.upgrade()?;
        Some((parent, external.clone()))
    }

    // --- Read operations ---

    /// Access the type-erased value of `key`.
    ///
    /// Returns `None` for a key that resolves to no stored value. A returned
    /// value may still fail to downcast to the type the caller expects.
    pub fn get_erased(&self, key: &str) -> Option<AnyValue> {
        let storage = self.storage.lock();

        if let Some((parent, external)) = self.forward_target(&storage, key) {
            drop(storage);
            log::trace!("Blackboard: read of [{}] forwarded to parent [{}]", key, external);
            return parent.get_erased(&external);
        }

        storage.entries.get(key).and_then(Entry::stored).cloned()
    }

    /// Read `key` as `T`.
    ///
    /// Fails with [`BlackboardError::MissingKey`] if nothing is stored and
    /// [`BlackboardError::BadCast`] if the stored value is not a `T`.
    pub fn get<T: Any + Clone>(&self, key: &str) -> Result<T> {
        let value = self
            .get_erased(key)
            .ok_or_else(|| BlackboardError::missing_key(key))?;
        cast(key, &value)
    }

    /// Read `key` into `out`.
    ///
    /// Returns `Ok(false)` and leaves `out` untouched when nothing is
    /// stored. A stored value of the wrong type is still an error.
    pub fn try_get<T: Any + Clone>(&self, key: &str, out: &mut T) -> Result<bool> {
        match self.get_erased(key) {
            Some(value) => {
                *out = cast(key, &value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Read `key` as `T`, parsing it if a string was stored.
    ///
    /// This is the read-side counterpart of the string exemption: a port
    /// locked to a numeric type may hold `"42"`, which reads back as `42`.
    pub fn get_parsed<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr + Any + Clone,
        T::Err: std::fmt::Display,
    {
        let value = self
            .get_erased(key)
            .ok_or_else(|| BlackboardError::missing_key(key))?;

        if let Some(v) = value.downcast_ref::<T>() {
            return Ok(v.clone());
        }

        match value.as_str() {
            Some(text) => text.parse::<T>().map_err(|err| BlackboardError::BadCast {
                key: key.to_string(),
                stored: format!("{} {:?} ({})", value.type_name(), text, err),
                requested: std::any::type_name::<T>().to_string(),
            }),
            None => Err(bad_cast::<T>(key, &value)),
        }
    }

    // --- Write operations ---

    /// Write `value` to `key`.
    ///
    /// Fails with [`BlackboardError::TypeLockViolation`] if the port is
    /// locked to another type and `value` is not a string; the stored value
    /// is left unchanged in that case.
    pub fn set<T: Any + Send + Sync>(&self, key: impl Into<String>, value: T) -> Result<()> {
        self.set_inner(key.into(), TypeInfo::of::<T>(), AnyValue::new(value))
    }

    /// Write an already erased value to `key`.
    ///
    /// An empty value is rejected with [`BlackboardError::EmptyValue`] and
    /// the store is left unchanged.
    pub fn set_erased(&self, key: impl Into<String>, value: AnyValue) -> Result<()> {
        let key = key.into();
        let Some(requested) = value.type_info() else {
            let err = BlackboardError::EmptyValue { key };
            log::warn!("{}", err);
            return Err(err);
        };
        self.set_inner(key, requested, value)
    }

    fn set_inner(&self, key: String, requested: TypeInfo, value: AnyValue) -> Result<()> {
        let mut storage = self.storage.lock();

        if let Some((parent, external)) = self.forward_target(&storage, &key) {
            storage
                .entries
                .entry(key.clone())
                .or_insert_with(|| Entry::placeholder(Some(requested)));
            drop(storage);
            log::trace!("Blackboard: write of [{}] forwarded to parent [{}]", key, external);
            return parent.set_inner(external, requested, value);
        }

        match storage.entries.get_mut(&key) {
            Some(entry) => {
                if let Err(err) = check_lock(&self.config, &key, entry, requested, &value) {
                    log::warn!("{}", err);
                    return Err(err);
                }
                entry.value = value;
            }
            None => {
                let locked = self.config.lock_on_first_set.then_some(requested);
                log::trace!("Blackboard: new entry [{}] ({})", key, value.type_name());
                storage.entries.insert(key, Entry::new(value, locked));
            }
        }
        Ok(())
    }

    // --- Type declaration ---

    /// Lock the type of the local port `key`.
    ///
    /// Creates an empty entry if the key is unknown. Declaring the type a
    /// port is already locked to is a no-op; declaring a different one fails
    /// with [`BlackboardError::TypeLockViolation`] and keeps the first lock.
    /// A value stored before the declaration is not re-validated.
    pub fn set_port_type(&self, key: impl Into<String>, port_type: TypeInfo) -> Result<()> {
        let key = key.into();
        let mut storage = self.storage.lock();

        match storage.entries.get_mut(&key) {
            None => {
                log::debug!("Blackboard: declared [{}] as {}", key, port_type);
                storage.entries.insert(key, Entry::placeholder(Some(port_type)));
            }
            Some(entry) => match entry.locked_type {
                None => {
                    log::debug!("Blackboard: locked [{}] to {}", key, port_type);
                    entry.locked_type = Some(port_type);
                }
                Some(locked) if locked == port_type => {}
                Some(locked) => {
                    let err = BlackboardError::TypeLockViolation {
                        key,
                        declared: locked.name().to_string(),
                        offered: port_type.name().to_string(),
                    };
                    log::warn!("{}", err);
                    return Err(err);
                }
            },
        }
        Ok(())
    }

    /// Typed shorthand for [`set_port_type`](Self::set_port_type).
    pub fn declare<T: Any>(&self, key: impl Into<String>) -> Result<()> {
        self.set_port_type(key, TypeInfo::of::<T>())
    }

    /// The type the local port `key` is locked to, if any.
    ///
    /// For a remapped port this is the marker recorded by the first
    /// forwarded write.
    pub fn port_type(&self, key: &str) -> Option<TypeInfo> {
        self.storage
            .lock()
            .entries
            .get(key)
            .and_then(|e| e.locked_type)
    }

    // --- Remapping ---

    /// Forward `internal` on this scope to `external` on the parent scope.
    ///
    /// Replaces any earlier mapping of `internal`. Has no effect on a scope
    /// without a live parent.
    pub fn add_subtree_remapping(&self, internal: impl Into<String>, external: impl Into<String>) {
        let internal = internal.into();
        let external = external.into();
        log::debug!(
            "Blackboard: [{}] remapped to port of parent tree [{}]",
            internal,
            external
        );
        self.storage.lock().remap.insert(internal, external);
    }

    /// The parent port `key` is remapped to, if any.
    pub fn remapping(&self, key: &str) -> Option<String> {
        self.storage.lock().remap.get(key).cloned()
    }

    // --- Introspection ---

    /// Local keys, sorted. Remapped-only names are not included.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.storage.lock().entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Per-key view of this scope, sorted by key.
    pub fn snapshot(&self) -> Vec<EntrySnapshot> {
        let storage = self.storage.lock();

        let mut snapshots: Vec<EntrySnapshot> = storage
            .entries
            .iter()
            .map(|(key, entry)| {
                let stored = entry.stored();
                EntrySnapshot {
                    key: key.clone(),
                    locked_type: entry.locked_type.map(|t| t.name().to_string()),
                    value_type: stored.map(|v| v.type_name().to_string()),
                    value: stored.and_then(AnyValue::render),
                    remapped_to: storage.remap.get(key).cloned(),
                }
            })
            .collect();

        snapshots.extend(
            storage
                .remap
                .iter()
                .filter(|(internal, _)| !storage.entries.contains_key(*internal))
                .map(|(internal, external)| EntrySnapshot {
                    key: internal.clone(),
                    locked_type: None,
                    value_type: None,
                    value: None,
                    remapped_to: Some(external.clone()),
                }),
        );

        snapshots.sort_by(|a, b| a.key.cmp(&b.key));
        snapshots
    }

    /// Textual listing of keys, types, values and remappings.
    pub fn debug_dump(&self) -> String {
        render_dump(&self.snapshot())
    }

    /// Log [`debug_dump`](Self::debug_dump) at info level.
    pub fn debug_message(&self) {
        for line in self.debug_dump().lines() {
            log::info!("{}", line);
        }
    }
}

impl std::fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storage = self.storage.lock();
        f.debug_struct("Blackboard")
            .field("entries", &storage.entries.len())
            .field("remap", &storage.remap)
            .field("has_parent", &(self.parent.strong_count() > 0))
            .field("config", &self.config)
            .finish()
    }
}

fn cast<T: Any + Clone>(key: &str, value: &AnyValue) -> Result<T> {
    value
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| bad_cast::<T>(key, value))
}

fn bad_cast<T: Any>(key: &str, value: &AnyValue) -> BlackboardError {
    BlackboardError::BadCast {
        key: key.to_string(),
        stored: value.type_name().to_string(),
        requested: std::any::type_name::<T>().to_string(),
    }
}

/// Check a write of `value` against the lock of `entry`.
///
/// The write passes if the port is unlocked, if the lock matches either the
/// requested type or the value's own type, or if the value is a string and
/// the string exemption is enabled.
fn check_lock(
    config: &BlackboardConfig,
    key: &str,
    entry: &Entry,
    requested: TypeInfo,
    value: &AnyValue,
) -> Result<()> {
    let Some(locked) = entry.locked_type else {
        return Ok(());
    };
    if locked == requested || Some(locked) == value.type_info() {
        return Ok(());
    }
    if config.string_exemption && value.is_string() {
        return Ok(());
    }
    Err(BlackboardError::TypeLockViolation {
        key: key.to_string(),
        declared: locked.name().to_string(),
        offered: requested.name().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
