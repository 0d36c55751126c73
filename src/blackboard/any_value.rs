//! Type-erased blackboard value.
//!
//! Values of any `Send + Sync + 'static` type are shared between ports
//! through an `Arc<dyn Any + Send + Sync>`. The recorded [`TypeInfo`] lets
//! the blackboard compare a value against a locked port type without
//! knowing the concrete type, and lets readers fail with a typed error
//! instead of a silent `None`.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Run-time identity of a Rust type: its `TypeId` plus a readable name.
///
/// Equality and hashing use the `TypeId` only.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Identity of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by `std::any::type_name`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this is one of the string representations accepted by the
    /// string exemption of the type lock.
    pub fn is_string(&self) -> bool {
        self.id == TypeId::of::<String>()
            || self.id == TypeId::of::<&'static str>()
            || self.id == TypeId::of::<Arc<str>>()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeInfo({})", self.name)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A cheaply clonable holder for one value of unknown static type.
///
/// An `AnyValue` may be empty: placeholder entries created for remapped
/// ports carry a type marker but no value. Cloning shares the underlying
/// value; it is never mutated in place, so a clone handed to a reader stays
/// valid after a writer replaces the entry.
///
/// # Example
///
/// ```
/// use bt_blackboard::blackboard::AnyValue;
///
/// let value = AnyValue::new(42i32);
/// assert!(value.is::<i32>());
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
/// assert!(value.downcast_ref::<String>().is_none());
/// ```
#[derive(Clone, Default)]
pub struct AnyValue {
    inner: Option<Arc<dyn Any + Send + Sync>>,
    type_info: Option<TypeInfo>,
}

impl AnyValue {
    /// Erase `value`, recording its type.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Some(Arc::new(value)),
            type_info: Some(TypeInfo::of::<T>()),
        }
    }

    /// A holder with no value.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Type of the held value, `None` when empty.
    pub fn type_info(&self) -> Option<TypeInfo> {
        self.type_info
    }

    /// Type name of the held value, or `"<empty>"`.
    pub fn type_name(&self) -> &'static str {
        self.type_info.map(|t| t.name()).unwrap_or("<empty>")
    }

    /// Check if this holds a value of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.type_info == Some(TypeInfo::of::<T>())
    }

    /// Whether the held value is a string representation.
    pub fn is_string(&self) -> bool {
        self.type_info.map(|t| t.is_string()).unwrap_or(false)
    }

    /// Try to borrow the held value as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_deref().and_then(|v| v.downcast_ref::<T>())
    }

    /// Borrow the held value as text if it is a string representation.
    pub fn as_str(&self) -> Option<&str> {
        if let Some(s) = self.downcast_ref::<String>() {
            return Some(s.as_str());
        }
        if let Some(s) = self.downcast_ref::<&'static str>() {
            return Some(*s);
        }
        self.downcast_ref::<Arc<str>>().map(|s| &**s)
    }

    /// Render the value for diagnostics.
    ///
    /// Only strings, `bool`, `char` and the primitive numeric types can be
    /// rendered; anything else yields `None`.
    pub fn render(&self) -> Option<String> {
        if let Some(s) = self.as_str() {
            return Some(format!("{:?}", s));
        }

        macro_rules! render_as {
            ($($t:ty),*) => {
                $(
                    if let Some(v) = self.downcast_ref::<$t>() {
                        return Some(v.to_string());
                    }
                )*
            };
        }

        render_as!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
        None
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValue")
            .field("type", &self.type_name())
            .field("value", &self.render())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
