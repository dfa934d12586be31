//! Type-erased argument values.
//!
//! Proxies record their arguments as [`Value`]s so one history can hold calls
//! of every member regardless of parameter types. A value remembers its
//! concrete type and can be compared, printed and downcast again.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Bound every contract parameter type has to satisfy.
pub trait Argument: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T> Argument for T where T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

/// Object-safe view of an [`Argument`].
pub trait ArgValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq_value(&self, other: &dyn ArgValue) -> bool;
}

impl<T> ArgValue for T
where
    T: Any + PartialEq + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_value(&self, other: &dyn ArgValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }
}

/// A recorded or captured argument value.
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn ArgValue>,
    type_id: TypeId,
    type_name: &'static str,
}

impl Value {
    pub fn new<T: Argument>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.as_ref().as_any().downcast_ref::<T>()
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.inner.eq_value(other.inner.as_ref())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner.as_ref(), f)
    }
}

/// The ordered arguments of one recorded call.
#[derive(Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<Value>,
}

impl Args {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The argument at `index` viewed as a `T`; `None` when the index is out
    /// of bounds or the argument has another type.
    pub fn get<T: 'static>(&self, index: usize) -> Option<&T> {
        self.values.get(index)?.downcast_ref::<T>()
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple("");
        for value in self.values.iter() {
            tuple.field(value);
        }
        tuple.finish()
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}
