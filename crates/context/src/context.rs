//! Task-scoped value bag.
//!
//! A [`Context`] carries values keyed by a type. Keys are usually private
//! zero-sized types, so only the module that owns a key can store or read
//! its value. Contexts are immutable: [`Context::with_value`] returns a new
//! context and leaves the original untouched.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Immutable, cheaply clonable value bag threaded through call parameters.
#[derive(Clone, Default)]
pub struct Context {
    values: HashMap<TypeId, Rc<dyn Any>>,
}

impl Context {
    /// An empty context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context that also carries `value` under key `K`.
    ///
    /// A value already stored under `K` is shadowed in the new context.
    pub fn with_value<K: 'static, V: 'static>(&self, value: V) -> Self {
        let mut values = self.values.clone();
        values.insert(TypeId::of::<K>(), Rc::new(value));
        Self { values }
    }

    /// The value stored under `K`, if present and of type `V`.
    pub fn value<K: 'static, V: 'static>(&self) -> Option<&V> {
        self.values
            .get(&TypeId::of::<K>())
            .and_then(|value| value.downcast_ref::<V>())
    }

    /// Number of keys carried.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Does the context carry no values?
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values.len())
            .finish()
    }
}
