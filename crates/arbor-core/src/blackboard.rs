use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::marker::PhantomData;

use thiserror::Error;

/// Typed handle into a [`Blackboard`]. Keys are usually declared as constants:
///
/// ```
/// use arbor_core::BbKey;
/// const ELAPSED: BbKey<f32> = BbKey::new(1);
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    id: u64,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    pub fn id(self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackboardError {
    #[error("blackboard type mismatch for key id={id} (requested {requested})")]
    TypeMismatch { id: u64, requested: &'static str },
}

/// Per-tree scratch state shared by that tree's leaf callbacks across ticks.
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<u64, Box<dyn Any>>,
}

impl std::fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blackboard")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.values.contains_key(&key.id)
    }

    pub fn set<T: 'static>(&mut self, key: BbKey<T>, value: T) {
        self.values.insert(key.id, Box::new(value));
    }

    /// Like [`Blackboard::get`] but reports a type mismatch instead of panicking.
    pub fn try_get<T: 'static>(&self, key: BbKey<T>) -> Result<Option<&T>, BlackboardError> {
        let Some(value) = self.values.get(&key.id) else {
            return Ok(None);
        };
        value
            .downcast_ref::<T>()
            .map(Some)
            .ok_or(BlackboardError::TypeMismatch {
                id: key.id,
                requested: type_name::<T>(),
            })
    }

    /// # Panics
    ///
    /// Panics if the value stored under `key` has a different type.
    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// # Panics
    ///
    /// Panics if the value stored under `key` has a different type.
    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Option<&mut T> {
        let value = self.values.get_mut(&key.id)?;
        value.downcast_mut::<T>().or_else(|| {
            panic!(
                "{}",
                BlackboardError::TypeMismatch {
                    id: key.id,
                    requested: type_name::<T>(),
                }
            )
        })
    }

    /// Returns the stored value, inserting `make()` first if the key is absent.
    pub fn get_or_insert_with<T: 'static>(
        &mut self,
        key: BbKey<T>,
        make: impl FnOnce() -> T,
    ) -> &mut T {
        if !self.contains(key) {
            self.set(key, make());
        }
        match self.get_mut(key) {
            Some(value) => value,
            None => unreachable!("value inserted above"),
        }
    }

    /// # Panics
    ///
    /// Panics if the value stored under `key` has a different type.
    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Option<T> {
        let value = self.values.remove(&key.id)?;
        match value.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(_) => panic!(
                "{}",
                BlackboardError::TypeMismatch {
                    id: key.id,
                    requested: type_name::<T>(),
                }
            ),
        }
    }
}
