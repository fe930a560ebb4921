use crate::domain::model::{Booking, BookingId, Route, RouteId, Van, VanId};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// An entity with a stable identity.
pub trait Keyed {
    type Id: Clone + Eq + Hash;

    fn key(&self) -> &Self::Id;
}

impl Keyed for Van {
    type Id = VanId;

    fn key(&self) -> &VanId {
        &self.id
    }
}

impl Keyed for Route {
    type Id = RouteId;

    fn key(&self) -> &RouteId {
        &self.id
    }
}

impl Keyed for Booking {
    type Id = BookingId;

    fn key(&self) -> &BookingId {
        &self.id
    }
}

/// Insertion-ordered arena with an id index.
///
/// Items live in a `Vec` so iteration follows insertion order; `index` maps
/// each live id to its slot. Every id ever inserted is remembered in
/// `issued`, so a removed id can be told apart from one never seen.
#[derive(Debug, Clone)]
pub struct Collection<T: Keyed> {
    items: Vec<T>,
    index: HashMap<T::Id, usize>,
    issued: HashSet<T::Id>,
}

impl<T: Keyed> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
            issued: HashSet::new(),
        }
    }
}

impl<T: Keyed> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.index.contains_key(id)
    }

    /// Whether `id` is live now or was at some point.
    pub fn has_issued(&self, id: &T::Id) -> bool {
        self.issued.contains(id)
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.index.get(id).map(|&slot| &self.items[slot])
    }

    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        match self.index.get(id) {
            Some(&slot) => Some(&mut self.items[slot]),
            None => None,
        }
    }

    /// Appends `item`. Returns `false` and leaves the collection untouched
    /// if an item with the same id is already live.
    pub fn push(&mut self, item: T) -> bool {
        let id = item.key().clone();
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id.clone(), self.items.len());
        self.issued.insert(id);
        self.items.push(item);
        true
    }

    /// Removes the item with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let slot = self.index.remove(id)?;
        let removed = self.items.remove(slot);
        for item in &self.items[slot..] {
            if let Some(position) = self.index.get_mut(item.key()) {
                *position -= 1;
            }
        }
        Some(removed)
    }
}

impl<'a, T: Keyed> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
