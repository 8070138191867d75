use std::collections::HashMap;
use std::hash::Hash;

use crate::types::{Client, Pet, Product, Service};

/// An entity that can be looked up by a natural key and shown by name.
pub trait Keyed {
    type Key: ?Sized + Eq + Hash;

    fn key(&self) -> &Self::Key;
    fn name(&self) -> &str;
}

impl Keyed for Client {
    type Key = str;

    fn key(&self) -> &str {
        &self.cpf
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Keyed for Pet {
    type Key = u64;

    fn key(&self) -> &u64 {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Keyed for Product {
    type Key = str;

    fn key(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Keyed for Service {
    type Key = str;

    fn key(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Borrowed key → entity map over one collection.
///
/// Duplicate keys keep the first entity, like a linear search would.
pub struct Index<'a, T: Keyed> {
    by_key: HashMap<&'a T::Key, &'a T>,
}

impl<'a, T: Keyed> Index<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        let mut by_key = HashMap::with_capacity(items.len());
        for item in items {
            by_key.entry(item.key()).or_insert(item);
        }
        Self { by_key }
    }

    pub fn get(&self, key: &T::Key) -> Option<&'a T> {
        self.by_key.get(key).copied()
    }

    pub fn name_of(&self, key: &T::Key) -> Option<&'a str> {
        self.get(key).map(|item| item.name())
    }
}

/// All four reference lookups built from one snapshot.
pub struct ReferenceIndex<'a> {
    pub clients: Index<'a, Client>,
    pub pets: Index<'a, Pet>,
    pub products: Index<'a, Product>,
    pub services: Index<'a, Service>,
}

impl<'a> ReferenceIndex<'a> {
    pub fn new(
        clients: &'a [Client],
        pets: &'a [Pet],
        products: &'a [Product],
        services: &'a [Service],
    ) -> Self {
        Self {
            clients: Index::new(clients),
            pets: Index::new(pets),
            products: Index::new(products),
            services: Index::new(services),
        }
    }
}
