// src/config/registry.rs

//! Insertion-ordered set of projections keyed by name.

use std::collections::HashMap;

use crate::config::expression::Projection;

/// Projections in the order they were declared; names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionRegistry {
    entries: Vec<Projection>,
    index: HashMap<String, usize>,
}

impl ProjectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a projection. The first projection with a given name wins; a
    /// later one is handed back unchanged as the error.
    pub fn insert(&mut self, projection: Projection) -> Result<(), Projection> {
        if self.index.contains_key(&projection.name) {
            return Err(projection);
        }
        self.index
            .insert(projection.name.clone(), self.entries.len());
        self.entries.push(projection);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Projection> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Projection> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.name.as_str())
    }
}

impl<'a> IntoIterator for &'a ProjectionRegistry {
    type Item = &'a Projection;
    type IntoIter = std::slice::Iter<'a, Projection>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
