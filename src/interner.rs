//! String interning for browsers and dates.
//!
//! Assigns dense integer ids to first-seen strings, preserving insertion
//! order. Built forward (string -> id) during the parse phase, then inverted
//! once into a plain `Vec` for rendering. No deletion, no re-interning.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Interner {
    ids: HashMap<String, u32>,
    values: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `value`, assigning `len` as the id on first sight.
    pub fn intern(&mut self, value: &str) -> u32 {
        if let Some(&id) = self.ids.get(value) {
            return id;
        }
        let id = self.values.len() as u32;
        self.ids.insert(value.to_owned(), id);
        self.values.push(value.to_owned());
        id
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// One-shot inversion: id -> value, indexed by id. Ids are contiguous
    /// `0..len`, so the table is a pure bijection.
    pub fn into_table(self) -> Vec<String> {
        self.values
    }
}
