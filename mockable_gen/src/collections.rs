//! A set that is safe for code generator use.
//!
//! *Do not add any IntoIterator impl to this.* Only insertion, which reports
//! membership, is exposed. Iteration order is not exposed.
//!
//! It's never correct for a code generator to produce nondeterministic output,
//! so iterating over a randomized hash based collection is bad.  Generated
//! declarations always follow source order; hashing is only used to detect
//! collisions.

use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug)]
pub struct UnorderedSet<T>(HashSet<T>);

impl<T> UnorderedSet<T>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        UnorderedSet(HashSet::new())
    }

    /// Returns `false` if the value was already present
    pub fn insert(&mut self, value: T) -> bool {
        self.0.insert(value)
    }
}

impl<T> Default for UnorderedSet<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
