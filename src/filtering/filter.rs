//! Filtering traits.

/// Stateless filter: equal inputs always give equal answers.
///
/// `detect` returns `true` when the item is kept.
pub trait Filter<T>: Default {
    fn detect(&self, item: T) -> bool;
}

/// Filter that remembers what it has seen (see [crate::processing::Deduplicator]).
///
/// Kept apart from [Filter] so that a type can implement both.
pub trait FilterMut<T>: Default {
    fn detect_mut(&mut self, item: T) -> bool;
}
