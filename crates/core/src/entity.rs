//! Entity trait: identity of a stored document.

/// A flat document addressed by an identifier.
///
/// Stores key their collections by `Entity::Id`, so two documents with the
/// same id are the same document.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the document identifier.
    fn id(&self) -> Self::Id;
}
