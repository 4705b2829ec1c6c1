//! Query traits implemented per primitive pair.
//!
//! Each supported pair of primitives gets its own trait implementation;
//! there are no blanket implementations, so asking for a query on an
//! unsupported pair is a compile error rather than a silent fallback.
//!
//! Result aggregates implement [`Default`] as the documented
//! "no intersection / zero distance" state, and query code only writes
//! fields on the paths that produce them. Queries that cache workspace
//! between calls (the point-polyhedron LCP query) are standalone structs
//! taken by `&mut` instead of trait implementations, which keeps the
//! lifetime of the cache explicit at the call site.

/// Distance-and-closest-point query between `self` and `Rhs`.
pub trait Distance<Rhs> {
    /// Result aggregate for this primitive pair.
    type Output;

    /// Computes the distance and the closest point pair(s).
    fn distance(&self, other: &Rhs) -> Self::Output;
}

/// Boolean intersection test between `self` and `Rhs`.
///
/// Implementations are strictly cheaper than the corresponding
/// [`FindIntersection`]: sign tests and separating axes only, no
/// intersection-point construction.
pub trait TestIntersection<Rhs> {
    /// Returns `true` when the primitives intersect.
    fn test_intersection(&self, other: &Rhs) -> bool;
}

/// Full intersection-set query between `self` and `Rhs`.
pub trait FindIntersection<Rhs> {
    /// Result aggregate for this primitive pair.
    type Output;

    /// Computes the intersection set.
    fn find_intersection(&self, other: &Rhs) -> Self::Output;
}
