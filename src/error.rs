//! Error types for structural audits of an [`OrderedMap`].
//!
//! Lookups and removals never fail: a missing key is an ordinary outcome and
//! is reported through `Option` or `bool`. The only error in this crate comes
//! from [`OrderedMap::validate`], which walks the whole tree and reports the
//! first broken invariant it finds.
//!
//! [`OrderedMap`]: crate::OrderedMap
//! [`OrderedMap::validate`]: crate::OrderedMap::validate

/// Represents a violated structural invariant of an [`OrderedMap`].
///
/// # Examples
///
/// ```rust
/// use bst_map::InvariantError;
///
/// let error = InvariantError::OutOfOrder { position: 3 };
/// assert_eq!(
///     format!("{error}"),
///     "in-order key at position 3 is not greater than its predecessor"
/// );
/// ```
///
/// [`OrderedMap`]: crate::OrderedMap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// The in-order traversal is not strictly ascending.
    OutOfOrder {
        /// Zero-based in-order position of the offending key.
        position: usize,
    },
    /// The cached length disagrees with the number of reachable nodes.
    LengthMismatch {
        /// The length the map reports.
        expected: usize,
        /// The number of nodes actually reachable from the root.
        actual: usize,
    },
}

impl std::fmt::Display for InvariantError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfOrder { position } => write!(
                formatter,
                "in-order key at position {position} is not greater than its predecessor"
            ),
            Self::LengthMismatch { expected, actual } => write!(
                formatter,
                "map reports {expected} entries but {actual} nodes are reachable"
            ),
        }
    }
}

impl std::error::Error for InvariantError {}
