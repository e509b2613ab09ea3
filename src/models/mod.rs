//! Domain models for near-Earth objects and their close approaches
//!
//! A `NearEarthObject` maintains a collection of its close approaches, and a
//! `CloseApproach` maintains a reference to its NEO. Both references are
//! stored as arena handles (`NeoId`, `ApproachId`) into the vectors owned by
//! `NeoDatabase`, which keeps traversal O(1) in both directions without an
//! ownership cycle. The handles are set exclusively by the database's linkage
//! pass — never during model construction.

mod approach;
mod neo;

pub use approach::CloseApproach;
pub use neo::NearEarthObject;

/// Handle to a `NearEarthObject` slot in the database arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeoId(pub(crate) usize);

/// Handle to a `CloseApproach` slot in the database arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApproachId(pub(crate) usize);
