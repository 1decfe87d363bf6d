//! Requirement implementations.
//!
//! This module contains the concrete requirements that can be composed
//! into a RequirementSet.

pub mod following;
pub mod liked;
pub mod recasted;

// Re-export for convenience
pub use following::FollowingRequirement;
pub use liked::LikedRequirement;
pub use recasted::RecastedRequirement;
