//! # Gate Types Crate
//!
//! Domain types shared by the provider adapters, the qualification checker
//! and the frame server.
//!
//! ## Main Components
//!
//! - **types**: identifiers (`Fid`, `CastRef`) and the read-only records a
//!   provider returns (`ReactionSet`, `FollowSet`)
//! - **error**: error type for identifier parsing
//!
//! ## Example Usage
//!
//! ```ignore
//! use gate_types::{Fid, ReactionSet};
//!
//! let reactions = ReactionSet::from_fids([Fid(203), Fid(11)], [Fid(11)]);
//! assert!(reactions.has_liked(Fid(203)));
//! assert!(!reactions.has_recast(Fid(203)));
//! ```

pub mod error;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{GateTypesError, Result};
pub use types::{
    CastRef,
    Fid,
    FollowRecord,
    FollowSet,
    ReactionKind,
    ReactionRecord,
    ReactionSet,
};
