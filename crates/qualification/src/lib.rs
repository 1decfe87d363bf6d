//! Qualification logic for the interaction gate.
//!
//! This crate provides:
//! - Requirement trait and implementations (liked, recasted, following)
//! - RequirementSet for combining requirements with a strict AND
//! - QualificationChecker for fetching evidence and producing an outcome
//!
//! ## Architecture
//! A check runs in stages:
//! 1. The checker fetches reactions on the target cast from the provider
//! 2. Follow data is fetched only if a requirement asks for it
//! 3. Each requirement is evaluated against the gathered evidence
//! 4. Provider errors short-circuit to `Qualification::Indeterminate`
//!
//! ## Example Usage
//! ```ignore
//! use qualification::{QualificationChecker, RequirementKind, RequirementSet};
//!
//! let requirements = RequirementSet::from_kinds(
//!     &[RequirementKind::Like, RequirementKind::Recast, RequirementKind::Follow],
//!     Some(Fid(791835)),
//! )?;
//! let checker = QualificationChecker::new(provider, cast, requirements);
//!
//! match checker.check(Fid(203)).await {
//!     Qualification::Qualified => { /* welcome */ }
//!     Qualification::NotQualified { missing } => { /* ask for `missing` */ }
//!     Qualification::Indeterminate { .. } => { /* provider failed */ }
//! }
//! ```

pub mod checker;
pub mod outcome;
pub mod requirement_set;
pub mod requirements;
pub mod traits;

// Re-export main types
pub use checker::QualificationChecker;
pub use outcome::{InteractionEvidence, Qualification, RequirementKind};
pub use requirement_set::RequirementSet;
pub use traits::Requirement;
