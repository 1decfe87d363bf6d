//! Core trait for gate requirements.
//!
//! This module defines the Requirement trait that lets the gate combine
//! independent interaction checks.

use crate::outcome::{InteractionEvidence, RequirementKind};
use gate_types::Fid;

/// A single condition an actor must satisfy to pass the gate.
///
/// ## Design Note
/// - `Send + Sync` so a `RequirementSet` can be shared across requests
/// - Requirements are pure: all I/O happens before `is_met` is called,
///   and the same evidence always gives the same answer
pub trait Requirement: Send + Sync {
    /// Returns the name of this requirement (for logging/debugging)
    fn name(&self) -> &str;

    fn kind(&self) -> RequirementKind;

    /// Account whose follow list must be fetched for this requirement, if any.
    fn follow_target(&self) -> Option<Fid> {
        None
    }

    /// Decide whether `actor` satisfies this requirement.
    ///
    /// # Arguments
    /// * `actor` - The account being checked
    /// * `evidence` - Reaction and follow data fetched for this actor
    fn is_met(&self, actor: Fid, evidence: &InteractionEvidence) -> bool;
}
