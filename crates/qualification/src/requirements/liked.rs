//! Requirement that the actor has liked the target cast.

use crate::outcome::{InteractionEvidence, RequirementKind};
use crate::traits::Requirement;
use gate_types::Fid;

/// Met when the actor appears in the cast's like list.
pub struct LikedRequirement;

impl Requirement for LikedRequirement {
    fn name(&self) -> &str {
        "LikedRequirement"
    }

    fn kind(&self) -> RequirementKind {
        RequirementKind::Like
    }

    fn is_met(&self, actor: Fid, evidence: &InteractionEvidence) -> bool {
        evidence.reactions.has_liked(actor)
    }
}
