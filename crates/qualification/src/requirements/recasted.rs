//! Requirement that the actor has recast the target cast.

use crate::outcome::{InteractionEvidence, RequirementKind};
use crate::traits::Requirement;
use gate_types::Fid;

pub struct RecastedRequirement;

impl Requirement for RecastedRequirement {
    fn name(&self) -> &str {
        "RecastedRequirement"
    }

    fn kind(&self) -> RequirementKind {
        RequirementKind::Recast
    }

    fn is_met(&self, actor: Fid, evidence: &InteractionEvidence) -> bool {
        evidence.reactions.has_recast(actor)
    }
}
