//! Requirement that the actor follows a fixed account.
//!
//! This is the only requirement that needs a second provider call, so the
//! checker only fetches follow data when one of these is in the set.

use crate::outcome::{InteractionEvidence, RequirementKind};
use crate::traits::Requirement;
use gate_types::Fid;

/// Met when the evidence holds a follow record actor → followee.
///
/// Missing follow data counts as not following.
pub struct FollowingRequirement {
    followee: Fid,
}

impl FollowingRequirement {
    /// # Arguments
    /// * `followee` - The account the actor must follow
    pub fn new(followee: Fid) -> Self {
        Self { followee }
    }

    pub fn followee(&self) -> Fid {
        self.followee
    }
}

impl Requirement for FollowingRequirement {
    fn name(&self) -> &str {
        "FollowingRequirement"
    }

    fn kind(&self) -> RequirementKind {
        RequirementKind::Follow
    }

    fn follow_target(&self) -> Option<Fid> {
        Some(self.followee)
    }

    fn is_met(&self, actor: Fid, evidence: &InteractionEvidence) -> bool {
        evidence
            .follows
            .as_ref()
            .map(|follows| follows.contains(actor, self.followee))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_types::{FollowSet, ReactionSet};

    #[test]
    fn test_following_requirement() {
        let requirement = FollowingRequirement::new(Fid(791835));
        let evidence = InteractionEvidence::new(ReactionSet::new())
            .with_follows(FollowSet::from_following(Fid(203), [Fid(791835)]));

        assert!(requirement.is_met(Fid(203), &evidence));
        assert!(!requirement.is_met(Fid(204), &evidence));
        assert_eq!(requirement.follow_target(), Some(Fid(791835)));
    }

    #[test]
    fn test_missing_follow_data_is_not_met() {
        let requirement = FollowingRequirement::new(Fid(791835));
        let evidence = InteractionEvidence::new(ReactionSet::from_fids([Fid(203)], [Fid(203)]));

        assert!(!requirement.is_met(Fid(203), &evidence));
    }

    #[test]
    fn test_following_someone_else_is_not_met() {
        let requirement = FollowingRequirement::new(Fid(791835));
        let evidence = InteractionEvidence::new(ReactionSet::new())
            .with_follows(FollowSet::from_following(Fid(203), [Fid(1), Fid(2)]));

        assert!(!requirement.is_met(Fid(203), &evidence));
    }
}
