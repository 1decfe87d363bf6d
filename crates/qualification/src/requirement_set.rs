//! The RequirementSet combines requirements with a strict AND.
//!
//! There is no partial credit and no OR mode: an actor passes only when every
//! requirement in the set is met.

use crate::outcome::{InteractionEvidence, Qualification, RequirementKind};
use crate::requirements::{FollowingRequirement, LikedRequirement, RecastedRequirement};
use crate::traits::Requirement;
use anyhow::{Result, anyhow};
use gate_types::Fid;

/// Ordered collection of requirements (builder pattern).
///
/// ## Usage
/// ```ignore
/// let requirements = RequirementSet::new()
///     .add_requirement(LikedRequirement)
///     .add_requirement(RecastedRequirement)
///     .add_requirement(FollowingRequirement::new(Fid(791835)));
///
/// let outcome = requirements.evaluate(actor, &evidence);
/// ```
pub struct RequirementSet {
    requirements: Vec<Box<dyn Requirement>>,
}

impl RequirementSet {
    /// Create a new empty RequirementSet.
    pub fn new() -> Self {
        Self {
            requirements: Vec::new(),
        }
    }

    /// Build a set from requirement kinds, in the given order.
    ///
    /// Duplicates are dropped. A follow requirement needs `followee`.
    pub fn from_kinds(kinds: &[RequirementKind], followee: Option<Fid>) -> Result<Self> {
        if kinds.is_empty() {
            return Err(anyhow!("At least one requirement is needed"));
        }

        let mut set = Self::new();
        let mut seen: Vec<RequirementKind> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if seen.contains(kind) {
                continue;
            }
            seen.push(*kind);

            set = match kind {
                RequirementKind::Like => set.add_requirement(LikedRequirement),
                RequirementKind::Recast => set.add_requirement(RecastedRequirement),
                RequirementKind::Follow => {
                    let followee = followee
                        .ok_or_else(|| anyhow!("Follow requirement needs a followee fid"))?;
                    set.add_requirement(FollowingRequirement::new(followee))
                }
            };
        }
        Ok(set)
    }

    /// Add a requirement to the set.
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_requirement(mut self, requirement: impl Requirement + 'static) -> Self {
        self.requirements.push(Box::new(requirement));
        self
    }

    pub fn kinds(&self) -> Vec<RequirementKind> {
        self.requirements.iter().map(|r| r.kind()).collect()
    }

    pub fn requires(&self, kind: RequirementKind) -> bool {
        self.requirements.iter().any(|r| r.kind() == kind)
    }

    /// Accounts whose follow status must be fetched, in requirement order.
    pub fn follow_targets(&self) -> Vec<Fid> {
        let mut targets: Vec<Fid> = Vec::new();
        for target in self.requirements.iter().filter_map(|r| r.follow_target()) {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
        targets
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Evaluate every requirement against the evidence.
    ///
    /// ## Algorithm
    /// 1. Run each requirement in order (all of them, so the outcome lists
    ///    every missing interaction, not only the first)
    /// 2. Qualified iff nothing is missing
    ///
    /// An empty set never qualifies anyone.
    pub fn evaluate(&self, actor: Fid, evidence: &InteractionEvidence) -> Qualification {
        if self.requirements.is_empty() {
            return Qualification::Indeterminate {
                reason: "no requirements configured".to_string(),
            };
        }

        let mut missing = Vec::new();
        for requirement in &self.requirements {
            let met = requirement.is_met(actor, evidence);
            tracing::debug!(
                "Requirement {} for fid {}: {}",
                requirement.name(),
                actor,
                if met { "met" } else { "not met" }
            );
            if !met {
                missing.push(requirement.kind());
            }
        }

        if missing.is_empty() {
            Qualification::Qualified
        } else {
            Qualification::NotQualified { missing }
        }
    }
}

impl Default for RequirementSet {
    fn default() -> Self {
        Self::new()
    }
}
