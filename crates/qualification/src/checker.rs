//! # Qualification Checker
//!
//! Runs one check for one actor:
//! 1. Fetch reactions on the target cast
//! 2. If any requirement needs it, fetch follow data (after step 1 finishes)
//! 3. Evaluate the requirement set
//!
//! Provider failures become `Qualification::Indeterminate`; they are logged
//! here and never propagated as errors.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use gate_types::{CastRef, Fid, FollowSet};
use hub_client::{ProviderError, ReactionProvider};

use crate::outcome::{InteractionEvidence, Qualification};
use crate::requirement_set::RequirementSet;

/// Checks actors against a fixed target and requirement set.
///
/// Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct QualificationChecker {
    provider: Arc<dyn ReactionProvider>,
    target: CastRef,
    requirements: Arc<RequirementSet>,
}

impl QualificationChecker {
    /// # Arguments
    /// * `provider` - Source of reaction and follow data
    /// * `target` - The cast whose likes/recasts are checked
    /// * `requirements` - What the actor must have done
    pub fn new(
        provider: Arc<dyn ReactionProvider>,
        target: CastRef,
        requirements: RequirementSet,
    ) -> Self {
        Self {
            provider,
            target,
            requirements: Arc::new(requirements),
        }
    }

    pub fn target(&self) -> &CastRef {
        &self.target
    }

    pub fn requirements(&self) -> &RequirementSet {
        &self.requirements
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Check `actor` and keep the three-way outcome.
    pub async fn check(&self, actor: Fid) -> Qualification {
        let start_time = Instant::now();

        let outcome = match self.gather_evidence(actor).await {
            Ok(evidence) => self.requirements.evaluate(actor, &evidence),
            Err(e) => {
                warn!(
                    "Could not check interactions for fid {} on {} via {}: {}",
                    actor,
                    self.target,
                    self.provider.name(),
                    e
                );
                Qualification::Indeterminate {
                    reason: e.to_string(),
                }
            }
        };

        info!(
            "Checked fid {} against {}: {} in {:.2?}",
            actor,
            self.target,
            outcome,
            start_time.elapsed()
        );
        outcome
    }

    /// Fail-closed boolean view of `check`: anything but `Qualified` is false.
    pub async fn check_interactions(&self, actor: Fid) -> bool {
        self.check(actor).await.is_qualified()
    }

    /// Fetch everything the requirement set needs, one call at a time.
    async fn gather_evidence(&self, actor: Fid) -> Result<InteractionEvidence, ProviderError> {
        let reactions = self.provider.fetch_reactions(&self.target).await?;
        let mut evidence = InteractionEvidence::new(reactions);

        let follow_targets = self.requirements.follow_targets();
        if !follow_targets.is_empty() {
            let mut follows = FollowSet::new();
            for followee in follow_targets {
                let fetched = self.provider.fetch_following(actor, followee).await?;
                for record in fetched.records() {
                    follows.insert(*record);
                }
            }
            evidence = evidence.with_follows(follows);
        }

        Ok(evidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::RequirementKind;
    use async_trait::async_trait;
    use gate_types::ReactionSet;
    use std::sync::Mutex;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    /// In-memory provider that records the order of calls it receives
    struct ScriptedProvider {
        likes: Vec<Fid>,
        recasts: Vec<Fid>,
        following: Vec<Fid>,
        fail_reactions: bool,
        fail_follows: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    impl ScriptedProvider {
        fn new(likes: &[u64], recasts: &[u64], following: &[u64]) -> Self {
            Self {
                likes: likes.iter().copied().map(Fid).collect(),
                recasts: recasts.iter().copied().map(Fid).collect(),
                following: following.iter().copied().map(Fid).collect(),
                fail_reactions: false,
                fail_follows: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReactionProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_reactions(&self, _target: &CastRef) -> Result<ReactionSet, ProviderError> {
            self.calls.lock().unwrap().push("reactions");
            if self.fail_reactions {
                return Err(ProviderError::Status {
                    status: 500,
                    url: "http://provider/reactions".into(),
                });
            }
            Ok(ReactionSet::from_fids(self.likes.clone(), self.recasts.clone()))
        }

        async fn fetch_following(
            &self,
            follower: Fid,
            _followee: Fid,
        ) -> Result<FollowSet, ProviderError> {
            self.calls.lock().unwrap().push("following");
            if self.fail_follows {
                return Err(ProviderError::InvalidUrl("http://provider/follows".into()));
            }
            Ok(FollowSet::from_following(follower, self.following.clone()))
        }
    }

    fn checker(provider: Arc<ScriptedProvider>, kinds: &[RequirementKind]) -> QualificationChecker {
        let requirements = RequirementSet::from_kinds(kinds, Some(Fid(791835))).unwrap();
        QualificationChecker::new(provider, CastRef::new("0x5d38e284").unwrap(), requirements)
    }

    const TWO: &[RequirementKind] = &[RequirementKind::Like, RequirementKind::Recast];
    const THREE: &[RequirementKind] = &[
        RequirementKind::Like,
        RequirementKind::Recast,
        RequirementKind::Follow,
    ];

    // ============================================================================
    // Unit Tests
    // ============================================================================

    #[tokio::test]
    async fn test_like_only_is_not_qualified() {
        let provider = Arc::new(ScriptedProvider::new(&[203, 11], &[11], &[]));
        let checker = checker(provider.clone(), TWO);

        let outcome = checker.check(Fid(203)).await;
        assert_eq!(
            outcome,
            Qualification::NotQualified {
                missing: vec![RequirementKind::Recast]
            }
        );
        assert!(!checker.check_interactions(Fid(203)).await);
    }

    #[tokio::test]
    async fn test_all_interactions_qualify() {
        let provider = Arc::new(ScriptedProvider::new(&[203], &[203], &[791835]));
        let checker = checker(provider.clone(), THREE);

        assert!(checker.check_interactions(Fid(203)).await);
    }

    #[tokio::test]
    async fn test_follow_fetched_after_reactions() {
        let provider = Arc::new(ScriptedProvider::new(&[203], &[203], &[791835]));
        let checker = checker(provider.clone(), THREE);

        checker.check(Fid(203)).await;
        assert_eq!(provider.calls(), vec!["reactions", "following"]);
    }

    #[tokio::test]
    async fn test_follow_not_fetched_when_not_required() {
        let provider = Arc::new(ScriptedProvider::new(&[203], &[203], &[]));
        let checker = checker(provider.clone(), TWO);

        assert!(checker.check_interactions(Fid(203)).await);
        assert_eq!(provider.calls(), vec!["reactions"]);
    }

    #[tokio::test]
    async fn test_reaction_failure_is_indeterminate() {
        let mut scripted = ScriptedProvider::new(&[203], &[203], &[791835]);
        scripted.fail_reactions = true;
        let provider = Arc::new(scripted);
        let checker = checker(provider.clone(), THREE);

        let outcome = checker.check(Fid(203)).await;
        assert!(outcome.is_indeterminate());
        assert!(!outcome.is_qualified());
        // No follow call once the first call failed
        assert_eq!(provider.calls(), vec!["reactions"]);
    }

    #[tokio::test]
    async fn test_follow_failure_fails_closed() {
        let mut scripted = ScriptedProvider::new(&[203], &[203], &[791835]);
        scripted.fail_follows = true;
        let checker = checker(Arc::new(scripted), THREE);

        assert!(checker.check(Fid(203)).await.is_indeterminate());
        assert!(!checker.check_interactions(Fid(203)).await);
    }
}
