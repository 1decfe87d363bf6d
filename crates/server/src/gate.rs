//! # Interaction Gate Handler
//!
//! Decides which view a request gets:
//! 1. No `enter` press yet → Prompt (no provider calls)
//! 2. `enter` pressed without a fid → MissingFid (no provider calls)
//! 3. Otherwise run the qualification check and map its outcome
//!
//! Each request is independent; the handler holds only immutable state.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use gate_types::Fid;
use hub_client::{ReactionProvider, build_provider};
use qualification::{Qualification, QualificationChecker, RequirementSet};

use crate::config::{GateConfig, IndeterminatePolicy};
use crate::views::View;

/// Button value that starts a check
pub const ENTER_ACTION: &str = "enter";

/// The gate: previous action + actor in, view out
#[derive(Clone)]
pub struct GateHandler {
    checker: QualificationChecker,
    on_indeterminate: IndeterminatePolicy,
}

impl GateHandler {
    pub fn new(checker: QualificationChecker, on_indeterminate: IndeterminatePolicy) -> Self {
        Self {
            checker,
            on_indeterminate,
        }
    }

    /// Build the handler and its provider from validated configuration.
    pub fn from_config(config: &GateConfig) -> Result<Self> {
        let provider = build_provider(
            config.provider,
            config.api_key.clone(),
            config.api_base.as_deref(),
        )
        .context("Failed to build reaction provider")?;

        Self::with_provider(config, provider)
    }

    /// Same as `from_config` but with a caller-supplied provider.
    pub fn with_provider(config: &GateConfig, provider: Arc<dyn ReactionProvider>) -> Result<Self> {
        let requirements = RequirementSet::from_kinds(&config.requirements, config.followee)
            .context("Failed to build requirement set")?;
        let checker = QualificationChecker::new(provider, config.cast.clone(), requirements);

        info!(
            "Gate ready: provider={} cast={} requirements={:?}",
            checker.provider_name(),
            config.cast,
            config.requirements
        );
        Ok(Self::new(checker, config.on_indeterminate))
    }

    pub fn checker(&self) -> &QualificationChecker {
        &self.checker
    }

    /// Main entry point: pick the view for one frame request.
    ///
    /// # Arguments
    /// * `previous_action` - Value of the button that was pressed, if any
    /// * `actor` - Fid of the visitor, if the request carried one
    pub async fn render(&self, previous_action: Option<&str>, actor: Option<Fid>) -> View {
        if previous_action != Some(ENTER_ACTION) {
            return View::Prompt;
        }

        let Some(actor) = actor else {
            warn!("Enter pressed without a fid");
            return View::MissingFid;
        };

        let start_time = Instant::now();
        let outcome = self.checker.check(actor).await;
        let view = self.view_for(&outcome);

        info!(
            "Rendered {} for fid {} in {:.2?}",
            view.name(),
            actor,
            start_time.elapsed()
        );
        view
    }

    /// Map a qualification outcome to a view.
    pub fn view_for(&self, outcome: &Qualification) -> View {
        match outcome {
            Qualification::Qualified => View::Welcome,
            Qualification::NotQualified { .. } => View::CallToAction,
            Qualification::Indeterminate { .. } => match self.on_indeterminate {
                IndeterminatePolicy::CallToAction => View::CallToAction,
                IndeterminatePolicy::Error => View::Unverified,
            },
        }
    }
}
