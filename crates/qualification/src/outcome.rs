//! Types describing what a check looked at and what it concluded.

use gate_types::{FollowSet, ReactionSet};
use std::fmt;
use std::str::FromStr;

/// The interactions a gate can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementKind {
    Like,
    Recast,
    Follow,
}

impl RequirementKind {
    /// Verb used in user-facing copy ("Please like, recast, and follow")
    pub fn verb(&self) -> &'static str {
        match self {
            RequirementKind::Like => "like",
            RequirementKind::Recast => "recast",
            RequirementKind::Follow => "follow",
        }
    }
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

impl FromStr for RequirementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "like" | "liked" | "likes" => Ok(RequirementKind::Like),
            "recast" | "recasted" | "recasts" => Ok(RequirementKind::Recast),
            "follow" | "following" | "follows" => Ok(RequirementKind::Follow),
            other => Err(format!("Unknown requirement: {}", other)),
        }
    }
}

/// Everything fetched from the provider for one actor.
///
/// `follows` is `None` when no requirement asked for follow data, which is
/// not the same as an empty follow list.
#[derive(Debug, Clone, Default)]
pub struct InteractionEvidence {
    pub reactions: ReactionSet,
    pub follows: Option<FollowSet>,
}

impl InteractionEvidence {
    pub fn new(reactions: ReactionSet) -> Self {
        Self {
            reactions,
            follows: None,
        }
    }

    pub fn with_follows(mut self, follows: FollowSet) -> Self {
        self.follows = Some(follows);
        self
    }
}

/// Result of one qualification check.
///
/// `Indeterminate` keeps "the provider failed" apart from "the actor has not
/// interacted"; callers that only want a boolean get `false` for both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualification {
    Qualified,
    NotQualified { missing: Vec<RequirementKind> },
    Indeterminate { reason: String },
}

impl Qualification {
    pub fn is_qualified(&self) -> bool {
        matches!(self, Qualification::Qualified)
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Qualification::Indeterminate { .. })
    }

    /// Requirements known to be unmet (empty unless `NotQualified`)
    pub fn missing(&self) -> &[RequirementKind] {
        match self {
            Qualification::NotQualified { missing } => missing,
            _ => &[],
        }
    }
}

impl fmt::Display for Qualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualification::Qualified => f.write_str("qualified"),
            Qualification::NotQualified { missing } => {
                let missing: Vec<&str> = missing.iter().map(|k| k.verb()).collect();
                write!(f, "not qualified (missing: {})", missing.join(", "))
            }
            Qualification::Indeterminate { reason } => write!(f, "indeterminate ({})", reason),
        }
    }
}
