//! Core domain types for the interaction gate.
//!
//! Everything here lives for a single request at most: reaction and follow
//! records are read from the provider, scanned, and dropped.

use crate::error::{GateTypesError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Identifiers
// =============================================================================

/// Farcaster id of an account.
///
/// Providers disagree on whether fids are JSON numbers or strings, so
/// deserialization accepts both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Fid(pub u64);

impl Fid {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Fid {
    type Err = GateTypesError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(Fid)
            .map_err(|_| GateTypesError::InvalidFid(s.to_string()))
    }
}

impl From<u64> for Fid {
    fn from(value: u64) -> Self {
        Fid(value)
    }
}

impl<'de> Deserialize<'de> for Fid {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawFid {
            Number(u64),
            Text(String),
        }

        match RawFid::deserialize(deserializer)? {
            RawFid::Number(n) => Ok(Fid(n)),
            RawFid::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Hash of the cast the gate is attached to.
///
/// Configured once at startup and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CastRef(String);

impl CastRef {
    /// Create a cast reference, rejecting empty input.
    pub fn new(hash: impl Into<String>) -> Result<Self> {
        let hash = hash.into();
        let trimmed = hash.trim();
        if trimmed.is_empty() {
            return Err(GateTypesError::EmptyCastRef);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CastRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CastRef {
    type Err = GateTypesError;

    fn from_str(s: &str) -> Result<Self> {
        CastRef::new(s)
    }
}

// =============================================================================
// Reactions
// =============================================================================

/// The two reaction types the network supports on a cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Recast,
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReactionKind::Like => f.write_str("like"),
            ReactionKind::Recast => f.write_str("recast"),
        }
    }
}

/// One reaction by one account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub fid: Fid,
    pub kind: ReactionKind,
}

impl ReactionRecord {
    pub fn new(fid: Fid, kind: ReactionKind) -> Self {
        Self { fid, kind }
    }
}

/// All reactions a provider returned for a cast.
///
/// Lists are unordered; lookups are linear scans that stop at the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionSet {
    likes: Vec<ReactionRecord>,
    recasts: Vec<ReactionRecord>,
}

impl ReactionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from plain fid lists, mostly useful for adapters and tests.
    pub fn from_fids(
        likes: impl IntoIterator<Item = Fid>,
        recasts: impl IntoIterator<Item = Fid>,
    ) -> Self {
        let mut set = Self::new();
        for fid in likes {
            set.push(ReactionRecord::new(fid, ReactionKind::Like));
        }
        for fid in recasts {
            set.push(ReactionRecord::new(fid, ReactionKind::Recast));
        }
        set
    }

    /// Add a record to the list matching its kind.
    pub fn push(&mut self, record: ReactionRecord) {
        match record.kind {
            ReactionKind::Like => self.likes.push(record),
            ReactionKind::Recast => self.recasts.push(record),
        }
    }

    pub fn likes(&self) -> &[ReactionRecord] {
        &self.likes
    }

    pub fn recasts(&self) -> &[ReactionRecord] {
        &self.recasts
    }

    /// True if `fid` appears in the list for `kind`.
    pub fn has_reacted(&self, fid: Fid, kind: ReactionKind) -> bool {
        let records = match kind {
            ReactionKind::Like => &self.likes,
            ReactionKind::Recast => &self.recasts,
        };
        records.iter().any(|record| record.fid == fid)
    }

    pub fn has_liked(&self, fid: Fid) -> bool {
        self.has_reacted(fid, ReactionKind::Like)
    }

    pub fn has_recast(&self, fid: Fid) -> bool {
        self.has_reacted(fid, ReactionKind::Recast)
    }

    /// Returns (like_count, recast_count)
    pub fn counts(&self) -> (usize, usize) {
        (self.likes.len(), self.recasts.len())
    }
}

// =============================================================================
// Follows
// =============================================================================

/// `follower` follows `followee`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowRecord {
    pub follower: Fid,
    pub followee: Fid,
}

impl FollowRecord {
    pub fn new(follower: Fid, followee: Fid) -> Self {
        Self { follower, followee }
    }
}

/// Follow records returned for a follow query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowSet {
    records: Vec<FollowRecord>,
}

impl FollowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All accounts `follower` follows, as returned by a following-list endpoint.
    pub fn from_following(follower: Fid, followees: impl IntoIterator<Item = Fid>) -> Self {
        Self {
            records: followees
                .into_iter()
                .map(|followee| FollowRecord::new(follower, followee))
                .collect(),
        }
    }

    pub fn insert(&mut self, record: FollowRecord) {
        self.records.push(record);
    }

    pub fn contains(&self, follower: Fid, followee: Fid) -> bool {
        self.records
            .iter()
            .any(|record| record.follower == follower && record.followee == followee)
    }

    pub fn records(&self) -> &[FollowRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<FollowRecord> for FollowSet {
    fn from_iter<I: IntoIterator<Item = FollowRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
