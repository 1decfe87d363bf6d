//! Clients for the social-network REST APIs the gate verifies against.
//!
//! This crate provides:
//! - The `ReactionProvider` capability the qualification checker depends on
//! - `WarpcastProvider` and `NeynarProvider`, one adapter per response schema
//! - Bearer-authenticated JSON GETs with status and decode errors kept apart
//!
//! There is no retry and no timeout beyond reqwest's defaults: a failed call
//! is reported once and the caller decides what it means.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use gate_types::{CastRef, Fid, FollowSet, ReactionSet};

pub mod http;
pub mod neynar;
pub mod warpcast;

pub use neynar::NeynarProvider;
pub use warpcast::WarpcastProvider;

/// Errors that can occur when talking to a provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request to provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),
}

/// Bearer credential for a provider.
///
/// `Debug` is redacted so the key never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for an empty or whitespace-only key.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Source of reaction and follow data for the gate.
///
/// One implementation per real provider schema; the gate handler is written
/// once against this trait.
#[async_trait]
pub trait ReactionProvider: Send + Sync {
    /// Returns the name of this provider (for logging/debugging)
    fn name(&self) -> &str;

    /// Fetch every like and recast on `target`.
    async fn fetch_reactions(&self, target: &CastRef) -> Result<ReactionSet, ProviderError>;

    /// Fetch the follow records needed to decide whether `follower`
    /// follows `followee`.
    ///
    /// Adapters whose API answers the question directly return a set with at
    /// most one record; list-based APIs return the whole following list.
    async fn fetch_following(&self, follower: Fid, followee: Fid)
        -> Result<FollowSet, ProviderError>;
}

/// The provider schemas we have adapters for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Warpcast,
    Neynar,
}

impl ProviderKind {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Warpcast => warpcast::DEFAULT_BASE_URL,
            ProviderKind::Neynar => neynar::DEFAULT_BASE_URL,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Warpcast => f.write_str("warpcast"),
            ProviderKind::Neynar => f.write_str("neynar"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warpcast" => Ok(ProviderKind::Warpcast),
            "neynar" => Ok(ProviderKind::Neynar),
            other => Err(format!("Unknown provider: {}", other)),
        }
    }
}

/// Build the adapter for `kind`, pointed at `base_url` or the provider default.
pub fn build_provider(
    kind: ProviderKind,
    api_key: ApiKey,
    base_url: Option<&str>,
) -> Result<Arc<dyn ReactionProvider>, ProviderError> {
    let base_url = base_url.unwrap_or(kind.default_base_url());
    let provider: Arc<dyn ReactionProvider> = match kind {
        ProviderKind::Warpcast => Arc::new(WarpcastProvider::new(api_key, base_url)?),
        ProviderKind::Neynar => Arc::new(NeynarProvider::new(api_key, base_url)?),
    };
    Ok(provider)
}
