//! Startup configuration for the gate server.
//!
//! `GateSettings` is what the operator supplied (flags, environment);
//! `GateConfig` is the validated form the rest of the server is built from.
//! There are no embedded credentials: a missing API key stops startup.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use gate_types::{CastRef, Fid};
use hub_client::{ApiKey, ProviderKind};
use qualification::RequirementKind;

/// Configuration problems found before the server starts
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key is required (set FRAME_GATE_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("Target cast is required (set FRAME_GATE_CAST or pass --cast)")]
    MissingCast,

    #[error("A followee fid is required when follow is a requirement")]
    MissingFollowee,

    #[error("Invalid followee fid: {0}")]
    InvalidFollowee(String),

    #[error("At least one requirement must be configured")]
    NoRequirements,

    #[error("Invalid public URL {url}: {reason}")]
    InvalidPublicUrl { url: String, reason: String },
}

/// Whether development tooling is attached to the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    pub fn is_development(&self) -> bool {
        matches!(self, Mode::Development)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(format!("Unknown mode: {}", other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => f.write_str("development"),
            Mode::Production => f.write_str("production"),
        }
    }
}

/// What to show when the provider could not answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndeterminatePolicy {
    /// Treat as not qualified and show the call-to-action
    #[default]
    CallToAction,
    /// Show a generic "could not verify" error
    Error,
}

impl FromStr for IndeterminatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call-to-action" | "cta" => Ok(IndeterminatePolicy::CallToAction),
            "error" => Ok(IndeterminatePolicy::Error),
            other => Err(format!("Unknown indeterminate policy: {}", other)),
        }
    }
}

/// Unvalidated settings as supplied by the operator
#[derive(Debug, Clone)]
pub struct GateSettings {
    pub api_key: Option<String>,
    pub provider: ProviderKind,
    pub api_base: Option<String>,
    pub cast: Option<String>,
    pub followee: Option<String>,
    pub requirements: Vec<RequirementKind>,
    pub public_url: String,
    pub listen_addr: SocketAddr,
    pub mode: Mode,
    pub assets_dir: PathBuf,
    pub on_indeterminate: IndeterminatePolicy,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: ProviderKind::Warpcast,
            api_base: None,
            cast: None,
            followee: None,
            requirements: vec![
                RequirementKind::Like,
                RequirementKind::Recast,
                RequirementKind::Follow,
            ],
            public_url: "http://localhost:3000".to_string(),
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            mode: Mode::Development,
            assets_dir: PathBuf::from("public"),
            on_indeterminate: IndeterminatePolicy::CallToAction,
        }
    }
}

/// Validated configuration, immutable for the process lifetime
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub api_key: ApiKey,
    pub provider: ProviderKind,
    pub api_base: Option<String>,
    pub cast: CastRef,
    pub followee: Option<Fid>,
    pub requirements: Vec<RequirementKind>,
    pub public_url: Url,
    pub listen_addr: SocketAddr,
    pub mode: Mode,
    pub assets_dir: PathBuf,
    pub on_indeterminate: IndeterminatePolicy,
}

impl GateConfig {
    /// Validate operator settings.
    ///
    /// A followee given without a follow requirement is kept (it is used for
    /// the profile link) but not required.
    pub fn from_settings(settings: GateSettings) -> Result<Self, ConfigError> {
        let api_key = settings
            .api_key
            .and_then(ApiKey::new)
            .ok_or(ConfigError::MissingApiKey)?;

        let cast = settings
            .cast
            .as_deref()
            .and_then(|hash| CastRef::new(hash).ok())
            .ok_or(ConfigError::MissingCast)?;

        let followee = match settings.followee.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<Fid>()
                    .map_err(|_| ConfigError::InvalidFollowee(raw.to_string()))?,
            ),
        };

        let mut requirements: Vec<RequirementKind> = Vec::new();
        for kind in settings.requirements {
            if !requirements.contains(&kind) {
                requirements.push(kind);
            }
        }
        if requirements.is_empty() {
            return Err(ConfigError::NoRequirements);
        }
        if requirements.contains(&RequirementKind::Follow) && followee.is_none() {
            return Err(ConfigError::MissingFollowee);
        }

        let public_url = parse_public_url(&settings.public_url)?;

        Ok(Self {
            api_key,
            provider: settings.provider,
            api_base: settings.api_base.filter(|base| !base.trim().is_empty()),
            cast,
            followee,
            requirements,
            public_url,
            listen_addr: settings.listen_addr,
            mode: settings.mode,
            assets_dir: settings.assets_dir,
            on_indeterminate: settings.on_indeterminate,
        })
    }
}

fn parse_public_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidPublicUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {}", other))),
    }

    // Treat the path as a directory so `join("api")` appends to it
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GateSettings {
        GateSettings {
            api_key: Some("key".to_string()),
            cast: Some("0x5d38e284".to_string()),
            followee: Some("791835".to_string()),
            ..GateSettings::default()
        }
    }

    #[test]
    fn test_valid_settings() {
        let config = GateConfig::from_settings(settings()).unwrap();

        assert_eq!(config.cast.as_str(), "0x5d38e284");
        assert_eq!(config.followee, Some(Fid(791835)));
        assert_eq!(config.requirements.len(), 3);
        assert_eq!(config.public_url.as_str(), "http://localhost:3000/");
    }

    #[test]
    fn test_api_key_has_no_default() {
        let mut missing = settings();
        missing.api_key = None;
        assert_eq!(
            GateConfig::from_settings(missing).unwrap_err(),
            ConfigError::MissingApiKey
        );

        let mut blank = settings();
        blank.api_key = Some("  ".to_string());
        assert_eq!(
            GateConfig::from_settings(blank).unwrap_err(),
            ConfigError::MissingApiKey
        );
    }

    #[test]
    fn test_cast_is_required() {
        let mut s = settings();
        s.cast = Some(String::new());
        assert_eq!(GateConfig::from_settings(s).unwrap_err(), ConfigError::MissingCast);
    }

    #[test]
    fn test_follow_requirement_needs_followee() {
        let mut s = settings();
        s.followee = None;
        assert_eq!(
            GateConfig::from_settings(s).unwrap_err(),
            ConfigError::MissingFollowee
        );

        // Without the follow requirement the followee is optional
        let mut s = settings();
        s.followee = None;
        s.requirements = vec![RequirementKind::Like, RequirementKind::Recast];
        assert!(GateConfig::from_settings(s).is_ok());
    }

    #[test]
    fn test_invalid_followee() {
        let mut s = settings();
        s.followee = Some("dwr".to_string());
        assert_eq!(
            GateConfig::from_settings(s).unwrap_err(),
            ConfigError::InvalidFollowee("dwr".to_string())
        );
    }

    #[test]
    fn test_requirements_deduplicated_and_non_empty() {
        let mut s = settings();
        s.requirements = vec![RequirementKind::Like, RequirementKind::Like];
        let config = GateConfig::from_settings(s).unwrap();
        assert_eq!(config.requirements, vec![RequirementKind::Like]);

        let mut s = settings();
        s.requirements = vec![];
        assert_eq!(
            GateConfig::from_settings(s).unwrap_err(),
            ConfigError::NoRequirements
        );
    }

    #[test]
    fn test_public_url_with_path_keeps_prefix() {
        let mut s = settings();
        s.public_url = "https://frames.example/gate".to_string();
        let config = GateConfig::from_settings(s).unwrap();
        assert_eq!(config.public_url.join("api").unwrap().as_str(), "https://frames.example/gate/api");
    }

    #[test]
    fn test_public_url_must_be_http() {
        let mut s = settings();
        s.public_url = "ftp://frames.example".to_string();
        assert!(matches!(
            GateConfig::from_settings(s),
            Err(ConfigError::InvalidPublicUrl { .. })
        ));
    }

    #[test]
    fn test_mode_and_policy_parsing() {
        assert_eq!("prod".parse::<Mode>(), Ok(Mode::Production));
        assert!(Mode::Development.is_development());
        assert_eq!(
            "error".parse::<IndeterminatePolicy>(),
            Ok(IndeterminatePolicy::Error)
        );
        assert!("maybe".parse::<IndeterminatePolicy>().is_err());
    }
}
