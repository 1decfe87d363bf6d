//! Adapter for the Warpcast v2 REST API.
//!
//! - `GET /reactions?castId=<hash>` → `{ likes: [{ user: { fid } }], recasts: [...] }`
//! - `GET /follows?followerFid=<a>&followeeFid=<b>` → `{ isFollowing: bool }`

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use gate_types::{CastRef, Fid, FollowRecord, FollowSet, ReactionSet};

use crate::http::HttpJsonClient;
use crate::{ApiKey, ProviderError, ReactionProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.warpcast.com/v2";

#[derive(Debug, Deserialize)]
struct ReactionsResponse {
    likes: Vec<Reaction>,
    recasts: Vec<Reaction>,
}

#[derive(Debug, Deserialize)]
struct Reaction {
    user: ReactionUser,
}

#[derive(Debug, Deserialize)]
struct ReactionUser {
    fid: Fid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FollowResponse {
    is_following: bool,
}

/// Warpcast-schema reaction provider
#[derive(Clone)]
pub struct WarpcastProvider {
    http: HttpJsonClient,
}

impl WarpcastProvider {
    pub fn new(api_key: ApiKey, base_url: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            http: HttpJsonClient::new(api_key, base_url)?,
        })
    }
}

#[async_trait]
impl ReactionProvider for WarpcastProvider {
    fn name(&self) -> &str {
        "warpcast"
    }

    async fn fetch_reactions(&self, target: &CastRef) -> Result<ReactionSet, ProviderError> {
        let url = self
            .http
            .endpoint(&["reactions"], &[("castId", target.as_str())])?;
        let response: ReactionsResponse = self.http.get_json(url).await?;

        let reactions = ReactionSet::from_fids(
            response.likes.into_iter().map(|r| r.user.fid),
            response.recasts.into_iter().map(|r| r.user.fid),
        );
        debug!(
            "Warpcast returned {} likes and {} recasts for {}",
            reactions.likes().len(),
            reactions.recasts().len(),
            target
        );
        Ok(reactions)
    }

    async fn fetch_following(
        &self,
        follower: Fid,
        followee: Fid,
    ) -> Result<FollowSet, ProviderError> {
        let follower_param = follower.to_string();
        let followee_param = followee.to_string();
        let url = self.http.endpoint(
            &["follows"],
            &[
                ("followerFid", follower_param.as_str()),
                ("followeeFid", followee_param.as_str()),
            ],
        )?;
        let response: FollowResponse = self.http.get_json(url).await?;

        let mut follows = FollowSet::new();
        if response.is_following {
            follows.insert(FollowRecord::new(follower, followee));
        }
        Ok(follows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> WarpcastProvider {
        WarpcastProvider::new(ApiKey::new("test-key").unwrap(), &server.uri()).unwrap()
    }

    fn cast() -> CastRef {
        CastRef::new("0x5d38e284").unwrap()
    }

    #[tokio::test]
    async fn test_fetch_reactions_decodes_nested_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reactions"))
            .and(query_param("castId", "0x5d38e284"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "likes": [{ "user": { "fid": 203 } }, { "user": { "fid": "11" } }],
                "recasts": [{ "user": { "fid": 11 } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reactions = provider(&server).fetch_reactions(&cast()).await.unwrap();

        assert!(reactions.has_liked(Fid(203)));
        assert!(reactions.has_liked(Fid(11)));
        assert!(!reactions.has_recast(Fid(203)));
        assert!(reactions.has_recast(Fid(11)));
    }

    #[tokio::test]
    async fn test_fetch_reactions_missing_field_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "likes": [] })))
            .mount(&server)
            .await;

        let result = provider(&server).fetch_reactions(&cast()).await;
        assert!(matches!(result, Err(ProviderError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_fetch_reactions_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reactions"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = provider(&server).fetch_reactions(&cast()).await;
        match result {
            Err(ProviderError::Status { status, .. }) => assert_eq!(status, 401),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_following_true() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/follows"))
            .and(query_param("followerFid", "203"))
            .and(query_param("followeeFid", "791835"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isFollowing": true })))
            .expect(1)
            .mount(&server)
            .await;

        let follows = provider(&server)
            .fetch_following(Fid(203), Fid(791835))
            .await
            .unwrap();
        assert!(follows.contains(Fid(203), Fid(791835)));
    }

    #[tokio::test]
    async fn test_fetch_following_false() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/follows"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isFollowing": false })))
            .mount(&server)
            .await;

        let follows = provider(&server)
            .fetch_following(Fid(203), Fid(791835))
            .await
            .unwrap();
        assert!(follows.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_request_error() {
        // Nothing listens on port 1
        let provider =
            WarpcastProvider::new(ApiKey::new("k").unwrap(), "http://127.0.0.1:1").unwrap();

        let result = provider.fetch_reactions(&cast()).await;
        assert!(matches!(result, Err(ProviderError::Request(_))));
    }
}
