//! Adapter for the Neynar v2 REST API.
//!
//! - `GET /cast?identifier=<hash>&type=hash` →
//!   `{ cast: { reactions: { likes: [{ fid }], recasts: [{ fid }] } } }`
//! - `GET /following/<fid>[?cursor=<c>]` → `{ following: [...], next: { cursor } }`,
//!   searched locally page by page until the followee shows up, the cursor
//!   runs out, or `MAX_FOLLOWING_PAGES` pages have been read
//!
//! Following entries come either flat (`{ fid }`) or wrapped in a follow
//! object (`{ user: { fid } }`) depending on the endpoint version.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use gate_types::{CastRef, Fid, FollowRecord, FollowSet, ReactionSet};

use crate::http::HttpJsonClient;
use crate::{ApiKey, ProviderError, ReactionProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.neynar.com/v2/farcaster";

/// Upper bound on following pages fetched for one check
pub const MAX_FOLLOWING_PAGES: usize = 20;

#[derive(Debug, Deserialize)]
struct CastResponse {
    cast: Cast,
}

#[derive(Debug, Deserialize)]
struct Cast {
    reactions: CastReactions,
}

#[derive(Debug, Deserialize)]
struct CastReactions {
    likes: Vec<UserRef>,
    recasts: Vec<UserRef>,
}

#[derive(Debug, Deserialize)]
struct UserRef {
    fid: Fid,
}

#[derive(Debug, Deserialize)]
struct FollowingResponse {
    following: Vec<FollowingEntry>,
    #[serde(default)]
    next: Option<NextPage>,
}

#[derive(Debug, Deserialize)]
struct NextPage {
    cursor: Option<String>,
}

impl FollowingResponse {
    fn next_cursor(&self) -> Option<&str> {
        self.next
            .as_ref()?
            .cursor
            .as_deref()
            .filter(|cursor| !cursor.is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FollowingEntry {
    Flat { fid: Fid },
    Wrapped { user: UserRef },
}

impl FollowingEntry {
    fn fid(&self) -> Fid {
        match self {
            FollowingEntry::Flat { fid } => *fid,
            FollowingEntry::Wrapped { user } => user.fid,
        }
    }
}

/// Neynar-schema reaction provider
#[derive(Clone)]
pub struct NeynarProvider {
    http: HttpJsonClient,
}

impl NeynarProvider {
    pub fn new(api_key: ApiKey, base_url: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            http: HttpJsonClient::new(api_key, base_url)?,
        })
    }
}

#[async_trait]
impl ReactionProvider for NeynarProvider {
    fn name(&self) -> &str {
        "neynar"
    }

    async fn fetch_reactions(&self, target: &CastRef) -> Result<ReactionSet, ProviderError> {
        let url = self.http.endpoint(
            &["cast"],
            &[("identifier", target.as_str()), ("type", "hash")],
        )?;
        let response: CastResponse = self.http.get_json(url).await?;
        let reactions = response.cast.reactions;

        Ok(ReactionSet::from_fids(
            reactions.likes.into_iter().map(|u| u.fid),
            reactions.recasts.into_iter().map(|u| u.fid),
        ))
    }

    async fn fetch_following(
        &self,
        follower: Fid,
        followee: Fid,
    ) -> Result<FollowSet, ProviderError> {
        let follower_segment = follower.to_string();
        let mut follows = FollowSet::default();
        let mut cursor: Option<String> = None;

        for page in 1..=MAX_FOLLOWING_PAGES {
            let url = {
                let query: Vec<(&str, &str)> = match cursor.as_deref() {
                    Some(c) => vec![("cursor", c)],
                    None => Vec::new(),
                };
                self.http
                    .endpoint(&["following", follower_segment.as_str()], &query)?
            };
            let response: FollowingResponse = self.http.get_json(url).await?;

            debug!(
                "Neynar page {} returned {} followed accounts for {}",
                page,
                response.following.len(),
                follower
            );
            for entry in &response.following {
                follows.insert(FollowRecord::new(follower, entry.fid()));
            }

            if follows.contains(follower, followee) {
                break;
            }
            match response.next_cursor() {
                Some(next) => cursor = Some(next.to_string()),
                None => break,
            }
            if page == MAX_FOLLOWING_PAGES {
                warn!(
                    "Stopped reading following list of {} after {} pages",
                    follower, MAX_FOLLOWING_PAGES
                );
            }
        }

        Ok(follows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> NeynarProvider {
        NeynarProvider::new(ApiKey::new("neynar-key").unwrap(), &server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_reactions_reads_cast_schema() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cast"))
            .and(query_param("identifier", "0x5d38e284"))
            .and(query_param("type", "hash"))
            .and(header("authorization", "Bearer neynar-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cast": {
                    "hash": "0x5d38e284",
                    "reactions": {
                        "likes_count": 1,
                        "likes": [{ "fid": 203, "fname": "alice" }],
                        "recasts": [{ "fid": 203, "fname": "alice" }]
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cast = CastRef::new("0x5d38e284").unwrap();
        let reactions = provider(&server).fetch_reactions(&cast).await.unwrap();

        assert!(reactions.has_liked(Fid(203)));
        assert!(reactions.has_recast(Fid(203)));
        assert_eq!(reactions.counts(), (1, 1));
    }

    #[tokio::test]
    async fn test_fetch_reactions_without_reactions_block_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cast": {} })))
            .mount(&server)
            .await;

        let cast = CastRef::new("0x5d38e284").unwrap();
        let result = provider(&server).fetch_reactions(&cast).await;
        assert!(matches!(result, Err(ProviderError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_fetch_following_accepts_both_entry_shapes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/following/203"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "following": [
                    { "fid": 1 },
                    { "object": "follow", "user": { "fid": 791835 } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let follows = provider(&server)
            .fetch_following(Fid(203), Fid(791835))
            .await
            .unwrap();

        assert_eq!(follows.len(), 2);
        assert!(follows.contains(Fid(203), Fid(1)));
        assert!(follows.contains(Fid(203), Fid(791835)));
    }

    #[tokio::test]
    async fn test_fetch_following_follows_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/following/203"))
            .and(query_param_is_missing("cursor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "following": [{ "fid": 1 }, { "fid": 2 }],
                "next": { "cursor": "page-2" }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/following/203"))
            .and(query_param("cursor", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "following": [{ "user": { "fid": 791835 } }],
                "next": { "cursor": null }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let follows = provider(&server)
            .fetch_following(Fid(203), Fid(791835))
            .await
            .unwrap();

        assert_eq!(follows.len(), 3);
        assert!(follows.contains(Fid(203), Fid(791835)));
    }

    #[tokio::test]
    async fn test_fetch_following_stops_once_followee_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/following/203"))
            .and(query_param_is_missing("cursor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "following": [{ "fid": 791835 }],
                "next": { "cursor": "page-2" }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/following/203"))
            .and(query_param("cursor", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "following": [] })))
            .expect(0)
            .mount(&server)
            .await;

        let follows = provider(&server)
            .fetch_following(Fid(203), Fid(791835))
            .await
            .unwrap();
        assert!(follows.contains(Fid(203), Fid(791835)));
    }

    #[tokio::test]
    async fn test_fetch_following_page_cap() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/following/203"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "following": [{ "fid": 1 }],
                "next": { "cursor": "again" }
            })))
            .expect(MAX_FOLLOWING_PAGES as u64)
            .mount(&server)
            .await;

        let follows = provider(&server)
            .fetch_following(Fid(203), Fid(791835))
            .await
            .unwrap();
        assert!(!follows.contains(Fid(203), Fid(791835)));
    }

    #[tokio::test]
    async fn test_fetch_following_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/following/203"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = provider(&server).fetch_following(Fid(203), Fid(791835)).await;
        assert!(matches!(result, Err(ProviderError::Status { status: 503, .. })));
    }
}
