//! Steam Web API client
//!
//! Every request kind maps to exactly one target URL and one response format.
//! Responses are handed back as parsed trees without interpreting their fields.

use crate::cache::{Clock, SystemClock};
use crate::config::SteamConfig;
use crate::error::SteamError;
use crate::steam_id::FullId;
use crate::xml_document::XmlElement;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Data available from Steam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FetchKind {
    /// Public profile summary, batched
    PlayerSummary,
    /// Friend list of a public profile
    FriendList,
    /// VAC, community and economy bans, batched
    BanStatus,
    /// Names the profile has used
    AliasHistory,
    /// Community XML profile looked up by custom URL name
    ExistenceCheck,
}

impl FetchKind {
    pub const ALL: [FetchKind; 5] = [
        FetchKind::PlayerSummary,
        FetchKind::FriendList,
        FetchKind::BanStatus,
        FetchKind::AliasHistory,
        FetchKind::ExistenceCheck,
    ];

    /// Name used by callers of the web application
    pub fn name(self) -> &'static str {
        match self {
            FetchKind::PlayerSummary => "info",
            FetchKind::FriendList => "friends",
            FetchKind::BanStatus => "ban",
            FetchKind::AliasHistory => "alias",
            FetchKind::ExistenceCheck => "xmlInfo",
        }
    }
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FetchKind {
    type Err = SteamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FetchKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SteamError::InvalidArgument(format!("Unknown request type {s:?}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Xml,
}

/// A validated request, one variant per [`FetchKind`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    PlayerSummary(Vec<FullId>),
    FriendList(FullId),
    BanStatus(Vec<FullId>),
    AliasHistory(FullId),
    ExistenceCheck(String),
}

impl FetchRequest {
    /// Build a request from raw values. Batch kinds keep every value, the
    /// others only the first one.
    pub fn new<S: AsRef<str>>(kind: FetchKind, values: &[S]) -> Result<Self, SteamError> {
        let first = values
            .first()
            .map(|v| v.as_ref().trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                SteamError::InvalidArgument(format!("No value given for {kind} request"))
            })?;

        Ok(match kind {
            FetchKind::PlayerSummary => FetchRequest::PlayerSummary(parse_ids(values)?),
            FetchKind::FriendList => FetchRequest::FriendList(first.parse()?),
            FetchKind::BanStatus => FetchRequest::BanStatus(parse_ids(values)?),
            FetchKind::AliasHistory => FetchRequest::AliasHistory(first.parse()?),
            FetchKind::ExistenceCheck => FetchRequest::ExistenceCheck(first.to_string()),
        })
    }

    pub fn kind(&self) -> FetchKind {
        match self {
            FetchRequest::PlayerSummary(_) => FetchKind::PlayerSummary,
            FetchRequest::FriendList(_) => FetchKind::FriendList,
            FetchRequest::BanStatus(_) => FetchKind::BanStatus,
            FetchRequest::AliasHistory(_) => FetchKind::AliasHistory,
            FetchRequest::ExistenceCheck(_) => FetchKind::ExistenceCheck,
        }
    }

    /// Target URL and expected response format.
    ///
    /// `cache_buster` is appended as a bare query key so intermediate caches
    /// never answer with a stale copy.
    pub fn target(
        &self,
        config: &SteamConfig,
        cache_buster: i64,
    ) -> Result<(Url, ResponseFormat), SteamError> {
        let api = config.api_url.trim_end_matches('/');
        let community = config.community_url.trim_end_matches('/');
        let key = &config.api_key;

        let (url, format) = match self {
            FetchRequest::PlayerSummary(ids) => (
                format!(
                    "{api}/ISteamUser/GetPlayerSummaries/v0002/?key={key}&steamids={}&{cache_buster}",
                    join_ids(ids)
                ),
                ResponseFormat::Json,
            ),
            FetchRequest::FriendList(id) => (
                format!(
                    "{api}/ISteamUser/GetFriendList/v0001/?key={key}&steamid={id}&relationship=friend&{cache_buster}"
                ),
                ResponseFormat::Json,
            ),
            FetchRequest::BanStatus(ids) => (
                format!(
                    "{api}/ISteamUser/GetPlayerBans/v1/?key={key}&steamids={}&{cache_buster}",
                    join_ids(ids)
                ),
                ResponseFormat::Json,
            ),
            FetchRequest::AliasHistory(id) => (
                format!("{community}/profiles/{id}/ajaxaliases?{cache_buster}"),
                ResponseFormat::Json,
            ),
            FetchRequest::ExistenceCheck(name) => {
                // Custom URL names are user-chosen, let Url encode them
                let mut url = parse_url(community)?;
                url.path_segments_mut()
                    .map_err(|_| {
                        SteamError::InvalidArgument(format!(
                            "Community URL {community} cannot take a path"
                        ))
                    })?
                    .pop_if_empty()
                    .extend(["id", name.as_str(), ""]);
                url.set_query(Some(&format!("xml=1&{cache_buster}")));
                return Ok((url, ResponseFormat::Xml));
            }
        };

        Ok((parse_url(&url)?, format))
    }
}

fn parse_ids<S: AsRef<str>>(values: &[S]) -> Result<Vec<FullId>, SteamError> {
    values.iter().map(|v| v.as_ref().parse::<FullId>()).collect()
}

fn join_ids(ids: &[FullId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_url(url: &str) -> Result<Url, SteamError> {
    Url::parse(url).map_err(|e| SteamError::InvalidArgument(format!("Invalid request URL: {e}")))
}

/// Parsed response body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Json(Value),
    Document(XmlElement),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Document(_) => None,
        }
    }

    pub fn as_document(&self) -> Option<&XmlElement> {
        match self {
            Payload::Document(document) => Some(document),
            Payload::Json(_) => None,
        }
    }
}

/// Parse a response body in the given format.
///
/// JSON must be an object or an array; scalars such as `null` or `"busy"`
/// count as unusable data.
pub fn parse_body(format: ResponseFormat, body: &str) -> Result<Payload, SteamError> {
    match format {
        ResponseFormat::Json => match serde_json::from_str::<Value>(body) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => Ok(Payload::Json(value)),
            Ok(_) => Err(SteamError::DataError(
                "expected a JSON object or array".to_string(),
            )),
            Err(e) => Err(SteamError::DataError(e.to_string())),
        },
        ResponseFormat::Xml => XmlElement::parse(body)
            .map(Payload::Document)
            .map_err(|e| SteamError::DataError(e.to_string())),
    }
}

/// Client for the Steam Web API and the community site
#[derive(Clone)]
pub struct SteamApiClient {
    client: Client,
    config: Arc<SteamConfig>,
    clock: Arc<dyn Clock>,
}

impl SteamApiClient {
    pub fn new(config: SteamConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: SteamConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // reqwest follows up to 10 redirects by default
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
            clock,
        })
    }

    pub fn config(&self) -> &SteamConfig {
        &self.config
    }

    /// Fetch one kind of data for the given values
    pub async fn fetch<S: AsRef<str>>(
        &self,
        kind: FetchKind,
        values: &[S],
    ) -> Result<Payload, SteamError> {
        let request = FetchRequest::new(kind, values)?;
        self.execute(&request).await
    }

    /// Same as [`fetch`](Self::fetch), with the kind given by its name
    /// (`info`, `friends`, `ban`, `alias`, `xmlInfo`)
    pub async fn fetch_named<S: AsRef<str>>(
        &self,
        kind: &str,
        values: &[S],
    ) -> Result<Payload, SteamError> {
        let kind = kind.parse::<FetchKind>()?;
        self.fetch(kind, values).await
    }

    pub async fn execute(&self, request: &FetchRequest) -> Result<Payload, SteamError> {
        let kind = request.kind();
        let (url, format) = request.target(&self.config, self.clock.now())?;

        // The URL carries the API key, log the path only
        debug!("Requesting Steam {} data from {}", kind, url.path());

        let response = self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            warn!("Steam {} request failed: {}", kind, e);
            SteamError::ConnectionError { source: e }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Steam {} request returned {}", kind, status);
        }

        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            warn!("Failed to read Steam {} response: {}", kind, e);
            SteamError::ConnectionError { source: e }
        })?;

        parse_body(format, &body).inspect_err(|e| {
            warn!("Unusable Steam {} response: {}", kind, e);
        })
    }

    /// Whether a community profile exists under the given custom URL name
    pub async fn profile_exists(&self, name: &str) -> Result<bool, SteamError> {
        let payload = self.fetch(FetchKind::ExistenceCheck, &[name]).await?;
        Ok(payload
            .as_document()
            .is_some_and(|document| document.error_message().is_none()))
    }
}
