//! Ghost content API client. Compiled with the `cms-ghost` feature.

use std::time::Duration;

use async_trait::async_trait;
use domains::{CmsError, CmsPost, CmsSource, Flavour};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};

const POSTS_PATH: &str = "/ghost/api/v3/content/posts/";
/// Tags every feed post carries, after the flavour tag.
const FEED_TAGS: [&str; 3] = ["tag:welcome", "tag:what-is", "tag:getting-started"];

#[derive(Debug, Deserialize)]
struct PostsResponse {
    #[serde(default)]
    posts: Vec<CmsPost>,
}

pub struct GhostCmsClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
}

impl GhostCmsClient {
    /// `timeout` bounds each whole request, body included.
    pub fn new(endpoint: &str, api_key: SecretString, timeout: Duration) -> Result<Self, CmsError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CmsError::Request(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn flavour_tag(flavour: Flavour) -> &'static str {
        match flavour {
            Flavour::Consumer => "tag:feed-consumer",
            Flavour::Pro => "tag:feed-pro",
        }
    }
}

fn request_error(err: reqwest::Error) -> CmsError {
    if err.is_timeout() {
        CmsError::Timeout
    } else {
        CmsError::Request(err.to_string())
    }
}

#[async_trait]
impl CmsSource for GhostCmsClient {
    #[instrument(skip(self))]
    async fn feed_content(&self, flavour: Flavour) -> Result<Vec<CmsPost>, CmsError> {
        let mut params = vec![
            ("key", self.api_key.expose_secret()),
            ("include", "tags"),
            ("filter", Self::flavour_tag(flavour)),
        ];
        params.extend(FEED_TAGS.iter().map(|tag| ("filter", *tag)));
        params.extend([("include", "authors"), ("formats", "html,plaintext")]);

        let response = self
            .http
            .get(format!("{}{POSTS_PATH}", self.endpoint))
            .query(&params)
            .send()
            .await
            .map_err(request_error)?
            .error_for_status()
            .map_err(request_error)?;

        let body: PostsResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                CmsError::Timeout
            } else {
                CmsError::Decode(e.to_string())
            }
        })?;
        debug!(posts = body.posts.len(), "fetched CMS feed content");
        Ok(body.posts)
    }
}
