//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result, bail, ensure};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::types::{
    TmdbCastMember, TmdbCredits, TmdbErrorResponse, TmdbMovieDetails, TmdbMovieList,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// How the client authenticates against TMDB.
#[derive(Clone)]
enum Credential {
    /// v3 API key, sent as the `api_key` query parameter.
    ApiKey(String),
    /// v4 read access token, sent as a Bearer header.
    BearerToken(String),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(***)"),
            Self::BearerToken(_) => f.write_str("BearerToken(***)"),
        }
    }
}

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API credential.
    credential: Credential,
    /// Value of the `language` query parameter.
    language: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    api_token: Option<String>,
    language: Option<String>,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_token: None,
            language: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the v3 API key, sent as the `api_key` query parameter.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the v4 read access token, sent as a Bearer header.
    /// Takes precedence over `api_key` when both are set.
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the response language (default: `en-US`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - Neither `api_key` nor `api_token` is set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let credential = match (self.api_token, self.api_key) {
            (Some(token), _) => Credential::BearerToken(token),
            (None, Some(key)) => Credential::ApiKey(key),
            (None, None) => bail!("api_key or api_token is required"),
        };
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            credential,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a single GET request with credentials, `language`, and the
    /// given extra query params, then decodes the JSON body.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        extra_query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut query: Vec<(&str, String)> = vec![("language", self.language.clone())];
        query.extend(extra_query.iter().cloned());

        let mut builder = self.http_client.get(url);
        builder = match &self.credential {
            Credential::ApiKey(key) => builder.query(&[("api_key", key.as_str())]),
            Credential::BearerToken(token) => builder.bearer_auth(token),
        };
        let request = builder
            .query(&query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(path, "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                bail!(
                    "TMDB API error (HTTP {}): code={}, message={}",
                    status,
                    error_response.status_code,
                    error_response.status_message,
                );
            }
            bail!("TMDB API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed = raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }

    /// Fetches one page of a `movie/{list}` endpoint.
    async fn movie_list(&self, list: &str, page: u32) -> Result<TmdbMovieList> {
        ensure!(page >= 1, "page must be at least 1 (got {page})");
        let path = format!("movie/{list}");
        let query = [("page", page.to_string())];
        self.get_json(&path, &query).await
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip(self))]
    async fn popular_movies(&self, page: u32) -> Result<TmdbMovieList> {
        self.movie_list("popular", page).await
    }

    #[instrument(skip(self))]
    async fn top_rated_movies(&self, page: u32) -> Result<TmdbMovieList> {
        self.movie_list("top_rated", page).await
    }

    #[instrument(skip(self))]
    async fn upcoming_movies(&self, page: u32) -> Result<TmdbMovieList> {
        self.movie_list("upcoming", page).await
    }

    #[instrument(skip(self))]
    async fn search_movies(&self, query: &str) -> Result<TmdbMovieList> {
        let params = [("query", String::from(query))];
        self.get_json("search/movie", &params).await
    }

    #[instrument(skip(self))]
    async fn movie_details(&self, movie_id: u64) -> Result<TmdbMovieDetails> {
        let path = format!("movie/{movie_id}");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip(self))]
    async fn movie_credits(&self, movie_id: u64) -> Result<Vec<TmdbCastMember>> {
        let path = format!("movie/{movie_id}/credits");
        let credits: TmdbCredits = self.get_json(&path, &[]).await?;
        Ok(credits.cast)
    }
}
