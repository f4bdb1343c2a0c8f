// Copyright 2025 Quentin Diebold
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::comment::AkismetComment;
use crate::error::AkismetClientError;
use crate::http_client::{HttpClient, PostResponse};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Default host of the Akismet REST API.
pub const DEFAULT_API_ENDPOINT: &str = "rest.akismet.com";
/// Default version segment used when composing request URLs.
pub const DEFAULT_API_VERSION: &str = "1.1";

const USER_AGENT: &str = concat!("akismet-sdk-rs/", env!("CARGO_PKG_VERSION"));
const CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Configuration of an Akismet client.
///
/// All fields are plain mutable state; reach them through
/// [`BaseAkismetClient::config_mut`] to reconfigure a live client.
#[derive(Debug, Clone)]
pub struct AkismetConfig {
    /// The API key being verified for use with the API.
    pub api_key: String,
    /// A.k.a. "blog": the front page or home URL of the instance making the
    /// request. For a blog, site, or wiki this would be the front page.
    /// Must be a full URI, including the scheme.
    pub api_consumer: String,
    /// Host of the Akismet REST API.
    pub api_endpoint: String,
    /// Version segment of the Akismet REST API.
    pub api_version: String,
    /// If set to false, all comments are treated as ham and no Akismet calls
    /// are made.
    pub enabled: bool,
}

impl AkismetConfig {
    pub fn new(api_key: impl Into<String>, api_consumer: impl Into<String>) -> Self {
        AkismetConfig {
            api_key: api_key.into(),
            api_consumer: api_consumer.into(),
            ..AkismetConfig::default()
        }
    }
}

impl Default for AkismetConfig {
    fn default() -> Self {
        AkismetConfig {
            api_key: String::new(),
            api_consumer: String::new(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            enabled: true,
        }
    }
}

/// Client for the Akismet REST API, generic over the HTTP transport.
///
/// The transport is caller-supplied; any handle implementing [`HttpClient`]
/// works. With the crate's `reqwest` feature (the default) the alias
/// [`AkismetClient`](crate::reqwest::client::AkismetClient) wires in a
/// `reqwest::Client`.
#[derive(Clone)]
pub struct BaseAkismetClient<Http>
where
    Http: HttpClient,
    AkismetClientError: From<Http::PostError>,
{
    http_client: Http,
    config: AkismetConfig,
}

impl<Http> BaseAkismetClient<Http>
where
    Http: HttpClient,
    AkismetClientError: From<Http::PostError>,
{
    pub fn new_custom(http_client: Http, config: AkismetConfig) -> Self {
        BaseAkismetClient {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &AkismetConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AkismetConfig {
        &mut self.config
    }

    pub fn http_client(&self) -> &Http {
        &self.http_client
    }

    /// The User-Agent header this library sends with every request. Not to
    /// be confused with [`AkismetComment::user_agent`], which describes the
    /// comment submitter.
    pub fn user_agent(&self) -> &'static str {
        USER_AGENT
    }

    /// Verify the configured API key.
    ///
    /// The key verification call should be made before beginning to use the
    /// service. This is the one call that goes to the bare endpoint host
    /// instead of the API key subdomain.
    ///
    /// Returns `Ok(false)` both for an explicit rejection and for any
    /// non-200 answer from the service; only transport failures surface as
    /// errors.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use akismet_sdk_rs::base_client::AkismetConfig;
    /// # use akismet_sdk_rs::error::AkismetClientError;
    /// # use akismet_sdk_rs::reqwest::client::AkismetClient;
    /// #
    /// # async fn demo() -> Result<(), AkismetClientError> {
    /// let client = AkismetClient::new(AkismetConfig::new(
    ///     "yourapikey",
    ///     "https://example.com/",
    /// ));
    ///
    /// if !client.verify_key().await? {
    ///     eprintln!("the configured API key was rejected");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn verify_key(&self) -> Result<bool, AkismetClientError> {
        let url = format!(
            "http://{}/{}/verify-key",
            self.config.api_endpoint, self.config.api_version
        );
        let body = serde_urlencoded::to_string([
            ("key", self.config.api_key.as_str()),
            ("blog", self.config.api_consumer.as_str()),
        ])?;

        let response = self
            .http_client
            .post(&url, self.default_headers(), body)
            .await?;

        if !response.is_success() {
            warn!(
                status = response.status,
                "something bad happened while verifying the key, assuming the key is invalid"
            );
            return Ok(false);
        }

        Ok(response.text.trim() == "valid")
    }

    /// Check one comment for spam.
    ///
    /// This is basically the core of everything: the call takes a number of
    /// characteristics about the submitted content and returns a thumbs up
    /// or thumbs down. When in doubt (any non-200 answer), the comment is
    /// assumed to be ham. A disabled client answers ham without touching the
    /// network.
    ///
    /// Returns `Ok(true)` if the comment is spam.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use akismet_sdk_rs::comment::AkismetComment;
    /// # use akismet_sdk_rs::error::AkismetClientError;
    /// # use akismet_sdk_rs::reqwest::client::AkismetClient;
    /// #
    /// # async fn demo(client: &AkismetClient) -> Result<(), AkismetClientError> {
    /// let comment = AkismetComment {
    ///     user_ip: "80.138.52.114".to_string(),
    ///     user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:109.0)".to_string(),
    ///     comment_content: Some("Nice outfit :D".to_string()),
    ///     ..AkismetComment::default()
    /// };
    ///
    /// if client.comment_check(&comment).await? {
    ///     // hold the comment back for moderation
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn comment_check(
        &self,
        comment: &AkismetComment,
    ) -> Result<bool, AkismetClientError> {
        if !self.config.enabled {
            debug!("client is disabled, treating the comment as ham");
            return Ok(false);
        }

        let response = self.call_akismet("comment-check", comment).await?;

        if !response.is_success() {
            warn!(
                status = response.status,
                "something bad happened while checking a comment, assuming the comment is ham"
            );
            return Ok(false);
        }

        let is_spam = response.text.trim() == "true";
        debug!(is_spam, "comment check completed");

        Ok(is_spam)
    }

    /// Report a false negative: a comment that went through as ham but
    /// should have been marked as spam.
    ///
    /// Returns `Ok(true)` if the submission was accepted.
    pub async fn submit_spam(&self, comment: &AkismetComment) -> Result<bool, AkismetClientError> {
        self.submit("submit-spam", comment).await
    }

    /// Report a false positive: a comment that was incorrectly marked as
    /// spam.
    ///
    /// Returns `Ok(true)` if the submission was accepted.
    pub async fn submit_ham(&self, comment: &AkismetComment) -> Result<bool, AkismetClientError> {
        self.submit("submit-ham", comment).await
    }

    async fn submit(
        &self,
        function: &'static str,
        comment: &AkismetComment,
    ) -> Result<bool, AkismetClientError> {
        let response = self.call_akismet(function, comment).await?;

        if !response.is_success() {
            warn!(
                status = response.status,
                function, "something bad happened while submitting"
            );
            return Ok(false);
        }

        // Akismet acknowledges submissions with a thank-you note; the body
        // carries no machine-readable signal.
        debug!(function, response = %response.text, "submission accepted");

        Ok(true)
    }

    async fn call_akismet(
        &self,
        function: &str,
        comment: &AkismetComment,
    ) -> Result<PostResponse, AkismetClientError> {
        let url = format!(
            "http://{}.{}/{}/{}",
            self.config.api_key, self.config.api_endpoint, self.config.api_version, function
        );
        let body = comment.to_form_body(&self.config.api_consumer)?;

        let response = self
            .http_client
            .post(&url, self.default_headers(), body)
            .await?;

        Ok(response)
    }

    fn default_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();

        headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
        headers.insert("Content-Type".to_string(), CONTENT_TYPE.to_string());

        headers
    }
}

#[cfg(test)]
mod test {
    use super::{AkismetConfig, BaseAkismetClient, USER_AGENT};
    use crate::comment::AkismetComment;
    use crate::error::{AkismetClientError, CommentError};
    use crate::http_client::{HttpClient, PostResponse};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    struct RecordedRequest {
        url: String,
        headers: HashMap<String, String>,
        body: String,
    }

    #[derive(Clone)]
    struct StubHttp {
        status: u16,
        body: &'static str,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl StubHttp {
        fn new(status: u16, body: &'static str) -> Self {
            StubHttp {
                status,
                body,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HttpClient for StubHttp {
        type PostError = anyhow::Error;

        async fn post<S: ToString + Send + Sync>(
            &self,
            url: &str,
            headers: HashMap<String, String>,
            body: S,
        ) -> Result<PostResponse, anyhow::Error> {
            self.requests.lock().unwrap().push(RecordedRequest {
                url: url.to_string(),
                headers,
                body: body.to_string(),
            });

            Ok(PostResponse {
                status: self.status,
                text: self.body.to_string(),
            })
        }
    }

    struct DownHttp;

    #[async_trait]
    impl HttpClient for DownHttp {
        type PostError = anyhow::Error;

        async fn post<S: ToString + Send + Sync>(
            &self,
            _url: &str,
            _headers: HashMap<String, String>,
            _body: S,
        ) -> Result<PostResponse, anyhow::Error> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    fn config() -> AkismetConfig {
        AkismetConfig::new("123test", "http://example.com/")
    }

    fn comment() -> AkismetComment {
        AkismetComment {
            user_ip: "80.138.52.114".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            comment_type: Some("comment".to_string()),
            comment_author: Some("Michael".to_string()),
            comment_content: Some("Nice outfit :D".to_string()),
            ..AkismetComment::default()
        }
    }

    #[test]
    fn config_defaults() {
        let config = config();

        assert_eq!(config.api_endpoint, "rest.akismet.com");
        assert_eq!(config.api_version, "1.1");
        assert!(config.enabled);
    }

    #[tokio::test]
    async fn verify_key_accepts_a_valid_body() {
        let http = StubHttp::new(200, "valid");
        let client = BaseAkismetClient::new_custom(http.clone(), config());

        assert!(client.verify_key().await.unwrap());

        let requests = http.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://rest.akismet.com/1.1/verify-key");
        assert_eq!(
            requests[0].body,
            "key=123test&blog=http%3A%2F%2Fexample.com%2F"
        );
    }

    #[tokio::test]
    async fn verify_key_trims_the_response_body() {
        let http = StubHttp::new(200, "\nvalid  ");
        let client = BaseAkismetClient::new_custom(http, config());

        assert!(client.verify_key().await.unwrap());
    }

    #[tokio::test]
    async fn verify_key_rejects_any_other_body() {
        let http = StubHttp::new(200, "invalid");
        let client = BaseAkismetClient::new_custom(http, config());

        assert!(!client.verify_key().await.unwrap());
    }

    #[tokio::test]
    async fn verify_key_treats_a_non_200_answer_as_invalid() {
        let http = StubHttp::new(500, "valid");
        let client = BaseAkismetClient::new_custom(http, config());

        assert!(!client.verify_key().await.unwrap());
    }

    #[tokio::test]
    async fn comment_check_flags_spam() {
        let http = StubHttp::new(200, "true");
        let client = BaseAkismetClient::new_custom(http.clone(), config());

        assert!(client.comment_check(&comment()).await.unwrap());

        let requests = http.requests.lock().unwrap();
        assert_eq!(
            requests[0].url,
            "http://123test.rest.akismet.com/1.1/comment-check"
        );
        assert!(requests[0].body.contains("user_ip=80.138.52.114"));
        assert!(requests[0].body.contains("blog=http%3A%2F%2Fexample.com%2F"));
    }

    #[tokio::test]
    async fn comment_check_passes_ham() {
        let http = StubHttp::new(200, "false");
        let client = BaseAkismetClient::new_custom(http, config());

        assert!(!client.comment_check(&comment()).await.unwrap());
    }

    #[tokio::test]
    async fn comment_check_treats_a_non_200_answer_as_ham() {
        let http = StubHttp::new(503, "true");
        let client = BaseAkismetClient::new_custom(http, config());

        assert!(!client.comment_check(&comment()).await.unwrap());
    }

    #[tokio::test]
    async fn a_disabled_client_never_touches_the_network() {
        let http = StubHttp::new(200, "true");
        let mut config = config();
        config.enabled = false;
        let client = BaseAkismetClient::new_custom(http.clone(), config);

        assert!(!client.comment_check(&comment()).await.unwrap());
        assert_eq!(http.request_count(), 0);
    }

    #[tokio::test]
    async fn a_blank_comment_fails_before_any_request() {
        let http = StubHttp::new(200, "true");
        let client = BaseAkismetClient::new_custom(http.clone(), config());

        let mut comment = comment();
        comment.user_agent = String::new();

        let err = client.comment_check(&comment).await.unwrap_err();

        assert!(matches!(
            err,
            AkismetClientError::Comment(CommentError::BlankRequiredField {
                field: "user_agent"
            })
        ));
        assert_eq!(http.request_count(), 0);
    }

    #[tokio::test]
    async fn submit_spam_reports_acceptance() {
        let http = StubHttp::new(200, "Thanks for making the web a better place.");
        let client = BaseAkismetClient::new_custom(http.clone(), config());

        assert!(client.submit_spam(&comment()).await.unwrap());

        let requests = http.requests.lock().unwrap();
        assert_eq!(
            requests[0].url,
            "http://123test.rest.akismet.com/1.1/submit-spam"
        );
    }

    #[tokio::test]
    async fn submit_ham_ignores_the_body_content() {
        let http = StubHttp::new(200, "");
        let client = BaseAkismetClient::new_custom(http.clone(), config());

        assert!(client.submit_ham(&comment()).await.unwrap());

        let requests = http.requests.lock().unwrap();
        assert_eq!(
            requests[0].url,
            "http://123test.rest.akismet.com/1.1/submit-ham"
        );
    }

    #[tokio::test]
    async fn submit_spam_fails_on_a_non_200_answer() {
        let http = StubHttp::new(500, "");
        let client = BaseAkismetClient::new_custom(http, config());

        assert!(!client.submit_spam(&comment()).await.unwrap());
    }

    #[tokio::test]
    async fn default_headers_are_attached_to_every_request() {
        let http = StubHttp::new(200, "valid");
        let client = BaseAkismetClient::new_custom(http.clone(), config());

        client.verify_key().await.unwrap();

        let requests = http.requests.lock().unwrap();
        assert_eq!(
            requests[0].headers.get("User-Agent").map(String::as_str),
            Some(USER_AGENT)
        );
        assert_eq!(
            requests[0].headers.get("Content-Type").map(String::as_str),
            Some("application/x-www-form-urlencoded; charset=utf-8")
        );
    }

    #[tokio::test]
    async fn transport_failures_surface_as_errors() {
        let client = BaseAkismetClient::new_custom(DownHttp, config());

        let err = client.verify_key().await.unwrap_err();

        assert!(matches!(err, AkismetClientError::UnknownError(_)));
    }
}
