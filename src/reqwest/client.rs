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

use crate::base_client::{AkismetConfig, BaseAkismetClient};
use crate::error::ReqwestError;
use crate::http_client::{HttpClient, PostResponse};
use async_trait::async_trait;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::collections::HashMap;

/// Akismet client backed by a `reqwest::Client`.
pub type AkismetClient = BaseAkismetClient<Client>;

impl AkismetClient {
    /// Build a client with a fresh `reqwest::Client`. Timeouts, proxies, and
    /// TLS settings can be tuned by constructing the transport yourself and
    /// going through [`BaseAkismetClient::new_custom`] instead.
    pub fn new(config: AkismetConfig) -> Self {
        BaseAkismetClient::new_custom(Client::new(), config)
    }
}

#[async_trait]
impl HttpClient for Client {
    type PostError = ReqwestError;

    async fn post<S: ToString + Send + Sync>(
        &self,
        url: &str,
        headers: HashMap<String, String>,
        body: S,
    ) -> Result<PostResponse, ReqwestError> {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            header_map.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(&value)?,
            );
        }

        let response = self
            .post(url)
            .headers(header_map)
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(PostResponse { status, text })
    }
}
