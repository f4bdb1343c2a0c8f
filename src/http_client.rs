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

use async_trait::async_trait;
use std::collections::HashMap;

#[derive(Debug)]
pub struct PostResponse {
    pub status: u16,
    pub text: String,
}

impl PostResponse {
    /// Akismet answers every well-formed call with HTTP 200, so only that
    /// exact status counts as success.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Thin wrapper around the HTTP capabilities required by the Akismet client.
///
/// Only simple POST semantics are needed to talk to the Akismet REST
/// endpoints; the bodies are always form-encoded strings. When the crate's
/// `reqwest` feature is enabled (the default), we provide an adapter for
/// `reqwest::Client` in [`reqwest::client`](crate::reqwest::client).
#[async_trait]
pub trait HttpClient: Sync {
    type PostError;

    async fn post<S: ToString + Send + Sync>(
        &self,
        url: &str,
        headers: HashMap<String, String>,
        body: S,
    ) -> Result<PostResponse, Self::PostError>;
}
