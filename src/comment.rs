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

use crate::error::CommentError;
use serde::{Deserialize, Serialize};

/// One piece of user-submitted content together with the metadata Akismet
/// feeds into its signature.
///
/// Almost everything is optional, but detection quality drops sharply when
/// elements are excluded; err on the side of too much data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AkismetComment {
    /// IP address of the comment submitter. Required.
    pub user_ip: String,
    /// User agent string of the web browser submitting the comment. Not to
    /// be confused with the user agent of this library. Required.
    pub user_agent: String,
    /// The content of the HTTP_REFERER header.
    pub referrer: Option<String>,
    /// The permanent location of the entry the comment was submitted to.
    pub permalink: Option<String>,
    /// May be "comment", "trackback", "pingback", or a made up value like
    /// "registration".
    pub comment_type: Option<String>,
    /// Name submitted with the comment.
    pub comment_author: Option<String>,
    /// Email address submitted with the comment.
    pub comment_author_email: Option<String>,
    /// URL submitted with the comment.
    pub comment_author_url: Option<String>,
    /// The content that was submitted.
    pub comment_content: Option<String>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl AkismetComment {
    /// Render the comment as a form-encoded request body.
    ///
    /// `blog` is the front page URL of the instance making the request; it
    /// accompanies every Akismet call and is therefore supplied by the client
    /// rather than stored on the comment. Optional fields that are blank are
    /// left out of the body entirely.
    pub fn to_form_body(&self, blog: &str) -> Result<String, CommentError> {
        if is_blank(&self.user_ip) {
            return Err(CommentError::BlankRequiredField { field: "user_ip" });
        }
        if is_blank(&self.user_agent) {
            return Err(CommentError::BlankRequiredField {
                field: "user_agent",
            });
        }

        let mut params: Vec<(&str, &str)> = vec![
            ("blog", blog),
            ("user_ip", self.user_ip.as_str()),
            ("user_agent", self.user_agent.as_str()),
        ];

        let optional = [
            ("referrer", &self.referrer),
            ("permalink", &self.permalink),
            ("comment_type", &self.comment_type),
            ("comment_author", &self.comment_author),
            ("comment_author_email", &self.comment_author_email),
            ("comment_author_url", &self.comment_author_url),
            ("comment_content", &self.comment_content),
        ];

        for (name, value) in optional {
            if let Some(value) = value {
                if !is_blank(value) {
                    params.push((name, value.as_str()));
                }
            }
        }

        Ok(serde_urlencoded::to_string(&params)?)
    }
}
