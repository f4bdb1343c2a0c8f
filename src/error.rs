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

#[cfg(feature = "reqwest")]
use http::header::{InvalidHeaderName, InvalidHeaderValue};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AkismetClientError {
    #[error("Comment error: {0}")]
    Comment(#[from] CommentError),

    #[error("Form serialization error: {0}")]
    FormSerialization(#[from] serde_urlencoded::ser::Error),

    #[cfg(feature = "reqwest")]
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] ReqwestError),

    #[error("Unknown error: {0}")]
    UnknownError(#[from] anyhow::Error),
}

#[cfg(feature = "reqwest")]
#[derive(Debug, Error)]
pub enum ReqwestError {
    #[error("A reqwest error occurred: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Unable to convert http headers: InvalidHeaderValue")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
    #[error("Unable to convert http headers: InvalidHeaderName")]
    InvalidHeaderName(#[from] InvalidHeaderName),
}

#[derive(Debug, Error)]
pub enum CommentError {
    #[error("Required comment field `{field}` must not be blank")]
    BlankRequiredField { field: &'static str },

    #[error("Form serialization error: {0}")]
    FormSerialization(#[from] serde_urlencoded::ser::Error),
}
