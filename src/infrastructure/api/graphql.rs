// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! GraphQL over HTTP with bearer authentication

use crate::domain::config::CliConfig;
use crate::infrastructure::api::queries::Operation;
use crate::infrastructure::constants::{
    GRAPHQL_PATH, HTTP_CONNECT_TIMEOUT_SECS, HTTP_REQUEST_TIMEOUT_SECS, RETRY_MAX_TIMES,
    RETRY_MIN_DELAY_MS,
};
use crate::shared::error::{Result, ZeetError};
use backon::{ExponentialBuilder, Retryable};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a> {
    operation_name: &'a str,
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorMessage>,
}

#[derive(Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(config: &CliConfig) -> Result<Self> {
        Self::with_builder(config, reqwest::Client::builder())
    }

    fn with_builder(config: &CliConfig, builder: reqwest::ClientBuilder) -> Result<Self> {
        let token = config.require_token()?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ZeetError::config_error(format!("Invalid access token: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = builder
            .default_headers(headers)
            .user_agent(concat!("zeet-cli/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            endpoint: join_url(&config.server, GRAPHQL_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run an operation, retrying transient transport failures
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: serde_json::Value,
    ) -> Result<T> {
        let body = serde_json::to_vec(&GraphqlRequest {
            operation_name: operation.name,
            query: operation.query,
            variables,
        })?;

        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(RETRY_MIN_DELAY_MS))
            .with_max_times(RETRY_MAX_TIMES);

        (|| async { self.send_once(operation.name, &body).await })
            .retry(&backoff)
            .when(is_retryable)
            .notify(|e: &ZeetError, delay: Duration| {
                tracing::debug!(operation = operation.name, ?delay, "Retrying after: {}", e);
            })
            .await
    }

    async fn send_once<T: DeserializeOwned>(&self, name: &str, body: &[u8]) -> Result<T> {
        tracing::debug!(operation = name, endpoint = %self.endpoint, "GraphQL request");

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_vec())
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(operation = name, %status, bytes = text.len(), "GraphQL response");

        check_status(status, &text)?;
        decode(&text)
    }
}

/// Only connection failures, timeouts and 5xx answers are worth another attempt
fn is_retryable(err: &ZeetError) -> bool {
    matches!(err, ZeetError::Transport(_))
}

fn check_status(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ZeetError::Unauthorized(format!(
            "server rejected the access token (HTTP {})",
            status.as_u16()
        )));
    }
    if status.is_server_error() {
        return Err(ZeetError::transport(format!(
            "server error HTTP {}",
            status.as_u16()
        )));
    }
    Err(ZeetError::GraphQl(format!(
        "HTTP {}: {}",
        status.as_u16(),
        body.trim()
    )))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let response: GraphqlResponse<T> = serde_json::from_str(body)?;

    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(ZeetError::GraphQl(messages.join("; ")));
    }

    response
        .data
        .ok_or_else(|| ZeetError::GraphQl("response contained no data".to_string()))
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
