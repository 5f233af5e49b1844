/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! HTTP implementation of the console backend against the Compass API.

use async_trait::async_trait;
use console::directory::DirectoryResponse;
use console::{Assignment, AssignmentBackend, AssignmentPayload, BackendError};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub server_url: String,
    pub token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BaseResponse<T> {
    pub error: bool,
    pub message: T,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Serialize, Debug)]
struct PatchAssignmentRequest {
    is_active: bool,
}

pub type RequestType = reqwest::Method;

/// Maps a response status and body onto the console's error taxonomy.
pub fn decode_body<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<T, BackendError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let reason = serde_json::from_slice::<ErrorResponse>(bytes)
            .map(|e| e.error)
            .unwrap_or_else(|_| status.to_string());
        return Err(BackendError::Authentication(reason));
    }

    if status.is_success() {
        return serde_json::from_slice::<BaseResponse<T>>(bytes)
            .map(|res| res.message)
            .map_err(|_| BackendError::Malformed);
    }

    match serde_json::from_slice::<ErrorResponse>(bytes) {
        Ok(error) => Err(BackendError::Server {
            error: error.error,
            details: error.details,
        }),
        Err(_) => Err(BackendError::Malformed),
    }
}

async fn parse_response<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, BackendError> {
    let status = res.status();
    let bytes = res
        .bytes()
        .await
        .map_err(|e| BackendError::Transport(e.to_string()))?;

    decode_body(status, &bytes)
}

pub struct HttpBackend {
    config: RequestConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: RequestConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn get_client(
        &self,
        endpoint: &str,
        request_type: RequestType,
        login: bool,
    ) -> Result<reqwest::RequestBuilder, BackendError> {
        let mut client = self
            .client
            .request(
                request_type,
                format!(
                    "{}/api/v1/{}",
                    self.config.server_url.trim_end_matches('/'),
                    endpoint
                ),
            )
            .header("Content-Type", "application/json");

        if !login {
            return Ok(client);
        }

        let Some(token) = &self.config.token else {
            return Err(BackendError::Authentication(
                "Token not set. Use `compass config authtoken <token>` to set it.".to_string(),
            ));
        };

        client = client.header("Authorization", format!("Bearer {}", token));
        Ok(client)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let res = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        parse_response(res).await
    }

    pub async fn health(&self) -> Result<String, BackendError> {
        self.send(self.get_client("health", RequestType::GET, false)?)
            .await
    }
}

#[async_trait]
impl AssignmentBackend for HttpBackend {
    async fn fetch_directory(&self) -> Result<DirectoryResponse, BackendError> {
        self.send(self.get_client("directory", RequestType::GET, true)?)
            .await
    }

    async fn list_assignments(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<Assignment>, BackendError> {
        let endpoint = format!("assignments?include_inactive={}", include_inactive);
        self.send(self.get_client(&endpoint, RequestType::GET, true)?)
            .await
    }

    async fn create_assignment(
        &self,
        payload: &AssignmentPayload,
    ) -> Result<Assignment, BackendError> {
        let request = self
            .get_client("assignments", RequestType::POST, true)?
            .json(payload);
        self.send(request).await
    }

    async fn update_assignment(
        &self,
        id: Uuid,
        payload: &AssignmentPayload,
    ) -> Result<Assignment, BackendError> {
        let mut payload = payload.clone();
        payload.id = Some(id);

        let request = self
            .get_client(&format!("assignments/{}", id), RequestType::PUT, true)?
            .json(&payload);
        self.send(request).await
    }

    async fn set_assignment_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> Result<Assignment, BackendError> {
        let request = self
            .get_client(&format!("assignments/{}", id), RequestType::PATCH, true)?
            .json(&PatchAssignmentRequest { is_active });
        self.send(request).await
    }

    async fn delete_assignment(&self, id: Uuid) -> Result<(), BackendError> {
        let request = self.get_client(&format!("assignments/{}", id), RequestType::DELETE, true)?;
        let _: String = self.send(request).await?;
        Ok(())
    }
}
