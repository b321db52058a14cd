//! [`AdminApi`] over the Milvus RESTful API (v2).
//!
//! The REST API is stateless: every request carries the caller's credential as
//! `Authorization: Bearer <user>:<password>`. A "session" here is therefore a
//! credential that has been verified once and is remembered under its alias.

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace, warn};

use super::client::{AdminApi, ConnectParams, SessionHandle};
use super::error::{Result, ServiceError};
use crate::secrets::SecretString;

const LIST_USERS_PATH: &str = "/v2/vectordb/users/list";
const UPDATE_PASSWORD_PATH: &str = "/v2/vectordb/users/update_password";
const CREATE_USER_PATH: &str = "/v2/vectordb/users/create";

/// Credential remembered for an open session
struct SessionEntry {
    base_url: String,
    user: String,
    password: SecretString,
}

/// Administrative client for a Milvus server's REST endpoint.
pub struct MilvusRestClient {
    client: Client,
    sessions: DashMap<String, SessionEntry>,
}

impl MilvusRestClient {
    /// Create a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::client(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, sessions: DashMap::new() })
    }

    /// Base URL of the REST endpoint for `host:port`.
    pub fn base_url(host: &str, port: u16) -> String {
        format!("http://{}:{}", host, port)
    }

    /// Number of sessions currently registered.
    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }

    async fn post<T: Serialize>(
        &self,
        base_url: &str,
        path: &str,
        user: &str,
        password: &SecretString,
        body: &T,
    ) -> Result<()> {
        let url = format!("{}{}", base_url, path);
        debug!(user = %user, "POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(format!("{}:{}", user, password.expose_secret()))
            .json(body)
            .send()
            .await?;

        handle_response(response).await
    }

    /// Look up the credential registered for `session`.
    fn session_credential(&self, session: &SessionHandle) -> Result<(String, String, SecretString)> {
        let entry = self
            .sessions
            .get(&session.alias)
            .ok_or_else(|| ServiceError::unknown_session(&session.alias))?;
        Ok((entry.base_url.clone(), entry.user.clone(), entry.password.clone()))
    }
}

/// Check the HTTP status and the Milvus `code` field of the response envelope.
async fn handle_response(response: Response) -> Result<()> {
    let status = response.status();
    debug!("Response status: {}", status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|_| "<unable to read error>".to_string());
        return Err(ServiceError::Http { status: status.as_u16(), body });
    }

    let body = response.text().await?;
    trace!("Response body:\n{}", body);

    let envelope: ApiEnvelope = serde_json::from_str(&body)?;
    if envelope.code != 0 {
        return Err(ServiceError::rejected(
            envelope.code,
            envelope.message.unwrap_or_else(|| "no message".to_string()),
        ));
    }
    Ok(())
}

#[async_trait]
impl AdminApi for MilvusRestClient {
    async fn connect(&self, params: &ConnectParams) -> Result<SessionHandle> {
        let base_url = Self::base_url(&params.host, params.port);
        self.post(&base_url, LIST_USERS_PATH, &params.user, &params.password, &EmptyRequest {})
            .await?;

        let previous = self.sessions.insert(
            params.alias.clone(),
            SessionEntry {
                base_url,
                user: params.user.clone(),
                password: params.password.clone(),
            },
        );
        if previous.is_some() {
            warn!(alias = %params.alias, "Replaced an existing session");
        }

        Ok(SessionHandle::from_params(params))
    }

    async fn disconnect(&self, alias: &str) {
        if self.sessions.remove(alias).is_none() {
            debug!(alias = %alias, "Disconnect requested for unknown session");
        }
    }

    async fn reset_password(
        &self,
        user: &str,
        old_password: &SecretString,
        new_password: &SecretString,
        session: &SessionHandle,
    ) -> Result<()> {
        let (base_url, auth_user, auth_password) = self.session_credential(session)?;
        let request = UpdatePasswordRequest {
            user_name: user,
            password: old_password.expose_secret(),
            new_password: new_password.expose_secret(),
        };

        self.post(&base_url, UPDATE_PASSWORD_PATH, &auth_user, &auth_password, &request).await
    }

    async fn create_user(
        &self,
        username: &str,
        password: &SecretString,
        session: &SessionHandle,
    ) -> Result<()> {
        let (base_url, auth_user, auth_password) = self.session_credential(session)?;
        let request = CreateUserRequest { user_name: username, password: password.expose_secret() };

        self.post(&base_url, CREATE_USER_PATH, &auth_user, &auth_password, &request).await
    }
}

// === Data Transfer Objects (DTOs) ===

/// Response envelope shared by every v2 endpoint
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePasswordRequest<'a> {
    user_name: &'a str,
    password: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserRequest<'a> {
    user_name: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct EmptyRequest {}
