//! Scripted stand-in for the Milvus administrative API.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use milvus_secure_init::secrets::SecretString;
use milvus_secure_init::service::{
    AdminApi, ConnectParams, Result as ServiceResult, ServiceError, SessionHandle,
};

pub const SHIPPED_PASSWORD: &str = "Milvus";

/// A recorded `reset_password` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetCall {
    pub user: String,
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Default)]
pub struct FakeState {
    /// Principal name → current password
    pub principals: HashMap<String, String>,
    /// Connects to refuse before the service counts as started
    pub unavailable_for: u32,
    /// Every (user, password) a connect was attempted with
    pub connect_attempts: Vec<(String, String)>,
    pub disconnects: Vec<String>,
    pub reset_calls: Vec<ResetCall>,
    pub created_users: Vec<(String, String)>,
    pub fail_reset: bool,
    pub fail_create: bool,
    /// Reject any login that doesn't use the shipped password
    pub reject_rotated_login: bool,
}

#[derive(Clone)]
pub struct FakeAdminApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeAdminApi {
    /// A started service that only knows `root` with its shipped password.
    pub fn new() -> Self {
        let mut state = FakeState::default();
        state.principals.insert("root".to_string(), SHIPPED_PASSWORD.to_string());
        Self { state: Arc::new(Mutex::new(state)) }
    }

    /// A service that refuses the first `attempts` connects.
    pub fn starting_up(attempts: u32) -> Self {
        let api = Self::new();
        api.state().unavailable_for = attempts;
        api
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl AdminApi for FakeAdminApi {
    async fn connect(&self, params: &ConnectParams) -> ServiceResult<SessionHandle> {
        let mut state = self.state();
        state
            .connect_attempts
            .push((params.user.clone(), params.password.expose_secret().to_string()));

        if state.unavailable_for > 0 {
            state.unavailable_for -= 1;
            return Err(ServiceError::transport(
                "error sending request for url (http://localhost:19530/v2/vectordb/users/list)",
            ));
        }

        if state.reject_rotated_login && params.password.expose_secret() != SHIPPED_PASSWORD {
            return Err(ServiceError::rejected(1800, "user hasn't authenticated"));
        }

        match state.principals.get(&params.user) {
            Some(current) if current == params.password.expose_secret() => {
                Ok(SessionHandle::from_params(params))
            }
            _ => Err(ServiceError::rejected(1800, "user hasn't authenticated")),
        }
    }

    async fn disconnect(&self, alias: &str) {
        self.state().disconnects.push(alias.to_string());
    }

    async fn reset_password(
        &self,
        user: &str,
        old_password: &SecretString,
        new_password: &SecretString,
        _session: &SessionHandle,
    ) -> ServiceResult<()> {
        let mut state = self.state();
        state.reset_calls.push(ResetCall {
            user: user.to_string(),
            old_password: old_password.expose_secret().to_string(),
            new_password: new_password.expose_secret().to_string(),
        });

        if state.fail_reset {
            return Err(ServiceError::rejected(1400, "old password not correct"));
        }
        if state.principals.get(user).map(String::as_str) != Some(old_password.expose_secret()) {
            return Err(ServiceError::rejected(1400, "old password not correct"));
        }

        state.principals.insert(user.to_string(), new_password.expose_secret().to_string());
        Ok(())
    }

    async fn create_user(
        &self,
        username: &str,
        password: &SecretString,
        _session: &SessionHandle,
    ) -> ServiceResult<()> {
        let mut state = self.state();

        if state.fail_create || state.principals.contains_key(username) {
            return Err(ServiceError::rejected(65535, "user already exists"));
        }

        state.principals.insert(username.to_string(), password.expose_secret().to_string());
        state.created_users.push((username.to_string(), password.expose_secret().to_string()));
        Ok(())
    }
}
