use serde::Serialize;

use super::error::{ApiError, ApiResult};
use super::gateway::{Credential, HttpGateway};
use crate::models::Envelope;
use crate::session::{Role, Session, SessionBlob};

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: String,
    pub employee_id: String,
    pub phone_number: String,
    pub address: String,
}

/// Login, registration and logout for both roles.
///
/// Successful calls that return a token persist the session.
#[derive(Clone)]
pub struct AuthClient {
    gateway: HttpGateway,
}

impl AuthClient {
    pub fn new(gateway: HttpGateway) -> Self {
        Self { gateway }
    }

    pub async fn admin_login(&self, email: &str, password: &str) -> ApiResult<Session> {
        self.login(Role::Admin, email, password).await
    }

    pub async fn employee_login(&self, email: &str, password: &str) -> ApiResult<Session> {
        self.login(Role::Employee, email, password).await
    }

    pub async fn admin_register(&self, registration: &AdminRegistration) -> ApiResult<Option<Session>> {
        log::info!("Registering admin {}", registration.email);
        self.register(Role::Admin, registration).await
    }

    pub async fn employee_register(
        &self,
        registration: &EmployeeRegistration,
    ) -> ApiResult<Option<Session>> {
        log::info!(
            "Registering employee {} ({})",
            registration.email,
            registration.employee_id
        );
        self.register(Role::Employee, registration).await
    }

    /// Drop the role's session. No request is made.
    pub fn logout(&self, role: Role) -> ApiResult<()> {
        self.gateway.sessions().clear(role)?;
        log::info!("Logged out {}", role);
        Ok(())
    }

    async fn login(&self, role: Role, email: &str, password: &str) -> ApiResult<Session> {
        log::debug!(
            "Login attempt: role={} email={} password_length={}",
            role,
            email,
            password.len()
        );

        let blob: SessionBlob = self
            .gateway
            .post(
                Credential::Anonymous,
                &["auth", role.as_str(), "login"],
                &Credentials { email, password },
                "Login failed",
            )
            .await
            .inspect_err(|e| log::warn!("Login failed for {}: {}", email, e))?;

        let session = blob.into_session(role).ok_or_else(|| ApiError::Rejected {
            message: "Login failed: no token returned".to_string(),
        })?;
        self.gateway.sessions().save(&session)?;
        log::info!("Login successful: {} {}", role, email);
        Ok(session)
    }

    async fn register<B: Serialize>(&self, role: Role, body: &B) -> ApiResult<Option<Session>> {
        let value: serde_json::Value = self
            .gateway
            .post(
                Credential::Anonymous,
                &["auth", role.as_str(), "register"],
                body,
                "Registration failed",
            )
            .await?;
        if !value.is_object() {
            return Ok(None);
        }

        let envelope: Envelope<serde_json::Value> =
            serde_json::from_value(value.clone()).map_err(ApiError::Decode)?;
        envelope.check("Registration failed")?;

        let session = match serde_json::from_value::<SessionBlob>(value) {
            Ok(blob) => blob.into_session(role),
            Err(_) => None,
        };
        if let Some(session) = &session {
            self.gateway.sessions().save(session)?;
        }
        Ok(session)
    }
}
