use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{extract_message, ApiError, ApiResult};
use crate::models::Envelope;
use crate::session::{Role, SessionStore};

/// Which identity a request is sent as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    /// Login and registration endpoints.
    Anonymous,
    /// `Authorization: Bearer <token>` from the role's session.
    Bearer(Role),
}

/// Shared HTTP plumbing for the resource clients.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    sessions: SessionStore,
}

impl HttpGateway {
    pub fn new(base_url: Url, sessions: SessionStore) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("employee-portal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Setup(e.to_string()))?;

        Ok(Self::with_client(client, base_url, sessions))
    }

    pub fn with_client(client: Client, base_url: Url, sessions: SessionStore) -> Self {
        Self {
            client,
            base_url,
            sessions,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Setup(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build a request, attaching the bearer token when required.
    ///
    /// A missing session fails here, before anything is sent.
    fn request(
        &self,
        method: Method,
        credential: Credential,
        segments: &[&str],
    ) -> ApiResult<RequestBuilder> {
        let url = self.url(segments)?;
        let builder = self.client.request(method.clone(), url.clone());

        match credential {
            Credential::Anonymous => Ok(builder),
            Credential::Bearer(role) => {
                let session = self.sessions.get(role).ok_or_else(|| {
                    log::debug!("{} {} skipped: no {} session", method, url.path(), role);
                    ApiError::MissingSession(role)
                })?;
                Ok(builder.bearer_auth(session.token))
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        credential: Credential,
        segments: &[&str],
        fallback: &str,
    ) -> ApiResult<T> {
        let request = self.request(Method::GET, credential, segments)?;
        self.send(request, credential, fallback).await
    }

    pub async fn post<B, T>(
        &self,
        credential: Credential,
        segments: &[&str],
        body: &B,
        fallback: &str,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, credential, segments)?.json(body);
        self.send(request, credential, fallback).await
    }

    pub async fn put<B, T>(
        &self,
        credential: Credential,
        segments: &[&str],
        body: &B,
        fallback: &str,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, credential, segments)?.json(body);
        self.send(request, credential, fallback).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        credential: Credential,
        segments: &[&str],
        fallback: &str,
    ) -> ApiResult<T> {
        let request = self.request(Method::DELETE, credential, segments)?;
        self.send(request, credential, fallback).await
    }

    /// Send and classify. Bodies are decoded exactly once, here.
    ///
    /// A 401 on a bearer request drops that role's session so the stale
    /// token is never sent again. Anonymous calls (login, register) keep the
    /// server's message like any other failure.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        credential: Credential,
        fallback: &str,
    ) -> ApiResult<T> {
        let response = request.send().await.map_err(|e| {
            log::warn!("Request failed before a response arrived: {}", e);
            ApiError::from_transport(e)
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await.map_err(ApiError::from_transport)?;

        if status == StatusCode::UNAUTHORIZED {
            if let Credential::Bearer(role) = credential {
                log::warn!("{} answered 401, dropping {} session", url, role);
                if let Err(e) = self.sessions.clear(role) {
                    log::error!("Failed to clear stale {} session: {}", role, e);
                }
                return Err(ApiError::Unauthorized);
            }
        }

        if !status.is_success() {
            let message = extract_message(&body, fallback);
            log::warn!("{} answered {}: {}", url, status.as_u16(), message);
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let text = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str(text).map_err(|e| {
            log::error!("Could not decode response from {}: {}", url, e);
            ApiError::Decode(e)
        })
    }
}

impl<T> Envelope<T> {
    /// Turn a `success: false` envelope into an error.
    pub fn check(self, fallback: &str) -> ApiResult<Self> {
        if self.success == Some(false) {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string());
            return Err(ApiError::Rejected { message });
        }
        Ok(self)
    }
}

/// Decode a mutation's acknowledgement, keeping the server's message.
pub(crate) fn acknowledge(
    envelope: Option<Envelope<serde_json::Value>>,
    fallback: &str,
) -> ApiResult<Option<String>> {
    match envelope {
        Some(envelope) => Ok(envelope.check(fallback)?.message),
        None => Ok(None),
    }
}
