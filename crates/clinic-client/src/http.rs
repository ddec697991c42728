//! # HTTP Client Adapter
//!
//! The single point of outbound communication. Applies the configured
//! base address and timeout, attaches `Authorization: Bearer` from the
//! credential store when a token is present, and implements the
//! 401-refresh rule:
//!
//! - On HTTP 401, when the request has not already been retried, attempt
//!   exactly one silent refresh against `POST token/refresh/`; on
//!   success, store the new access token and re-issue the original
//!   request once.
//! - On refresh failure, or on a second 401 after a fresh token, clear
//!   the stored credentials and fail with [`ApiError::SessionExpired`].
//!
//! The retry bound is an explicit attempt counter
//! (`MAX_AUTH_ATTEMPTS`), never a mutable flag on shared request
//! state, which guarantees termination. All other error statuses (403,
//! 404, 5xx, transport failures) propagate unchanged as typed errors;
//! the adapter does not interpret their semantics.
//!
//! ## Auth Boundary
//!
//! `POST login/` and `POST token/refresh/` bypass bearer injection and
//! the refresh rule ([`ApiClient::post_unauthenticated`]): a 401 from
//! the login endpoint means bad credentials, not an expired session.

use std::sync::Arc;

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{ApiConfig, ConfigError};
use crate::credentials::CredentialStore;
use crate::error::ApiError;

/// Total request attempts per call: the original issue plus at most one
/// retry after a silent token refresh.
const MAX_AUTH_ATTEMPTS: u8 = 2;

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// The HTTP adapter wrapping [`reqwest::Client`].
///
/// Cheap to share behind an [`Arc`]; gateways hold a clone each.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Build an adapter from resolved configuration and a credential
    /// store.
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|source| ApiError::Network {
                endpoint: config.base_url().to_string(),
                source,
            })?;
        Ok(Self {
            http,
            base_url: config.base_url().clone(),
            credentials,
        })
    }

    /// The credential store this adapter reads and refreshes.
    pub fn credentials(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(&self.credentials)
    }

    /// `GET` a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send_authed(Method::GET, path, None::<&()>).await?;
        Self::decode_json(path, response).await
    }

    /// `POST` a JSON body and decode the JSON response.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send_authed(Method::POST, path, Some(body)).await?;
        Self::decode_json(path, response).await
    }

    /// `PUT` a JSON body (full update) and decode the JSON response.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send_authed(Method::PUT, path, Some(body)).await?;
        Self::decode_json(path, response).await
    }

    /// `PATCH` a JSON body (partial update) and decode the JSON response.
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send_authed(Method::PATCH, path, Some(body)).await?;
        Self::decode_json(path, response).await
    }

    /// `DELETE` a resource; the expected success response is bodyless
    /// (204).
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send_authed(Method::DELETE, path, None::<&()>).await?;
        Self::check_status(path, response).await?;
        Ok(())
    }

    /// `POST` outside the authenticated boundary: no bearer header, no
    /// refresh-retry. Used for `login/` (and internally for
    /// `token/refresh/`).
    pub async fn post_unauthenticated<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Self::transport_error(path, e))?;
        Self::decode_json(path, response).await
    }

    /// Issue an authenticated request, applying the 401-refresh rule.
    async fn send_authed<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(path)?;
        let mut attempt: u8 = 0;
        loop {
            let mut request = self.http.request(method.clone(), url.clone());
            if let Some(token) = self.credentials.access() {
                request = request.bearer_auth(token);
            }
            if let Some(body) = body {
                request = request.json(body);
            }
            let response = request
                .send()
                .await
                .map_err(|e| Self::transport_error(path, e))?;

            if response.status() != StatusCode::UNAUTHORIZED {
                return Ok(response);
            }

            attempt += 1;
            if attempt < MAX_AUTH_ATTEMPTS {
                tracing::debug!(endpoint = path, "received 401, attempting silent refresh");
                self.refresh_access().await?;
                continue;
            }

            // A second 401 with a freshly minted token is a hard
            // authentication failure; retrying again could loop forever.
            tracing::warn!(endpoint = path, "401 after token refresh, clearing session");
            self.credentials.clear();
            return Err(ApiError::SessionExpired);
        }
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Any failure — no refresh token, transport error, rejection,
    /// malformed response — clears the stored credentials and yields
    /// [`ApiError::SessionExpired`].
    async fn refresh_access(&self) -> Result<(), ApiError> {
        let Some(refresh) = self.credentials.refresh() else {
            tracing::debug!("no refresh token stored, clearing session");
            self.credentials.clear();
            return Err(ApiError::SessionExpired);
        };

        let path = "token/refresh/";
        let url = self.endpoint(path)?;
        let body = serde_json::json!({ "refresh": refresh });

        let outcome: Result<RefreshResponse, ApiError> = async {
            let response = self
                .http
                .post(url)
                .json(&body)
                .send()
                .await
                .map_err(|e| Self::transport_error(path, e))?;
            Self::decode_json(path, response).await
        }
        .await;

        match outcome {
            Ok(refreshed) => {
                tracing::debug!("silent token refresh succeeded");
                self.credentials.store_access(refreshed.access);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("token refresh failed, clearing stored credentials: {e}");
                self.credentials.clear();
                Err(ApiError::SessionExpired)
            }
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|_| ConfigError::InvalidEndpoint {
                path: path.to_string(),
            })
            .map_err(ApiError::from)
    }

    fn transport_error(path: &str, source: reqwest::Error) -> ApiError {
        if source.is_timeout() {
            ApiError::Timeout {
                endpoint: path.to_string(),
            }
        } else {
            ApiError::Network {
                endpoint: path.to_string(),
                source,
            }
        }
    }

    /// Map a non-success status to its taxonomy variant.
    async fn check_status(path: &str, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::FORBIDDEN {
            return Err(ApiError::Forbidden {
                endpoint: path.to_string(),
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                endpoint: path.to_string(),
            });
        }
        if status.is_server_error() {
            return Err(ApiError::Server {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        let detail = Self::extract_detail(response).await;
        Err(ApiError::Api {
            endpoint: path.to_string(),
            status: status.as_u16(),
            detail,
        })
    }

    async fn decode_json<T: DeserializeOwned>(
        path: &str,
        response: Response,
    ) -> Result<T, ApiError> {
        let response = Self::check_status(path, response).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Deserialization {
                endpoint: path.to_string(),
                source,
            })
    }

    /// Pull the server's own error description out of a rejection body:
    /// the `detail`/`message` keys DRF uses, falling back to the raw
    /// text.
    async fn extract_detail(response: Response) -> String {
        let text = response.text().await.unwrap_or_default();
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) {
            for key in ["detail", "message"] {
                if let Some(detail) = value.get(key).and_then(|v| v.as_str()) {
                    return detail.to_string();
                }
            }
        }
        text
    }
}
