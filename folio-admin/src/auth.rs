use folio_shared::{Session, User};
use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::client::Backend;
use crate::error::{BackendError, Result};

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

/// Identity provider: password sign-in, sign-out and session checks
pub struct AuthClient<'a> {
    backend: &'a Backend,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(backend: &'a Backend) -> Self {
        Self { backend }
    }

    /// Exchange email and password for a session. Rejected credentials are
    /// reported as [`BackendError::Auth`] and never retried.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        log::debug!("Signing in as {}", email);

        let response = self
            .backend
            .request(Method::POST, "auth/v1/token", None)
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password })
            .send()
            .await?;

        if response.status().is_client_error() {
            return Err(match BackendError::from_response("sign in", response).await {
                BackendError::Status { message, .. } if !message.is_empty() => {
                    BackendError::Auth(message)
                }
                _ => BackendError::Auth("invalid credentials".to_string()),
            });
        }
        if !response.status().is_success() {
            return Err(BackendError::from_response("sign in", response).await);
        }

        let session: Session = response.json().await?;
        log::info!("Signed in as {}", session.user.id);
        Ok(session)
    }

    pub async fn sign_out(&self, session: &Session) -> Result<()> {
        let response = self
            .backend
            .request(Method::POST, "auth/v1/logout", Some(session.access_token.as_str()))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::from_response("sign out", response).await);
        }

        log::info!("Signed out {}", session.user.id);
        Ok(())
    }

    /// The user behind a session; fails with [`BackendError::Auth`] once the
    /// token is invalid or expired.
    pub async fn current_user(&self, session: &Session) -> Result<User> {
        let response = self
            .backend
            .request(Method::GET, "auth/v1/user", Some(session.access_token.as_str()))
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BackendError::Auth(
                "invalid or expired token".to_string(),
            )),
            status if status.is_success() => Ok(response.json().await?),
            _ => Err(BackendError::from_response("fetch user", response).await),
        }
    }
}
