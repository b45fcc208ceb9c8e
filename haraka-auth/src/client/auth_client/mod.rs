mod models;

use crate::common::StoredSession;
pub use models::AuthClientError;
use models::*;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client for the Supabase auth (GoTrue) endpoints under `/auth/v1`.
pub struct SupabaseAuthClient {
    http_client: Client,
    auth_url: String,
    anon_key: SecretString,
}

impl SupabaseAuthClient {
    pub fn new(supabase_url: &str, anon_key: SecretString) -> Result<Self, AuthClientError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            auth_url: format!("{}/auth/v1", supabase_url.trim_end_matches('/')),
            anon_key,
        })
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<StoredSession, AuthClientError> {
        let grant = PasswordGrant {
            email,
            password: password.expose_secret(),
        };
        self.token_grant("password", &grant).await
    }

    pub async fn refresh_session(
        &self,
        refresh_token: &str,
    ) -> Result<StoredSession, AuthClientError> {
        self.token_grant("refresh_token", &RefreshGrant { refresh_token })
            .await
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthClientError> {
        let url = format!("{}/logout", self.auth_url);

        let resp = self
            .http_client
            .post(&url)
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(failure_from(status.as_u16(), &body))
    }

    async fn token_grant<B>(
        &self,
        grant_type: &str,
        body: &B,
    ) -> Result<StoredSession, AuthClientError>
    where
        B: serde::Serialize,
    {
        let url = format!("{}/token", self.auth_url);
        tracing::debug!("Requesting session with grant_type={}", grant_type);

        let resp = self
            .http_client
            .post(&url)
            .query(&[("grant_type", grant_type)])
            .header("apikey", self.anon_key.expose_secret())
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(failure_from(status.as_u16(), &body));
        }

        let session = resp.json::<SessionResponse>().await?;
        Ok(session.into_stored(chrono::Utc::now()))
    }
}
