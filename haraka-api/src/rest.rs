//! Thin typed access to the Supabase REST (PostgREST) interface.
//!
//! Each backend operation is a request struct implementing [`RestRequest`];
//! the repositories in [`crate::repositories`] are the only place those
//! structs are built, so callers never deal with table names.

use std::fmt::Display;
use std::time::Duration;

use reqwest::{Client as HttpClient, Method};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};

use crate::HarakaApiError;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// A PostgREST operation against one table.
pub trait RestRequest {
    /// Row type decoded from the response array.
    type Row: DeserializeOwned;
    /// JSON body sent with inserts and updates. `()` for reads and deletes.
    type Body: Serialize;

    const METHOD: Method = Method::GET;

    fn table(&self) -> &'static str;

    fn query(&self) -> RestQuery;

    fn body(&self) -> Option<&Self::Body> {
        None
    }

    /// Value of the `Prefer` header, if any.
    fn prefer(&self) -> Option<&'static str> {
        None
    }
}

/// PostgREST query string builder (`select`, column filters, `order`, `limit`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestQuery {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl RestQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn in_list<I, T>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let joined = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.filters
            .push((column.to_string(), format!("in.({})", joined)));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order = Some(format!("{}.{}", column, direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query pairs in the order PostgREST documents them.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 3);
        if let Some(ref select) = self.select {
            pairs.push(("select".to_string(), select.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        if let Some(ref order) = self.order {
            pairs.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// Authenticated client for `{SUPABASE_URL}/rest/v1`.
pub struct SupabaseClient {
    http: HttpClient,
    rest_url: String,
    anon_key: SecretString,
    access_token: SecretString,
}

impl SupabaseClient {
    pub fn new(
        supabase_url: &str,
        anon_key: SecretString,
        access_token: SecretString,
    ) -> Result<Self, HarakaApiError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", supabase_url.trim_end_matches('/')),
            anon_key,
            access_token,
        })
    }

    /// Run a request and decode every returned row.
    pub async fn fetch<R>(&self, request: R) -> Result<Vec<R::Row>, HarakaApiError>
    where
        R: RestRequest,
    {
        let response = self.dispatch(&request).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| HarakaApiError::Decode(e.to_string()))
    }

    /// Run a request expected to match at most one row.
    pub async fn fetch_one<R>(&self, request: R) -> Result<Option<R::Row>, HarakaApiError>
    where
        R: RestRequest,
    {
        Ok(self.fetch(request).await?.into_iter().next())
    }

    /// Run a write whose response body is not needed.
    pub async fn execute<R>(&self, request: R) -> Result<(), HarakaApiError>
    where
        R: RestRequest,
    {
        self.dispatch(&request).await?;
        Ok(())
    }

    async fn dispatch<R>(&self, request: &R) -> Result<reqwest::Response, HarakaApiError>
    where
        R: RestRequest,
    {
        let url = format!("{}/{}", self.rest_url, request.table());
        let query = request.query().pairs();
        tracing::debug!("{} {} {:?}", R::METHOD, request.table(), query);

        let mut builder = self
            .http
            .request(R::METHOD, &url)
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(self.access_token.expose_secret())
            .query(&query);

        if let Some(prefer) = request.prefer() {
            builder = builder.header("Prefer", prefer);
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = HarakaApiError::from_rest_failure(status.as_u16(), &body);
        tracing::warn!("{} {} failed: {}", R::METHOD, request.table(), error);
        Err(error)
    }
}
