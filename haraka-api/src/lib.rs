pub mod endpoints;
mod error;
mod macros;
pub mod repositories;
pub mod rest;

pub use crate::error::HarakaApiError;
pub use crate::rest::{RestQuery, RestRequest, SupabaseClient};
use repositories::*;
use tower_api_client::{Client as ApiClient, Request as ApiRequest};

/// Client for the payments HTTP API (`{API_BASE}/api/payments/...`).
///
/// Every request carries the parent's session token as a bearer token.
pub struct PaymentsClient {
    inner: ApiClient,
}

impl PaymentsClient {
    pub fn new(api_base: &str, access_token: &str) -> Self {
        let api_base = api_base.trim_end_matches('/');
        Self {
            inner: ApiClient::new(api_base).bearer_auth(access_token),
        }
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, HarakaApiError>
    where
        R: ApiRequest,
    {
        self.inner.send(request).await.map_err(From::from)
    }
}

pub struct Request;

impl Request {
    pub fn parents() -> ParentRepository {
        ParentRepository::new()
    }

    pub fn students() -> StudentRepository {
        StudentRepository::new()
    }

    pub fn academic_years() -> AcademicYearRepository {
        AcademicYearRepository::new()
    }

    pub fn fee_assignments() -> FeeAssignmentRepository {
        FeeAssignmentRepository::new()
    }

    pub fn payments() -> PaymentRepository {
        PaymentRepository::new()
    }
}
