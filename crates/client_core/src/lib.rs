//! Async REST client for the vehicle catalog backend.
//!
//! One client instance is owned by the desktop worker thread; every method
//! maps to a single backend request and decodes either the expected body or
//! the backend's `ApiError` envelope.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Vehicle, VehicleId},
    error::{ApiError, ErrorCode},
    protocol::{VehicleDraft, VehiclePage},
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected request ({code:?}): {message}")]
    Api { code: ErrorCode, message: String },
    #[error("unexpected status {status} from {path}")]
    UnexpectedStatus { status: StatusCode, path: String },
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::Api {
                code: ErrorCode::NotFound,
                ..
            }
        )
    }
}

pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// `GET /vehicles?page={page}&search={query}`. Both parameters are always
    /// sent; an empty query goes over the wire as `search=`.
    pub async fn fetch_page(&self, page: u32, search: &str) -> Result<VehiclePage, CatalogError> {
        debug!(page, search, "fetching vehicle page");
        let response = self
            .http
            .get(format!("{}/vehicles", self.base_url))
            .query(&[("page", page.to_string().as_str()), ("search", search)])
            .send()
            .await?;
        decode_json(response, "/vehicles").await
    }

    pub async fn create_vehicle(&self, draft: &VehicleDraft) -> Result<Vehicle, CatalogError> {
        debug!(make = %draft.make, model = %draft.model, "creating vehicle");
        let response = self
            .http
            .post(format!("{}/vehicles", self.base_url))
            .json(draft)
            .send()
            .await?;
        decode_json(response, "/vehicles").await
    }

    pub async fn update_vehicle(
        &self,
        id: &VehicleId,
        draft: &VehicleDraft,
    ) -> Result<Vehicle, CatalogError> {
        debug!(vehicle_id = %id, "updating vehicle");
        let path = format!("/vehicles/{id}");
        let response = self
            .http
            .put(format!("{}{path}", self.base_url))
            .json(draft)
            .send()
            .await?;
        decode_json(response, &path).await
    }

    pub async fn delete_vehicle(&self, id: &VehicleId) -> Result<(), CatalogError> {
        debug!(vehicle_id = %id, "deleting vehicle");
        let path = format!("/vehicles/{id}");
        let response = self
            .http
            .delete(format!("{}{path}", self.base_url))
            .send()
            .await?;
        ensure_success(response, &path).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response, path: &str) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    // Prefer the backend's structured envelope; fall back to the bare status
    // when the body is absent or not JSON.
    match response.json::<ApiError>().await {
        Ok(envelope) => Err(CatalogError::Api {
            code: envelope.code,
            message: envelope.message,
        }),
        Err(_) => Err(CatalogError::UnexpectedStatus {
            status,
            path: path.to_string(),
        }),
    }
}

async fn decode_json<T: DeserializeOwned>(
    response: Response,
    path: &str,
) -> Result<T, CatalogError> {
    let response = ensure_success(response, path).await?;
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
