use async_trait::async_trait;
use log::debug;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    CreateStaffRequest, DeleteEntriesResponse, EntryListResponse, ScheduleEntry, StaffListResponse,
    StaffMember, UpdateEntryRequest, UpdateStaffRequest, UpsertEntryRequest,
};

use crate::config::ClientConfig;
use crate::services::store::{ScheduleStore, StoreError};

/// API client for the schedule store
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url,
            api_key: config.api_key,
        }
    }

    /// Create a new API client with the default base URL
    pub fn with_defaults() -> Self {
        Self::new(ClientConfig::default())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key).header("apikey", key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        debug!("Store answered {}: {}", status, message);

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized(message),
            StatusCode::NOT_FOUND => StoreError::NotFound(message),
            other => StoreError::Status {
                status: other.as_u16(),
                message,
            },
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ScheduleStore for ApiClient {
    async fn list_staff(&self) -> Result<Vec<StaffMember>, StoreError> {
        let response: StaffListResponse = self.send_json(self.client.get(self.url("/staff"))).await?;
        Ok(response.staff)
    }

    async fn insert_staff(&self, request: &CreateStaffRequest) -> Result<StaffMember, StoreError> {
        self.send_json(self.client.post(self.url("/staff")).json(request)).await
    }

    async fn update_staff(&self, staff_id: &str, patch: &UpdateStaffRequest) -> Result<StaffMember, StoreError> {
        let url = self.url(&format!("/staff/{}", staff_id));
        self.send_json(self.client.patch(url).json(patch)).await
    }

    async fn delete_staff(&self, staff_id: &str) -> Result<(), StoreError> {
        let url = self.url(&format!("/staff/{}", staff_id));
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn delete_entries_for_staff(&self, staff_id: &str) -> Result<u64, StoreError> {
        let url = self.url(&format!("/staff/{}/entries", staff_id));
        let response: DeleteEntriesResponse = self.send_json(self.client.delete(url)).await?;
        Ok(response.deleted_count)
    }

    async fn list_entries(&self, start: &str, end_exclusive: &str) -> Result<Vec<ScheduleEntry>, StoreError> {
        let request = self
            .client
            .get(self.url("/entries"))
            .query(&[("start", start), ("end", end_exclusive)]);
        let response: EntryListResponse = self.send_json(request).await?;
        Ok(response.entries)
    }

    async fn upsert_entry(&self, request: &UpsertEntryRequest) -> Result<ScheduleEntry, StoreError> {
        self.send_json(self.client.put(self.url("/entries")).json(request)).await
    }

    async fn update_entry(&self, entry_id: &str, patch: &UpdateEntryRequest) -> Result<ScheduleEntry, StoreError> {
        let url = self.url(&format!("/entries/{}", entry_id));
        self.send_json(self.client.patch(url).json(patch)).await
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<(), StoreError> {
        let url = self.url(&format!("/entries/{}", entry_id));
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
