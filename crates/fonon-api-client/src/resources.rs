//! Generic REST resource: `GET/POST {endpoint}`, `GET/PUT/DELETE {endpoint}/{id}`.

use async_trait::async_trait;
use fonon_core::{AppResult, Record, ResourceService};

use crate::{into_app_error, ApiClient};

/// [`ResourceService`] for one REST collection such as `/api/news`.
#[derive(Clone, Debug)]
pub struct RestResourceService {
    client: ApiClient,
    endpoint: String,
}

impl RestResourceService {
    pub fn new(client: ApiClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}/{}", self.endpoint, id)
    }
}

#[async_trait]
impl ResourceService for RestResourceService {
    async fn list(&self) -> AppResult<Vec<Record>> {
        let records: Vec<Record> = self
            .client
            .get(&self.endpoint, &[])
            .await
            .map_err(into_app_error)?;
        tracing::debug!(endpoint = %self.endpoint, count = records.len(), "Listed records");
        Ok(records)
    }

    async fn get(&self, id: i64) -> AppResult<Record> {
        self.client
            .get(&self.item_path(id), &[])
            .await
            .map_err(into_app_error)
    }

    async fn create(&self, payload: Record) -> AppResult<Record> {
        let created: Record = self
            .client
            .post_json(&self.endpoint, &payload)
            .await
            .map_err(into_app_error)?;
        tracing::info!(endpoint = %self.endpoint, "Record created");
        Ok(created)
    }

    async fn update(&self, id: i64, payload: Record) -> AppResult<Record> {
        let updated: Record = self
            .client
            .put_json(&self.item_path(id), &payload)
            .await
            .map_err(into_app_error)?;
        tracing::info!(endpoint = %self.endpoint, id, "Record updated");
        Ok(updated)
    }

    async fn remove(&self, id: i64) -> AppResult<()> {
        self.client
            .delete(&self.item_path(id), &[])
            .await
            .map_err(into_app_error)?;
        tracing::info!(endpoint = %self.endpoint, id, "Record removed");
        Ok(())
    }
}
