use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use booklog_core::book::{Entry, EntryId, UpdateEntryRequest};
use booklog_core::storage::{RemoteEntryStore, RepositoryError, Result};

use super::error::{map_reqwest_error, map_status};

#[derive(Deserialize)]
struct IdRow {
    id: EntryId,
}

/// Remote store backed by a hosted PostgREST table.
#[derive(Debug, Clone)]
pub struct RestEntryStore {
    client: reqwest::Client,
    table_url: Url,
    table: String,
    api_key: String,
}

impl RestEntryStore {
    /// Creates a store for `{base_url}/rest/v1/{table}`.
    ///
    /// Every request gives up after `timeout`.
    pub fn new(
        base_url: &str,
        table: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let table_url = table_url(base_url, table)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(map_reqwest_error)?;

        Ok(Self {
            client,
            table_url,
            table: table.to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    fn request(&self, method: Method) -> RequestBuilder {
        tracing::debug!(%method, url = %self.table_url, "Remote request");
        self.client
            .request(method, self.table_url.clone())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Sends the request and turns a non-2xx answer into an error.
    async fn send(&self, request: RequestBuilder, entity_type: &'static str, id: &str) -> Result<Response> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_status(status.as_u16(), &body, entity_type, id))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }
}

fn table_url(base_url: &str, table: &str) -> Result<Url> {
    if table.trim().is_empty() {
        return Err(RepositoryError::InvalidData("table name is empty".to_string()));
    }

    let mut base =
        Url::parse(base_url).map_err(|e| RepositoryError::InvalidData(format!("{base_url}: {e}")))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(&format!("rest/v1/{table}"))
        .map_err(|e| RepositoryError::InvalidData(format!("{base_url}: {e}")))
}

fn id_filter(id: EntryId) -> [(&'static str, String); 1] {
    [("id", format!("eq.{id}"))]
}

#[async_trait]
impl RemoteEntryStore for RestEntryStore {
    async fn select_all(&self) -> Result<Vec<Entry>> {
        let request = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "title.asc")]);
        let response = self.send(request, "Table", &self.table).await?;
        Self::read_json(response).await
    }

    async fn select_ids(&self) -> Result<Vec<EntryId>> {
        let request = self.request(Method::GET).query(&[("select", "id")]);
        let response = self.send(request, "Table", &self.table).await?;
        let rows: Vec<IdRow> = Self::read_json(response).await?;
        Ok(rows.into_iter().map(|r| r.id).collect())
    }

    async fn insert(&self, entries: &[Entry]) -> Result<()> {
        let request = self
            .request(Method::POST)
            .header("Prefer", "return=minimal")
            .json(entries);
        self.send(request, "Table", &self.table).await?;
        Ok(())
    }

    async fn update(&self, id: EntryId, fields: &UpdateEntryRequest) -> Result<()> {
        let request = self
            .request(Method::PATCH)
            .query(&id_filter(id))
            .header("Prefer", "return=minimal")
            .json(fields);
        self.send(request, "Entry", &id.to_string()).await?;
        Ok(())
    }

    async fn delete(&self, id: EntryId) -> Result<()> {
        let request = self.request(Method::DELETE).query(&id_filter(id));
        self.send(request, "Entry", &id.to_string()).await?;
        Ok(())
    }
}
