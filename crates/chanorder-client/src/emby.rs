//! HTTP implementation of the channel directory, sort-index writer and
//! task scheduler.

use chanorder_core::types::{ChannelInfo, ItemsResponse};
use chanorder_core::{
    ChanOrderConfig, ChannelDirectory, Error, IndexWrite, ManagementRecord, NumberMap, Result,
    ScheduledTask, SortIndexWriter, TaskScheduler,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Header carrying the API key on every request.
pub const TOKEN_HEADER: &str = "X-Emby-Token";

/// Client for one Emby server.
#[derive(Clone)]
pub struct EmbyClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl EmbyClient {
    /// Build a client from the run configuration.
    pub fn new(config: &ChanOrderConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(request_error)?;
        Ok(Self::with_client(http, config.base_url(), &config.api_key))
    }

    /// Build around an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);
        let response = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(request_error)?;
        let response = ensure_success(response, &url)?;
        response
            .json::<T>()
            .await
            .map_err(|e| Error::Decode(format!("{}: {}", url, e)))
    }

    async fn post(&self, path: &str, query: &[(&str, String)]) -> Result<u16> {
        let url = self.url(path);
        debug!("POST {} {:?}", url, query);
        let response = self
            .http
            .post(&url)
            .header(TOKEN_HEADER, &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(request_error)?;
        Ok(response.status().as_u16())
    }
}

impl ChannelDirectory for EmbyClient {
    async fn management_page(&self, start: usize, limit: usize) -> Result<Vec<ManagementRecord>> {
        let query = [
            ("IncludeItemTypes", "ChannelManagementInfo".to_string()),
            ("StartIndex", start.to_string()),
            ("Limit", limit.to_string()),
            ("SortBy", "DefaultChannelOrder".to_string()),
            ("SortOrder", "Ascending".to_string()),
            ("Recursive", "true".to_string()),
        ];
        let page: ItemsResponse<ManagementRecord> =
            self.get_json("/LiveTv/Manage/Channels", &query).await?;
        Ok(page.items)
    }

    async fn number_map(&self) -> Result<NumberMap> {
        let channels: ItemsResponse<ChannelInfo> = self.get_json("/LiveTv/Channels", &[]).await?;
        Ok(channels
            .items
            .into_iter()
            .map(|c| (c.id, c.number))
            .collect())
    }
}

impl SortIndexWriter for EmbyClient {
    async fn set_sort_index(&self, write: &IndexWrite) -> Result<u16> {
        let path = format!("/LiveTv/Manage/Channels/{}/SortIndex", write.channel_id);
        let query = [
            ("ManagementId", write.management_id.clone()),
            ("NewIndex", write.new_index.to_string()),
        ];
        self.post(&path, &query).await
    }
}

impl TaskScheduler for EmbyClient {
    async fn scheduled_tasks(&self) -> Result<Vec<ScheduledTask>> {
        self.get_json("/ScheduledTasks", &[]).await
    }

    async fn start_task(&self, task_id: &str) -> Result<u16> {
        self.post(&format!("/ScheduledTasks/Running/{}", task_id), &[])
            .await
    }
}

fn ensure_success(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Transport {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

fn request_error(e: reqwest::Error) -> Error {
    Error::Request(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped() {
        let client = EmbyClient::with_client(Client::new(), "http://tv:8096/emby/", "k");
        assert_eq!(client.base_url(), "http://tv:8096/emby");
        assert_eq!(
            client.url("/LiveTv/Channels"),
            "http://tv:8096/emby/LiveTv/Channels"
        );
    }

    #[test]
    fn test_new_from_config() {
        let config = ChanOrderConfig {
            server: "http://localhost:8096/emby/".into(),
            api_key: "k".into(),
            ..ChanOrderConfig::default()
        };
        let client = EmbyClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8096/emby");
    }
}
