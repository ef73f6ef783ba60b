use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::SourceReader;
use crate::config::TrelloConfig;
use crate::error::RemoteError;
use crate::model::source::{Board, BoardList, Card};

pub struct TrelloReader {
    api_key: String,
    token: String,
    base_url: String,
    client: reqwest::Client,
}

impl TrelloReader {
    pub fn new(config: &TrelloConfig, client: reqwest::Client) -> Self {
        Self {
            api_key: config.api_key.clone(),
            token: config.token.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn auth_params(&self) -> [(&str, &str); 2] {
        [("key", &self.api_key), ("token", &self.token)]
    }

    async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, RemoteError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "Trello GET");

        let resp = self
            .client
            .get(&url)
            .query(&self.auth_params())
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if status != StatusCode::OK {
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // Trello answers an empty collection with `[]`; tolerate an empty body too.
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&body).map_err(|source| RemoteError::Decode {
            status: status.as_u16(),
            source,
        })
    }
}

#[async_trait]
impl SourceReader for TrelloReader {
    async fn list_boards(&self) -> Result<Vec<Board>, RemoteError> {
        self.get_all("/members/me/boards").await
    }

    async fn list_lists(&self, board_id: &str) -> Result<Vec<BoardList>, RemoteError> {
        self.get_all(&format!("/boards/{board_id}/lists")).await
    }

    async fn list_cards(&self, list_id: &str) -> Result<Vec<Card>, RemoteError> {
        self.get_all(&format!("/lists/{list_id}/cards")).await
    }
}
