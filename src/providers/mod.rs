pub mod asana;
pub mod trello;

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::model::destination::Created;
use crate::model::source::{Board, BoardList, Card};

/// Read side of the migration: the board, list and card hierarchy.
#[async_trait]
pub trait SourceReader: Send + Sync {
    async fn list_boards(&self) -> Result<Vec<Board>, RemoteError>;
    async fn list_lists(&self, board_id: &str) -> Result<Vec<BoardList>, RemoteError>;
    async fn list_cards(&self, list_id: &str) -> Result<Vec<Card>, RemoteError>;
}

/// Write side of the migration: one creation call per entity.
#[async_trait]
pub trait DestinationWriter: Send + Sync {
    async fn create_project(&self, name: &str, notes: &str) -> Result<Created, RemoteError>;
    async fn create_section(&self, project_gid: &str, name: &str)
        -> Result<Created, RemoteError>;
    async fn create_task(
        &self,
        project_gid: &str,
        section_gid: &str,
        name: &str,
        notes: &str,
        due_on: Option<&str>,
    ) -> Result<Created, RemoteError>;
}

/// Build the HTTP client shared by both sides.
pub fn build_client(timeout: std::time::Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(timeout).build()
}
