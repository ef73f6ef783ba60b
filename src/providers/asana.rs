use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::DestinationWriter;
use crate::config::AsanaConfig;
use crate::error::RemoteError;
use crate::model::destination::{Created, Envelope, Membership, NewProject, NewSection, NewTask};

pub struct AsanaWriter {
    access_token: String,
    workspace_id: String,
    base_url: String,
    client: reqwest::Client,
}

impl AsanaWriter {
    pub fn new(config: &AsanaConfig, client: reqwest::Client) -> Self {
        Self {
            access_token: config.access_token.clone(),
            workspace_id: config.workspace_id.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn post<T>(&self, path: &str, data: T) -> Result<Created, RemoteError>
    where
        T: Serialize + Send + Sync,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "Asana POST");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&Envelope::new(data))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if status != StatusCode::CREATED {
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        parse_created(status.as_u16(), body)
    }
}

/// Pull the gid out of a 201 body. A missing, null or empty `data`
/// object, or one without a gid, counts as an empty response.
fn parse_created(status: u16, body: String) -> Result<Created, RemoteError> {
    if body.trim().is_empty() {
        return Err(RemoteError::EmptyBody { status, body });
    }
    let value: Value =
        serde_json::from_str(&body).map_err(|source| RemoteError::Decode { status, source })?;

    let data = match value.get("data") {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return Err(RemoteError::EmptyBody { status, body }),
    };
    let Some(gid) = data.get("gid").and_then(Value::as_str) else {
        return Err(RemoteError::EmptyBody { status, body });
    };

    Ok(Created {
        gid: gid.to_string(),
        name: data.get("name").and_then(Value::as_str).map(String::from),
    })
}

#[async_trait]
impl DestinationWriter for AsanaWriter {
    async fn create_project(&self, name: &str, notes: &str) -> Result<Created, RemoteError> {
        let project = NewProject {
            name: name.to_string(),
            notes: notes.to_string(),
            workspace: self.workspace_id.clone(),
        };
        self.post("/projects", project).await
    }

    async fn create_section(
        &self,
        project_gid: &str,
        name: &str,
    ) -> Result<Created, RemoteError> {
        let section = NewSection {
            name: name.to_string(),
        };
        self.post(&format!("/projects/{project_gid}/sections"), section)
            .await
    }

    async fn create_task(
        &self,
        project_gid: &str,
        section_gid: &str,
        name: &str,
        notes: &str,
        due_on: Option<&str>,
    ) -> Result<Created, RemoteError> {
        let task = NewTask {
            name: name.to_string(),
            notes: notes.to_string(),
            due_on: due_on.map(String::from),
            workspace: self.workspace_id.clone(),
            memberships: vec![Membership {
                project: project_gid.to_string(),
                section: section_gid.to_string(),
            }],
        };
        self.post("/tasks", task).await
    }
}
