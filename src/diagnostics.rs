//! Structured records of everything that went wrong (or came back empty)
//! during a run. Each record is logged once through `tracing` when it is
//! recorded and kept so the caller can inspect or persist it.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::RemoteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Non-success status from either API.
    RemoteRejection,
    /// Success status without the expected payload.
    EmptyBody,
    /// Connection failure or timeout.
    Transport,
    /// Success status with a body that could not be decoded.
    Decode,
    /// A read succeeded but returned nothing.
    EmptyListing,
    /// A card's due date was not in Trello's format.
    DateParse,
    /// Descendants not migrated because their parent was not created.
    SkippedSubtree,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::RemoteRejection => "remote_rejection",
            DiagnosticKind::EmptyBody => "empty_body",
            DiagnosticKind::Transport => "transport",
            DiagnosticKind::Decode => "decode",
            DiagnosticKind::EmptyListing => "empty_listing",
            DiagnosticKind::DateParse => "date_parse",
            DiagnosticKind::SkippedSubtree => "skipped_subtree",
        }
    }

    fn is_failure(&self) -> bool {
        !matches!(self, DiagnosticKind::EmptyListing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Board,
    List,
    Card,
    Project,
    Section,
    Task,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Board => "board",
            Entity::List => "list",
            Entity::Card => "card",
            Entity::Project => "project",
            Entity::Section => "section",
            Entity::Task => "task",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub entity: Entity,
    /// Source id (or destination gid) the event is about, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, entity: Entity, message: impl Into<String>) -> Self {
        Self {
            kind,
            entity,
            entity_id: None,
            status: None,
            body: None,
            message: message.into(),
        }
    }

    pub fn with_id(mut self, id: Option<&str>) -> Self {
        self.entity_id = id.map(String::from);
        self
    }

    /// Classify a failed remote call. `entity` is what the call was
    /// reading or creating; `id` is the source record involved.
    pub fn from_remote(err: &RemoteError, entity: Entity, id: Option<&str>) -> Self {
        let kind = match err {
            RemoteError::Rejected { .. } => DiagnosticKind::RemoteRejection,
            RemoteError::EmptyBody { .. } => DiagnosticKind::EmptyBody,
            RemoteError::Transport(_) => DiagnosticKind::Transport,
            RemoteError::Decode { .. } => DiagnosticKind::Decode,
        };
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };
        let mut diag = Self::new(kind, entity, message).with_id(id);
        diag.status = err.status();
        diag.body = err.body().map(String::from);
        diag
    }

    pub fn emit(&self) {
        let entity_id = self.entity_id.as_deref().unwrap_or("");
        let body = self.body.as_deref().unwrap_or("");
        if self.kind.is_failure() {
            warn!(
                kind = self.kind.as_str(),
                entity = self.entity.as_str(),
                entity_id,
                status = self.status,
                body,
                "{}",
                self.message
            );
        } else {
            info!(
                kind = self.kind.as_str(),
                entity = self.entity.as_str(),
                entity_id,
                "{}",
                self.message
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_keeps_status_and_body() {
        let err = RemoteError::Rejected {
            status: 403,
            body: r#"{"errors":[{"message":"Forbidden"}]}"#.into(),
        };
        let diag = Diagnostic::from_remote(&err, Entity::Project, None);
        assert_eq!(diag.kind, DiagnosticKind::RemoteRejection);
        assert_eq!(diag.status, Some(403));
        assert_eq!(
            diag.body.as_deref(),
            Some(r#"{"errors":[{"message":"Forbidden"}]}"#)
        );
    }

    #[test]
    fn empty_body_is_classified() {
        let err = RemoteError::EmptyBody {
            status: 201,
            body: r#"{"data":{}}"#.into(),
        };
        let diag = Diagnostic::from_remote(&err, Entity::Section, Some("p1"));
        assert_eq!(diag.kind, DiagnosticKind::EmptyBody);
        assert_eq!(diag.entity_id.as_deref(), Some("p1"));
    }

    #[test]
    fn serializes_snake_case_and_skips_empty_fields() {
        let diag = Diagnostic::new(DiagnosticKind::EmptyListing, Entity::List, "no lists")
            .with_id(Some("b1"));
        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains(r#""kind":"empty_listing""#));
        assert!(json.contains(r#""entity":"list""#));
        assert!(!json.contains("status"));
        assert!(!json.contains("body"));
    }
}
