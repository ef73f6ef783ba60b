use thiserror::Error;

/// Failure of a single call to either remote API.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("status {status} but the response carried no data: {body}")]
    EmptyBody { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode response with status {status}: {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl RemoteError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Rejected { status, .. }
            | RemoteError::EmptyBody { status, .. }
            | RemoteError::Decode { status, .. } => Some(*status),
            RemoteError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            RemoteError::Rejected { body, .. } | RemoteError::EmptyBody { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RemoteError::Transport(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_exposes_status_and_body() {
        let err = RemoteError::Rejected {
            status: 401,
            body: "invalid key".into(),
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.body(), Some("invalid key"));
        assert!(!err.is_timeout());
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn decode_has_status_but_no_body() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = RemoteError::Decode {
            status: 200,
            source,
        };
        assert_eq!(err.status(), Some(200));
        assert_eq!(err.body(), None);
    }
}
