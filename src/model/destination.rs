use serde::Serialize;

/// Asana wraps every request and response body in `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub name: String,
    pub notes: String,
    pub workspace: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSection {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub name: String,
    pub notes: String,
    /// Serialized as JSON `null` when the card has no due date.
    pub due_on: Option<String>,
    pub workspace: String,
    pub memberships: Vec<Membership>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Membership {
    pub project: String,
    pub section: String,
}

/// The part of a creation response the migration needs to keep going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub gid: String,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_payload_shape() {
        let task = NewTask {
            name: "Fix bug".into(),
            notes: "urgent".into(),
            due_on: None,
            workspace: "ws-1".into(),
            memberships: vec![Membership {
                project: "p1".into(),
                section: "s1".into(),
            }],
        };
        let value = serde_json::to_value(Envelope::new(task)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "data": {
                    "name": "Fix bug",
                    "notes": "urgent",
                    "due_on": null,
                    "workspace": "ws-1",
                    "memberships": [{"project": "p1", "section": "s1"}]
                }
            })
        );
    }
}
