use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    /// Trello omits `desc` on some endpoints; treat that as empty.
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardList {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    /// Raw due timestamp as Trello sends it, e.g. `2024-01-01T00:00:00.000Z`.
    #[serde(default)]
    pub due: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_without_desc_defaults_to_empty() {
        let board: Board = serde_json::from_str(r#"{"id":"b1","name":"Sprint"}"#).unwrap();
        assert_eq!(board.desc, "");
    }

    #[test]
    fn card_with_null_due() {
        let card: Card =
            serde_json::from_str(r#"{"id":"c1","name":"Fix bug","desc":"","due":null}"#).unwrap();
        assert_eq!(card.due, None);
    }

    #[test]
    fn card_ignores_unknown_fields() {
        let json = r#"{"id":"c1","name":"Fix bug","desc":"urgent","due":"2024-01-01T00:00:00.000Z","idList":"l1","closed":false}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.desc, "urgent");
        assert_eq!(card.due.as_deref(), Some("2024-01-01T00:00:00.000Z"));
    }
}
