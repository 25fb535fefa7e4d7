use serde_derive::Deserialize;

/// Provider event envelope: `{"type": "user.created", "data": {...}}`.
/// Deleted events carry only the id, so every profile field is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailAddress {
    pub email_address: String,
}

impl EventData {
    pub fn primary_email(&self) -> Option<&str> {
        self.email_addresses
            .first()
            .map(|entry| entry.email_address.as_str())
    }

    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_created_event() {
        let event: Event = serde_json::from_str(
            r#"{
                "type": "user.created",
                "data": {
                    "id": "user_29w83",
                    "email_addresses": [{"email_address": "ada@example.com"}],
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "image_url": "https://img.example/ada.png"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(event.event_type, "user.created");
        assert_eq!(event.data.primary_email(), Some("ada@example.com"));
        assert_eq!(event.data.display_name(), "Ada Lovelace");
    }

    #[test]
    fn parses_a_deleted_event_with_sparse_data() {
        let event: Event = serde_json::from_str(
            r#"{"type": "user.deleted", "data": {"id": "user_29w83", "deleted": true}}"#,
        )
        .unwrap();
        assert_eq!(event.event_type, "user.deleted");
        assert!(event.data.primary_email().is_none());
        assert_eq!(event.data.display_name(), "");
    }
}
