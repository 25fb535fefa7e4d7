use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Mirrored from the identity provider; id is the provider id, so it is a
// string and is never generated locally.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
