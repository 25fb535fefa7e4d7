use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i32,
    pub text: String,
    pub product_id: i32,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}
