use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "product_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Alive,
    Dead,
    AlmostDead,
    BarelyAlive,
}

impl ProductStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProductStatus::Alive => "Alive",
            ProductStatus::Dead => "Dead",
            ProductStatus::AlmostDead => "Almost dead",
            ProductStatus::BarelyAlive => "Barely alive",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub slogan: String,
    pub description: String,
    pub status: ProductStatus,
    pub date_of_creation: DateTime<Utc>,
    pub date_of_death: Option<DateTime<Utc>>,
    pub number_of_users: i32,
    pub reason_for_failure: String,
    pub key_challenges: String,
    pub lessons_learned: String,
    pub what_would_you_do_differently: Option<String>,
    pub tips_or_advice: String,
    pub website: Option<String>,
    pub x_account: Option<String>,
    pub category_id: i32,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_deserializes_from_wire_names() {
        let status: ProductStatus = serde_json::from_str(r#""ALMOST_DEAD""#).unwrap();
        assert_eq!(status, ProductStatus::AlmostDead);
        let status: ProductStatus = serde_json::from_str(r#""DEAD""#).unwrap();
        assert_eq!(status, ProductStatus::Dead);
        assert!(serde_json::from_str::<ProductStatus>(r#""EXTINCT""#).is_err());
    }

    #[test]
    fn status_labels() {
        assert_eq!(ProductStatus::BarelyAlive.label(), "Barely alive");
        assert_eq!(ProductStatus::Alive.label(), "Alive");
    }
}
