use crate::models;
use chrono::{DateTime, Utc};
use serde_derive::Serialize;

/// Read-side shape shared by the listing and detail pages: a product with
/// its category, author, tags, resource URLs and comments.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithRelations {
    #[serde(flatten)]
    pub product: models::Product,
    pub category: models::Category,
    pub author: Author,
    pub tags: Vec<models::Tag>,
    pub resource_urls: Vec<String>,
    pub comments: Vec<CommentWithAuthor>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    pub id: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author: Author,
}
