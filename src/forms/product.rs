use crate::models::ProductStatus;
use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use serde_valid::Validate;

// Client-side forms validate the same bounds, but the server never trusts
// them; this schema is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProductForm {
    #[validate(min_length = 1, message = "Name is required.")]
    #[validate(max_length = 40, message = "Name must not be longer than 40 characters.")]
    pub name: String,
    #[validate(pattern = r"^https?://\S+$", message = "Please enter a valid URL.")]
    pub website: Option<String>,
    #[validate(min_length = 1, message = "Slogan is required.")]
    #[validate(max_length = 60, message = "Slogan must not be longer than 60 characters.")]
    pub slogan: String,
    #[validate(min_length = 10, message = "Description must be at least 10 characters.")]
    #[validate(
        max_length = 500,
        message = "Description must not be longer than 500 characters."
    )]
    pub description: String,
    #[validate(min_length = 1, message = "Category is required.")]
    pub category: String,
    #[validate]
    pub tags: Option<Vec<SelectedTag>>,
    #[validate(min_length = 10)]
    #[validate(
        max_length = 1200,
        message = "Lessons learned must not be longer than 1200 characters."
    )]
    pub lessons_learned: String,
    pub status: ProductStatus,
    pub date_of_creation: DateTime<Utc>,
    pub range_of_existence: ExistenceRange,
    #[validate(minimum = 0)]
    pub number_of_users: i32,
    #[validate]
    pub resources_urls: Option<Vec<ResourceUrlEntry>>,
    #[validate(min_length = 1, message = "Reason is required.")]
    #[validate(
        max_length = 1200,
        message = "Reason must not be longer than 1200 characters."
    )]
    pub reason_for_failure: String,
    #[validate(min_length = 1, message = "Key challenges are required.")]
    #[validate(
        max_length = 1200,
        message = "Key challenges must not be longer than 1200 characters."
    )]
    pub key_challenges: String,
    #[validate(max_length = 1200)]
    pub what_would_you_do_differently: Option<String>,
    #[validate(min_length = 1, message = "Tips or advice are required.")]
    #[validate(
        max_length = 1200,
        message = "Tips or advice must not be longer than 1200 characters."
    )]
    pub tips_or_advice: String,
    pub x_account: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SelectedTag {
    #[validate(min_length = 1)]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResourceUrlEntry {
    #[validate(pattern = r"^https?://\S+$", message = "Please enter a valid URL.")]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistenceRange {
    pub from: DateTime<Utc>,
    pub to: Option<DateTime<Utc>>,
}

impl SubmitProductForm {
    /// A dead product existed over the submitted range, so its creation date
    /// comes from the range start; anything still limping along keeps the
    /// submitted creation date.
    pub fn resolved_dates(&self) -> (DateTime<Utc>, Option<DateTime<Utc>>) {
        match self.status {
            ProductStatus::Dead => (self.range_of_existence.from, self.range_of_existence.to),
            _ => (self.date_of_creation, self.range_of_existence.to),
        }
    }

    /// Numeric tag ids, deduplicated so a repeated selection cannot break
    /// the tag-link insert.
    pub fn tag_ids(&self) -> Result<Vec<i32>, String> {
        let mut ids = Vec::new();
        for tag in self.tags.as_deref().unwrap_or_default() {
            let id = tag
                .value
                .parse::<i32>()
                .map_err(|_| format!("tag id is not numeric: {}", tag.value))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    pub fn resource_urls(&self) -> Vec<String> {
        self.resources_urls
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|entry| !entry.value.trim().is_empty())
            .map(|entry| entry.value.clone())
            .collect()
    }
}
