use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A saved piece of generated content, owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: String,
    #[serde(rename = "content")]
    pub body: String,
    pub platform: String,
    pub content_type: String,
    pub tone: String,
    pub style: String,
    pub keywords: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Optional list filters; all combine with AND.
#[derive(Debug, Default, Clone)]
pub struct ContentFilter {
    pub platform: Option<String>,
    pub content_type: Option<String>,
    pub search: Option<String>,
}

/// Partial update: only `Some` fields are written.
#[derive(Debug, Default, Clone)]
pub struct ContentPatch {
    pub topic: Option<String>,
    pub body: Option<String>,
    pub platform: Option<String>,
    pub content_type: Option<String>,
    pub tone: Option<String>,
    pub style: Option<String>,
    pub keywords: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewContent {
    pub topic: String,
    pub body: String,
    pub platform: String,
    pub content_type: String,
    pub tone: String,
    pub style: String,
    pub keywords: String,
}
