use serde::{Deserialize, Serialize};

use crate::content::repo_types::ContentItem;

#[derive(Debug, Deserialize)]
pub struct SaveContentRequest {
    pub topic: Option<String>,
    pub content: Option<String>,
    pub platform: Option<String>,
    pub content_type: Option<String>,
    pub tone: Option<String>,
    pub style: Option<String>,
    pub keywords: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub topic: Option<String>,
    pub content: Option<String>,
    pub platform: Option<String>,
    pub content_type: Option<String>,
    pub tone: Option<String>,
    pub style: Option<String>,
    pub keywords: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    pub platform: Option<String>,
    pub content_type: Option<String>,
    pub search: Option<String>,
}

fn default_page() -> i64 {
    1
}
fn default_per_page() -> i64 {
    20
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default = "default_recent_limit")]
    pub limit: i64,
}

fn default_recent_limit() -> i64 {
    5
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "json".into()
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub page: i64,
    pub pages: i64,
    pub per_page: i64,
    pub total: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            pages,
            per_page,
            total,
            has_next: page < pages,
            has_prev: page > 1 && total > 0,
        }
    }
}

/// OFFSET for a 1-based page. Saturates so an arbitrarily large page number
/// from the query string cannot overflow; a huge offset just yields an empty
/// page.
pub fn list_offset(page: i64, per_page: i64) -> i64 {
    (page - 1).saturating_mul(per_page)
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub content: Vec<ContentItem>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct ContentListEnvelope {
    pub content: Vec<ContentItem>,
}

#[derive(Debug, Serialize)]
pub struct ContentEnvelope {
    pub content: ContentItem,
}

#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub message: String,
    pub content: ContentItem,
}

#[derive(Debug, Serialize)]
pub struct PlatformCount {
    pub platform: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub content_type: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct ContentStatsResponse {
    pub total_content: i64,
    pub recent_content: i64,
    pub platform_breakdown: Vec<PlatformCount>,
    pub type_breakdown: Vec<TypeCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_basic() {
        let p = PaginationMeta::new(1, 20, 45);
        assert_eq!(p.pages, 3);
        assert!(p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn pagination_past_the_end_has_no_next() {
        // page=2, per_page=10 with only 5 items: empty page, has_next=false
        let p = PaginationMeta::new(2, 10, 5);
        assert_eq!(p.pages, 1);
        assert!(!p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn pagination_empty() {
        let p = PaginationMeta::new(1, 20, 0);
        assert_eq!(p.pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn pagination_exact_boundary() {
        let p = PaginationMeta::new(2, 10, 20);
        assert_eq!(p.pages, 2);
        assert!(!p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn offset_is_zero_based_pages() {
        assert_eq!(list_offset(1, 20), 0);
        assert_eq!(list_offset(3, 20), 40);
    }

    #[test]
    fn offset_saturates_on_hostile_page_numbers() {
        assert_eq!(list_offset(i64::MAX, 20), i64::MAX);
        assert_eq!(list_offset(i64::MAX, 100), i64::MAX);
        assert!(list_offset(i64::MAX, 1) >= 0);
    }
}
