use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_content: i64,
    pub this_week: i64,
    pub platforms: i64,
    pub avg_per_day: f64,
}

#[derive(Debug, Serialize)]
pub struct PlatformSlice {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Serialize)]
pub struct DayActivity {
    pub day: &'static str,
    pub content: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub platform_data: Vec<PlatformSlice>,
    pub weekly_data: Vec<DayActivity>,
}

#[derive(Debug, Serialize)]
pub struct TypeSlice {
    #[serde(rename = "type")]
    pub content_type: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MonthActivity {
    pub month: &'static str,
    pub content: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalyticsResponse {
    pub type_data: Vec<TypeSlice>,
    pub monthly_data: Vec<MonthActivity>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub most_productive_day: &'static str,
    pub day_breakdown: BTreeMap<&'static str, i64>,
}
