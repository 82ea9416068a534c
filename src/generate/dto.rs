use serde::{Deserialize, Serialize};

use crate::generate::services::SeoAnalysis;

#[derive(Debug, Deserialize)]
pub struct GenerateContentRequest {
    pub topic: Option<String>,
    pub keywords: Option<String>,
    pub content_type: Option<String>,
    pub platform: Option<String>,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_variations")]
    pub num_variations: i64,
}

fn default_tone() -> String {
    "casual".into()
}
fn default_style() -> String {
    "engaging".into()
}
fn default_variations() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct GeneratedContentResponse {
    pub generated_texts: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeoRequest {
    pub content: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SeoResponse {
    #[serde(flatten)]
    pub analysis: SeoAnalysis,
    pub hashtag_suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CtaRequest {
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default)]
    pub topic: String,
}

fn default_content_type() -> String {
    "post".into()
}
fn default_platform() -> String {
    "instagram".into()
}

#[derive(Debug, Serialize)]
pub struct CtaResponse {
    pub platform: String,
    pub content_type: String,
    pub suggested_ctas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_cta: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub content: Option<String>,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}
