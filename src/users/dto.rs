use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::content::dto::{PlatformCount, TypeCount};

pub const SETTINGS_VERSION: u32 = 1;

/// Per-user preferences, stored as a structured, versioned JSONB record.
/// Every field has a serde default so older or partial stored blobs still
/// deserialize; the version is rewritten on each update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserSettings {
    pub version: u32,
    pub theme: String,
    pub language: String,
    pub notifications: NotificationSettings,
    pub privacy: PrivacySettings,
    pub defaults: GenerationDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotificationSettings {
    pub email: bool,
    pub push: bool,
    pub marketing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PrivacySettings {
    pub profile_public: bool,
    pub show_stats: bool,
    pub allow_analytics: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationDefaults {
    pub platform: String,
    pub tone: String,
    pub content_type: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            theme: "system".into(),
            language: "en".into(),
            notifications: NotificationSettings::default(),
            privacy: PrivacySettings::default(),
            defaults: GenerationDefaults::default(),
        }
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            push: false,
            marketing: false,
        }
    }
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            profile_public: false,
            show_stats: true,
            allow_analytics: true,
        }
    }
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            platform: "instagram".into(),
            tone: "casual".into(),
            content_type: "post".into(),
        }
    }
}

impl UserSettings {
    /// Stamps the current schema version before persisting.
    pub fn normalize(mut self) -> Self {
        self.version = SETTINGS_VERSION;
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsEnvelope {
    pub settings: UserSettings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_content: i64,
    pub platforms: i64,
    pub this_month: i64,
}

#[derive(Debug, Serialize)]
pub struct ProfileUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub location: String,
    pub website: String,
    pub avatar: String,
    #[serde(rename = "joinDate", with = "time::serde::rfc3339")]
    pub join_date: OffsetDateTime,
    pub stats: ProfileStats,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: ProfileUser,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarResponse {
    pub message: String,
    pub avatar_url: String,
}

#[derive(Debug, Serialize)]
pub struct UserStatsResponse {
    pub total_content: i64,
    pub recent_activity: i64,
    pub platform_usage: Vec<PlatformCount>,
    pub type_usage: Vec<TypeCount>,
    pub account_age_days: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = UserSettings::default();
        assert_eq!(s.version, SETTINGS_VERSION);
        assert_eq!(s.theme, "system");
        assert!(s.notifications.email);
        assert!(!s.notifications.push);
        assert!(!s.privacy.profile_public);
        assert!(s.privacy.show_stats);
        assert_eq!(s.defaults.platform, "instagram");
    }

    #[test]
    fn partial_blob_deserializes_with_defaults() {
        let s: UserSettings = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(s.theme, "dark");
        assert_eq!(s.language, "en");
        assert!(s.notifications.email);
    }

    #[test]
    fn camel_case_keys_roundtrip() {
        let s = UserSettings::default();
        let json = serde_json::to_value(&s).unwrap();
        assert!(json["privacy"].get("profilePublic").is_some());
        assert!(json["defaults"].get("contentType").is_some());
        let back: UserSettings = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn normalize_rewrites_stale_version() {
        let stale: UserSettings = serde_json::from_str(r#"{"version":0}"#).unwrap();
        assert_eq!(stale.normalize().version, SETTINGS_VERSION);
    }
}
