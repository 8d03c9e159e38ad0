//! Account, login and push-subscription payloads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// ISO country code used by the backend for holidays
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_country() -> String {
    "US".to_string()
}

fn default_true() -> bool {
    true
}

/// Body of `POST /users/`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
}

/// Body of `PUT /users/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Response of `POST /token`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PushKeys {
    pub p256dh: String,
    pub auth: String,
}

/// Body of `POST /notifications/subscribe`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PushSubscription {
    pub endpoint: String,
    pub keys: PushKeys,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl PushSubscription {
    /// Native device tokens have no VAPID keys; the backend still wants the field.
    pub fn native(device_token: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            endpoint: device_token.into(),
            keys: PushKeys {
                p256dh: "native".into(),
                auth: "native".into(),
            },
            platform: Some(platform.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_defaults_country_to_us() {
        let user: User = serde_json::from_str(r#"{"id": 1, "email": "a@b.c"}"#).unwrap();
        assert_eq!(user.country, "US");
        assert!(user.is_active);
    }

    #[test]
    fn native_subscription_uses_placeholder_keys() {
        let sub = PushSubscription::native("device-123", "android");
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["endpoint"], "device-123");
        assert_eq!(json["keys"]["auth"], "native");
        assert_eq!(json["platform"], "android");
    }
}
