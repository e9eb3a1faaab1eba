//! Alertmanager configuration document.
//!
//! Field declaration order is the emitted key order, so keep it matching the
//! layout Alertmanager users expect (`global`, `route`, `receivers`).

use serde::Serialize;

/// Name of the fallback receiver used when no module is enabled.
pub const DEFAULT_RECEIVER: &str = "default";

/// Root of `alertmanager.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertConfig {
    pub global: Global,
    pub route: Route,
    pub receivers: Vec<Receiver>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            global: Global::default(),
            route: Route::default(),
            receivers: vec![Receiver::bare(DEFAULT_RECEIVER)],
        }
    }
}

impl AlertConfig {
    /// Encode as YAML, keeping declaration order.
    ///
    /// # Errors
    /// Returns the `serde_yaml` error if encoding fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Global {
    pub resolve_timeout: String,
}

impl Default for Global {
    fn default() -> Self {
        Self {
            resolve_timeout: "5m".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub group_by: Vec<String>,
    pub group_wait: String,
    pub group_interval: String,
    pub repeat_interval: String,
    pub receiver: String,
}

impl Default for Route {
    fn default() -> Self {
        Self {
            group_by: vec!["alertname".to_string()],
            group_wait: "30s".to_string(),
            group_interval: "5m".to_string(),
            repeat_interval: "12h".to_string(),
            receiver: DEFAULT_RECEIVER.to_string(),
        }
    }
}

/// A named alert destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receiver {
    pub name: String,

    /// At most one delivery block, emitted as `<kind>_configs: [..]`.
    #[serde(flatten)]
    pub configs: Option<ReceiverConfigs>,
}

impl Receiver {
    /// Receiver with a name and no delivery block.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            configs: None,
        }
    }
}

/// Channel-specific delivery block. Each list holds exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReceiverConfigs {
    #[serde(rename = "email_configs")]
    Email(Vec<EmailConfig>),
    #[serde(rename = "webhook_configs")]
    Webhook(Vec<WebhookConfig>),
    #[serde(rename = "pushover_configs")]
    Pushover(Vec<PushoverConfig>),
    #[serde(rename = "telegram_configs")]
    Telegram(Vec<TelegramConfig>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailConfig {
    pub to: String,
    pub from: String,
    pub smarthost: String,
    pub auth_username: String,
    pub auth_password: String,
    pub require_tls: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookConfig {
    pub url: String,
    pub send_resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushoverConfig {
    pub user_key: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: ChatId,
    pub parse_mode: String,
}

/// Telegram chat identifier: numeric id or `@channel` handle.
///
/// Accepts a JSON string or an integer that fits in `i64`; floats and larger
/// integers are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Handle(String),
}
