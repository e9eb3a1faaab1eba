//! Add-on options document (`options.json`).
//!
//! Only the notification-related keys are modelled; everything else in the
//! options file is ignored.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Top-level options document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Options {
    /// Overrides for the global and route sections.
    #[serde(default)]
    pub notification_settings: Option<NotificationSettings>,

    /// Requested notification channels, in receiver order.
    #[serde(default)]
    pub notification_modules: Option<Vec<ModuleDescriptor>>,
}

impl Options {
    /// Parse an options document from JSON text.
    ///
    /// # Errors
    /// Returns the `serde_json` error when the text is not a valid document.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Partial overrides for the generated config.
///
/// A `None` field leaves the built-in default untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub resolve_timeout: Option<String>,
    #[serde(default)]
    pub group_by: Option<Vec<String>>,
    #[serde(default)]
    pub group_wait: Option<String>,
    #[serde(default)]
    pub group_interval: Option<String>,
    #[serde(default)]
    pub repeat_interval: Option<String>,
}

/// One requested notification channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModuleDescriptor {
    /// Receiver name in the generated config.
    pub name: String,

    /// Channel type, matched case-insensitively.
    #[serde(rename = "type")]
    pub kind: String,

    /// Defaults to enabled when absent or `null`.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Type-specific fields (`recipient`, `server`, `bot_token`, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ModuleDescriptor {
    /// Whether this module should produce a receiver.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Look up a type-specific field. JSON `null` counts as absent.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|value| !value.is_null())
    }
}
