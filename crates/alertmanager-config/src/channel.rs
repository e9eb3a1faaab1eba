//! Notification channel types and their field validation.
//!
//! A [`Channel`] is built from a [`ModuleDescriptor`] in one step, so every
//! required-field check for a channel type lives in its constructor.

use serde_json::Value;

use crate::alertmanager::{
    ChatId, EmailConfig, PushoverConfig, ReceiverConfigs, TelegramConfig, WebhookConfig,
};
use crate::error::{Result, TranslateError};
use crate::options::ModuleDescriptor;

/// Telegram messages are always rendered as HTML.
const TELEGRAM_PARSE_MODE: &str = "HTML";

/// A validated notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    Email {
        recipient: String,
        sender: String,
        server: String,
        username: String,
        password: String,
        require_tls: bool,
    },
    Ntfy {
        server: String,
        topic: String,
    },
    Pushover {
        user_key: String,
        api_token: String,
    },
    Telegram {
        bot_token: String,
        chat_id: ChatId,
    },
    Webhook {
        url: String,
    },
    /// Type with no known mapping; the receiver gets no delivery block.
    Unknown(String),
}

impl Channel {
    /// Validate a module descriptor into a channel.
    ///
    /// # Errors
    /// Returns [`TranslateError::MissingField`] when a required field is
    /// absent and [`TranslateError::InvalidField`] when a field has the wrong
    /// JSON type.
    pub fn from_descriptor(module: &ModuleDescriptor) -> Result<Self> {
        let fields = Fields(module);

        let channel = match module.kind.to_lowercase().as_str() {
            "email" => Self::Email {
                recipient: fields.required_str("recipient")?,
                sender: fields.optional_str("sender")?.unwrap_or_default(),
                server: fields.required_str("server")?,
                username: fields.optional_str("username")?.unwrap_or_default(),
                password: fields.optional_str("password")?.unwrap_or_default(),
                require_tls: fields.optional_bool("require_tls")?.unwrap_or(true),
            },
            "ntfy" => Self::Ntfy {
                server: fields.required_str("server")?,
                topic: fields.required_str("topic")?,
            },
            "pushover" => Self::Pushover {
                user_key: fields.required_str("user_key")?,
                api_token: fields.required_str("api_token")?,
            },
            "telegram" => Self::Telegram {
                bot_token: fields.required_str("bot_token")?,
                chat_id: fields.required_chat_id("chat_id")?,
            },
            "webhook" => Self::Webhook {
                url: fields.required_str("url")?,
            },
            _ => Self::Unknown(module.kind.clone()),
        };

        Ok(channel)
    }

    /// Short lowercase name of the channel type, for logging.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Email { .. } => "email",
            Self::Ntfy { .. } => "ntfy",
            Self::Pushover { .. } => "pushover",
            Self::Telegram { .. } => "telegram",
            Self::Webhook { .. } => "webhook",
            Self::Unknown(kind) => kind,
        }
    }

    /// Delivery block for the receiver, if this channel has one.
    #[must_use]
    pub fn into_receiver_configs(self) -> Option<ReceiverConfigs> {
        let configs = match self {
            Self::Email {
                recipient,
                sender,
                server,
                username,
                password,
                require_tls,
            } => ReceiverConfigs::Email(vec![EmailConfig {
                to: recipient,
                from: sender,
                smarthost: server,
                auth_username: username,
                auth_password: password,
                require_tls,
            }]),
            Self::Ntfy { server, topic } => ReceiverConfigs::Webhook(vec![WebhookConfig {
                url: format!("{server}/{topic}"),
                send_resolved: true,
            }]),
            Self::Pushover {
                user_key,
                api_token,
            } => ReceiverConfigs::Pushover(vec![PushoverConfig {
                user_key,
                token: api_token,
            }]),
            Self::Telegram { bot_token, chat_id } => {
                ReceiverConfigs::Telegram(vec![TelegramConfig {
                    bot_token,
                    chat_id,
                    parse_mode: TELEGRAM_PARSE_MODE.to_string(),
                }])
            }
            Self::Webhook { url } => ReceiverConfigs::Webhook(vec![WebhookConfig {
                url,
                send_resolved: true,
            }]),
            Self::Unknown(_) => return None,
        };

        Some(configs)
    }
}

/// Typed accessors over a module's raw fields.
struct Fields<'a>(&'a ModuleDescriptor);

impl Fields<'_> {
    fn required(&self, key: &'static str) -> Result<&Value> {
        self.0
            .field(key)
            .ok_or_else(|| TranslateError::missing(&self.0.name, key))
    }

    fn required_str(&self, key: &'static str) -> Result<String> {
        let value = self.required(key)?;
        self.as_string(key, value)
    }

    fn optional_str(&self, key: &'static str) -> Result<Option<String>> {
        self.0
            .field(key)
            .map(|value| self.as_string(key, value))
            .transpose()
    }

    fn optional_bool(&self, key: &'static str) -> Result<Option<bool>> {
        self.0
            .field(key)
            .map(|value| {
                value
                    .as_bool()
                    .ok_or_else(|| TranslateError::invalid(&self.0.name, key, "a boolean"))
            })
            .transpose()
    }

    fn required_chat_id(&self, key: &'static str) -> Result<ChatId> {
        match self.required(key)? {
            Value::String(handle) => Ok(ChatId::Handle(handle.clone())),
            Value::Number(number) => number
                .as_i64()
                .map(ChatId::Id)
                .ok_or_else(|| TranslateError::invalid(&self.0.name, key, "an integer or string")),
            _ => Err(TranslateError::invalid(
                &self.0.name,
                key,
                "an integer or string",
            )),
        }
    }

    fn as_string(&self, key: &'static str, value: &Value) -> Result<String> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| TranslateError::invalid(&self.0.name, key, "a string"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(value: Value) -> ModuleDescriptor {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_email_defaults() {
        let module = descriptor(json!({
            "name": "mail",
            "type": "email",
            "recipient": "ops@example.com",
            "server": "smtp.example.com:587"
        }));

        let channel = Channel::from_descriptor(&module).unwrap();
        assert_eq!(
            channel.into_receiver_configs(),
            Some(ReceiverConfigs::Email(vec![EmailConfig {
                to: "ops@example.com".to_string(),
                from: String::new(),
                smarthost: "smtp.example.com:587".to_string(),
                auth_username: String::new(),
                auth_password: String::new(),
                require_tls: true,
            }]))
        );
    }

    #[test]
    fn test_email_missing_recipient() {
        let module = descriptor(json!({
            "name": "mail",
            "type": "email",
            "server": "smtp.example.com:587"
        }));

        match Channel::from_descriptor(&module) {
            Err(TranslateError::MissingField { module, field }) => {
                assert_eq!(module, "mail");
                assert_eq!(field, "recipient");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_email_require_tls_must_be_bool() {
        let module = descriptor(json!({
            "name": "mail",
            "type": "email",
            "recipient": "ops@example.com",
            "server": "smtp.example.com:587",
            "require_tls": "yes"
        }));

        assert!(matches!(
            Channel::from_descriptor(&module),
            Err(TranslateError::InvalidField {
                field: "require_tls",
                ..
            })
        ));
    }

    #[test]
    fn test_ntfy_joins_server_and_topic() {
        let module = descriptor(json!({
            "name": "phone",
            "type": "ntfy",
            "server": "https://ntfy.sh",
            "topic": "homelab"
        }));

        let configs = Channel::from_descriptor(&module)
            .unwrap()
            .into_receiver_configs();
        assert_eq!(
            configs,
            Some(ReceiverConfigs::Webhook(vec![WebhookConfig {
                url: "https://ntfy.sh/homelab".to_string(),
                send_resolved: true,
            }]))
        );
    }

    #[test]
    fn test_ntfy_missing_topic() {
        let module = descriptor(json!({
            "name": "phone",
            "type": "ntfy",
            "server": "https://ntfy.sh"
        }));

        assert!(matches!(
            Channel::from_descriptor(&module),
            Err(TranslateError::MissingField { field: "topic", .. })
        ));
    }

    #[test]
    fn test_pushover_maps_api_token() {
        let module = descriptor(json!({
            "name": "po",
            "type": "pushover",
            "user_key": "U",
            "api_token": "A"
        }));

        let configs = Channel::from_descriptor(&module)
            .unwrap()
            .into_receiver_configs();
        assert_eq!(
            configs,
            Some(ReceiverConfigs::Pushover(vec![PushoverConfig {
                user_key: "U".to_string(),
                token: "A".to_string(),
            }]))
        );
    }

    #[test]
    fn test_telegram_type_is_case_insensitive() {
        let module = descriptor(json!({
            "name": "tg",
            "type": "TeLeGrAm",
            "bot_token": "T",
            "chat_id": -100_123
        }));

        let channel = Channel::from_descriptor(&module).unwrap();
        assert_eq!(channel.kind(), "telegram");
        assert_eq!(
            channel.into_receiver_configs(),
            Some(ReceiverConfigs::Telegram(vec![TelegramConfig {
                bot_token: "T".to_string(),
                chat_id: ChatId::Id(-100_123),
                parse_mode: "HTML".to_string(),
            }]))
        );
    }

    #[test]
    fn test_telegram_chat_id_rejects_other_types() {
        let module = descriptor(json!({
            "name": "tg",
            "type": "telegram",
            "bot_token": "T",
            "chat_id": [1]
        }));

        assert!(matches!(
            Channel::from_descriptor(&module),
            Err(TranslateError::InvalidField { field: "chat_id", .. })
        ));
    }

    #[test]
    fn test_webhook_null_url_is_missing() {
        let module = descriptor(json!({
            "name": "hook",
            "type": "webhook",
            "url": null
        }));

        assert!(matches!(
            Channel::from_descriptor(&module),
            Err(TranslateError::MissingField { field: "url", .. })
        ));
    }

    #[test]
    fn test_unknown_type_has_no_configs() {
        let module = descriptor(json!({
            "name": "bird",
            "type": "carrier-pigeon"
        }));

        let channel = Channel::from_descriptor(&module).unwrap();
        assert_eq!(channel, Channel::Unknown("carrier-pigeon".to_string()));
        assert_eq!(channel.kind(), "carrier-pigeon");
        assert!(channel.into_receiver_configs().is_none());
    }
}
