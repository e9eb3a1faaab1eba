//! Options → Alertmanager config mapping.

use tracing::{debug, warn};

use crate::alertmanager::{AlertConfig, Receiver};
use crate::channel::Channel;
use crate::error::Result;
use crate::options::{NotificationSettings, Options};

/// Build the Alertmanager config for an options document.
///
/// Starts from [`AlertConfig::default`], applies any settings overrides, then
/// replaces the receivers with one per enabled module. When no module is
/// enabled the `default` receiver stays in place.
///
/// # Errors
/// Returns the first module validation error; no partial config is produced.
pub fn translate(options: &Options) -> Result<AlertConfig> {
    let mut config = AlertConfig::default();

    if let Some(settings) = &options.notification_settings {
        apply_settings(&mut config, settings);
    }

    let receivers = build_receivers(options)?;

    if let Some(first) = receivers.first() {
        config.route.receiver.clone_from(&first.name);
        config.receivers = receivers;
    } else {
        debug!("No enabled notification modules, keeping default receiver");
    }

    Ok(config)
}

fn apply_settings(config: &mut AlertConfig, settings: &NotificationSettings) {
    if let Some(resolve_timeout) = &settings.resolve_timeout {
        config.global.resolve_timeout.clone_from(resolve_timeout);
    }

    let route = &mut config.route;
    if let Some(group_by) = &settings.group_by {
        route.group_by.clone_from(group_by);
    }
    if let Some(group_wait) = &settings.group_wait {
        route.group_wait.clone_from(group_wait);
    }
    if let Some(group_interval) = &settings.group_interval {
        route.group_interval.clone_from(group_interval);
    }
    if let Some(repeat_interval) = &settings.repeat_interval {
        route.repeat_interval.clone_from(repeat_interval);
    }
}

fn build_receivers(options: &Options) -> Result<Vec<Receiver>> {
    let mut receivers = Vec::new();

    for module in options.notification_modules.iter().flatten() {
        if !module.is_enabled() {
            debug!(module = %module.name, "Skipping disabled notification module");
            continue;
        }

        let channel = Channel::from_descriptor(module)?;
        if let Channel::Unknown(kind) = &channel {
            warn!(
                module = %module.name,
                kind = %kind,
                "Unknown notification module type, receiver will have no delivery config"
            );
        } else {
            debug!(module = %module.name, kind = channel.kind(), "Adding receiver");
        }

        receivers.push(Receiver {
            name: module.name.clone(),
            configs: channel.into_receiver_configs(),
        });
    }

    Ok(receivers)
}
