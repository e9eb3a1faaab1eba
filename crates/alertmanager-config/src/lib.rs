//! Alertmanager configuration generator.
//!
//! Turns the notification section of an add-on `options.json` into an
//! `alertmanager.yml`.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! alertmanager_config::run(
//!     Path::new("/data/options.json"),
//!     Path::new("/etc/alertmanager/alertmanager.yml"),
//! )?;
//! # Ok::<(), alertmanager_config::TranslateError>(())
//! ```
//!
//! # Mapping
//!
//! - `notification_settings` overrides `global.resolve_timeout` and the
//!   `route` grouping/repeat timings, key by key.
//! - Each enabled entry of `notification_modules` becomes one receiver, in
//!   input order. The first one is the route's default receiver.
//! - With no enabled modules the config keeps a single `default` receiver.
//!
//! Supported module types are `email`, `ntfy`, `pushover`, `telegram` and
//! `webhook` (case-insensitive). Any other type yields a receiver with only a
//! name.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod alertmanager;
pub mod channel;
pub mod error;
pub mod options;
pub mod output;
pub mod translate;

pub use alertmanager::{AlertConfig, Receiver, ReceiverConfigs};
pub use channel::Channel;
pub use error::{Result, TranslateError};
pub use options::{ModuleDescriptor, NotificationSettings, Options};
pub use translate::translate;

use std::path::Path;

use tracing::{debug, info};

/// Read and parse an options file.
///
/// # Errors
/// Returns [`TranslateError::InputRead`] or [`TranslateError::InputParse`].
pub fn load_options(path: &Path) -> Result<Options> {
    let text = std::fs::read_to_string(path).map_err(|source| TranslateError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;

    Options::from_json(&text).map_err(|source| TranslateError::InputParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode a config as YAML in construction order.
///
/// # Errors
/// Returns [`TranslateError::Serialize`] if encoding fails.
pub fn serialize(config: &AlertConfig) -> Result<String> {
    Ok(config.to_yaml()?)
}

/// Generate the YAML for an options file without writing it anywhere.
///
/// # Errors
/// Returns any read, parse, validation, or encoding error.
pub fn render(input: &Path) -> Result<String> {
    let options = load_options(input)?;
    let config = translate(&options)?;

    debug!(
        receivers = config.receivers.len(),
        default_receiver = %config.route.receiver,
        "Translated notification options"
    );

    serialize(&config)
}

/// Generate `output` from `input`.
///
/// The output file is written atomically and only after the whole config has
/// been built, so a failed run never leaves a partial file behind.
///
/// # Errors
/// Returns the first error from reading, parsing, translating, encoding, or
/// writing.
pub fn run(input: &Path, output: &Path) -> Result<()> {
    let yaml = render(input)?;
    output::write_atomic(output, yaml.as_bytes())?;

    info!(
        input = %input.display(),
        output = %output.display(),
        "Generated alertmanager config"
    );
    Ok(())
}
