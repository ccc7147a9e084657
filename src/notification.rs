//! Notification triggers.
//!
//! A trigger is four regular expressions (network, source, nick, message)
//! plus delivery flags. Triggers are compiled once and kept most-specific
//! first, so the first match wins and a catch-all only fires when nothing
//! narrower does.

use parking_lot::Mutex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Pattern that matches anything; also what an empty pattern means.
const MATCH_ALL: &str = ".*";

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("invalid {field} regex: {source}")]
    InvalidRegex {
        field: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// A trigger as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerConfig {
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub nick: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sound: bool,
    #[serde(default)]
    pub popup: bool,
    /// Minimum seconds between notifications for one network/source pair.
    #[serde(default)]
    pub debounce_secs: u64,
}

/// Number of fields that constrain a match.
pub fn specificity(config: &TriggerConfig) -> usize {
    [&config.network, &config.source, &config.nick, &config.message]
        .into_iter()
        .filter(|pattern| !pattern.is_empty() && pattern.as_str() != MATCH_ALL)
        .count()
}

/// Order triggers most specific first; ties prefer sound, then popup.
/// Otherwise configuration order is kept.
pub fn sort_triggers(configs: &mut [TriggerConfig]) {
    configs.sort_by(compare_triggers);
}

fn compare_triggers(a: &TriggerConfig, b: &TriggerConfig) -> Ordering {
    specificity(b)
        .cmp(&specificity(a))
        .then_with(|| b.sound.cmp(&a.sound))
        .then_with(|| b.popup.cmp(&a.popup))
}

/// A compiled trigger.
#[derive(Debug, Clone)]
pub struct Trigger {
    network: Regex,
    source: Regex,
    nick: Regex,
    message: Regex,
    pub sound: bool,
    pub popup: bool,
    pub debounce: Duration,
}

impl Trigger {
    pub fn compile(config: &TriggerConfig) -> Result<Self, NotificationError> {
        Ok(Self {
            network: compile_pattern("network", &config.network)?,
            source: compile_pattern("source", &config.source)?,
            nick: compile_pattern("nick", &config.nick)?,
            message: compile_pattern("message", &config.message)?,
            sound: config.sound,
            popup: config.popup,
            debounce: Duration::from_secs(config.debounce_secs),
        })
    }

    pub fn matches(&self, network: &str, source: &str, nick: &str, message: &str) -> bool {
        self.network.is_match(network)
            && self.source.is_match(source)
            && self.nick.is_match(nick)
            && self.message.is_match(message)
    }
}

fn compile_pattern(field: &'static str, pattern: &str) -> Result<Regex, NotificationError> {
    let pattern = if pattern.is_empty() { MATCH_ALL } else { pattern };
    Regex::new(pattern).map_err(|source| NotificationError::InvalidRegex { field, source })
}

/// A notification handed to the embedding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub text: String,
    pub sound: bool,
    pub popup: bool,
}

/// Shared across sessions; matches lines and delivers notifications.
pub struct NotificationManager {
    triggers: Vec<Trigger>,
    sender: Option<mpsc::UnboundedSender<Notification>>,
    /// Last delivery per `network#source`; entries older than
    /// `max_debounce` are dropped on insert.
    last_sent: Mutex<HashMap<String, Instant>>,
    max_debounce: Duration,
}

impl NotificationManager {
    /// Sort and compile `configs`. Triggers that fail to compile are logged
    /// and skipped.
    pub fn new(configs: &[TriggerConfig], sender: Option<mpsc::UnboundedSender<Notification>>) -> Self {
        let mut sorted = configs.to_vec();
        sort_triggers(&mut sorted);
        let triggers = sorted
            .iter()
            .filter_map(|config| match Trigger::compile(config) {
                Ok(trigger) => Some(trigger),
                Err(e) => {
                    warn!(error = %e, "Invalid notification trigger, skipping");
                    None
                }
            })
            .collect::<Vec<Trigger>>();
        let max_debounce = triggers
            .iter()
            .map(|t| t.debounce)
            .max()
            .unwrap_or(Duration::ZERO);
        Self {
            triggers,
            sender,
            last_sent: Mutex::new(HashMap::new()),
            max_debounce,
        }
    }

    /// A manager with no triggers.
    pub fn disabled() -> Self {
        Self::new(&[], None)
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    /// First trigger, in priority order, matching all four fields.
    pub fn find_match(&self, network: &str, source: &str, nick: &str, message: &str) -> Option<&Trigger> {
        self.triggers
            .iter()
            .find(|t| t.matches(network, source, nick, message))
    }

    /// Match a line and, unless debounced, deliver a notification.
    ///
    /// Returns the delivered notification.
    pub fn check_and_notify(
        &self,
        network: &str,
        source: &str,
        nick: &str,
        message: &str,
    ) -> Option<Notification> {
        let trigger = self.find_match(network, source, nick, message)?;

        let key = format!("{}#{}", network, source);
        let now = Instant::now();
        {
            let mut last_sent = self.last_sent.lock();
            if let Some(last) = last_sent.get(&key)
                && now.duration_since(*last) < trigger.debounce
            {
                debug!(key = %key, "Notification debounced");
                return None;
            }
            last_sent.retain(|_, last| now.duration_since(*last) < self.max_debounce);
            last_sent.insert(key, now);
        }

        let notification = Notification {
            title: format!("{} ({})", nick, source),
            text: message.to_string(),
            sound: trigger.sound,
            popup: trigger.popup,
        };
        if let Some(sender) = &self.sender
            && sender.send(notification.clone()).is_err()
        {
            debug!("Notification receiver dropped");
        }
        Some(notification)
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::disabled()
    }
}
