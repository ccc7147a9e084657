//! Channel topic value.

use chrono::{DateTime, Local};

/// Shown in place of an empty topic.
pub const NO_TOPIC: &str = "No topic set";

const TOPIC_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A channel topic assembled from TOPIC, RPL_TOPIC and RPL_TOPICWHOTIME.
///
/// Empty text means "no topic"; it is never displayed blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topic {
    text: String,
    set_by: Option<String>,
    set_time: Option<DateTime<Local>>,
}

impl Topic {
    pub fn new(
        text: impl Into<String>,
        set_by: Option<String>,
        set_time: Option<DateTime<Local>>,
    ) -> Self {
        Self {
            text: text.into(),
            set_by: set_by.filter(|s| !s.is_empty()),
            set_time,
        }
    }

    /// Raw topic text, empty when unset.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_by(&self) -> Option<&str> {
        self.set_by.as_deref()
    }

    pub fn set_time(&self) -> Option<DateTime<Local>> {
        self.set_time
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Same text, new setter and time.
    pub fn with_setter(&self, set_by: Option<String>, set_time: Option<DateTime<Local>>) -> Self {
        Self::new(self.text.clone(), set_by, set_time)
    }

    /// Topic text or the placeholder.
    pub fn display_text(&self) -> &str {
        if self.text.is_empty() { NO_TOPIC } else { &self.text }
    }

    /// Topic text plus whichever of setter and time are known.
    pub fn display(&self) -> String {
        if self.text.is_empty() {
            return NO_TOPIC.to_string();
        }
        match (&self.set_by, self.set_time) {
            (Some(by), Some(at)) => {
                format!("{} (set by {} on {})", self.text, by, at.format(TOPIC_TIME_FORMAT))
            }
            (Some(by), None) => format!("{} (set by {})", self.text, by),
            (None, Some(at)) => format!("{} (set on {})", self.text, at.format(TOPIC_TIME_FORMAT)),
            (None, None) => self.text.clone(),
        }
    }
}
