//! Configuration validation.
//!
//! Validates configuration after loading so bad records surface before any
//! session is created.

use super::Config;
use thiserror::Error;

/// Longest nickname accepted in a profile.
const MAX_NICKNAME_LEN: usize = 30;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("servers[{0}].hostname is required")]
    MissingHostname(usize),
    #[error("servers[{0}].profile.nickname is required")]
    MissingNickname(usize),
    #[error("servers[{0}].profile.nickname must be at most 30 characters, got {1}")]
    NicknameTooLong(usize, usize),
    #[error("servers[{0}] has sasl_login without sasl_password or the reverse")]
    IncompleteSasl(usize),
    #[error("servers[{0}].id '{1}' is used more than once")]
    DuplicateId(usize, String),
    #[error("notifications.triggers[{0}] has neither sound nor popup")]
    SilentTrigger(usize),
    #[error("notifications.triggers[{0}] is invalid: {1}")]
    InvalidTrigger(usize, String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (i, server) in config.servers.iter().enumerate() {
        if server.hostname.trim().is_empty() {
            errors.push(ValidationError::MissingHostname(i));
        }

        let nick_len = server.profile.nickname.chars().count();
        if nick_len == 0 {
            errors.push(ValidationError::MissingNickname(i));
        } else if nick_len > MAX_NICKNAME_LEN {
            errors.push(ValidationError::NicknameTooLong(i, nick_len));
        }

        let has_login = server.sasl_login.as_deref().is_some_and(|s| !s.is_empty());
        let has_password = server.sasl_password.as_deref().is_some_and(|s| !s.is_empty());
        if has_login != has_password {
            errors.push(ValidationError::IncompleteSasl(i));
        }

        if !server.id.is_empty() && config.servers[..i].iter().any(|s| s.id == server.id) {
            errors.push(ValidationError::DuplicateId(i, server.id.clone()));
        }
    }

    for (i, trigger) in config.notifications.triggers.iter().enumerate() {
        if !trigger.sound && !trigger.popup {
            errors.push(ValidationError::SilentTrigger(i));
        }
        if let Err(e) = crate::notification::Trigger::compile(trigger) {
            errors.push(ValidationError::InvalidTrigger(i, e.to_string()));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
