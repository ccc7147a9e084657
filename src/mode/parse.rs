//! MODE string parsing.

use super::{ModeChange, ModeSpec};
use tracing::debug;

/// Parse a channel MODE string against the server's mode alphabet.
///
/// Walks `modes` left to right with a sign that starts as `+` and flips on
/// `+`/`-`. Each letter that needs a parameter takes the next one from
/// `params`; when none is left the letter is dropped and the walk continues.
/// Letters the server never advertised are dropped without consuming
/// anything.
pub fn parse_channel_modes(spec: &ModeSpec, modes: &str, params: &[String]) -> Vec<ModeChange> {
    let mut changes = Vec::new();
    let mut params = params.iter();
    let mut adding = true;

    for letter in modes.chars() {
        match letter {
            '+' => adding = true,
            '-' => adding = false,
            _ => {
                let Some(mode_type) = spec.classify(letter) else {
                    debug!(mode = %letter, "Unknown channel mode, ignoring");
                    continue;
                };
                let param = if mode_type.takes_param(adding) {
                    match params.next() {
                        Some(param) => Some(param.clone()),
                        None => {
                            debug!(mode = %letter, adding, "Mode missing parameter, dropping");
                            continue;
                        }
                    }
                } else {
                    None
                };
                changes.push(ModeChange {
                    letter,
                    adding,
                    mode_type,
                    param,
                });
            }
        }
    }

    changes
}

/// Apply a user MODE string to the current mode letters.
///
/// Unsigned strings add. Added letters are not duplicated; removed letters
/// are deleted wherever they appear.
pub fn apply_user_modes(current: &str, modes: &str) -> String {
    let mut result = current.to_string();
    let mut adding = true;
    for letter in modes.chars() {
        match letter {
            '+' => adding = true,
            '-' => adding = false,
            _ if adding => {
                if !result.contains(letter) {
                    result.push(letter);
                }
            }
            _ => result.retain(|c| c != letter),
        }
    }
    result
}

/// User mode string as announced: unsigned strings gain a leading `+`.
pub fn display_user_modes(modes: &str) -> String {
    if modes.starts_with(['+', '-']) {
        modes.to_string()
    } else {
        format!("+{}", modes)
    }
}
