//! Connect and disconnect callbacks.

use super::super::Context;
use crate::state::{EventType, Message};
use tracing::info;

/// Registration finished: adopt the NETWORK name and tell every window.
pub fn handle_connected(ctx: &mut Context<'_>) {
    if let Some(network) = ctx.transport.isupport("NETWORK").filter(|n| !n.is_empty()) {
        ctx.state.set_name(network);
    }
    info!(host = %ctx.hostname, network = %ctx.state.name(), "Connected");

    let line = format!("Connected to {}", ctx.hostname);
    for window in ctx.state.windows_mut() {
        window.add_message(Message::event(EventType::Connecting, line.clone()));
    }
}

/// The link dropped or was closed.
pub fn handle_disconnected(ctx: &mut Context<'_>, reason: &str) {
    info!(host = %ctx.hostname, reason = %reason, "Disconnected");

    let line = format!("Disconnected from {}: {}", ctx.hostname, reason);
    for window in ctx.state.windows_mut() {
        window.add_message(Message::event(EventType::Disconnected, line.clone()));
    }
}
