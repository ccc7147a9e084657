//! Integration test common infrastructure.
//!
//! Provides a scripted in-memory transport and helpers for building
//! sessions and feeding them server lines.

pub mod harness;
pub mod transport;

#[allow(unused_imports)]
pub use harness::{TestSession, channel_id, lines, query_id};
#[allow(unused_imports)]
pub use transport::{MockFactory, MockTransport};
