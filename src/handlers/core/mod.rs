//! Core handler infrastructure.
//!
//! This module contains the handler trait, the per-event context and the
//! registry that routes events by command.

pub mod context;
pub mod registry;

pub use context::{Context, Effects, Handler};
pub use registry::Registry;
