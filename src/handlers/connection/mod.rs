//! Connection-level handlers.
//!
//! Handles NICK, QUIT, ERROR, registration failures and the connect and
//! disconnect callbacks.

mod error;
mod lifecycle;
mod nick;
mod quit;

pub use error::{ErrorHandler, NicknameInUseHandler, PasswordMismatchHandler};
pub use lifecycle::{handle_connected, handle_disconnected};
pub use nick::NickHandler;
pub use quit::QuitHandler;
