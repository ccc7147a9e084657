//! Default value functions for configuration.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Standard IRC-over-TLS port.
pub const DEFAULT_TLS_PORT: u16 = 6697;
/// Standard plaintext IRC port.
pub const DEFAULT_PLAIN_PORT: u16 = 6667;

const SERVER_ID_LEN: usize = 8;

pub fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}

/// Port implied by the TLS flag.
pub fn default_port(tls: bool) -> u16 {
    if tls { DEFAULT_TLS_PORT } else { DEFAULT_PLAIN_PORT }
}

/// Random identifier for a server record that has none.
pub fn generate_server_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SERVER_ID_LEN)
        .map(char::from)
        .collect();
    format!("s{}", suffix)
}
