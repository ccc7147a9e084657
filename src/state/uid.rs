//! Window identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a window (server, channel or query) within one session.
pub type WindowId = String;

/// Generates session-unique window ids.
///
/// Format: kind prefix (`c` channel, `q` query) + 6 chars base36.
/// Example: "cAAAAAB"
#[derive(Debug)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }

    pub fn next_channel(&self) -> WindowId {
        self.next('c')
    }

    pub fn next_query(&self) -> WindowId {
        self.next('q')
    }

    fn next(&self, kind: char) -> WindowId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", kind, base36_encode_6(n))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn base36_encode_6(mut n: u64) -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut result = [b'A'; 6];

    for slot in result.iter_mut().rev() {
        *slot = CHARS[(n % 36) as usize];
        n /= 36;
    }

    String::from_utf8_lossy(&result).into_owned()
}
