//! Replies to user queries issued from this session.

mod whois;

pub use whois::WhoisHandler;
