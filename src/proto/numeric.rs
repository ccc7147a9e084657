//! Numeric replies the engine handles.

pub const RPL_UMODEIS: &str = "221";
pub const RPL_WHOISREGNICK: &str = "307";
pub const RPL_WHOISUSER: &str = "311";
pub const RPL_WHOISSERVER: &str = "312";
pub const RPL_WHOISOPERATOR: &str = "313";
pub const RPL_WHOISIDLE: &str = "317";
pub const RPL_ENDOFWHOIS: &str = "318";
pub const RPL_WHOISCHANNELS: &str = "319";
pub const RPL_WHOISACCOUNT: &str = "330";
pub const RPL_TOPIC: &str = "332";
pub const RPL_TOPICWHOTIME: &str = "333";
pub const RPL_WHOISBOT: &str = "335";
pub const RPL_WHOISACTUALLY: &str = "338";
pub const RPL_NAMREPLY: &str = "353";
pub const RPL_WHOISCERTFP: &str = "276";
pub const RPL_WHOISMODES: &str = "379";
pub const RPL_WHOISSECURE: &str = "671";
pub const ERR_NICKNAMEINUSE: &str = "433";
pub const ERR_PASSWDMISMATCH: &str = "464";
