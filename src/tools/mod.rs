//! RDA Tracker Tools module
//!
//! Tool implementations behind the MCP server. Each returns a serializable
//! response or a human-readable error string.

pub mod foods;
pub mod log;
pub mod profiles;
pub mod progress;
pub mod status;
