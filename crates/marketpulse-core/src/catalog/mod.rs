//! Read-only marketplace catalog.
//!
//! - `agents`: the fixed, ordered list of agent records.
//! - `search`: a stub that echoes the query and returns a fixed result list.
//!
//! Neither module filters, ranks, or paginates; both return the same payload
//! on every call.

pub mod agents;
pub mod search;

pub use agents::{AgentRecord, AgentStats, AgentStatus, Catalog};
pub use search::{search, SearchHit, SearchRequest, SearchResponse};
