//! Top-level facade crate for marketpulse.
//!
//! Re-exports the domain core and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use marketpulse_core::*;
}

pub mod gateway {
    pub use marketpulse_gateway::*;
}
