//! Realtime runtime for the gateway.
//!
//! The publisher owns the periodic tick task; the clock module is the seam
//! that decides when a tick happens (wall-clock interval or manual test clock).

pub mod clock;
pub mod publisher;

pub use clock::{IntervalClock, ManualClock, Ticker, TickerFactory};
pub use publisher::{Publisher, PublisherState};
