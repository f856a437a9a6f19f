//! Swipe-based matching engine.
//!
//! The engine recommends candidate profiles, records directional swipe
//! decisions, forms friend relations on mutual interest, enforces a
//! daily-limited rewind with compensating score adjustments, and serves a
//! popularity leaderboard backed by an ordered score index.
//!
//! It is a library, driven in process by a request-handling layer that is
//! out of scope here. External collaborators (the swipe ledger, friend
//! store, score index, quota counter, and user directory) are reached
//! through the ports in [`domain::ports`]; [`outbound`] ships in-memory
//! adapters for all of them plus Redis-backed adapters for the score index
//! and quota counter.

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::EngineSettings;
