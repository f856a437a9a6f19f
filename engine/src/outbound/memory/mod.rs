//! In-process adapters for every driven port.
//!
//! These back the engine in tests and in embedded single-process callers
//! that do not want external stores. They are thread safe but not durable.

mod directory;
mod friends;
mod ledger;
mod quota;
mod scores;

pub use directory::InMemoryUserDirectory;
pub use friends::InMemoryFriendRepository;
pub use ledger::InMemorySwipeLedger;
pub use quota::InMemoryRewindQuotaStore;
pub use scores::InMemoryScoreIndex;
