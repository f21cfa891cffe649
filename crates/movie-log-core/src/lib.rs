pub mod profile_cache;
pub mod session;
pub mod stats;
pub mod store;

pub use profile_cache::ProfileCache;
pub use session::{AccountContext, Session};
pub use stats::{compute_stats, format_runtime, WatchedStats};
pub use store::{ListStore, ToggleOutcome};
