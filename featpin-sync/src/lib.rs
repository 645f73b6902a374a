//! # featpin-sync
//!
//! Consumer manifest update engine.
//!
//! Call [`sync_consumer`] to re-pin a single consumer against resolved
//! feature versions, or [`sync_all`] to process every consumer. [`pipeline`]
//! wraps both behind a scope, [`diff`] and [`status`] answer "what would
//! change" without writing.

pub mod diff;
pub mod error;
pub mod pipeline;
pub mod status;
pub mod update;

pub use diff::{diff_all, diff_consumer, FileDiff};
pub use error::SyncError;
pub use status::{check, check_all, ConsumerStatus, PinSignal};
pub use update::{sync_all, sync_consumer, SyncConsumerResult, WriteResult};
