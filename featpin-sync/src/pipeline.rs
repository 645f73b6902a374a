//! Shared sync pipeline entrypoint used by the CLI commands.

use std::path::Path;

use featpin_core::{layout, types::ConsumerName, versions};

use crate::update::{sync_all, sync_consumer, SyncConsumerResult};
use crate::SyncError;

/// Scope for a sync pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncScope {
    /// Update every consumer.
    All,
    /// Update a single named consumer.
    Consumer(String),
}

/// Run the sync pipeline for a scope.
///
/// This is the canonical entrypoint for `featpin sync`.
pub fn run(
    root: &Path,
    scope: SyncScope,
    dry_run: bool,
) -> Result<Vec<SyncConsumerResult>, SyncError> {
    match scope {
        SyncScope::All => sync_all(root, dry_run),
        SyncScope::Consumer(name) => {
            let consumer = find_consumer(root, &name)?;
            let versions = versions::resolve_versions_at(root)?;
            Ok(vec![sync_consumer(root, &consumer, &versions, dry_run)?])
        }
    }
}

fn find_consumer(root: &Path, name: &str) -> Result<ConsumerName, SyncError> {
    layout::list_consumer_names(root)?
        .into_iter()
        .find(|consumer| consumer.0 == name)
        .ok_or_else(|| SyncError::ConsumerNotFound {
            name: name.to_string(),
            path: layout::consumers_root(root),
        })
}
