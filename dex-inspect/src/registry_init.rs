//! Event group registry initialization
//!
//! Registers every known variant factory with the process-wide registry.
//! Registration is an explicit start-up call so initialization order stays
//! deterministic and testable.

use std::sync::Arc;

use tracing::info;

use dex_core::{register_event_group_factory, registered_event_group_types};
use groups_tracker::{BoxHitFactory, PointTrajectoryFactory};

/// Register all known event group factories
///
/// Called once at startup, before any record is deserialized.
pub fn initialize_registry() {
    register_event_group_factory(Arc::new(BoxHitFactory));
    register_event_group_factory(Arc::new(PointTrajectoryFactory));

    let mut types = registered_event_group_types();
    types.sort();
    info!("Initialized event group registry with {} types", types.len());
    for tag in types {
        info!("  - {}", tag);
    }
}
