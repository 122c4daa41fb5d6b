//! Core model for event-group deserialization
//!
//! This crate provides the fundamental abstractions consumed by variant
//! crates and the display layer:
//! - `DexObject`: untyped persisted record plus field accessors
//! - `EventGroup`: common surface of every concrete event-group variant
//! - `EventGroupFactory`: construction capability for one type tag
//! - `EventGroupRegistry`: process-wide tag-to-factory mapping and the
//!   `deserialize` entry point

pub mod dex;
pub mod factory;
pub mod group;
pub mod registry;

// Re-export main types for convenience
pub use dex::{DeserializationError, DexObject};
pub use factory::EventGroupFactory;
pub use group::{EventGroup, GroupInfo};
pub use registry::{
    deserialize_event_group, event_group_factory, register_event_group_factory,
    registered_event_group_types, reset_event_group_registry, DexError, EventGroupRegistry,
};
