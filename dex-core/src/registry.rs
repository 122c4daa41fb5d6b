//! Factory registry and the typed deserialization entry point
//!
//! The registry is the single extension point associating type tags with
//! factories. Variant crates register their factories from application
//! start-up code; the deserialization entry point looks records up by their
//! `type` field and dispatches to the matching factory.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::dex::{self, DexObject, DeserializationError};
use crate::factory::EventGroupFactory;
use crate::group::EventGroup;

/// Error type for the `deserialize` entry point
///
/// `UnknownType` and `Group` are deliberately distinct variants so callers
/// can skip groups of unknown types while aborting on malformed records.
#[derive(Debug, thiserror::Error)]
pub enum DexError {
    #[error("no factory registered for event group type '{tag}'")]
    UnknownType { tag: String },
    #[error("failed to deserialize event group: {0}")]
    Group(#[from] DeserializationError),
}

/// Mapping from type tag to the single active factory for that tag
///
/// Registration happens during application initialization and lookups happen
/// synchronously on demand; a mutex around the map is the exclusive-access
/// discipline for multi-threaded hosts. A later registration for an existing
/// tag unconditionally replaces the earlier one.
///
/// Most code uses the process-wide instance through
/// [`register_event_group_factory`] and friends; tests that need isolation
/// construct their own instances instead.
pub struct EventGroupRegistry {
    factories: Mutex<HashMap<String, Arc<dyn EventGroupFactory>>>,
}

impl EventGroupRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            factories: Mutex::new(HashMap::new()),
        }
    }

    /// Register a factory under its declared type tag
    ///
    /// If a factory is already registered for that tag it is replaced, with
    /// no error and no retained history. Registering the identical factory
    /// twice leaves the registry in the same observable state.
    pub fn register(&self, factory: Arc<dyn EventGroupFactory>) {
        let tag = factory.group_type().to_string();
        let mut factories = self.factories.lock().unwrap();
        let replaced = factories.insert(tag.clone(), factory).is_some();
        debug!("registered event group factory for '{}' (replaced: {})", tag, replaced);
    }

    /// Get the active factory for a tag
    ///
    /// Absence is an ordinary outcome the caller branches on, never an
    /// error. The returned handle is the registered factory itself, not a
    /// copy.
    pub fn lookup(&self, tag: &str) -> Option<Arc<dyn EventGroupFactory>> {
        let factories = self.factories.lock().unwrap();
        factories.get(tag).cloned()
    }

    /// Check whether a tag has an active factory
    pub fn is_registered(&self, tag: &str) -> bool {
        let factories = self.factories.lock().unwrap();
        factories.contains_key(tag)
    }

    /// List all tags with an active factory
    pub fn registered_types(&self) -> Vec<String> {
        let factories = self.factories.lock().unwrap();
        factories.keys().cloned().collect()
    }

    /// Clear the entire mapping
    ///
    /// For test isolation and controlled reinitialization; never partial.
    pub fn reset(&self) {
        let mut factories = self.factories.lock().unwrap();
        factories.clear();
    }

    /// Turn an untyped record into the concrete group its `type` names
    ///
    /// Reads `obj["type"]`, looks up the factory and invokes its
    /// `from_dex_object`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownType`] when no factory is registered for
    /// the record's tag, and [`DexError::Group`] when the record has no
    /// usable `type` field or the matching factory rejects it.
    pub fn deserialize(&self, obj: &DexObject) -> Result<Box<dyn EventGroup>, DexError> {
        let tag = dex::require_str(obj, "type")?;

        let factory = self.lookup(tag).ok_or_else(|| DexError::UnknownType {
            tag: tag.to_string(),
        })?;

        let group = factory.from_dex_object(obj)?;
        Ok(group)
    }
}

impl Default for EventGroupRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide registry instance
static REGISTRY: Lazy<EventGroupRegistry> = Lazy::new(EventGroupRegistry::new);

/// Register a factory with the process-wide registry
///
/// Called from application start-up code, once per variant; see
/// [`EventGroupRegistry::register`] for the replacement semantics.
///
/// # Example
///
/// ```rust
/// # use std::sync::Arc;
/// # use dex_core::dex::{DexObject, DeserializationError};
/// # use dex_core::factory::EventGroupFactory;
/// # use dex_core::group::{EventGroup, GroupInfo};
/// # #[derive(Debug)]
/// # struct MarkerGroup { info: GroupInfo }
/// # impl EventGroup for MarkerGroup {
/// #     fn info(&self) -> &GroupInfo { &self.info }
/// #     fn time_range(&self) -> Option<(f64, f64)> { None }
/// #     fn to_dex_object(&self) -> DexObject { self.info.to_dex_object() }
/// # }
/// # struct MarkerFactory;
/// # impl EventGroupFactory for MarkerFactory {
/// #     fn group_type(&self) -> &str { "Marker" }
/// #     fn from_dex_object(&self, obj: &DexObject) -> Result<Box<dyn EventGroup>, DeserializationError> {
/// #         Ok(Box::new(MarkerGroup { info: GroupInfo::from_dex_object(obj, self.group_type())? }))
/// #     }
/// # }
/// use dex_core::registry::{register_event_group_factory, event_group_factory};
///
/// register_event_group_factory(Arc::new(MarkerFactory));
/// assert!(event_group_factory("Marker").is_some());
/// ```
pub fn register_event_group_factory(factory: Arc<dyn EventGroupFactory>) {
    REGISTRY.register(factory);
}

/// Get the active factory for a tag from the process-wide registry
pub fn event_group_factory(tag: &str) -> Option<Arc<dyn EventGroupFactory>> {
    REGISTRY.lookup(tag)
}

/// List all tags registered with the process-wide registry
pub fn registered_event_group_types() -> Vec<String> {
    REGISTRY.registered_types()
}

/// Clear the process-wide registry (mainly for testing)
pub fn reset_event_group_registry() {
    REGISTRY.reset();
}

/// Deserialize a record through the process-wide registry
///
/// See [`EventGroupRegistry::deserialize`].
pub fn deserialize_event_group(obj: &DexObject) -> Result<Box<dyn EventGroup>, DexError> {
    REGISTRY.deserialize(obj)
}
