//! EventGroup trait and shared base state
//!
//! An event group is one named slice of an event's data (a set of hits, a
//! bundle of trajectories, ...). The concrete shape varies per group type;
//! this module defines the common surface every variant presents to its
//! consumers and the immutable base state variants embed.

use crate::dex::{self, DexObject, DeserializationError};

/// Common surface of every concrete event-group variant
///
/// There is deliberately no way to construct a bare `EventGroup`: the base
/// form is a trait, so only concrete variants exist at runtime. Consumers
/// read `name`/`group_type`/`origin`/`time_range` from whatever
/// [`deserialize`](crate::registry::EventGroupRegistry::deserialize) hands
/// them; `to_dex_object` produces the record the matching factory can turn
/// back into an equivalent instance.
///
/// ```compile_fail
/// // The abstract base has no constructor; this does not compile.
/// let group = dex_core::group::EventGroup;
/// ```
///
/// # Example
///
/// ```rust
/// use dex_core::group::{EventGroup, GroupInfo};
/// use dex_core::dex::DexObject;
///
/// #[derive(Debug)]
/// struct ConstantGroup {
///     info: GroupInfo,
/// }
///
/// impl EventGroup for ConstantGroup {
///     fn info(&self) -> &GroupInfo {
///         &self.info
///     }
///
///     fn time_range(&self) -> Option<(f64, f64)> {
///         Some((0.0, 100.0))
///     }
///
///     fn to_dex_object(&self) -> DexObject {
///         self.info.to_dex_object()
///     }
/// }
/// ```
pub trait EventGroup: std::fmt::Debug + Send + Sync + 'static {
    /// Base state shared by every variant
    fn info(&self) -> &GroupInfo;

    /// Closed `[start, end]` interval spanned by the group's events
    ///
    /// `None` when the variant has no temporal data. Deterministic for a
    /// given instance and free of side effects.
    fn time_range(&self) -> Option<(f64, f64)>;

    /// Generic record sufficient to reconstruct an equivalent instance
    ///
    /// Always includes `name` and `type` (and `origin` when present) plus
    /// whatever variant-specific fields the matching factory's
    /// `from_dex_object` requires for round-trip.
    fn to_dex_object(&self) -> DexObject;

    /// Human-readable identifier, fixed at construction
    fn name(&self) -> &str {
        &self.info().name
    }

    /// Type tag identifying which factory produced/can reproduce this group
    fn group_type(&self) -> &str {
        &self.info().group_type
    }

    /// Provenance label, if the producing source recorded one
    fn origin(&self) -> Option<&str> {
        self.info().origin.as_deref()
    }
}

/// Immutable base state of an event group
///
/// Constructed by concrete variants (typically inside their factory's
/// `from_dex_object`) and never mutated afterwards. The `group_type` is the
/// variant's own declared tag, not whatever a record happened to carry, so a
/// deserialized instance's type always matches its producing factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    pub name: String,
    pub group_type: String,
    pub origin: Option<String>,
}

impl GroupInfo {
    /// Create base state for a concrete variant
    pub fn new(name: impl Into<String>, group_type: impl Into<String>, origin: Option<String>) -> Self {
        Self {
            name: name.into(),
            group_type: group_type.into(),
            origin,
        }
    }

    /// Read the common fields out of a dex record
    ///
    /// `group_type` is supplied by the calling factory rather than read from
    /// the record: the record's `type` field is only used for registry
    /// dispatch, and the constructed instance's type is the factory's tag.
    ///
    /// # Errors
    ///
    /// Returns `MissingField`/`MalformedField` if `name` is absent or either
    /// `name` or `origin` is not a string.
    pub fn from_dex_object(obj: &DexObject, group_type: &str) -> Result<Self, DeserializationError> {
        let name = dex::require_str(obj, "name")?;
        let origin = dex::optional_str(obj, "origin")?;
        Ok(Self::new(name, group_type, origin.map(str::to_owned)))
    }

    /// Seed a dex record with the common fields
    ///
    /// Variants extend the returned map with their own payload fields. An
    /// absent origin is omitted rather than written as `null`.
    pub fn to_dex_object(&self) -> DexObject {
        let mut obj = DexObject::new();
        obj.insert("name".to_string(), self.name.clone().into());
        obj.insert("type".to_string(), self.group_type.clone().into());
        if let Some(origin) = &self.origin {
            obj.insert("origin".to_string(), origin.clone().into());
        }
        obj
    }
}
