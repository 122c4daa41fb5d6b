//! EventGroupFactory trait bridging dex records to concrete groups
//!
//! A factory claims exactly one type tag and knows how to validate and build
//! its variant from an untyped record. Factories are registered with the
//! registry and invoked from its `deserialize` entry point; they hold no
//! mutable state, so one instance serves every record of its type.

use crate::dex::{DexObject, DeserializationError};
use crate::group::EventGroup;

/// Construction capability for exactly one event-group type tag
///
/// Implementations must uphold the round-trip contract: for any group `g`
/// the factory produced, `from_dex_object(&g.to_dex_object())` yields an
/// instance with the same `name`, `type` and `origin`.
///
/// # Example
///
/// ```rust
/// use dex_core::dex::{self, DexObject, DeserializationError};
/// use dex_core::factory::EventGroupFactory;
/// use dex_core::group::{EventGroup, GroupInfo};
///
/// #[derive(Debug)]
/// struct MarkerGroup {
///     info: GroupInfo,
/// }
///
/// impl EventGroup for MarkerGroup {
///     fn info(&self) -> &GroupInfo {
///         &self.info
///     }
///     fn time_range(&self) -> Option<(f64, f64)> {
///         None
///     }
///     fn to_dex_object(&self) -> DexObject {
///         self.info.to_dex_object()
///     }
/// }
///
/// struct MarkerFactory;
///
/// impl EventGroupFactory for MarkerFactory {
///     fn group_type(&self) -> &str {
///         "Marker"
///     }
///
///     fn from_dex_object(&self, obj: &DexObject) -> Result<Box<dyn EventGroup>, DeserializationError> {
///         let info = GroupInfo::from_dex_object(obj, self.group_type())?;
///         Ok(Box::new(MarkerGroup { info }))
///     }
/// }
/// ```
pub trait EventGroupFactory: Send + Sync + 'static {
    /// The one type tag this factory claims
    fn group_type(&self) -> &str;

    /// Build a concrete group from an untyped record
    ///
    /// Validates the fields this variant requires. The returned group's
    /// `group_type()` equals this factory's declared tag; `name` and
    /// `origin` come from the record.
    ///
    /// # Errors
    ///
    /// Returns `DeserializationError` when a required field is missing or a
    /// present field does not have the expected shape.
    fn from_dex_object(&self, obj: &DexObject) -> Result<Box<dyn EventGroup>, DeserializationError>;
}
