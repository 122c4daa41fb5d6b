//! Box-shaped tracker hits
//!
//! Each hit is an axis-aligned box at a measured position with a measured
//! time; the group's time range spans the hit times.

use serde_json::{json, Value};

use dex_core::dex::{self, DexObject, DeserializationError};
use dex_core::{EventGroup, EventGroupFactory, GroupInfo};

use crate::fixed;

/// Type tag claimed by [`BoxHitFactory`]
pub const BOX_HIT_TYPE: &str = "BoxTrackerHit";

/// One box-shaped hit measurement
#[derive(Debug, Clone, PartialEq)]
pub struct BoxHit {
    /// Hit center `[x, y, z]`
    pub position: [f64; 3],
    /// Box extent `[dx, dy, dz]`
    pub dimensions: [f64; 3],
    /// Measured time and its error `[t, dt]`
    pub time: [f64; 2],
}

impl BoxHit {
    fn from_dex_value(value: &Value) -> Result<Self, DeserializationError> {
        let obj = value.as_object().ok_or_else(|| DeserializationError::MalformedField {
            field: "hits",
            reason: "expected each hit to be an object".to_string(),
        })?;

        let position = read_fixed::<3>(obj, "position")?;
        let dimensions = read_fixed::<3>(obj, "dimensions")?;
        let time = read_fixed::<2>(obj, "time")?;

        Ok(Self {
            position,
            dimensions,
            time,
        })
    }

    fn to_dex_value(&self) -> Value {
        json!({
            "position": self.position,
            "dimensions": self.dimensions,
            "time": self.time,
        })
    }
}

fn read_fixed<const N: usize>(obj: &DexObject, field: &'static str) -> Result<[f64; N], DeserializationError> {
    let value = obj.get(field).ok_or(DeserializationError::MissingField { field })?;
    fixed::<N>(dex::f64_seq(value, field)?, field)
}

/// Event group of box-shaped tracker hits
#[derive(Debug)]
pub struct BoxHitGroup {
    info: GroupInfo,
    hits: Vec<BoxHit>,
}

impl BoxHitGroup {
    pub fn new(name: impl Into<String>, origin: Option<String>, hits: Vec<BoxHit>) -> Self {
        Self {
            info: GroupInfo::new(name, BOX_HIT_TYPE, origin),
            hits,
        }
    }

    pub fn hits(&self) -> &[BoxHit] {
        &self.hits
    }
}

impl EventGroup for BoxHitGroup {
    fn info(&self) -> &GroupInfo {
        &self.info
    }

    /// Spans the measured hit times; `None` when the group has no hits
    fn time_range(&self) -> Option<(f64, f64)> {
        let mut times = self.hits.iter().map(|hit| hit.time[0]);
        let first = times.next()?;
        let (start, end) = times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some((start, end))
    }

    fn to_dex_object(&self) -> DexObject {
        let mut obj = self.info.to_dex_object();
        obj.insert(
            "hits".to_string(),
            Value::Array(self.hits.iter().map(BoxHit::to_dex_value).collect()),
        );
        obj
    }
}

/// Factory reconstructing [`BoxHitGroup`] records
pub struct BoxHitFactory;

impl EventGroupFactory for BoxHitFactory {
    fn group_type(&self) -> &str {
        BOX_HIT_TYPE
    }

    fn from_dex_object(&self, obj: &DexObject) -> Result<Box<dyn EventGroup>, DeserializationError> {
        let info = GroupInfo::from_dex_object(obj, self.group_type())?;
        let hits = dex::require_array(obj, "hits")?
            .iter()
            .map(BoxHit::from_dex_value)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Box::new(BoxHitGroup {
            info,
            hits,
        }))
    }
}
