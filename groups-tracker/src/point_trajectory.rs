//! Point-sampled track trajectories
//!
//! A trajectory is a polyline of point rows; the meaning of each row column
//! is given by the group's `point_columns` names (e.g. `x, y, z, t`). Track
//! parameters follow `param_columns` the same way. The time range scans the
//! `"t"` point column when the group has one.

use serde_json::{json, Value};

use dex_core::dex::{self, DexObject, DeserializationError};
use dex_core::{EventGroup, EventGroupFactory, GroupInfo};

/// Type tag claimed by [`PointTrajectoryFactory`]
pub const POINT_TRAJECTORY_TYPE: &str = "PointTrajectory";

/// Name of the point column carrying time
const TIME_COLUMN: &str = "t";

/// One track: its fit parameters and its sampled points
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// One value per entry of the group's `param_columns`
    pub params: Vec<f64>,
    /// Point rows, each one value per entry of the group's `point_columns`
    pub points: Vec<Vec<f64>>,
}

/// Event group of point-sampled trajectories
#[derive(Debug)]
pub struct PointTrajectoryGroup {
    info: GroupInfo,
    param_columns: Vec<String>,
    point_columns: Vec<String>,
    trajectories: Vec<Trajectory>,
}

impl PointTrajectoryGroup {
    pub fn new(
        name: impl Into<String>,
        origin: Option<String>,
        param_columns: Vec<String>,
        point_columns: Vec<String>,
        trajectories: Vec<Trajectory>,
    ) -> Self {
        Self {
            info: GroupInfo::new(name, POINT_TRAJECTORY_TYPE, origin),
            param_columns,
            point_columns,
            trajectories,
        }
    }

    pub fn param_columns(&self) -> &[String] {
        &self.param_columns
    }

    pub fn point_columns(&self) -> &[String] {
        &self.point_columns
    }

    pub fn trajectories(&self) -> &[Trajectory] {
        &self.trajectories
    }
}

impl EventGroup for PointTrajectoryGroup {
    fn info(&self) -> &GroupInfo {
        &self.info
    }

    /// Spans the `"t"` point column across all trajectories
    ///
    /// `None` when the group has no `"t"` column or no points at all.
    fn time_range(&self) -> Option<(f64, f64)> {
        let t_index = self.point_columns.iter().position(|c| c == TIME_COLUMN)?;

        let mut range: Option<(f64, f64)> = None;
        for trajectory in &self.trajectories {
            for point in &trajectory.points {
                let Some(&t) = point.get(t_index) else { continue };
                range = Some(match range {
                    None => (t, t),
                    Some((lo, hi)) => (lo.min(t), hi.max(t)),
                });
            }
        }
        range
    }

    fn to_dex_object(&self) -> DexObject {
        let trajectories: Vec<Value> = self
            .trajectories
            .iter()
            .map(|trajectory| {
                json!({
                    "params": trajectory.params,
                    "points": trajectory.points,
                })
            })
            .collect();

        let mut obj = self.info.to_dex_object();
        obj.insert("paramColumns".to_string(), json!(self.param_columns));
        obj.insert("pointColumns".to_string(), json!(self.point_columns));
        obj.insert("trajectories".to_string(), Value::Array(trajectories));
        obj
    }
}

/// Factory reconstructing [`PointTrajectoryGroup`] records
pub struct PointTrajectoryFactory;

impl EventGroupFactory for PointTrajectoryFactory {
    fn group_type(&self) -> &str {
        POINT_TRAJECTORY_TYPE
    }

    fn from_dex_object(&self, obj: &DexObject) -> Result<Box<dyn EventGroup>, DeserializationError> {
        let info = GroupInfo::from_dex_object(obj, self.group_type())?;
        let param_columns = string_seq(obj, "paramColumns")?;
        let point_columns = string_seq(obj, "pointColumns")?;

        let trajectories = dex::require_array(obj, "trajectories")?
            .iter()
            .map(|value| read_trajectory(value, point_columns.len()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Box::new(PointTrajectoryGroup {
            info,
            param_columns,
            point_columns,
            trajectories,
        }))
    }
}

fn string_seq(obj: &DexObject, field: &'static str) -> Result<Vec<String>, DeserializationError> {
    dex::require_array(obj, field)?
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_owned)
                .ok_or_else(|| DeserializationError::MalformedField {
                    field,
                    reason: "expected an array of strings".to_string(),
                })
        })
        .collect()
}

fn read_trajectory(value: &Value, point_width: usize) -> Result<Trajectory, DeserializationError> {
    let obj = value.as_object().ok_or_else(|| DeserializationError::MalformedField {
        field: "trajectories",
        reason: "expected each trajectory to be an object".to_string(),
    })?;

    let params = match obj.get("params") {
        None => Vec::new(),
        Some(value) => dex::f64_seq(value, "trajectories")?,
    };

    let rows = obj
        .get("points")
        .ok_or(DeserializationError::MissingField { field: "trajectories" })?
        .as_array()
        .ok_or_else(|| DeserializationError::MalformedField {
            field: "trajectories",
            reason: "expected 'points' to be an array of rows".to_string(),
        })?;

    let points = rows
        .iter()
        .map(|row| {
            let row = dex::f64_seq(row, "trajectories")?;
            if row.len() != point_width {
                return Err(DeserializationError::MalformedField {
                    field: "trajectories",
                    reason: format!(
                        "point row has {} values but pointColumns names {point_width}",
                        row.len()
                    ),
                });
            }
            Ok(row)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Trajectory { params, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample_group() -> PointTrajectoryGroup {
        PointTrajectoryGroup::new(
            "central tracks",
            Some("CentralCKFTrajectories".to_string()),
            columns(&["theta", "phi", "qOverP"]),
            columns(&["x", "y", "z", "t"]),
            vec![
                Trajectory {
                    params: vec![1.2, 0.3, -0.5],
                    points: vec![
                        vec![0.0, 0.0, 0.0, 4.0],
                        vec![1.0, 0.5, 10.0, 8.5],
                    ],
                },
                Trajectory {
                    params: vec![0.9, -1.1, 0.4],
                    points: vec![vec![0.0, 0.0, 0.0, 2.5]],
                },
            ],
        )
    }

    fn record(value: serde_json::Value) -> DexObject {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test record must be a JSON object"),
        }
    }

    #[test]
    fn test_time_range_scans_t_column() {
        assert_eq!(sample_group().time_range(), Some((2.5, 8.5)));
    }

    #[test]
    fn test_time_range_without_t_column() {
        let group = PointTrajectoryGroup::new(
            "no time",
            None,
            Vec::new(),
            columns(&["x", "y", "z"]),
            vec![Trajectory {
                params: Vec::new(),
                points: vec![vec![0.0, 0.0, 0.0]],
            }],
        );
        assert_eq!(group.time_range(), None);
    }

    #[test]
    fn test_time_range_without_points() {
        let group = PointTrajectoryGroup::new(
            "empty",
            None,
            Vec::new(),
            columns(&["x", "y", "z", "t"]),
            Vec::new(),
        );
        assert_eq!(group.time_range(), None);
    }

    #[test]
    fn test_from_dex_object() {
        let obj = record(json!({
            "name": "central tracks",
            "type": "PointTrajectory",
            "paramColumns": ["theta", "phi"],
            "pointColumns": ["x", "y", "z", "t"],
            "trajectories": [
                {"params": [1.0, 2.0], "points": [[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 3.0]]},
            ],
        }));

        let group = PointTrajectoryFactory.from_dex_object(&obj).unwrap();
        assert_eq!(group.name(), "central tracks");
        assert_eq!(group.group_type(), POINT_TRAJECTORY_TYPE);
        assert_eq!(group.origin(), None);
        assert_eq!(group.time_range(), Some((1.0, 3.0)));
    }

    #[test]
    fn test_from_dex_object_rejects_ragged_rows() {
        let obj = record(json!({
            "name": "central tracks",
            "type": "PointTrajectory",
            "paramColumns": [],
            "pointColumns": ["x", "y", "z", "t"],
            "trajectories": [
                {"params": [], "points": [[0.0, 0.0, 0.0]]},
            ],
        }));

        let err = PointTrajectoryFactory.from_dex_object(&obj).unwrap_err();
        match err {
            DeserializationError::MalformedField { field, reason } => {
                assert_eq!(field, "trajectories");
                assert!(reason.contains("3 values"));
            }
            other => panic!("expected MalformedField, got {other:?}"),
        }
    }

    #[test]
    fn test_from_dex_object_missing_columns() {
        let obj = record(json!({
            "name": "central tracks",
            "type": "PointTrajectory",
            "trajectories": [],
        }));

        let err = PointTrajectoryFactory.from_dex_object(&obj).unwrap_err();
        assert!(matches!(err, DeserializationError::MissingField { field: "paramColumns" }));
    }

    #[test]
    fn test_round_trip() {
        let group = sample_group();
        let obj = group.to_dex_object();

        let back = PointTrajectoryFactory.from_dex_object(&obj).unwrap();
        assert_eq!(back.name(), group.name());
        assert_eq!(back.group_type(), group.group_type());
        assert_eq!(back.origin(), group.origin());
        assert_eq!(back.time_range(), group.time_range());
        assert_eq!(back.to_dex_object(), obj);
    }
}
