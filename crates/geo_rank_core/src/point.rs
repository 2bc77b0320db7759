use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coord::Coord;

/// Read-only snapshot of a geo-tagged entity (charging station, climate
/// shelter, alert) pulled from storage at query time.
///
/// A point with missing or invalid coordinates is unrankable and gets
/// excluded from results rather than causing a failure. Fields the backend
/// attaches beyond the known ones ride along untouched in `metadata`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GeoPoint {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Creation instant, Unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl GeoPoint {
    pub fn new(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            lat: Some(lat),
            lng: Some(lng),
            ts: None,
            active: None,
            metadata: Map::new(),
        }
    }

    pub fn with_ts(mut self, ts: i64) -> Self {
        self.ts = Some(ts);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Valid coordinate pair, or `None` when the point is unrankable.
    pub(crate) fn coord(&self) -> Option<Coord> {
        let coord = Coord::new(self.lat?, self.lng?);
        coord.is_valid().then_some(coord)
    }
}

/// One ranked candidate: the original point plus its great-circle distance
/// from the query origin. Serializes flat, so the JSON shape is the
/// candidate's own fields with `distance_km` appended.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub point: GeoPoint,
    pub distance_km: f64,
}
