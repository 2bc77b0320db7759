use crate::{Error, GeoPoint, RankedResult, Result, coord::Coord};

const ERR_ORIGIN_NOT_FINITE: &str = "origin lat/lng must be finite";
const ERR_ORIGIN_OUT_OF_RANGE: &str = "origin lat/lng out of geographic range";

/// Pre-ranking candidate filters.
///
/// `since` keeps only candidates created strictly after the given Unix
/// second; candidates without a timestamp are excluded when it is set.
/// `active_only` (default true) drops candidates explicitly flagged
/// inactive; a missing flag counts as active.
///
/// `within_km` and `limit` carve up the already-sorted output and default
/// to off.
#[derive(Clone, Debug, PartialEq)]
pub struct RankFilters {
    pub since: Option<i64>,
    pub active_only: bool,
    pub within_km: Option<f64>,
    pub limit: Option<usize>,
}

impl Default for RankFilters {
    fn default() -> Self {
        Self {
            since: None,
            active_only: true,
            within_km: None,
            limit: None,
        }
    }
}

/// Rank `candidates` by ascending great-circle distance from the origin.
///
/// Filters are applied in input order, candidates with missing or invalid
/// coordinates are silently dropped, and ties keep their relative input
/// order. Pure and synchronous: no I/O, no shared state, safe to call
/// concurrently.
///
/// Fails with [`Error::InvalidCoordinate`] when the origin itself is
/// non-finite or out of geographic range, before any distance is computed.
/// An empty candidate list is not an error.
pub fn rank(
    lat: f64,
    lng: f64,
    candidates: Vec<GeoPoint>,
    filters: &RankFilters,
) -> Result<Vec<RankedResult>> {
    let origin = validate_origin(lat, lng)?;
    let n_in = candidates.len();

    let mut ranked: Vec<RankedResult> = candidates
        .into_iter()
        .filter(|p| keep_since(p, filters.since))
        .filter(|p| keep_active(p, filters.active_only))
        .filter_map(|p| {
            p.coord().map(|coord| RankedResult {
                distance_km: origin.distance_km(&coord),
                point: p,
            })
        })
        .collect();

    // Distances are finite by construction, so the total order coincides
    // with the numeric order. The sort is stable; ties keep input order.
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    if let Some(max_km) = filters.within_km {
        let cutoff = ranked.partition_point(|r| r.distance_km <= max_km);
        ranked.truncate(cutoff);
    }
    if let Some(limit) = filters.limit {
        ranked.truncate(limit);
    }

    log::debug!(
        "rank: origin={origin} n_in={n_in} n_ranked={}",
        ranked.len()
    );

    Ok(ranked)
}

fn validate_origin(lat: f64, lng: f64) -> Result<Coord> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err(Error::invalid_coordinate(format!(
            "{ERR_ORIGIN_NOT_FINITE}: lat={lat} lng={lng}"
        )));
    }
    let origin = Coord::new(lat, lng);
    if !origin.is_valid() {
        return Err(Error::invalid_coordinate(format!(
            "{ERR_ORIGIN_OUT_OF_RANGE}: lat={lat} lng={lng}"
        )));
    }
    Ok(origin)
}

fn keep_since(point: &GeoPoint, since: Option<i64>) -> bool {
    match since {
        Some(cutoff) => point.ts.is_some_and(|ts| ts > cutoff),
        None => true,
    }
}

fn keep_active(point: &GeoPoint, active_only: bool) -> bool {
    !active_only || point.active.unwrap_or(true)
}
