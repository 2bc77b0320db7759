//! Caller-boundary parsing for the stringly query surface.
//!
//! Every consumer of [`rank`](crate::rank) receives `lat`/`lng` (and the
//! optional `since`/`active_only`) as strings. Centralizing the parsing
//! here keeps the validation, and therefore the error class surfaced to
//! clients, identical across call sites.

use crate::{Error, Result};

/// Parse the required origin pair. Missing or non-numeric values fail with
/// [`Error::InvalidCoordinate`]; range checks happen later inside `rank`.
pub fn parse_origin(lat: Option<&str>, lng: Option<&str>) -> Result<(f64, f64)> {
    let lat = lat.ok_or_else(|| Error::invalid_coordinate("missing lat"))?;
    let lng = lng.ok_or_else(|| Error::invalid_coordinate("missing lng"))?;
    Ok((parse_coord("lat", lat)?, parse_coord("lng", lng)?))
}

/// Parse one coordinate component; non-numeric input fails with
/// [`Error::InvalidCoordinate`].
pub fn parse_coord(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::invalid_coordinate(format!("non-numeric {name}: {raw}")))
}

/// Parse an optional `since` cutoff, Unix seconds.
pub fn parse_since(value: Option<&str>) -> Result<Option<i64>> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::invalid_input(format!("Invalid since timestamp: {raw}"))),
        None => Ok(None),
    }
}

/// Parse a boolean-like query value (`active_only` and friends).
pub fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for {name}: {value} (expected true/false)"
        ))),
    }
}
