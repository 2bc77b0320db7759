//! Geospatial proximity ranking for municipal mobility backends.
//!
//! Given a query origin and a collection of geo-tagged candidates
//! (charging stations, climate shelters, alerts), [`rank`] computes the
//! great-circle distance to each candidate and returns a stably-sorted,
//! distance-annotated list, with optional recency/activity filtering.
//! The computation is a pure function over an in-memory candidate list;
//! fetching candidates from storage is the caller's job.

mod coord;
mod error;
mod io;
pub mod logging;
pub mod params;
mod point;
mod ranker;
pub mod utils;

pub use coord::{Coord, EARTH_RADIUS_KM};
pub use error::{Error, Result};
pub use io::input::{parse_candidates, read_candidates_from_file, read_candidates_from_stdin};
pub use io::options::{LogFormat, LogLevel, RankOptions};
pub use point::{GeoPoint, RankedResult};
pub use ranker::{RankFilters, rank};
