use crate::RankedResult;

/// Log a one-line metrics summary for a ranked result set and return the
/// (nearest, farthest) distance pair. Relies on the output already being
/// sorted ascending by distance.
pub fn ranking_summary(results: &[RankedResult]) -> (f64, f64) {
    let (Some(first), Some(last)) = (results.first(), results.last()) else {
        log::info!("metrics: n=0 nearest_km=0 farthest_km=0");
        return (0.0, 0.0);
    };

    let nearest = first.distance_km;
    let farthest = last.distance_km;
    log::info!(
        "metrics: n={} nearest_km={nearest:.3} farthest_km={farthest:.3}",
        results.len()
    );

    (nearest, farthest)
}

#[cfg(test)]
mod tests {
    use super::ranking_summary;
    use crate::{GeoPoint, RankedResult};

    fn result(id: &str, distance_km: f64) -> RankedResult {
        RankedResult {
            point: GeoPoint::new(id, 41.0, 2.0),
            distance_km,
        }
    }

    #[test]
    fn summary_of_empty_results_is_zero() {
        assert_eq!(ranking_summary(&[]), (0.0, 0.0));
    }

    #[test]
    fn summary_reports_first_and_last_distance() {
        let results = vec![result("a", 0.5), result("b", 1.5), result("c", 12.25)];
        assert_eq!(ranking_summary(&results), (0.5, 12.25));
    }

    #[test]
    fn summary_of_single_result_repeats_the_distance() {
        let results = vec![result("a", 3.0)];
        assert_eq!(ranking_summary(&results), (3.0, 3.0));
    }
}
