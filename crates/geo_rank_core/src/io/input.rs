use std::{fs, io::Read, path::Path};

use crate::{Error, GeoPoint, Result};

/// Read JSON-Lines candidates from stdin.
pub fn read_candidates_from_stdin() -> Result<Vec<GeoPoint>> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    parse_candidates(&input)
}

/// Read JSON-Lines candidates from a file.
pub fn read_candidates_from_file(path: &Path) -> Result<Vec<GeoPoint>> {
    let input = fs::read_to_string(path)?;
    parse_candidates(&input)
}

/// Parse JSON-Lines candidate input: one JSON object per line, blank lines
/// skipped. Unknown object fields land in the point's metadata map. Empty
/// input yields an empty list, not an error.
pub fn parse_candidates(input: &str) -> Result<Vec<GeoPoint>> {
    let mut points = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let point: GeoPoint = serde_json::from_str(line)
            .map_err(|e| Error::invalid_data(format!("line {}: {e}", idx + 1)))?;
        points.push(point);
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::parse_candidates;

    #[test]
    fn parse_candidates_reads_one_object_per_line() {
        let points = parse_candidates(concat!(
            r#"{"id":"st-1","lat":41.39,"lng":2.18}"#,
            "\n",
            r#"{"id":"st-2","lat":41.40,"lng":2.19,"active":false}"#,
            "\n",
        ))
        .expect("parse candidates");

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].id, "st-1");
        assert_eq!(points[1].active, Some(false));
    }

    #[test]
    fn parse_candidates_skips_blank_lines() {
        let points = parse_candidates("\n  \n{\"id\":\"st-1\",\"lat\":1.0,\"lng\":2.0}\n\n")
            .expect("parse candidates");
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn parse_candidates_accepts_empty_input() {
        let points = parse_candidates("").expect("empty input is not an error");
        assert!(points.is_empty());
    }

    #[test]
    fn parse_candidates_keeps_unknown_fields_as_metadata() {
        let points = parse_candidates(r#"{"id":"a-1","lat":1.0,"lng":2.0,"severity":"high"}"#)
            .expect("parse candidates");
        assert_eq!(points[0].metadata["severity"], "high");
    }

    #[test]
    fn parse_candidates_reports_the_failing_line() {
        let err = parse_candidates(concat!(
            r#"{"id":"st-1","lat":1.0,"lng":2.0}"#,
            "\n",
            "not json",
            "\n",
        ))
        .expect_err("malformed line should fail");
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn parse_candidates_allows_points_without_coordinates() {
        let points = parse_candidates(r#"{"id":"no-coords"}"#).expect("parse candidates");
        assert_eq!(points.len(), 1);
        assert!(points[0].lat.is_none());
        assert!(points[0].lng.is_none());
    }
}
