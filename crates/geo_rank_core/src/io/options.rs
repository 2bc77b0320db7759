use std::{
    env, fmt,
    iter::Peekable,
    path::Path,
};

use log::LevelFilter;

use crate::{Error, RankFilters, Result, params};

/// Runtime options for a ranking run.
#[derive(Clone, Debug, PartialEq)]
pub struct RankOptions {
    /// Query origin latitude, degrees.
    pub lat: Option<f64>,
    /// Query origin longitude, degrees.
    pub lng: Option<f64>,
    /// Only rank candidates created after this Unix second.
    pub since: Option<i64>,
    /// Drop candidates explicitly flagged inactive.
    pub active_only: bool,
    /// Drop ranked candidates farther than this many kilometers.
    pub within_km: Option<f64>,
    /// Keep only the nearest N candidates.
    pub limit: Option<usize>,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs and metrics. Empty means stderr.
    pub log_output: String,
    /// Optional input file path for candidates. Empty means stdin.
    pub input: String,
    /// Optional output file path for ranked results. Empty means stdout.
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-level: {value} (expected error|warn|info|debug|trace|off)"
            ))),
        }
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-format: {value} (expected compact|pretty)"
            ))),
        }
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            lat: None,
            lng: None,
            since: None,
            active_only: true,
            within_km: None,
            limit: None,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl RankOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = split_arg(raw_name, &mut args);

            match name.as_str() {
                "lat" => {
                    options.lat = Some(params::parse_coord("lat", &require_value(&name, value)?)?);
                }
                "lng" => {
                    options.lng = Some(params::parse_coord("lng", &require_value(&name, value)?)?);
                }
                "since" => {
                    options.since = params::parse_since(Some(&require_value(&name, value)?))?;
                }
                "within-km" => {
                    let raw = require_value(&name, value)?;
                    options.within_km = Some(raw.parse().map_err(|_| {
                        Error::invalid_input(format!("Invalid value for --within-km: {raw}"))
                    })?);
                }
                "limit" => {
                    let raw = require_value(&name, value)?;
                    options.limit = Some(raw.parse().map_err(|_| {
                        Error::invalid_input(format!("Invalid value for --limit: {raw}"))
                    })?);
                }
                "active-only" => {
                    options.active_only = match value {
                        Some(v) => params::parse_flag("--active-only", &v)?,
                        None => true,
                    };
                }
                "no-active-only" => {
                    reject_value(&name, value)?;
                    options.active_only = false;
                }
                "log-level" => {
                    options.log_level = LogLevel::parse(&require_value(&name, value)?)?;
                }
                "log-format" => {
                    options.log_format = LogFormat::parse(&require_value(&name, value)?)?;
                }
                "log-timestamp" => {
                    options.log_timestamp = match value {
                        Some(v) => params::parse_flag("--log-timestamp", &v)?,
                        None => true,
                    };
                }
                "no-log-timestamp" => {
                    reject_value(&name, value)?;
                    options.log_timestamp = false;
                }
                "log-output" => {
                    options.log_output = require_value(&name, value)?;
                }
                "input" => {
                    options.input = require_value(&name, value)?;
                }
                "output" => {
                    options.output = require_value(&name, value)?;
                }
                _ => {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: --{name}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        Ok(options)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  geo-rank --lat <deg> --lng <deg> [options] [--input points.jsonl]\n",
            "  geo-rank --lat <deg> --lng <deg> [options] < points.jsonl\n\n",
            "Options:\n",
            "  --lat <f64>                Query origin latitude (required)\n",
            "  --lng <f64>                Query origin longitude (required)\n",
            "  --since <unix-seconds>     Only rank candidates created after this instant\n",
            "  --active-only[=<bool>]     Drop candidates flagged inactive (default true)\n",
            "  --no-active-only\n",
            "  --within-km <f64>          Drop candidates farther than this distance\n",
            "  --limit <usize>            Keep only the nearest N candidates\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --input <path>             Candidate JSON lines. Empty or - means stdin\n",
            "  --output <path>            Ranked JSON lines. Empty or - means stdout\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  geo-rank --lat 41.3856 --lng 2.1737 < stations.jsonl\n",
            "  geo-rank --lat 41.3856 --lng 2.1737 --limit 5 --input stations.jsonl\n",
            "  geo-rank --lat=41.3856 --lng=2.1737 --since=1693400000 --no-active-only\n",
            "  geo-rank --lat 41.3856 --lng 2.1737 --within-km 2 --log-level=info\n",
        )
    }

    /// The validated origin pair; both components are required.
    pub fn origin(&self) -> Result<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Ok((lat, lng)),
            (None, _) => Err(Error::invalid_coordinate("missing --lat")),
            (_, None) => Err(Error::invalid_coordinate("missing --lng")),
        }
    }

    pub fn filters(&self) -> RankFilters {
        RankFilters {
            since: self.since,
            active_only: self.active_only,
            within_km: self.within_km,
            limit: self.limit,
        }
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        path_or_default(&self.log_output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        path_or_default(&self.input)
    }

    pub fn output_path(&self) -> Option<&Path> {
        path_or_default(&self.output)
    }
}

impl fmt::Display for RankOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lat={} lng={} since={} active_only={} within_km={} limit={} \
             log_level={:?} log_format={:?} log_timestamp={} log_output={} input={} output={}",
            kv_opt(&self.lat),
            kv_opt(&self.lng),
            kv_opt(&self.since),
            self.active_only,
            kv_opt(&self.within_km),
            kv_opt(&self.limit),
            self.log_level,
            self.log_format,
            self.log_timestamp,
            kv_str(&self.log_output),
            kv_str(&self.input),
            kv_str(&self.output),
        )
    }
}

fn kv_opt<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "none".to_string(),
    }
}

fn kv_str(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn split_arg<I>(raw_name: &str, args: &mut Peekable<I>) -> (String, Option<String>)
where
    I: Iterator<Item = String>,
{
    if let Some((name, value)) = raw_name.split_once('=') {
        (name.to_owned(), Some(value.to_owned()))
    } else if args.peek().is_some_and(|next| !next.starts_with("--")) {
        (raw_name.to_owned(), args.next())
    } else {
        (raw_name.to_owned(), None)
    }
}

fn require_value(name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::invalid_input(format!("Missing value for --{name}")))
}

fn reject_value(name: &str, value: Option<String>) -> Result<()> {
    if value.is_some() {
        return Err(Error::invalid_input(format!(
            "Flag --{name} does not take a value"
        )));
    }
    Ok(())
}

fn path_or_default(value: &str) -> Option<&Path> {
    let value = value.trim();
    if value.is_empty() || value == "-" {
        None
    } else {
        Some(Path::new(value))
    }
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::{LogFormat, LogLevel, RankOptions};

    #[test]
    fn log_level_maps_to_expected_filter() {
        assert_eq!(LogLevel::Error.to_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Warn.to_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Debug.to_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Trace.to_filter(), LevelFilter::Trace);
        assert_eq!(LogLevel::Off.to_filter(), LevelFilter::Off);
    }

    #[test]
    fn log_level_parse_accepts_warning_alias() {
        assert_eq!(LogLevel::parse("warning").expect("parse"), LogLevel::Warn);
    }

    #[test]
    fn parse_from_iter_applies_known_cli_options() {
        let options = RankOptions::parse_from_iter([
            "--lat=41.3856",
            "--lng=2.1737",
            "--since=1693400000",
            "--active-only=false",
            "--within-km=2.5",
            "--limit=5",
            "--log-level=debug",
            "--log-format=pretty",
            "--log-timestamp=false",
            "--log-output=run.log",
            "--input=points.jsonl",
            "--output=ranked.jsonl",
        ])
        .expect("parse options");

        assert_eq!(options.lat, Some(41.3856));
        assert_eq!(options.lng, Some(2.1737));
        assert_eq!(options.since, Some(1_693_400_000));
        assert!(!options.active_only);
        assert_eq!(options.within_km, Some(2.5));
        assert_eq!(options.limit, Some(5));
        assert_eq!(options.log_level, LogLevel::Debug);
        assert_eq!(options.log_format, LogFormat::Pretty);
        assert!(!options.log_timestamp);
        assert_eq!(options.log_output, "run.log");
        assert_eq!(options.input, "points.jsonl");
        assert_eq!(options.output, "ranked.jsonl");
    }

    #[test]
    fn parse_from_iter_accepts_space_separated_values() {
        let options = RankOptions::parse_from_iter(["--lat", "41.0", "--lng", "-2.5"])
            .expect("parse options");
        assert_eq!(options.lat, Some(41.0));
        assert_eq!(options.lng, Some(-2.5));
    }

    #[test]
    fn parse_from_iter_accepts_no_active_only_flag() {
        let options = RankOptions::parse_from_iter(["--no-active-only"]).expect("parse options");
        assert!(!options.active_only);
    }

    #[test]
    fn parse_from_iter_rejects_no_active_only_with_value() {
        let err = RankOptions::parse_from_iter(["--no-active-only=true"])
            .expect_err("expected flag value rejection");
        assert!(err.to_string().contains("does not take a value"));
    }

    #[test]
    fn parse_from_iter_accepts_no_log_timestamp_flag() {
        let options = RankOptions::parse_from_iter(["--no-log-timestamp"]).expect("parse options");
        assert!(!options.log_timestamp);
    }

    #[test]
    fn parse_from_iter_rejects_unknown_option() {
        let err = RankOptions::parse_from_iter(["--unknown-opt=1"])
            .expect_err("expected unknown option error");
        assert!(err.to_string().contains("Unknown option: --unknown-opt"));
    }

    #[test]
    fn parse_from_iter_rejects_unexpected_positional_argument() {
        let err = RankOptions::parse_from_iter(["points.jsonl"])
            .expect_err("expected positional error");
        assert!(err.to_string().contains("Unexpected argument: points.jsonl"));
    }

    #[test]
    fn parse_from_iter_requires_value_for_lat() {
        let err = RankOptions::parse_from_iter(["--lat"]).expect_err("missing value should fail");
        assert!(err.to_string().contains("Missing value for --lat"));
    }

    #[test]
    fn parse_from_iter_rejects_non_numeric_lat() {
        let err = RankOptions::parse_from_iter(["--lat=abc"])
            .expect_err("non-numeric lat should fail");
        assert!(err.to_string().contains("non-numeric lat: abc"));
    }

    #[test]
    fn parse_from_iter_help_returns_usage_error() {
        let err = RankOptions::parse_from_iter(["--help"]).expect_err("help should short-circuit");
        assert!(err.to_string().contains("Usage:"));
    }

    #[test]
    fn active_only_defaults_to_true() {
        let options = RankOptions::default();
        assert!(options.active_only);
    }

    #[test]
    fn origin_requires_both_components() {
        let options = RankOptions::parse_from_iter(["--lat=41.0"]).expect("parse options");
        let err = options.origin().expect_err("missing lng should fail");
        assert!(err.to_string().contains("missing --lng"));

        let options =
            RankOptions::parse_from_iter(["--lat=41.0", "--lng=2.0"]).expect("parse options");
        assert_eq!(options.origin().expect("origin"), (41.0, 2.0));
    }

    #[test]
    fn filters_carry_the_parsed_values() {
        let options =
            RankOptions::parse_from_iter(["--since=100", "--limit=3", "--no-active-only"])
                .expect("parse options");
        let filters = options.filters();
        assert_eq!(filters.since, Some(100));
        assert_eq!(filters.limit, Some(3));
        assert!(!filters.active_only);
        assert_eq!(filters.within_km, None);
    }

    #[test]
    fn input_path_treats_empty_and_dash_as_stdin() {
        let options = RankOptions::default();
        assert!(options.input_path().is_none());

        let options = RankOptions {
            input: "-".to_string(),
            ..RankOptions::default()
        };
        assert!(options.input_path().is_none());
    }

    #[test]
    fn output_path_returns_path_for_non_empty_value() {
        let options = RankOptions {
            output: "out/ranked.jsonl".to_string(),
            ..RankOptions::default()
        };
        assert_eq!(
            options.output_path().expect("path should exist"),
            std::path::Path::new("out/ranked.jsonl")
        );
    }

    #[test]
    fn log_output_path_treats_empty_and_dash_as_stderr() {
        let options = RankOptions::default();
        assert!(options.log_output_path().is_none());

        let options = RankOptions {
            log_output: "-".to_string(),
            ..RankOptions::default()
        };
        assert!(options.log_output_path().is_none());
    }

    #[test]
    fn display_renders_kv_pairs() {
        let options =
            RankOptions::parse_from_iter(["--lat=41.0", "--lng=2.0", "--limit=3"])
                .expect("parse options");
        let rendered = options.to_string();
        assert!(rendered.contains("lat=41 lng=2"));
        assert!(rendered.contains("limit=3"));
        assert!(rendered.contains("since=none"));
    }
}
