use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::{fmt::Display, str::FromStr};

/// Wrapper type to parse `--boot-time` in several formats.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD` (both local time),
/// or `@SECONDS` since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootTimeArg(pub DateTime<Utc>);

impl std::str::FromStr for BootTimeArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        try_epoch_seconds(s)
            .or_else(|| try_rfc3339(s))
            .or_else(|| try_datetime_format(s))
            .or_else(|| try_date_format(s))
            .ok_or_else(|| format!("Cannot parse boot time: {s}"))
    }
}

fn try_epoch_seconds(s: &str) -> Option<BootTimeArg> {
    let secs = s.strip_prefix('@')?.parse::<i64>().ok()?;
    DateTime::<Utc>::from_timestamp(secs, 0).map(BootTimeArg)
}

fn try_rfc3339(s: &str) -> Option<BootTimeArg> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt: DateTime<FixedOffset>| BootTimeArg(dt.with_timezone(&Utc)))
}

fn try_datetime_format(s: &str) -> Option<BootTimeArg> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .and_then(|ndt| Local.from_local_datetime(&ndt).single())
        .map(|dt| BootTimeArg(dt.with_timezone(&Utc)))
}

fn try_date_format(s: &str) -> Option<BootTimeArg> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|nd: NaiveDate| nd.and_hms_opt(0, 0, 0))
        .and_then(|ndt| Local.from_local_datetime(&ndt).single())
        .map(|dt| BootTimeArg(dt.with_timezone(&Utc)))
}

fn parse_bounded_number<T>(s: &str, min: T, max: Option<T>) -> Result<T, String>
where
    T: Copy + PartialOrd + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    let value: T = s
        .trim()
        .parse()
        .map_err(|e| format!("Invalid number '{s}': {e}"))?;
    if value < min {
        return Err(format!("must be at least {min}"));
    }
    if let Some(max) = max
        && value > max
    {
        return Err(format!("must be at most {max}"));
    }
    Ok(value)
}

pub fn parse_max_depth(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 1, Some(4096))
}
