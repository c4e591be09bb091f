// crates/engine/src/boot.rs
//! Boot instant resolution.
//!
//! The sweep only deletes entries whose timestamps all predate the last boot,
//! so the boot instant is the single run-wide input to every decision. It is
//! resolved once, up front, and handed to the sweeper by value.
//!
//! # Under-reporting
//!
//! Some hosts only refresh their boot time on a full restart (Windows "Fast
//! Startup" keeps the old value across shutdown and hibernate). The reported
//! instant can therefore be older than the real boot. That direction of error
//! only makes the sweep more conservative.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use log::warn;

/// UTC instant of the most recent system boot.
///
/// When the boot time cannot be determined this is [`BootInstant::UNKNOWN`],
/// the earliest representable instant, which no timestamp can precede.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BootInstant(DateTime<Utc>);

impl BootInstant {
    /// Fail-closed value used when the host cannot answer.
    pub const UNKNOWN: Self = Self(DateTime::<Utc>::MIN_UTC);

    #[must_use]
    pub const fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Converts a host-reported count of seconds since the Unix epoch.
    ///
    /// Zero is how the host reports "unknown" and maps to [`Self::UNKNOWN`], as
    /// does any value chrono cannot represent.
    #[must_use]
    pub fn from_unix_seconds(secs: u64) -> Self {
        if secs == 0 {
            return Self::UNKNOWN;
        }
        i64::try_from(secs)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map_or(Self::UNKNOWN, Self)
    }

    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }

    /// True when `at` lies strictly before this boot.
    #[must_use]
    pub fn predates(&self, at: DateTime<Utc>) -> bool {
        at < self.0
    }
}

impl From<DateTime<Utc>> for BootInstant {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl fmt::Display for BootInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            f.write_str("unknown")
        } else {
            write!(f, "{}", self.0.to_rfc3339())
        }
    }
}

/// Port for asking the host when it booted.
pub trait BootTimeSource {
    /// Performs the lookup. `None` means the host could not answer.
    fn query(&self) -> Option<BootInstant>;
}

/// Queries the operating system through `sysinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBootTime;

impl BootTimeSource for SystemBootTime {
    fn query(&self) -> Option<BootInstant> {
        let instant = BootInstant::from_unix_seconds(sysinfo::System::boot_time());
        (!instant.is_unknown()).then_some(instant)
    }
}

/// A boot instant supplied up front instead of queried.
#[derive(Debug, Clone, Copy)]
pub struct FixedBootTime(pub BootInstant);

impl BootTimeSource for FixedBootTime {
    fn query(&self) -> Option<BootInstant> {
        Some(self.0)
    }
}

/// Resolves the boot instant at most once and remembers the answer.
///
/// There is deliberately a single attempt: a failed lookup degrades to
/// [`BootInstant::UNKNOWN`] and stays that way for the rest of the run.
#[derive(Debug)]
pub struct BootTimeOracle<S> {
    source: S,
    resolved: OnceLock<BootInstant>,
}

impl<S: BootTimeSource> BootTimeOracle<S> {
    pub const fn new(source: S) -> Self {
        Self {
            source,
            resolved: OnceLock::new(),
        }
    }

    pub fn resolve(&self) -> BootInstant {
        *self.resolved.get_or_init(|| {
            self.source.query().unwrap_or_else(|| {
                warn!("boot time could not be determined; nothing will be deleted");
                BootInstant::UNKNOWN
            })
        })
    }
}

impl BootTimeOracle<SystemBootTime> {
    #[must_use]
    pub const fn system() -> Self {
        Self::new(SystemBootTime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::Cell;

    struct CountingSource {
        calls: Cell<usize>,
        answer: Option<BootInstant>,
    }

    impl BootTimeSource for CountingSource {
        fn query(&self) -> Option<BootInstant> {
            self.calls.set(self.calls.get() + 1);
            self.answer
        }
    }

    #[test]
    fn zero_seconds_means_unknown() {
        assert!(BootInstant::from_unix_seconds(0).is_unknown());
    }

    #[test]
    fn out_of_range_seconds_mean_unknown() {
        assert!(BootInstant::from_unix_seconds(u64::MAX).is_unknown());
    }

    #[test]
    fn converts_epoch_seconds_to_utc() {
        let boot = BootInstant::from_unix_seconds(1_700_000_000);
        assert_eq!(
            boot.as_datetime(),
            Utc.timestamp_opt(1_700_000_000, 0).unwrap()
        );
    }

    #[test]
    fn unknown_instant_is_preceded_by_nothing() {
        assert!(!BootInstant::UNKNOWN.predates(DateTime::<Utc>::MIN_UTC));
        assert!(!BootInstant::UNKNOWN.predates(Utc::now()));
    }

    #[test]
    fn predates_is_strict() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let boot = BootInstant::new(at);
        assert!(!boot.predates(at));
        assert!(boot.predates(at - chrono::Duration::seconds(1)));
    }

    #[test]
    fn oracle_queries_only_once() {
        let boot = BootInstant::from_unix_seconds(1_600_000_000);
        let oracle = BootTimeOracle::new(CountingSource {
            calls: Cell::new(0),
            answer: Some(boot),
        });
        assert_eq!(oracle.resolve(), boot);
        assert_eq!(oracle.resolve(), boot);
        assert_eq!(oracle.source.calls.get(), 1);
    }

    #[test]
    fn failed_lookup_is_cached_as_unknown() {
        let oracle = BootTimeOracle::new(CountingSource {
            calls: Cell::new(0),
            answer: None,
        });
        assert!(oracle.resolve().is_unknown());
        assert!(oracle.resolve().is_unknown());
        assert_eq!(oracle.source.calls.get(), 1);
    }

    #[test]
    fn fixed_source_answers_verbatim() {
        let boot = BootInstant::from_unix_seconds(42);
        assert_eq!(BootTimeOracle::new(FixedBootTime(boot)).resolve(), boot);
    }

    #[test]
    fn display_marks_unknown() {
        assert_eq!(BootInstant::UNKNOWN.to_string(), "unknown");
    }
}
