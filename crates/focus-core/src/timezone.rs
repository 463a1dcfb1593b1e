//! Timezone configuration for local-time bucketing
//!
//! Every "local" instant in the statistics (day boundaries, hour-of-day,
//! weekday, history labels) is computed in the zone held by [`TimezoneConfig`].
//! The zone is taken from the CLI, the `TZ` variable, or the system setting.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

/// Configuration for timezone handling
#[derive(Debug, Clone, Copy)]
pub struct TimezoneConfig {
    /// The timezone to use for date operations
    pub tz: Tz,
    /// Whether the timezone is UTC
    pub is_utc: bool,
}

impl Default for TimezoneConfig {
    /// The zone named by `TZ`, else the system zone, else UTC
    ///
    /// A name that chrono-tz does not know is skipped like an unset one.
    fn default() -> Self {
        let from_env = std::env::var("TZ").ok().map(|name| ("TZ", name));
        let from_system = || {
            iana_time_zone::get_timezone()
                .map_err(|e| debug!("System timezone unavailable: {e}"))
                .ok()
                .map(|name| ("system", name))
        };

        let tz = from_env
            .into_iter()
            .chain(std::iter::once_with(from_system).flatten())
            .find_map(|(source, name)| match name.parse::<Tz>() {
                Ok(tz) => {
                    debug!("Local timezone {name} (from {source})");
                    Some(tz)
                }
                Err(_) => {
                    debug!("Ignoring unknown {source} timezone '{name}'");
                    None
                }
            })
            .unwrap_or(Tz::UTC);

        Self::new(tz)
    }
}

impl TimezoneConfig {
    /// Build a configuration for a fixed zone
    pub fn new(tz: Tz) -> Self {
        Self {
            is_utc: tz == Tz::UTC,
            tz,
        }
    }

    /// Create a new timezone configuration from CLI arguments
    pub fn from_cli(timezone_str: Option<&str>, use_utc: bool) -> crate::error::Result<Self> {
        if use_utc {
            return Ok(Self::new(Tz::UTC));
        }

        match timezone_str {
            Some(tz_str) => {
                let tz = Tz::from_str(tz_str).map_err(|_| {
                    crate::error::FocusError::InvalidTimezone(format!(
                        "'{tz_str}'. Use format like 'America/New_York', 'Africa/Lagos', or 'UTC'"
                    ))
                })?;
                Ok(Self::new(tz))
            }
            None => Ok(Self::default()),
        }
    }

    /// Get the display name for the configured timezone
    pub fn display_name(&self) -> &str {
        if self.is_utc { "UTC" } else { self.tz.name() }
    }

    /// Current instant in the configured zone
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

/// Anchor a wall-clock value in `tz`
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times in a
/// DST gap move forward by an hour.
pub fn localize(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// 00:00:00 of `date` in `tz`
pub fn start_of_day(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    localize(tz, date.and_time(NaiveTime::MIN))
}

/// 23:59:59 of `date` in `tz`
pub fn end_of_day(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    localize(tz, date.and_time(last_second))
}
