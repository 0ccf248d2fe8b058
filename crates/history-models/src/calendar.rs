use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decides which calendar day a timestamp belongs to.
///
/// Day boundaries depend on the viewer's timezone, not on UTC midnight, so
/// grouping always goes through a caller-supplied calendar.
pub trait Calendar {
    fn day_of(&self, at: &DateTime<Utc>) -> NaiveDate;

    /// Offset used to show wall-clock times on the same calendar
    fn local_offset(&self, at: &DateTime<Utc>) -> FixedOffset;
}

impl Calendar for Utc {
    fn day_of(&self, at: &DateTime<Utc>) -> NaiveDate {
        at.date_naive()
    }

    fn local_offset(&self, _at: &DateTime<Utc>) -> FixedOffset {
        Utc.fix()
    }
}

impl Calendar for Local {
    fn day_of(&self, at: &DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&Local).date_naive()
    }

    fn local_offset(&self, at: &DateTime<Utc>) -> FixedOffset {
        *at.with_timezone(&Local).offset()
    }
}

impl Calendar for FixedOffset {
    fn day_of(&self, at: &DateTime<Utc>) -> NaiveDate {
        at.with_timezone(self).date_naive()
    }

    fn local_offset(&self, _at: &DateTime<Utc>) -> FixedOffset {
        *self
    }
}

/// Configurable day boundary, stored in config as `"UTC"`, `"local"` or `"+09:00"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayBoundary {
    Utc,
    Local,
    /// Offset east of UTC in seconds
    Fixed(i32),
}

impl Default for DayBoundary {
    fn default() -> Self {
        DayBoundary::Local
    }
}

impl DayBoundary {
    fn fixed(&self) -> Option<FixedOffset> {
        match self {
            DayBoundary::Fixed(secs) => FixedOffset::east_opt(*secs),
            _ => None,
        }
    }
}

impl Calendar for DayBoundary {
    fn day_of(&self, at: &DateTime<Utc>) -> NaiveDate {
        match self {
            DayBoundary::Utc => Utc.day_of(at),
            DayBoundary::Local => Local.day_of(at),
            DayBoundary::Fixed(_) => match self.fixed() {
                Some(offset) => offset.day_of(at),
                None => Utc.day_of(at),
            },
        }
    }

    fn local_offset(&self, at: &DateTime<Utc>) -> FixedOffset {
        match self {
            DayBoundary::Utc => Utc.local_offset(at),
            DayBoundary::Local => Local.local_offset(at),
            DayBoundary::Fixed(_) => match self.fixed() {
                Some(offset) => offset,
                None => Utc.local_offset(at),
            },
        }
    }
}

impl FromStr for DayBoundary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "utc" | "z" | "gmt" => return Ok(DayBoundary::Utc),
            "local" | "" => return Ok(DayBoundary::Local),
            _ => {}
        }

        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (1, &trimmed[1..]),
            Some(b'-') => (-1, &trimmed[1..]),
            _ => return Err(format!("Invalid timezone: {}. Use 'UTC', 'local' or an offset like '+09:00'", s)),
        };

        let (hours, minutes) = match rest.split_once(':') {
            Some((h, m)) => (h, m),
            None => (rest, "0"),
        };
        let hours: i32 = hours
            .parse()
            .map_err(|_| format!("Invalid timezone offset hours: {}", s))?;
        let minutes: i32 = minutes
            .parse()
            .map_err(|_| format!("Invalid timezone offset minutes: {}", s))?;
        if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
            return Err(format!("Timezone offset out of range: {}", s));
        }

        Ok(DayBoundary::Fixed(sign * (hours * 3600 + minutes * 60)))
    }
}

impl fmt::Display for DayBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayBoundary::Utc => write!(f, "UTC"),
            DayBoundary::Local => write!(f, "local"),
            DayBoundary::Fixed(secs) => {
                let sign = if *secs < 0 { '-' } else { '+' };
                let abs = secs.abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
            }
        }
    }
}

impl TryFrom<String> for DayBoundary {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayBoundary> for String {
    fn from(value: DayBoundary) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_day_boundary() {
        assert_eq!("UTC".parse::<DayBoundary>().unwrap(), DayBoundary::Utc);
        assert_eq!("local".parse::<DayBoundary>().unwrap(), DayBoundary::Local);
        assert_eq!("+09:00".parse::<DayBoundary>().unwrap(), DayBoundary::Fixed(9 * 3600));
        assert_eq!("-05:30".parse::<DayBoundary>().unwrap(), DayBoundary::Fixed(-(5 * 3600 + 30 * 60)));
        assert!("Mars/Olympus".parse::<DayBoundary>().is_err());
        assert!("+25:00".parse::<DayBoundary>().is_err());
    }

    #[test]
    fn test_display_round_trips_offset() {
        let boundary = DayBoundary::Fixed(-(5 * 3600 + 30 * 60));
        assert_eq!(boundary.to_string(), "-05:30");
        assert_eq!(boundary.to_string().parse::<DayBoundary>().unwrap(), boundary);
    }

    #[test]
    fn test_day_boundary_is_not_utc_midnight() {
        // 23:30 UTC on Jan 1 is already Jan 2 in Tokyo
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        let tokyo = DayBoundary::Fixed(9 * 3600);

        assert_eq!(DayBoundary::Utc.day_of(&at), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(tokyo.day_of(&at), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }
}
