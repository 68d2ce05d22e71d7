use chrono::NaiveDateTime;

use crate::domain::validation::ValidationError;
use crate::domain::value::TimezoneOffset;

const DATETIME_FORMAT: &str = "%d%m%y%H%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Delivery window; the message goes out immediately if "now" falls inside it, otherwise at
/// the next `start`.
///
/// Invariant: `start < end`.
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeRange {
    /// Create a validated [`TimeRange`].
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidTimeRange {
                start: start.format(DATETIME_FORMAT).to_string(),
                end: end.format(DATETIME_FORMAT).to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// When the message should be sent (`time`).
pub enum TimeSpec {
    /// Send at a wall-clock instant: `DDMMYYhhmm`.
    Exact(NaiveDateTime),
    /// Send inside a window: `DDMMYYhhmm-DDMMYYhhmm`.
    Range(TimeRange),
    /// Send at a unix timestamp in seconds: `0<ts>`.
    Timestamp(u64),
    /// Send after a delay in minutes: `+<m>`.
    Delay(u32),
}

impl TimeSpec {
    /// Query parameter name used by SMSC.RU (`time`).
    pub const FIELD: &'static str = "time";

    /// Render the `time` value.
    pub fn encode(&self) -> String {
        match self {
            Self::Exact(at) => at.format(DATETIME_FORMAT).to_string(),
            Self::Range(range) => format!(
                "{}-{}",
                range.start.format(DATETIME_FORMAT),
                range.end.format(DATETIME_FORMAT)
            ),
            Self::Timestamp(seconds) => format!("0{seconds}"),
            Self::Delay(minutes) => format!("+{minutes}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A send-time directive with an optional timezone.
///
/// Without a timezone the service uses the one from the account settings.
pub struct SendTime {
    spec: TimeSpec,
    timezone: Option<TimezoneOffset>,
}

impl SendTime {
    pub fn new(spec: TimeSpec) -> Self {
        Self {
            spec,
            timezone: None,
        }
    }

    pub fn with_timezone(spec: TimeSpec, timezone: TimezoneOffset) -> Self {
        Self {
            spec,
            timezone: Some(timezone),
        }
    }

    pub fn spec(&self) -> &TimeSpec {
        &self.spec
    }

    pub fn timezone(&self) -> Option<TimezoneOffset> {
        self.timezone
    }

    /// Render `time` and, if set, `tz` as query pairs.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![(TimeSpec::FIELD, self.spec.encode())];
        if let Some(tz) = self.timezone {
            params.push((TimezoneOffset::FIELD, tz.hours().to_string()));
        }
        params
    }
}

impl From<TimeSpec> for SendTime {
    fn from(spec: TimeSpec) -> Self {
        Self::new(spec)
    }
}
