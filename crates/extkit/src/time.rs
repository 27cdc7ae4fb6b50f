//! Date flooring
//!
//! [`floor`] rounds a time down to a [`DatePart`] by zeroing every
//! component below it. It works on the wall-clock form of the time in its
//! own zone, not on the time as a duration since an epoch, so flooring to
//! an hour never leaves a non-zero minute behind.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use extkit::time::{floor, DatePart};
//!
//! let t = Utc.with_ymd_and_hms(2012, 12, 7, 12, 15, 30).unwrap();
//! let day = floor(&t, DatePart::Day);
//! assert_eq!(day.to_string(), "2012-12-07 00:00:00 UTC");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Days, LocalResult, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike,
};

use log::trace;

use crate::error::ExtError;

/// A part of a date, from coarsest to finest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatePart {
    /// Calendar year
    Year,
    /// Month of the year
    Month,
    /// Day of the month
    Day,
    /// Hour of the day
    Hour,
    /// Minute of the hour
    Minute,
    /// Second of the minute
    Second,
}

impl DatePart {
    /// All parts, coarsest first
    pub const ALL: [DatePart; 6] = [
        DatePart::Year,
        DatePart::Month,
        DatePart::Day,
        DatePart::Hour,
        DatePart::Minute,
        DatePart::Second,
    ];

    /// English name of the part
    pub fn name(self) -> &'static str {
        match self {
            DatePart::Year => "year",
            DatePart::Month => "month",
            DatePart::Day => "day",
            DatePart::Hour => "hour",
            DatePart::Minute => "minute",
            DatePart::Second => "second",
        }
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl TryFrom<i32> for DatePart {
    type Error = ExtError;

    fn try_from(n: i32) -> Result<Self, ExtError> {
        usize::try_from(n)
            .ok()
            .and_then(|i| DatePart::ALL.get(i).copied())
            .ok_or_else(|| ExtError::InvalidDatePart(n.to_string()))
    }
}

impl FromStr for DatePart {
    type Err = ExtError;

    fn from_str(s: &str) -> Result<Self, ExtError> {
        DatePart::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ExtError::InvalidDatePart(s.to_string()))
    }
}

/// Round a naive date and time down to `part`.
///
/// Sub-second precision is always dropped.
pub fn floor_naive(t: NaiveDateTime, part: DatePart) -> NaiveDateTime {
    let date = match part {
        DatePart::Year => t.date() - Days::new(u64::from(t.ordinal0())),
        DatePart::Month => t.date() - Days::new(u64::from(t.day0())),
        _ => t.date(),
    };
    let seconds = match part {
        DatePart::Year | DatePart::Month | DatePart::Day => 0,
        DatePart::Hour => t.hour() * 3600,
        DatePart::Minute => t.hour() * 3600 + t.minute() * 60,
        DatePart::Second => t.num_seconds_from_midnight(),
    };
    date.and_time(NaiveTime::MIN) + TimeDelta::seconds(i64::from(seconds))
}

/// Round `t` down to `part` in its own time zone.
///
/// If the floored wall-clock time occurs twice (a DST fold) the earlier
/// instant is returned. If it does not occur at all (a DST gap) the first
/// instant after the gap is returned.
pub fn floor<Tz: TimeZone>(t: &DateTime<Tz>, part: DatePart) -> DateTime<Tz> {
    let local = t.naive_local();
    let floored = floor_naive(local, part);
    match t.timezone().from_local_datetime(&floored) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => after_gap(t, floored, local),
    }
}

/// Earliest existing wall-clock minute after `floored`, never later than `t`.
fn after_gap<Tz: TimeZone>(
    t: &DateTime<Tz>,
    floored: NaiveDateTime,
    local: NaiveDateTime,
) -> DateTime<Tz> {
    let tz = t.timezone();
    let mut candidate = floored;
    loop {
        candidate += TimeDelta::minutes(1);
        if candidate >= local {
            return t.clone();
        }
        if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
            trace!("floor: {floored} skipped, using {candidate}");
            return dt;
        }
    }
}
