//! Schedule blocks and clock-time handling

use chrono::{NaiveTime, Timelike};
use std::fmt;

use crate::error::{Result, SchedError};

/// Which building a cohort occupies during a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum School {
    /// Main building
    Bhs,
    /// Old Lincoln School annex
    Ols,
    /// Passing from BHS to OLS
    Pb2o,
    /// Passing from OLS to BHS
    Po2b,
}

impl fmt::Display for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            School::Bhs => "BHS",
            School::Ols => "OLS",
            School::Pb2o => "PB2O",
            School::Po2b => "PO2B",
        };
        f.write_str(s)
    }
}

/// Parse a clock time like `"7:30 AM"` into a minute of the day
pub fn minute_of_day(time: &str) -> Result<u16> {
    let t = NaiveTime::parse_from_str(time.trim(), "%I:%M %p")
        .map_err(|_| SchedError::Time(time.to_string()))?;
    Ok((t.hour() * 60 + t.minute()) as u16)
}

/// Format a minute of the day as a zero-padded 12-hour clock time
pub fn fmt_clock(minute: u16) -> String {
    let m = u32::from(minute) % (24 * 60);
    match NaiveTime::from_hms_opt(m / 60, m % 60, 0) {
        Some(t) => t.format("%I:%M").to_string(),
        None => String::new(),
    }
}

/// One block of a cohort's day: a named span of minutes in one column
///
/// `start` and `end` are minutes of the day, both inclusive, so a block
/// covering 7:30-8:45 has `start = 450`, `end = 524`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// Block name as it appears in the grid, e.g. `"A1"`, `"L2"`, `"P"`
    pub name: String,
    /// First minute of the block (inclusive)
    pub start: u16,
    /// Last minute of the block (inclusive)
    pub end: u16,
    /// Building the cohort is at for this block
    pub school: School,
    /// Column of the source table this block came from
    pub column: usize,
    /// Column heading text, e.g. `"Monday A BHS"`
    pub day: String,
    /// Lunch cohort, when the schedule distinguishes one
    pub lunch: Option<String>,
}

impl Block {
    fn name_starts_with(&self, initials: &[char]) -> bool {
        self.name
            .chars()
            .next()
            .map(|c| initials.contains(&c.to_ascii_uppercase()))
            .unwrap_or(false)
    }

    /// Passing time of any kind, including `"?"` placeholders
    pub fn is_passing(&self) -> bool {
        self.name_starts_with(&['P', '?'])
    }

    /// Split-lunch passing time
    pub fn is_passing_split(&self) -> bool {
        self.name.eq_ignore_ascii_case("PS")
    }

    /// Zero-length passing time adjusted by hand in the source grid
    pub fn is_passing_question(&self) -> bool {
        self.name == "?"
    }

    /// Inter-building passing (PB2O / PO2B)
    pub fn is_school_passing(&self) -> bool {
        self.name.eq_ignore_ascii_case("PB2O") || self.name.eq_ignore_ascii_case("PO2B")
    }

    /// Lunch block (`L`, `L1`, ...)
    pub fn is_lunch(&self) -> bool {
        self.name_starts_with(&['L'])
    }

    /// Length in minutes (inclusive span)
    pub fn duration(&self) -> u32 {
        u32::from(self.end) - u32::from(self.start) + 1
    }

    /// `"07:30-08:45"` style range; the end is exclusive for display
    pub fn time_range(&self) -> String {
        format!("{}-{}", fmt_clock(self.start), fmt_clock(self.end + 1))
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {}: {} = {}",
            self.name,
            self.school,
            self.time_range(),
            self.duration()
        )
    }
}
