//! Schedule column headings

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::{Result, SchedError};

// 3 mandatory space-separated tokens, optional 4th for the lunch
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\S+)\s+(\S+)\s+(\S+)(?:\s+(\S+))?").unwrap());

/// Parsed schedule column heading: weekday, week, cohort and lunch
///
/// Headings come in two formats: `"Monday A BHS"` (3 tokens, lunch taken
/// from the supplied default, usually the header's corner cell) and
/// `"Monday A BHS STEAM"` (4 tokens, lunch included).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading {
    weekday: String,
    week: String,
    cohort: String,
    lunch: Option<String>,
}

impl Heading {
    /// Parse a column heading, falling back to `default_lunch` when the
    /// heading carries only 3 tokens
    pub fn parse(heading: &str, default_lunch: Option<&str>) -> Result<Heading> {
        let caps = HEADING_RE
            .captures(heading)
            .ok_or_else(|| SchedError::Heading(heading.to_string()))?;
        let lunch = caps
            .get(4)
            .map(|m| m.as_str().to_string())
            .or_else(|| default_lunch.filter(|s| !s.is_empty()).map(str::to_string));
        Ok(Heading {
            weekday: caps[1].to_string(),
            week: caps[2].to_string(),
            cohort: caps[3].to_string(),
            lunch,
        })
    }

    pub fn weekday(&self) -> &str {
        &self.weekday
    }

    pub fn week(&self) -> &str {
        &self.week
    }

    pub fn cohort(&self) -> &str {
        &self.cohort
    }

    pub fn lunch(&self) -> Option<&str> {
        self.lunch.as_deref()
    }

    fn is_cohort(&self, cohort: &str) -> bool {
        self.cohort.to_uppercase().contains(&cohort.to_uppercase())
    }

    pub fn is_bhs(&self) -> bool {
        self.is_cohort("BHS")
    }

    pub fn is_red(&self) -> bool {
        self.is_cohort("RED")
    }

    pub fn is_blue(&self) -> bool {
        self.is_cohort("BLU")
    }

    /// Grouping key: `"<cohort>-<first lunch letter>"`, or the bare cohort
    /// when no lunch applies
    pub fn key(&self) -> String {
        match self.lunch.as_deref().and_then(|l| l.chars().next()) {
            Some(initial) => format!("{}-{}", self.cohort, initial),
            None => self.cohort.clone(),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.weekday,
            self.week,
            self.cohort,
            self.lunch.as_deref().unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_token_heading_uses_default_lunch() {
        let h = Heading::parse("Monday A BHS", Some("STEAM")).unwrap();
        assert_eq!(h.weekday(), "Monday");
        assert_eq!(h.week(), "A");
        assert_eq!(h.cohort(), "BHS");
        assert_eq!(h.lunch(), Some("STEAM"));
        assert_eq!(h.key(), "BHS-S");
    }

    #[test]
    fn test_four_token_heading_carries_own_lunch() {
        let h = Heading::parse("Tuesday B Red HUMAN", Some("STEAM")).unwrap();
        assert_eq!(h.cohort(), "Red");
        assert_eq!(h.lunch(), Some("HUMAN"));
        assert_eq!(h.key(), "Red-H");
        assert!(h.is_red());
        assert!(!h.is_bhs());
    }

    #[test]
    fn test_no_lunch_key_is_bare_cohort() {
        let h = Heading::parse("Monday A Blue", None).unwrap();
        assert_eq!(h.lunch(), None);
        assert_eq!(h.key(), "Blue");
        assert!(h.is_blue());
    }

    #[test]
    fn test_short_heading_is_an_error() {
        assert!(matches!(
            Heading::parse("Monday A", None),
            Err(SchedError::Heading(_))
        ));
    }
}
