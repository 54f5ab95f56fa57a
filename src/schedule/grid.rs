//! Schedule grid extraction from a decoded table
//!
//! The source table has a header row (corner cell = schedule name, which
//! doubles as the default lunch; remaining cells = column headings) and one
//! data row per minute of the day: a clock time followed by the block name
//! each cohort is in at that minute. Consecutive equal names down a column
//! collapse into one [`Block`].

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{Result, SchedError};
use crate::schedule::block::{minute_of_day, Block, School};
use crate::schedule::heading::Heading;
use crate::table::Table;

// Block letter(s) followed by number(s), e.g. "A1", "Z2"
static LETTERED_BLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\D+)\d+$").unwrap());

/// Accumulated minutes for one block letter of one cohort
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Total {
    /// Sum of block durations in minutes
    pub minutes: u32,
    /// The additions that produced `minutes`, e.g. `"75+70"`
    pub expression: String,
}

impl Total {
    fn add(&mut self, duration: u32) {
        self.minutes += duration;
        if !self.expression.is_empty() {
            self.expression.push('+');
        }
        self.expression.push_str(itoa::Buffer::new().format(duration));
    }
}

/// Totals per cohort key, per block letter
pub type Totals = IndexMap<String, IndexMap<String, Total>>;

/// A parsed schedule: per-column block lists keyed by heading text
#[derive(Debug, Clone)]
pub struct Schedule {
    name: String,
    columns: IndexMap<String, Vec<Block>>,
    day_start: u16,
    merged: bool,
}

impl Schedule {
    /// Interpret a decoded table as a schedule grid
    ///
    /// Trailing blank rows (the decoder's trailing-newline artifact) are
    /// dropped, then the table must be rectangular with at least a header
    /// row, one time row and one cohort column, and the time column must be
    /// strictly ascending. When `merged` is set, each lunch block absorbs
    /// adjacent plain passing blocks.
    pub fn from_table(mut table: Table, merged: bool) -> Result<Schedule> {
        table.trim_trailing_blank_rows();
        table.validate_rectangular()?;

        let rows = table.rows();
        if rows.len() < 2 || rows[0].len() < 2 {
            return Err(SchedError::Schedule(format!(
                "expected a header row plus time rows with at least one cohort column, got {}x{}",
                rows.len(),
                rows.first().map(|r| r.len()).unwrap_or(0)
            )));
        }

        let name = rows[0][0].clone();
        let day_start = minute_of_day(&rows[1][0])?;

        // One row per minute, in clock order. Block spans are derived from
        // first/last minute of a run, so out-of-order rows cannot be
        // interpreted.
        let mut prev_minute = day_start;
        for (idx, row) in rows.iter().enumerate().skip(2) {
            let minute = minute_of_day(&row[0])?;
            if minute <= prev_minute {
                return Err(SchedError::Schedule(format!(
                    "time rows must be ascending: {:?} at row {idx} does not follow {:?}",
                    row[0],
                    rows[idx - 1][0]
                )));
            }
            prev_minute = minute;
        }

        let mut columns = IndexMap::new();
        for col in 1..rows[0].len() {
            let day = rows[0][col].clone();
            let heading = Heading::parse(&day, Some(&name))?;
            let blocks = extract_column(rows, col, &day, &heading)?;
            columns.insert(day, blocks);
        }

        debug!(
            schedule = %name,
            columns = columns.len(),
            merged,
            "extracted schedule grid"
        );

        let mut schedule = Schedule {
            name,
            columns,
            day_start,
            merged,
        };
        if merged {
            schedule.merge_lunch_passing();
        }
        Ok(schedule)
    }

    /// Schedule name from the header's corner cell (also the default lunch)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-column blocks, keyed by heading text in column order
    pub fn columns(&self) -> &IndexMap<String, Vec<Block>> {
        &self.columns
    }

    /// Blocks for one column heading
    pub fn blocks(&self, day: &str) -> Option<&[Block]> {
        self.columns.get(day).map(|b| b.as_slice())
    }

    /// First minute covered by the grid
    pub fn day_start(&self) -> u16 {
        self.day_start
    }

    /// Whether the lunch/passing merge was applied
    pub fn is_merged(&self) -> bool {
        self.merged
    }

    /// Heading parsed with this schedule's default lunch
    pub fn heading(&self, day: &str) -> Result<Heading> {
        Heading::parse(day, Some(&self.name))
    }

    /// Total minutes per cohort key, per block letter
    ///
    /// Lettered blocks (`A1`, `B2`, ...) accumulate under their letter
    /// prefix; lunch blocks accumulate under `L`. Both the sum and the
    /// `"75+70"`-style expression behind it are kept for the page footer.
    pub fn totals(&self) -> Result<Totals> {
        let mut totals: Totals = IndexMap::new();
        for (day, blocks) in &self.columns {
            let key = self.heading(day)?.key();
            let per_letter = totals.entry(key).or_default();
            for block in blocks {
                if block.is_lunch() {
                    per_letter
                        .entry("L".to_string())
                        .or_default()
                        .add(block.duration());
                } else if let Some(caps) = LETTERED_BLOCK_RE.captures(&block.name) {
                    per_letter
                        .entry(caps[1].to_string())
                        .or_default()
                        .add(block.duration());
                }
            }
        }
        Ok(totals)
    }

    // Lunch absorbs an adjacent plain passing block on either side; the
    // absorbed blocks disappear. Inter-building passing is never absorbed.
    fn merge_lunch_passing(&mut self) {
        for blocks in self.columns.values_mut() {
            let Some(i) = blocks.iter().position(|b| b.is_lunch()) else {
                continue;
            };
            let mut remove = Vec::new();
            if i > 0 && blocks[i - 1].is_passing() && !blocks[i - 1].is_school_passing() {
                blocks[i].start = blocks[i - 1].start;
                remove.push(i - 1);
            }
            if i + 1 < blocks.len()
                && blocks[i + 1].is_passing()
                && !blocks[i + 1].is_school_passing()
            {
                blocks[i].end = blocks[i + 1].end;
                remove.push(i + 1);
            }
            for idx in remove.into_iter().rev() {
                blocks.remove(idx);
            }
        }
    }
}

// Run-length encode one column of per-minute block names into blocks.
fn extract_column(
    rows: &[Vec<String>],
    col: usize,
    day: &str,
    heading: &Heading,
) -> Result<Vec<Block>> {
    // Inter-building passing windows first; school assignment needs them.
    // Last minute of the BHS-to-OLS window, first minute of the reverse.
    let mut last_b2o: Option<u16> = None;
    let mut first_o2b: Option<u16> = None;
    for row in &rows[1..] {
        let cell = row[col].to_uppercase();
        if cell.contains("PB2O") {
            last_b2o = Some(minute_of_day(&row[0])?);
        }
        if cell.contains("PO2B") {
            let minute = minute_of_day(&row[0])?;
            first_o2b.get_or_insert(minute);
        }
    }

    let school_of = |name: &str, start: u16, end: u16| -> School {
        let upper = name.to_uppercase();
        if upper.contains("PB2O") {
            School::Pb2o
        } else if upper.contains("PO2B") {
            School::Po2b
        } else if (heading.is_red() && last_b2o.map_or(true, |m| start > m))
            || (heading.is_blue() && first_o2b.map_or(true, |m| end < m))
        {
            // RED cohorts are at OLS until they pass back, BLUE cohorts
            // until they pass over.
            School::Ols
        } else {
            School::Bhs
        }
    };

    let mut blocks = Vec::new();
    let mut run = rows[1][col].clone();
    let mut start = minute_of_day(&rows[1][0])?;
    let mut end = start;

    let emit = |name: &str, start: u16, end: u16, blocks: &mut Vec<Block>| {
        if name.is_empty() {
            return;
        }
        blocks.push(Block {
            name: name.to_string(),
            start,
            end,
            school: school_of(name, start, end),
            column: col,
            day: day.to_string(),
            lunch: heading.lunch().map(str::to_string),
        });
    };

    for row in &rows[1..] {
        let minute = minute_of_day(&row[0])?;
        if row[col] == run {
            end = minute;
        } else {
            emit(&run, start, end, &mut blocks);
            run = row[col].clone();
            start = minute;
            end = minute;
        }
    }
    emit(&run, start, end, &mut blocks);

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Five-minute grid with one interesting column per cohort.
    fn fixture() -> Table {
        Table::from_csv(
            "STEAM,Monday A BHS,Monday A Red,Monday A Blue\n\
             7:30 AM,A1,A1,C1\n\
             7:31 AM,A1,A1,C1\n\
             7:32 AM,P,PB2O,PO2B\n\
             7:33 AM,L1,B1,D1\n\
             7:34 AM,L1,B1,D1\n",
        )
    }

    #[test]
    fn test_columns_in_order() {
        let schedule = Schedule::from_table(fixture(), false).unwrap();
        let days: Vec<_> = schedule.columns().keys().cloned().collect();
        assert_eq!(days, ["Monday A BHS", "Monday A Red", "Monday A Blue"]);
        assert_eq!(schedule.name(), "STEAM");
        assert_eq!(schedule.day_start(), 450);
    }

    #[test]
    fn test_run_length_blocks() {
        let schedule = Schedule::from_table(fixture(), false).unwrap();
        let blocks = schedule.blocks("Monday A BHS").unwrap();
        let names: Vec<_> = blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["A1", "P", "L1"]);
        assert_eq!((blocks[0].start, blocks[0].end), (450, 451));
        assert_eq!((blocks[1].start, blocks[1].end), (452, 452));
        assert_eq!((blocks[2].start, blocks[2].end), (453, 454));
        assert_eq!(blocks[2].lunch.as_deref(), Some("STEAM"));
    }

    #[test]
    fn test_school_assignment() {
        let schedule = Schedule::from_table(fixture(), false).unwrap();

        // BHS column never leaves the main building
        for b in schedule.blocks("Monday A BHS").unwrap() {
            assert_eq!(b.school, School::Bhs);
        }

        // Red cohort: at BHS until PB2O, at OLS after
        let red = schedule.blocks("Monday A Red").unwrap();
        assert_eq!(red[0].school, School::Bhs);
        assert_eq!(red[1].school, School::Pb2o);
        assert_eq!(red[2].school, School::Ols);

        // Blue cohort: at OLS until PO2B, at BHS after
        let blue = schedule.blocks("Monday A Blue").unwrap();
        assert_eq!(blue[0].school, School::Ols);
        assert_eq!(blue[1].school, School::Po2b);
        assert_eq!(blue[2].school, School::Bhs);
    }

    #[test]
    fn test_red_without_passing_is_ols() {
        let table = Table::from_csv(
            "STEAM,Monday A Red\n\
             7:30 AM,A1\n\
             7:31 AM,A1\n",
        );
        let schedule = Schedule::from_table(table, false).unwrap();
        // No PB2O window at all: the whole column counts as OLS
        assert_eq!(
            schedule.blocks("Monday A Red").unwrap()[0].school,
            School::Ols
        );
    }

    #[test]
    fn test_blank_cells_emit_nothing() {
        let table = Table::from_csv(
            "STEAM,Monday A BHS\n\
             7:30 AM,A1\n\
             7:31 AM,\n\
             7:32 AM,B1\n",
        );
        let schedule = Schedule::from_table(table, false).unwrap();
        let names: Vec<_> = schedule
            .blocks("Monday A BHS")
            .unwrap()
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names, ["A1", "B1"]);
    }

    #[test]
    fn test_merge_absorbs_plain_passing() {
        let schedule = Schedule::from_table(fixture(), true).unwrap();
        let blocks = schedule.blocks("Monday A BHS").unwrap();
        let names: Vec<_> = blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["A1", "L1"]);
        // Lunch start extended over the absorbed passing block
        assert_eq!((blocks[1].start, blocks[1].end), (452, 454));

        // Inter-building passing is never absorbed
        let red = schedule.blocks("Monday A Red").unwrap();
        assert_eq!(red.len(), 3);
    }

    #[test]
    fn test_totals() {
        let schedule = Schedule::from_table(fixture(), false).unwrap();
        let totals = schedule.totals().unwrap();

        let bhs = &totals["BHS-S"];
        assert_eq!(bhs["A"].minutes, 2);
        assert_eq!(bhs["A"].expression, "2");
        assert_eq!(bhs["L"].minutes, 2);
        // Plain passing carries no letter total
        assert!(!bhs.contains_key("P"));

        let red = &totals["Red-S"];
        assert_eq!(red["A"].minutes, 2);
        assert_eq!(red["B"].minutes, 2);
    }

    #[test]
    fn test_ragged_grid_is_rejected() {
        let table = Table::from_csv("STEAM,Monday A BHS\n7:30 AM\n");
        assert!(matches!(
            Schedule::from_table(table, false),
            Err(SchedError::MalformedTable { row: 1, .. })
        ));
    }

    #[test]
    fn test_non_ascending_times_rejected() {
        let table = Table::from_csv(
            "STEAM,Monday A BHS\n\
             7:30 AM,A1\n\
             6:00 AM,A1\n",
        );
        assert!(matches!(
            Schedule::from_table(table, false),
            Err(SchedError::Schedule(_))
        ));

        // A repeated minute is just as uninterpretable
        let table = Table::from_csv(
            "STEAM,Monday A BHS\n\
             7:30 AM,A1\n\
             7:30 AM,A1\n",
        );
        assert!(matches!(
            Schedule::from_table(table, false),
            Err(SchedError::Schedule(_))
        ));
    }

    #[test]
    fn test_bad_time_cell_is_rejected() {
        let table = Table::from_csv("STEAM,Monday A BHS\nnot a time,A1\n");
        assert!(matches!(
            Schedule::from_table(table, false),
            Err(SchedError::Time(_))
        ));
    }
}
