//! Static schedule comparison page rendering
//!
//! Produces a self-contained HTML document from a [`Schedule`]: one column
//! of blocks per cohort, three cohorts to a day, block heights proportional
//! to duration, plus a totals column and a footer with the calculations and
//! a table of non-passing blocks.

use chrono::Local;
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::Result;
use crate::schedule::{Block, Schedule};

/// Knobs for [`render_page`]
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page heading and `<title>`
    pub title: String,
    /// Source file name shown (and linked) in the footer
    pub source_name: String,
    /// Pixels per minute of block duration
    pub scale: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            title: "Schedule Comparison".to_string(),
            source_name: "schedule.csv".to_string(),
            scale: 3,
        }
    }
}

/// Render the comparison page for a schedule
pub fn render_page(schedule: &Schedule, opts: &RenderOptions) -> Result<String> {
    let mut out = String::with_capacity(16 * 1024);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n    <meta charset=\"utf-8\">\n");
    out.push_str("    <meta name=\"description\" content=\"");
    push_escaped(&mut out, &opts.title);
    out.push_str("\">\n    <title>");
    push_escaped(&mut out, &opts.title);
    out.push_str("</title>\n");
    out.push_str("    <link href=\"./styles/schedule.css\" rel=\"stylesheet\">\n");
    out.push_str("    <script src=\"./scripts/schedule.js\"></script>\n  </head>\n  <body>\n");

    out.push_str("    <header>\n      <section>\n        <h1>");
    push_escaped(&mut out, &opts.title);
    out.push_str("</h1>\n      </section>\n    </header>\n");

    out.push_str("    <main>\n      <h2>");
    push_escaped(&mut out, schedule.name());
    out.push_str(" Lunch</h2>\n      <section class=\"days\">\n");

    push_days(&mut out, schedule, opts.scale)?;
    push_totals_column(&mut out, schedule)?;

    out.push_str("      </section>\n    </main>\n");

    push_footer(&mut out, schedule, opts)?;

    out.push_str("  </body>\n</html>\n");

    debug!(bytes = out.len(), "rendered schedule page");
    Ok(out)
}

// Day sections: three cohort columns per day article.
fn push_days(out: &mut String, schedule: &Schedule, scale: u32) -> Result<()> {
    let count = schedule.columns().len();
    for (i, (day, blocks)) in schedule.columns().iter().enumerate() {
        let heading = schedule.heading(day)?;

        if i % 3 == 0 {
            out.push_str("        <article class=\"day\">\n          <h3>");
            push_escaped(out, heading.weekday());
            out.push_str(" - ");
            push_escaped(out, heading.week());
            if let Some(initial) = heading.lunch().and_then(|l| l.chars().next()) {
                out.push_str(" - ");
                push_escaped(out, initial.encode_utf8(&mut [0u8; 4]));
            }
            out.push_str("</h3>\n          <div class=\"cohorts\">\n");
        }

        out.push_str("            <div class=\"cohort\">\n              <div class=\"blocks\">\n");
        out.push_str("                <h4>");
        push_escaped(out, heading.cohort());
        out.push_str("</h4>\n");

        // Empty lead-in before the column's first block
        let lead = blocks
            .first()
            .map(|b| u32::from(b.start.saturating_sub(schedule.day_start())) * scale)
            .unwrap_or(0);
        let lead = if lead > 0 { lead + 2 } else { 0 }; // border adjustment
        out.push_str("                <p class=\"start\" style=\"height: ");
        push_num(out, lead);
        out.push_str("px;\"></p>\n");

        for block in blocks {
            push_block(out, block, heading.cohort(), scale);
        }

        out.push_str("              </div>\n            </div>\n");

        if i % 3 == 2 || i + 1 == count {
            out.push_str("          </div>\n        </article>\n");
        }
    }
    Ok(())
}

// One <p> per block; passing blocks render empty with a mouse-over title.
fn push_block(out: &mut String, block: &Block, cohort: &str, scale: u32) {
    out.push_str("                <p class=\"");
    if block.is_passing() && !block.is_school_passing() {
        out.push_str("passing");
        if block.is_passing_split() {
            out.push_str(" split");
        }
        if block.is_passing_question() {
            out.push_str(" question");
        }
        if block.duration() < 5 {
            out.push_str(" short");
        }
    } else if block.is_school_passing() {
        out.push_str("school-");
        push_escaped(out, &block.name.to_lowercase());
    } else {
        out.push_str("block cohort-");
        push_escaped(out, &cohort.to_lowercase());
        out.push_str(" school-");
        push_escaped(out, &block.school.to_string().to_lowercase());
        if block.is_lunch() {
            out.push_str(" lunch");
        }
    }
    out.push_str("\" style=\"height: ");
    push_num(out, block.duration() * scale);
    out.push_str("px;\" title=\"");
    push_escaped(out, &block.to_string());
    out.push_str("\">");
    if !block.is_passing() || block.is_school_passing() {
        push_block_label(out, block);
    }
    out.push_str("</p>\n");
}

// "A1<br />07:30-08:45<br />76"
fn push_block_label(out: &mut String, block: &Block) {
    push_escaped(out, &block.name);
    out.push_str("<br />");
    out.push_str(&block.time_range());
    out.push_str("<br />");
    push_num(out, block.duration());
}

// Trailing Totals column: one cohort div per cohort key, one line per
// block letter (union across cohorts, sorted).
fn push_totals_column(out: &mut String, schedule: &Schedule) -> Result<()> {
    let totals = schedule.totals()?;
    let letters: BTreeSet<&str> = totals
        .values()
        .flat_map(|per_letter| per_letter.keys().map(|k| k.as_str()))
        .collect();

    out.push_str("        <article class=\"day\">\n          <h3>Totals</h3>\n");
    out.push_str("          <div class=\"cohorts\">\n");
    for (key, per_letter) in &totals {
        out.push_str("            <div class=\"cohort\">\n              <div class=\"totals\">\n");
        out.push_str("                <h4>");
        push_escaped(out, key);
        out.push_str("</h4>\n");
        for letter in &letters {
            let minutes = per_letter.get(*letter).map(|t| t.minutes).unwrap_or(0);
            out.push_str("                <p class=\"total\" title=\"");
            push_total_line(out, letter, minutes);
            out.push_str("\">");
            push_total_line(out, letter, minutes);
            out.push_str("</p>\n");
        }
        out.push_str("              </div>\n            </div>\n");
    }
    out.push_str("          </div>\n        </article>\n");
    Ok(())
}

fn push_total_line(out: &mut String, letter: &str, minutes: u32) {
    push_escaped(out, letter);
    out.push_str(" = ");
    push_padded(out, minutes, 3);
}

fn push_footer(out: &mut String, schedule: &Schedule, opts: &RenderOptions) -> Result<()> {
    out.push_str("    <footer>\n      <section>\n        <h2>");
    push_escaped(out, &opts.source_name);
    out.push_str(" &mdash; ");
    out.push_str(&Local::now().format("%c").to_string());
    out.push_str("</h2>\n        <article>\n          <p>Generated from <a href=\"");
    push_escaped(out, &opts.source_name);
    out.push_str("\">");
    push_escaped(out, &opts.source_name);
    out.push_str("</a>&hellip;</p>\n");

    push_calculations(out, schedule)?;
    push_no_pass_table(out, schedule);

    out.push_str("          <ul>\n");
    out.push_str("            <li><span class=\"swatch short\">&nbsp;</span> &mdash; passing time &lt; 5 minutes</li>\n");
    out.push_str("            <li><span class=\"swatch split\">&nbsp;</span> &mdash; split lunch passing time</li>\n");
    out.push_str("            <li><span class=\"swatch question\">&nbsp;</span> &mdash; zero-length passing time adjusted by hand</li>\n");
    out.push_str("          </ul>\n        </article>\n      </section>\n    </footer>\n");
    Ok(())
}

// Plain-text breakdown of the totals, one cohort per stanza.
fn push_calculations(out: &mut String, schedule: &Schedule) -> Result<()> {
    let totals = schedule.totals()?;
    out.push_str("          <pre class=\"calculations\">");
    for (key, per_letter) in &totals {
        push_escaped(out, key);
        out.push_str(":\n");
        let mut letters: Vec<&String> = per_letter.keys().collect();
        letters.sort();
        for letter in letters {
            let total = &per_letter[letter];
            out.push_str("  ");
            push_escaped(out, letter);
            out.push_str(" = ");
            push_padded(out, total.minutes, 3);
            out.push_str(" = ");
            push_escaped(out, &total.expression);
            out.push('\n');
        }
    }
    out.push_str("</pre>\n");
    Ok(())
}

// Table of non-passing blocks, one column per heading.
fn push_no_pass_table(out: &mut String, schedule: &Schedule) {
    let columns: Vec<(&String, Vec<&Block>)> = schedule
        .columns()
        .iter()
        .map(|(day, blocks)| (day, blocks.iter().filter(|b| !b.is_passing()).collect()))
        .collect();
    let depth = columns.iter().map(|(_, b)| b.len()).max().unwrap_or(0);

    out.push_str("          <hr class=\"no-pass\" />\n          <table class=\"no-pass\">\n");
    out.push_str("            <tr>\n");
    for (day, _) in &columns {
        out.push_str("              <th title=\"");
        push_escaped(out, day);
        out.push_str("\">");
        push_escaped(out, day);
        out.push_str("</th>\n");
    }
    out.push_str("            </tr>\n");

    for i in 0..depth {
        out.push_str("            <tr>\n");
        for (_, blocks) in &columns {
            out.push_str("              <td");
            if let Some(block) = blocks.get(i) {
                out.push_str(" title=\"");
                push_escaped(out, &block.to_string());
                out.push_str("\">");
                push_block_label(out, block);
            } else {
                out.push('>');
            }
            out.push_str("</td>\n");
        }
        out.push_str("            </tr>\n");
    }
    out.push_str("          </table>\n");
}

// HTML-escape cell-derived text; everything user-visible comes from the
// CSV, so titles, labels and class fragments all pass through here.
fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

fn push_num(out: &mut String, value: u32) {
    let mut buf = itoa::Buffer::new();
    out.push_str(buf.format(value));
}

fn push_padded(out: &mut String, value: u32, width: usize) {
    let mut buf = itoa::Buffer::new();
    let digits = buf.format(value);
    for _ in digits.len()..width {
        out.push('0');
    }
    out.push_str(digits);
}
