//! Build a tiny schedule and write the comparison page to disk
//!
//! Run with: cargo run --example render_schedule

use schedpage::{render_page, RenderOptions, Schedule, Table};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let csv = "STEAM,Monday A BHS,Monday A Red,Monday A Blue\n\
               7:30 AM,A1,A1,C1\n\
               7:31 AM,A1,A1,C1\n\
               7:32 AM,P,PB2O,PO2B\n\
               7:33 AM,L1,B1,D1\n\
               7:34 AM,L1,B1,D1\n";

    let table = Table::from_csv(csv);
    let schedule = Schedule::from_table(table, false)?;

    for (day, blocks) in schedule.columns() {
        println!("{day}:");
        for block in blocks {
            println!("  {block}");
        }
    }

    let opts = RenderOptions {
        title: "Demo Schedule".to_string(),
        source_name: "demo.csv".to_string(),
        ..RenderOptions::default()
    };
    let page = render_page(&schedule, &opts)?;
    std::fs::write("demo-schedule.html", &page)?;
    println!("wrote demo-schedule.html ({} bytes)", page.len());
    Ok(())
}
