//! Command-line front end: CSV schedule in, HTML page out

use std::path::{Path, PathBuf};
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use schedpage::{render_page, RenderOptions, Schedule, Table};

struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
    title: Option<String>,
    merge: bool,
}

const USAGE: &str = "usage: schedpage <schedule.csv> [-o <out.html>] [--merge] [--title <title>]";

fn parse_args() -> Option<Args> {
    let mut input = None;
    let mut output = None;
    let mut title = None;
    let mut merge = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => output = Some(PathBuf::from(args.next()?)),
            "--title" => title = Some(args.next()?),
            "--merge" => merge = true,
            "-h" | "--help" => return None,
            _ if input.is_none() => input = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }

    Some(Args {
        input: input?,
        output,
        title,
        merge,
    })
}

// Default output sits next to the input: schedule.csv -> schedule.html,
// or schedule-merge.html for merged runs.
fn default_output(input: &Path, merge: bool) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let name = if merge {
        format!("{stem}-merge.html")
    } else {
        format!("{stem}.html")
    };
    input.with_file_name(name)
}

fn run(args: &Args) -> schedpage::Result<()> {
    let csv_text = std::fs::read_to_string(&args.input)?;
    let table = Table::from_csv(&csv_text);
    info!(
        input = %args.input.display(),
        rows = table.num_rows(),
        cols = table.width(),
        "decoded schedule CSV"
    );

    let schedule = Schedule::from_table(table, args.merge)?;

    let source_name = args.input.file_name().unwrap_or_default().to_string_lossy();
    let opts = RenderOptions {
        title: args
            .title
            .clone()
            .unwrap_or_else(|| format!("{} Schedule", schedule.name())),
        source_name: source_name.into_owned(),
        ..RenderOptions::default()
    };
    let page = render_page(&schedule, &opts)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input, args.merge));
    std::fs::write(&output, page)?;
    info!(output = %output.display(), "wrote schedule page");
    println!("{}", output.display());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(args) = parse_args() else {
        eprintln!("{USAGE}");
        process::exit(2);
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
