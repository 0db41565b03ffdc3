use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fuelviz::resolve::{Resolver, UnknownMetricPolicy};
use fuelviz::{Client, registry, storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fuelviz",
    version,
    about = "Fetch, resolve & render vehicle fuel consumption charts"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the selectable metrics and display modes.
    Metrics,
    /// Fetch a metric and render its chart.
    Chart(ChartArgs),
    /// Fetch the raw fuel-consumption listing (tabular display mode).
    Raw(RawArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Metric identifier (see `fuelviz metrics`).
    #[arg(short, long)]
    metric: String,
    /// Chart output path (.svg or .png).
    #[arg(short, long)]
    out: PathBuf,
    /// Width of the chart canvas; height is derived from the data.
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Base URL of the aggregates service.
    #[arg(long, default_value = "http://localhost:5000/api")]
    base_url: String,
    /// Save the resolved chart specification as JSON.
    #[arg(long)]
    spec_out: Option<PathBuf>,
    /// Render ids outside the registry as a generic line chart instead of failing.
    #[arg(long, default_value_t = false)]
    fallback_line: bool,
}

#[derive(Args, Debug)]
struct RawArgs {
    /// Save the listing to a file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Base URL of the aggregates service.
    #[arg(long, default_value = "http://localhost:5000/api")]
    base_url: String,
    /// Print at most this many rows to stdout when not saving.
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Metrics => cmd_metrics(),
        Command::Chart(args) => cmd_chart(args),
        Command::Raw(args) => cmd_raw(args),
    }
}

fn cmd_metrics() -> Result<()> {
    for d in &registry::METRICS {
        println!(
            "{:<14} {:<20} {} / {}",
            d.id,
            format!("{:?}", d.archetype),
            d.category_field,
            d.value_field
        );
    }
    println!("{:<14} tabular listing of the source rows", "raw");
    Ok(())
}

fn cmd_chart(args: ChartArgs) -> Result<()> {
    let client = Client::with_base_url(&args.base_url);
    let records = client.fetch_metric(&args.metric)?;

    let policy = if args.fallback_line {
        UnknownMetricPolicy::FallbackLine
    } else {
        UnknownMetricPolicy::Fail
    };
    let spec = Resolver::new().with_policy(policy).resolve(&args.metric, &records)?;

    if let Some(path) = args.spec_out.as_ref() {
        std::fs::write(path, serde_json::to_string_pretty(&spec)?)?;
        eprintln!("Saved chart spec to {}", path.display());
    }

    viz::render_chart(&spec, &args.out, args.width)?;
    eprintln!("Wrote chart to {}", args.out.display());
    Ok(())
}

fn cmd_raw(args: RawArgs) -> Result<()> {
    let client = Client::with_base_url(&args.base_url);
    let records = client.fetch_raw()?;

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&records, &storage::RAW_COLUMNS, path)?,
            "json" => storage::save_json(&records, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", records.len(), path.display());
        return Ok(());
    }

    print_table(&records, args.limit);
    Ok(())
}

/// Aligned stdout rendering of the 15-column listing.
fn print_table(records: &[fuelviz::Record], limit: usize) {
    let rows: Vec<Vec<String>> = records
        .iter()
        .take(limit)
        .map(|r| {
            storage::RAW_COLUMNS
                .iter()
                .map(|c| r.display(c))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = storage::RAW_COLUMNS
        .iter()
        .map(|c| c.chars().count())
        .collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let header: Vec<String> = storage::RAW_COLUMNS.iter().map(|c| c.to_string()).collect();
    println!("{}", line(&header));
    for row in &rows {
        println!("{}", line(row));
    }
    if records.len() > rows.len() {
        eprintln!("({} more rows)", records.len() - rows.len());
    }
}
