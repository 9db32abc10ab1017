//! Gapchart - Gapminder-style dataset preparation & chart snapshots
//!
//! Merges per-country income, life-expectancy, and population CSV tables
//! into gap-filled year series, exports them as JSON, and can render a
//! static bubble chart for any year in the range.

mod charts;
mod config;
mod data;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use charts::ChartScales;
use config::ChartConfig;
use data::{DatasetMerger, EntityRecord, IndicatorTable, RegionTable, TableLoader};

#[derive(Parser, Debug)]
#[command(name = "gapchart", version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge the four CSV tables and write the prepared dataset as JSON.
    Prepare(PrepareArgs),
    /// Merge the tables and render a bubble-chart PNG for one year.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Income-per-capita CSV (one row per entity, one column per year).
    #[arg(long)]
    income: PathBuf,

    /// Population CSV.
    #[arg(long)]
    population: PathBuf,

    /// Life-expectancy CSV.
    #[arg(long)]
    life: PathBuf,

    /// Region-group CSV (entity -> group).
    #[arg(long)]
    regions: PathBuf,

    /// Entity-name column of the income table.
    #[arg(long, default_value = "country")]
    income_name_col: String,

    /// Entity-name column of the population table.
    #[arg(long, default_value = "country")]
    population_name_col: String,

    /// Entity-name column of the life-expectancy table.
    #[arg(long, default_value = "country")]
    life_name_col: String,

    /// Entity-name column of the region table.
    #[arg(long, default_value = "Entity")]
    entity_col: String,

    /// Group column of the region table.
    #[arg(long, default_value = "Group")]
    group_col: String,

    /// Optional JSON config file (year range, valid limit, palette).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the first analyzed year.
    #[arg(long)]
    start_year: Option<i32>,

    /// Override the last analyzed year.
    #[arg(long)]
    end_year: Option<i32>,

    /// Override the minimum known-value count per indicator series.
    #[arg(long)]
    valid_limit: Option<usize>,
}

#[derive(Args, Debug)]
struct PrepareArgs {
    #[command(flatten)]
    tables: TableArgs,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also export per-year pixel positions for each entity.
    #[arg(long)]
    points: bool,

    /// Plot width used to scale exported positions.
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Plot height used to scale exported positions.
    #[arg(long, default_value_t = 700)]
    height: u32,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    tables: TableArgs,

    /// Calendar year to render.
    #[arg(long)]
    year: i32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 1200)]
    width: u32,

    #[arg(long, default_value_t = 700)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Prepare(args) => cmd_prepare(args),
        Command::Render(args) => cmd_render(args),
    }
}

/// Resolve the effective config: file (if any), then flag overrides.
fn resolve_config(args: &TableArgs) -> anyhow::Result<ChartConfig> {
    let mut config = match &args.config {
        Some(path) => ChartConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ChartConfig::default(),
    };
    if let Some(year) = args.start_year {
        config.start_year = year;
    }
    if let Some(year) = args.end_year {
        config.end_year = year;
    }
    if let Some(limit) = args.valid_limit {
        config.valid_limit = limit;
    }
    anyhow::ensure!(
        config.start_year <= config.end_year,
        "start year {} is after end year {}",
        config.start_year,
        config.end_year
    );
    Ok(config)
}

/// Load all four tables and run the merge.
fn prepare_dataset(
    args: &TableArgs,
    config: &ChartConfig,
) -> anyhow::Result<HashMap<String, EntityRecord>> {
    let load = |path: &PathBuf| {
        TableLoader::load_table(path).with_context(|| format!("loading {}", path.display()))
    };
    let income = IndicatorTable {
        rows: load(&args.income)?,
        name_column: args.income_name_col.clone(),
    };
    let population = IndicatorTable {
        rows: load(&args.population)?,
        name_column: args.population_name_col.clone(),
    };
    let life = IndicatorTable {
        rows: load(&args.life)?,
        name_column: args.life_name_col.clone(),
    };
    let regions = RegionTable {
        rows: load(&args.regions)?,
        name_column: args.entity_col.clone(),
        group_column: args.group_col.clone(),
    };

    Ok(DatasetMerger::merge(
        &income,
        &population,
        &life,
        &regions,
        config,
    ))
}

/// One exported entity: the record plus optional pixel positions.
#[derive(Serialize)]
struct ExportRecord<'a> {
    #[serde(flatten)]
    record: &'a EntityRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    points: Option<Vec<(f64, f64)>>,
}

fn cmd_prepare(args: PrepareArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.tables)?;
    let nations = prepare_dataset(&args.tables, &config)?;

    let scales = args.points.then(|| {
        ChartScales::from_nations(
            &nations,
            args.width as f64,
            args.height as f64,
            charts::LARGEST_RADIUS,
        )
    });

    // Stable output order for diffable files.
    let sorted: BTreeMap<&String, ExportRecord> = nations
        .iter()
        .map(|(name, record)| {
            let points = scales
                .as_ref()
                .map(|scales| charts::derive_points(record, scales));
            (name, ExportRecord { record, points })
        })
        .collect();
    let json = serde_json::to_string_pretty(&sorted)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(entities = nations.len(), path = %path.display(), "wrote dataset");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.tables)?;
    let nations = prepare_dataset(&args.tables, &config)?;
    let year_index = config
        .slot(args.year)
        .with_context(|| {
            format!(
                "year {} outside range {}..={}",
                args.year, config.start_year, config.end_year
            )
        })?;
    charts::render_snapshot(
        &nations,
        &config,
        year_index,
        &args.out,
        args.width,
        args.height,
    )?;
    Ok(())
}
