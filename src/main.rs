use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use configuration::{init_logging, CliOverrides, Settings};
use core_types::EnrichedSummaryRow;
use database::DbRepository;
use ingest::IngestReport;
use pipeline::{ensure_complete, Pipeline};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;

/// The main entry point for the inventory pipeline.
#[tokio::main]
async fn main() -> ExitCode {
    // Load INVENTORY__* variables from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // The guard flushes the log file when it goes out of scope at the end of main.
    let _log_guard = match init_logging(&settings.logging, cli.command.log_name()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error initializing logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match execute(cli.command, settings).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Loads inventory CSVs into SQLite and builds the vendor sales summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(flatten)]
    overrides: CliOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every CSV in the data directory, one table per file.
    Ingest,
    /// Build, enrich and store the vendor sales summary from loaded tables.
    Summarize,
    /// Ingest, then summarize.
    Run,
    /// Print the first rows of the stored vendor sales summary.
    Preview(PreviewArgs),
}

#[derive(Parser)]
struct PreviewArgs {
    /// Number of rows to show.
    #[arg(long, default_value_t = 5)]
    limit: u32,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

impl Commands {
    /// The log file each command appends to.
    fn log_name(&self) -> &'static str {
        match self {
            Commands::Ingest => "ingestion",
            Commands::Summarize | Commands::Run => "vendor_summary",
            Commands::Preview(_) => "preview",
        }
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = configuration::load_config(&cli.config)
        .with_context(|| format!("reading {}", cli.config.display()))?;
    settings.apply_overrides(&cli.overrides);
    settings.validate()?;
    Ok(settings)
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Opens the store, runs the command, and closes the store again.
async fn execute(command: Commands, settings: Settings) -> anyhow::Result<ExitCode> {
    let db_pool = database::connect(&settings.database)
        .await
        .context("Failed to connect to the database")?;
    let db_repo = DbRepository::new(db_pool);

    let result = run_command(command, &db_repo, settings).await;

    db_repo.close().await;
    result
}

async fn run_command(
    command: Commands,
    db_repo: &DbRepository,
    settings: Settings,
) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Ingest => {
            let report = Pipeline::new(settings, db_repo.clone()).ingest().await?;
            Ok(check_report(&report))
        }
        Commands::Summarize => {
            Pipeline::new(settings, db_repo.clone()).summarize().await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run => {
            let (report, _) = Pipeline::new(settings, db_repo.clone()).run().await?;
            Ok(check_report(&report))
        }
        Commands::Preview(args) => handle_preview(db_repo, &settings, args).await,
    }
}

/// Lists every file that failed to load; any failure fails the process.
fn check_report(report: &IngestReport) -> ExitCode {
    for load in report.failed() {
        if let Err(e) = &load.outcome {
            eprintln!("Failed to load {}: {e}", load.file.display());
        }
    }
    match ensure_complete(report) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn handle_preview(
    db_repo: &DbRepository,
    settings: &Settings,
    args: PreviewArgs,
) -> anyhow::Result<ExitCode> {
    let rows = db_repo
        .load_vendor_summary(&settings.summary.table_name, Some(args.limit))
        .await?;

    match args.format {
        OutputFormat::Table => println!("{}", render_table(&rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(ExitCode::SUCCESS)
}

fn render_table(rows: &[EnrichedSummaryRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Vendor",
        "Vendor Name",
        "Brand",
        "Description",
        "Purchase $",
        "Sales $",
        "Gross Profit",
        "Margin %",
        "Turnover",
        "Sales/Purchase",
    ]);

    let money = |d: Decimal| d.round_dp(2).to_string();
    let optional = |d: Option<Decimal>| d.map_or_else(|| "-".to_string(), |v| v.round_dp(2).to_string());

    for row in rows {
        table.add_row(vec![
            row.vendor_number.to_string(),
            row.vendor_name.clone(),
            row.brand.to_string(),
            row.description.clone(),
            money(row.total_purchase_dollars),
            money(row.total_sales_dollars),
            money(row.gross_profit),
            optional(row.profit_margin),
            optional(row.stock_turnover),
            optional(row.sales_to_purchase_ratio),
        ]);
    }
    table
}
