use crate::csv_table::read_csv_table;
use crate::error::IngestError;
use configuration::IngestSettings;
use database::DbRepository;
use indicatif::ProgressStyle;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{Instrument, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// The result of loading one file.
#[derive(Debug)]
pub struct TableLoad {
    pub file: PathBuf,
    pub table: String,
    /// Rows written, or why the file could not be loaded.
    pub outcome: Result<u64, IngestError>,
}

/// Per-file results of a directory load.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub loads: Vec<TableLoad>,
    pub elapsed: Duration,
}

impl IngestReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &TableLoad> {
        self.loads.iter().filter(|l| l.outcome.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &TableLoad> {
        self.loads.iter().filter(|l| l.outcome.is_err())
    }

    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }

    pub fn total_rows(&self) -> u64 {
        self.loads
            .iter()
            .filter_map(|l| l.outcome.as_ref().ok())
            .sum()
    }
}

/// Lists the CSV files directly inside `dir`, sorted by file name.
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let io_error = |source| IngestError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// The table a file is loaded into: its name without the extension.
pub fn table_name_for(path: &Path) -> Result<String, IngestError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| IngestError::NoTableName(path.to_path_buf()))
}

/// Loads CSV files into the store, one table per file.
pub struct BulkLoader {
    db_repo: DbRepository,
    fail_fast: bool,
    show_progress: bool,
}

impl BulkLoader {
    pub fn new(db_repo: DbRepository, settings: &IngestSettings) -> Self {
        Self {
            db_repo,
            fail_fast: settings.fail_fast,
            show_progress: settings.show_progress,
        }
    }

    /// Loads a single file, replacing its table. Returns the rows written.
    pub async fn load_file(&self, path: &Path) -> Result<u64, IngestError> {
        let table_name = table_name_for(path)?;
        let table = read_csv_table(path, &table_name)?;
        tracing::debug!(
            table = %table_name,
            columns = table.columns.len(),
            rows = table.row_count(),
            "Parsed CSV file."
        );
        Ok(self.db_repo.replace_table(&table).await?)
    }

    /// Loads every CSV file in `dir`.
    ///
    /// A file that fails is recorded in the report and the remaining files are
    /// still loaded. With `fail_fast` set, the first failure is returned as the
    /// error instead. Failing to list the directory is always an error.
    ///
    /// The progress bar hangs off a tracing span, so it is drawn by the
    /// subscriber's indicatif layer and only when console logging is on.
    pub async fn load_directory(&self, dir: &Path) -> Result<IngestReport, IngestError> {
        let start = Instant::now();
        let files = discover_csv_files(dir)?;
        if files.is_empty() {
            tracing::warn!(dir = %dir.display(), "No CSV files found.");
        }

        let progress_span = if self.show_progress {
            let span = tracing::info_span!("load_csvs", dir = %dir.display());
            span.pb_set_style(
                &ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                    .progress_chars("#>-"),
            );
            span.pb_set_length(files.len() as u64);
            span
        } else {
            Span::none()
        };

        let mut report = self
            .load_files(files, &progress_span)
            .instrument(progress_span.clone())
            .await?;

        report.elapsed = start.elapsed();
        tracing::info!(
            loaded = report.succeeded().count(),
            failed = report.failed().count(),
            rows = report.total_rows(),
            "All CSVs loaded in {:.2}s",
            report.elapsed.as_secs_f64()
        );

        Ok(report)
    }

    async fn load_files(&self, files: Vec<PathBuf>, progress: &Span) -> Result<IngestReport, IngestError> {
        let mut report = IngestReport::default();
        for file in files {
            let table = table_name_for(&file).unwrap_or_default();
            progress.pb_set_message(&format!("Loading {table}..."));
            tracing::info!(file = %file.display(), "Reading file.");

            let outcome = self.load_file(&file).await;
            match &outcome {
                Ok(rows) => tracing::info!(table = %table, rows, "Ingested table."),
                Err(e) => tracing::error!(file = %file.display(), error = %e, "Failed to ingest file."),
            }
            progress.pb_inc(1);

            if self.fail_fast {
                if let Err(e) = outcome {
                    return Err(e);
                }
            }
            report.loads.push(TableLoad { file, table, outcome });
        }
        Ok(report)
    }
}
