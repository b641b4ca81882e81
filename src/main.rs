use clap::{Parser, Subcommand};
use csv_log_sync::utils::config::ExtractJob;
use csv_log_sync::{
    analyze_csv, count_rows, extract_columns, extract_output_path, find_sync_point, list_columns,
    show_preview, AppConfig, SyncOutcome, SyncPoint, SyncedDatasetBuilder,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "csv-log-sync")]
#[command(about = "Trim, inspect and align robotics CSV logs")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults are used when it does not exist)
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Rows per streamed chunk, overriding the configuration
    #[arg(long, global = true)]
    chunk_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count data rows (lines after the header)
    Count { file: PathBuf },

    /// List header column names
    Columns { file: PathBuf },

    /// Print the first rows as a table
    Preview {
        file: PathBuf,

        /// Number of rows to show
        #[arg(short = 'n', long)]
        rows: Option<usize>,
    },

    /// Print row count, columns and sample rows as JSON
    Analyze {
        file: PathBuf,

        #[arg(long, default_value = "10")]
        sample_rows: usize,
    },

    /// Copy a subset of columns into a new file
    Extract {
        input: PathBuf,

        /// Output file (defaults to <input>-mod.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Column to keep; repeat for several, names are matched exactly
        #[arg(short, long = "column", required = true, allow_hyphen_values = true)]
        columns: Vec<String>,
    },

    /// Locate the row of <FILE_A> matching the first row of <FILE_B>
    FindSync {
        file_a: PathBuf,
        file_b: PathBuf,

        #[arg(short, long, allow_hyphen_values = true)]
        column: String,
    },

    /// Write <FILE_A> from its sync point and <FILE_B> whole to -sync.csv files
    Sync {
        file_a: PathBuf,
        file_b: PathBuf,

        #[arg(short, long, allow_hyphen_values = true)]
        column: String,
    },

    /// Run every [[extract]] job, then every [[sync]] job, from the configuration
    Run,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = AppConfig::load_if_present(&cli.config)?;
    if let Some(chunk_size) = cli.chunk_size {
        config.processing.chunk_size = chunk_size;
        config.validate()?;
    }

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive(format!("csv_log_sync={}", config.logging.level).parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let chunk_size = config.processing.chunk_size;

    match cli.command {
        Commands::Count { file } => {
            println!("{}", count_rows(&file)?);
        }

        Commands::Columns { file } => {
            for column in list_columns(&file)? {
                println!("{:?}", column);
            }
        }

        Commands::Preview { file, rows } => {
            let rows = rows.unwrap_or(config.processing.preview_rows);
            println!("{}", show_preview(&file, rows)?);
        }

        Commands::Analyze { file, sample_rows } => {
            let metadata = analyze_csv(&file, sample_rows)?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }

        Commands::Extract {
            input,
            output,
            columns,
        } => {
            let job = ExtractJob {
                input,
                output,
                columns,
            };
            run_extract(&job, chunk_size)?;
        }

        Commands::FindSync {
            file_a,
            file_b,
            column,
        } => {
            let point = find_sync_point(&file_a, &file_b, &column, chunk_size)?;
            println!("{}", serde_json::to_string_pretty(&point)?);
            if let SyncPoint::NotFound { .. } = point {
                return Ok(ExitCode::from(2));
            }
        }

        Commands::Sync {
            file_a,
            file_b,
            column,
        } => {
            let synced = run_sync(&config, &file_a, &file_b, &column)?;
            if !synced {
                return Ok(ExitCode::from(2));
            }
        }

        Commands::Run => {
            if config.extract.is_empty() && config.sync.is_empty() {
                tracing::warn!(config = %cli.config.display(), "No jobs configured");
            }
            for job in &config.extract {
                run_extract(job, chunk_size)?;
            }
            let mut all_synced = true;
            for job in &config.sync {
                all_synced &= run_sync(&config, &job.file_a, &job.file_b, &job.column)?;
            }
            if !all_synced {
                return Ok(ExitCode::from(2));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_extract(job: &ExtractJob, chunk_size: usize) -> anyhow::Result<()> {
    let output = job
        .output
        .clone()
        .unwrap_or_else(|| extract_output_path(&job.input));
    let rows = extract_columns(&job.input, &output, &job.columns, chunk_size)?;
    println!("{} rows -> {}", rows, output.display());
    Ok(())
}

/// Returns whether a sync point was found and both outputs were written.
fn run_sync(
    config: &AppConfig,
    file_a: &Path,
    file_b: &Path,
    column: &str,
) -> anyhow::Result<bool> {
    let outcome = SyncedDatasetBuilder::new(file_a, file_b, column)
        .chunk_size(config.processing.chunk_size)
        .log_every_percent(config.progress.log_every_percent)
        .build()?;

    match outcome {
        SyncOutcome::Synced(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(true)
        }
        SyncOutcome::NoSyncPoint { value } => {
            eprintln!("Sync value {} not found in {}", value, file_a.display());
            Ok(false)
        }
    }
}
