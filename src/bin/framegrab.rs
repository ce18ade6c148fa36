use std::cell::RefCell;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use framegrab::{
    BatchSummary, ExtractionMode, ImageFormat, NoOpProgress, ProgressCallback, TaskProgress,
    rebase_directory, run_batch,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  framegrab extract -i recordings -r --frame-interval 30 --progress\n  framegrab extract -i clip.mp4 -o frames --time-interval 0.5 --format jpg\n  framegrab extract -i clip.mp4 --extract-all\n  framegrab rebase frames\n  framegrab completions zsh > _framegrab";

#[derive(Debug, Parser)]
#[command(
    name = "framegrab",
    version,
    about = "Extract still frames from video files via ffmpeg",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Print the parsed invocation and exit without running anything.
    #[arg(long)]
    debug: bool,

    /// Show a progress bar across the task batch.
    #[arg(long)]
    progress: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract still frames from video files.
    #[command(
        about = "Extract still frames",
        after_help = "Examples:\n  framegrab extract -i recordings -r --frame-interval 30\n  framegrab extract -i clip.mp4 --time-interval 0.5 --format jpg"
    )]
    Extract {
        /// Input files or directories (one or more).
        #[arg(short = 'i', long = "input", required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Root directory for extracted frames. Defaults to each input's
        /// own location.
        #[arg(short = 'o', long = "output-directory")]
        output_directory: Option<PathBuf>,

        /// Recurse into input directories.
        #[arg(short = 'r', long)]
        recursive: bool,

        /// Output image format (png, jpg, bmp).
        #[arg(long, default_value = "png")]
        format: String,

        /// Extract every nth frame.
        #[arg(short = 'f', long, group = "mode", value_name = "N")]
        frame_interval: Option<u64>,

        /// Extract one frame per time window, in seconds (decimals allowed).
        #[arg(short = 't', long, group = "mode", value_name = "SECONDS")]
        time_interval: Option<f64>,

        /// Extract every frame.
        #[arg(short = 'a', long, group = "mode")]
        extract_all: bool,

        /// Print the batch summary as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Regroup extracted frame sets by their embedded capture timestamps.
    #[command(
        about = "Regroup extracted frames by capture timestamp",
        after_help = "Examples:\n  framegrab rebase frames"
    )]
    Rebase {
        /// Directory holding the extracted frame sets.
        directory: PathBuf,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Convert a decimal seconds value to whole milliseconds.
fn seconds_to_millis(seconds: f64) -> Result<u64, Box<dyn std::error::Error>> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("invalid --time-interval value: {seconds}").into());
    }
    Ok((seconds * 1000.0) as u64)
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .format_timestamp(None)
    .init();
}

/// Progress bar over the task batch, created lazily on the first callback
/// (the dispatcher knows the total, the CLI does not).
struct BarProgress {
    bar: RefCell<Option<ProgressBar>>,
}

impl BarProgress {
    fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }

    fn finish(&self) {
        if let Some(bar) = self.bar.borrow().as_ref() {
            bar.finish_with_message("done");
        }
    }
}

impl ProgressCallback for BarProgress {
    fn on_task(&self, progress: &TaskProgress<'_>) {
        let mut slot = self.bar.borrow_mut();
        let bar = slot.get_or_insert_with(|| {
            let bar = ProgressBar::new(progress.total as u64);
            let style =
                ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")
                    .map(|style| style.progress_chars("##-"))
                    .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style);
            bar
        });
        if let Some(name) = progress.media.file_name().and_then(|name| name.to_str()) {
            bar.set_message(name.to_string());
        }
        bar.set_position(progress.index as u64);
    }
}

fn print_summary(summary: &BatchSummary, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if as_json {
        let payload = json!({
            "total": summary.total(),
            "extracted": summary.extracted,
            "skipped": summary.skipped,
            "failed": summary.failed,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "success:".green().bold(),
        format!(
            "Extracted frames from {} file(s) ({} skipped)",
            summary.extracted, summary.skipped
        )
        .green()
    );
    if summary.failed > 0 {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            format!("{} task(s) failed; see the log above", summary.failed).yellow()
        );
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.global.debug);

    if cli.global.debug {
        println!("{cli:#?}");
        return Ok(());
    }

    match cli.command {
        Commands::Extract {
            input,
            output_directory,
            recursive,
            format,
            frame_interval,
            time_interval,
            extract_all,
            json,
        } => {
            let format: ImageFormat = format.parse()?;
            let time_interval_ms = match time_interval {
                Some(seconds) => Some(seconds_to_millis(seconds)?),
                None => None,
            };
            let mode = ExtractionMode::resolve(frame_interval, time_interval_ms, extract_all)?;

            let bar = BarProgress::new();
            let noop = NoOpProgress;
            let progress: &dyn ProgressCallback = if cli.global.progress { &bar } else { &noop };

            let summary = run_batch(input, output_directory, recursive, mode, format, progress)?;
            bar.finish();

            print_summary(&summary, json)?;
        }
        Commands::Rebase { directory } => {
            let report = rebase_directory(&directory)?;
            println!(
                "{} {}",
                "success:".green().bold(),
                format!(
                    "Moved {} image(s), skipped {}, removed {} emptied directories",
                    report.moved, report.skipped, report.removed_dirs
                )
                .green()
            );
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "framegrab", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
