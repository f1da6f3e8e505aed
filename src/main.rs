use clap::{Parser, Subcommand};
use greyedge::config::{self, Config};
use greyedge::imaging::{Threshold, Transform};
use greyedge::process::{self, BatchOptions};
use greyedge::{output, scan};
use std::path::PathBuf;

/// Shared flags for commands that run a batch.
#[derive(clap::Args, Clone)]
struct BatchArgs {
    /// Images to process instead of scanning the input directory
    files: Vec<PathBuf>,

    /// Write a JSON report of every image's outcome to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "greyedge")]
#[command(version)]
#[command(about = "Batch greyscale conversion and Sobel edge detection")]
#[command(long_about = "\
Batch greyscale conversion and Sobel edge detection

Every image in the input directory (or every file given on the command
line) is converted and written to the output directory:

  input/cat.jpg  ──greyscale──▶  output/cat_Greyscale.png
  input/cat.jpg  ──sobel──────▶  output/cat_Sobel.png

Greyscale replaces each pixel's color channels with their average.
Sobel computes an edge-strength map; gradient components below the
threshold (0-255) are discarded. Alpha is preserved by both.

Run 'greyedge gen-config' to generate a documented config.toml.")]
struct Cli {
    /// Input directory (overrides config)
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Maximum number of images processed at once (defaults to CPU cores)
    #[arg(long, short = 'j', global = true)]
    jobs: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert images to greyscale
    Greyscale(BatchArgs),
    /// Run Sobel edge detection
    Sobel {
        /// Discard gradient components below this value (0-255)
        #[arg(long, short = 't', allow_hyphen_values = true)]
        threshold: Option<i64>,

        #[command(flatten)]
        batch: BatchArgs,
    },
    /// List the files a batch would pick up, without processing
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let mut config = config::load_config(&cli.config)?;
    if let Some(input) = cli.input {
        config.paths.input = input;
    }
    if let Some(output) = cli.output {
        config.paths.output = output;
    }
    if let Some(jobs) = cli.jobs {
        config.processing.max_processes = Some(jobs);
    }

    match cli.command {
        Command::Greyscale(args) => run_batch(&config, Transform::Greyscale, &args)?,
        Command::Sobel { threshold, batch } => {
            // Fail before touching any file if the threshold is unusable.
            let threshold = match threshold {
                Some(t) => Threshold::new(t)?,
                None => config.threshold()?,
            };
            println!("Threshold: {}", threshold.value());
            run_batch(&config, Transform::Sobel { threshold }, &batch)?;
        }
        Command::Check => {
            let result = scan::scan(&config.paths.input, &config.scan.extensions)?;
            output::print_scan_output(&result, &config.paths.input);
        }
        Command::GenConfig => unreachable!("handled before config loading"),
    }

    Ok(())
}

fn run_batch(
    config: &Config,
    transform: Transform,
    args: &BatchArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = resolve_files(config, &args.files)?;
    if files.is_empty() {
        return Err(format!("No images to process in {}", config.paths.input.display()).into());
    }

    let options = BatchOptions {
        output_dir: config.paths.output.clone(),
        workers: config::effective_threads(&config.processing),
    };

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });
    let report = process::process(&files, transform, &options, Some(tx))?;
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;

    output::print_batch_summary(&report);

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)?;
        println!("Report: {}", path.display());
    }
    Ok(())
}

/// Files named on the command line win over scanning the input directory.
fn resolve_files(
    config: &Config,
    explicit: &[PathBuf],
) -> Result<Vec<PathBuf>, scan::ScanError> {
    let result = if explicit.is_empty() {
        scan::scan(&config.paths.input, &config.scan.extensions)?
    } else {
        scan::filter_files(explicit.iter().cloned(), &config.scan.extensions)
    };
    let source = if explicit.is_empty() {
        config.paths.input.as_path()
    } else {
        std::path::Path::new("command line")
    };
    output::print_scan_output(&result, source);
    Ok(result.accepted)
}
