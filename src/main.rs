//! `refdump` CLI - Generate and compare raw image preprocessing fixtures.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use refdump::pipeline::{DEFAULT_REFERENCE, DEFAULT_SIZE, SAMPLES_DIR};
use refdump::{
    compare_dumps, dump_reference, dump_transforms, CompareOptions, ElementType, FixturePaths,
    Interpolation, TransformConfig, DEFAULT_INPUT,
};

/// Generate raw binary reference fixtures for image preprocessing parity tests.
#[derive(Parser, Debug)]
#[command(name = "refdump")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dump the decoded pixel buffer of the input image.
    Reference {
        #[command(flatten)]
        input: InputArgs,

        /// Output dump path.
        #[arg(short, long, value_name = "PATH", default_value = DEFAULT_REFERENCE)]
        output: PathBuf,
    },

    /// Dump the resized, normalized, and resized+normalized buffers.
    Transforms {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        transform: TransformArgs,
    },

    /// Run both dumpers.
    All {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        transform: TransformArgs,
    },

    /// Compare a candidate dump against a reference dump.
    Compare {
        /// Dump produced by the implementation under test.
        #[arg(value_name = "CANDIDATE")]
        candidate: PathBuf,

        /// Reference dump.
        #[arg(value_name = "REFERENCE")]
        reference: PathBuf,

        /// Element type of both dumps (u8 or f32).
        #[arg(long, value_name = "TYPE")]
        dtype: ElementType,

        /// Allowed absolute difference per element. Defaults to 1 for u8, 0.05 for f32.
        #[arg(short, long, value_name = "FLOAT")]
        tolerance: Option<f64>,

        /// Channels per pixel, used to locate mismatches.
        #[arg(long, default_value = "3", value_name = "INT")]
        channels: usize,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input image path.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_INPUT)]
    input: PathBuf,
}

#[derive(Args, Debug)]
struct TransformArgs {
    /// Directory receiving the dumps.
    #[arg(long, value_name = "DIR", default_value = SAMPLES_DIR)]
    out_dir: PathBuf,

    /// Edge length of the square resize target.
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Resize interpolation (linear, align-corners, lanczos3).
    #[arg(long, value_name = "MODE", default_value = "linear")]
    interpolation: Interpolation,
}

impl TransformArgs {
    fn config(&self) -> TransformConfig {
        TransformConfig {
            height: self.size,
            width: self.size,
            interpolation: self.interpolation,
            ..TransformConfig::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("refdump={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(&cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run one subcommand. `Ok(false)` means a comparison found mismatches.
fn run(command: &Command) -> Result<bool> {
    match command {
        Command::Reference { input, output } => {
            run_reference(&input.input, output)?;
        }
        Command::Transforms { input, transform } => {
            run_transforms(&input.input, transform)?;
        }
        Command::All { input, transform } => {
            let paths = FixturePaths::in_dir(&transform.out_dir);
            run_reference(&input.input, &paths.reference)?;
            run_transforms(&input.input, transform)?;
        }
        Command::Compare {
            candidate,
            reference,
            dtype,
            tolerance,
            channels,
        } => {
            let mut options = CompareOptions::new(*dtype).with_channels(*channels);
            if let Some(tolerance) = tolerance {
                options = options.with_tolerance(*tolerance);
            }

            let comparison = compare_dumps(candidate, reference, &options)
                .context("Failed to compare dumps")?;

            for mismatch in &comparison.mismatches {
                eprintln!("Mismatch at {mismatch}");
            }
            println!("{comparison}");
            return Ok(comparison.is_match());
        }
    }

    Ok(true)
}

fn run_reference(input: &Path, output: &Path) -> Result<()> {
    let info = dump_reference(input, output)
        .with_context(|| format!("Failed to dump reference for {}", input.display()))?;

    println!("{info}");
    Ok(())
}

fn run_transforms(input: &Path, args: &TransformArgs) -> Result<()> {
    let paths = FixturePaths::in_dir(&args.out_dir);
    let reports = dump_transforms(input, &paths, &args.config())
        .with_context(|| format!("Failed to dump transforms for {}", input.display()))?;

    for report in &reports {
        println!("{report}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::{DynamicImage, ImageBuffer, Rgb};

    use super::*;

    fn compare(candidate: PathBuf, reference: PathBuf) -> Command {
        Command::Compare {
            candidate,
            reference,
            dtype: ElementType::U8,
            tolerance: None,
            channels: 3,
        }
    }

    #[test]
    fn test_transforms_defaults() {
        let cli = Cli::try_parse_from(["refdump", "transforms"]).unwrap();
        let Command::Transforms { input, transform } = cli.command else {
            panic!("expected transforms subcommand")
        };

        assert_eq!(input.input, Path::new(DEFAULT_INPUT));
        assert_eq!(transform.out_dir, Path::new(SAMPLES_DIR));
        assert_eq!(transform.size, 224);
        assert_eq!(transform.interpolation, Interpolation::Linear);
        assert_eq!(transform.config(), TransformConfig::default());
    }

    #[test]
    fn test_reference_default_output() {
        let cli = Cli::try_parse_from(["refdump", "reference"]).unwrap();
        let Command::Reference { output, .. } = cli.command else {
            panic!("expected reference subcommand")
        };

        assert_eq!(output, FixturePaths::default().reference);
    }

    #[test]
    fn test_compare_mismatch_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (a, b) = (dir.path().join("a.bin"), dir.path().join("b.bin"));
        fs::write(&a, [0u8, 10, 20, 30, 40, 50]).unwrap();
        fs::write(&b, [0u8, 10, 20, 30, 90, 50]).unwrap();

        assert!(!run(&compare(a, b)).unwrap());
    }

    #[test]
    fn test_compare_identical_is_success() {
        let dir = tempfile::tempdir().unwrap();
        let (a, b) = (dir.path().join("a.bin"), dir.path().join("b.bin"));
        fs::write(&a, [7u8; 12]).unwrap();
        fs::write(&b, [7u8; 12]).unwrap();

        assert!(run(&compare(a, b)).unwrap());
    }

    #[test]
    fn test_all_writes_every_dump() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sample.bmp");
        let buf: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(16, 12, |x, y| Rgb([(x * 10) as u8, (y * 10) as u8, 128]));
        DynamicImage::ImageRgb8(buf).save(&input).unwrap();

        let out_dir = dir.path().join("out");
        let command = Command::All {
            input: InputArgs { input },
            transform: TransformArgs {
                out_dir: out_dir.clone(),
                size: DEFAULT_SIZE,
                interpolation: Interpolation::Linear,
            },
        };
        assert!(run(&command).unwrap());

        let paths = FixturePaths::in_dir(&out_dir);
        for path in [
            &paths.reference,
            &paths.resized,
            &paths.normalized,
            &paths.resized_and_normalized,
        ] {
            assert!(path.is_file(), "missing {}", path.display());
        }
        assert_eq!(fs::metadata(&paths.reference).unwrap().len(), 16 * 12 * 3);
    }
}
