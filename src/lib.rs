//! Roibridge: regions of interest between an annotation platform and an
//! image-analysis toolkit.
//!
//! The annotation platform stores regions in full-resolution image pixels.
//! The toolkit works on a downsampled image whose calibration may shift the
//! origin. This crate converts regions both ways, keeping geometry and the
//! image plane intact.
//!
//! # Modules
//!
//! - [`geom`]: Typed points, boxes, affine transforms and area geometry
//! - [`source`] / [`toolkit`]: The two region models
//! - [`convert`]: Coordinate mapping and region conversion in both directions
//! - [`io_json`]: Region documents read from and written to JSON
//! - [`validation`]: Region document validation and error reporting
//! - [`resources`]: Named resources stored in a directory, and model envelopes
//! - [`error`]: Error types for roibridge operations

pub mod convert;
pub mod error;
pub mod geom;
pub mod io_json;
pub mod plane;
pub mod resources;
pub mod source;
pub mod toolkit;
pub mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use convert::{to_source_region, to_toolkit_region, CoordinateContext};
pub use error::RoiBridgeError;
pub use plane::PlaneIndex;
pub use source::SourceRegion;
pub use toolkit::ToolkitRegion;

use io_json::{SourceDocument, ToolkitDocument};

/// The roibridge CLI application.
#[derive(Parser)]
#[command(name = "roibridge")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a source region document into a toolkit region document.
    ToToolkit(ToToolkitArgs),
    /// Convert a toolkit region document into a source region document.
    ToSource(ToSourceArgs),
    /// Validate a region document for errors and warnings.
    Validate(ValidateArgs),
}

/// Coordinate context shared by both conversion directions.
#[derive(clap::Args)]
struct ContextArgs {
    /// Calibration x-origin of the toolkit image.
    #[arg(long, env = "ROIBRIDGE_ORIGIN_X", default_value_t = 0.0, allow_negative_numbers = true)]
    origin_x: f64,

    /// Calibration y-origin of the toolkit image.
    #[arg(long, env = "ROIBRIDGE_ORIGIN_Y", default_value_t = 0.0, allow_negative_numbers = true)]
    origin_y: f64,

    /// Downsample factor of the toolkit image (must be > 0).
    #[arg(long, env = "ROIBRIDGE_DOWNSAMPLE", default_value_t = 1.0)]
    downsample: f64,
}

impl ContextArgs {
    fn context(&self) -> CoordinateContext {
        CoordinateContext::new(self.origin_x, self.origin_y, self.downsample)
    }
}

/// Arguments for the to-toolkit subcommand.
#[derive(clap::Args)]
struct ToToolkitArgs {
    /// Source region document (JSON).
    input: PathBuf,

    /// Output file; prints to stdout if omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    context: ContextArgs,

    /// Only convert regions on this z-slice.
    #[arg(long)]
    z: Option<u32>,

    /// Only convert regions at this timepoint.
    #[arg(long)]
    t: Option<u32>,
}

/// Arguments for the to-source subcommand.
#[derive(clap::Args)]
struct ToSourceArgs {
    /// Toolkit region document (JSON).
    input: PathBuf,

    /// Output file; prints to stdout if omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    context: ContextArgs,

    /// Channel for the converted regions (-1 for all channels).
    #[arg(long, allow_negative_numbers = true)]
    channel: Option<i32>,

    /// z-slice for the converted regions; defaults to the document's plane.
    #[arg(long)]
    z: Option<u32>,

    /// Timepoint for the converted regions; defaults to the document's plane.
    #[arg(long)]
    t: Option<u32>,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Input file to validate.
    input: PathBuf,

    /// Document model ('source' or 'toolkit').
    #[arg(long, default_value = "source")]
    format: String,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the roibridge CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), RoiBridgeError> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::ToToolkit(args)) => run_to_toolkit(args),
        Some(Commands::ToSource(args)) => run_to_source(args),
        Some(Commands::Validate(args)) => run_validate(args),
        None => {
            println!("roibridge {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!(
                "Converts regions of interest between an annotation platform and an image toolkit."
            );
            println!();
            println!("Run 'roibridge --help' for usage information.");
            Ok(())
        }
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the to-toolkit subcommand.
fn run_to_toolkit(args: ToToolkitArgs) -> Result<(), RoiBridgeError> {
    let ctx = args.context.context();
    ctx.validate()?;

    let doc = io_json::read_source_json(&args.input)?;
    let total = doc.regions.len();
    let selected: Vec<SourceRegion> = doc
        .regions
        .into_iter()
        .filter(|region| {
            let plane = region.plane();
            args.z.map_or(true, |z| plane.z == z) && args.t.map_or(true, |t| plane.t == t)
        })
        .collect();
    if selected.len() < total {
        info!(
            skipped = total - selected.len(),
            "skipped regions on other planes"
        );
    }

    let regions = convert::to_toolkit_regions(&selected, &ctx)?;
    let plane = PlaneIndex::all_channels_at(args.z.unwrap_or(0), args.t.unwrap_or(0));
    let out = ToolkitDocument { plane, regions };
    report_dropped(selected.len(), out.regions.len());

    emit(args.output.as_deref(), &out, io_json::write_toolkit_json)
}

/// Execute the to-source subcommand.
fn run_to_source(args: ToSourceArgs) -> Result<(), RoiBridgeError> {
    let ctx = args.context.context();
    ctx.validate()?;

    let doc = io_json::read_toolkit_json(&args.input)?;
    let plane = PlaneIndex::new(
        args.channel.unwrap_or(doc.plane.c),
        args.z.unwrap_or(doc.plane.z),
        args.t.unwrap_or(doc.plane.t),
    );

    let regions = convert::to_source_regions(&doc.regions, &ctx, plane)?;
    let out = SourceDocument { regions };
    report_dropped(doc.regions.len(), out.regions.len());

    emit(args.output.as_deref(), &out, io_json::write_source_json)
}

fn report_dropped(input: usize, output: usize) {
    if output < input {
        warn!(
            dropped = input - output,
            "regions without geometry were not converted"
        );
    }
}

/// Writes `doc` to `output` with `write`, or pretty-prints it to stdout.
fn emit<T: Serialize>(
    output: Option<&Path>,
    doc: &T,
    write: fn(&Path, &T) -> Result<(), RoiBridgeError>,
) -> Result<(), RoiBridgeError> {
    match output {
        Some(path) => write(path, doc),
        None => {
            let text = serde_json::to_string_pretty(doc).map_err(|source| {
                RoiBridgeError::RegionJsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{text}");
            Ok(())
        }
    }
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), RoiBridgeError> {
    let opts = validation::ValidateOptions {
        strict: args.strict,
    };

    let report = match args.format.as_str() {
        "source" => {
            let doc = io_json::read_source_json(&args.input)?;
            validation::validate_source_document(&doc, &opts)
        }
        "toolkit" => {
            let doc = io_json::read_toolkit_json(&args.input)?;
            validation::validate_toolkit_document(&doc, &opts)
        }
        other => {
            return Err(RoiBridgeError::UnsupportedFormat(format!(
                "'{}' (supported: source, toolkit)",
                other
            )));
        }
    };

    match args.output.as_str() {
        "json" => {
            let issues: Vec<serde_json::Value> = report
                .issues
                .iter()
                .map(|issue| {
                    serde_json::json!({
                        "severity": issue.severity.as_str(),
                        "code": format!("{:?}", issue.code),
                        "message": issue.message,
                        "context": issue.context.to_string(),
                    })
                })
                .collect();
            let summary = serde_json::json!({
                "error_count": report.error_count(),
                "warning_count": report.warning_count(),
                "issues": issues,
            });
            let text = serde_json::to_string_pretty(&summary).map_err(|source| {
                RoiBridgeError::RegionJsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{text}");
        }
        _ => {
            print!("{}", report);
        }
    }

    if report.passes(opts.strict) {
        return Ok(());
    }
    Err(RoiBridgeError::ValidationFailed {
        error_count: report.error_count(),
        warning_count: report.warning_count(),
        report,
    })
}
