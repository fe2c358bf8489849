//! Roll polar command-line host.
//!
//! Loads the control file and the dataset matching the given operating
//! conditions, then prints a JSON report of the current roll, its
//! classification and the display angles. `--field` adds the resampled
//! polar field.

mod report;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use display_frame::DirectionMode;
use polar_common::{DraftCategory, OperatingParameters};
use polar_locator::LocalFileSystem;
use polar_session::{DatasetLoader, LoadOutcome, PolarSession, SessionHandle};
use roll_processor::{InterpolationMethod, PolarConfig};
use roll_style::DisplayMode;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use report::{PolarReport, ReportOptions};

#[derive(Parser, Debug)]
#[command(name = "polar-cli")]
#[command(about = "Vessel roll polar lookup")]
struct Args {
    /// YAML configuration file (default: POLAR_* environment variables)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset root directory
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Control file name inside the data root
    #[arg(long)]
    control_file: Option<String>,

    /// Interpolation method (legacy, bracketed)
    #[arg(long)]
    interpolation: Option<InterpolationMethod>,

    /// Field display mode (continuous, traffic-light)
    #[arg(long)]
    display_mode: Option<DisplayMode>,

    /// Direction mode (north-up, heads-up)
    #[arg(long)]
    direction_mode: Option<DirectionMode>,

    /// Draft category (scantling, design, intermediate)
    #[arg(short, long, default_value = "design")]
    draft: DraftCategory,

    /// Draft at the aft peak (m)
    #[arg(long)]
    draft_aft: Option<f64>,

    /// Draft at the fore peak (m)
    #[arg(long)]
    draft_fore: Option<f64>,

    /// Metacentric height (m)
    #[arg(long)]
    gm: Option<f64>,

    /// Significant wave height (m)
    #[arg(long)]
    hs: Option<f64>,

    /// Wave period (s)
    #[arg(long)]
    tz: Option<f64>,

    /// Vessel heading (deg)
    #[arg(long)]
    heading: Option<f64>,

    /// Speed through water (kn)
    #[arg(long)]
    speed: Option<f64>,

    /// Maximum allowed roll angle (deg)
    #[arg(long)]
    max_roll: Option<f64>,

    /// Wave direction (deg)
    #[arg(long)]
    wave_direction: Option<f64>,

    /// Number of contour intervals
    #[arg(long, default_value_t = 4)]
    contours: usize,

    /// Include the resampled field in the output
    #[arg(long)]
    field: bool,

    /// Save the conditions as a case under this id
    #[arg(long)]
    save_case: Option<String>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn load_config(&self) -> Result<PolarConfig> {
        let mut config = match &self.config {
            Some(path) => PolarConfig::from_yaml_file(path)?,
            None => PolarConfig::from_env(),
        };

        if let Some(root) = &self.data_root {
            config.data_root = root.clone();
        }
        if let Some(name) = &self.control_file {
            config.control_file_name = name.clone();
        }
        if let Some(method) = self.interpolation {
            config.interpolation = method;
        }
        if let Some(mode) = self.display_mode {
            config.display_mode = mode;
        }
        if let Some(mode) = self.direction_mode {
            config.direction_mode = mode;
        }

        config.validate()?;
        Ok(config)
    }

    fn operating_parameters(&self) -> OperatingParameters {
        let defaults = OperatingParameters::default();
        OperatingParameters {
            draft_category: self.draft,
            draft_aft_peak: self.draft_aft.unwrap_or(defaults.draft_aft_peak),
            draft_fore_peak: self.draft_fore.unwrap_or(defaults.draft_fore_peak),
            gm: self.gm.unwrap_or(defaults.gm),
            heading: self.heading.unwrap_or(defaults.heading),
            speed: self.speed.unwrap_or(defaults.speed),
            max_roll_angle: self.max_roll.unwrap_or(defaults.max_roll_angle),
            hs: self.hs.unwrap_or(defaults.hs),
            tz: self.tz.unwrap_or(defaults.tz),
            wave_direction: self.wave_direction.unwrap_or(defaults.wave_direction),
            wave_period_type: defaults.wave_period_type,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the report.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Starting roll polar CLI");

    let config = args.load_config()?;
    info!(
        data_root = %config.data_root.display(),
        interpolation = %config.interpolation,
        display_mode = %config.display_mode,
        direction_mode = %config.direction_mode,
        "Loaded configuration"
    );

    let loader = DatasetLoader::from_config(Arc::new(LocalFileSystem), &config);
    let handle = SessionHandle::new(PolarSession::new(config.interpolation), loader);

    handle
        .load_control_file()
        .await
        .context("failed to load control file")?;

    let params = args.operating_parameters();
    let violations = {
        let session = handle.lock().await;
        params.range_violations(session.control_file().map(|c| &c.parameter_bounds))
    };
    for violation in &violations {
        warn!(field = violation.field, value = violation.value, "Parameter out of range");
    }

    match handle
        .request_dataset(params)
        .await
        .context("failed to load dataset")?
    {
        LoadOutcome::Applied { location } => {
            info!(path = %location.path.display(), "Dataset ready")
        }
        LoadOutcome::Superseded { generation } => {
            warn!(generation = generation, "Dataset request superseded")
        }
    }

    let mut session = handle.lock().await;
    if let Some(id) = &args.save_case {
        session.save_case(id)?;
    }

    let options = ReportOptions {
        display_mode: config.display_mode,
        direction_mode: config.direction_mode,
        contour_count: args.contours,
        field_mesh: args.field.then(|| config.mesh()),
    };
    let report = PolarReport::build(&session, &options)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}
