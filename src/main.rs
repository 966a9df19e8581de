use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use welltrace::{pipeline, CalculationMode, Result, RunSummary, SurveyMethod, WellConfig};

#[derive(Parser, Debug)]
#[command(name = "welltrace")]
#[command(about = "Wellbore trajectory calculator for directional surveys")]
#[command(version)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute one well and write its report and plan-view trace
    Compute {
        /// Well config TOML; command-line values override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Survey table
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// angle or dxdy
        #[arg(short, long)]
        mode: Option<CalculationMode>,

        /// minimum_curvature, average_angle or balanced_tangential
        #[arg(long)]
        method: Option<SurveyMethod>,

        /// Magnetic declination in degrees (angle mode)
        #[arg(long, allow_hyphen_values = true)]
        declination: Option<f64>,

        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Well name used in output file names
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Compute several wells in parallel, one config file each
    Batch {
        #[arg(required = true)]
        configs: Vec<PathBuf>,
    },

    /// Print a config file with every default filled in
    DefaultConfig,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    match args.command {
        Command::Compute {
            config,
            input,
            mode,
            method,
            declination,
            output_dir,
            name,
        } => {
            let mut well = match config {
                Some(path) => WellConfig::load_from_file(&path)?,
                None => WellConfig::default(),
            };
            if input.is_some() {
                well.input.path = input;
            }
            if let Some(mode) = mode {
                well.input.mode = mode;
            }
            if let Some(method) = method {
                well.calculation.method = method;
            }
            if let Some(declination) = declination {
                well.calculation.magnetic_declination = declination;
            }
            if let Some(dir) = output_dir {
                well.output.directory = dir;
            }
            if let Some(name) = name {
                well.well.name = name;
            }
            well.validate()?;

            let summary = pipeline::run(&well)?;
            print_summary(&summary);
        }
        Command::Batch { configs } => {
            let mut wells = Vec::with_capacity(configs.len());
            let mut failed = 0usize;
            for path in &configs {
                match WellConfig::load_from_file(path) {
                    Ok(config) => wells.push(config),
                    Err(e) => {
                        error!(path = %path.display(), error = %e, "skipping config");
                        failed += 1;
                    }
                }
            }

            info!(wells = wells.len(), "starting batch");
            for result in pipeline::run_batch(&wells) {
                match result {
                    Ok(summary) => print_summary(&summary),
                    Err(_) => failed += 1,
                }
            }

            if failed > 0 {
                error!(failed, total = configs.len(), "batch finished with failures");
                std::process::exit(1);
            }
        }
        Command::DefaultConfig => {
            let mut config = WellConfig::default();
            config.input.path = Some(PathBuf::from("survey.txt"));
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("{}: {} points", summary.well, summary.stations);
    println!("  report:   {}", summary.report.display());
    println!("  geometry: {}", summary.geometry.display());
    if let Some(markers) = &summary.markers {
        println!("  markers:  {}", markers.display());
    }
}
