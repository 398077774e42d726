use bmi_core::*;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "BMI measurement tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Fail on store read/write errors instead of logging them
    #[arg(long, global = true)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new measurement and show progress against the previous one
    Add {
        /// Height in centimeters
        #[arg(long)]
        height: f64,

        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
    },

    /// List all measurements (default)
    List,

    /// Replace a measurement with freshly entered values
    Update {
        /// Index as shown by `list`
        index: usize,

        /// Height in centimeters
        #[arg(long)]
        height: f64,

        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
    },

    /// Revise the recommendation of a measurement
    Recommend {
        /// Index as shown by `list`
        index: usize,

        /// New recommendation (Bulking, Ideal, Diet, or any label)
        label: Category,
    },

    /// Delete a measurement
    Delete {
        /// Index as shown by `list`
        index: usize,
    },

    /// Show progress of the latest measurement against the previous one
    Progress,

    /// Show a full report for the latest measurement
    Report,

    /// Export all measurements to a new CSV file
    Export {
        /// Destination file (must not exist)
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.verbose {
        0 => bmi_core::logging::init(),
        1 => bmi_core::logging::init_with_level("info"),
        _ => bmi_core::logging::init_with_level("debug"),
    }

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let mode = if cli.strict {
        PersistenceMode::Strict
    } else {
        config.persistence_mode()
    };

    let mut store = MeasurementStore::open_with_mode(Config::store_path(&data_dir), mode)?;
    let evaluator = config.evaluator();

    match cli.command {
        Some(Commands::Add { height, weight }) => cmd_add(&mut store, &evaluator, height, weight),
        Some(Commands::List) | None => cmd_list(&store),
        Some(Commands::Update {
            index,
            height,
            weight,
        }) => cmd_update(&mut store, index, height, weight),
        Some(Commands::Recommend { index, label }) => cmd_recommend(&mut store, index, label),
        Some(Commands::Delete { index }) => cmd_delete(&mut store, index),
        Some(Commands::Progress) => cmd_progress(&store, &evaluator),
        Some(Commands::Report) => cmd_report(&store, &evaluator),
        Some(Commands::Export { path }) => cmd_export(&store, &path),
    }
}

fn cmd_add(
    store: &mut MeasurementStore,
    evaluator: &ProgressEvaluator,
    height: f64,
    weight: f64,
) -> Result<()> {
    validate_input(height, weight)?;

    let (previous, _) = store.latest_pair();
    let measurement = Measurement::new(height, weight);
    store.add(measurement.clone())?;
    warn_if_unsynced(store);

    println!("✓ Measurement recorded");
    println!("  {}", measurement);
    println!(
        "  Progress: {}",
        evaluator.evaluate(&measurement, previous.as_ref())
    );
    Ok(())
}

fn cmd_list(store: &MeasurementStore) -> Result<()> {
    if store.is_empty() {
        println!("No measurements recorded.");
        return Ok(());
    }

    let measurements = store.get_all();
    println!("{} measurement(s):", measurements.len());
    for (index, m) in measurements.iter().enumerate() {
        println!("  [{}] {}", index, m);
    }
    Ok(())
}

fn cmd_update(store: &mut MeasurementStore, index: usize, height: f64, weight: f64) -> Result<()> {
    validate_input(height, weight)?;

    let measurement = Measurement::new(height, weight);
    store.update(index, measurement.clone())?;
    warn_if_unsynced(store);

    println!("✓ Measurement [{}] updated", index);
    println!("  {}", measurement);
    Ok(())
}

fn cmd_recommend(store: &mut MeasurementStore, index: usize, label: Category) -> Result<()> {
    let mut measurement = store.get(index).ok_or(Error::IndexOutOfRange {
        index,
        len: store.count(),
    })?;
    measurement.set_recommendation(label);
    store.update(index, measurement.clone())?;
    warn_if_unsynced(store);

    println!("✓ Recommendation for [{}] set to {}", index, measurement.recommendation());
    Ok(())
}

fn cmd_delete(store: &mut MeasurementStore, index: usize) -> Result<()> {
    let removed = store.delete(index)?;
    warn_if_unsynced(store);

    println!("✓ Deleted [{}] {}", index, removed);
    Ok(())
}

fn cmd_progress(store: &MeasurementStore, evaluator: &ProgressEvaluator) -> Result<()> {
    if store.is_empty() {
        println!("No measurements recorded.");
        return Ok(());
    }

    if let Some(message) = evaluator.evaluate_latest(&store.get_all()) {
        println!("{}", message);
    }
    Ok(())
}

fn cmd_report(store: &MeasurementStore, evaluator: &ProgressEvaluator) -> Result<()> {
    if store.is_empty() {
        println!("No measurements recorded.");
        return Ok(());
    }

    if let Some(report) = ProgressReport::latest(&store.get_all(), evaluator) {
        println!("{}", report);
    }
    Ok(())
}

fn cmd_export(store: &MeasurementStore, path: &Path) -> Result<()> {
    let count = export_csv(&store.get_all(), path)?;
    println!("✓ Exported {} measurement(s) to {}", count, path.display());
    Ok(())
}

fn warn_if_unsynced(store: &MeasurementStore) {
    if !store.is_synced() {
        tracing::debug!("Store {:?} diverged from disk", store.path());
        eprintln!(
            "warning: changes could not be saved to {}",
            store.path().display()
        );
    }
}
