use anyhow::{Context, Result};
use cema_score::config::Config;
use cema_score::scoring::{self, CheckedInput, RawEvaluationInput, ScoringError};
use cema_score::store::{self, EvaluationLog, RecordFilter};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

const EXIT_SUCCESS: i32 = 0;
const EXIT_VALIDATION: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one conveyor and print the breakdown
    Classify {
        /// Belt width
        #[arg(long, allow_negative_numbers = true)]
        width: f64,
        /// Unit of --width: in or mm (defaults to the configured unit)
        #[arg(long)]
        width_unit: Option<String>,
        /// Belt speed
        #[arg(long, allow_negative_numbers = true)]
        speed: f64,
        /// Unit of --speed: fpm or m/s (defaults to the configured unit)
        #[arg(long)]
        speed_unit: Option<String>,
        /// VULCANIZED, MECHANICAL_LOW_SPEED or MECHANICAL_HIGH_SPEED
        #[arg(long)]
        splice: String,
        /// MILD, MODERATE or EXTREME
        #[arg(long)]
        abrasiveness: String,
        /// DRY, MOIST, WET or SLURRY
        #[arg(long)]
        moisture: String,
        /// Conveyor tag stored with the evaluation
        #[arg(long)]
        conveyor: Option<String>,
        /// Free-form notes stored with the evaluation
        #[arg(long)]
        notes: Option<String>,
        /// Append the evaluation to the store
        #[arg(long)]
        save: bool,
        /// Print JSON instead of the breakdown table
        #[arg(long)]
        json: bool,
        /// Also write an HTML report to this path
        #[arg(long, requires = "save")]
        report: Option<PathBuf>,
        /// Open the written report in the browser
        #[arg(long, requires = "report")]
        open: bool,
    },
    /// Score every entry of a JSON array of evaluations
    Batch {
        /// JSON file with an array of inputs
        file: PathBuf,
        /// Append the evaluations to the store (only if every entry is valid)
        #[arg(long)]
        save: bool,
        /// Print JSON instead of the breakdown tables
        #[arg(long)]
        json: bool,
    },
    /// List stored evaluations
    List {
        /// Only evaluations newer than this, e.g. 7d or 12h
        #[arg(long)]
        since: Option<String>,
        /// Conveyor tag glob, e.g. "line-*"
        #[arg(long)]
        conveyor: Option<String>,
        /// Only evaluations at or above this severity class
        #[arg(long)]
        min_class: Option<u8>,
        /// Tab-separated output for scripting
        #[arg(long, conflicts_with = "json")]
        tsv: bool,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show one stored evaluation in detail
    Show {
        id: u64,
        #[arg(long)]
        json: bool,
    },
    /// Write an HTML report for a stored evaluation
    Report {
        id: u64,
        /// Output path (defaults to cema-report-<id>.html)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Open the report in the browser
        #[arg(long)]
        open: bool,
    },
    /// Delete a stored evaluation
    Remove { id: u64 },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "cema-score")]
#[command(about = "CEMA 576 conveyor belt cleaning severity classification", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/cema-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the evaluation store (overrides the config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Why a command failed, mapped to an exit code in `main`
enum Failure {
    /// Errors have already been printed
    Validation,
    Io(anyhow::Error),
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        Failure::Io(err)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        if let Err(e) = cema_score::config::init::run_init_wizard(cli.config.clone()) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match cema_score::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let log_level =
        cema_score::telemetry::resolve_log_level(cli.verbose, config.log_level.as_deref());
    if let Err(e) = cema_score::telemetry::init(&log_level) {
        eprintln!("Config error: {}", e);
        std::process::exit(EXIT_CONFIG);
    }

    let store_path = match resolve_store_path(cli.store.clone(), &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    tracing::debug!(store = %store_path.display(), "using evaluation store");

    let outcome = match cli.command {
        Commands::Classify {
            width,
            width_unit,
            speed,
            speed_unit,
            splice,
            abrasiveness,
            moisture,
            conveyor,
            notes,
            save,
            json,
            report,
            open,
        } => {
            let raw = RawEvaluationInput {
                width,
                width_unit,
                speed,
                speed_unit,
                splice,
                abrasiveness,
                moisture,
                conveyor,
                notes,
            };
            run_classify(&config, &store_path, raw, save, json, report.as_deref(), open)
        }
        Commands::Batch { file, save, json } => run_batch(&config, &store_path, &file, save, json),
        Commands::List {
            since,
            conveyor,
            min_class,
            tsv,
            json,
        } => run_list(&store_path, since.as_deref(), conveyor.as_deref(), min_class, tsv, json),
        Commands::Show { id, json } => run_show(&store_path, id, json),
        Commands::Report { id, out, open } => {
            let out = out.unwrap_or_else(|| PathBuf::from(format!("cema-report-{}.html", id)));
            run_report(&store_path, id, &out, open)
        }
        Commands::Remove { id } => run_remove(&store_path, id),
        Commands::Init => unreachable!("handled before config load"),
    };

    match outcome {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(Failure::Validation) => std::process::exit(EXIT_VALIDATION),
        Err(Failure::Io(e)) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
    }
}

fn resolve_store_path(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    match flag.or_else(|| config.store_path.clone()) {
        Some(p) => Ok(p),
        None => store::get_store_path(),
    }
}

fn print_validation_errors(prefix: &str, errors: &[ScoringError]) {
    eprintln!("{}", prefix);
    for error in errors {
        eprintln!("  - {}", error);
    }
}

/// Validate one input, logging a splice/speed mismatch if there is one.
fn check(raw: &RawEvaluationInput, config: &Config) -> Result<CheckedInput, Vec<ScoringError>> {
    let checked = scoring::validate_input(raw, config.units)?;
    if let Some(warning) =
        scoring::splice_speed_mismatch(checked.input.splice, checked.input.speed_fpm)
    {
        tracing::warn!("{}", warning);
    }
    Ok(checked)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn run_classify(
    config: &Config,
    store_path: &Path,
    raw: RawEvaluationInput,
    save: bool,
    json: bool,
    report: Option<&Path>,
    open: bool,
) -> Result<(), Failure> {
    let checked = match check(&raw, config) {
        Ok(c) => c,
        Err(errors) => {
            print_validation_errors("Invalid evaluation input:", &errors);
            return Err(Failure::Validation);
        }
    };
    let result = scoring::classify_input(&checked.input);
    tracing::debug!(total = result.total, class = result.severity_class.value(), "classified");

    if !save {
        if json {
            print_json(&result)?;
        } else {
            let use_colors = cema_score::output::should_use_colors();
            println!(
                "{}",
                cema_score::output::format_breakdown(&checked.input, &result, use_colors)
            );
        }
        return Ok(());
    }

    let mut log = store::load_log(store_path)?;
    let id = log.append(raw.conveyor, raw.notes, &checked, result);
    store::save_log(store_path, &log)?;
    let record = log
        .get(id)
        .context("Saved evaluation missing from store")?;

    if json {
        print_json(record)?;
    } else {
        let use_colors = cema_score::output::should_use_colors();
        println!(
            "{}",
            cema_score::output::format_breakdown(&record.input, &record.result, use_colors)
        );
        println!();
        println!("Saved as evaluation #{}", id);
    }

    if let Some(path) = report {
        cema_score::report::write_report(path, &cema_score::report::render_html(record))?;
        if !json {
            println!("Report written to {}", path.display());
        }
        if open {
            cema_score::browser::open_report(path)?;
        }
    }
    Ok(())
}

fn run_batch(
    config: &Config,
    store_path: &Path,
    file: &Path,
    save: bool,
    json: bool,
) -> Result<(), Failure> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read batch file {}", file.display()))?;
    let inputs: Vec<RawEvaluationInput> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse batch file {}", file.display()))?;
    tracing::debug!(entries = inputs.len(), "loaded batch");

    let mut checked = Vec::with_capacity(inputs.len());
    let mut any_invalid = false;
    for (i, raw) in inputs.iter().enumerate() {
        match check(raw, config) {
            Ok(c) => checked.push(c),
            Err(errors) => {
                print_validation_errors(&format!("Entry {}:", i + 1), &errors);
                any_invalid = true;
            }
        }
    }
    if any_invalid {
        eprintln!("Batch rejected: fix the entries above and retry.");
        return Err(Failure::Validation);
    }

    let results: Vec<_> = checked.iter().map(|c| scoring::classify_input(&c.input)).collect();

    let mut saved_ids = Vec::new();
    if save {
        let mut log = store::load_log(store_path)?;
        for ((raw, c), result) in inputs.iter().zip(&checked).zip(&results) {
            saved_ids.push(log.append(raw.conveyor.clone(), raw.notes.clone(), c, *result));
        }
        store::save_log(store_path, &log)?;
    }

    if json {
        print_json(&results)?;
        return Ok(());
    }

    let use_colors = cema_score::output::should_use_colors();
    for (i, ((raw, c), result)) in inputs.iter().zip(&checked).zip(&results).enumerate() {
        match raw.conveyor {
            Some(ref conveyor) => println!("Entry {} ({})", i + 1, conveyor),
            None => println!("Entry {}", i + 1),
        }
        println!("{}", cema_score::output::format_breakdown(&c.input, result, use_colors));
        println!();
    }
    if !saved_ids.is_empty() {
        let ids: Vec<String> = saved_ids.iter().map(|id| format!("#{}", id)).collect();
        println!("Saved as evaluations {}", ids.join(", "));
    }
    Ok(())
}

fn run_list(
    store_path: &Path,
    since: Option<&str>,
    conveyor: Option<&str>,
    min_class: Option<u8>,
    tsv: bool,
    json: bool,
) -> Result<(), Failure> {
    let filter = RecordFilter::parse(since, conveyor, min_class)?;
    let log = store::load_log(store_path)?;
    let records = store::filter_records(&log, &filter);
    tracing::debug!(total = log.len(), shown = records.len(), "filtered evaluations");

    if json {
        print_json(&records)?;
    } else if tsv {
        let output = cema_score::output::format_tsv(&records);
        if !output.is_empty() {
            println!("{}", output);
        }
    } else {
        let use_colors = cema_score::output::should_use_colors();
        println!("{}", cema_score::output::format_record_table(&records, use_colors));
    }
    Ok(())
}

fn load_record_log(store_path: &Path, id: u64) -> Result<EvaluationLog> {
    let log = store::load_log(store_path)?;
    if log.get(id).is_none() {
        anyhow::bail!("No evaluation #{} in {}", id, store_path.display());
    }
    Ok(log)
}

fn run_show(store_path: &Path, id: u64, json: bool) -> Result<(), Failure> {
    let log = load_record_log(store_path, id)?;
    let record = log.get(id).context("Evaluation disappeared")?;

    if json {
        print_json(record)?;
    } else {
        let use_colors = cema_score::output::should_use_colors();
        println!("{}", cema_score::output::format_record_detail(record, use_colors));
    }
    Ok(())
}

fn run_report(store_path: &Path, id: u64, out: &Path, open: bool) -> Result<(), Failure> {
    let log = load_record_log(store_path, id)?;
    let record = log.get(id).context("Evaluation disappeared")?;

    cema_score::report::write_report(out, &cema_score::report::render_html(record))?;
    println!("Report written to {}", out.display());

    if open {
        cema_score::browser::open_report(out)?;
    }
    Ok(())
}

fn run_remove(store_path: &Path, id: u64) -> Result<(), Failure> {
    let mut log = store::load_log(store_path)?;
    if !log.remove(id) {
        return Err(anyhow::anyhow!("No evaluation #{} in {}", id, store_path.display()).into());
    }
    store::save_log(store_path, &log)?;
    println!("Removed evaluation #{}", id);
    Ok(())
}
