use clap::{Parser, Subcommand, ValueEnum};
use pl_app::{
    AppResult, ExperimentKind, Reduce, RunRequest, SweepRequest, load_config_or_default,
    load_run_config, menu_tree, run_service, run_sweep, summarize,
};
use pl_controls::ParamEdit;
use pl_results::{RunStore, SampleRecord, records_to_csv, series_to_csv};
use pl_sim::Sample;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pl-cli")]
#[command(about = "physlab CLI - headless mechanics experiments", long_about = None)]
struct Cli {
    /// Lab config YAML (display settings and run defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List experiments by group
    List,
    /// Show an experiment's parameters and recorded metrics
    Params {
        /// Experiment key or route (e.g. free-fall, /mechanics/forces/equilibrium)
        experiment: ExperimentKind,
    },
    /// Run an experiment at a fixed step
    Run {
        /// Experiment key or route. Optional when --run-config names one
        experiment: Option<ExperimentKind>,
        /// Time step in seconds
        #[arg(long)]
        dt: Option<f64>,
        /// End time in seconds
        #[arg(long)]
        t_end: Option<f64>,
        /// Parameter override, repeatable (e.g. --set y0=45)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        edits: Vec<ParamEdit>,
        /// Run description YAML
        #[arg(long)]
        run_config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Save the run under this directory
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Run one parameter across a range and reduce a metric per run
    Sweep {
        experiment: ExperimentKind,
        #[arg(long)]
        param: String,
        #[arg(long)]
        from: f64,
        #[arg(long)]
        to: f64,
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Sample key to reduce
        #[arg(long)]
        metric: String,
        /// final, max or min
        #[arg(long, default_value_t = Reduce::Final)]
        reduce: Reduce,
        #[arg(long)]
        dt: Option<f64>,
        #[arg(long)]
        t_end: Option<f64>,
        /// Fixed override applied to every run
        #[arg(long = "set", value_name = "KEY=VALUE")]
        edits: Vec<ParamEdit>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List saved runs
    Runs {
        /// Run store directory
        store: PathBuf,
        #[arg(long)]
        experiment: Option<ExperimentKind>,
    },
    /// Show a saved run
    ShowRun {
        /// Run store directory
        store: PathBuf,
        run_id: String,
        /// Print every sample as CSV
        #[arg(long)]
        csv: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = load_config_or_default(cli.config.as_deref())?;
    tracing::debug!(dt_s = config.run.dt_s, t_end_s = config.run.t_end_s, "run defaults");

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Params { experiment } => cmd_params(experiment),
        Commands::Run {
            experiment,
            dt,
            t_end,
            edits,
            run_config,
            format,
            save,
        } => {
            let mut request = match (run_config, experiment) {
                (Some(path), kind) => {
                    let mut request = load_run_config(&path)?.to_request(&config.run)?;
                    // The command line wins over the file.
                    if let Some(kind) = kind {
                        request.experiment = kind;
                    }
                    request
                }
                (None, Some(kind)) => base_request(kind, &config.run),
                (None, None) => {
                    return Err(pl_app::AppError::InvalidInput(
                        "an experiment or --run-config is required".to_string(),
                    ));
                }
            };
            apply_overrides(&mut request, dt, t_end, edits);
            cmd_run(&request, format, save.as_deref())
        }
        Commands::Sweep {
            experiment,
            param,
            from,
            to,
            points,
            metric,
            reduce,
            dt,
            t_end,
            edits,
            format,
        } => {
            let mut base = base_request(experiment, &config.run);
            apply_overrides(&mut base, dt, t_end, edits);
            let request = SweepRequest {
                base,
                param,
                from,
                to,
                points,
                metric,
                reduce,
            };
            cmd_sweep(&request, format)
        }
        Commands::Runs { store, experiment } => cmd_runs(&store, experiment),
        Commands::ShowRun { store, run_id, csv } => cmd_show_run(&store, &run_id, csv),
    }
}

fn base_request(kind: ExperimentKind, defaults: &pl_app::RunDefaults) -> RunRequest {
    RunRequest {
        dt_s: defaults.dt_s,
        t_end_s: defaults.t_end_s,
        max_steps: defaults.max_steps,
        capacity: defaults.capacity(),
        ..RunRequest::new(kind)
    }
}

fn apply_overrides(
    request: &mut RunRequest,
    dt: Option<f64>,
    t_end: Option<f64>,
    edits: Vec<ParamEdit>,
) {
    if let Some(dt) = dt {
        request.dt_s = dt;
    }
    if let Some(t_end) = t_end {
        request.t_end_s = t_end;
    }
    request.edits.extend(edits);
}

fn cmd_list() -> AppResult<()> {
    for root in menu_tree() {
        println!("{}", root.label);
        for group in &root.children {
            println!("  {}", group.label);
            for leaf in &group.children {
                println!("    {:<40} {}", leaf.route.as_deref().unwrap_or(""), leaf.label);
            }
        }
    }
    Ok(())
}

fn cmd_params(kind: ExperimentKind) -> AppResult<()> {
    let exp = kind.open();
    println!("{} ({})", kind.name(), kind.route());
    if !exp.playable() {
        println!("  static experiment: runs yield a single sample");
    }

    println!("\nParameters:");
    for (spec, value) in exp.param_values() {
        let range = match (spec.min, spec.max) {
            _ if spec.readonly => "read-only".to_string(),
            _ if spec.is_toggle() => "toggle".to_string(),
            (Some(min), Some(max)) => format!("[{}, {}]", min, max),
            _ => String::new(),
        };
        println!(
            "  {:<16} {:>14} {:<12} {}",
            spec.key,
            spec.format_value(value),
            range,
            spec.label
        );
    }

    println!("\nMetrics:");
    for metric in exp.metrics() {
        println!("  {:<22} {}", metric.key, metric.display_name());
    }
    let (x, y) = kind.default_chart();
    println!("\nDefault chart: {} vs {}", y, x);
    Ok(())
}

#[derive(Serialize)]
struct RunJson<'a> {
    experiment: &'a str,
    params: &'a BTreeMap<String, f64>,
    dt_s: f64,
    t_end_s: f64,
    steps: usize,
    completed: bool,
    samples: Vec<&'a Sample>,
}

fn cmd_run(request: &RunRequest, format: OutputFormat, save: Option<&Path>) -> AppResult<()> {
    let response = run_service::run(request)?;

    let saved = match save {
        Some(dir) => {
            let store = RunStore::new(dir)?;
            Some(run_service::save_run(&store, &response)?)
        }
        None => None,
    };

    match format {
        OutputFormat::Csv => print!("{}", series_to_csv(&response.series)),
        OutputFormat::Json => {
            let body = RunJson {
                experiment: request.experiment.key(),
                params: &response.params,
                dt_s: response.dt_s,
                t_end_s: response.t_end_s,
                steps: response.stats.steps,
                completed: response.stats.completed,
                samples: response.series.iter().collect(),
            };
            println!("{}", to_json(&body)?);
        }
        OutputFormat::Table => {
            println!("Running {} ({})", request.experiment.name(), request.experiment.key());
            println!(
                "  dt = {:.4} s, t_end = {:.3} s, steps = {}",
                response.dt_s, response.t_end_s, response.stats.steps
            );
            if !response.stats.completed {
                println!("  stopped early at t = {:.3} s", response.stats.elapsed);
            }
            println!("  wall time: {:.3} s", response.wall_time_s);

            println!("\nParameters:");
            for (key, value) in &response.params {
                println!("  {:<16} {}", key, value);
            }

            println!("\nMetrics ({} samples):", response.series.len());
            println!(
                "  {:<22} {:>12} {:>12} {:>12}",
                "key", "min", "max", "final"
            );
            for key in response.series.keys() {
                if let Some(s) = summarize(&response.series, key) {
                    println!(
                        "  {:<22} {:>12.4} {:>12.4} {:>12.4}",
                        key, s.min, s.max, s.final_value
                    );
                }
            }
        }
    }

    if let Some(manifest) = saved {
        // Keep stdout clean for machine formats.
        eprintln!("✓ Saved run: {}", manifest.run_id);
    }
    Ok(())
}

fn cmd_sweep(request: &SweepRequest, format: OutputFormat) -> AppResult<()> {
    let points = run_sweep(request)?;
    match format {
        OutputFormat::Json => println!("{}", to_json(&points)?),
        OutputFormat::Csv | OutputFormat::Table => {
            let mut csv = format!("{},{}({})\n", request.param, request.reduce, request.metric);
            for p in &points {
                csv.push_str(&format!("{},{}\n", p.value, p.result));
            }
            print!("{}", csv);
        }
    }
    Ok(())
}

fn cmd_runs(store: &Path, experiment: Option<ExperimentKind>) -> AppResult<()> {
    let runs = run_service::list_runs(store, experiment)?;

    if runs.is_empty() {
        println!("No saved runs in {}", store.display());
    } else {
        println!("Saved runs in {}:", store.display());
        for manifest in runs {
            println!(
                "  {} {:<22} {} ({} steps)",
                manifest.run_id, manifest.experiment, manifest.timestamp, manifest.timing.steps
            );
        }
    }
    Ok(())
}

fn cmd_show_run(store: &Path, run_id: &str, csv: bool) -> AppResult<()> {
    let (manifest, records) = run_service::load_run(store, run_id)?;
    if csv {
        print!("{}", records_to_csv(&manifest.columns, &records));
        return Ok(());
    }

    println!("Run {}", manifest.run_id);
    println!("  Experiment: {}", manifest.experiment);
    println!("  Saved: {}", manifest.timestamp);
    println!(
        "  dt = {:.4} s, t_end = {:.3} s, steps = {}",
        manifest.timing.dt_s, manifest.timing.t_end_s, manifest.timing.steps
    );
    println!("  Samples: {}", records.len());

    println!("\nParameters:");
    for (key, value) in &manifest.params {
        println!("  {:<16} {}", key, value);
    }

    println!("\nFinal sample:");
    if let Some(last) = records.last() {
        print_record(&manifest.columns, last);
    }
    Ok(())
}

fn print_record(columns: &[String], record: &SampleRecord) {
    for key in columns {
        if let Some(value) = record.get(key) {
            println!("  {:<22} {:.4}", key, value);
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| pl_app::AppError::InvalidInput(format!("Failed to serialize output: {}", e)))
}
