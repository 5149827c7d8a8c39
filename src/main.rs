use clap::Parser;
use log::{info, warn};
use petroplan::diagnostics::diagnose;
use petroplan::problem::Instance;
use petroplan::report::Report;
use petroplan::solver::{select_solver, SolveOptions, DEFAULT_PREFERENCE};
use petroplan::{Result, SupplyChainSolver};
use std::path::PathBuf;

/// Build and solve the stochastic oil supply chain planning model
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Instance file (JSON). The built-in base case is solved when omitted.
    instance: Option<PathBuf>,
    /// Solver to try, in order. May be repeated. Defaults to gurobi, then microlp.
    #[clap(short, long)]
    solver: Vec<String>,
    /// Write the model in LP format here if it turns out infeasible
    #[clap(long)]
    lp_out: Option<PathBuf>,
    /// Write the non-zero solution values as JSON here
    #[clap(long)]
    json_out: Option<PathBuf>,
    /// Tolerance of the infeasibility diagnostics, and below which values are not reported
    #[clap(long, default_value = "1e-6")]
    tolerance: f64,
    /// Solver time limit in seconds
    #[clap(long)]
    time_limit: Option<f64>,
    /// Suppress the solver's own log output
    #[clap(long)]
    quiet_solver: bool,
    #[clap(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    let instance = match &args.instance {
        Some(path) => {
            info!("Loading instance from {}", path.display());
            Instance::from_path(path)?
        }
        None => Instance::base_case(),
    };

    let solver = match args.solver.is_empty() {
        true => select_solver(DEFAULT_PREFERENCE)?,
        false => select_solver(&args.solver[..])?,
    };

    let options = SolveOptions {
        time_limit: args.time_limit,
        quiet: args.quiet_solver,
    };
    let (model, outcome) = SupplyChainSolver::solve(&instance, solver.as_ref(), &options)?;

    if let Some(values) = &outcome.values {
        info!(
            "Largest constraint or bound violation: {:e}",
            model.definition.max_violation(values)
        );
    }

    if !outcome.status.has_solution() {
        let findings = diagnose(&model.definition, &outcome, args.tolerance);
        info!("{} diagnostic findings", findings.len());
    }

    if let Some(path) = args.lp_out.as_ref().filter(|_| outcome.status.may_be_infeasible()) {
        model.definition.write(path)?;
        warn!("Model ({}) written to {}", outcome.status, path.display());
    }

    let report = Report::new(&model.definition, &outcome).with_threshold(args.tolerance);
    print!("{}", report);

    if let Some(path) = &args.json_out {
        report.write_json(path)?;
        info!("Solution written to {}", path.display());
    }

    Ok(())
}

pub fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        true => "info",
        false => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
