use clap::{Parser, Subcommand};
use log::debug;
use std::io::Write;
use std::path::PathBuf;
use tradfix::{BatchOptions, Document, Error, SubstitutionPlan, load_config, run_batch};

// ============================================================================
// CLI
// ============================================================================

#[derive(Parser)]
#[command(
    name = "tradfix",
    about = "Rewrite simplified Chinese word forms into traditional ones in place"
)]
struct Cli {
    /// Config file (defaults to $TRADFIX_CONFIG, ./tradfix.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert documents in place
    Run {
        /// Documents to convert (replaces the configured list)
        documents: Vec<PathBuf>,

        /// Report patterns that matched nothing
        #[arg(short, long)]
        strict: bool,

        /// Convert without writing anything back
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
    /// Validate the substitution tables
    Check,
    /// Print one converted document to stdout without saving it
    Show {
        /// Document to convert
        path: PathBuf,
    },
}

// ============================================================================
// Commands
// ============================================================================

fn run(
    cli_config: Option<PathBuf>,
    documents: Vec<PathBuf>,
    strict: bool,
    dry_run: bool,
) -> Result<i32, Error> {
    let config = load_config(cli_config.as_deref())?;
    let plan = config.plan()?;
    let documents = if documents.is_empty() {
        config.documents
    } else {
        documents
    };
    let options = BatchOptions {
        strict: strict || config.strict,
        dry_run,
    };
    debug!("documents={documents:?} options={options:?}");

    let stdout = std::io::stdout();
    let report = run_batch(&documents, &plan, options, &mut stdout.lock())?;
    Ok(report.exit_code())
}

fn print_hazards(out: &mut impl Write, plan: &SubstitutionPlan) -> Result<(), Error> {
    for hazard in plan.rescan_hazards() {
        let pair = plan.table(hazard.pass).get(hazard.pair);
        let target = plan.table(hazard.rebuilds_pass).get(hazard.rebuilds);
        let (Some(pair), Some(target)) = (pair, target) else {
            continue;
        };
        writeln!(
            out,
            "warning: {} pair #{} ({:?} -> {:?}) can rebuild {} pattern {:?} of pair #{}",
            hazard.pass.as_str(),
            hazard.pair,
            pair.from,
            pair.to,
            hazard.rebuilds_pass.as_str(),
            target.from,
            hazard.rebuilds
        )?;
    }
    Ok(())
}

fn check(cli_config: Option<PathBuf>) -> Result<i32, Error> {
    let config = load_config(cli_config.as_deref())?;
    let plan = config.plan()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_hazards(&mut out, &plan)?;
    writeln!(
        out,
        "ok: {} pre-correction pairs, {} main pairs, {} documents",
        plan.pre_corrections.len(),
        plan.main.len(),
        config.documents.len()
    )?;
    Ok(0)
}

fn show(cli_config: Option<PathBuf>, path: PathBuf) -> Result<i32, Error> {
    let config = load_config(cli_config.as_deref())?;
    let plan = config.plan()?;
    let mut doc = Document::load(&path)?;
    let conversion = doc.convert(&plan);
    debug!("{path:?}: {} replacements", conversion.total_replacements());
    print!("{}", doc.content());
    std::io::stdout().flush()?;
    Ok(0)
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            documents,
            strict,
            dry_run,
        } => run(cli.config, documents, strict, dry_run),
        Commands::Check => check(cli.config),
        Commands::Show { path } => show(cli.config, path),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
