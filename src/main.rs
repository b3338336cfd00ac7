use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::Rng;

use earth_view::asset::{Asset, HttpEndpoint, Prober};
use earth_view::config::{self, Config};
use earth_view::output::{self, DEFAULT_LIST_FILENAME};
use earth_view::scanner::{QueueObserver, ScanError, Scanner};
use earth_view::ui;

#[derive(Parser, Debug)]
#[command(name = "earth-view")]
#[command(version = "1.0.0")]
#[command(about = "Google Earth View asset scanner and fetcher", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe the known identifier range and list valid asset ids
    #[command(visible_alias = "ls")]
    List(ListArgs),
    /// Download an asset image by its identifier
    #[command(visible_aliases = ["get", "download", "dl"])]
    Fetch(FetchArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Number of parallel calls to gstatic.com. Using a high value may
    /// result in potentially wrong failures to fetch images
    #[arg(short, long, default_value_t = config::DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Number of retries before skipping an image in case of non 200 HTTP
    /// status code
    #[arg(short, long, default_value_t = config::DEFAULT_MAX_RETRIES)]
    retry: u32,

    /// Write to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not output anything
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Parser, Debug)]
#[command(args_conflicts_with_subcommands = true)]
struct FetchArgs {
    #[command(subcommand)]
    command: Option<FetchCommand>,

    /// Asset identifier to download
    #[arg(value_name = "IDENTIFIER")]
    identifier: Option<u32>,

    /// Write to given file path instead of current working directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Download again even if the file already exists
    #[arg(long)]
    overwrite: bool,
}

#[derive(Subcommand, Debug)]
enum FetchCommand {
    /// Download a random image, from the known range or an id list
    #[command(visible_aliases = ["rnd", "rand"])]
    Random(RandomArgs),
}

#[derive(Parser, Debug)]
struct RandomArgs {
    /// JSON identifier list to pick from (output of the list command)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write to given file path instead of current working directory
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match &args.command {
        Command::List(list) => run_list(list),
        Command::Fetch(fetch) => run_fetch(fetch),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red());
            ExitCode::FAILURE
        }
    }
}

fn run_list(args: &ListArgs) -> anyhow::Result<ExitCode> {
    if args.output.is_none() && args.quiet {
        bail!("--quiet cannot be provided when --output is not set");
    }

    let config = Config {
        batch_size: args.batch_size,
        max_retries: args.retry,
        ..Config::default()
    };

    let endpoint = HttpEndpoint::from_config(&config).context("failed to build HTTP client")?;
    let prober = Prober::new(endpoint, config.max_retries);
    let scanner = Scanner::new(
        prober,
        config.lower_bound,
        config.upper_bound,
        config.batch_size,
    );
    let total = scanner.total();
    let cancel = scanner.cancel_flag();
    ctrlc::set_handler(move || cancel.cancel())
        .context("failed to register interrupt handler")?;

    let (observer, events) = QueueObserver::with_capacity(total.max(1));
    let quiet = args.quiet;

    // The scan runs on a worker thread; the main thread drains progress
    // events until the observer hangs up.
    let worker = thread::spawn(move || scanner.run(&observer));
    let counters = ui::render_scan(events, total as u64, quiet);
    log::debug!(
        "scan drained: {} found, {} skipped, {} errored",
        counters.found,
        counters.skipped,
        counters.errored
    );

    let report = match worker.join() {
        Ok(Ok(report)) => report,
        Ok(Err(ScanError::Aborted)) => {
            if !quiet {
                eprintln!("{}", "Operation aborted before end".red());
            }
            return Ok(ExitCode::FAILURE);
        }
        Ok(Err(err)) => return Err(err.into()),
        Err(_) => bail!("scan worker panicked"),
    };

    if !report.failures.is_empty() && !quiet {
        eprintln!("Encountered the following errors:");
        for failure in &report.failures {
            eprintln!("  {failure}");
        }
        eprintln!();
    }

    if report.is_empty() {
        if !quiet {
            eprintln!("No results to save");
        }
        return Ok(ExitCode::FAILURE);
    }

    let json = output::json_id_list(&report.found)?;

    match &args.output {
        None => println!("{}", String::from_utf8_lossy(&json)),
        Some(path) => {
            let target = output::resolve_out_path(path, DEFAULT_LIST_FILENAME)?;
            output::write_file(&json, &target)
                .with_context(|| format!("failed to write {}", target.display()))?;
            if !quiet {
                println!("Results saved to {}", target.display());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_fetch(args: &FetchArgs) -> anyhow::Result<ExitCode> {
    if let Some(FetchCommand::Random(random)) = &args.command {
        return run_fetch_random(random);
    }

    let id = args
        .identifier
        .ok_or_else(|| anyhow!("missing required argument 'identifier'"))?;

    let config = Config::default();
    let endpoint = HttpEndpoint::from_config(&config).context("failed to build HTTP client")?;

    let out = args.output.clone().unwrap_or_default();
    let target = output::resolve_out_path(&out, &format!("{id}.jpeg"))?;

    // Skip the download when the file is already there, unless asked not to
    if !target.exists() || args.overwrite {
        let content = Asset::new(id).content(&endpoint)?;
        output::write_file(&content, &target)
            .with_context(|| format!("failed to write {}", target.display()))?;
    }

    println!("{}", target.display());
    Ok(ExitCode::SUCCESS)
}

fn run_fetch_random(args: &RandomArgs) -> anyhow::Result<ExitCode> {
    let config = Config::default();
    let endpoint = HttpEndpoint::from_config(&config).context("failed to build HTTP client")?;

    let pool = match &args.input {
        Some(path) => {
            let content =
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            let ids: Vec<u32> = serde_json::from_slice(&content)
                .context("input is not a JSON array of identifiers")?;
            if ids.is_empty() {
                bail!("input file contains no identifiers");
            }
            Some(ids)
        }
        None => None,
    };

    let mut rng = rand::rng();

    // Keep picking until a valid asset turns up
    let (id, content) = loop {
        let id = match &pool {
            Some(ids) => ids[rng.random_range(0..ids.len())],
            None => rng.random_range(config.lower_bound..config.upper_bound),
        };

        match Asset::new(id).content(&endpoint) {
            Ok(content) => break (id, content),
            Err(err) => log::debug!("[{id}] rejected: {err}"),
        }
    };

    let out = args.output.clone().unwrap_or_default();
    let target = output::resolve_out_path(&out, &format!("{id}.jpeg"))?;
    output::write_file(&content, &target)
        .with_context(|| format!("failed to write {}", target.display()))?;

    println!("{}", target.display());
    Ok(ExitCode::SUCCESS)
}
