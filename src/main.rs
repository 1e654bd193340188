use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use configuration::{Config, ConfigArgs, init_logging};
use core_types::{StrategyId, SymbolMethod};
use divination::geomancy;
use divination::iching::IChingReading;
use futures::future::join_all;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use replay::{ReplayReport, Replayer, load_klines_csv};
use std::path::{Path, PathBuf};
use strategies::create_strategy;

/// The main entry point for the Geomancer application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional; it may carry GEOMANCER__* overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli
        .config
        .load(cli.command.strategy())
        .with_context(|| format!("Failed to load configuration from {}", cli.config.config.display()))?;
    let _log_guard = init_logging(&config.logging)?;
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Replay(args) => handle_replay(args, config).await,
        Commands::Chart(args) => handle_chart(args),
        Commands::Reading(args) => handle_reading(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Reads geomantic, I-Ching and Ba Zi signals from candle data.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a strategy over one or more candle files.
    Replay(ReplayArgs),
    /// Print the geomantic chart cast from the newest candles of a file.
    Chart(ReadingArgs),
    /// Print the I-Ching reading of the newest candles of a file.
    Reading(ReadingArgs),
}

impl Commands {
    /// The strategy whose configuration section the command-line overrides apply to.
    fn strategy(&self) -> StrategyId {
        match self {
            Commands::Replay(args) => args.strategy,
            Commands::Chart(_) => StrategyId::Geomancy,
            Commands::Reading(_) => StrategyId::IChing,
        }
    }
}

#[derive(Parser)]
struct ReplayArgs {
    /// The strategy to replay: geomancy, iching, bazi or astro-ma.
    #[arg(long)]
    strategy: StrategyId,

    /// Candle CSV files (timestamp,open,high,low,close,volume). Each is replayed concurrently.
    #[arg(long = "file", required = true)]
    files: Vec<PathBuf>,

    /// The interval of the candles (e.g., "1h", "4h", "1d").
    #[arg(long, default_value = "1h")]
    interval: String,

    /// Print the reports as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ReadingArgs {
    /// Candle CSV file (timestamp,open,high,low,close,volume).
    #[arg(long)]
    file: PathBuf,

    /// The interval of the candles (e.g., "1h", "4h", "1d").
    #[arg(long, default_value = "1h")]
    interval: String,

    /// How lines are drawn from candles: color, price, returns or log-returns.
    #[arg(long, default_value = "color")]
    method: SymbolMethod,
}

// ==============================================================================
// Replay Command Logic
// ==============================================================================

/// Replays every file on its own blocking task and prints one summary.
async fn handle_replay(args: ReplayArgs, config: Config) -> anyhow::Result<()> {
    let progress = if args.json {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    } else {
        MultiProgress::new()
    };

    let tasks: Vec<_> = args
        .files
        .iter()
        .map(|path| {
            let path = path.clone();
            let config = config.clone();
            let interval = args.interval.clone();
            let strategy_id = args.strategy;
            let bar = progress.add(ProgressBar::new(0));

            tokio::task::spawn_blocking(move || -> anyhow::Result<ReplayReport> {
                let symbol = symbol_from_path(&path);
                let klines = load_klines_csv(&path, &interval)
                    .with_context(|| format!("Failed to load candles from {}", path.display()))?;
                let strategy = create_strategy(strategy_id, &config, &symbol, None)?;
                let mut replayer = Replayer::new(symbol, strategy).with_progress(bar);
                let report = replayer
                    .run(&klines)
                    .with_context(|| format!("Replay of {} failed", path.display()))?;
                Ok(report)
            })
        })
        .collect();

    // Wait for all concurrent replays to complete
    let results = join_all(tasks).await;

    let mut reports = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(Ok(report)) => reports.push(report),
            Ok(Err(e)) => eprintln!("A replay failed: {:#}", e),
            Err(e) => eprintln!("A replay task failed: {}", e),
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("{}", replay_table(args.strategy, &reports));
    }

    if reports.len() < args.files.len() {
        anyhow::bail!("{} of {} replays failed", args.files.len() - reports.len(), args.files.len());
    }
    Ok(())
}

/// The file stem names the market, e.g. `data/BTCUSDT.csv` replays as `BTCUSDT`.
fn symbol_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

fn replay_table(strategy: StrategyId, reports: &[ReplayReport]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Symbol", "Strategy", "From", "To", "Candles", "Buys", "Sells", "Faults"]);
    for report in reports {
        table.add_row(vec![
            report.symbol.clone(),
            strategy.to_string(),
            report.first_candle.format("%Y-%m-%d %H:%M").to_string(),
            report.last_candle.format("%Y-%m-%d %H:%M").to_string(),
            report.candles.to_string(),
            report.buys().to_string(),
            report.sells().to_string(),
            report.faults.len().to_string(),
        ]);
    }
    table
}

// ==============================================================================
// Chart and Reading Command Logic
// ==============================================================================

fn handle_chart(args: ReadingArgs) -> anyhow::Result<()> {
    let klines = load_klines_csv(&args.file, &args.interval)
        .with_context(|| format!("Failed to load candles from {}", args.file.display()))?;
    let (chart, decision) = geomancy::divine(args.method, &klines)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Position", "Figure", "Nature"]);
    for (position, figure) in chart.figures()? {
        table.add_row(vec![position.label(), figure.to_string(), format!("{:?}", figure.nature())]);
    }
    println!("{}", table);
    println!("Part of Fortune: house {} ({})", chart.part_of_fortune, decision.fortune);
    println!("Decision: {} (from {:?})", decision.direction, decision.source);
    Ok(())
}

fn handle_reading(args: ReadingArgs) -> anyhow::Result<()> {
    let klines = load_klines_csv(&args.file, &args.interval)
        .with_context(|| format!("Failed to load candles from {}", args.file.display()))?;
    let reading = IChingReading::read(args.method, &klines)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Figure", "Name", "Polarity"]);
    table.add_row(vec![
        format!("Hexagram {}", reading.hexagram.king_wen_number()),
        reading.hexagram.to_string(),
        String::new(),
    ]);
    table.add_row(vec!["Trigram".to_string(), reading.trigram.to_string(), format!("{:?}", reading.trigram.polarity())]);
    table.add_row(vec!["Bigram".to_string(), reading.bigram.to_string(), format!("{:?}", reading.bigram.polarity())]);
    println!("{}", table);
    println!("Direction: {}", reading.direction);
    Ok(())
}
