mod game;
mod menu;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::{LevelFilter, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use game::Session;
use treasure_game::{Difficulty, GameConfig, Journey, JourneySummary};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DifficultyArg {
    /// Calm towns, generous buy-back
    Easy,
    Normal,
    /// Rough towns, stingy buy-back
    Hard,
    /// Starts rich with every crossing item
    Test,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Normal => Self::Normal,
            DifficultyArg::Hard => Self::Hard,
            DifficultyArg::Test => Self::Test,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "treasure-cli", version)]
#[command(about = "Hunt for the crown, the trophy and the gem across procedurally generated towns")]
struct Args {
    /// Hunter name; prompted for when omitted
    #[arg(long)]
    name: Option<String>,

    /// Difficulty; prompted for when omitted
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Seed for reproducible towns; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding difficulty presets and shop prices
    #[arg(long)]
    config: Option<PathBuf>,

    /// Format of the end-of-journey report
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let cfg = load_config(args.config.as_deref())?;
    announce_banner();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock());

    let name = match args.name {
        Some(name) => name,
        None => session
            .read_line("What's your name, Hunter? ")?
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Hunter".to_string()),
    };
    let difficulty = match args.difficulty {
        Some(arg) => arg.into(),
        None => session.choose_difficulty()?,
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed {seed}");

    let mut journey = Journey::new(&name, difficulty, seed, &cfg);
    session.play(&mut journey)?;
    write_report(session.output(), args.report, &journey.summary())
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::load_from_static());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    GameConfig::from_json(&json).with_context(|| format!("invalid config {}", path.display()))
}

fn announce_banner() {
    println!("{}", "Treasure Hunter".bright_cyan().bold());
    println!("{}", "===============".cyan());
}

fn write_report(out: &mut impl Write, format: ReportFormat, summary: &JourneySummary) -> Result<()> {
    match format {
        ReportFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(summary)?)?;
        }
        ReportFormat::Console => {
            let treasures = if summary.treasures.is_empty() {
                "none".to_string()
            } else {
                summary
                    .treasures
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            writeln!(out)?;
            writeln!(out, "{}", "Journey summary".bright_cyan().bold())?;
            writeln!(out, "  Hunter: {}", summary.name)?;
            writeln!(out, "  Difficulty: {}", summary.difficulty)?;
            writeln!(out, "  Seed: {}", summary.seed)?;
            writeln!(out, "  Gold: {}", summary.gold)?;
            writeln!(out, "  Towns visited: {}", summary.towns_visited)?;
            writeln!(out, "  Treasures: {treasures}")?;
            writeln!(out, "  Status: {}", summary.status)?;
        }
    }
    out.flush()?;
    Ok(())
}
