mod reports;
mod store;
mod util;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use league_engine::{League, LeagueEngine, ScoringRules};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use store::JsonFileStore;
use util::{parse_knockouts, parse_results};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    /// Coloured table for the terminal
    Console,
    /// Standing rows as JSON
    Json,
    /// Markdown table with a column per game
    Markdown,
    /// Comma-separated rows with a column per game
    Csv,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List registered players
    Players,
    /// Register a player and print the assigned id
    AddPlayer {
        /// Display name
        name: String,
    },
    /// Record a game in a season
    AddGame {
        /// Season name (created on first use)
        #[arg(long)]
        season: String,
        /// Finishing order, winner first (comma-separated ids or names)
        #[arg(long)]
        results: String,
        /// Knockouts as perpetrator:victim pairs (comma-separated)
        #[arg(long, default_value = "")]
        knockouts: String,
        /// Date label for the game (defaults to today, YYYY-M-D)
        #[arg(long)]
        date: Option<String>,
    },
    /// Print the ranked table for a season
    Standings {
        #[arg(long)]
        season: String,
        /// Output report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
        report: ReportFormat,
    },
    /// Print the narrative log for a season
    Log {
        #[arg(long)]
        season: String,
    },
}

#[derive(Debug, Parser)]
#[command(name = "league", version)]
#[command(about = "Record league games and print season standings")]
struct Args {
    /// Directory holding players.json and seasons.json
    #[arg(long, global = true, default_value = "league-data")]
    data: PathBuf,

    /// Optional scoring rules file (JSON)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Optional path to write output instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rules = load_rules(args.rules.as_deref())?;
    let store = JsonFileStore::new(&args.data);
    let engine = LeagueEngine::with_rules(store.clone(), store.clone(), rules);
    let mut league = engine
        .load_league()
        .with_context(|| format!("failed to load league from {}", store.dir().display()))?;
    let mut out = Sink::open(args.output.as_deref())?;

    match args.command {
        Command::Players => list_players(&league, &mut out)?,
        Command::AddPlayer { name } => {
            let id = league.add_player(name.trim())?;
            engine.save_league(&league)?;
            info!("registered {name} as {id}");
            writeln!(out, "{} {}", "✅ Registered".green(), id)?;
        }
        Command::AddGame {
            season,
            results,
            knockouts,
            date,
        } => {
            let results = parse_results(&results, league.directory())?;
            let knockouts = parse_knockouts(&knockouts, league.directory())?;
            let date = date.unwrap_or_else(today);
            let sheet = league.record_game(&season, date, results, knockouts)?;
            engine.save_league(&league)?;
            writeln!(
                out,
                "{} game {} in {season}",
                "✅ Recorded".green(),
                sheet.game_index + 1
            )?;
            for points in &sheet.finishers {
                writeln!(
                    out,
                    "  {:>2}. {:<20} {:>3} (+{} bonus)",
                    points.place + 1,
                    league.directory().name_of(points.player),
                    points.total(),
                    points.bonus()
                )?;
            }
        }
        Command::Standings { season, report } => {
            let Some(season) = league.season(&season) else {
                bail!("no season named {season:?}");
            };
            let rows = season.standings(league.directory())?;
            match report {
                ReportFormat::Console => {
                    reports::generate_console_report(&mut out, season.name(), &rows)?;
                }
                ReportFormat::Json => reports::generate_json_report(&mut out, &rows)?,
                ReportFormat::Markdown => {
                    reports::generate_markdown_report(&mut out, season.name(), &rows)?;
                }
                ReportFormat::Csv => reports::generate_csv_report(&mut out, &rows)?,
            }
        }
        Command::Log { season } => {
            let Some(season) = league.season(&season) else {
                bail!("no season named {season:?}");
            };
            for line in season.log().render(league.directory()) {
                writeln!(out, "{line}")?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn load_rules(path: Option<&Path>) -> Result<ScoringRules> {
    let Some(path) = path else {
        return Ok(ScoringRules::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    ScoringRules::from_json(&raw).with_context(|| format!("invalid rules in {}", path.display()))
}

fn today() -> String {
    chrono::Local::now().format("%Y-%-m-%-d").to_string()
}

fn list_players(league: &League, out: &mut dyn Write) -> Result<()> {
    if league.directory().is_empty() {
        writeln!(out, "No players registered.")?;
        return Ok(());
    }
    writeln!(out, "{}", "Registered players:".bright_cyan().bold())?;
    for player in league.directory().iter() {
        writeln!(out, "  {:>5}  {}", player.id.0, player.name)?;
    }
    Ok(())
}

/// Buffered destination for command output: stdout or `--output <file>`.
struct Sink(BufWriter<Box<dyn Write>>);

impl Sink {
    fn open(path: Option<&Path>) -> Result<Self> {
        let inner: Box<dyn Write> = match path {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?,
            ),
            None => Box::new(stdout()),
        };
        Ok(Self(BufWriter::new(inner)))
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()
    }
}
