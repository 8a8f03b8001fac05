//! Match simulator CLI - fast in-memory exerciser for the scoring engine.
//!
//! Runs randomized full matches under any rule configuration, audits the
//! scoring invariants after every transition, and reports per-match JSONL
//! plus a printed summary.

mod simulator;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use scoring_engine::{GameType, MatchConfig, MatchFormat, ScoringMode};
use tracing::{info, warn};

use simulator::{MatchOutcome, Simulator, SimulatorSettings};

#[derive(Parser)]
#[command(name = "match-simulator")]
#[command(about = "Randomized full-match exerciser for the scoring engine")]
struct Args {
    /// Number of matches to simulate
    #[arg(short, long, default_value = "100")]
    matches: u32,

    /// Singles or doubles
    #[arg(long, default_value = "doubles")]
    game_type: GameTypeArg,

    /// Scoring discipline
    #[arg(long, default_value = "sideout")]
    scoring: ScoringArg,

    /// Match format
    #[arg(long, default_value = "best-of-3")]
    format: FormatArg,

    /// Target points per game
    #[arg(long, default_value = "11")]
    points: u8,

    /// Probability that team 1 wins a rally
    #[arg(long, default_value = "0.5")]
    team1_strength: f64,

    /// Probability of an undo instead of a rally
    #[arg(long, default_value = "0.02")]
    undo_rate: f64,

    /// Probability of a crash/resume drill before a rally
    #[arg(long, default_value = "0.01")]
    resume_rate: f64,

    /// Base seed (match N runs on seed + N); random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// JSONL output path for per-match results
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameTypeArg {
    Singles,
    Doubles,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScoringArg {
    Sideout,
    Rally,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Single,
    #[value(name = "best-of-3")]
    BestOf3,
    #[value(name = "best-of-5")]
    BestOf5,
}

impl From<GameTypeArg> for GameType {
    fn from(arg: GameTypeArg) -> Self {
        match arg {
            GameTypeArg::Singles => GameType::Singles,
            GameTypeArg::Doubles => GameType::Doubles,
        }
    }
}

impl From<ScoringArg> for ScoringMode {
    fn from(arg: ScoringArg) -> Self {
        match arg {
            ScoringArg::Sideout => ScoringMode::SideOut,
            ScoringArg::Rally => ScoringMode::Rally,
        }
    }
}

impl From<FormatArg> for MatchFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Single => MatchFormat::Single,
            FormatArg::BestOf3 => MatchFormat::BestOfThree,
            FormatArg::BestOf5 => MatchFormat::BestOfFive,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if args.points == 0 {
        return Err("--points must be at least 1".into());
    }

    let config = MatchConfig {
        game_type: args.game_type.into(),
        scoring_mode: args.scoring.into(),
        match_format: args.format.into(),
        points_to_win: args.points,
    };
    let settings = SimulatorSettings {
        config,
        team1_strength: args.team1_strength,
        undo_rate: args.undo_rate,
        resume_rate: args.resume_rate,
    }
    .validate()?;
    let base_seed = args.seed.unwrap_or_else(rand::random);

    info!(
        matches = args.matches,
        ?config,
        base_seed,
        "starting simulation"
    );

    let mut writer = match &args.output {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };

    let mut outcomes = Vec::new();
    let mut errors = 0u32;

    for match_no in 1..=args.matches {
        let seed = base_seed.wrapping_add(u64::from(match_no));
        let mut sim = Simulator::new(settings, seed);

        match sim.simulate_match(match_no) {
            Ok(outcome) => {
                if let Some(ref mut w) = writer {
                    writeln!(w, "{}", serde_json::to_string(&outcome)?)?;
                }
                outcomes.push(outcome);
            }
            Err(e) => {
                errors += 1;
                warn!(match_no, seed, "match failed: {e}");
            }
        }
    }

    if let Some(mut w) = writer {
        w.flush()?;
    }

    print_summary(&outcomes, errors, args.matches);

    if errors > 0 {
        return Err(format!("{errors} match(es) violated engine invariants").into());
    }
    Ok(())
}

fn print_summary(outcomes: &[MatchOutcome], errors: u32, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Matches completed: {}/{}", outcomes.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    if outcomes.is_empty() {
        return;
    }

    let mut wins = [0u32; 2];
    let mut games = 0usize;
    let mut rallies = 0u64;
    let mut undos = 0u64;
    let mut resumes = 0u64;

    for outcome in outcomes {
        wins[(outcome.winner - 1) as usize] += 1;
        games += outcome.games.len();
        rallies += u64::from(outcome.rallies);
        undos += u64::from(outcome.undos);
        resumes += u64::from(outcome.resumes);
    }

    let n = outcomes.len() as f64;
    println!(
        "Team 1 wins: {} ({:.1}%)",
        wins[0],
        wins[0] as f64 / n * 100.0
    );
    println!(
        "Team 2 wins: {} ({:.1}%)",
        wins[1],
        wins[1] as f64 / n * 100.0
    );
    println!("Average games per match: {:.2}", games as f64 / n);
    println!("Average rallies per match: {:.1}", rallies as f64 / n);
    println!("Undos applied: {undos}, resume drills: {resumes}");
}
