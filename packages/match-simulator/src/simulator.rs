//! In-memory match runner: drives the scoring engine with randomized rally
//! outcomes, sprinkling in undos and crash/resume drills, and audits the
//! rule invariants after every transition.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scoring_engine::{Event, MatchConfig, Phase, ScoringEngine, ScoringMode, Team};
use serde::Serialize;
use tracing::debug;

/// Hard ceiling on events per match; hitting it means the engine stopped
/// making progress and the run is reported as an error.
const MAX_EVENTS: u32 = 1_000_000;

#[derive(Debug, Clone, Copy)]
pub struct SimulatorSettings {
    pub config: MatchConfig,
    /// Probability that team 1 wins any given rally.
    pub team1_strength: f64,
    /// Probability of taking back the latest mutation instead of playing on.
    pub undo_rate: f64,
    /// Probability of a crash/resume drill before any given rally.
    pub resume_rate: f64,
}

impl SimulatorSettings {
    /// The rates are probabilities fed to `Rng::random_bool`, which panics
    /// outside [0, 1]; reject such input up front instead.
    pub fn validate(self) -> Result<Self, String> {
        for (name, value) in [
            ("team1-strength", self.team1_strength),
            ("undo-rate", self.undo_rate),
            ("resume-rate", self.resume_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("--{name} must be within 0.0..=1.0, got {value}"));
            }
        }
        Ok(self)
    }
}

/// One finished game within a match.
#[derive(Debug, Clone, Serialize)]
pub struct GameLine {
    pub game_number: u8,
    pub scores: [u8; 2],
    pub winner: Team,
}

/// Result of one simulated match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub match_no: u32,
    pub seed: u64,
    pub winner: Team,
    pub games: Vec<GameLine>,
    pub games_won: [u8; 2],
    pub rallies: u32,
    pub undos: u32,
    pub resumes: u32,
}

pub struct Simulator {
    settings: SimulatorSettings,
    rng: StdRng,
    seed: u64,
}

impl Simulator {
    pub fn new(settings: SimulatorSettings, seed: u64) -> Self {
        Self {
            settings,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Play one full match to `MatchOver`, auditing invariants throughout.
    pub fn simulate_match(&mut self, match_no: u32) -> Result<MatchOutcome, String> {
        self.settings.validate()?;
        let config = self.settings.config;
        let mut engine = ScoringEngine::new(config);
        engine.send(Event::StartGame);

        let mut games = Vec::new();
        let mut rallies = 0u32;
        let mut undos = 0u32;
        let mut resumes = 0u32;

        for _ in 0..MAX_EVENTS {
            match engine.phase() {
                Phase::Serving => {
                    if self.rng.random_bool(self.settings.resume_rate) {
                        engine = self.crash_and_resume(&engine)?;
                        resumes += 1;
                        continue;
                    }
                    if engine.view().can_undo && self.rng.random_bool(self.settings.undo_rate) {
                        engine.send(Event::Undo);
                        undos += 1;
                        continue;
                    }

                    let winner: Team = if self.rng.random_bool(self.settings.team1_strength) {
                        1
                    } else {
                        2
                    };
                    rallies += 1;

                    // Side-out play: a rally lost by the serving team moves
                    // the serve instead of the score.
                    if config.scoring_mode == ScoringMode::SideOut
                        && winner != engine.context().serving_team
                    {
                        engine.send(Event::SideOut);
                    } else {
                        engine.send(Event::ScorePoint { team: winner });
                    }

                    if engine.phase() != Phase::Serving {
                        audit_game_end(&engine, config)?;
                    }
                }
                Phase::BetweenGames => {
                    games.push(finished_game(&engine));
                    engine.send(Event::StartNextGame);
                }
                Phase::MatchOver => {
                    games.push(finished_game(&engine));
                    let view = engine.view();
                    let winner = match_winner(view.games_won, view.games_to_win)?;
                    debug!(match_no, winner, games = games.len(), "match finished");
                    return Ok(MatchOutcome {
                        match_no,
                        seed: self.seed,
                        winner,
                        games,
                        games_won: view.games_won,
                        rallies,
                        undos,
                        resumes,
                    });
                }
                Phase::Pregame => return Err("engine fell back to pregame".into()),
            }
        }

        Err(format!("match {match_no} exceeded {MAX_EVENTS} events without finishing"))
    }

    /// Crash drill: persist the resume blob, throw the engine away, and
    /// rebuild from the blob the way a restarted host would.
    fn crash_and_resume(&mut self, engine: &ScoringEngine) -> Result<ScoringEngine, String> {
        let config = self.settings.config;
        let before = engine.view();

        let blob = serde_json::to_string(&before.resume_state())
            .map_err(|e| format!("serialize resume state: {e}"))?;
        let state: scoring_engine::ResumeState =
            serde_json::from_str(&blob).map_err(|e| format!("deserialize resume state: {e}"))?;

        state
            .check_against(&config)
            .map_err(|e| format!("persisted state failed validation: {e}"))?;

        let mut resumed = ScoringEngine::new(config);
        resumed.send(Event::Resume { config, state });

        let after = resumed.view();
        if after.phase != before.phase
            || after.scores != before.scores
            || after.serving_team != before.serving_team
            || after.server_number != before.server_number
            || after.game_number != before.game_number
            || after.games_won != before.games_won
        {
            return Err(format!(
                "resume drifted: before={before:?} after={after:?}"
            ));
        }
        if after.can_undo {
            return Err("resumed engine kept undo history".into());
        }
        Ok(resumed)
    }
}

/// Snapshot the game that just finished (scores are still live until the
/// next game starts).
fn finished_game(engine: &ScoringEngine) -> GameLine {
    let view = engine.view();
    let winner: Team = if view.scores[0] > view.scores[1] { 1 } else { 2 };
    GameLine {
        game_number: view.game_number,
        scores: view.scores,
        winner,
    }
}

/// Win-by-2 audit at every game boundary.
fn audit_game_end(engine: &ScoringEngine, config: MatchConfig) -> Result<(), String> {
    let view = engine.view();
    let (hi, lo) = if view.scores[0] >= view.scores[1] {
        (view.scores[0], view.scores[1])
    } else {
        (view.scores[1], view.scores[0])
    };
    if hi < config.points_to_win || hi - lo < 2 {
        return Err(format!(
            "game ended illegally at {:?} (target {})",
            view.scores, config.points_to_win
        ));
    }
    Ok(())
}

fn match_winner(games_won: [u8; 2], games_to_win: u8) -> Result<Team, String> {
    match (games_won[0] >= games_to_win, games_won[1] >= games_to_win) {
        (true, false) => Ok(1),
        (false, true) => Ok(2),
        _ => Err(format!(
            "match over without exactly one winner: {games_won:?}"
        )),
    }
}
