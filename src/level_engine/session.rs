//! Gameplay session controller.
//!
//! `GameSession` closes the loop between the pure pieces of the engine: it
//! serves a level, feeds each guess through the hint evaluator, folds the
//! finished level into the player's stats and regenerates skill metrics for
//! the next level.
//!
//! The controller owns no clock. Every event carries the caller's wall-clock
//! time in milliseconds, and elapsed time is always derived from a single
//! `started_at` timestamp instead of a running counter, so pausing and
//! resuming is a matter of shifting that one timestamp.

use std::fmt;
use std::mem;

use tracing::{debug, info, warn};

use crate::level_engine::{
    config::EngineConfig,
    error::SessionError,
    generator::generate_level_with,
    hints::evaluate_guess,
    models::{Feedback, GuessResult, LevelParams, LevelResult, PlayerStats, SkillMetrics},
    rng::fresh_seed,
    skill::{build_level_result, derive_skill_metrics_with, record_outcome_with},
};

/// Immutable snapshot of where the player is. Every event replaces it.
#[derive(Debug, Clone, PartialEq)]
pub enum GameState {
    Idle,
    Playing {
        level: LevelParams,
        guesses: Vec<GuessResult>,
        started_at: u64,
    },
    Paused {
        level: LevelParams,
        guesses: Vec<GuessResult>,
        elapsed_ms: u64,
    },
    Finished {
        level: LevelParams,
        result: LevelResult,
        elapsed_ms: u64,
    },
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::Idle            => "idle",
            GameState::Playing { .. }  => "playing",
            GameState::Paused { .. }   => "paused",
            GameState::Finished { .. } => "finished",
        }
    }

    pub fn level(&self) -> Option<&LevelParams> {
        match self {
            GameState::Idle => None,
            GameState::Playing { level, .. }
            | GameState::Paused { level, .. }
            | GameState::Finished { level, .. } => Some(level),
        }
    }

    /// Guesses made on the current level, in order.
    pub fn guesses(&self) -> &[GuessResult] {
        match self {
            GameState::Idle => &[],
            GameState::Playing { guesses, .. } | GameState::Paused { guesses, .. } => guesses,
            GameState::Finished { result, .. } => &result.guesses,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: EngineConfig,
    stats: PlayerStats,
    metrics: SkillMetrics,
    history: Vec<LevelResult>,
    level_number: u32,
    state: GameState,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl GameSession {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            stats: PlayerStats::default(),
            metrics: SkillMetrics::default(),
            history: Vec::new(),
            level_number: 1,
            state: GameState::Idle,
        }
    }

    /// Resume a player's progress loaded by a persistence layer. Metrics are
    /// derived again rather than trusted from storage.
    pub fn with_progress(config: EngineConfig, stats: PlayerStats, history: Vec<LevelResult>) -> Self {
        let metrics = derive_skill_metrics_with(&config, &stats, &history);
        Self { metrics, stats, history, ..Self::new(config) }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn metrics(&self) -> &SkillMetrics {
        &self.metrics
    }

    /// Every finished level, oldest first.
    pub fn history(&self) -> &[LevelResult] {
        &self.history
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    /// Start over at level 1, keeping stats and history. Without a seed one
    /// is minted from OS entropy.
    pub fn start_new_game(&mut self, now: u64, seed: Option<i64>) -> &LevelParams {
        self.level_number = 1;
        let seed = seed.unwrap_or_else(fresh_seed);
        self.begin(now, seed)
    }

    /// Submit a guess for the level in play.
    ///
    /// A correct guess wins the level; using the last attempt on a wrong
    /// guess loses it. Either way the outcome is folded into the stats before
    /// this returns.
    pub fn submit_guess(&mut self, guess: i64, now: u64) -> Result<GuessResult, SessionError> {
        let (level, attempts_made) = match &self.state {
            GameState::Playing { level, guesses, .. } => (level, guesses.len() as u32),
            other => return Err(reject("submit a guess", other)),
        };

        let time_limit = level.time_limit;
        if let Some(limit_secs) = time_limit {
            if self.config.enforce_time_limit && self.is_expired(now) {
                self.finish(false, now);
                return Err(SessionError::TimeExpired { limit_secs });
            }
        }

        if !level.contains(guess) {
            warn!(guess, min = level.range_min, max = level.range_max, "guess outside range");
            return Err(SessionError::GuessOutOfRange {
                guess,
                min: level.range_min,
                max: level.range_max,
            });
        }

        let result = if guess == level.target_number {
            GuessResult { guess, feedback: Feedback::Correct, hint: None, penalty: None, timestamp: now }
        } else {
            let attempts_left = level.max_attempts.saturating_sub(attempts_made + 1);
            let fb = evaluate_guess(guess, level.target_number, level.hint_style, attempts_left);
            GuessResult { guess, feedback: fb.feedback, hint: fb.hint, penalty: fb.penalty, timestamp: now }
        };
        let max_attempts = level.max_attempts;

        if let GameState::Playing { guesses, .. } = &mut self.state {
            guesses.push(result.clone());
        }

        if result.feedback == Feedback::Correct {
            self.finish(true, now);
        } else if attempts_made + 1 >= max_attempts {
            self.finish(false, now);
        }
        Ok(result)
    }

    pub fn pause(&mut self, now: u64) -> Result<(), SessionError> {
        match mem::replace(&mut self.state, GameState::Idle) {
            GameState::Playing { level, guesses, started_at } => {
                let elapsed_ms = now.saturating_sub(started_at);
                debug!(elapsed_ms, "paused");
                self.state = GameState::Paused { level, guesses, elapsed_ms };
                Ok(())
            }
            other => {
                let err = reject("pause", &other);
                self.state = other;
                Err(err)
            }
        }
    }

    pub fn resume(&mut self, now: u64) -> Result<(), SessionError> {
        match mem::replace(&mut self.state, GameState::Idle) {
            GameState::Paused { level, guesses, elapsed_ms } => {
                debug!(elapsed_ms, "resumed");
                self.state = GameState::Playing {
                    level,
                    guesses,
                    started_at: now.saturating_sub(elapsed_ms),
                };
                Ok(())
            }
            other => {
                let err = reject("resume", &other);
                self.state = other;
                Err(err)
            }
        }
    }

    /// Clock tick from the caller's timer. Ends a timed level as a loss once
    /// its limit has passed; otherwise does nothing.
    pub fn tick(&mut self, now: u64) -> Option<&LevelResult> {
        let timed = matches!(
            &self.state,
            GameState::Playing { level, .. } if level.time_limit.is_some()
        );
        if !timed || !self.config.enforce_time_limit || !self.is_expired(now) {
            return None;
        }
        self.finish(false, now);
        self.history.last()
    }

    /// Milliseconds spent on the current level, derived on demand.
    pub fn elapsed_ms(&self, now: u64) -> u64 {
        match &self.state {
            GameState::Idle => 0,
            GameState::Playing { started_at, .. } => now.saturating_sub(*started_at),
            GameState::Paused { elapsed_ms, .. } => *elapsed_ms,
            GameState::Finished { elapsed_ms, .. } => *elapsed_ms,
        }
    }

    /// Milliseconds left on a timed level.
    pub fn time_left_ms(&self, now: u64) -> Option<u64> {
        let limit = self.state.level()?.time_limit?;
        Some((limit as u64 * 1000).saturating_sub(self.elapsed_ms(now)))
    }

    /// Advance after a win. The next level's seed comes from the clock.
    pub fn next_level(&mut self, now: u64) -> Result<&LevelParams, SessionError> {
        match &self.state {
            GameState::Finished { result, .. } if result.won => {}
            other => return Err(reject("advance to the next level", other)),
        }
        self.level_number = self.level_number.saturating_add(1);
        let seed = (now as i64).wrapping_add(self.level_number as i64);
        Ok(self.begin(now, seed))
    }

    /// Replay the current level number from the next seed, dropping any
    /// guesses in progress without recording an outcome.
    pub fn restart_level(&mut self, now: u64) -> Result<&LevelParams, SessionError> {
        let seed = self.state.level().ok_or(SessionError::NoLevel)?.seed.wrapping_add(1);
        Ok(self.begin(now, seed))
    }

    /// Forget all progress and return to idle.
    pub fn reset_progress(&mut self) {
        info!(games = self.stats.total_games, "progress reset");
        self.stats = PlayerStats::default();
        self.metrics = SkillMetrics::default();
        self.history.clear();
        self.level_number = 1;
        self.state = GameState::Idle;
    }

    fn begin(&mut self, now: u64, seed: i64) -> &LevelParams {
        let level = generate_level_with(&self.config, self.level_number, &self.metrics, Some(seed));
        debug!(level = level.level_number, seed, "level started");
        self.state = GameState::Playing { level, guesses: Vec::new(), started_at: now };
        match &self.state {
            GameState::Playing { level, .. } => level,
            _ => unreachable!("state was just set to playing"),
        }
    }

    fn is_expired(&self, now: u64) -> bool {
        match self.time_left_ms(now) {
            Some(left) => left == 0,
            None => false,
        }
    }

    /// Close the level in play: record the result, refresh stats and metrics.
    fn finish(&mut self, won: bool, now: u64) {
        let elapsed = self.elapsed_ms(now);
        let (level, guesses) = match mem::replace(&mut self.state, GameState::Idle) {
            GameState::Playing { level, guesses, .. } | GameState::Paused { level, guesses, .. } => {
                (level, guesses)
            }
            other => {
                self.state = other;
                return;
            }
        };

        let result = build_level_result(&level, won, guesses, Some(elapsed / 1000), now);
        self.stats = record_outcome_with(&self.config, &self.stats, &result);
        self.history.push(result.clone());
        self.metrics = derive_skill_metrics_with(&self.config, &self.stats, &self.history);

        info!(
            level = result.level_number,
            won,
            attempts = result.attempts_used,
            accuracy = result.accuracy,
            skill = self.metrics.skill_level,
            "level finished"
        );
        self.state = GameState::Finished { level, result, elapsed_ms: elapsed };
    }
}

fn reject(event: &'static str, state: &GameState) -> SessionError {
    warn!(event, state = state.name(), "rejected session event");
    SessionError::InvalidTransition { event, state: state.name() }
}
