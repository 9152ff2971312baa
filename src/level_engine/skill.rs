//! Player skill model: folds finished levels into running statistics and
//! derives the normalized [`SkillMetrics`] that drive level generation.
//!
//! Both entry points are pure. `record_outcome` returns a new
//! [`PlayerStats`]; `derive_skill_metrics` recomputes everything from the
//! stats plus the recent result history, so metrics never need persisting.

use tracing::debug;

use crate::level_engine::{
    config::EngineConfig,
    helpers::{clamp_or, optimal_attempts, push_capped, round2, running_mean},
    models::{GuessResult, LevelParams, LevelResult, PlayerStats, SkillMetrics},
};

const MIN_SKILL: f64 = 10.0;
const MAX_SKILL: f64 = 100.0;
/// Neutral value for rates and scores with no data behind them.
const NEUTRAL: f64 = 0.5;
/// Samples needed before consistency or reaction speed leave `NEUTRAL`.
const MIN_SAMPLES: usize = 3;
/// Accuracy values considered for consistency.
const CONSISTENCY_WINDOW: usize = 5;

/// Fold one finished level into the stats, using the default config.
pub fn record_outcome(stats: &PlayerStats, result: &LevelResult) -> PlayerStats {
    record_outcome_with(&EngineConfig::default(), stats, result)
}

pub fn record_outcome_with(
    config: &EngineConfig,
    stats: &PlayerStats,
    result: &LevelResult,
) -> PlayerStats {
    let mut next = stats.clone();

    next.total_games += 1;
    if result.won {
        next.total_wins += 1;
        next.current_streak += 1;
        next.best_streak = next.best_streak.max(next.current_streak);
    } else {
        next.total_losses += 1;
        next.current_streak = 0;
    }

    let n = next.total_games;
    next.average_attempts = running_mean(next.average_attempts, n, result.attempts_used as f64);
    if let Some(time_used) = result.time_used {
        next.average_time = running_mean(next.average_time, n, time_used as f64);
    }

    push_capped(&mut next.accuracy_history, result.accuracy, config.history_size);

    // Long or paused sessions say nothing about reaction speed.
    if let Some(time_used) = result.time_used.filter(|&t| t < config.reaction_time_ceiling) {
        push_capped(&mut next.reaction_times, time_used, config.history_size);
    }

    let mode = next.mode_stats.get_mut(result.game_mode);
    mode.games_played += 1;
    if result.won {
        mode.wins += 1;
    }
    mode.average_attempts = running_mean(mode.average_attempts, mode.games_played, result.attempts_used as f64);

    next.last_played_at = Some(result.completed_at);

    debug!(
        level = result.level_number,
        won = result.won,
        total_games = next.total_games,
        streak = next.current_streak,
        "recorded level outcome"
    );
    next
}

/// Recompute skill metrics from scratch, using the default config.
///
/// `recent_results` is the caller's history in chronological order; only the
/// last ten entries are read.
pub fn derive_skill_metrics(stats: &PlayerStats, recent_results: &[LevelResult]) -> SkillMetrics {
    derive_skill_metrics_with(&EngineConfig::default(), stats, recent_results)
}

pub fn derive_skill_metrics_with(
    config: &EngineConfig,
    stats: &PlayerStats,
    recent_results: &[LevelResult],
) -> SkillMetrics {
    let start = recent_results.len().saturating_sub(config.recent_window);
    let recent = &recent_results[start..];

    let overall_rate = if stats.total_games > 0 {
        stats.total_wins as f64 / stats.total_games as f64
    } else {
        NEUTRAL
    };
    let recent_rate = if recent.is_empty() {
        NEUTRAL
    } else {
        recent.iter().filter(|r| r.won).count() as f64 / recent.len() as f64
    };
    let success_rate = if stats.total_games < config.blend_min_games {
        recent_rate
    } else {
        overall_rate * 0.3 + recent_rate * 0.7
    };
    let success_rate = clamp_or(success_rate, 0.0, 1.0, NEUTRAL);

    let consistency_score = consistency(&stats.accuracy_history);
    let reaction_speed = reaction_speed(&stats.reaction_times, config.reaction_time_ceiling);
    let (win_streak, failure_streak) = trailing_streak(recent);

    let raw_skill = success_rate * 40.0
        + consistency_score * 30.0
        + reaction_speed * 30.0
        + win_streak as f64 * 2.0
        - failure_streak as f64 * 3.0;
    let skill_level = clamp_or(raw_skill, MIN_SKILL, MAX_SKILL, MIN_SKILL);

    let metrics = SkillMetrics {
        skill_level,
        success_rate,
        consistency_score,
        reaction_speed,
        failure_streak,
        win_streak,
        difficulty_modifier: difficulty_modifier(win_streak, failure_streak),
    };
    debug!(
        skill = metrics.skill_level,
        success = metrics.success_rate,
        win_streak,
        failure_streak,
        "derived skill metrics"
    );
    metrics
}

/// Snapshot a finished level. `time_used` is in whole seconds.
pub fn build_level_result(
    level: &LevelParams,
    won: bool,
    guesses: Vec<GuessResult>,
    time_used: Option<u64>,
    completed_at: u64,
) -> LevelResult {
    let attempts_used = guesses.len() as u32;
    LevelResult {
        level_number: level.level_number,
        won,
        attempts_used,
        max_attempts: level.max_attempts,
        time_used,
        time_limit: level.time_limit,
        accuracy: compute_accuracy(attempts_used, level.max_attempts, level.range_size()),
        game_mode: level.game_mode,
        target_number: level.target_number,
        guesses,
        completed_at,
    }
}

/// Efficiency against the binary-search optimum, in `[0, 1]` at two decimals.
pub fn compute_accuracy(attempts_used: u32, max_attempts: u32, range_size: u64) -> f64 {
    if max_attempts == 0 {
        return 0.0;
    }
    let optimal = optimal_attempts(range_size.max(1)) as f64;
    let efficiency = 1.0 - (attempts_used as f64 - optimal) / max_attempts as f64;
    round2(efficiency.clamp(0.0, 1.0))
}

/// `1 − stddev` of the last five accuracy values.
fn consistency(accuracy_history: &[f64]) -> f64 {
    if accuracy_history.len() < MIN_SAMPLES {
        return NEUTRAL;
    }
    let window = &accuracy_history[accuracy_history.len().saturating_sub(CONSISTENCY_WINDOW)..];
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    clamp_or(1.0 - variance.sqrt(), 0.0, 1.0, NEUTRAL)
}

fn reaction_speed(reaction_times: &[u64], ceiling: u64) -> f64 {
    if reaction_times.len() < MIN_SAMPLES {
        return NEUTRAL;
    }
    let avg = reaction_times.iter().map(|&t| t as f64).sum::<f64>() / reaction_times.len() as f64;
    clamp_or(1.0 - avg / ceiling as f64, 0.0, 1.0, NEUTRAL)
}

/// `(win_streak, failure_streak)` of the run ending at the most recent
/// result. At most one of the two is non-zero.
fn trailing_streak(recent: &[LevelResult]) -> (u32, u32) {
    let Some(last) = recent.last() else {
        return (0, 0);
    };
    let run = recent.iter().rev().take_while(|r| r.won == last.won).count() as u32;
    if last.won { (run, 0) } else { (0, run) }
}

fn difficulty_modifier(win_streak: u32, failure_streak: u32) -> f64 {
    if failure_streak >= 3 {
        (1.0 - failure_streak as f64 * 0.1).max(0.6)
    } else if win_streak >= 5 {
        (1.0 + win_streak as f64 * 0.05).min(1.4)
    } else {
        1.0
    }
}
