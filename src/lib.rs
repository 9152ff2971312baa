//! # adaptive_guess_gen
//!
//! A deterministic, adaptive level generator for a number-guessing game.
//!
//! Given how a player has been doing, the engine synthesizes the next
//! challenge (numeric range, attempt budget, time limit and hint style),
//! evaluates each guess, and folds finished levels back into a skill model
//! that drives the following level.
//!
//! ## How it works
//!
//! 1. Call [`generate_level`] with a level number, the player's
//!    [`SkillMetrics`] and an optional seed. The engine picks a [`GameMode`],
//!    widens the range with level and skill, trims the attempt budget, sets a
//!    time limit, and draws the target from a Park-Miller stream.
//! 2. For every wrong guess, [`evaluate_guess`] returns higher/lower plus the
//!    mode's hint (distance bands, hot/cold, or a low-attempts warning).
//! 3. When the level ends, [`record_outcome`] folds the [`LevelResult`] into
//!    [`PlayerStats`] and [`derive_skill_metrics`] recomputes the metrics
//!    for the next [`generate_level`] call.
//!
//! [`GameSession`] wires those steps into an explicit
//! idle/playing/paused/finished state machine, and [`client_view`] renders
//! session snapshots as JSON for a UI.
//!
//! ## Key features
//!
//! - **Deterministic**: pass `Some(seed)` to reproduce a level exactly;
//!   [`regenerate_level`] redraws only the target from the same seed.
//! - **Feasible by construction**: every level allows at least
//!   `ceil(log2(range size))` attempts, the information-theoretic floor.
//! - **Pure core**: stats and metrics updates return new values and never
//!   touch a clock or the filesystem.
//!
//! ## Quick start
//!
//! ```rust
//! use adaptive_guess_gen::{
//!     build_level_result, derive_skill_metrics, evaluate_guess, generate_level,
//!     record_outcome, PlayerStats, SkillMetrics,
//! };
//!
//! let level = generate_level(1, &SkillMetrics::default(), Some(42));
//! assert_eq!((level.range_min, level.range_max), (1, 22));
//!
//! let fb = evaluate_guess(11, level.target_number, level.hint_style, level.max_attempts - 1);
//! println!("11 -> {}", fb.feedback);
//!
//! let result = build_level_result(&level, false, Vec::new(), Some(12_000), 0);
//! let stats = record_outcome(&PlayerStats::default(), &result);
//! let metrics = derive_skill_metrics(&stats, &[result]);
//! let next = generate_level(2, &metrics, Some(43));
//! println!("next: {} {}..={}", next.game_mode, next.range_min, next.range_max);
//! ```

pub mod client_view;
pub mod level_engine;

// Convenience re-exports so callers can use `adaptive_guess_gen::generate_level`
// directly without reaching into `level_engine::`.
pub use level_engine::{
    build_level_result, compute_accuracy, derive_skill_metrics, derive_skill_metrics_with,
    evaluate_guess, fresh_seed, generate_level, generate_level_with, now_millis, record_outcome,
    record_outcome_with, regenerate_level, ConfigError, EngineConfig, Feedback, GameMode,
    GameSession, GameState, GuessResult, Hint, HintFeedback, HintStyle, LevelParams, LevelResult,
    ModeStats, ModeStatsTable, PlayerStats, SeededStream, SessionError, SkillMetrics, SkillTier,
};
