//! Core level engine: seeded generation, hints, and the player skill model.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: modes, hint styles, level params/results, stats, metrics |
//! | `rng`       | Park-Miller seeded stream plus an entropy seed source |
//! | `hints`     | Directional feedback and mode-specific hints for a wrong guess |
//! | `helpers`   | Attempt floor, incremental mean, bounded buffers |
//! | `skill`     | Outcome aggregation, skill metrics, accuracy score |
//! | `generator` | `generate_level()` / `regenerate_level()` |
//! | `config`    | Tunables with defaults, loadable from TOML |
//! | `error`     | Config and session error types |
//! | `session`   | Gameplay state machine tying the pieces together |

pub mod config;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod hints;
pub mod models;
pub mod rng;
pub mod session;
pub mod skill;

// Re-export the public API surface so callers can use
// `level_engine::generate_level` without reaching into sub-modules.
pub use config::EngineConfig;
pub use error::{ConfigError, SessionError};
pub use generator::{generate_level, generate_level_with, now_millis, regenerate_level};
pub use hints::evaluate_guess;
pub use models::{
    Feedback, GameMode, GuessResult, Hint, HintFeedback, HintStyle, LevelParams, LevelResult,
    ModeStats, ModeStatsTable, PlayerStats, SkillMetrics, SkillTier,
};
pub use rng::{fresh_seed, SeededStream};
pub use session::{GameSession, GameState};
pub use skill::{
    build_level_result, compute_accuracy, derive_skill_metrics, derive_skill_metrics_with,
    record_outcome, record_outcome_with,
};
