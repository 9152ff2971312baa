//! End-to-end demo of the adaptive level engine.
//!
//! Run with: `cargo run --example demo`
//! (set `RUST_LOG=adaptive_guess_gen=debug` to see generator and skill-model events)
//!
//! 1. **Seeded levels** — the same seed always produces the same level, and
//!    `regenerate_level` redraws only the target.
//! 2. **A played session** — a binary-search player works through levels,
//!    showing the hint for every wrong guess and how the skill metrics move
//!    after each result.

use adaptive_guess_gen::{
    generate_level, regenerate_level, EngineConfig, Feedback, GameSession, GameState, LevelParams,
    SessionError, SkillMetrics,
};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
range_ceiling = 1000
history_size = 20
enforce_time_limit = true
"#;

fn print_level(level: &LevelParams) {
    let time = match level.time_limit {
        Some(t) => format!("{t}s"),
        None    => "none".to_string(),
    };
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Level {}  [{}]  seed: {}  difficulty: {}",
        level.level_number, level.game_mode, level.seed, level.difficulty_score);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {}", level.game_mode.description());
    println!("  Range: {}..={}  Attempts: {}  Time limit: {}  Hints: {}",
        level.range_min, level.range_max, level.max_attempts, time, level.hint_style);
}

/// Play the level in progress by bisecting the range. Returns whether it was won.
fn play_binary_search(session: &mut GameSession, mut now: u64) -> Result<bool, SessionError> {
    let level = session.state().level().cloned().ok_or(SessionError::NoLevel)?;
    let (mut lo, mut hi) = (level.range_min, level.range_max);

    while let GameState::Playing { .. } = session.state() {
        let guess = lo + (hi - lo) / 2;
        now += 1_500;
        let result = session.submit_guess(guess, now)?;
        let hint = result.hint.map(|h| format!("  ({h})")).unwrap_or_default();
        println!("    guess {guess:>4} → {}{hint}", result.feedback);
        match result.feedback {
            Feedback::Higher  => lo = guess + 1,
            Feedback::Lower   => hi = guess - 1,
            Feedback::Correct => {}
        }
    }

    match session.state() {
        GameState::Finished { result, .. } => Ok(result.won),
        _ => Ok(false),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ── Seeded levels ────────────────────────────────────────────────────────
    println!();
    println!("══ Seeded generation: level 1, seed 42 ══");
    println!();
    let level = generate_level(1, &SkillMetrics::default(), Some(42));
    print_level(&level);
    let replay = regenerate_level(&level);
    println!("  target: {}  regenerated target: {}", level.target_number, replay.target_number);

    // ── A played session ─────────────────────────────────────────────────────
    println!();
    println!("══ Binary-search player, 8 levels ══");
    println!();
    let config = EngineConfig::from_toml_str(CONFIG)?;
    let mut session = GameSession::new(config);
    let mut now = 1_700_000_000_000u64;
    session.start_new_game(now, Some(2024));

    for _ in 0..8 {
        if let Some(level) = session.state().level() {
            print_level(level);
        }
        let won = play_binary_search(&mut session, now)?;
        now += 30_000;

        let m = session.metrics();
        println!();
        println!("  {}  skill {:.1} ({})  success {:.2}  streak +{} / -{}",
            if won { "WON " } else { "LOST" },
            m.skill_level, m.tier(), m.success_rate, m.win_streak, m.failure_streak);
        println!();

        if won {
            session.next_level(now)?;
        } else {
            session.restart_level(now)?;
        }
    }

    let stats = session.stats();
    println!("Games: {}  Wins: {}  Best streak: {}  Avg attempts: {:.2}",
        stats.total_games, stats.total_wins, stats.best_streak, stats.average_attempts);
    Ok(())
}
