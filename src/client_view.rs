use serde_json::{json, Value};

use crate::level_engine::{
    models::{GuessResult, LevelParams, SkillMetrics},
    session::{GameSession, GameState},
};

/// Build one guess row for the client's guess list.
fn guess_row(index: usize, g: &GuessResult) -> Value {
    json!({
        "index": index,
        "guess": g.guess,
        "feedback": g.feedback.to_string(),
        "hint": g.hint.map(|h| h.text()),
        "penalty": g.penalty,
        "timestamp": g.timestamp
    })
}

fn skill_block(m: &SkillMetrics) -> Value {
    json!({
        "skill_level": m.skill_level.round(),
        "tier": m.tier().to_string(),
        "success_rate": m.success_rate,
        "win_streak": m.win_streak,
        "failure_streak": m.failure_streak
    })
}

/// Map a generated level to the JSON the client renders on the level card.
///
/// The target number is deliberately absent.
pub fn level_view(level: &LevelParams) -> Value {
    json!({
        "level_number": level.level_number,
        "mode": level.game_mode.to_string(),
        "mode_description": level.game_mode.description(),
        "hint_style": level.hint_style.to_string(),
        "range": { "min": level.range_min, "max": level.range_max },
        "max_attempts": level.max_attempts,
        "time_limit_secs": level.time_limit,
        "difficulty_score": level.difficulty_score
    })
}

/// Snapshot of the whole session at `now` (milliseconds).
///
/// The target is only revealed once the level is finished.
pub fn session_view(session: &GameSession, now: u64) -> Value {
    let state = session.state();
    let guesses: Vec<Value> = state
        .guesses()
        .iter()
        .enumerate()
        .map(|(i, g)| guess_row(i, g))
        .collect();

    let level = state.level().map(level_view).unwrap_or(Value::Null);
    let attempts_left = state
        .level()
        .map(|l| l.max_attempts.saturating_sub(state.guesses().len() as u32));

    let outcome = match state {
        GameState::Finished { result, .. } => json!({
            "won": result.won,
            "target_number": result.target_number,
            "accuracy": result.accuracy
        }),
        _ => Value::Null,
    };

    json!({
        "state": state.name(),
        "level": level,
        "attempts_left": attempts_left,
        "elapsed_ms": session.elapsed_ms(now),
        "time_left_ms": session.time_left_ms(now),
        "guesses": guesses,
        "outcome": outcome,
        "skill": skill_block(session.metrics()),
        "stats": {
            "total_games": session.stats().total_games,
            "total_wins": session.stats().total_wins,
            "best_streak": session.stats().best_streak
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level_engine::generator::generate_level;

    #[test]
    fn level_view_hides_target() {
        let level = generate_level(1, &SkillMetrics::default(), Some(42));
        let v = level_view(&level);
        assert_eq!(v["mode"], "Classic");
        assert_eq!(v["range"]["max"], 22);
        assert_eq!(v["time_limit_secs"], Value::Null);
        assert!(v.get("target_number").is_none());
    }

    #[test]
    fn session_view_tracks_progress() {
        let mut session = GameSession::default();
        let idle = session_view(&session, 0);
        assert_eq!(idle["state"], "idle");
        assert_eq!(idle["level"], Value::Null);
        assert_eq!(idle["skill"]["tier"], "Intermediate");

        let level = session.start_new_game(1_000, Some(42)).clone();
        let wrong = if level.target_number == 1 { 2 } else { 1 };
        session.submit_guess(wrong, 2_000).unwrap();

        let playing = session_view(&session, 3_500);
        assert_eq!(playing["state"], "playing");
        assert_eq!(playing["attempts_left"], 4);
        assert_eq!(playing["elapsed_ms"], 2_500);
        let direction = if wrong < level.target_number { "higher" } else { "lower" };
        assert_eq!(playing["guesses"][0]["feedback"], direction);
        assert_eq!(playing["outcome"], Value::Null);

        session.submit_guess(level.target_number, 4_000).unwrap();
        let done = session_view(&session, 9_000);
        assert_eq!(done["state"], "finished");
        assert_eq!(done["outcome"]["won"], true);
        assert_eq!(done["outcome"]["target_number"], level.target_number);
        assert_eq!(done["stats"]["total_wins"], 1);
    }
}
