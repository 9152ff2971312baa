use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::level_engine::{
    config::EngineConfig,
    helpers::optimal_attempts,
    models::{GameMode, LevelParams, SkillMetrics},
    rng::SeededStream,
};

/// Time limits never tighten below this many seconds through level scaling.
const TIME_LIMIT_FLOOR: u32 = 15;
/// Validation floor for any timed level.
const MIN_TIME_LIMIT: u32 = 10;
const MIN_ATTEMPTS: u32 = 2;

/// Wall-clock milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Synthesize level `level_number` for a player with `skill`.
///
/// With `seed: Some(_)` the output is fully deterministic. Without one the
/// seed is derived from the clock, which is only meant for fresh progression.
pub fn generate_level(level_number: u32, skill: &SkillMetrics, seed: Option<i64>) -> LevelParams {
    generate_level_with(&EngineConfig::default(), level_number, skill, seed)
}

pub fn generate_level_with(
    config: &EngineConfig,
    level_number: u32,
    skill: &SkillMetrics,
    seed: Option<i64>,
) -> LevelParams {
    let level_number = level_number.max(1);
    let seed = seed.unwrap_or_else(|| now_millis() as i64 + level_number as i64);
    let mut rng = SeededStream::new(seed);

    let game_mode = select_game_mode(level_number, skill, &mut rng);

    let (range_min, base_max) = game_mode.base_range();
    let expansion = range_expansion(level_number, skill);
    let expanded = (base_max as f64 + expansion * (base_max - range_min) as f64).round() as i64;
    let range_max = expanded.min(config.range_ceiling).max(range_min + 1);

    let max_attempts = game_mode
        .base_attempts()
        .saturating_sub(attempt_reduction(level_number, skill))
        .max(MIN_ATTEMPTS);
    let time_limit = time_limit(game_mode, level_number, skill);

    // Must stay the last draw: regenerate_level relies on it.
    let target_number = rng.draw_int(range_min, range_max);

    let difficulty_score = difficulty_score((range_max - range_min + 1) as u64, max_attempts, time_limit);

    let params = validate_level(LevelParams {
        seed,
        level_number,
        range_min,
        range_max,
        max_attempts,
        time_limit,
        game_mode,
        target_number,
        hint_style: game_mode.hint_style(),
        difficulty_score,
    });

    debug!(
        seed,
        level = level_number,
        mode = %params.game_mode,
        range_max = params.range_max,
        attempts = params.max_attempts,
        time_limit = ?params.time_limit,
        "generated level"
    );
    params
}

/// Redraw the target from the level's own seed, keeping every other field.
///
/// The fresh stream skips one draw before drawing the target, so the result
/// is stable for a given seed.
pub fn regenerate_level(params: &LevelParams) -> LevelParams {
    let mut rng = SeededStream::new(params.seed);
    rng.draw();
    let target_number = rng.draw_int(params.range_min, params.range_max);
    LevelParams { target_number, ..params.clone() }
}

fn select_game_mode(level_number: u32, skill: &SkillMetrics, rng: &mut SeededStream) -> GameMode {
    const MODES: [GameMode; 4] = GameMode::ALL;
    match level_number {
        0..=3 => GameMode::Classic,
        4..=6 => {
            if rng.draw() > 0.5 { GameMode::Classic } else { GameMode::Depth }
        }
        7..=10 => MODES[rng.draw_int(0, 2) as usize],
        _ if skill.skill_level >= 70.0 => MODES[rng.draw_int(0, 3) as usize],
        _ => {
            let roll = rng.draw();
            if roll < 0.30 {
                GameMode::Classic
            } else if roll < 0.55 {
                GameMode::Depth
            } else if roll < 0.80 {
                GameMode::Strategic
            } else {
                GameMode::Tactical
            }
        }
    }
}

/// Multiplier applied to the base range width.
fn range_expansion(level_number: u32, skill: &SkillMetrics) -> f64 {
    let base = (level_number as f64).powf(1.3);
    let skill_factor = 1.0 + skill.skill_level / 100.0 * 0.5;
    let consistency_factor = 1.0 + skill.consistency_score * 0.2;
    let mut expansion = base * skill_factor * consistency_factor;
    if skill.failure_streak > 2 {
        expansion *= (1.0 - skill.failure_streak as f64 * 0.1).max(0.5);
    }
    expansion
}

fn attempt_reduction(level_number: u32, skill: &SkillMetrics) -> u32 {
    if level_number < 5 {
        return 0;
    }
    let by_level = ((level_number - 4) / 5) as i64;
    let by_skill = i64::from(skill.skill_level > 60.0);
    let relief = i64::from(skill.failure_streak > 1);
    (by_level + by_skill - relief).max(0) as u32
}

fn time_limit(mode: GameMode, level_number: u32, skill: &SkillMetrics) -> Option<u32> {
    let mut limit = mode.base_time_limit()?;
    if level_number > 10 {
        limit = limit.saturating_sub((level_number - 10).saturating_mul(2)).max(TIME_LIMIT_FLOOR);
    }
    if skill.failure_streak > 2 {
        limit = (limit + 10).min(60);
    }
    Some(limit)
}

/// Informational score; never used to gate generation.
fn difficulty_score(range_size: u64, max_attempts: u32, time_limit: Option<u32>) -> u32 {
    let range_score = (range_size as f64).log2() * 10.0;
    let attempt_pressure = (10.0 - max_attempts as f64).max(0.0) * 5.0;
    let time_pressure = time_limit.map_or(0.0, |t| (60.0 - t as f64).max(0.0) * 0.5);
    (range_score + attempt_pressure + time_pressure).round() as u32
}

/// Raise the attempt budget and time limit to their feasibility floors.
/// Never lowers anything.
fn validate_level(mut params: LevelParams) -> LevelParams {
    let floor = optimal_attempts(params.range_size()).max(MIN_ATTEMPTS);
    if params.max_attempts < floor {
        debug!(
            level = params.level_number,
            from = params.max_attempts,
            to = floor,
            "raised attempt budget to binary-search floor"
        );
        params.max_attempts = floor;
    }
    params.time_limit = params.time_limit.map(|t| t.max(MIN_TIME_LIMIT));
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level_engine::models::HintStyle;

    fn skill(level: f64, failure_streak: u32) -> SkillMetrics {
        SkillMetrics { skill_level: level, failure_streak, ..SkillMetrics::default() }
    }

    /// Small consecutive seeds all start low in the stream; spread them out.
    fn spread(i: i64) -> i64 {
        i * 1_000_003
    }

    #[test]
    fn level_one_seed_42_matches_formula() {
        let p = generate_level(1, &SkillMetrics::default(), Some(42));
        assert_eq!(p.game_mode, GameMode::Classic);
        assert_eq!(p.hint_style, HintStyle::Basic);
        assert_eq!(p.range_min, 1);
        assert_eq!(p.range_max, 22);
        assert_eq!(p.max_attempts, 5);
        assert_eq!(p.time_limit, None);
        assert_eq!(p.seed, 42);
        assert!(p.contains(p.target_number));
        // log2(22)*10 = 44.6, (10-5)*5 = 25
        assert_eq!(p.difficulty_score, 70);
    }

    #[test]
    fn first_three_levels_are_classic() {
        for level in 1..=3 {
            for seed in 1..50 {
                assert_eq!(generate_level(level, &SkillMetrics::default(), Some(seed)).game_mode, GameMode::Classic);
            }
        }
    }

    #[test]
    fn early_levels_pick_classic_or_depth() {
        let mut seen = std::collections::HashSet::new();
        for seed in 1..200 {
            let mode = generate_level(5, &SkillMetrics::default(), Some(spread(seed))).game_mode;
            assert!(matches!(mode, GameMode::Classic | GameMode::Depth));
            seen.insert(mode);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn mid_levels_never_pick_tactical() {
        for seed in 1..200 {
            let mode = generate_level(8, &SkillMetrics::default(), Some(spread(seed))).game_mode;
            assert_ne!(mode, GameMode::Tactical);
        }
    }

    #[test]
    fn late_levels_reach_every_mode() {
        let mut seen = std::collections::HashSet::new();
        for seed in 1..500 {
            seen.insert(generate_level(15, &skill(40.0, 0), Some(spread(seed))).game_mode);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn hint_style_follows_mode() {
        for seed in 1..100 {
            let p = generate_level(12, &skill(80.0, 0), Some(seed));
            assert_eq!(p.hint_style, p.game_mode.hint_style());
        }
    }

    #[test]
    fn range_is_capped_at_ceiling() {
        let p = generate_level(60, &skill(100.0, 0), Some(3));
        assert_eq!(p.range_max, 1000);

        let config = EngineConfig { range_ceiling: 200, ..EngineConfig::default() };
        let p = generate_level_with(&config, 60, &skill(100.0, 0), Some(3));
        assert_eq!(p.range_max, 200);
    }

    #[test]
    fn failure_streak_shrinks_range() {
        let normal = range_expansion(6, &skill(50.0, 0));
        let struggling = range_expansion(6, &skill(50.0, 4));
        assert!((struggling - normal * 0.6).abs() < 1e-9);
        let floored = range_expansion(6, &skill(50.0, 9));
        assert!((floored - normal * 0.5).abs() < 1e-9);
    }

    #[test]
    fn attempt_reduction_rules() {
        assert_eq!(attempt_reduction(4, &skill(90.0, 0)), 0);
        assert_eq!(attempt_reduction(5, &skill(50.0, 0)), 0);
        assert_eq!(attempt_reduction(9, &skill(50.0, 0)), 1);
        assert_eq!(attempt_reduction(9, &skill(61.0, 0)), 2);
        assert_eq!(attempt_reduction(9, &skill(61.0, 2)), 1);
        assert_eq!(attempt_reduction(5, &skill(50.0, 2)), 0);
    }

    #[test]
    fn time_limit_rules() {
        assert_eq!(time_limit(GameMode::Classic, 20, &skill(50.0, 0)), None);
        assert_eq!(time_limit(GameMode::Strategic, 10, &skill(50.0, 0)), Some(60));
        assert_eq!(time_limit(GameMode::Strategic, 15, &skill(50.0, 0)), Some(50));
        assert_eq!(time_limit(GameMode::Tactical, 12, &skill(50.0, 0)), Some(26));
        assert_eq!(time_limit(GameMode::Tactical, 40, &skill(50.0, 0)), Some(15));
        assert_eq!(time_limit(GameMode::Tactical, 40, &skill(50.0, 3)), Some(25));
        assert_eq!(time_limit(GameMode::Strategic, 11, &skill(50.0, 3)), Some(60));
    }

    #[test]
    fn huge_level_numbers_bottom_out_at_time_floor() {
        assert_eq!(time_limit(GameMode::Tactical, u32::MAX, &skill(50.0, 0)), Some(15));
        let mut timed = 0;
        for seed in 1..200 {
            let p = generate_level(u32::MAX, &skill(80.0, 0), Some(seed * 7_919));
            assert_eq!(p.level_number, u32::MAX);
            if let Some(limit) = p.time_limit {
                assert_eq!(limit, TIME_LIMIT_FLOOR);
                timed += 1;
            }
            assert!(p.contains(p.target_number));
        }
        assert!(timed > 0);
    }

    #[test]
    fn validation_only_raises() {
        let raw = LevelParams {
            seed: 1,
            level_number: 30,
            range_min: 1,
            range_max: 1000,
            max_attempts: 2,
            time_limit: Some(5),
            game_mode: GameMode::Tactical,
            target_number: 10,
            hint_style: HintStyle::HotCold,
            difficulty_score: 0,
        };
        let v = validate_level(raw.clone());
        assert_eq!(v.max_attempts, 10);
        assert_eq!(v.time_limit, Some(10));

        let roomy = LevelParams { max_attempts: 12, time_limit: Some(45), ..raw };
        assert_eq!(validate_level(roomy.clone()), roomy);
    }

    #[test]
    fn regenerate_keeps_everything_but_target() {
        let original = generate_level(9, &SkillMetrics::default(), Some(777));
        let a = regenerate_level(&original);
        let b = regenerate_level(&original);
        assert_eq!(a, b);
        assert_eq!(LevelParams { target_number: original.target_number, ..a.clone() }, original);
        assert!(a.contains(a.target_number));
    }

    #[test]
    fn clock_seed_is_recorded() {
        let before = now_millis() as i64;
        let p = generate_level(2, &SkillMetrics::default(), None);
        assert!(p.seed >= before + 2);
    }
}
