use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Game modes and hint styles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Classic,
    Depth,
    Strategic,
    Tactical,
}

impl GameMode {
    /// All modes in canonical order (the order the weighted draw walks).
    pub const ALL: [GameMode; 4] = [
        GameMode::Classic,
        GameMode::Depth,
        GameMode::Strategic,
        GameMode::Tactical,
    ];

    /// Base `(min, max)` range before skill-driven expansion.
    pub fn base_range(self) -> (i64, i64) {
        match self {
            GameMode::Classic   => (1, 10),
            GameMode::Depth     => (1, 16),
            GameMode::Strategic => (1, 8),
            GameMode::Tactical  => (1, 20),
        }
    }

    /// Attempt budget before level-driven reduction.
    pub fn base_attempts(self) -> u32 {
        match self {
            GameMode::Classic   => 5,
            GameMode::Depth     => 6,
            GameMode::Strategic => 4,
            GameMode::Tactical  => 3,
        }
    }

    /// Base time limit in seconds; `None` means untimed.
    pub fn base_time_limit(self) -> Option<u32> {
        match self {
            GameMode::Classic | GameMode::Depth => None,
            GameMode::Strategic                 => Some(60),
            GameMode::Tactical                  => Some(30),
        }
    }

    /// The hint style is a function of the mode and nothing else.
    pub fn hint_style(self) -> HintStyle {
        match self {
            GameMode::Classic   => HintStyle::Basic,
            GameMode::Depth     => HintStyle::Distance,
            GameMode::Strategic => HintStyle::Penalty,
            GameMode::Tactical  => HintStyle::HotCold,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GameMode::Classic   => "Pure logic and deduction. No time limits, straightforward hints.",
            GameMode::Depth     => "Mining for numbers. Deeper ranges with distance-based hints.",
            GameMode::Strategic => "Think carefully. Penalties for running low on attempts.",
            GameMode::Tactical  => "Fast-paced action. Tight time limits and thermal hints.",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameMode::Classic   => "Classic",
            GameMode::Depth     => "Depth",
            GameMode::Strategic => "Strategic",
            GameMode::Tactical  => "Tactical",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintStyle {
    Basic,
    Distance,
    HotCold,
    Penalty,
}

impl fmt::Display for HintStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintStyle::Basic    => write!(f, "basic"),
            HintStyle::Distance => write!(f, "distance"),
            HintStyle::HotCold  => write!(f, "hot_cold"),
            HintStyle::Penalty  => write!(f, "penalty"),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-guess feedback
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Correct,
    Higher,
    Lower,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct => write!(f, "correct"),
            Feedback::Higher  => write!(f, "higher"),
            Feedback::Lower   => write!(f, "lower"),
        }
    }
}

/// Qualitative hint attached to a wrong guess.
///
/// Distance bands (`VeryClose`..`Far`) belong to [`HintStyle::Distance`],
/// thermal bands (`BurningHot`..`Freezing`) to [`HintStyle::HotCold`], and
/// `CriticalAttempts` to [`HintStyle::Penalty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hint {
    VeryClose,
    GettingWarm,
    Moderate,
    Far,
    BurningHot,
    VeryHot,
    Warm,
    Cool,
    Freezing,
    CriticalAttempts,
}

impl Hint {
    pub fn text(self) -> &'static str {
        match self {
            Hint::VeryClose        => "Very close!",
            Hint::GettingWarm      => "Getting warm",
            Hint::Moderate         => "Moderate distance",
            Hint::Far              => "Far away",
            Hint::BurningHot       => "Burning hot!",
            Hint::VeryHot          => "Very hot",
            Hint::Warm             => "Warm",
            Hint::Cool             => "Cool",
            Hint::Freezing         => "Freezing cold",
            Hint::CriticalAttempts => "Critical! Limited attempts",
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Output of the hint evaluator for a wrong guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintFeedback {
    pub feedback: Feedback,
    pub hint: Option<Hint>,
    /// Only set for [`HintStyle::Penalty`]; `true` when attempts are critical.
    pub penalty: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    pub guess: i64,
    pub feedback: Feedback,
    pub hint: Option<Hint>,
    pub penalty: Option<bool>,
    /// Wall-clock milliseconds supplied by the caller.
    pub timestamp: u64,
}

// ---------------------------------------------------------------------------
// Level parameters and results
// ---------------------------------------------------------------------------

/// A fully synthesized level. Never mutated once generated; a restart
/// produces a new value from `seed + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelParams {
    pub seed: i64,
    pub level_number: u32,
    pub range_min: i64,
    pub range_max: i64,
    pub max_attempts: u32,
    /// Seconds; at least 10 when present.
    pub time_limit: Option<u32>,
    pub game_mode: GameMode,
    pub target_number: i64,
    pub hint_style: HintStyle,
    /// Informational only, computed before validation.
    pub difficulty_score: u32,
}

impl LevelParams {
    /// Number of candidate values, both ends inclusive.
    pub fn range_size(&self) -> u64 {
        (self.range_max - self.range_min + 1) as u64
    }

    pub fn contains(&self, guess: i64) -> bool {
        (self.range_min..=self.range_max).contains(&guess)
    }
}

/// Terminal snapshot of a finished level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelResult {
    pub level_number: u32,
    pub won: bool,
    pub attempts_used: u32,
    pub max_attempts: u32,
    /// Whole seconds spent on the level, if timed by the caller.
    pub time_used: Option<u64>,
    /// Seconds, copied from the level.
    pub time_limit: Option<u32>,
    /// 0.00..=1.00 at two-decimal resolution.
    pub accuracy: f64,
    pub game_mode: GameMode,
    pub target_number: i64,
    pub guesses: Vec<GuessResult>,
    pub completed_at: u64,
}

// ---------------------------------------------------------------------------
// Player statistics and skill metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeStats {
    pub games_played: u32,
    pub wins: u32,
    pub average_attempts: f64,
}

/// Per-mode statistics, one slot per [`GameMode`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeStatsTable {
    pub classic: ModeStats,
    pub depth: ModeStats,
    pub strategic: ModeStats,
    pub tactical: ModeStats,
}

impl ModeStatsTable {
    pub fn get(&self, mode: GameMode) -> &ModeStats {
        match mode {
            GameMode::Classic   => &self.classic,
            GameMode::Depth     => &self.depth,
            GameMode::Strategic => &self.strategic,
            GameMode::Tactical  => &self.tactical,
        }
    }

    pub fn get_mut(&mut self, mode: GameMode) -> &mut ModeStats {
        match mode {
            GameMode::Classic   => &mut self.classic,
            GameMode::Depth     => &mut self.depth,
            GameMode::Strategic => &mut self.strategic,
            GameMode::Tactical  => &mut self.tactical,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_games: u32,
    pub total_wins: u32,
    pub total_losses: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub average_attempts: f64,
    /// Seconds.
    pub average_time: f64,
    /// Trailing accuracy values, oldest first.
    pub accuracy_history: Vec<f64>,
    /// Trailing qualifying solve times in seconds, oldest first.
    pub reaction_times: Vec<u64>,
    pub mode_stats: ModeStatsTable,
    pub last_played_at: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillMetrics {
    pub skill_level: f64,
    pub success_rate: f64,
    pub consistency_score: f64,
    pub reaction_speed: f64,
    pub failure_streak: u32,
    pub win_streak: u32,
    /// Computed but not consumed by the level generator.
    pub difficulty_modifier: f64,
}

impl Default for SkillMetrics {
    fn default() -> Self {
        SkillMetrics {
            skill_level: 50.0,
            success_rate: 0.5,
            consistency_score: 0.5,
            reaction_speed: 0.5,
            failure_streak: 0,
            win_streak: 0,
            difficulty_modifier: 1.0,
        }
    }
}

impl SkillMetrics {
    pub fn tier(&self) -> SkillTier {
        SkillTier::from_level(self.skill_level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillTier {
    Novice,
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Master,
}

impl SkillTier {
    pub fn from_level(skill_level: f64) -> Self {
        if skill_level >= 90.0 {
            SkillTier::Master
        } else if skill_level >= 75.0 {
            SkillTier::Expert
        } else if skill_level >= 60.0 {
            SkillTier::Advanced
        } else if skill_level >= 45.0 {
            SkillTier::Intermediate
        } else if skill_level >= 30.0 {
            SkillTier::Beginner
        } else {
            SkillTier::Novice
        }
    }
}

impl fmt::Display for SkillTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkillTier::Novice       => "Novice",
            SkillTier::Beginner     => "Beginner",
            SkillTier::Intermediate => "Intermediate",
            SkillTier::Advanced     => "Advanced",
            SkillTier::Expert       => "Expert",
            SkillTier::Master       => "Master",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        let cases = [
            (10.0, SkillTier::Novice),
            (29.9, SkillTier::Novice),
            (30.0, SkillTier::Beginner),
            (44.9, SkillTier::Beginner),
            (45.0, SkillTier::Intermediate),
            (59.9, SkillTier::Intermediate),
            (60.0, SkillTier::Advanced),
            (74.9, SkillTier::Advanced),
            (75.0, SkillTier::Expert),
            (89.9, SkillTier::Expert),
            (90.0, SkillTier::Master),
            (100.0, SkillTier::Master),
        ];
        for (level, tier) in cases {
            assert_eq!(SkillTier::from_level(level), tier, "skill {level}");
        }
        assert_eq!(SkillMetrics::default().tier(), SkillTier::Intermediate);
    }
}
