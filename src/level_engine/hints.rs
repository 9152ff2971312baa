use crate::level_engine::models::{Feedback, Hint, HintFeedback, HintStyle};

/// Fixed denominator for the hot/cold ratio. It does not scale with the
/// level's actual range, so wide tactical ranges rarely reach "burning".
pub const HOT_COLD_SCALE: f64 = 100.0;

/// Attempts-left threshold at which the penalty style raises its warning.
pub const CRITICAL_ATTEMPTS: u32 = 2;

/// Directional feedback plus the style-specific hint for a wrong guess.
///
/// The caller handles `guess == target` before calling; an equal guess is
/// reported as [`Feedback::Lower`].
pub fn evaluate_guess(
    guess: i64,
    target: i64,
    hint_style: HintStyle,
    attempts_left: u32,
) -> HintFeedback {
    let feedback = if guess < target { Feedback::Higher } else { Feedback::Lower };
    let distance = target.abs_diff(guess);

    match hint_style {
        HintStyle::Basic => HintFeedback { feedback, hint: None, penalty: None },
        HintStyle::Distance => HintFeedback {
            feedback,
            hint: Some(distance_band(distance)),
            penalty: None,
        },
        HintStyle::HotCold => HintFeedback {
            feedback,
            hint: Some(thermal_band(distance as f64 / HOT_COLD_SCALE)),
            penalty: None,
        },
        HintStyle::Penalty => {
            let critical = attempts_left <= CRITICAL_ATTEMPTS;
            HintFeedback {
                feedback,
                hint: critical.then_some(Hint::CriticalAttempts),
                penalty: Some(critical),
            }
        }
    }
}

/// Absolute-distance band used by depth mode.
pub fn distance_band(distance: u64) -> Hint {
    match distance {
        0..=2  => Hint::VeryClose,
        3..=5  => Hint::GettingWarm,
        6..=10 => Hint::Moderate,
        _      => Hint::Far,
    }
}

/// Ratio band used by tactical mode.
pub fn thermal_band(ratio: f64) -> Hint {
    if ratio <= 0.05 {
        Hint::BurningHot
    } else if ratio <= 0.10 {
        Hint::VeryHot
    } else if ratio <= 0.20 {
        Hint::Warm
    } else if ratio <= 0.40 {
        Hint::Cool
    } else {
        Hint::Freezing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_follows_target() {
        assert_eq!(evaluate_guess(3, 7, HintStyle::Basic, 4).feedback, Feedback::Higher);
        assert_eq!(evaluate_guess(9, 7, HintStyle::Basic, 4).feedback, Feedback::Lower);
    }

    #[test]
    fn basic_style_has_no_hint_or_penalty() {
        let fb = evaluate_guess(1, 10, HintStyle::Basic, 1);
        assert_eq!(fb.hint, None);
        assert_eq!(fb.penalty, None);
    }

    #[test]
    fn distance_bands_have_inclusive_upper_edges() {
        let cases = [
            (48, Hint::VeryClose),
            (45, Hint::GettingWarm),
            (40, Hint::Moderate),
            (39, Hint::Far),
            (52, Hint::VeryClose),
            (61, Hint::Far),
        ];
        for (guess, expected) in cases {
            let fb = evaluate_guess(guess, 50, HintStyle::Distance, 5);
            assert_eq!(fb.hint, Some(expected), "guess {guess}");
        }
    }

    #[test]
    fn hot_cold_burning_at_five_percent() {
        let fb = evaluate_guess(45, 50, HintStyle::HotCold, 3);
        assert_eq!(fb.feedback, Feedback::Higher);
        assert_eq!(fb.hint, Some(Hint::BurningHot));
        assert_eq!(fb.hint.map(Hint::text), Some("Burning hot!"));
        assert_eq!(fb.penalty, None);
    }

    #[test]
    fn hot_cold_bands_use_fixed_denominator() {
        let cases = [
            (6, Hint::VeryHot),
            (10, Hint::VeryHot),
            (20, Hint::Warm),
            (40, Hint::Cool),
            (41, Hint::Freezing),
        ];
        for (distance, expected) in cases {
            let fb = evaluate_guess(100, 100 + distance, HintStyle::HotCold, 3);
            assert_eq!(fb.hint, Some(expected), "distance {distance}");
        }
    }

    #[test]
    fn penalty_only_when_attempts_critical() {
        let calm = evaluate_guess(1, 5, HintStyle::Penalty, 3);
        assert_eq!(calm.hint, None);
        assert_eq!(calm.penalty, Some(false));

        for left in [0, 1, 2] {
            let critical = evaluate_guess(1, 5, HintStyle::Penalty, left);
            assert_eq!(critical.hint, Some(Hint::CriticalAttempts));
            assert_eq!(critical.penalty, Some(true));
        }
    }

    #[test]
    fn evaluation_is_idempotent() {
        let a = evaluate_guess(17, 3, HintStyle::Distance, 2);
        let b = evaluate_guess(17, 3, HintStyle::Distance, 2);
        assert_eq!(a, b);
    }
}
