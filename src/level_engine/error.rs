use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {event} while {state}")]
    InvalidTransition { event: &'static str, state: &'static str },

    #[error("guess {guess} is outside the range {min}..={max}")]
    GuessOutOfRange { guess: i64, min: i64, max: i64 },

    #[error("time limit of {limit_secs}s has run out")]
    TimeExpired { limit_secs: u32 },

    #[error("no level has been generated yet")]
    NoLevel,
}
