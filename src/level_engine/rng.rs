use rand::Rng;

/// Park-Miller modulus, 2^31 - 1.
pub const MODULUS: i64 = 2_147_483_647;
const MULTIPLIER: i64 = 16_807;

/// A Lehmer / Park-Miller multiplicative stream.
///
/// Two streams built from the same seed yield the same infinite sequence.
/// Draws take `&mut self`, so one stream has exactly one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededStream {
    state: i64,
}

impl SeededStream {
    /// Normalize `seed` into `[1, MODULUS - 1]`.
    pub fn new(seed: i64) -> Self {
        let mut state = seed % MODULUS;
        if state <= 0 {
            state += MODULUS - 1;
        }
        // -2147483646 is the only input the remap leaves at the fixed point 0.
        if state == 0 {
            state = MODULUS - 1;
        }
        SeededStream { state }
    }

    /// Advance the stream; returns a value in `[0, 1)`.
    pub fn draw(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER) % MODULUS;
        (self.state - 1) as f64 / (MODULUS - 1) as f64
    }

    /// Uniform integer in `[min, max]`, both inclusive. Panics if `min > max`.
    pub fn draw_int(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "draw_int called with min {min} > max {max}");
        // i128 so the full i64 span neither overflows nor rounds past `max`.
        let span = (max as i128 - min as i128 + 1) as f64;
        let offset = (self.draw() * span).floor() as i128;
        (min as i128 + offset).min(max as i128) as i64
    }
}

/// Mint a seed for a fresh game from OS entropy. Not reproducible; never
/// used on the deterministic generation path.
pub fn fresh_seed() -> i64 {
    rand::thread_rng().gen_range(1..MODULUS)
}
