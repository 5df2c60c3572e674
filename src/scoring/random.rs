use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lower bound of the random factor R.
pub const RANDOM_FACTOR_MIN: f64 = 0.9;
/// Upper bound of the random factor R.
pub const RANDOM_FACTOR_MAX: f64 = 1.1;

/// Draw R uniformly from [0.9, 1.1].
pub fn draw_random_factor<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(RANDOM_FACTOR_MIN..=RANDOM_FACTOR_MAX)
}

pub fn is_valid_random_factor(r: f64) -> bool {
    (RANDOM_FACTOR_MIN..=RANDOM_FACTOR_MAX).contains(&r)
}

/// Build the RNG for a run: seeded when a seed is given, otherwise from OS entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            log::debug!("Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}
