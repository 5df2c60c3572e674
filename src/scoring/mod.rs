pub mod engine;
pub mod inputs;
pub mod random;
pub mod terms;
pub mod validation;

pub use engine::{calculate_score, calculate_score_with_rng, ScoreBreakdown, ScoreResult, TermContribution};
pub use inputs::{ComplimentEntry, FavoritismInputs, Personality};
pub use random::{draw_random_factor, make_rng};
pub use validation::validate_inputs;
