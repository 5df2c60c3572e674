//! The individual terms of the favoritism formula.
//!
//! Each term is a pure function of its inputs. The integrals are evaluated
//! numerically even though every integrand is constant in time, so the
//! results carry the quadrature rule's rounding rather than the closed form.

use nalgebra::{DVector, Matrix2};
use quadrature::clenshaw_curtis;

use super::inputs::{ComplimentEntry, Personality};

/// Absolute error target passed to every quadrature call.
pub const QUADRATURE_TOLERANCE: f64 = 1e-9;

pub const CRISIS_MULTIPLIER: f64 = 1.5;
pub const SOCIAL_MEDIA_MULTIPLIER: f64 = 1.3;

/// H: boost for a sibling who helped during a crisis.
pub fn crisis_multiplier(helped_during_crisis: bool) -> f64 {
    if helped_during_crisis {
        CRISIS_MULTIPLIER
    } else {
        1.0
    }
}

/// S: boost for a sibling active on social media.
pub fn social_media_multiplier(active_on_social_media: bool) -> f64 {
    if active_on_social_media {
        SOCIAL_MEDIA_MULTIPLIER
    } else {
        1.0
    }
}

/// D: exponential decay since last contact.
pub fn decay_factor(decay_constant: f64, time_since_last_contact: f64) -> f64 {
    (-decay_constant * time_since_last_contact).exp()
}

/// Integral of 1/x₀ over [0, horizon].
pub fn proximity_integral(baseline_distance: f64, horizon: f64) -> f64 {
    let output = clenshaw_curtis::integrate(
        |_t| 1.0 / baseline_distance,
        0.0,
        horizon,
        QUADRATURE_TOLERANCE,
    );
    log::debug!(
        "proximity integral: {} ({} evaluations)",
        output.integral,
        output.num_function_evaluations
    );
    output.integral
}

/// Double integral of a constant support level over t in [0, horizon], x in [0, 1].
///
/// The inner integral over x is evaluated for every outer sample in t.
pub fn emotional_support_integral(support_level: f64, horizon: f64) -> f64 {
    let output = clenshaw_curtis::integrate(
        |_t| clenshaw_curtis::integrate(|_x| support_level, 0.0, 1.0, QUADRATURE_TOLERANCE).integral,
        0.0,
        horizon,
        QUADRATURE_TOLERANCE,
    );
    log::debug!(
        "emotional support integral: {} ({} outer evaluations)",
        output.integral,
        output.num_function_evaluations
    );
    output.integral
}

/// Sum of reciprocal sibling distances. Constant in time.
pub fn sibling_proximity(sibling_distances: &[f64]) -> f64 {
    sibling_distances.iter().map(|distance| 1.0 / distance).sum()
}

/// Integral of the sibling proximity over [0, horizon]. This is the formula's denominator.
pub fn sibling_proximity_integral(sibling_distances: &[f64], horizon: f64) -> f64 {
    let output = clenshaw_curtis::integrate(
        |_t| sibling_proximity(sibling_distances),
        0.0,
        horizon,
        QUADRATURE_TOLERANCE,
    );
    log::debug!(
        "sibling proximity integral: {} ({} evaluations)",
        output.integral,
        output.num_function_evaluations
    );
    output.integral
}

/// Determinant of the diagonal gift matrix [[emotional, 0], [0, practical]].
pub fn gift_matrix_determinant(gift_emotional: f64, gift_practical: f64) -> f64 {
    Matrix2::new(gift_emotional, 0.0, 0.0, gift_practical).determinant()
}

/// Dot product of compliment values and weights, in entry order.
pub fn compliment_score(compliments: &[ComplimentEntry]) -> f64 {
    let values = DVector::from_iterator(compliments.len(), compliments.iter().map(|c| c.value));
    let weights = DVector::from_iterator(compliments.len(), compliments.iter().map(|c| c.weight));
    values.dot(&weights)
}

/// ln(1 + f)
pub fn frequency_term(initial_frequency: f64) -> f64 {
    (1.0 + initial_frequency).ln()
}

pub fn personality_score(traits: &Personality, weights: &Personality) -> f64 {
    traits.weighted_by(weights)
}
