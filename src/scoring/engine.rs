use anyhow::{bail, Result};
use rand::Rng;
use serde::Serialize;

use super::inputs::FavoritismInputs;
use super::random::{draw_random_factor, is_valid_random_factor, RANDOM_FACTOR_MAX, RANDOM_FACTOR_MIN};
use super::terms;

#[derive(Debug, Clone, Serialize)]
pub struct TermContribution {
    pub label: String,       // e.g. "Proximity", "Decay"
    pub description: String, // e.g. "integral of 1/20 over [0, 365]"
    pub value: f64,          // The term itself
    pub before: f64,         // Numerator before this term
    pub after: f64,          // Numerator after this term
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub terms: Vec<TermContribution>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    pub numerator: f64,
    pub denominator: f64,
    pub random_factor: f64,
    pub breakdown: ScoreBreakdown,
}

/// Compute the favoritism score, drawing the random factor from `rng`.
pub fn calculate_score_with_rng<R: Rng + ?Sized>(
    inputs: &FavoritismInputs,
    rng: &mut R,
) -> Result<ScoreResult> {
    let random_factor = draw_random_factor(rng);
    calculate_score(inputs, random_factor)
}

/// Compute the favoritism score for a given random factor.
///
/// The numerator is the product of every term, multiplied left to right in
/// the order they are recorded in the breakdown. The denominator is the sibling
/// proximity integral.
pub fn calculate_score(inputs: &FavoritismInputs, random_factor: f64) -> Result<ScoreResult> {
    if !is_valid_random_factor(random_factor) {
        bail!(
            "random factor {} outside [{}, {}]",
            random_factor,
            RANDOM_FACTOR_MIN,
            RANDOM_FACTOR_MAX
        );
    }

    let horizon = inputs.horizon_days;
    let baseline_proximity = 1.0 / inputs.baseline_distance;
    if !baseline_proximity.is_finite() {
        bail!(
            "proximity integrand 1/{} is not finite",
            inputs.baseline_distance
        );
    }

    let h = terms::crisis_multiplier(inputs.helped_during_crisis);
    let s = terms::social_media_multiplier(inputs.active_on_social_media);
    let d = terms::decay_factor(inputs.decay_constant, inputs.time_since_last_contact);

    let proximity_integral = terms::proximity_integral(inputs.baseline_distance, horizon);
    let emotional_support_integral =
        terms::emotional_support_integral(inputs.emotional_support_level, horizon);
    let sibling_proximity_integral =
        terms::sibling_proximity_integral(&inputs.sibling_distances, horizon);

    let gift_matrix_determinant =
        terms::gift_matrix_determinant(inputs.gift_emotional, inputs.gift_practical);
    let compliment_score = terms::compliment_score(&inputs.compliments);
    let frequency_term = terms::frequency_term(inputs.initial_frequency);
    let personality_score = terms::personality_score(&inputs.traits, &inputs.trait_weights);

    let factors = [
        (
            "Proximity",
            format!("integral of 1/{} over [0, {}]", inputs.baseline_distance, horizon),
            proximity_integral,
        ),
        (
            "Emotional support",
            format!(
                "double integral of {} over [0, {}] x [0, 1]",
                inputs.emotional_support_level, horizon
            ),
            emotional_support_integral,
        ),
        (
            "Gift matrix",
            format!("det diag({}, {})", inputs.gift_emotional, inputs.gift_practical),
            gift_matrix_determinant,
        ),
        (
            "Compliments",
            format!("{} weighted categories", inputs.compliments.len()),
            compliment_score,
        ),
        (
            "Frequency",
            format!("ln(1 + {})", inputs.initial_frequency),
            frequency_term,
        ),
        (
            "Personality",
            "weighted traits".to_string(),
            personality_score,
        ),
        (
            "Birth order",
            "weight".to_string(),
            inputs.birth_order_weight,
        ),
        (
            "Life events",
            "count".to_string(),
            inputs.major_life_events,
        ),
        (
            "Crisis help",
            format!("helped: {}", inputs.helped_during_crisis),
            h,
        ),
        (
            "Social media",
            format!("active: {}", inputs.active_on_social_media),
            s,
        ),
        (
            "Decay",
            format!(
                "exp(-{} * {} days)",
                inputs.decay_constant, inputs.time_since_last_contact
            ),
            d,
        ),
        (
            "Random",
            format!("uniform in [{}, {}]", RANDOM_FACTOR_MIN, RANDOM_FACTOR_MAX),
            random_factor,
        ),
    ];

    let mut numerator = 1.0;
    let mut contributions = Vec::with_capacity(factors.len());
    for (label, description, value) in factors {
        let before = numerator;
        numerator *= value;
        log::debug!("{}: {} (numerator {} -> {})", label, value, before, numerator);
        if !value.is_finite() || !numerator.is_finite() {
            bail!(
                "{} term {} drives the numerator to {}",
                label,
                value,
                numerator
            );
        }
        contributions.push(TermContribution {
            label: label.to_string(),
            description,
            value,
            before,
            after: numerator,
        });
    }

    let denominator = sibling_proximity_integral;
    if !(denominator.is_finite() && denominator > 0.0) {
        bail!(
            "sibling proximity integral must be positive and finite, got {}",
            denominator
        );
    }

    let score = numerator / denominator;
    if !score.is_finite() {
        bail!("score {} / {} is not finite", numerator, denominator);
    }

    Ok(ScoreResult {
        score,
        numerator,
        denominator,
        random_factor,
        breakdown: ScoreBreakdown {
            terms: contributions,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::random::make_rng;

    const BASELINE_SCORE: f64 = 80_575_561.627_882_66;

    fn relative_error(actual: f64, expected: f64) -> f64 {
        ((actual - expected) / expected).abs()
    }

    #[test]
    fn test_regression_baseline_with_unit_random_factor() {
        let result = calculate_score(&FavoritismInputs::default(), 1.0).unwrap();
        assert!(
            relative_error(result.score, BASELINE_SCORE) < 1e-9,
            "score {} differs from baseline",
            result.score
        );
        assert!((result.denominator - 47.45).abs() < 1e-4);
        assert_eq!(result.random_factor, 1.0);
    }

    #[test]
    fn test_numerator_is_product_of_terms() {
        let result = calculate_score(&FavoritismInputs::default(), 1.0).unwrap();
        let product: f64 = result.breakdown.terms.iter().map(|t| t.value).product();
        assert_eq!(result.numerator, product);
        assert_eq!(result.score, result.numerator / result.denominator);
    }

    #[test]
    fn test_breakdown_chains_before_and_after() {
        let result = calculate_score(&FavoritismInputs::default(), 1.0).unwrap();
        let terms = &result.breakdown.terms;
        assert_eq!(terms.len(), 12);
        assert_eq!(terms[0].before, 1.0);
        for pair in terms.windows(2) {
            assert_eq!(pair[0].after, pair[1].before);
        }
        assert_eq!(terms.last().unwrap().after, result.numerator);
    }

    #[test]
    fn test_breakdown_term_values() {
        let result = calculate_score(&FavoritismInputs::default(), 1.0).unwrap();
        let value = |label: &str| {
            result
                .breakdown
                .terms
                .iter()
                .find(|t| t.label == label)
                .map(|t| t.value)
                .unwrap()
        };
        assert!((value("Proximity") - 18.25).abs() < 1e-6);
        assert!((value("Emotional support") - 2920.0).abs() < 1e-4);
        assert_eq!(value("Gift matrix"), 10.0);
        assert_eq!(value("Compliments"), 18.5);
        assert_eq!(value("Crisis help"), 1.5);
        assert_eq!(value("Social media"), 1.3);
        assert!((value("Decay") - 0.7046880897).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent_for_fixed_random_factor() {
        let inputs = FavoritismInputs::default();
        let a = calculate_score(&inputs, 1.05).unwrap();
        let b = calculate_score(&inputs, 1.05).unwrap();
        assert_eq!(a.score.to_bits(), b.score.to_bits());
    }

    #[test]
    fn test_same_seed_same_score() {
        let inputs = FavoritismInputs::default();
        let a = calculate_score_with_rng(&inputs, &mut make_rng(Some(2024))).unwrap();
        let b = calculate_score_with_rng(&inputs, &mut make_rng(Some(2024))).unwrap();
        assert_eq!(a.score.to_bits(), b.score.to_bits());
    }

    #[test]
    fn test_unseeded_score_within_ten_percent() {
        let inputs = FavoritismInputs::default();
        let mut rng = make_rng(None);
        for _ in 0..20 {
            let result = calculate_score_with_rng(&inputs, &mut rng).unwrap();
            assert!(result.score >= BASELINE_SCORE * 0.9 * (1.0 - 1e-9));
            assert!(result.score <= BASELINE_SCORE * 1.1 * (1.0 + 1e-9));
        }
    }

    #[test]
    fn test_score_scales_linearly_with_random_factor() {
        let inputs = FavoritismInputs::default();
        let base = calculate_score(&inputs, 1.0).unwrap();
        let high = calculate_score(&inputs, 1.1).unwrap();
        assert!(relative_error(high.score, base.score * 1.1) < 1e-12);
    }

    #[test]
    fn test_random_factor_out_of_range_rejected() {
        let inputs = FavoritismInputs::default();
        assert!(calculate_score(&inputs, 1.5).is_err());
        assert!(calculate_score(&inputs, f64::NAN).is_err());
    }

    #[test]
    fn test_flags_off_reduce_score() {
        let inputs = FavoritismInputs {
            helped_during_crisis: false,
            active_on_social_media: false,
            ..FavoritismInputs::default()
        };
        let result = calculate_score(&inputs, 1.0).unwrap();
        assert!(relative_error(result.score, BASELINE_SCORE / (1.5 * 1.3)) < 1e-9);
    }

    #[test]
    fn test_numerator_overflow_is_error() {
        let inputs = FavoritismInputs {
            gift_emotional: 1e300,
            ..FavoritismInputs::default()
        };
        let err = calculate_score(&inputs, 1.0).unwrap_err();
        assert!(err.to_string().contains("numerator to inf"), "{}", err);
    }

    #[test]
    fn test_subnormal_baseline_distance_is_error() {
        let inputs = FavoritismInputs {
            baseline_distance: 1e-320,
            ..FavoritismInputs::default()
        };
        let err = calculate_score(&inputs, 1.0).unwrap_err();
        assert!(err.to_string().contains("proximity integrand"), "{}", err);
    }

    #[test]
    fn test_empty_sibling_distances_is_error() {
        let inputs = FavoritismInputs {
            sibling_distances: vec![],
            ..FavoritismInputs::default()
        };
        let err = calculate_score(&inputs, 1.0).unwrap_err();
        assert!(err.to_string().contains("sibling proximity integral"));
    }
}
