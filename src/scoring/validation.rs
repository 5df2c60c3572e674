use std::collections::HashSet;

use super::inputs::FavoritismInputs;

/// Validate formula inputs at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_inputs(inputs: &FavoritismInputs) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let scalars = [
        ("horizon_days", inputs.horizon_days),
        ("baseline_distance", inputs.baseline_distance),
        ("gift_emotional", inputs.gift_emotional),
        ("gift_practical", inputs.gift_practical),
        ("initial_frequency", inputs.initial_frequency),
        ("birth_order_weight", inputs.birth_order_weight),
        ("major_life_events", inputs.major_life_events),
        ("decay_constant", inputs.decay_constant),
        ("time_since_last_contact", inputs.time_since_last_contact),
        ("emotional_support_level", inputs.emotional_support_level),
        ("traits.intelligence", inputs.traits.intelligence),
        ("traits.emotional_sensitivity", inputs.traits.emotional_sensitivity),
        ("traits.wealth", inputs.traits.wealth),
        ("traits.talent", inputs.traits.talent),
        ("trait_weights.intelligence", inputs.trait_weights.intelligence),
        ("trait_weights.emotional_sensitivity", inputs.trait_weights.emotional_sensitivity),
        ("trait_weights.wealth", inputs.trait_weights.wealth),
        ("trait_weights.talent", inputs.trait_weights.talent),
    ];
    for (name, value) in scalars {
        if !value.is_finite() {
            errors.push(format!("inputs.{}: must be a finite number", name));
        }
    }

    if inputs.horizon_days <= 0.0 {
        errors.push("inputs.horizon_days: must be positive".to_string());
    }

    if inputs.baseline_distance <= 0.0 {
        errors.push("inputs.baseline_distance: must be positive".to_string());
    } else if inputs.baseline_distance.is_finite()
        && !(1.0 / inputs.baseline_distance).is_finite()
    {
        errors.push(format!(
            "inputs.baseline_distance: too small, 1/{} overflows",
            inputs.baseline_distance
        ));
    }

    if inputs.initial_frequency <= -1.0 {
        errors.push("inputs.initial_frequency: must be greater than -1".to_string());
    }

    if inputs.time_since_last_contact < 0.0 {
        errors.push("inputs.time_since_last_contact: must be non-negative".to_string());
    }

    // An empty or non-positive distance list makes the denominator zero or undefined
    if inputs.sibling_distances.is_empty() {
        errors.push("inputs.sibling_distances: at least one distance is required".to_string());
    }
    for (i, distance) in inputs.sibling_distances.iter().enumerate() {
        if !(distance.is_finite() && *distance > 0.0) {
            errors.push(format!(
                "inputs.sibling_distances[{}]: must be positive and finite, got {}",
                i, distance
            ));
        }
    }

    let mut seen = HashSet::new();
    for (i, entry) in inputs.compliments.iter().enumerate() {
        if entry.category.trim().is_empty() {
            errors.push(format!("inputs.compliments[{}].category: must not be empty", i));
        } else if !seen.insert(entry.category.as_str()) {
            errors.push(format!(
                "inputs.compliments[{}].category: duplicate category '{}'",
                i, entry.category
            ));
        }
        if !entry.value.is_finite() {
            errors.push(format!("inputs.compliments[{}].value: must be a finite number", i));
        }
        if !entry.weight.is_finite() {
            errors.push(format!("inputs.compliments[{}].weight: must be a finite number", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
