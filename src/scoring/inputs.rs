use serde::{Deserialize, Deserializer, Serialize};

/// Every input the favoritism formula reads.
///
/// `Default` holds the canonical literals. Config files only need to name the
/// fields they want to change; everything else falls back to the default.
///
/// Example YAML:
/// ```yaml
/// inputs:
///   horizon_days: 365
///   time_since_last_contact: "36h"
///   sibling_distances: [100, 50, 10]
///   compliments:
///     - { category: cooking, value: 10, weight: 1 }
///     - { category: appearance, value: 5, weight: 0.5 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FavoritismInputs {
    /// Integration horizon in days (upper bound of every time integral)
    pub horizon_days: f64,

    /// Distance whose reciprocal is the proximity integrand
    pub baseline_distance: f64,

    pub gift_emotional: f64,
    pub gift_practical: f64,

    /// Contact frequency; enters the formula as ln(1 + f)
    pub initial_frequency: f64,

    pub birth_order_weight: f64,
    pub major_life_events: f64,
    pub helped_during_crisis: bool,
    pub active_on_social_media: bool,

    /// Exponential decay rate per day
    pub decay_constant: f64,

    /// Days since last contact. Accepts a number of days or a duration such as "36h".
    #[serde(deserialize_with = "deserialize_days")]
    pub time_since_last_contact: f64,

    /// Constant integrand of the emotional support double integral
    pub emotional_support_level: f64,

    /// Trait scores. Fields left out keep their default value.
    #[serde(deserialize_with = "deserialize_traits")]
    pub traits: Personality,

    /// Trait weights. Fields left out keep their default value.
    #[serde(deserialize_with = "deserialize_trait_weights")]
    pub trait_weights: Personality,

    /// Distances to each sibling; only their reciprocal sum matters
    pub sibling_distances: Vec<f64>,

    /// Compliment categories, each carrying its own weight
    pub compliments: Vec<ComplimentEntry>,
}

impl Default for FavoritismInputs {
    fn default() -> Self {
        Self {
            horizon_days: 365.0,
            baseline_distance: 20.0,
            gift_emotional: 5.0,
            gift_practical: 2.0,
            initial_frequency: 7.0,
            birth_order_weight: 1.2,
            major_life_events: 3.0,
            helped_during_crisis: true,
            active_on_social_media: true,
            decay_constant: 0.05,
            time_since_last_contact: 7.0,
            emotional_support_level: 8.0,
            traits: DEFAULT_TRAITS,
            trait_weights: DEFAULT_TRAIT_WEIGHTS,
            sibling_distances: vec![100.0, 50.0, 10.0],
            compliments: vec![
                ComplimentEntry::new("cooking", 10.0, 1.0),
                ComplimentEntry::new("appearance", 5.0, 0.5),
                ComplimentEntry::new("intelligence", 8.0, 0.75),
            ],
        }
    }
}

const DEFAULT_TRAITS: Personality = Personality {
    intelligence: 7.0,
    emotional_sensitivity: 6.0,
    wealth: 9.0,
    talent: 8.0,
};

const DEFAULT_TRAIT_WEIGHTS: Personality = Personality {
    intelligence: 1.2,
    emotional_sensitivity: 1.5,
    wealth: 1.1,
    talent: 1.3,
};

/// The four personality traits. Used both for the trait scores and for their weights.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Personality {
    pub intelligence: f64,
    pub emotional_sensitivity: f64,
    pub wealth: f64,
    pub talent: f64,
}

impl Personality {
    /// Weighted sum of the traits, accumulated in declaration order.
    pub fn weighted_by(&self, weights: &Personality) -> f64 {
        weights.intelligence * self.intelligence
            + weights.emotional_sensitivity * self.emotional_sensitivity
            + weights.wealth * self.wealth
            + weights.talent * self.talent
    }
}

/// Partial personality from config; unset fields fall back to a base value.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PersonalityOverride {
    intelligence: Option<f64>,
    emotional_sensitivity: Option<f64>,
    wealth: Option<f64>,
    talent: Option<f64>,
}

impl PersonalityOverride {
    fn apply(self, base: Personality) -> Personality {
        Personality {
            intelligence: self.intelligence.unwrap_or(base.intelligence),
            emotional_sensitivity: self
                .emotional_sensitivity
                .unwrap_or(base.emotional_sensitivity),
            wealth: self.wealth.unwrap_or(base.wealth),
            talent: self.talent.unwrap_or(base.talent),
        }
    }
}

fn deserialize_traits<'de, D>(deserializer: D) -> Result<Personality, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(PersonalityOverride::deserialize(deserializer)?.apply(DEFAULT_TRAITS))
}

fn deserialize_trait_weights<'de, D>(deserializer: D) -> Result<Personality, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(PersonalityOverride::deserialize(deserializer)?.apply(DEFAULT_TRAIT_WEIGHTS))
}

/// A compliment category paired with its weight.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ComplimentEntry {
    pub category: String,
    pub value: f64,
    pub weight: f64,
}

impl ComplimentEntry {
    pub fn new(category: &str, value: f64, weight: f64) -> Self {
        Self {
            category: category.to_string(),
            value,
            weight,
        }
    }
}

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Deserialize)]
#[serde(untagged)]
enum DaysRepr {
    Days(f64),
    Duration(String),
}

/// Parse a day count given either as a bare number or as a humantime duration.
pub fn parse_days(s: &str) -> anyhow::Result<f64> {
    let s = s.trim();
    if let Ok(days) = s.parse::<f64>() {
        return Ok(days);
    }
    let duration = humantime::parse_duration(s)?;
    Ok(duration.as_secs_f64() / SECONDS_PER_DAY)
}

fn deserialize_days<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match DaysRepr::deserialize(deserializer)? {
        DaysRepr::Days(days) => Ok(days),
        DaysRepr::Duration(s) => parse_days(&s).map_err(|e| {
            serde::de::Error::custom(format!("invalid duration '{}': {}", s, e))
        }),
    }
}
