//! Profile completeness scoring.
//!
//! Every populated section adds a fixed weight; the sum is capped at
//! [`MAX_SCORE`]. "Populated" follows truthiness: null, empty text, zero,
//! `false` and empty collections are all treated as missing.

use crate::models::Profile;
use serde_json::Value;

pub const MAX_SCORE: u32 = 100;

const PRIMARY_WEIGHT: u32 = 10;
const EXTENSION_WEIGHT: u32 = 5;

/// Completeness of `profile` as a percentage in `0..=100`.
pub fn score(profile: &Profile) -> u32 {
    let prefs = &profile.job_preferences;
    let salary = &prefs.salary;

    let primary = [
        has_text(&profile.headline),
        has_text(&profile.bio),
        has_text(&profile.location),
        !profile.skills.is_empty(),
        !profile.experience.is_empty(),
        !profile.education.is_empty(),
        !prefs.job_types.is_empty(),
        !prefs.locations.is_empty(),
        has_amount(salary.min) && has_amount(salary.max),
    ];
    let extensions = [
        profile.career_info.as_ref().is_some_and(is_truthy),
        profile.projects.as_ref().is_some_and(is_truthy),
    ];

    let total = weigh(&primary, PRIMARY_WEIGHT) + weigh(&extensions, EXTENSION_WEIGHT);
    total.min(MAX_SCORE)
}

fn weigh(conditions: &[bool], weight: u32) -> u32 {
    conditions.iter().filter(|&&held| held).count() as u32 * weight
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

fn has_amount(value: Option<f64>) -> bool {
    value.is_some_and(|n| n != 0.0 && !n.is_nan())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
