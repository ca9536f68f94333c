//! Body metric and progress math.
//!
//! Everything here is pure and nullable: missing or zero inputs produce
//! `None` rather than a guessed figure.

use crate::engine::profile::UserProfile;

/// Ordered activity multipliers for TDEE. First substring match wins, so
/// the more specific entries must not precede their prefixes.
const ACTIVITY_FACTORS: [(&str, f64); 8] = [
    ("sedentary", 1.2),
    ("light", 1.375),
    ("lightly active", 1.375),
    ("moderate", 1.55),
    ("moderately active", 1.55),
    ("active", 1.725),
    ("very active", 1.9),
    ("athlete", 1.95),
];

/// Fallback multiplier when the activity level matches nothing.
const DEFAULT_ACTIVITY_FACTOR: f64 = 1.45;

/// Derived body metrics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyMetrics {
    /// Body mass index, one decimal.
    pub bmi: Option<f64>,
    /// BMI category label.
    pub bmi_category: Option<&'static str>,
    /// Basal metabolic rate (Mifflin-St Jeor), kcal/day.
    pub bmr: Option<f64>,
    /// Total daily energy expenditure, kcal/day.
    pub tdee: Option<f64>,
    /// Safe weekly weight-change rate, kg.
    pub safe_weekly_rate: Option<f64>,
}

/// Compute all derivable metrics for a profile.
#[must_use]
pub fn compute_metrics(profile: &UserProfile) -> BodyMetrics {
    let gender = profile
        .gender
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let activity = profile.activity_lowered();

    let mut metrics = BodyMetrics::default();

    if let (Some(height_cm), Some(weight_kg)) = (profile.height_cm, profile.weight_kg) {
        let height_m = height_cm / 100.0;
        if height_m > 0.0 && weight_kg != 0.0 {
            let bmi = round_to(weight_kg / (height_m * height_m), 1);
            metrics.bmi = Some(bmi);
            metrics.bmi_category = Some(bmi_category(bmi));
        }
    }

    if let (Some(weight_kg), Some(height_cm), Some(age)) =
        (profile.weight_kg, profile.height_cm, profile.age)
    {
        let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
        let bmr = if gender.starts_with('m') {
            base + 5.0
        } else if gender.starts_with('f') {
            base - 161.0
        } else {
            base
        };
        metrics.bmr = Some(bmr.round());
    }

    if let Some(bmr) = metrics.bmr {
        let factor = ACTIVITY_FACTORS
            .iter()
            .find(|(key, _)| activity.contains(key))
            .map_or(DEFAULT_ACTIVITY_FACTOR, |(_, value)| *value);
        metrics.tdee = Some((bmr * factor).round());
    }

    if let Some(weight_kg) = profile.weight_kg {
        if weight_kg != 0.0 {
            metrics.safe_weekly_rate = Some(round_to(weight_kg * 0.0075, 1));
        }
    }

    metrics
}

/// BMI category label for a computed BMI value.
#[must_use]
pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

/// Estimate goal progress as a percentage of the distance already covered
/// between current and target weight.
///
/// Loss goals report 100 once current weight is at or below target; gain
/// goals report 100 once at or above. Missing or zero weights yield `None`.
#[must_use]
pub fn estimate_progress(
    current: Option<f64>,
    target: Option<f64>,
    goal_lowered: &str,
) -> Option<f64> {
    let current = current.filter(|w| *w != 0.0)?;
    let target = target.filter(|w| *w != 0.0)?;

    let diff = (current - target).abs();
    let max_weight = current.max(target);
    if max_weight == 0.0 {
        return None;
    }

    let progress = ((1.0 - diff / max_weight) * 100.0).round().clamp(0.0, 100.0);

    let losing =
        goal_lowered.contains("weight loss") || goal_lowered.contains("cut") || goal_lowered.contains("lose");
    if losing && current <= target {
        return Some(100.0);
    }

    let gaining = goal_lowered.contains("muscle building")
        || goal_lowered.contains("bulk")
        || goal_lowered.contains("gain");
    if gaining && current >= target {
        return Some(100.0);
    }

    Some(progress)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.cast_signed());
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ids::UserId;

    fn profile(
        weight: Option<f64>,
        height: Option<f64>,
        age: Option<u32>,
        gender: Option<&str>,
        activity: Option<&str>,
    ) -> UserProfile {
        let mut p = UserProfile::new(UserId::new());
        p.weight_kg = weight;
        p.height_cm = height;
        p.age = age;
        p.gender = gender.map(str::to_string);
        p.activity_level = activity.map(str::to_string);
        p
    }

    #[test]
    fn bmi_and_category() {
        let m = compute_metrics(&profile(Some(70.0), Some(175.0), None, None, None));
        assert_eq!(m.bmi, Some(22.9));
        assert_eq!(m.bmi_category, Some("Normal"));
    }

    #[test]
    fn bmi_requires_height_and_weight() {
        let m = compute_metrics(&profile(Some(70.0), None, None, None, None));
        assert_eq!(m.bmi, None);
        let m = compute_metrics(&profile(None, Some(175.0), None, None, None));
        assert_eq!(m.bmi, None);
    }

    #[test]
    fn bmr_by_gender() {
        let base: f64 = 10.0 * 70.0 + 6.25 * 175.0 - 5.0 * 30.0;
        let m = compute_metrics(&profile(Some(70.0), Some(175.0), Some(30), Some("male"), None));
        assert_eq!(m.bmr, Some((base + 5.0).round()));

        let f = compute_metrics(&profile(
            Some(70.0),
            Some(175.0),
            Some(30),
            Some("female"),
            None,
        ));
        assert_eq!(f.bmr, Some((base - 161.0).round()));

        let n = compute_metrics(&profile(Some(70.0), Some(175.0), Some(30), None, None));
        assert_eq!(n.bmr, Some(base.round()));
    }

    #[test]
    fn tdee_first_substring_match_wins() {
        // "lightly active" contains "light" and "active"; the table order
        // makes "light" win, giving 1.375 rather than 1.725.
        let m = compute_metrics(&profile(
            Some(70.0),
            Some(175.0),
            Some(30),
            Some("male"),
            Some("lightly active"),
        ));
        let bmr = m.bmr.unwrap();
        assert_eq!(m.tdee, Some((bmr * 1.375).round()));
    }

    #[test]
    fn tdee_default_factor() {
        let m = compute_metrics(&profile(
            Some(70.0),
            Some(175.0),
            Some(30),
            Some("male"),
            Some("unknown schedule"),
        ));
        let bmr = m.bmr.unwrap();
        assert_eq!(m.tdee, Some((bmr * 1.45).round()));
    }

    #[test]
    fn safe_weekly_rate() {
        let m = compute_metrics(&profile(Some(80.0), None, None, None, None));
        assert_eq!(m.safe_weekly_rate, Some(0.6));
    }

    #[test]
    fn progress_basic() {
        assert_eq!(estimate_progress(Some(80.0), Some(70.0), ""), Some(88.0));
        assert_eq!(estimate_progress(None, Some(70.0), ""), None);
        assert_eq!(estimate_progress(Some(0.0), Some(70.0), ""), None);
    }

    #[test]
    fn progress_goal_overrides() {
        assert_eq!(
            estimate_progress(Some(65.0), Some(70.0), "weight loss"),
            Some(100.0)
        );
        assert_eq!(
            estimate_progress(Some(75.0), Some(70.0), "muscle building"),
            Some(100.0)
        );
        // Loss goal but above target keeps the ratio figure.
        assert_eq!(
            estimate_progress(Some(80.0), Some(70.0), "weight loss"),
            Some(88.0)
        );
    }
}
