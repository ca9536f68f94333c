//! Regex-based preference extraction from chat messages.

use regex::Regex;

use crate::engine::state::Preferences;

/// Which preference list a captured phrase belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PreferenceKind {
    FoodDislike,
    Allergy,
    FavoriteFood,
    BreakfastPreference,
    LunchPreference,
    WorkoutDislike,
    Injury,
    MotivationStyle,
}

struct PreferenceRule {
    pattern: Regex,
    kind: PreferenceKind,
}

/// Compiled bilingual preference patterns.
///
/// Each rule captures one phrase; the first match per rule is kept and
/// trimmed. Duplicate suppression happens at merge time in
/// [`Preferences::merge`].
pub struct PreferenceExtractor {
    rules: Vec<PreferenceRule>,
}

impl PreferenceExtractor {
    /// Compile the pattern set.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    #[allow(clippy::too_many_lines)]
    pub fn new() -> Result<Self, regex::Error> {
        use PreferenceKind as K;

        let sources: [(&str, PreferenceKind); 23] = [
            // Dislikes and allergies; allergy patterns carry their own kind.
            (r"i don't like ([a-z\s]+)", K::FoodDislike),
            (r"i hate ([a-z\s]+)", K::FoodDislike),
            (r"i'm allergic to ([a-z\s]+)", K::Allergy),
            (
                r"آكل (?:.*) بس ما احب ([\u0600-\u06FF\s]+)",
                K::FoodDislike,
            ),
            (r"ما أحب ([\u0600-\u06FF\s]+)", K::FoodDislike),
            (r"أكره ([\u0600-\u06FF\s]+)", K::FoodDislike),
            (r"ما عندي حساسية من ([\u0600-\u06FF\s]+)", K::Allergy),
            (r"عندي حساسية من ([\u0600-\u06FF\s]+)", K::Allergy),
            (r"allergic to ([a-z\s]+)", K::Allergy),
            (r"don't have ([a-z\s]+)", K::FoodDislike),
            (r"ما عندي ([\u0600-\u06FF\s]+)", K::FoodDislike),
            // Favorites.
            (r"i love ([a-z\s]+)", K::FavoriteFood),
            (r"i like ([a-z\s]+)", K::FavoriteFood),
            (r"أحب ([\u0600-\u06FF\s]+)", K::FavoriteFood),
            (r"أفضل ([\u0600-\u06FF\s]+)", K::FavoriteFood),
            // Meal preferences.
            (
                r"for breakfast i (?:like|prefer) ([a-z\s]+)",
                K::BreakfastPreference,
            ),
            (
                r"الفطور (?:أحب|أفضل) ([\u0600-\u06FF\s]+)",
                K::BreakfastPreference,
            ),
            (
                r"for lunch i (?:like|prefer) ([a-z\s]+)",
                K::LunchPreference,
            ),
            (
                r"الغداء (?:أحب|أفضل) ([\u0600-\u06FF\s]+)",
                K::LunchPreference,
            ),
            // Workout dislikes, injuries, motivation style.
            (r"i can't do ([a-z\s]+)", K::WorkoutDislike),
            (r"no more ([a-z\s]+)", K::WorkoutDislike),
            (r"injury(?: to)? ([a-z\s]+)", K::Injury),
            (r"hurt my ([a-z\s]+)", K::Injury),
        ];

        let mut rules = Vec::with_capacity(sources.len() + 2);
        for (src, kind) in sources {
            rules.push(PreferenceRule {
                pattern: Regex::new(src)?,
                kind,
            });
        }
        rules.push(PreferenceRule {
            pattern: Regex::new(r"i like when you ([a-z\s]+) me")?,
            kind: PreferenceKind::MotivationStyle,
        });
        rules.push(PreferenceRule {
            pattern: Regex::new(r"حفزني بـ ([\u0600-\u06FF\s]+)")?,
            kind: PreferenceKind::MotivationStyle,
        });

        Ok(Self { rules })
    }

    /// Extract the preferences mentioned in a lowercased message.
    #[must_use]
    pub fn extract(&self, lowered: &str) -> Preferences {
        let mut found = Preferences::default();

        for rule in &self.rules {
            let Some(caps) = rule.pattern.captures(lowered) else {
                continue;
            };
            let Some(item) = caps.get(1) else {
                continue;
            };
            let value = item.as_str().trim().to_string();
            if value.is_empty() {
                continue;
            }
            match rule.kind {
                PreferenceKind::FoodDislike => found.food_dislikes.push(value),
                PreferenceKind::Allergy => found.allergies.push(value),
                PreferenceKind::FavoriteFood => found.favorite_foods.push(value),
                PreferenceKind::BreakfastPreference => found.breakfast_preferences.push(value),
                PreferenceKind::LunchPreference => found.lunch_preferences.push(value),
                PreferenceKind::WorkoutDislike => found.workout_dislikes.push(value),
                PreferenceKind::Injury => found.injuries.push(value),
                PreferenceKind::MotivationStyle => found.motivation_style.push(value),
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> PreferenceExtractor {
        PreferenceExtractor::new().unwrap()
    }

    #[test]
    fn extracts_dislikes_and_allergies() {
        let prefs = extractor().extract("i don't like broccoli and i'm allergic to peanuts");
        assert!(prefs.food_dislikes.iter().any(|d| d.contains("broccoli")));
        assert!(prefs.allergies.iter().any(|a| a.contains("peanuts")));
    }

    #[test]
    fn arabic_allergy_is_classified_as_allergy() {
        let prefs = extractor().extract("عندي حساسية من الفول السوداني");
        assert_eq!(prefs.allergies.len(), 1);
        assert!(prefs.food_dislikes.is_empty());
    }

    #[test]
    fn extracts_meal_and_motivation_preferences() {
        let prefs = extractor().extract("for breakfast i like oats. i like when you push me");
        assert!(prefs
            .breakfast_preferences
            .iter()
            .any(|p| p.contains("oats")));
        assert_eq!(prefs.motivation_style, vec!["push"]);
    }

    #[test]
    fn extracts_workout_dislikes_and_injuries() {
        let prefs = extractor().extract("i can't do burpees, i hurt my knee");
        assert!(prefs.workout_dislikes.iter().any(|d| d.contains("burpees")));
        assert!(prefs.injuries.iter().any(|i| i.contains("knee")));
    }

    #[test]
    fn merge_skips_exact_duplicates() {
        let ex = extractor();
        let mut stored = Preferences::default();
        stored.merge(&ex.extract("i hate olives"));
        stored.merge(&ex.extract("i hate olives"));
        assert_eq!(stored.food_dislikes.len(), 1);
    }

    #[test]
    fn quiet_message_extracts_nothing() {
        assert!(extractor().extract("let's train today").is_empty());
    }
}
