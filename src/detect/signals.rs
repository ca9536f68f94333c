//! Bilingual keyword detectors over the lowercased message.

use regex::Regex;

use crate::engine::state::NutritionAdherence;

const WORKOUT_COMPLETION_KEYWORDS: &[&str] = &[
    "سويت تمرين",
    "completed workout",
    "finished workout",
    "done workout",
    "خلصت تمرين",
    "سويت التمرين",
    "workout done",
    "تم التمرين",
    "سويت تمارين",
    "did workout",
    "finished",
    "خلصت",
    "سويت الرياضة",
    "exercised",
    "worked out",
];

const FULL_ADHERENCE_KEYWORDS: &[&str] = &[
    "اتبعت الخطة",
    "followed plan",
    "stuck to plan",
    "اتبعت الوجبات",
    "اكلت حسب الخطة",
    "ate according to plan",
    "nutrition plan followed",
    "اتبعت التغذية",
    "nutrition followed",
];

const PARTIAL_ADHERENCE_KEYWORDS: &[&str] = &[
    "جزئياً",
    "partially",
    "بعض",
    "some",
    "قليل",
    "little",
    "ما كل شي",
    "not everything",
    "بعض الوجبات",
    "some meals",
];

const SKIPPED_ADHERENCE_KEYWORDS: &[&str] = &[
    "ما اتبعت",
    "didn't follow",
    "skipped",
    "تجاهلت",
    "ignored",
    "ما اكلت",
    "didn't eat",
    "ما اتبعت الخطة",
    "didn't follow plan",
];

const PLAN_KEYWORDS: &[&str] = &[
    "خطة",
    "plan",
    "برنامج",
    "program",
    "تمرين جديد",
    "new workout",
    "نسوي خطة",
    "create plan",
    "نبدأ خطة",
    "start plan",
    "تبين خطة",
    "want plan",
    "أريد خطة",
    "i want plan",
];

const TIRED_BUSY_KEYWORDS: &[&str] = &[
    "تعبان",
    "tired",
    "مشغولة",
    "busy",
    "ما أقدر",
    "can't",
    "صعب",
    "difficult",
    "ما عندي وقت",
    "no time",
    "مش قادرة",
    "can't do",
    "أخف",
    "lighter",
    "أسهل",
    "easier",
    "ما أقدر أكمل",
    "can't finish",
];

const NUTRITION_KEYWORDS: &[&str] = &[
    "وجبات",
    "meals",
    "meal plan",
    "nutrition",
    "تغذية",
    "طعام",
    "food",
    "خطة وجبات",
    "برنامج غذائي",
    "diet",
    "سعرات",
    "calories",
    "جوعان",
    "hungry",
    "تعبان",
    "tired",
    "مشغولة",
    "busy",
    "ما عندي",
    "don't have",
    "ما عندي مكونات",
    "missing ingredients",
    "بديل",
    "substitute",
    "alternative",
];

/// Subset of nutrition keywords that count as an explicit meal-plan request
/// (hunger/fatigue mentions do not).
const EXPLICIT_NUTRITION_KEYWORDS: &[&str] = &[
    "وجبات",
    "meals",
    "meal plan",
    "nutrition",
    "تغذية",
    "طعام",
    "food",
    "خطة وجبات",
    "برنامج غذائي",
    "diet",
    "سعرات",
    "calories",
];

const STRUGGLE_KEYWORDS: &[&str] = &[
    "can't do",
    "too hard",
    "difficult",
    "pain",
    "hurt",
    "ما أقدر",
    "صعب",
    "ألم",
    "يوجع",
    "مؤلم",
    "struggling",
    "too difficult",
    "very hard",
    "impossible",
];

const VIDEO_KEYWORDS: &[&str] = &[
    "فيديو",
    "video",
    "يوتيوب",
    "youtube",
    "تمرين فيديو",
    "workout video",
    "أعطني فيديو",
    "give me video",
    "فيديو تمرين",
    "exercise video",
];

const STUCK_KEYWORDS: &[&str] = &[
    "ما أعرف",
    "don't know",
    "محتارة",
    "confused",
    "ما أعرف كيف",
    "help me",
    "ساعدني",
    "lost",
    "ضايعة",
    "stuck",
];

const IMAGE_KEYWORDS: &[&str] = &[
    "صورة",
    "image",
    "شكل",
    "form",
    "كيف",
    "how",
    "مثال",
    "example",
    "أعطني صورة",
    "show me",
    "أشوف",
    "see",
    "demonstrate",
    "شرح",
];

const EXERCISE_KEYWORDS: &[&str] = &[
    "squat",
    "lunge",
    "plank",
    "bridge",
    "pushup",
    "deadlift",
    "قرفصاء",
    "لانج",
    "بلانك",
    "جسر",
    "ضغط",
    "رفع",
];

const EQUIPMENT_KEYWORDS: &[&str] = &[
    "leg press",
    "chest press",
    "cable machine",
    "lat pulldown",
    "treadmill",
    "rowing machine",
    "smith machine",
    "shoulder press",
    "hip abductor",
    "stair climber",
    "barbell",
    "dumbbell",
    "جهاز",
    "machine",
    "equipment",
    "gym equipment",
    "ضغط الأرجل",
    "ضغط الصدر",
    "كيبل",
    "مشي",
    "تجديف",
];

fn contains_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| lowered.contains(kw))
}

/// True when the user reports having completed a workout.
#[must_use]
pub fn detect_workout_completion(lowered: &str) -> bool {
    contains_any(lowered, WORKOUT_COMPLETION_KEYWORDS)
}

/// Classify reported nutrition-plan adherence, full checked before partial
/// before skipped.
#[must_use]
pub fn detect_nutrition_adherence(lowered: &str) -> Option<NutritionAdherence> {
    if contains_any(lowered, FULL_ADHERENCE_KEYWORDS) {
        return Some(NutritionAdherence::Full);
    }
    if contains_any(lowered, PARTIAL_ADHERENCE_KEYWORDS) {
        return Some(NutritionAdherence::Partial);
    }
    if contains_any(lowered, SKIPPED_ADHERENCE_KEYWORDS) {
        return Some(NutritionAdherence::Skipped);
    }
    None
}

/// True when the user explicitly asks for a workout plan.
#[must_use]
pub fn asks_for_plan(lowered: &str) -> bool {
    contains_any(lowered, PLAN_KEYWORDS)
}

/// True when the user signals fatigue, busyness, or difficulty finishing.
#[must_use]
pub fn reports_tired_or_busy(lowered: &str) -> bool {
    contains_any(lowered, TIRED_BUSY_KEYWORDS)
}

/// True when the user brings up food, meals, or missing ingredients.
#[must_use]
pub fn asks_about_nutrition(lowered: &str) -> bool {
    contains_any(lowered, NUTRITION_KEYWORDS)
}

/// True for an explicit meal-plan request (stricter than
/// [`asks_about_nutrition`]).
#[must_use]
pub fn explicit_nutrition_request(lowered: &str) -> bool {
    contains_any(lowered, EXPLICIT_NUTRITION_KEYWORDS)
}

/// True when the user says workouts are too hard or painful.
#[must_use]
pub fn reports_struggle(lowered: &str) -> bool {
    contains_any(lowered, STRUGGLE_KEYWORDS)
}

/// True when the user explicitly asks for a video.
#[must_use]
pub fn asks_for_video(lowered: &str) -> bool {
    contains_any(lowered, VIDEO_KEYWORDS)
}

/// True when the user sounds stuck or lost.
#[must_use]
pub fn seems_stuck(lowered: &str) -> bool {
    contains_any(lowered, STUCK_KEYWORDS)
}

/// True when the user asks to see an exercise (an image keyword plus a
/// known exercise name).
#[must_use]
pub fn asks_for_exercise_image(lowered: &str) -> bool {
    contains_any(lowered, IMAGE_KEYWORDS) && contains_any(lowered, EXERCISE_KEYWORDS)
}

/// True when the user mentions gym machines or equipment.
#[must_use]
pub fn mentions_gym_equipment(lowered: &str) -> bool {
    contains_any(lowered, EQUIPMENT_KEYWORDS)
}

/// Compiled missing-ingredient patterns ("ما عندي بيض", "don't have eggs").
pub struct IngredientScanner {
    patterns: Vec<Regex>,
}

impl IngredientScanner {
    /// Compile the pattern set.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        let sources = [
            r"ما عندي ([\u0600-\u06FF\s]+)",
            r"don't have ([a-z\s]+)",
            r"لا يوجد ([\u0600-\u06FF\s]+)",
            r"no ([a-z\s]+)",
            r"missing ([a-z\s]+)",
        ];
        let patterns = sources
            .iter()
            .map(|src| Regex::new(src))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True when any pattern matches.
    #[must_use]
    pub fn mentions_missing(&self, lowered: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(lowered))
    }

    /// Extract the missing-ingredient captures, one per matching pattern.
    #[must_use]
    pub fn extract(&self, lowered: &str) -> Vec<String> {
        let mut found = Vec::new();
        for pattern in &self.patterns {
            if let Some(caps) = pattern.captures(lowered) {
                if let Some(item) = caps.get(1) {
                    found.push(item.as_str().trim().to_string());
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workout_completion_both_languages() {
        assert!(detect_workout_completion("سويت تمرين اليوم"));
        assert!(detect_workout_completion("just finished workout"));
        assert!(!detect_workout_completion("planning to train tomorrow"));
    }

    #[test]
    fn adherence_precedence_full_over_partial() {
        // "followed plan" and "some" both appear; full wins.
        assert_eq!(
            detect_nutrition_adherence("followed plan, skipped some snacks"),
            Some(NutritionAdherence::Full)
        );
        assert_eq!(
            detect_nutrition_adherence("ما اتبعت الخطة"),
            Some(NutritionAdherence::Skipped)
        );
        assert_eq!(detect_nutrition_adherence("hello"), None);
    }

    #[test]
    fn image_request_needs_both_keyword_groups() {
        assert!(asks_for_exercise_image("show me how to squat"));
        assert!(asks_for_exercise_image("كيف أسوي قرفصاء"));
        assert!(!asks_for_exercise_image("show me your best tips"));
        assert!(!asks_for_exercise_image("i do squats daily"));
    }

    #[test]
    fn equipment_keywords() {
        assert!(mentions_gym_equipment("how do i use the leg press"));
        assert!(mentions_gym_equipment("كيف أستخدم جهاز المشي"));
        assert!(!mentions_gym_equipment("home workout please"));
    }

    #[test]
    fn ingredient_scanner_extracts_trimmed_captures() {
        let scanner = IngredientScanner::new().unwrap();
        assert!(scanner.mentions_missing("i don't have eggs today"));
        let items = scanner.extract("ما عندي بيض");
        assert_eq!(items, vec!["بيض"]);
        assert!(scanner.extract("all stocked up").is_empty());
    }
}
