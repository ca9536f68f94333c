//! Check-in and support message pools.
//!
//! Messages contain a `{name}` placeholder filled at render time. Pools are
//! non-repeating per user; see the selector in the engine.

/// Arabic check-ins after 2-3 days without a logged workout.
pub const WORKOUT_MESSAGES_2_3_DAYS: &[&str] = &[
    "هاه يا {name}؟ من زمان ما سويتِ تمرين… نسوي شي خفيف اليوم؟",
    "واضح إن عندك انشغال هاليومين… يلا نتحرك شوي بس؟",
    "يومين بدون تمرين عادي… نرجع بخطوة بسيطة ونكمّل 🤍",
];

/// English check-ins after 2-3 days without a logged workout.
pub const WORKOUT_MESSAGES_2_3_DAYS_EN: &[&str] = &[
    "Hey {name}, been a couple days—want to slide back in with something light?",
    "Looks like life's been busy, {name}. Shall we move just a little today?",
    "Two days off is fine! Ready for one quick step together, {name}?",
];

/// Arabic check-ins after 4-6 days.
pub const WORKOUT_MESSAGES_4_6_DAYS: &[&str] = &[
    "يا {name}! اشتقنا لحضورك… نرجع بتمرين خفيف 10 دقايق؟",
    "قرب يكمل أسبوع بدون تمرين… وش رأيك نرجع بشكل بسيط؟",
    "أدري يمكن مشغولة… بس دقيقة واحدة تمرين تفرق كثير.",
];

/// English check-ins after 4-6 days.
pub const WORKOUT_MESSAGES_4_6_DAYS_EN: &[&str] = &[
    "Missed you, {name}! How about a 10-minute comeback session?",
    "Almost a week off—shall we restart with something super simple, {name}?",
    "I know you're busy, {name}, but even one minute of movement helps.",
];

/// Arabic check-ins after 7-13 days.
pub const WORKOUT_MESSAGES_7_13_DAYS: &[&str] = &[
    "{name}! أسبوع تقريباً بدون تمارين… ما نبي ضغط، نبدأ بخطة أسهل؟",
    "صار لك فترة منكفة… نرجع بشي يناسب وقتك؟",
    "اشتقنا لك يا {name}! خطوة بسيطة اليوم وتتحسنين كثير.",
];

/// English check-ins after 7-13 days.
pub const WORKOUT_MESSAGES_7_13_DAYS_EN: &[&str] = &[
    "{name}, it's been about a week—let's restart with an easier plan?",
    "Been a while, {name}. Want to try something that fits your schedule?",
    "We miss you, {name}! One small step today can change the vibe.",
];

/// Arabic check-ins after 14 or more days.
pub const WORKOUT_MESSAGES_14_PLUS_DAYS: &[&str] = &[
    "{name}… فاهمين إن كل شخص يمر بفترات صعبة. نرجع بخطة جديدة مناسبة لحياتك؟",
    "أسبوعين بدون تمرين مو نهاية العالم… نرتّب خطة خفيفة ترجعين منها بهدوء؟",
    "وش رأيك نبدأ من جديد بخطة تناسب وقتك وطريقتك؟",
];

/// English check-ins after 14 or more days.
pub const WORKOUT_MESSAGES_14_PLUS_DAYS_EN: &[&str] = &[
    "{name}, totally get it—life happens. Ready for a fresh plan that fits you now?",
    "Two weeks off isn't the end. Let's create a gentle comeback routine, {name}.",
    "How about we start from scratch with a plan that matches your pace, {name}?",
];

/// Arabic reassurance when a user struggles and may have unstated physical
/// needs.
pub const DISABILITY_SUPPORT_MESSAGES: &[&str] = &[
    "ولا يهمك {name}، عندي تمارين من وضع الجلوس ممتازة وتساعدك توصلين لهدفك بسلام.",
    "نقدر نبني خطة تناسبك 100% بدون ما تتعبك.",
    "كل شخص له طريقته الخاصة، ونقدر نساعدك بخطة آمنة ومناسبة لك.",
    "ما يهم الوضع، المهم إنك تتحركين وتتحسنين. عندي تمارين تناسبك تماماً.",
    "نقدر نعمل خطة ممتازة تناسب وضعك الصحي وتوصلين لهدفك.",
];

/// English reassurance counterpart.
pub const DISABILITY_SUPPORT_MESSAGES_EN: &[&str] = &[
    "No worries, {name}, I have excellent seated exercises that will help you reach your goal safely.",
    "We can build a plan that fits you 100% without exhausting you.",
    "Everyone has their own path, and we can help you with a safe and suitable plan.",
    "The situation doesn't matter, what matters is that you move and improve. I have exercises that suit you perfectly.",
    "We can create an excellent plan that fits your health condition and helps you reach your goal.",
];

/// Fill the `{name}` placeholder in a pool message.
#[must_use]
pub fn render_message(template: &str, name: &str) -> String {
    template.replace("{name}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_name_placeholder() {
        assert_eq!(
            render_message("Hey {name}, welcome back!", "Sara"),
            "Hey Sara, welcome back!"
        );
    }

    #[test]
    fn pools_are_balanced_across_languages() {
        assert_eq!(
            WORKOUT_MESSAGES_2_3_DAYS.len(),
            WORKOUT_MESSAGES_2_3_DAYS_EN.len()
        );
        assert_eq!(
            DISABILITY_SUPPORT_MESSAGES.len(),
            DISABILITY_SUPPORT_MESSAGES_EN.len()
        );
    }
}
