//! Visual-friendly mode for deaf and hard-of-hearing users.

use std::fmt::Write as _;

use crate::catalog::exercises::{DEAF_SAFE_EXERCISES, DEAF_UNSAFE_EXERCISES};
use crate::engine::state::{DeafMode, HearingImpairment};

const ACTIVATION_KEYWORDS: &[&str] = &[
    "deaf mode",
    "وضع الصم",
    "تفعيل وضع الصم",
    "accessibility deaf",
    "وضع إمكانية الوصول للصم",
    "hard of hearing mode",
    "وضع ضعاف السمع",
];

const DEAF_KEYWORDS: &[&str] = &[
    "أنا ضعيف سمع",
    "أنا ما أسمع",
    "i am deaf",
    "i am hard of hearing",
    "أنا أصم",
    "i can't hear",
    "ما أسمع",
    "can't hear",
    "deaf",
    "أصم",
    "ضعيف سمع",
    "hearing loss",
    "hard of hearing",
    "hearing impaired",
    "ضعيف السمع",
];

const HARD_OF_HEARING_KEYWORDS: &[&str] = &[
    "hearing loss",
    "partial hearing",
    "ضعيف السمع",
    "hearing difficulty",
    "صعوبة في السمع",
];

/// Hearing accessibility signal extracted from a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeafSignal {
    /// Explicit mode activation without an impairment level.
    Enable,
    /// User says they are deaf.
    Deaf,
    /// User says they have partial hearing.
    HardOfHearing,
}

/// Detect a hearing accessibility signal in a lowercased message.
#[must_use]
pub fn detect_deaf(lowered: &str) -> Option<DeafSignal> {
    if ACTIVATION_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return Some(DeafSignal::Enable);
    }
    if DEAF_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return Some(DeafSignal::Deaf);
    }
    if HARD_OF_HEARING_KEYWORDS
        .iter()
        .any(|kw| lowered.contains(kw))
    {
        return Some(DeafSignal::HardOfHearing);
    }
    None
}

/// Fold a detected signal into the stored mode.
///
/// A bare activation infers the impairment level from deaf mentions in the
/// same message, defaulting to hard of hearing.
pub fn apply_deaf_signal(mode: &mut DeafMode, signal: DeafSignal, lowered: &str) {
    mode.enabled = true;
    mode.visual_cues = true;
    mode.hearing_impairment = match signal {
        DeafSignal::Deaf => HearingImpairment::Deaf,
        DeafSignal::HardOfHearing => HearingImpairment::HardOfHearing,
        DeafSignal::Enable => {
            if lowered.contains("deaf") || lowered.contains("أصم") {
                HearingImpairment::Deaf
            } else {
                HearingImpairment::HardOfHearing
            }
        }
    };
}

/// Build the deaf / hard-of-hearing instruction context.
#[must_use]
pub fn build_deaf_context(mode: &DeafMode) -> String {
    let impaired = mode.hearing_impairment != HearingImpairment::None;

    let mut ctx =
        String::from("DEAF & HARD-OF-HEARING MODE - VISUAL-FRIENDLY RESPONSE REQUIRED:\n\n");

    if impaired {
        let label = if mode.hearing_impairment == HearingImpairment::Deaf {
            "DEAF"
        } else {
            "HARD OF HEARING"
        };
        let _ = writeln!(ctx, "User is {label}. Critical requirements:");
        ctx.push_str("- NEVER rely on sound instructions\n");
        ctx.push_str(
            "- Convert ALL audio-based instructions into visual-friendly, step-by-step \
             written instructions\n",
        );
        ctx.push_str(
            "- Use visual cues with emojis: ⬆️ (up), ⬇️ (down), ➡️ (right), ⬅️ (left), ↔️ \
             (center), ✋ (hand)\n",
        );
        ctx.push_str("- Include direction arrows and short descriptions\n");
        ctx.push_str("- Use clear step numbers (Step 1, Step 2, etc.)\n");
        ctx.push_str("- NO sound references (avoid 'listen', 'اسمعي', 'hear', 'sound')\n");
        ctx.push_str("- Keep sentences very short and simple\n");
        ctx.push_str("- Use simple structure, avoid complex metaphors\n");
        ctx.push_str("- Use visual markers and emojis when needed\n");
    }

    ctx.push_str("\nWorkout Instructions Format:\n");
    ctx.push_str(
        "- Use visual cues: ⬆️ ارفعي يدك فوق / ⬇️ انزلي ببطء / ➡️ خطوة يمين / ⬅️ خطوة يسار\n",
    );
    ctx.push_str(
        "- Example: 'اجلسي مستقيمة. ✋ ارفعي يدك اليمنى للأعلى. ↔️ حرّكيها يمين ويسار ببطء.'\n",
    );
    ctx.push_str("- Include step numbers: Step 1, Step 2, Step 3\n");
    ctx.push_str("- Use clear visual descriptions\n");

    if impaired {
        ctx.push_str("\nSafety Rules for Deaf/HoH Users:\n");
        let _ = writeln!(
            ctx,
            "- AVOID these exercises: {}",
            DEAF_UNSAFE_EXERCISES.join(", ")
        );
        let _ = writeln!(
            ctx,
            "- PREFER these exercises: {}",
            DEAF_SAFE_EXERCISES.join(", ")
        );
    }

    ctx.push_str("\nResponse Style:\n");
    ctx.push_str("- Short and visual\n");
    ctx.push_str("- Very clear\n");
    ctx.push_str("- Saudi casual dialect for Arabic, clean English for English\n");
    ctx.push_str("- Zero repetition\n");
    ctx.push_str("- NO sound references\n");

    ctx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_resolve_in_priority_order() {
        assert_eq!(detect_deaf("enable deaf mode"), Some(DeafSignal::Enable));
        assert_eq!(detect_deaf("i am deaf"), Some(DeafSignal::Deaf));
        assert_eq!(detect_deaf("أنا أصم"), Some(DeafSignal::Deaf));
        // Overlapping keywords resolve to deaf first.
        assert_eq!(detect_deaf("i have hearing loss"), Some(DeafSignal::Deaf));
        assert_eq!(detect_deaf("normal workout"), None);
    }

    #[test]
    fn bare_activation_infers_level_from_message() {
        let mut mode = DeafMode::default();
        apply_deaf_signal(&mut mode, DeafSignal::Enable, "deaf mode please, i'm deaf");
        assert!(mode.enabled);
        assert_eq!(mode.hearing_impairment, HearingImpairment::Deaf);

        let mut mode = DeafMode::default();
        apply_deaf_signal(&mut mode, DeafSignal::Enable, "hard of hearing mode");
        assert_eq!(mode.hearing_impairment, HearingImpairment::HardOfHearing);
    }

    #[test]
    fn context_lists_safety_rules_for_impaired_users() {
        let mut mode = DeafMode::default();
        apply_deaf_signal(&mut mode, DeafSignal::Deaf, "i am deaf");
        let ctx = build_deaf_context(&mode);
        assert!(ctx.contains("User is DEAF"));
        assert!(ctx.contains("AVOID these exercises"));
        assert!(ctx.contains("PREFER these exercises"));
        assert!(ctx.contains("Workout Instructions Format"));
    }
}
