//! Voice-friendly mode for blind and low-vision users.

use std::fmt::Write as _;

use crate::catalog::exercises::ACCESSIBILITY_SAFE_EXERCISES;
use crate::engine::state::{AccessibilityMode, VisualImpairment};

const ACTIVATION_KEYWORDS: &[&str] = &[
    "accessibility mode",
    "وضع إمكانية الوصول",
    "تفعيل الوصول",
    "enable accessibility",
    "تفعيل إمكانية الوصول",
];

const BLIND_KEYWORDS: &[&str] = &[
    "أنا ضعيف بصر",
    "أنا ما أشوف",
    "i am blind",
    "i am visually impaired",
    "أنا كفيف",
    "i can't see",
    "ما أشوف",
    "can't see",
    "blind",
    "كفيف",
    "ضعيف بصر",
    "visually impaired",
];

const LOW_VISION_KEYWORDS: &[&str] = &[
    "صعب أشوف",
    "الخط صغير",
    "ما أشوف الشاشة",
    "hard to see",
    "text too small",
    "can't see screen",
    "low vision",
    "ضعيف البصر",
    "صعوبة في الرؤية",
];

/// Accessibility signal extracted from a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessibilitySignal {
    /// Explicit mode activation without an impairment level.
    Enable,
    /// User says they are blind.
    Blind,
    /// User says they have low vision.
    LowVision,
}

/// Detect an accessibility signal in a lowercased message.
#[must_use]
pub fn detect_accessibility(lowered: &str) -> Option<AccessibilitySignal> {
    if ACTIVATION_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return Some(AccessibilitySignal::Enable);
    }
    if BLIND_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return Some(AccessibilitySignal::Blind);
    }
    if LOW_VISION_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return Some(AccessibilitySignal::LowVision);
    }
    None
}

/// Fold a detected signal into the stored mode.
///
/// A bare activation infers the impairment level from blind mentions in the
/// same message, defaulting to low vision. Voice-friendly output is switched
/// on with the mode and stays on.
pub fn apply_accessibility_signal(
    mode: &mut AccessibilityMode,
    signal: AccessibilitySignal,
    lowered: &str,
) {
    mode.enabled = true;
    mode.voice_friendly = true;
    mode.visual_impairment = match signal {
        AccessibilitySignal::Blind => VisualImpairment::Blind,
        AccessibilitySignal::LowVision => VisualImpairment::LowVision,
        AccessibilitySignal::Enable => {
            if lowered.contains("blind") || lowered.contains("كفيف") {
                VisualImpairment::Blind
            } else {
                VisualImpairment::LowVision
            }
        }
    };
}

/// Build the accessibility instruction context.
#[must_use]
pub fn build_accessibility_context(mode: &AccessibilityMode) -> String {
    let is_blind = mode.visual_impairment == VisualImpairment::Blind;

    let mut ctx = String::from("ACCESSIBILITY MODE - VOICE-FRIENDLY RESPONSE REQUIRED:\n\n");

    match mode.visual_impairment {
        VisualImpairment::Blind => {
            ctx.push_str("User is BLIND. Critical requirements:\n");
            ctx.push_str("- Provide ALL information verbally with NO visual dependency\n");
            ctx.push_str(
                "- Use voice-friendly formatting: 'Title:', 'Step 1:', 'Step 2:', 'Conclusion:'\n",
            );
            ctx.push_str("- Avoid emojis unless absolutely necessary\n");
            ctx.push_str("- Avoid tables (use lists instead)\n");
            ctx.push_str("- Describe exercises step-by-step verbally\n");
            ctx.push_str("- Use very short, clear sentences\n");
            ctx.push_str(
                "- NEVER include exercises that require balance, jumping, lunges, or \
                 single-leg training\n",
            );
            ctx.push_str("- ONLY seated, stationary, or step-by-step slow instructions\n");
            ctx.push_str("- Provide navigation assistance when needed\n");
        }
        VisualImpairment::LowVision => {
            ctx.push_str("User has LOW VISION. Requirements:\n");
            ctx.push_str("- Provide clear, voice-friendly text\n");
            ctx.push_str("- Use structured formatting\n");
            ctx.push_str("- Offer optional voice descriptions\n");
            ctx.push_str("- High contrast and large text mode should be enabled\n");
        }
        VisualImpairment::None => {
            ctx.push_str("Accessibility Mode enabled. Use voice-friendly formatting.\n");
        }
    }

    ctx.push_str("\nResponse Style:\n");
    ctx.push_str("- Very clear and concise\n");
    ctx.push_str("- Very short sentences\n");
    ctx.push_str("- No visual dependency\n");
    ctx.push_str("- Saudi casual dialect for Arabic, clean English for English\n");
    ctx.push_str("- Zero repeated messages\n");

    if is_blind {
        ctx.push_str("\nSafety Rules for Blind Users:\n");
        ctx.push_str("- NO balance workouts\n");
        ctx.push_str("- NO jumping\n");
        ctx.push_str("- NO lunges\n");
        ctx.push_str("- NO single-leg training\n");
        ctx.push_str("- ONLY seated, stationary, or step-by-step slow instructions\n");
        let _ = writeln!(
            ctx,
            "- Safe exercises: {}",
            ACCESSIBILITY_SAFE_EXERCISES.join(", ")
        );
    }

    ctx
}

/// Short lead-in offering an audio description of an exercise.
#[must_use]
pub fn audio_exercise_description(exercise_name: &str, english: bool) -> String {
    if english {
        format!("This exercise is {exercise_name}. If you want the audio description, say yes.")
    } else {
        format!("هذا التمرين هو {exercise_name}. إذا تبين الوصف الصوتي قولي yes.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_resolve_in_priority_order() {
        assert_eq!(
            detect_accessibility("enable accessibility please"),
            Some(AccessibilitySignal::Enable)
        );
        assert_eq!(
            detect_accessibility("أنا كفيف"),
            Some(AccessibilitySignal::Blind)
        );
        assert_eq!(
            detect_accessibility("the text too small for me"),
            Some(AccessibilitySignal::LowVision)
        );
        assert_eq!(detect_accessibility("normal workout"), None);
    }

    #[test]
    fn bare_activation_infers_level_from_message() {
        let mut mode = AccessibilityMode::default();
        apply_accessibility_signal(
            &mut mode,
            AccessibilitySignal::Enable,
            "enable accessibility, i'm blind",
        );
        assert!(mode.enabled);
        assert!(mode.voice_friendly);
        assert_eq!(mode.visual_impairment, VisualImpairment::Blind);

        let mut mode = AccessibilityMode::default();
        apply_accessibility_signal(&mut mode, AccessibilitySignal::Enable, "enable accessibility");
        assert_eq!(mode.visual_impairment, VisualImpairment::LowVision);
    }

    #[test]
    fn blind_context_includes_safety_rules() {
        let mut mode = AccessibilityMode::default();
        apply_accessibility_signal(&mut mode, AccessibilitySignal::Blind, "i am blind");
        let ctx = build_accessibility_context(&mode);
        assert!(ctx.contains("User is BLIND"));
        assert!(ctx.contains("Safety Rules for Blind Users"));
        assert!(ctx.contains("Seated arm raises"));

        apply_accessibility_signal(&mut mode, AccessibilitySignal::LowVision, "low vision");
        let ctx = build_accessibility_context(&mode);
        assert!(ctx.contains("User has LOW VISION"));
        assert!(!ctx.contains("Safety Rules"));
    }

    #[test]
    fn audio_description_matches_language() {
        assert_eq!(
            audio_exercise_description("squat", true),
            "This exercise is squat. If you want the audio description, say yes."
        );
        assert!(audio_exercise_description("سكوات", false).contains("الوصف الصوتي"));
    }
}
