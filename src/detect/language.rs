//! Message language detection.

use serde::{Deserialize, Serialize};

/// Detected message language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Arabic-script only.
    Arabic,
    /// Both Arabic script and Latin letters.
    Mixed,
    /// Latin letters or nothing recognizable.
    English,
}

impl Language {
    /// Label used in the assembled context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arabic => "arabic",
            Self::Mixed => "mixed",
            Self::English => "english",
        }
    }

    /// Whether replies and message pools should use English.
    ///
    /// Mixed messages get Arabic, matching how the coach answers bilingual
    /// users.
    #[must_use]
    pub const fn prefers_english(self) -> bool {
        matches!(self, Self::English)
    }
}

/// Classify a message by script.
///
/// Arabic is the `U+0600..=U+06FF` block; anything ASCII-alphabetic counts
/// as English. Empty input defaults to English.
#[must_use]
pub fn detect_language(text: &str) -> Language {
    let has_arabic = text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c));
    let has_english = text.chars().any(|c| c.is_ascii_alphabetic());

    if has_arabic && has_english {
        Language::Mixed
    } else if has_arabic {
        Language::Arabic
    } else {
        Language::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arabic_only() {
        assert_eq!(detect_language("أبغى تمارين للبيت"), Language::Arabic);
    }

    #[test]
    fn english_only() {
        assert_eq!(detect_language("give me a workout"), Language::English);
    }

    #[test]
    fn mixed_script() {
        assert_eq!(detect_language("أبغى workout خفيف"), Language::Mixed);
    }

    #[test]
    fn empty_defaults_to_english() {
        assert_eq!(detect_language(""), Language::English);
        assert_eq!(detect_language("123 !؟"), Language::English);
    }

    #[test]
    fn mixed_prefers_arabic_pools() {
        assert!(!Language::Mixed.prefers_english());
        assert!(Language::English.prefers_english());
    }
}
