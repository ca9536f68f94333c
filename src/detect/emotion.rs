//! Emotion detection from keyword tables.

use serde::{Deserialize, Serialize};

/// Detected user emotion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    /// No emotional signal.
    #[default]
    Neutral,
    /// Tired or fatigued.
    Tired,
    /// Stressed or under pressure.
    Stressed,
    /// Sad or down.
    Sad,
    /// Bored.
    Bored,
    /// Unmotivated.
    Unmotivated,
    /// Excited.
    Excited,
    /// Proud of progress.
    Proud,
}

impl Emotion {
    /// Label used in the assembled context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Tired => "tired",
            Self::Stressed => "stressed",
            Self::Sad => "sad",
            Self::Bored => "bored",
            Self::Unmotivated => "unmotivated",
            Self::Excited => "excited",
            Self::Proud => "proud",
        }
    }
}

/// Ordered keyword table; the first matching row wins.
const EMOTION_RULES: [(Emotion, &[&str]); 7] = [
    (
        Emotion::Tired,
        &["tired", "exhausted", "fatigued", "نعسان", "تعبان", "مرهق"],
    ),
    (
        Emotion::Stressed,
        &["stressed", "pressure", "قلقان", "مضغوط"],
    ),
    (Emotion::Sad, &["sad", "down", "حزين"]),
    (Emotion::Bored, &["bored", "طفشان"]),
    (
        Emotion::Unmotivated,
        &["unmotivated", "lazy", "مالي خلق", "مالي نفس"],
    ),
    (Emotion::Excited, &["excited", "hyped", "متحمس"]),
    (Emotion::Proud, &["proud", "فخور"]),
];

/// Detect the dominant emotion in a lowercased message.
#[must_use]
pub fn detect_emotion(lowered: &str) -> Emotion {
    for (emotion, keywords) in EMOTION_RULES {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return emotion;
        }
    }
    Emotion::Neutral
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_arabic_and_english_keywords() {
        assert_eq!(detect_emotion("i am so tired"), Emotion::Tired);
        assert_eq!(detect_emotion("والله تعبان اليوم"), Emotion::Tired);
        assert_eq!(detect_emotion("متحمس للتمرين"), Emotion::Excited);
        assert_eq!(detect_emotion("feeling proud of myself"), Emotion::Proud);
    }

    #[test]
    fn first_rule_wins_on_ties() {
        // "tired" appears before "unmotivated" in the table.
        assert_eq!(detect_emotion("tired and lazy"), Emotion::Tired);
    }

    #[test]
    fn defaults_to_neutral() {
        assert_eq!(detect_emotion("what should i eat"), Emotion::Neutral);
        assert_eq!(detect_emotion(""), Emotion::Neutral);
    }
}
