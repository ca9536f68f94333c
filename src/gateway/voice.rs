//! Voice-friendly reply formatting for accessibility mode.

use regex::Regex;

/// Strips decorative characters so replies read cleanly through a screen
/// reader.
pub struct VoiceFilter {
    emoji: Regex,
    specials: Regex,
}

impl VoiceFilter {
    /// Compile the filter patterns.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            emoji: Regex::new("[🤍💪🔥👏💗🩵]")?,
            specials: Regex::new(r"[^\w\s\.,!?;:\-\(\)]")?,
        })
    }

    /// Apply the voice-friendly transformation.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let text = self.emoji.replace_all(text, "");
        let text = self.specials.replace_all(&text, "");
        let text = text.replace("...", "").replace("..", "");
        text.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_emoji_and_specials() {
        let filter = VoiceFilter::new().unwrap();
        assert_eq!(
            filter.apply("Great job 💪🔥! Keep going... you got this 🤍"),
            "Great job ! Keep going you got this"
        );
    }

    #[test]
    fn arabic_word_characters_survive() {
        let filter = VoiceFilter::new().unwrap();
        assert_eq!(filter.apply("تمام، نكمل خطوة بخطوة 💗"), "تمام نكمل خطوة بخطوة");
    }

    #[test]
    fn dot_runs_are_collapsed() {
        let filter = VoiceFilter::new().unwrap();
        assert_eq!(filter.apply("well.. okay"), "well okay");
        assert_eq!(filter.apply("end of sentence."), "end of sentence.");
    }
}
