//! Medical safety alert keyword tables.
//!
//! Alerts are checked on every turn, before any mode context is assembled.
//! A match injects a critical warning into the context regardless of what
//! else the user asked for.

/// One safety alert rule: a bilingual keyword pair and its bilingual reply.
#[derive(Clone, Copy, Debug)]
pub struct SafetyAlert {
    /// Arabic trigger keyword.
    pub keyword_ar: &'static str,
    /// English trigger keyword.
    pub keyword_en: &'static str,
    /// Arabic warning text.
    pub response_ar: &'static str,
    /// English warning text.
    pub response_en: &'static str,
}

impl SafetyAlert {
    /// True when either keyword appears in the lowercased message.
    #[must_use]
    pub fn matches(&self, lowered: &str) -> bool {
        lowered.contains(self.keyword_ar) || lowered.contains(self.keyword_en)
    }

    /// The warning in the reply language.
    #[must_use]
    pub const fn response(&self, english: bool) -> &'static str {
        if english {
            self.response_en
        } else {
            self.response_ar
        }
    }
}

const PREGNANCY_RESPONSE_AR: &str = "هذا عرض طبي… لازم توقفين وتراجعين دكتور فوراً.";
const PREGNANCY_RESPONSE_EN: &str =
    "This is a medical symptom. You must stop and see a doctor immediately.";

/// Symptoms that must interrupt pregnancy coaching.
pub const PREGNANCY_SAFETY_ALERTS: &[SafetyAlert] = &[
    SafetyAlert {
        keyword_ar: "دوخة",
        keyword_en: "dizziness",
        response_ar: PREGNANCY_RESPONSE_AR,
        response_en: PREGNANCY_RESPONSE_EN,
    },
    SafetyAlert {
        keyword_ar: "نزيف",
        keyword_en: "bleeding",
        response_ar: PREGNANCY_RESPONSE_AR,
        response_en: PREGNANCY_RESPONSE_EN,
    },
    SafetyAlert {
        keyword_ar: "ألم قوي",
        keyword_en: "severe pain",
        response_ar: PREGNANCY_RESPONSE_AR,
        response_en: PREGNANCY_RESPONSE_EN,
    },
    SafetyAlert {
        keyword_ar: "ضيق تنفس",
        keyword_en: "shortness of breath",
        response_ar: PREGNANCY_RESPONSE_AR,
        response_en: PREGNANCY_RESPONSE_EN,
    },
];

const POSTPARTUM_RESPONSE_AR: &str =
    "هذا عرض طبي مهم — لازم توقفين التمرين فورًا وتراجعين طبيبك.";
const POSTPARTUM_RESPONSE_EN: &str =
    "This is an important medical symptom. You must stop exercising immediately and see your doctor.";

/// Symptoms that must interrupt postpartum coaching.
pub const POSTPARTUM_SAFETY_ALERTS: &[SafetyAlert] = &[
    SafetyAlert {
        keyword_ar: "نزيف",
        keyword_en: "bleeding",
        response_ar: POSTPARTUM_RESPONSE_AR,
        response_en: POSTPARTUM_RESPONSE_EN,
    },
    SafetyAlert {
        keyword_ar: "ألم قوي",
        keyword_en: "severe pain",
        response_ar: POSTPARTUM_RESPONSE_AR,
        response_en: POSTPARTUM_RESPONSE_EN,
    },
    SafetyAlert {
        keyword_ar: "حرارة",
        keyword_en: "fever",
        response_ar: POSTPARTUM_RESPONSE_AR,
        response_en: POSTPARTUM_RESPONSE_EN,
    },
    SafetyAlert {
        keyword_ar: "دوخة",
        keyword_en: "dizziness",
        response_ar: POSTPARTUM_RESPONSE_AR,
        response_en: POSTPARTUM_RESPONSE_EN,
    },
    SafetyAlert {
        keyword_ar: "ضغط على الحوض",
        keyword_en: "pelvic pressure",
        response_ar: POSTPARTUM_RESPONSE_AR,
        response_en: POSTPARTUM_RESPONSE_EN,
    },
    SafetyAlert {
        keyword_ar: "ألم مكان القيصرية",
        keyword_en: "c-section pain",
        response_ar: POSTPARTUM_RESPONSE_AR,
        response_en: POSTPARTUM_RESPONSE_EN,
    },
];

const DIASTASIS_RESPONSE_AR: &str = "هذا عرض يحتاج توقفين فورًا. الأفضل تراجعين طبيبة.";
const DIASTASIS_RESPONSE_EN: &str =
    "This symptom requires you to stop immediately. It's best to see your doctor.";

/// Symptoms that must interrupt diastasis recti coaching.
pub const DIASTASIS_SAFETY_ALERTS: &[SafetyAlert] = &[
    SafetyAlert {
        keyword_ar: "ألم جديد",
        keyword_en: "new pain",
        response_ar: DIASTASIS_RESPONSE_AR,
        response_en: DIASTASIS_RESPONSE_EN,
    },
    SafetyAlert {
        keyword_ar: "انتفاخ",
        keyword_en: "bulging",
        response_ar: DIASTASIS_RESPONSE_AR,
        response_en: DIASTASIS_RESPONSE_EN,
    },
    SafetyAlert {
        keyword_ar: "بروز",
        keyword_en: "coning",
        response_ar: DIASTASIS_RESPONSE_AR,
        response_en: DIASTASIS_RESPONSE_EN,
    },
];

/// First alert matching the message, if any.
#[must_use]
pub fn check_alerts<'a>(
    alerts: &'a [SafetyAlert],
    lowered: &str,
    english: bool,
) -> Option<&'a str> {
    alerts
        .iter()
        .find(|alert| alert.matches(lowered))
        .map(|alert| alert.response(english))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pregnancy_alert_matches_arabic_keyword() {
        let hit = check_alerts(PREGNANCY_SAFETY_ALERTS, "عندي دوخة اليوم", false);
        assert_eq!(hit, Some(PREGNANCY_RESPONSE_AR));
    }

    #[test]
    fn english_reply_for_english_speakers() {
        let hit = check_alerts(POSTPARTUM_SAFETY_ALERTS, "i have pelvic pressure", true);
        assert_eq!(hit, Some(POSTPARTUM_RESPONSE_EN));
    }

    #[test]
    fn no_alert_on_quiet_message() {
        assert!(check_alerts(DIASTASIS_SAFETY_ALERTS, "feeling great", false).is_none());
    }
}
