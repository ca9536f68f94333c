//! Curated video pools, grouped by coaching mode.

/// A recommendable workout video.
///
/// General videos carry a description and no trainer; the mode pools carry a
/// trainer and no description. Selection identity is the title for general
/// and adaptive pools, and the trainer for mode and equipment pools.
#[derive(Clone, Copy, Debug)]
pub struct Video {
    /// Channel or trainer name, when the pool tracks repeats by trainer.
    pub trainer: Option<&'static str>,
    /// Video title.
    pub title: &'static str,
    /// Approximate length, as shown to the user.
    pub duration: &'static str,
    /// Difficulty label.
    pub difficulty: &'static str,
    /// Search-query link.
    pub link: &'static str,
    /// Short description, when the pool carries one.
    pub description: Option<&'static str>,
}

impl Video {
    /// The string recorded in the used list for this video.
    #[must_use]
    pub fn identity(&self) -> &'static str {
        self.trainer.unwrap_or(self.title)
    }
}

/// Mobility category an adaptive video targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdaptiveCategory {
    /// Seated or wheelchair routines.
    Wheelchair,
    /// Joint-friendly routines.
    Joint,
    /// Balance-assisted routines.
    Balance,
    /// Suitable for any mobility need.
    General,
}

/// An adaptive video with its mobility category.
#[derive(Clone, Copy, Debug)]
pub struct AdaptiveVideo {
    /// The video itself.
    pub video: Video,
    /// Which mobility need it targets.
    pub category: AdaptiveCategory,
}

/// General beginner-friendly pool for users without an active mode.
pub const EXERCISE_VIDEOS: &[Video] = &[
    Video {
        trainer: None,
        title: "Pamela Reif – 10 min Beginner Workout",
        duration: "10 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=pamela+reif+10+min+beginner",
        description: Some("Perfect for beginners, full body workout"),
    },
    Video {
        trainer: None,
        title: "MadFit – Low Impact Full Body",
        duration: "15-20 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=madfit+low+impact+full+body",
        description: Some("Low impact, joint-friendly workout"),
    },
    Video {
        trainer: None,
        title: "Chloe Ting – No Jumping Workout",
        duration: "10-15 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=chloe+ting+no+jumping",
        description: Some("No jumping, apartment-friendly"),
    },
    Video {
        trainer: None,
        title: "FitnessBlender – Beginner Cardio",
        duration: "20 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=fitnessblender+beginner+cardio",
        description: Some("Cardio workout for beginners"),
    },
    Video {
        trainer: None,
        title: "NourishMoveLove – Low-Impact Strength",
        duration: "15 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=nourishmovelove+low+impact+strength",
        description: Some("Strength training without high impact"),
    },
];

/// Prenatal pool, repeats tracked by trainer.
pub const PREGNANCY_VIDEOS: &[Video] = &[
    Video {
        trainer: Some("BodyFit by Amy"),
        title: "Prenatal Workout",
        duration: "20 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=bodyfit+amy+prenatal",
        description: None,
    },
    Video {
        trainer: Some("GlowBodyPT"),
        title: "Pregnancy Safe Workout",
        duration: "15 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=glowbodypt+prenatal",
        description: None,
    },
    Video {
        trainer: Some("Pregnancy and Postpartum TV"),
        title: "Prenatal Exercise",
        duration: "25 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=pregnancy+postpartum+tv",
        description: None,
    },
    Video {
        trainer: Some("NourishMoveLove Prenatal"),
        title: "Safe Pregnancy Workout",
        duration: "18 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=nourishmovelove+prenatal",
        description: None,
    },
    Video {
        trainer: Some("SarahBethYoga Prenatal"),
        title: "Prenatal Yoga",
        duration: "30 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=sarahbethyoga+prenatal",
        description: None,
    },
];

/// Postpartum recovery pool, repeats tracked by trainer.
pub const POSTPARTUM_VIDEOS: &[Video] = &[
    Video {
        trainer: Some("BodyFit by Amy"),
        title: "Postpartum Workout",
        duration: "20 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=bodyfit+amy+postpartum",
        description: None,
    },
    Video {
        trainer: Some("MoveWithNicole"),
        title: "Postpartum Yoga",
        duration: "25 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=movewithnicole+postpartum",
        description: None,
    },
    Video {
        trainer: Some("NourishMoveLove"),
        title: "6 Week Postpartum",
        duration: "18 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=nourishmovelove+6+week+postpartum",
        description: None,
    },
    Video {
        trainer: Some("Pregnancy and Postpartum TV"),
        title: "Postpartum Recovery",
        duration: "15 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=pregnancy+postpartum+tv+postpartum",
        description: None,
    },
];

/// Diastasis-safe core pool, repeats tracked by trainer.
pub const DIASTASIS_VIDEOS: &[Video] = &[
    Video {
        trainer: Some("Every Mother (EMbody)"),
        title: "Diastasis Recti Recovery",
        duration: "20 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=every+mother+diastasis+recti",
        description: None,
    },
    Video {
        trainer: Some("Dr. Bri"),
        title: "Postpartum Core Recovery",
        duration: "15 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=dr+bri+postpartum+core",
        description: None,
    },
    Video {
        trainer: Some("NourishMoveLove"),
        title: "Postpartum Core Healing",
        duration: "18 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=nourishmovelove+postpartum+core",
        description: None,
    },
    Video {
        trainer: Some("Pregnancy and Postpartum TV"),
        title: "Diastasis Recti Safe Workout",
        duration: "15 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=pregnancy+postpartum+tv+diastasis",
        description: None,
    },
    Video {
        trainer: Some("BodyFit by Amy"),
        title: "Diastasis-Safe Core",
        duration: "20 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=bodyfit+amy+diastasis+safe",
        description: None,
    },
];

/// Gym machine tutorial pool, repeats tracked by trainer.
pub const GYM_EQUIPMENT_VIDEOS: &[Video] = &[
    Video {
        trainer: Some("ATHLEAN-X"),
        title: "How to Use Gym Machines Correctly",
        duration: "15 minutes",
        difficulty: "Intermediate",
        link: "https://www.youtube.com/results?search_query=athlean+x+gym+machines",
        description: None,
    },
    Video {
        trainer: Some("Jeremy Ethier"),
        title: "Gym Machine Tutorial",
        duration: "12 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=jeremy+ethier+gym+machine",
        description: None,
    },
    Video {
        trainer: Some("FitnessBlender"),
        title: "Gym Equipment Guide",
        duration: "20 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=fitnessblender+gym+equipment",
        description: None,
    },
    Video {
        trainer: Some("Pamela Reif"),
        title: "Machine Workout Guide",
        duration: "10 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=pamela+reif+machines",
        description: None,
    },
    Video {
        trainer: Some("Scott Herman Fitness"),
        title: "Gym Machine Tutorial",
        duration: "18 minutes",
        difficulty: "Intermediate",
        link: "https://www.youtube.com/results?search_query=scott+herman+gym+machine",
        description: None,
    },
    Video {
        trainer: Some("Nuffield Health"),
        title: "How to Use Gym Equipment",
        duration: "15 minutes",
        difficulty: "Beginner",
        link: "https://www.youtube.com/results?search_query=nuffield+health+gym+equipment",
        description: None,
    },
];

/// Pool for users with special physical needs, repeats tracked by title.
pub const ADAPTIVE_VIDEOS: &[AdaptiveVideo] = &[
    AdaptiveVideo {
        video: Video {
            trainer: None,
            title: "Adaptive Seated Workout - Full Body",
            duration: "15 minutes",
            difficulty: "Beginner",
            link: "https://www.youtube.com/results?search_query=adaptive+seated+workout",
            description: Some("Full body workout from seated position"),
        },
        category: AdaptiveCategory::Wheelchair,
    },
    AdaptiveVideo {
        video: Video {
            trainer: None,
            title: "Wheelchair Fitness Routine",
            duration: "20 minutes",
            difficulty: "Beginner",
            link: "https://www.youtube.com/results?search_query=wheelchair+fitness",
            description: Some("Comprehensive wheelchair fitness routine"),
        },
        category: AdaptiveCategory::Wheelchair,
    },
    AdaptiveVideo {
        video: Video {
            trainer: None,
            title: "Low-Impact Disability-Friendly Exercises",
            duration: "15 minutes",
            difficulty: "Beginner",
            link: "https://www.youtube.com/results?search_query=low+impact+disability+friendly",
            description: Some("Gentle exercises for various mobility needs"),
        },
        category: AdaptiveCategory::General,
    },
    AdaptiveVideo {
        video: Video {
            trainer: None,
            title: "Chair-Based Exercise Routine",
            duration: "10 minutes",
            difficulty: "Beginner",
            link: "https://www.youtube.com/results?search_query=chair+exercise+routine",
            description: Some("Safe exercises using a chair for support"),
        },
        category: AdaptiveCategory::Balance,
    },
    AdaptiveVideo {
        video: Video {
            trainer: None,
            title: "Joint-Friendly Workout",
            duration: "20 minutes",
            difficulty: "Beginner",
            link: "https://www.youtube.com/results?search_query=joint+friendly+workout",
            description: Some("Exercises designed for joint health"),
        },
        category: AdaptiveCategory::Joint,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_pools_identify_by_trainer() {
        assert_eq!(PREGNANCY_VIDEOS[0].identity(), "BodyFit by Amy");
        assert_eq!(
            EXERCISE_VIDEOS[0].identity(),
            "Pamela Reif – 10 min Beginner Workout"
        );
    }

    #[test]
    fn adaptive_pool_covers_every_category() {
        for category in [
            AdaptiveCategory::Wheelchair,
            AdaptiveCategory::Joint,
            AdaptiveCategory::Balance,
            AdaptiveCategory::General,
        ] {
            assert!(ADAPTIVE_VIDEOS.iter().any(|v| v.category == category));
        }
    }
}
