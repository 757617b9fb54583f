//! Community preference catalogue offered during onboarding.

use crate::error::{Error, Result};
use serde::Serialize;

/// One selectable preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreferenceOption {
    pub icon: &'static str,
    pub name: &'static str,
    pub detail: &'static str,
}

impl PreferenceOption {
    /// Full label as shown on the onboarding page
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.icon, self.name, self.detail)
    }

    fn matches(&self, input: &str) -> bool {
        self.name.eq_ignore_ascii_case(input) || self.label() == input
    }
}

/// A wellbeing category and its options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreferenceCategory {
    pub category: &'static str,
    pub focus: &'static str,
    pub options: &'static [PreferenceOption],
}

const fn option(icon: &'static str, name: &'static str, detail: &'static str) -> PreferenceOption {
    PreferenceOption { icon, name, detail }
}

pub const PREFERENCE_CATALOGUE: &[PreferenceCategory] = &[
    PreferenceCategory {
        category: "Belonging",
        focus: "identity, pride, community ties",
        options: &[
            option("🏞️", "Cultural & Heritage Events", "e.g., multicultural festivals, history walks"),
            option("🎉", "Community Celebrations", "e.g., Australia Day, Lunar New Year, NAIDOC Week"),
            option("🏠", "Neighbourhood Gatherings", "e.g., street BBQs, park meetups"),
            option("🎭", "Arts & Storytelling", "e.g., local theatre, oral history nights"),
        ],
    },
    PreferenceCategory {
        category: "Worth",
        focus: "wellbeing, life satisfaction, feeling valued",
        options: &[
            option("🧘", "Health & Wellbeing", "e.g., yoga in the park, mental health workshops"),
            option("🌱", "Skill-Building", "e.g., coding bootcamps, language classes, craft workshops"),
            option("🎓", "Education & Learning", "e.g., public lectures, library talks"),
            option("💼", "Career & Volunteering Fairs", "e.g., job expos, volunteer networking"),
        ],
    },
    PreferenceCategory {
        category: "Social Justice & Equity",
        focus: "fairness, equality, advocacy",
        options: &[
            option(
                "🤝",
                "Diversity & Inclusion Forums",
                "e.g., disability inclusion training, LGBTQ+ rights talks",
            ),
            option("⚖️", "Advocacy Workshops", "e.g., housing rights, legal aid sessions"),
            option(
                "🌍",
                "Equity & Sustainability Events",
                "e.g., affordable housing forums, climate justice rallies",
            ),
            option("🏫", "Support Services Info Sessions", "e.g., Centrelink help, migrant services"),
        ],
    },
    PreferenceCategory {
        category: "Political Participation",
        focus: "civic engagement, democracy, involvement",
        options: &[
            option(
                "🗳️",
                "Council Consultations",
                "e.g., town halls, public hearings, planning forums",
            ),
            option("📝", "Petition/Advocacy Training", "how to influence policy"),
            option("🌐", "Civic Hackathons", "digital democracy events, policy innovation labs"),
            option("📣", "Community Leadership Programs", "youth council, leadership training"),
        ],
    },
    PreferenceCategory {
        category: "Acceptance of Diversity",
        focus: "multiculturalism, tolerance, anti-discrimination",
        options: &[
            option("🍲", "Multicultural Food Festivals", "e.g., Taste of Nations, Harmony Day"),
            option(
                "🕌",
                "Faith & Intercultural Dialogues",
                "mosque/church/synagogue open days",
            ),
            option(
                "👫",
                "Refugee & Migrant Welcome Events",
                "welcome dinners, settlement fairs",
            ),
            option("🎶", "World Music & Dance Events", "celebrations of cultural diversity"),
        ],
    },
];

/// Every option, in catalogue order
pub fn all_options() -> impl Iterator<Item = &'static PreferenceOption> {
    PREFERENCE_CATALOGUE.iter().flat_map(|c| c.options.iter())
}

/// Look up an option by name (case-insensitive) or by its full label
pub fn find_preference(input: &str) -> Result<&'static PreferenceOption> {
    let input = input.trim();
    all_options()
        .find(|option| option.matches(input))
        .ok_or_else(|| Error::UnknownPreference(input.to_string()))
}
