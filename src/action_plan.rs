use crate::aggregate::rank_buckets;
use crate::types::{AreaParticipation, DemographicDataset, Dimension, Entity};
use log::debug;
use serde::{Deserialize, Serialize};

pub const MULTICULTURAL_PLAN: &str =
    "Launch a multicultural festival and sports day to engage all age groups.";
pub const YOUTH_PLAN: &str = "Create coding bootcamps and music events for youth participation.";
pub const SENIOR_WOMEN_PLAN: &str = "Organize wellness workshops and art classes for senior women.";
pub const OUTREACH_PLAN: &str =
    "Increase outreach and awareness campaigns tailored to local demographics.";

/// Label used when a dimension has no data
pub const ALL_LABEL: &str = "All";

/// Community segment an action plan targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CultureLabel {
    Multicultural,
    Youth,
    Seniors,
}

impl CultureLabel {
    /// Classify an ethnicity bucket label by substring, case-insensitively
    pub fn from_ethnicity_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("multicultural") {
            CultureLabel::Multicultural
        } else if lower.contains("youth") {
            CultureLabel::Youth
        } else if lower.contains("senior") {
            CultureLabel::Seniors
        } else {
            CultureLabel::Multicultural
        }
    }

    /// Infer a segment from an age bucket label such as "26-40" or "60+"
    pub fn from_age_label(label: &str) -> Self {
        if ["18", "26", "40"].iter().any(|s| label.contains(s)) {
            CultureLabel::Youth
        } else if label.contains("60") {
            CultureLabel::Seniors
        } else {
            CultureLabel::Multicultural
        }
    }
}

/// Highest-total bucket label per dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominantProfile {
    pub culture: CultureLabel,
    pub age: String,
    pub sex: String,
}

impl DominantProfile {
    pub fn new(culture: CultureLabel, age: impl Into<String>, sex: impl Into<String>) -> Self {
        Self {
            culture,
            age: age.into(),
            sex: sex.into(),
        }
    }
}

fn top_label(dataset: &DemographicDataset, dimension: Dimension) -> Option<String> {
    dataset
        .get(dimension)
        .map(rank_buckets)
        .and_then(|ranked| ranked.into_iter().next())
        .map(|bucket| bucket.label)
}

/// Pick the dominant bucket of each dimension.
///
/// Without an ethnicity breakdown the culture is inferred from the age label.
pub fn derive_dominant_profile(dataset: &DemographicDataset) -> DominantProfile {
    let age = top_label(dataset, Dimension::Age).unwrap_or_else(|| ALL_LABEL.to_string());
    let sex = top_label(dataset, Dimension::Sex).unwrap_or_else(|| ALL_LABEL.to_string());

    let culture = if dataset.get(Dimension::Ethnicity).is_some() {
        top_label(dataset, Dimension::Ethnicity)
            .map(|label| CultureLabel::from_ethnicity_label(&label))
            .unwrap_or(CultureLabel::Multicultural)
    } else {
        CultureLabel::from_age_label(&age)
    };

    debug!("Dominant profile: {:?} / {} / {}", culture, age, sex);
    DominantProfile { culture, age, sex }
}

/// Map a profile to its canned recommendation.
///
/// Check order matters: a senior profile that is not female falls through
/// to the outreach plan.
pub fn select_action_plan(profile: &DominantProfile) -> &'static str {
    match profile.culture {
        CultureLabel::Multicultural => MULTICULTURAL_PLAN,
        CultureLabel::Youth => YOUTH_PLAN,
        CultureLabel::Seniors if profile.sex == "Female" => SENIOR_WOMEN_PLAN,
        CultureLabel::Seniors => OUTREACH_PLAN,
    }
}

impl Entity {
    /// Dominant profile of this entity; missing demographics give the all-"All" profile
    pub fn dominant_profile(&self) -> DominantProfile {
        match self.demographics.as_ref() {
            Some(dataset) => derive_dominant_profile(dataset),
            None => derive_dominant_profile(&DemographicDataset::default()),
        }
    }
}

impl AreaParticipation {
    /// The row's own labels as a profile
    pub fn profile(&self) -> DominantProfile {
        DominantProfile::new(self.culture, self.age.clone(), self.sex.clone())
    }

    pub fn action_plan(&self) -> &'static str {
        select_action_plan(&self.profile())
    }
}
