//! Entity lists and area participation rows feeding the dashboard.

use crate::action_plan::CultureLabel;
use crate::config::CountPolicy;
use crate::error::{Error, Result};
use crate::proposals::Proposal;
use crate::types::{AreaParticipation, DemographicDataset, Dimension, Entity, EntityKind};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything the council dashboard displays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub projects: Vec<Entity>,
    #[serde(default)]
    pub ideas: Vec<Entity>,
    #[serde(default)]
    pub participation: Vec<AreaParticipation>,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
}

impl Catalog {
    /// Demo fixtures shipped with the dashboard
    pub fn builtin() -> Self {
        let projects = vec![
            Entity::new(
                "proj-1",
                "Central Park Upgrade",
                demographics([30, 50, 30, 10], [60, 60], [80, 40]),
            ),
            Entity::new(
                "proj-2",
                "New Library Construction",
                demographics([10, 40, 30, 20], [45, 55], [50, 50]),
            ),
        ];

        let ideas = vec![
            Entity::new(
                "idea-1",
                "Community Garden",
                demographics([12, 20, 10, 8], [25, 25], [30, 20]),
            ),
            Entity::new(
                "idea-2",
                "Road Safety Initiative",
                demographics([8, 30, 20, 12], [35, 35], [40, 30]),
            ),
        ];

        let participation = vec![
            area("Central Park", [120, 8, 2], CultureLabel::Multicultural, "All", "All"),
            area("Northside", [80, 3, 1], CultureLabel::Youth, "18-25", "Mixed"),
            area("East End", [45, 1, 0], CultureLabel::Seniors, "60+", "Female"),
        ];

        let proposals = vec![
            Proposal::new("prop-1", "Fitzroy Gardens Upgrade ($2M)", 64),
            Proposal::new("prop-2", "Community Garden ($50K)", 37),
            Proposal::new("prop-3", "New Library Construction ($5M)", 82).without_author(),
            Proposal::new("prop-4", "Road Safety Initiative ($500K)", 45).without_author(),
        ];

        Self {
            projects,
            ideas,
            participation,
            proposals,
        }
    }

    /// Load a catalog from JSON, or YAML when the extension is `.yaml`/`.yml`
    pub fn load(path: &Path, policy: CountPolicy) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents)?,
            _ => Self::from_json(&contents)?,
        };
        debug!(
            "Loaded catalog from {} ({} projects, {} ideas, {} areas, {} proposals)",
            path.display(),
            catalog.projects.len(),
            catalog.ideas.len(),
            catalog.participation.len(),
            catalog.proposals.len()
        );

        match policy {
            CountPolicy::Reject => catalog.validate()?,
            CountPolicy::Clamp => {
                for (entity_id, dimension, label) in catalog.negative_buckets() {
                    warn!(
                        "Clamping negative vote count to zero in entity '{}', dimension '{}', bucket '{}'",
                        entity_id, dimension, label
                    );
                }
            }
        }
        Ok(catalog)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Every `(entity id, dimension, bucket)` holding a negative sub-count
    pub fn negative_buckets(&self) -> Vec<(&str, Dimension, &str)> {
        self.projects
            .iter()
            .chain(self.ideas.iter())
            .filter_map(|entity| entity.demographics.as_ref().map(|d| (entity.id.as_str(), d)))
            .flat_map(|(id, dataset)| {
                dataset
                    .negative_buckets()
                    .into_iter()
                    .map(move |(dimension, label)| (id, dimension, label))
            })
            .collect()
    }

    /// Fail on the first negative vote count
    pub fn validate(&self) -> Result<()> {
        for entity in self.projects.iter().chain(self.ideas.iter()) {
            if let Some(ref dataset) = entity.demographics {
                dataset.validate(&entity.id)?;
            }
        }
        Ok(())
    }

    pub fn proposal_mut(&mut self, id: &str) -> Result<&mut Proposal> {
        self.proposals
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::EntityNotFound(id.to_string()))
    }

    pub fn entities(&self, kind: EntityKind) -> &[Entity] {
        match kind {
            EntityKind::Project => &self.projects,
            EntityKind::Idea => &self.ideas,
        }
    }
}

const AGE_BUCKETS: [&str; 4] = ["18-25", "26-40", "41-60", "60+"];
const SEX_BUCKETS: [&str; 2] = ["Male", "Female"];
const ETHNICITY_BUCKETS: [&str; 2] = ["Multicultural", "Other"];

fn demographics(age: [i64; 4], sex: [i64; 2], ethnicity: [i64; 2]) -> DemographicDataset {
    DemographicDataset::new()
        .with(Dimension::Age, AGE_BUCKETS.into_iter().zip(age))
        .with(Dimension::Sex, SEX_BUCKETS.into_iter().zip(sex))
        .with(Dimension::Ethnicity, ETHNICITY_BUCKETS.into_iter().zip(ethnicity))
}

fn area(name: &str, counts: [u64; 3], culture: CultureLabel, age: &str, sex: &str) -> AreaParticipation {
    let [votes, ideas, campaigns] = counts;
    AreaParticipation {
        area: name.to_string(),
        votes,
        ideas,
        campaigns,
        culture,
        age: age.to_string(),
        sex: sex.to_string(),
    }
}
