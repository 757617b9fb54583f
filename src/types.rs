use crate::action_plan::CultureLabel;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A demographic breakdown axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Age,
    Sex,
    Ethnicity,
}

impl Dimension {
    /// All dimensions, in the order used to pick the primary one for grand totals
    pub const PRIMARY_ORDER: [Dimension; 3] = [Dimension::Age, Dimension::Sex, Dimension::Ethnicity];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Age => "age",
            Dimension::Sex => "sex",
            Dimension::Ethnicity => "ethnicity",
        }
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "age" => Ok(Dimension::Age),
            "sex" => Ok(Dimension::Sex),
            "ethnicity" => Ok(Dimension::Ethnicity),
            other => Err(Error::UnknownDimension(other.to_string())),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tally attached to a bucket.
///
/// Fixtures carry either a flat number or a support/neutral/oppose triple;
/// both deserialize into this type and total the same way. A triple must name
/// at least one of its keys and nothing else; missing keys count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, try_from = "RawVoteCount")]
pub enum VoteCount {
    /// Legacy flat tally
    Flat(i64),
    /// Structured tally
    Tally {
        support: i64,
        neutral: i64,
        oppose: i64,
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTally {
    support: Option<i64>,
    neutral: Option<i64>,
    oppose: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVoteCount {
    Flat(i64),
    Tally(RawTally),
}

impl TryFrom<RawVoteCount> for VoteCount {
    type Error = String;

    fn try_from(raw: RawVoteCount) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawVoteCount::Flat(n) => Ok(VoteCount::Flat(n)),
            RawVoteCount::Tally(RawTally {
                support: None,
                neutral: None,
                oppose: None,
            }) => Err("vote tally needs at least one of support, neutral or oppose".to_string()),
            RawVoteCount::Tally(RawTally {
                support,
                neutral,
                oppose,
            }) => Ok(VoteCount::tally(
                support.unwrap_or(0),
                neutral.unwrap_or(0),
                oppose.unwrap_or(0),
            )),
        }
    }
}

impl VoteCount {
    pub fn tally(support: i64, neutral: i64, oppose: i64) -> Self {
        VoteCount::Tally {
            support,
            neutral,
            oppose,
        }
    }

    /// Raw `(support, neutral, oppose)`; a flat tally counts entirely as support
    pub fn parts(&self) -> (i64, i64, i64) {
        match *self {
            VoteCount::Flat(n) => (n, 0, 0),
            VoteCount::Tally {
                support,
                neutral,
                oppose,
            } => (support, neutral, oppose),
        }
    }

    /// Structured form of this count
    pub fn normalized(&self) -> Self {
        let (support, neutral, oppose) = self.parts();
        VoteCount::tally(support, neutral, oppose)
    }

    /// Sum of all sub-counts, with negative sub-counts clamped to zero.
    /// Saturates at `u64::MAX`.
    pub fn total(&self) -> u64 {
        let (support, neutral, oppose) = self.parts();
        [support, neutral, oppose]
            .iter()
            .map(|n| (*n).max(0) as u64)
            .fold(0u64, u64::saturating_add)
    }

    pub fn has_negative(&self) -> bool {
        let (support, neutral, oppose) = self.parts();
        support < 0 || neutral < 0 || oppose < 0
    }
}

impl From<i64> for VoteCount {
    fn from(n: i64) -> Self {
        VoteCount::Flat(n)
    }
}

impl From<i32> for VoteCount {
    fn from(n: i32) -> Self {
        VoteCount::Flat(n as i64)
    }
}

/// Bucket label to tally, in insertion order
pub type BucketMap = IndexMap<String, VoteCount>;

/// Per-dimension breakdowns for one entity; any dimension may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemographicDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<BucketMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<BucketMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<BucketMap>,
}

impl DemographicDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for one dimension
    pub fn with<L, C, I>(mut self, dimension: Dimension, buckets: I) -> Self
    where
        L: Into<String>,
        C: Into<VoteCount>,
        I: IntoIterator<Item = (L, C)>,
    {
        let map: BucketMap = buckets
            .into_iter()
            .map(|(label, count)| (label.into(), count.into()))
            .collect();
        *self.slot_mut(dimension) = Some(map);
        self
    }

    pub fn get(&self, dimension: Dimension) -> Option<&BucketMap> {
        match dimension {
            Dimension::Age => self.age.as_ref(),
            Dimension::Sex => self.sex.as_ref(),
            Dimension::Ethnicity => self.ethnicity.as_ref(),
        }
    }

    fn slot_mut(&mut self, dimension: Dimension) -> &mut Option<BucketMap> {
        match dimension {
            Dimension::Age => &mut self.age,
            Dimension::Sex => &mut self.sex,
            Dimension::Ethnicity => &mut self.ethnicity,
        }
    }

    /// A dimension is populated when it is present with at least one bucket
    pub fn is_populated(&self, dimension: Dimension) -> bool {
        self.get(dimension).map_or(false, |buckets| !buckets.is_empty())
    }

    /// Buckets holding a negative sub-count, in dimension then insertion order
    pub fn negative_buckets(&self) -> Vec<(Dimension, &str)> {
        Dimension::PRIMARY_ORDER
            .into_iter()
            .filter_map(|dimension| self.get(dimension).map(|buckets| (dimension, buckets)))
            .flat_map(|(dimension, buckets)| {
                buckets
                    .iter()
                    .filter(|(_, count)| count.has_negative())
                    .map(move |(label, _)| (dimension, label.as_str()))
            })
            .collect()
    }

    /// Reject negative sub-counts anywhere in the dataset
    pub fn validate(&self, entity_id: &str) -> Result<()> {
        match self.negative_buckets().first() {
            Some((dimension, label)) => Err(Error::Validation(format!(
                "Negative vote count in entity '{}', dimension '{}', bucket '{}'",
                entity_id, dimension, label
            ))),
            None => Ok(()),
        }
    }
}

/// Which list an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Project,
    Idea,
}

impl From<&str> for EntityKind {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "idea" | "ideas" => EntityKind::Idea,
            _ => EntityKind::Project,
        }
    }
}

/// A council project or community idea
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub demographics: Option<DemographicDataset>,
}

impl Entity {
    pub fn new(id: impl Into<String>, title: impl Into<String>, demographics: DemographicDataset) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            demographics: Some(demographics),
        }
    }
}

/// Participation summary for one council area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaParticipation {
    pub area: String,
    pub votes: u64,
    pub ideas: u64,
    pub campaigns: u64,
    pub culture: CultureLabel,
    pub age: String,
    pub sex: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_count_shapes_total_the_same() {
        assert_eq!(VoteCount::tally(3, 2, 1).total(), 6);
        assert_eq!(VoteCount::Flat(6).total(), 6);
        assert_eq!(VoteCount::Flat(6).normalized(), VoteCount::tally(6, 0, 0));
    }

    #[test]
    fn test_negative_sub_counts_clamp() {
        let count = VoteCount::tally(5, -2, 1);
        assert_eq!(count.total(), 6);
        assert!(count.has_negative());
        assert_eq!(VoteCount::Flat(-4).total(), 0);
    }

    #[test]
    fn test_huge_counts_saturate() {
        assert_eq!(VoteCount::tally(i64::MAX, i64::MAX, i64::MAX).total(), u64::MAX);
        assert_eq!(VoteCount::tally(i64::MAX, 1, -5).total(), i64::MAX as u64 + 1);
        assert_eq!(VoteCount::Flat(i64::MAX).total(), i64::MAX as u64);
    }

    #[test]
    fn test_malformed_tallies_fail_to_parse() {
        for json in [r#"{"suport": 40}"#, r#"{"count": 5}"#, r#"{}"#, r#"{"support": 1, "extra": 2}"#] {
            assert!(
                serde_json::from_str::<VoteCount>(json).is_err(),
                "{} should not parse",
                json
            );
        }
        assert_eq!(
            serde_json::from_str::<VoteCount>(r#"{"oppose": 3}"#).unwrap(),
            VoteCount::tally(0, 0, 3)
        );
    }

    #[test]
    fn test_serialized_shapes_read_back() {
        let json = serde_json::to_string(&VoteCount::tally(1, 2, 3)).unwrap();
        assert_eq!(json, r#"{"support":1,"neutral":2,"oppose":3}"#);
        assert_eq!(serde_json::to_string(&VoteCount::Flat(4)).unwrap(), "4");
    }

    #[test]
    fn test_negative_buckets_listed_once_each() {
        let dataset = DemographicDataset::new()
            .with(Dimension::Sex, [("Male", VoteCount::tally(1, -1, -1)), ("Female", VoteCount::Flat(2))])
            .with(Dimension::Age, [("18-25", -3), ("26-40", 4)]);

        assert_eq!(
            dataset.negative_buckets(),
            vec![(Dimension::Age, "18-25"), (Dimension::Sex, "Male")]
        );
        assert!(DemographicDataset::new().negative_buckets().is_empty());
    }

    #[test]
    fn test_deserialize_mixed_shapes() {
        let json = r#"{
            "age": { "18-25": 4, "26-40": { "support": 3, "neutral": 2, "oppose": 1 } },
            "sex": { "Female": { "support": 2 } }
        }"#;
        let dataset: DemographicDataset = serde_json::from_str(json).unwrap();

        let age = dataset.get(Dimension::Age).unwrap();
        let labels: Vec<&str> = age.keys().map(|k| k.as_str()).collect();
        assert_eq!(labels, vec!["18-25", "26-40"]);
        assert_eq!(age["18-25"], VoteCount::Flat(4));
        assert_eq!(age["26-40"].total(), 6);
        assert_eq!(dataset.get(Dimension::Sex).unwrap()["Female"], VoteCount::tally(2, 0, 0));
        assert!(dataset.get(Dimension::Ethnicity).is_none());
    }

    #[test]
    fn test_dimension_parsing() {
        assert_eq!("Ethnicity".parse::<Dimension>().unwrap(), Dimension::Ethnicity);
        assert!(matches!(
            "income".parse::<Dimension>(),
            Err(Error::UnknownDimension(ref d)) if d == "income"
        ));
    }

    #[test]
    fn test_validate_names_offending_bucket() {
        let dataset = DemographicDataset::new()
            .with(Dimension::Age, [("18-25", 3)])
            .with(Dimension::Sex, [("Male", VoteCount::tally(1, -1, 0))]);

        let err = dataset.validate("proj-9").unwrap_err().to_string();
        assert!(err.contains("proj-9"));
        assert!(err.contains("sex"));
        assert!(err.contains("Male"));
    }

    #[test]
    fn test_empty_dimension_is_not_populated() {
        let dataset = DemographicDataset::new().with(Dimension::Age, Vec::<(String, i64)>::new());
        assert!(dataset.get(Dimension::Age).is_some());
        assert!(!dataset.is_populated(Dimension::Age));
    }
}
