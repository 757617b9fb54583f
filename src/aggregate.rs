//! Demographic breakdown aggregation.
//!
//! Every call recomputes from the dataset snapshot it is given; nothing is
//! cached or mutated.

use crate::types::{BucketMap, DemographicDataset, Dimension, VoteCount};
use log::debug;
use serde::Serialize;

/// One bucket of a breakdown with its computed total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketTotal {
    pub label: String,
    pub count: VoteCount,
    pub total: u64,
}

/// Render-ready breakdown of one dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    pub dimension: Dimension,
    /// Buckets by descending total; ties keep insertion order
    pub buckets: Vec<BucketTotal>,
    /// Largest single-bucket total, or 1 when there are no buckets
    pub max: u64,
    /// Respondent count from the primary dimension
    pub grand_total: u64,
}

impl AggregationResult {
    /// Bar width for a bucket as a fraction of the largest bucket, in `[0, 1]`
    pub fn proportion(&self, bucket: &BucketTotal) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        bucket.total as f64 / self.max as f64
    }

    /// Sum of the bucket totals in this dimension
    pub fn dimension_total(&self) -> u64 {
        self.buckets.iter().map(|b| b.total).fold(0, u64::saturating_add)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Label of the highest-total bucket
    pub fn top_label(&self) -> Option<&str> {
        self.buckets.first().map(|b| b.label.as_str())
    }
}

/// Total of one tally, clamping negative sub-counts to zero.
///
/// Negative counts are reported once when a catalog is loaded, not here.
pub fn total(count: &VoteCount) -> u64 {
    count.total()
}

/// Rank the buckets of a map by descending total.
///
/// `sort_by` is stable, so equal totals keep their insertion order.
pub fn rank_buckets(buckets: &BucketMap) -> Vec<BucketTotal> {
    let mut ranked: Vec<BucketTotal> = buckets
        .iter()
        .map(|(label, count)| BucketTotal {
            label: label.clone(),
            count: *count,
            total: total(count),
        })
        .collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked
}

/// Break a dataset down along one dimension.
///
/// A missing dataset or dimension yields an empty result with `max == 1`.
pub fn aggregate(dataset: Option<&DemographicDataset>, dimension: Dimension) -> AggregationResult {
    let buckets = dataset
        .and_then(|d| d.get(dimension))
        .map(rank_buckets)
        .unwrap_or_default();

    let max = buckets.iter().map(|b| b.total).max().unwrap_or(1);
    let grand_total = grand_total(dataset);

    debug!(
        "Aggregated {} buckets for dimension '{}' (max {}, grand total {})",
        buckets.len(),
        dimension,
        max,
        grand_total
    );

    AggregationResult {
        dimension,
        buckets,
        max,
        grand_total,
    }
}

/// The first populated dimension in [`Dimension::PRIMARY_ORDER`]
pub fn primary_dimension(dataset: &DemographicDataset) -> Option<Dimension> {
    Dimension::PRIMARY_ORDER
        .into_iter()
        .find(|d| dataset.is_populated(*d))
}

/// Respondent count for an entity.
///
/// Sums only the primary dimension so the same people are not counted
/// once per breakdown. Returns 0 when nothing is populated and saturates at
/// `u64::MAX`.
pub fn grand_total(dataset: Option<&DemographicDataset>) -> u64 {
    let Some(dataset) = dataset else {
        return 0;
    };
    primary_dimension(dataset)
        .and_then(|d| dataset.get(d))
        .map(|buckets| buckets.values().map(total).fold(0, u64::saturating_add))
        .unwrap_or(0)
}
