//! View model for the council participation tiles and action-plan list.

use crate::action_plan::select_action_plan;
use crate::aggregate::aggregate;
use crate::types::{AreaParticipation, Dimension, Entity, EntityKind};
use log::warn;
use serde::Serialize;
use std::fmt::Write;

/// The entity with `selected_id`, else the first one
pub fn select_entity<'a>(entities: &'a [Entity], selected_id: Option<&str>) -> Option<&'a Entity> {
    if let Some(id) = selected_id {
        if let Some(entity) = entities.iter().find(|e| e.id == id) {
            return Some(entity);
        }
        warn!("Entity '{}' not found, falling back to the first entry", id);
    }
    entities.first()
}

/// One bar of a breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub label: String,
    pub total: u64,
    /// Share of the largest bucket, in `[0, 1]`
    pub proportion: f64,
}

/// A participation tile: selected entity, its respondent total and one breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownView {
    pub kind: EntityKind,
    pub entity_id: Option<String>,
    pub title: Option<String>,
    pub dimension: Dimension,
    pub total_votes: u64,
    pub rows: Vec<BreakdownRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_plan: Option<&'static str>,
}

impl BreakdownView {
    pub fn build(
        kind: EntityKind,
        entities: &[Entity],
        selected_id: Option<&str>,
        dimension: Dimension,
    ) -> Self {
        let entity = select_entity(entities, selected_id);
        let dataset = entity.and_then(|e| e.demographics.as_ref());
        let result = aggregate(dataset, dimension);

        let rows = result
            .buckets
            .iter()
            .map(|bucket| BreakdownRow {
                label: bucket.label.clone(),
                total: bucket.total,
                proportion: result.proportion(bucket),
            })
            .collect();

        // only project tiles recommend a plan
        let action_plan = match (kind, entity) {
            (EntityKind::Project, Some(entity)) => {
                Some(select_action_plan(&entity.dominant_profile()))
            }
            _ => None,
        };

        Self {
            kind,
            entity_id: entity.map(|e| e.id.clone()),
            title: entity.map(|e| e.title.clone()),
            dimension,
            total_votes: result.grand_total,
            rows,
            action_plan,
        }
    }
}

/// Recommendation for one council area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionPlanEntry {
    pub area: String,
    pub plan: &'static str,
}

impl ActionPlanEntry {
    pub fn for_rows(rows: &[AreaParticipation]) -> Vec<Self> {
        rows.iter()
            .map(|row| ActionPlanEntry {
                area: row.area.clone(),
                plan: row.action_plan(),
            })
            .collect()
    }
}

/// Plain-text tile with `#` bars
pub fn render_text(view: &BreakdownView, bar_width: usize) -> String {
    let mut out = String::new();
    let title = view.title.as_deref().unwrap_or("(none)");
    let _ = writeln!(out, "Selected: {}", title);
    let _ = writeln!(out, "Total votes: {}", view.total_votes);
    let _ = writeln!(out, "Breakdown: {}", view.dimension);

    if view.rows.is_empty() {
        out.push_str("No data\n");
        return out;
    }

    let label_width = view.rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    for row in &view.rows {
        let filled = (row.proportion * bar_width as f64).round() as usize;
        let _ = writeln!(
            out,
            "{:<label_width$}  {:<bar_width$}  {}",
            row.label,
            "#".repeat(filled.min(bar_width)),
            row.total,
        );
    }

    if let Some(plan) = view.action_plan {
        let _ = writeln!(out, "Action plan: {}", plan);
    }
    out
}
